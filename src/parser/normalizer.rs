use serde_json::Value;

use crate::parser::columns::{assign, ColumnMap, COLUMN_MAP};
use crate::parser::types::Ticket;

/// Código numérico de status da API de helpdesk → rótulo canônico.
pub const STATUS_CODES: &[(i64, &str)] = &[
    (2, "Aberto"),
    (3, "Pendente"),
    (4, "Resolvido"),
    (5, "Fechado"),
];

/// Rótulo para códigos de status fora da tabela.
pub const STATUS_FALLBACK: &str = "Desconhecido";

/// Código numérico de prioridade → rótulo canônico.
pub const PRIORITY_CODES: &[(i64, &str)] = &[
    (1, "Baixa"),
    (2, "Média"),
    (3, "Alta"),
    (4, "Urgente"),
];

/// Rótulo para códigos de prioridade fora da tabela.
pub const PRIORITY_FALLBACK: &str = "Média";

pub fn status_label(code: i64) -> &'static str {
    STATUS_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(STATUS_FALLBACK)
}

pub fn priority_label(code: i64) -> &'static str {
    PRIORITY_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(PRIORITY_FALLBACK)
}

/// Coalescência tipada: campo textual de um objeto JSON, com string vazia
/// como padrão. Números são coagidos para texto (ids numéricos viram string).
fn text(obj: &Value, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Como `text`, mas string vazia vira None.
fn opt_text(obj: &Value, key: &str) -> Option<String> {
    let s = text(obj, key);
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Campo direto com fallback em `custom_fields` (ex.: `processo` →
/// `custom_fields.cf_processo`), depois string vazia.
fn text_with_custom_field(obj: &Value, key: &str, custom_key: &str) -> String {
    let direct = text(obj, key);
    if !direct.is_empty() {
        return direct;
    }
    obj.get("custom_fields")
        .map(|cf| text(cf, custom_key))
        .unwrap_or_default()
}

/// Normaliza um objeto da API de helpdesk para o ticket canônico.
///
/// Política de leniência: nenhum acesso a campo falha — valores ausentes ou
/// com tipo errado degradam para o padrão seguro (string vazia / false /
/// vetor vazio). Registros sujos nunca abortam o lote.
pub fn ticket_from_api_object(raw: &Value) -> Ticket {
    let status = raw
        .get("status")
        .and_then(Value::as_i64)
        .map(status_label)
        .unwrap_or(STATUS_FALLBACK)
        .to_string();
    let prioridade = raw
        .get("prioridade")
        .and_then(Value::as_i64)
        .map(priority_label)
        .unwrap_or(PRIORITY_FALLBACK)
        .to_string();
    let tags = raw
        .get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ticket {
        id: text(raw, "id"),
        link_ticket: opt_text(raw, "link_ticket"),
        assunto: text(raw, "assunto"),
        descricao: text(raw, "descricao"),
        status,
        prioridade,
        tipo: text(raw, "tipo"),
        nome_solicitante: text(raw, "nome_solicitante"),
        email_solicitante: text(raw, "email_solicitante"),
        hora_criacao: text(raw, "created_at"),
        hora_ultima_atualizacao: text(raw, "updated_at"),
        processo: text_with_custom_field(raw, "processo", "cf_processo"),
        empresa: opt_text(raw, "empresa_id"),
        avaliacao: opt_text(raw, "avaliacao"),
        modulo: text_with_custom_field(raw, "modulo", "cf_mdulo"),
        tags,
        is_escalated: raw
            .get("is_escalated")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

/// Normaliza uma linha tabular (CSV / planilha) usando o dicionário de
/// cabeçalhos. Cabeçalho ausente → campo vazio; cabeçalho desconhecido →
/// célula descartada.
pub fn ticket_from_row(columns: &ColumnMap, cells: &[String]) -> Ticket {
    let mut ticket = Ticket::default();
    for (header, field) in COLUMN_MAP {
        let value = columns
            .get(cells, header)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        assign(&mut ticket, *field, value);
    }
    ticket
}
