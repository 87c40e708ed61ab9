use serde::{Deserialize, Serialize};

/// Ticket canônico — imutável depois de criado; uma nova importação substitui
/// a coleção inteira, nunca atualiza tickets individualmente.
///
/// Os nomes serde seguem o formato consumido pela camada de apresentação
/// (`nomeSolicitante`, `horaCriacao`, ...); `link_ticket` e `is_escalated`
/// ficam em snake_case como no payload da API de helpdesk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_ticket: Option<String>,
    #[serde(default)]
    pub assunto: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub prioridade: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default, rename = "nomeSolicitante")]
    pub nome_solicitante: String,
    #[serde(default, rename = "emailSolicitante")]
    pub email_solicitante: String,
    #[serde(default, rename = "horaCriacao")]
    pub hora_criacao: String,
    #[serde(default, rename = "horaUltimaAtualizacao")]
    pub hora_ultima_atualizacao: String,
    #[serde(default)]
    pub processo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avaliacao: Option<String>,
    #[serde(default)]
    pub modulo: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_escalated: bool,
}

/// Formato de origem detectado pelo dispatcher de ingestão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Csv,
    Workbook,
}

/// Registro problemático encontrado durante o parse. Nunca aborta o lote —
/// a linha é pulada e o aviso é devolvido ao chamador.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}

/// Saída do dispatcher — tickets normalizados mais metadados de importação.
#[derive(Debug)]
pub struct ParseOutput {
    pub tickets: Vec<Ticket>,
    pub warnings: Vec<ParseWarning>,
    pub total_records: usize,
    pub synthesized_ids: usize,
    pub format: SourceFormat,
    pub parse_duration_ms: u64,
}
