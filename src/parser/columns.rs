use std::collections::HashMap;

use crate::parser::types::Ticket;

/// Campos canônicos alimentados pelo formato tabular (CSV / planilha).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketField {
    Id,
    Assunto,
    Descricao,
    Status,
    Prioridade,
    Tipo,
    NomeSolicitante,
    EmailSolicitante,
    HoraCriacao,
    HoraUltimaAtualizacao,
    Processo,
}

/// Dicionário cabeçalho → campo canônico. Cabeçalhos fora desta tabela são
/// descartados; campos sem cabeçalho correspondente ficam com string vazia.
pub const COLUMN_MAP: &[(&str, TicketField)] = &[
    ("ID do ticket", TicketField::Id),
    ("Assunto", TicketField::Assunto),
    ("Descrição", TicketField::Descricao),
    ("Status", TicketField::Status),
    ("Prioridade", TicketField::Prioridade),
    ("Tipo", TicketField::Tipo),
    ("Nome do solicitante", TicketField::NomeSolicitante),
    ("E-mail do solicitante", TicketField::EmailSolicitante),
    ("Hora da criação", TicketField::HoraCriacao),
    ("Hora da última atualização", TicketField::HoraUltimaAtualizacao),
    ("Processo", TicketField::Processo),
];

/// Atribui o valor de uma célula ao campo canônico correspondente.
pub fn assign(ticket: &mut Ticket, field: TicketField, value: String) {
    match field {
        TicketField::Id => ticket.id = value,
        TicketField::Assunto => ticket.assunto = value,
        TicketField::Descricao => ticket.descricao = value,
        TicketField::Status => ticket.status = value,
        TicketField::Prioridade => ticket.prioridade = value,
        TicketField::Tipo => ticket.tipo = value,
        TicketField::NomeSolicitante => ticket.nome_solicitante = value,
        TicketField::EmailSolicitante => ticket.email_solicitante = value,
        TicketField::HoraCriacao => ticket.hora_criacao = value,
        TicketField::HoraUltimaAtualizacao => ticket.hora_ultima_atualizacao = value,
        TicketField::Processo => ticket.processo = value,
    }
}

/// Mapeia nomes de coluna para o índice da célula em uma linha tabular.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    /// Constrói o mapa a partir da linha de cabeçalho (valores com trim).
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut indices = HashMap::new();
        for (i, field) in headers.into_iter().enumerate() {
            indices.insert(field.as_ref().trim().to_string(), i);
        }
        ColumnMap { indices }
    }

    /// Valor de uma coluna nomeada em `cells`, ou None se a coluna não existe.
    pub fn get<'a>(&self, cells: &'a [String], header: &str) -> Option<&'a str> {
        self.indices
            .get(header)
            .and_then(|&i| cells.get(i))
            .map(String::as_str)
    }

    pub fn has(&self, header: &str) -> bool {
        self.indices.contains_key(header)
    }
}
