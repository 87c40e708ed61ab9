use serde::{Deserialize, Serialize};

use crate::parser::types::Ticket;

/// Critérios de filtragem combinados por E lógico. Um campo `None` ou com
/// string vazia é inativo e não restringe nada.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub empresa: Option<String>,
    pub status: Option<String>,
    pub prioridade: Option<String>,
    pub processo: Option<String>,
    pub solicitante: Option<String>,
    /// Busca textual: substring sobre assunto OU descrição.
    pub busca: Option<String>,
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|s| !s.is_empty())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl FilterCriteria {
    /// `true` quando nenhum critério está ativo.
    pub fn is_empty(&self) -> bool {
        [
            &self.empresa,
            &self.status,
            &self.prioridade,
            &self.processo,
            &self.solicitante,
            &self.busca,
        ]
        .iter()
        .all(|c| active(c).is_none())
    }

    /// Avalia todos os critérios ativos contra um ticket. Campos de seleção
    /// comparam por igualdade (sem diferenciar maiúsculas); a busca textual
    /// compara por substring.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(empresa) = active(&self.empresa) {
            if !eq_ignore_case(ticket.empresa.as_deref().unwrap_or(""), empresa) {
                return false;
            }
        }
        if let Some(status) = active(&self.status) {
            if !eq_ignore_case(&ticket.status, status) {
                return false;
            }
        }
        if let Some(prioridade) = active(&self.prioridade) {
            if !eq_ignore_case(&ticket.prioridade, prioridade) {
                return false;
            }
        }
        if let Some(processo) = active(&self.processo) {
            if !eq_ignore_case(&ticket.processo, processo) {
                return false;
            }
        }
        if let Some(solicitante) = active(&self.solicitante) {
            if !eq_ignore_case(&ticket.nome_solicitante, solicitante) {
                return false;
            }
        }
        if let Some(busca) = active(&self.busca) {
            let termo = busca.to_lowercase();
            let no_assunto = ticket.assunto.to_lowercase().contains(&termo);
            let na_descricao = ticket.descricao.to_lowercase().contains(&termo);
            if !no_assunto && !na_descricao {
                return false;
            }
        }
        true
    }
}

/// Projeta a coleção através dos critérios, preservando a ordem original.
/// A coleção de entrada nunca é alterada.
pub fn filter_tickets(tickets: &[Ticket], criteria: &FilterCriteria) -> Vec<Ticket> {
    tickets
        .iter()
        .filter(|t| criteria.matches(t))
        .cloned()
        .collect()
}
