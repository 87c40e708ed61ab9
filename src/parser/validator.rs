use serde::Serialize;

use crate::error::AppError;
use crate::parser::types::Ticket;

/// Campos mínimos exigidos no ticket de amostra.
const REQUIRED_FIELDS: &[&str] = &["id", "assunto", "status"];

/// Resultado da validação de um lote normalizado.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Converte o relatório em `Result` para propagação com `?`.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.valid {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Valida a solidez estrutural mínima de um lote antes da aceitação.
///
/// A checagem de campos obrigatórios é feita por amostragem no PRIMEIRO
/// ticket apenas: ela bloqueia importações cujo esquema parece errado
/// (cabeçalhos trocados), não lotes com linhas individuais em branco.
pub fn validate_tickets(tickets: &[Ticket]) -> ValidationReport {
    let mut errors = Vec::new();

    if tickets.is_empty() {
        errors.push("Arquivo não contém dados válidos".to_string());
        return ValidationReport {
            valid: false,
            errors,
        };
    }

    let sample = &tickets[0];
    for field in REQUIRED_FIELDS {
        if sample_field(sample, field).trim().is_empty() {
            errors.push(format!("Campo obrigatório ausente: {field}"));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn sample_field<'a>(ticket: &'a Ticket, field: &str) -> &'a str {
    match field {
        "id" => &ticket.id,
        "assunto" => &ticket.assunto,
        "status" => &ticket.status,
        _ => "",
    }
}
