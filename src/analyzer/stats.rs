use serde::Serialize;

use crate::parser::deserializers::resolution_millis;
use crate::parser::types::Ticket;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Indicadores agregados da coleção — recomputados sob demanda, função pura
/// da coleção corrente (sem acumulação escondida entre chamadas).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total_tickets: usize,
    pub tickets_abertos: usize,
    pub tickets_fechados: usize,
    pub tickets_pendentes: usize,
    pub prioridade_alta: usize,
    /// Horas inteiras; 0 quando não há tickets fechados com duração válida.
    pub tempo_medio_resolucao: i64,
}

/// `true` se o status contém o termo, sem diferenciar maiúsculas.
/// Correspondência por substring, não por igualdade ("Em aberto" conta).
pub fn status_contains(ticket: &Ticket, needle: &str) -> bool {
    ticket.status.to_lowercase().contains(needle)
}

/// `true` se a prioridade contém o termo, sem diferenciar maiúsculas.
pub fn priority_contains(ticket: &Ticket, needle: &str) -> bool {
    ticket.prioridade.to_lowercase().contains(needle)
}

/// Computa as estatísticas de resumo da coleção.
///
/// O tempo médio de resolução considera apenas tickets cujo status contém
/// "fechado" e cuja duração (atualização − criação) é positiva e parseável;
/// a média dos diffs em milissegundos é convertida para horas e arredondada
/// uma única vez, no agregado.
pub fn process_ticket_data(tickets: &[Ticket]) -> TicketStats {
    let mut total_resolucao_ms: i64 = 0;
    let mut resolvidos: usize = 0;

    for ticket in tickets {
        if status_contains(ticket, "fechado") {
            if let Some(diff) =
                resolution_millis(&ticket.hora_criacao, &ticket.hora_ultima_atualizacao)
            {
                if diff > 0 {
                    total_resolucao_ms += diff;
                    resolvidos += 1;
                }
            }
        }
    }

    let tempo_medio_resolucao = if resolvidos > 0 {
        (total_resolucao_ms as f64 / resolvidos as f64 / MILLIS_PER_HOUR).round() as i64
    } else {
        0
    };

    TicketStats {
        total_tickets: tickets.len(),
        tickets_abertos: tickets.iter().filter(|t| status_contains(t, "aberto")).count(),
        tickets_fechados: tickets
            .iter()
            .filter(|t| status_contains(t, "fechado"))
            .count(),
        tickets_pendentes: tickets
            .iter()
            .filter(|t| status_contains(t, "pendente"))
            .count(),
        prioridade_alta: tickets
            .iter()
            .filter(|t| priority_contains(t, "alta"))
            .count(),
        tempo_medio_resolucao,
    }
}
