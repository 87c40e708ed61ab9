use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::parser::deserializers::parse_datetime;
use crate::parser::types::Ticket;

/// Ponto universal de gráfico — toda dimensão agregada sai neste formato.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub name: String,
    pub value: u64,
}

/// Agrupamento por domínio de e-mail do solicitante.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyData {
    pub domain: String,
    pub name: String,
    #[serde(rename = "ticketCount")]
    pub ticket_count: u64,
}

/// Limites de corte por dimensão (top-N após ordenação decrescente).
pub const TOP_PROCESSOS: usize = 8;
pub const TOP_MODULOS: usize = 8;
pub const TOP_TIPOS: usize = 6;
pub const TOP_TAGS: usize = 10;
pub const TOP_SOLICITANTES: usize = 10;
/// Janela da linha do tempo: os 30 dias mais recentes com criação de tickets.
pub const TIMELINE_DIAS: usize = 30;

// ─── Helpers de agrupamento ──────────────────────────────────────────────────

fn count_by<F>(tickets: &[Ticket], key: F) -> BTreeMap<String, u64>
where
    F: Fn(&Ticket) -> String,
{
    let mut map = BTreeMap::new();
    for ticket in tickets {
        *map.entry(key(ticket)).or_insert(0) += 1;
    }
    map
}

fn label_or(value: &str, missing: &str) -> String {
    if value.is_empty() {
        missing.to_string()
    } else {
        value.to_string()
    }
}

/// Ordem alfabética de rótulo (BTreeMap) — determinística por construção.
fn in_name_order(map: BTreeMap<String, u64>) -> Vec<ChartData> {
    map.into_iter()
        .map(|(name, value)| ChartData { name, value })
        .collect()
}

/// Ordena por contagem decrescente (nome como desempate) e corta em top-N.
fn top_n(map: BTreeMap<String, u64>, n: usize) -> Vec<ChartData> {
    let mut data = in_name_order(map);
    data.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    data.truncate(n);
    data
}

// ─── Dimensões ───────────────────────────────────────────────────────────────

/// Distribuição por status — agrupamento completo, sem corte.
pub fn get_status_chart_data(tickets: &[Ticket]) -> Vec<ChartData> {
    in_name_order(count_by(tickets, |t| label_or(&t.status, "Não definido")))
}

/// Distribuição por prioridade — agrupamento completo, sem corte.
pub fn get_priority_chart_data(tickets: &[Ticket]) -> Vec<ChartData> {
    in_name_order(count_by(tickets, |t| {
        label_or(&t.prioridade, "Não definida")
    }))
}

pub fn get_process_chart_data(tickets: &[Ticket]) -> Vec<ChartData> {
    top_n(
        count_by(tickets, |t| label_or(&t.processo, "Não definido")),
        TOP_PROCESSOS,
    )
}

pub fn get_type_chart_data(tickets: &[Ticket]) -> Vec<ChartData> {
    top_n(
        count_by(tickets, |t| label_or(&t.tipo, "Não definido")),
        TOP_TIPOS,
    )
}

pub fn get_module_chart_data(tickets: &[Ticket]) -> Vec<ChartData> {
    top_n(
        count_by(tickets, |t| label_or(&t.modulo, "Não definido")),
        TOP_MODULOS,
    )
}

/// Tags são multivaloradas: cada ocorrência conta uma vez por ticket.
pub fn get_tags_chart_data(tickets: &[Ticket]) -> Vec<ChartData> {
    let mut map = BTreeMap::new();
    for ticket in tickets {
        for tag in &ticket.tags {
            *map.entry(tag.clone()).or_insert(0u64) += 1;
        }
    }
    top_n(map, TOP_TAGS)
}

pub fn get_top_requesters(tickets: &[Ticket]) -> Vec<ChartData> {
    top_n(
        count_by(tickets, |t| {
            label_or(&t.nome_solicitante, "Não identificado")
        }),
        TOP_SOLICITANTES,
    )
}

/// Divisão escalados × normais — sempre exatamente dois pontos, mesmo com
/// um dos lados zerado; a soma é o total da coleção.
pub fn get_escalated_chart_data(tickets: &[Ticket]) -> Vec<ChartData> {
    let escalated = tickets.iter().filter(|t| t.is_escalated).count() as u64;
    vec![
        ChartData {
            name: "Escalados".to_string(),
            value: escalated,
        },
        ChartData {
            name: "Normais".to_string(),
            value: tickets.len() as u64 - escalated,
        },
    ]
}

/// Agrupamento por domínio do e-mail do solicitante. E-mail sem `@` ou
/// ausente cai no domínio "unknown"; o nome de exibição é o primeiro rótulo
/// do domínio em maiúsculas.
pub fn get_company_data(tickets: &[Ticket]) -> Vec<CompanyData> {
    let mut map: BTreeMap<String, u64> = BTreeMap::new();
    for ticket in tickets {
        let domain = ticket
            .email_solicitante
            .split('@')
            .nth(1)
            .filter(|d| !d.is_empty())
            .unwrap_or("unknown")
            .to_string();
        *map.entry(domain).or_insert(0) += 1;
    }
    let mut companies: Vec<CompanyData> = map
        .into_iter()
        .map(|(domain, ticket_count)| {
            let name = domain
                .split('.')
                .next()
                .filter(|label| !label.is_empty())
                .map(str::to_uppercase)
                .unwrap_or_else(|| domain.clone());
            CompanyData {
                domain,
                name,
                ticket_count,
            }
        })
        .collect();
    companies.sort_by(|a, b| {
        b.ticket_count
            .cmp(&a.ticket_count)
            .then_with(|| a.domain.cmp(&b.domain))
    });
    companies
}

/// Linha do tempo por data de criação (dd/MM/yyyy), cronológica ascendente,
/// cortada nos 30 dias mais recentes. Datas ilegíveis são puladas em
/// silêncio — não contam e não derrubam o agregado.
pub fn get_timeline_data(tickets: &[Ticket]) -> Vec<ChartData> {
    let mut map: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for ticket in tickets {
        if let Some(dt) = parse_datetime(&ticket.hora_criacao) {
            *map.entry(dt.date()).or_insert(0) += 1;
        }
    }
    let points: Vec<ChartData> = map
        .into_iter()
        .map(|(date, value)| ChartData {
            name: date.format("%d/%m/%Y").to_string(),
            value,
        })
        .collect();
    let skip = points.len().saturating_sub(TIMELINE_DIAS);
    points.into_iter().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(status: &str, processo: &str) -> Ticket {
        Ticket {
            status: status.into(),
            processo: processo.into(),
            ..Ticket::default()
        }
    }

    #[test]
    fn test_status_missing_bucketed() {
        let tickets = vec![ticket("Aberto", ""), ticket("", ""), ticket("Aberto", "")];
        let data = get_status_chart_data(&tickets);
        assert_eq!(
            data,
            vec![
                ChartData {
                    name: "Aberto".into(),
                    value: 2
                },
                ChartData {
                    name: "Não definido".into(),
                    value: 1
                },
            ]
        );
    }

    #[test]
    fn test_priority_missing_label_feminine() {
        let data = get_priority_chart_data(&[Ticket::default()]);
        assert_eq!(data[0].name, "Não definida");
    }

    #[test]
    fn test_process_truncates_top8() {
        let mut tickets = Vec::new();
        for i in 0..12 {
            // processo P00 aparece 13 vezes, P01 12, ... P11 2 vezes
            for _ in 0..(13 - i) {
                tickets.push(ticket("Aberto", &format!("P{i:02}")));
            }
        }
        let data = get_process_chart_data(&tickets);
        assert_eq!(data.len(), 8);
        assert_eq!(data[0].name, "P00");
        assert_eq!(data[0].value, 13);
        assert_eq!(data[7].name, "P07");
    }

    #[test]
    fn test_type_truncates_top6() {
        let tickets: Vec<Ticket> = (0..9)
            .map(|i| Ticket {
                tipo: format!("T{i}"),
                ..Ticket::default()
            })
            .collect();
        assert_eq!(get_type_chart_data(&tickets).len(), 6);
    }

    #[test]
    fn test_tags_counted_per_ticket() {
        let tickets = vec![
            Ticket {
                tags: vec!["nfe".into(), "erro".into()],
                ..Ticket::default()
            },
            Ticket {
                tags: vec!["nfe".into()],
                ..Ticket::default()
            },
            Ticket::default(),
        ];
        let data = get_tags_chart_data(&tickets);
        assert_eq!(data[0], ChartData { name: "nfe".into(), value: 2 });
        assert_eq!(data[1], ChartData { name: "erro".into(), value: 1 });
    }

    #[test]
    fn test_top_requesters_missing_name() {
        let tickets = vec![
            Ticket {
                nome_solicitante: "Ana".into(),
                ..Ticket::default()
            },
            Ticket::default(),
        ];
        let data = get_top_requesters(&tickets);
        assert!(data.iter().any(|d| d.name == "Não identificado"));
    }

    #[test]
    fn test_escalated_always_two_buckets() {
        let data = get_escalated_chart_data(&[]);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].name, "Escalados");
        assert_eq!(data[1].name, "Normais");
        assert_eq!(data[0].value + data[1].value, 0);

        let tickets = vec![
            Ticket {
                is_escalated: true,
                ..Ticket::default()
            },
            Ticket::default(),
            Ticket::default(),
        ];
        let data = get_escalated_chart_data(&tickets);
        assert_eq!(data[0].value, 1);
        assert_eq!(data[1].value, 2);
        assert_eq!(data[0].value + data[1].value, tickets.len() as u64);
    }

    #[test]
    fn test_company_from_email_domain() {
        let tickets = vec![
            Ticket {
                email_solicitante: "ana@acme.com.br".into(),
                ..Ticket::default()
            },
            Ticket {
                email_solicitante: "bia@acme.com.br".into(),
                ..Ticket::default()
            },
            Ticket {
                email_solicitante: "caio@globex.io".into(),
                ..Ticket::default()
            },
            Ticket::default(), // sem e-mail → unknown
        ];
        let data = get_company_data(&tickets);
        assert_eq!(data[0].domain, "acme.com.br");
        assert_eq!(data[0].name, "ACME");
        assert_eq!(data[0].ticket_count, 2);
        assert!(data.iter().any(|c| c.domain == "unknown"));
        assert!(data.iter().any(|c| c.name == "GLOBEX"));
    }

    #[test]
    fn test_timeline_skips_unparseable_and_sorts() {
        let tickets = vec![
            Ticket {
                hora_criacao: "2024-02-10T08:00:00Z".into(),
                ..Ticket::default()
            },
            Ticket {
                hora_criacao: "2024-02-09T23:00:00Z".into(),
                ..Ticket::default()
            },
            Ticket {
                hora_criacao: "2024-02-10T12:00:00Z".into(),
                ..Ticket::default()
            },
            Ticket {
                hora_criacao: "data inválida".into(),
                ..Ticket::default()
            },
        ];
        let data = get_timeline_data(&tickets);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0], ChartData { name: "09/02/2024".into(), value: 1 });
        assert_eq!(data[1], ChartData { name: "10/02/2024".into(), value: 2 });
    }

    #[test]
    fn test_timeline_keeps_most_recent_30() {
        let tickets: Vec<Ticket> = (0..40)
            .map(|i| {
                let date =
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i);
                Ticket {
                    hora_criacao: format!("{}T10:00:00Z", date.format("%Y-%m-%d")),
                    ..Ticket::default()
                }
            })
            .collect();
        let data = get_timeline_data(&tickets);
        assert_eq!(data.len(), TIMELINE_DIAS);
        // mantém os mais recentes: o primeiro bucket é o 11º dia
        assert_eq!(data[0].name, "11/01/2024");
        assert_eq!(data.last().unwrap().name, "09/02/2024");
    }

    #[test]
    fn test_idempotence() {
        let tickets = vec![
            ticket("Aberto", "Vendas"),
            ticket("Fechado", "Compras"),
            ticket("Aberto", "Vendas"),
        ];
        assert_eq!(get_status_chart_data(&tickets), get_status_chart_data(&tickets));
        assert_eq!(get_process_chart_data(&tickets), get_process_chart_data(&tickets));
        assert_eq!(get_company_data(&tickets), get_company_data(&tickets));
        assert_eq!(get_timeline_data(&tickets), get_timeline_data(&tickets));
    }
}
