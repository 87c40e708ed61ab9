pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod parser;
pub mod state;

pub use analyzer::{generate_insights, process_ticket_data, TicketStats};
pub use config::AppConfig;
pub use error::AppError;
pub use export::generate_filtered_report;
pub use filter::{filter_tickets, FilterCriteria};
pub use parser::{parse_import, validate_tickets, ParseOutput, Ticket};
pub use state::SessionStore;

#[cfg(test)]
mod e2e_tests {
    use crate::analyzer::{
        generate_insights, get_status_chart_data, get_timeline_data, process_ticket_data,
    };
    use crate::config::AppConfig;
    use crate::export::generate_filtered_report;
    use crate::filter::FilterCriteria;
    use crate::parser::{parse_import, validate_tickets};
    use crate::state::SessionStore;

    const FIXTURE_CSV: &str = "\
ID do ticket,Assunto,Status,Prioridade,Processo,Nome do solicitante,Hora da criação,Hora da última atualização
T-1,Erro no faturamento,Aberto,Alta,Vendas,Ana,2024-03-01T08:00:00Z,2024-03-01T10:00:00Z
T-2,NFe rejeitada,Fechado,Urgente,Vendas,Bruno,2024-03-01T09:00:00Z,2024-03-01T15:00:00Z
T-3,Dúvida de relatório,Fechado,Baixa,Compras,Ana,2024-03-02T09:00:00Z,2024-03-02T11:00:00Z
";

    /// E2E: CSV → parse → validate → store → filter → stats/charts/insights → export
    #[test]
    fn test_e2e_csv_to_report_pipeline() {
        let output = parse_import("chamados.csv", FIXTURE_CSV.as_bytes()).unwrap();
        assert_eq!(output.tickets.len(), 3);
        assert!(output.warnings.is_empty());

        let report = validate_tickets(&output.tickets);
        assert!(report.valid, "{:?}", report.errors);

        let store = SessionStore::new();
        store.replace(output.tickets).unwrap();

        store
            .set_filters(FilterCriteria {
                processo: Some("Vendas".into()),
                ..FilterCriteria::default()
            })
            .unwrap();
        let filtrados = store.filtered_tickets().unwrap();
        assert_eq!(filtrados.len(), 2);

        let todos = store.tickets().unwrap();
        let stats = process_ticket_data(&todos);
        assert_eq!(stats.total_tickets, 3);
        assert_eq!(stats.tickets_abertos, 1);
        assert_eq!(stats.tickets_fechados, 2);
        // (6h + 2h) / 2 = 4h
        assert_eq!(stats.tempo_medio_resolucao, 4);

        let insights = generate_insights(&todos, &stats, &AppConfig::default(), true);
        assert!(insights
            .iter()
            .any(|i| i.contains("1 tickets de prioridade alta")));
        assert!(insights
            .iter()
            .any(|i| i.contains("dentro do padrão ideal")));

        let timeline = get_timeline_data(&todos);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].name, "01/03/2024");
        assert_eq!(timeline[0].value, 2);

        let bytes = generate_filtered_report(&filtrados).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    /// Linha sem status entra com campo vazio e vira "Não definido" nos
    /// gráficos; o lote segue aceito porque a amostra de validação olha o
    /// primeiro ticket.
    #[test]
    fn test_e2e_missing_status_degrades_not_rejects() {
        let csv = "\
ID do ticket,Assunto,Status
T-1,Primeiro,Aberto
T-2,Sem status,
T-3,Terceiro,Fechado
";
        let output = parse_import("lote.csv", csv.as_bytes()).unwrap();
        assert_eq!(output.tickets.len(), 3);
        assert_eq!(output.tickets[1].status, "");

        let report = validate_tickets(&output.tickets);
        assert!(report.valid);

        let status = get_status_chart_data(&output.tickets);
        let nao_definido = status.iter().find(|c| c.name == "Não definido").unwrap();
        assert_eq!(nao_definido.value, 1);
    }

    /// Dois carregamentos concorrentes: só o mais recente vence.
    #[test]
    fn test_e2e_stale_load_discarded() {
        let store = SessionStore::new();

        let lento = store.begin_load().unwrap();
        let rapido = store.begin_load().unwrap();

        let output = parse_import("chamados.csv", FIXTURE_CSV.as_bytes()).unwrap();
        assert!(store.commit(rapido, output.tickets).unwrap());
        assert!(!store.commit(lento, Vec::new()).unwrap());

        assert_eq!(store.tickets().unwrap().len(), 3);
    }
}
