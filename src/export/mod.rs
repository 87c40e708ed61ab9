use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, FormatBorder, Workbook, XlsxError};

use crate::error::AppError;
use crate::parser::deserializers::parse_datetime;
use crate::parser::types::Ticket;

/// Colunas do relatório de tickets filtrados, na ordem de escrita.
pub const EXPORT_COLUMNS: &[&str] = &[
    "ID",
    "Assunto",
    "Status",
    "Prioridade",
    "Processo",
    "Solicitante",
    "Email",
    "Data Criação",
    "Tempo Resolução",
];

/// Cabeçalho azul #2C5F8A, texto branco, negrito, borda fina
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

/// Rótulo de tempo de resolução: horas inteiras entre criação e última
/// atualização. "-" quando alguma das datas não é parseável, "<1h" quando a
/// diferença não chega a uma hora.
pub fn resolution_time_label(ticket: &Ticket) -> String {
    let (start, end) = match (
        parse_datetime(&ticket.hora_criacao),
        parse_datetime(&ticket.hora_ultima_atualizacao),
    ) {
        (Some(s), Some(e)) => (s, e),
        _ => return "-".to_string(),
    };
    let horas = (end - start).num_hours();
    if horas > 0 {
        format!("{horas}h")
    } else {
        "<1h".to_string()
    }
}

fn format_creation_date(raw: &str) -> String {
    parse_datetime(raw)
        .map(|dt: NaiveDateTime| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Gera o relatório XLSX da coleção filtrada, uma linha por ticket, na ordem
/// recebida. Retorna os bytes via `save_to_buffer`.
pub fn generate_filtered_report(tickets: &[Ticket]) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    write_tickets_sheet(&mut wb, tickets)?;
    Ok(wb.save_to_buffer()?)
}

fn write_tickets_sheet(wb: &mut Workbook, tickets: &[Ticket]) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Tickets Filtrados")?;

    let hdr = create_header_format();
    for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
        ws.write_with_format(0, col as u16, *title, &hdr)?;
    }

    for (i, ticket) in tickets.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, ticket.id.as_str())?;
        ws.write(row, 1, ticket.assunto.as_str())?;
        ws.write(row, 2, ticket.status.as_str())?;
        ws.write(row, 3, ticket.prioridade.as_str())?;
        ws.write(row, 4, ticket.processo.as_str())?;
        ws.write(row, 5, ticket.nome_solicitante.as_str())?;
        ws.write(row, 6, ticket.email_solicitante.as_str())?;
        ws.write(row, 7, format_creation_date(&ticket.hora_criacao))?;
        ws.write(row, 8, resolution_time_label(ticket))?;
    }

    ws.set_column_width(0, 12)?;
    ws.set_column_width(1, 40)?;
    ws.set_column_width(2, 12)?;
    ws.set_column_width(3, 12)?;
    ws.set_column_width(4, 18)?;
    ws.set_column_width(5, 22)?;
    ws.set_column_width(6, 28)?;
    ws.set_column_width(7, 18)?;
    ws.set_column_width(8, 14)?;

    Ok(())
}
