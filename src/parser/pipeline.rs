use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use calamine::Reader;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AppError, ACCEPTED_EXTENSIONS};
use crate::parser::columns::ColumnMap;
use crate::parser::normalizer::{ticket_from_api_object, ticket_from_row};
use crate::parser::types::{ParseOutput, ParseWarning, SourceFormat, Ticket};

/// Dispatcher de ingestão: seleciona a estratégia de extração pela extensão
/// do arquivo e normaliza cada registro na ordem do documento.
///
/// Erros de formato (extensão não suportada, JSON com forma inválida) são
/// fatais para a importação; defeitos de campo individuais nunca são.
pub fn parse_import(filename: &str, bytes: &[u8]) -> Result<ParseOutput, AppError> {
    let start = Instant::now();
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut warnings = Vec::new();
    let (mut tickets, format) = match extension.as_str() {
        "json" => (parse_json(bytes)?, SourceFormat::Json),
        "csv" => (parse_csv(bytes, &mut warnings)?, SourceFormat::Csv),
        "xlsx" | "xls" => (parse_workbook(bytes)?, SourceFormat::Workbook),
        _ => return Err(AppError::UnsupportedFormat(extension)),
    };

    let synthesized_ids = ensure_ticket_ids(&mut tickets);
    let output = ParseOutput {
        total_records: tickets.len(),
        synthesized_ids,
        format,
        parse_duration_ms: start.elapsed().as_millis() as u64,
        warnings,
        tickets,
    };
    debug!(
        filename,
        total = output.total_records,
        synthesized = output.synthesized_ids,
        duration_ms = output.parse_duration_ms,
        "importação concluída"
    );
    Ok(output)
}

/// Variante de conveniência: lê o arquivo do disco e delega para
/// [`parse_import`] usando o nome do arquivo para o dispatch.
pub fn parse_import_path(path: &Path) -> Result<ParseOutput, AppError> {
    let bytes = std::fs::read(path)?;
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    parse_import(filename, &bytes)
}

/// Sintetiza `TICKET-<n>` (posição 1-based) para todo ticket sem id.
/// Garante o invariante de unicidade por síntese, nunca por rejeição.
pub fn ensure_ticket_ids(tickets: &mut [Ticket]) -> usize {
    let mut synthesized = 0;
    for (i, ticket) in tickets.iter_mut().enumerate() {
        if ticket.id.is_empty() {
            ticket.id = format!("TICKET-{}", i + 1);
            synthesized += 1;
        }
    }
    synthesized
}

/// `.json`: array de objetos da API, ou objeto com a propriedade `tickets`.
/// Qualquer outra forma de topo é rejeitada.
fn parse_json(bytes: &[u8]) -> Result<Vec<Ticket>, AppError> {
    let data: Value = serde_json::from_slice(bytes)?;
    let records = match &data {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("tickets") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => return Err(AppError::MalformedJson),
        },
        _ => return Err(AppError::MalformedJson),
    };
    Ok(records.iter().map(ticket_from_api_object).collect())
}

/// `.csv`: texto delimitado por vírgula com linha de cabeçalho. Linhas que o
/// leitor não consegue decodificar viram aviso e são puladas.
fn parse_csv(bytes: &[u8], warnings: &mut Vec<ParseWarning>) -> Result<Vec<Ticket>, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let columns = ColumnMap::from_headers(headers.iter());

    let mut tickets = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        match result {
            Ok(record) => {
                let cells: Vec<String> = record.iter().map(str::to_string).collect();
                tickets.push(ticket_from_row(&columns, &cells));
            }
            Err(err) => {
                warn!(line = i + 2, %err, "linha CSV ilegível ignorada");
                warnings.push(ParseWarning {
                    line: i + 2, // +1 do cabeçalho, +1 para 1-based
                    message: err.to_string(),
                });
            }
        }
    }
    Ok(tickets)
}

/// `.xlsx` / `.xls`: somente a primeira aba; célula vazia vira string vazia;
/// linhas totalmente em branco são descartadas.
fn parse_workbook(bytes: &[u8]) -> Result<Vec<Ticket>, AppError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(AppError::EmptyFile)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header_row = match rows.next() {
        Some(row) => row,
        None => return Ok(Vec::new()),
    };
    let columns = ColumnMap::from_headers(header_row.iter().map(|cell| cell.to_string()));

    let mut tickets = Vec::new();
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        tickets.push(ticket_from_row(&columns, &cells));
    }
    Ok(tickets)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
