use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formatos de data-hora tolerados nas colunas `horaCriacao` /
/// `horaUltimaAtualizacao`. As origens misturam ISO (API de helpdesk) e
/// datas pt-BR (planilhas exportadas manualmente).
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parse permissivo de data-hora. Retorna None para strings vazias ou
/// irreconhecíveis — consumidores devem tolerar a falha sem abortar.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Diferença `atualização − criação` em milissegundos, somente quando as
/// duas datas são parseáveis. Pode ser negativa; cabe ao chamador filtrar.
pub fn resolution_millis(created: &str, updated: &str) -> Option<i64> {
    let start = parse_datetime(created)?;
    let end = parse_datetime(updated)?;
    Some((end - start).num_milliseconds())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_datetime("2024-03-10T08:30:00Z").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-03-10 08:30");
    }

    #[test]
    fn test_parse_iso_without_offset() {
        assert!(parse_datetime("2024-03-10T08:30:00").is_some());
        assert!(parse_datetime("2024-03-10 08:30:00").is_some());
    }

    #[test]
    fn test_parse_brazilian_formats() {
        let dt = parse_datetime("10/03/2024 08:30").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-03-10");
        assert!(parse_datetime("10/03/2024").is_some());
    }

    #[test]
    fn test_parse_date_only_midnight() {
        let dt = parse_datetime("2024-03-10").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("   ").is_none());
        assert!(parse_datetime("não é uma data").is_none());
        assert!(parse_datetime("32/13/2024").is_none());
    }

    #[test]
    fn test_resolution_millis() {
        let ms = resolution_millis("2024-01-01T10:00:00Z", "2024-01-01T12:00:00Z").unwrap();
        assert_eq!(ms, 2 * 3_600_000);
    }

    #[test]
    fn test_resolution_millis_negative_preserved() {
        let ms = resolution_millis("2024-01-01T12:00:00Z", "2024-01-01T10:00:00Z").unwrap();
        assert_eq!(ms, -2 * 3_600_000);
    }

    #[test]
    fn test_resolution_millis_unparseable() {
        assert!(resolution_millis("sem data", "2024-01-01T10:00:00Z").is_none());
        assert!(resolution_millis("2024-01-01T10:00:00Z", "").is_none());
    }
}
