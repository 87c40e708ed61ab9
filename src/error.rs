use thiserror::Error;

/// Extensões aceitas pelo pipeline de importação — mantidas aqui para que a
/// mensagem de erro e o dispatcher fiquem sempre em sincronia.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["json", "csv", "xlsx", "xls"];

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de entrada/saída: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Erro de planilha: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Erro ao gerar XLSX: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Erro de serialização: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Erro HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Formato de arquivo não suportado: .{0}. Use .json, .csv, .xlsx ou .xls")]
    UnsupportedFormat(String),

    #[error("Formato JSON inválido. Esperado um array de tickets.")]
    MalformedJson,

    #[error("Arquivo vazio ou sem dados")]
    EmptyFile,

    #[error("Tickets inválidos: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    Custom(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
