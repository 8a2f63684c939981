use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Backup format error: {0}")]
    BackupFormatError(String),

    #[error("Ledger store error: {0}")]
    LedgerStoreError(String),

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    // Parsers report through anyhow with line context; this keeps that context intact.
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl LedgerError {
    /// Exit code for the CLI: 2 for bad input data or configuration, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            LedgerError::ConfigError(_)
            | LedgerError::CsvDataFormatError(_)
            | LedgerError::BackupFormatError(_)
            | LedgerError::JsonError { .. }
            | LedgerError::CsvSystemError { .. } => 2,
            LedgerError::IoError { .. }
            | LedgerError::LedgerStoreError(_)
            | LedgerError::ProcessingError(_)
            | LedgerError::AnyhowError(_) => 1,
        }
    }
}
