// Import settings, loaded from a JSON file or taken from defaults.
use crate::error::LedgerError;
use serde::Deserialize;
use shared::models::DEFAULT_TAX_RATE;
use shared::numeric::serde_amount;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ColumnSettings {
    pub date: String,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub debit: Option<String>,
    pub credit: Option<String>,
    pub account: Option<String>,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        // Header names used by Turkish bank statement exports
        ColumnSettings {
            date: "Tarih".to_string(),
            description: Some("Açıklama".to_string()),
            amount: Some("Tutar".to_string()),
            debit: None,
            credit: None,
            account: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ImportSettings {
    pub csv_delimiter: char,
    pub has_headers: bool,
    pub columns: ColumnSettings,
    pub date_formats: Vec<String>,
    pub default_account: String,
    #[serde(deserialize_with = "serde_amount::deserialize")]
    pub tax_rate: f64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        ImportSettings {
            csv_delimiter: ';',
            has_headers: true,
            columns: ColumnSettings::default(),
            date_formats: vec![
                "%d.%m.%Y".to_string(),
                "%d/%m/%Y".to_string(),
                "%Y-%m-%d".to_string(),
            ],
            default_account: "Ana Hesap".to_string(),
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl ImportSettings {
    /// Reads settings from a JSON file. Keys missing from the file keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings: ImportSettings = serde_json::from_str(&content)?;
        settings.validate()?;
        tracing::info!(path = %path.display(), "Loaded import settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if !self.csv_delimiter.is_ascii() {
            return Err(LedgerError::ConfigError(format!(
                "CSV delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }
        if self.date_formats.is_empty() {
            return Err(LedgerError::ConfigError("At least one date format is required".to_string()));
        }
        if self.columns.amount.is_none() && self.columns.debit.is_none() && self.columns.credit.is_none() {
            return Err(LedgerError::ConfigError(
                "Either an amount column or debit/credit columns must be configured".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(LedgerError::ConfigError(format!(
                "Tax rate must be between 0 and 1, got {}",
                self.tax_rate
            )));
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.csv_delimiter as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = ImportSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.delimiter_byte(), b';');
        assert_eq!(settings.tax_rate, 0.18);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(r#"{ "csv_delimiter": ",", "columns": { "date": "Date", "amount": "Amount" }, "tax_rate": "0,20" }"#);
        let settings = ImportSettings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.csv_delimiter, ',');
        assert_eq!(settings.columns.date, "Date");
        assert_eq!(settings.columns.amount.as_deref(), Some("Amount"));
        // Column keys not given fall back to the column defaults
        assert_eq!(settings.columns.description.as_deref(), Some("Açıklama"));
        assert_eq!(settings.date_formats.len(), 3);
        assert!((settings.tax_rate - 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_missing_amount_columns_rejected() {
        let file = write_config(r#"{ "columns": { "date": "Date", "amount": null } }"#);
        let err = ImportSettings::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, LedgerError::ConfigError(_)));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let settings = ImportSettings { csv_delimiter: '§', ..Default::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let file = write_config("{ not json");
        let err = ImportSettings::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, LedgerError::JsonError { .. }));
    }
}
