use crate::config::settings::ImportSettings;
use crate::models::LedgerEntry;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::numeric::parse_currency_to_number;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Where the amount of a row comes from, resolved once from the header row.
#[derive(Clone, Copy)]
enum AmountColumns {
    Single(usize),
    DebitCredit {
        debit: Option<usize>,
        credit: Option<usize>,
    },
}

pub struct StatementCsvParser;

impl StatementCsvParser {
    // Example header: Tarih;Açıklama;Tutar
    // Example row:    15.01.2024;Kira ödemesi;-8.000,00
    pub fn load_entries_from_csv(
        file_path: impl AsRef<Path>,
        settings: &ImportSettings,
        default_account: &str,
    ) -> Result<Vec<LedgerEntry>> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path)
            .map_err(|e| anyhow!("Failed to open CSV file '{}': {}", file_path.display(), e))?;
        let entries = Self::load_entries_from_reader(BufReader::new(file), settings, default_account)?;
        tracing::info!(path = %file_path.display(), count = entries.len(), "Parsed statement CSV");
        Ok(entries)
    }

    pub fn load_entries_from_reader<R: Read>(
        reader: R,
        settings: &ImportSettings,
        default_account: &str,
    ) -> Result<Vec<LedgerEntry>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(settings.delimiter_byte())
            .has_headers(settings.has_headers)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = if settings.has_headers {
            rdr.headers()?.clone()
        } else {
            StringRecord::new()
        };
        let columns = &settings.columns;

        let date_idx = Self::column_index(&headers, &columns.date)
            .ok_or_else(|| anyhow!("Missing '{}' column in CSV header", columns.date))?;
        let description_idx = columns.description.as_deref().and_then(|name| Self::column_index(&headers, name));
        let account_idx = columns.account.as_deref().and_then(|name| Self::column_index(&headers, name));
        let amount_columns = Self::resolve_amount_columns(&headers, settings)?;

        // Data starts on line 2 when the first line is a header.
        let first_line = if settings.has_headers { 2 } else { 1 };
        let mut entries = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + first_line;
            let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

            let date_str = record.get(date_idx).unwrap_or("");
            if date_str.is_empty() {
                // Totals and footer rows carry no date
                tracing::warn!(line, "Skipping statement row without a date");
                continue;
            }
            let date = Self::parse_date(date_str, &settings.date_formats)
                .map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", columns.date, line, e))?;

            let amount = match amount_columns {
                AmountColumns::Single(i) => parse_currency_to_number(record.get(i)),
                AmountColumns::DebitCredit { debit, credit } => {
                    let debit = parse_currency_to_number(debit.and_then(|i| record.get(i)));
                    let credit = parse_currency_to_number(credit.and_then(|i| record.get(i)));
                    credit - debit.abs()
                }
            };

            let description = description_idx.and_then(|i| record.get(i)).unwrap_or("");
            let account = account_idx
                .and_then(|i| record.get(i))
                .filter(|a| !a.is_empty())
                .unwrap_or(default_account);

            tracing::debug!(line, %date, amount, account, "Parsed statement row");
            entries.push(LedgerEntry::new(account, date, description, amount));
        }
        Ok(entries)
    }

    fn resolve_amount_columns(headers: &StringRecord, settings: &ImportSettings) -> Result<AmountColumns> {
        let columns = &settings.columns;
        if let Some(i) = columns.amount.as_deref().and_then(|name| Self::column_index(headers, name)) {
            return Ok(AmountColumns::Single(i));
        }

        let debit = columns.debit.as_deref().and_then(|name| Self::column_index(headers, name));
        let credit = columns.credit.as_deref().and_then(|name| Self::column_index(headers, name));
        if debit.is_none() && credit.is_none() {
            let wanted: Vec<&str> = [&columns.amount, &columns.debit, &columns.credit]
                .into_iter()
                .filter_map(|c| c.as_deref())
                .collect();
            return Err(anyhow!("Missing amount column in CSV header (looked for {:?})", wanted));
        }
        Ok(AmountColumns::DebitCredit { debit, credit })
    }

    fn parse_date(s: &str, formats: &[String]) -> Result<NaiveDate> {
        formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .ok_or_else(|| anyhow!("Failed to parse date '{}' with formats {:?}", s, formats))
    }

    // Headerless files address columns by zero-based index ("0", "1", ...).
    fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
        if headers.is_empty() {
            return name.parse::<usize>().ok();
        }
        headers.iter().position(|header| header == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::ColumnSettings;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_entries_turkish_statement() {
        let csv_content = "\
Tarih;Açıklama;Tutar
15.01.2024;Kira ödemesi;-8.000,00
16.01.2024;Fatura tahsilatı INV-2024-001;₺12.345,67
17.01.2024;Faiz;0,123
18.01.2024;Komisyon;-1.234";
        let tmp_file = create_test_csv(csv_content);
        let entries =
            StatementCsvParser::load_entries_from_csv(tmp_file.path(), &ImportSettings::default(), "Ziraat").unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].date, date(2024, 1, 15));
        assert_eq!(entries[0].amount, -8000.0);
        assert_eq!(entries[0].account, "Ziraat");
        assert_eq!(entries[1].description, "Fatura tahsilatı INV-2024-001");
        assert!((entries[1].amount - 12345.67).abs() < 1e-9);
        assert!((entries[2].amount - 0.123).abs() < 1e-12);
        assert_eq!(entries[3].amount, -1234.0);
    }

    #[test]
    fn test_load_entries_us_statement_with_debit_credit() {
        let settings = ImportSettings {
            csv_delimiter: ',',
            columns: ColumnSettings {
                date: "Date".to_string(),
                description: Some("Memo".to_string()),
                amount: None,
                debit: Some("Debit".to_string()),
                credit: Some("Credit".to_string()),
                account: Some("Account".to_string()),
            },
            ..Default::default()
        };
        let csv_content = "\
Date,Memo,Debit,Credit,Account
2024-02-01,Office rent,\"1,250.00\",,Checking
2024-02-02,Client payment,,\"12,345\",
2024-02-03,Card fee,-4.5,,Savings";
        let tmp_file = create_test_csv(csv_content);
        let entries = StatementCsvParser::load_entries_from_csv(tmp_file.path(), &settings, "Default").unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].amount, -1250.0);
        assert_eq!(entries[0].account, "Checking");
        assert_eq!(entries[1].amount, 12345.0);
        assert_eq!(entries[1].account, "Default");
        assert_eq!(entries[2].amount, -4.5);
        assert_eq!(entries[2].date, date(2024, 2, 3));
    }

    #[test]
    fn test_rows_without_date_are_skipped() {
        let csv_content = "\
Tarih;Açıklama;Tutar
15.01.2024;Kira;-8.000,00
;Toplam;-8.000,00";
        let tmp_file = create_test_csv(csv_content);
        let entries =
            StatementCsvParser::load_entries_from_csv(tmp_file.path(), &ImportSettings::default(), "Ana").unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_empty_amount_cell_is_zero() {
        let csv_content = "\
Tarih;Açıklama;Tutar
15.01.2024;Bilgi satırı;";
        let tmp_file = create_test_csv(csv_content);
        let entries =
            StatementCsvParser::load_entries_from_csv(tmp_file.path(), &ImportSettings::default(), "Ana").unwrap();
        assert_eq!(entries[0].amount, 0.0);
    }

    #[test]
    fn test_headerless_file_uses_column_indexes() {
        let settings = ImportSettings {
            has_headers: false,
            columns: ColumnSettings {
                date: "0".to_string(),
                description: None,
                amount: Some("1".to_string()),
                debit: None,
                credit: None,
                account: None,
            },
            ..Default::default()
        };
        let entries = StatementCsvParser::load_entries_from_reader(
            "01/03/2024;1.234,56\n02/03/2024;-99,9".as_bytes(),
            &settings,
            "Kasa",
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert!((entries[0].amount - 1234.56).abs() < 1e-9);
        assert!((entries[1].amount + 99.9).abs() < 1e-9);
        assert_eq!(entries[1].description, "");
    }

    #[test]
    fn test_invalid_date_reports_line() {
        let csv_content = "\
Tarih;Açıklama;Tutar
15.01.2024;Kira;-8.000,00
32.13.2024;Bozuk;1,00";
        let tmp_file = create_test_csv(csv_content);
        let result = StatementCsvParser::load_entries_from_csv(tmp_file.path(), &ImportSettings::default(), "Ana");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Error parsing 'Tarih' at line 3"), "{}", message);
    }

    #[test]
    fn test_missing_amount_column() {
        let csv_content = "\
Tarih;Açıklama
15.01.2024;Kira";
        let tmp_file = create_test_csv(csv_content);
        let result = StatementCsvParser::load_entries_from_csv(tmp_file.path(), &ImportSettings::default(), "Ana");
        assert!(result.unwrap_err().to_string().contains("Missing amount column"));
    }

    #[test]
    fn test_missing_date_column() {
        let tmp_file = create_test_csv("Date;Tutar\n2024-01-01;5");
        let result = StatementCsvParser::load_entries_from_csv(tmp_file.path(), &ImportSettings::default(), "Ana");
        assert!(result.unwrap_err().to_string().contains("Missing 'Tarih' column"));
    }

    #[test]
    fn test_missing_file() {
        let result = StatementCsvParser::load_entries_from_csv(
            "/nonexistent/statement.csv",
            &ImportSettings::default(),
            "Ana",
        );
        assert!(result.unwrap_err().to_string().contains("Failed to open CSV file"));
    }
}
