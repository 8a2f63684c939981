// Reader for the JSON backup exported by the bookkeeping app:
// { invoices, expenses, sales, customers, suppliers, bankAccounts, accounts, company, exportDate }
use crate::error::LedgerError;
use serde::Deserialize;
use serde_json::Value;
use shared::models::{null_as_default, BankAccount, CompanyProfile, Customer, Expense, Invoice, Sale, Supplier};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Backup {
    #[serde(deserialize_with = "null_as_default")]
    pub invoices: Vec<Invoice>,
    #[serde(deserialize_with = "null_as_default")]
    pub expenses: Vec<Expense>,
    #[serde(deserialize_with = "null_as_default")]
    pub sales: Vec<Sale>,
    #[serde(deserialize_with = "null_as_default")]
    pub customers: Vec<Customer>,
    #[serde(deserialize_with = "null_as_default")]
    pub suppliers: Vec<Supplier>,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_accounts: Vec<BankAccount>,
    /// Chart of accounts. Its rows have no fixed shape, so they are kept as raw JSON.
    #[serde(deserialize_with = "null_as_default")]
    pub accounts: Vec<Value>,
    pub company: Option<CompanyProfile>,
    pub export_date: Option<String>,
}

impl Backup {
    pub fn record_count(&self) -> usize {
        self.invoices.len()
            + self.expenses.len()
            + self.sales.len()
            + self.customers.len()
            + self.suppliers.len()
            + self.bank_accounts.len()
            + self.accounts.len()
    }
}

pub fn parse_backup(content: &str) -> Result<Backup, LedgerError> {
    let value: Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(LedgerError::BackupFormatError(
            "Expected a JSON object at the top level".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

pub fn load_backup_from_file(path: impl AsRef<Path>) -> Result<Backup, LedgerError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let backup = parse_backup(&content)?;
    tracing::info!(
        path = %path.display(),
        records = backup.record_count(),
        export_date = ?backup.export_date,
        "Loaded backup"
    );
    Ok(backup)
}
