// ImportService owns the shared ledger store and dispatches each operation to its handler module.
use crate::config::settings::ImportSettings;
use crate::data::ledger_store::LedgerStore;
use crate::error::LedgerError;
use crate::reports::{AccountSummary, DashboardSummary};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod account_summary;
pub mod load_backup;
pub mod load_statement;

#[derive(Debug, Clone, Serialize)]
pub struct LoadStatementResponse {
    pub success: bool,
    pub message: String,
    pub entries_loaded: usize,
    pub accounts: Vec<String>,
}

pub struct ImportService {
    ledger_store: Arc<RwLock<LedgerStore>>,
    settings: Arc<ImportSettings>,
}

impl ImportService {
    pub fn new(ledger_store: Arc<RwLock<LedgerStore>>, settings: ImportSettings) -> Self {
        ImportService {
            ledger_store,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Imports a bank statement; rows without an account column value go to `account`
    /// (or the configured default account).
    pub async fn load_csv_statement(
        &self,
        file_path: PathBuf,
        account: Option<String>,
    ) -> Result<LoadStatementResponse, LedgerError> {
        let account = account.unwrap_or_else(|| self.settings.default_account.clone());
        tracing::info!(
            path = %file_path.display(),
            account = %account,
            "Received statement import, dispatching to handler."
        );
        load_statement::handle_load_statement(file_path, account, self.settings.clone(), self.ledger_store.clone()).await
    }

    pub async fn account_summary(
        &self,
        account: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AccountSummary, LedgerError> {
        tracing::info!(account = %account, from = ?from, to = ?to, "Received account summary request, dispatching to handler.");
        account_summary::handle_account_summary(account, from, to, self.ledger_store.clone()).await
    }

    /// Reads a backup and summarizes it; monthly changes are relative to `reference_date`.
    pub async fn load_backup(
        &self,
        file_path: PathBuf,
        reference_date: NaiveDate,
    ) -> Result<DashboardSummary, LedgerError> {
        tracing::info!(path = %file_path.display(), %reference_date, "Received backup import, dispatching to handler.");
        load_backup::handle_load_backup(file_path, self.settings.tax_rate, reference_date).await
    }
}
