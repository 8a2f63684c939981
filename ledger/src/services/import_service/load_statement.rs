// Handler for statement imports: parse on the blocking pool, then store.
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::settings::ImportSettings;
use crate::data::csv_parser::StatementCsvParser;
use crate::data::ledger_store::LedgerStore;
use crate::error::LedgerError;
use super::LoadStatementResponse;

pub async fn handle_load_statement(
    file_path: PathBuf,
    account: String,
    settings: Arc<ImportSettings>,
    ledger_store: Arc<RwLock<LedgerStore>>,
) -> Result<LoadStatementResponse, LedgerError> {
    let default_account = account.clone();
    let entries = tokio::task::spawn_blocking(move || {
        StatementCsvParser::load_entries_from_csv(&file_path, &settings, &default_account)
    })
    .await
    .map_err(|e| LedgerError::ProcessingError(format!("Statement parsing task failed: {}", e)))??;

    let mut accounts: Vec<String> = entries.iter().map(|e| e.account.clone()).collect();
    accounts.sort();
    accounts.dedup();

    let mut store = ledger_store.write().await;
    let entries_loaded = store.add_entries(entries)?;
    tracing::info!(account = %account, count = entries_loaded, "Stored statement entries");

    Ok(LoadStatementResponse {
        success: true,
        message: format!("Loaded {} entries into {}", entries_loaded, accounts.join(", ")),
        entries_loaded,
        accounts,
    })
}
