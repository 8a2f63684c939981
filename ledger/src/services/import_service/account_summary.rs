// Handler for account summaries over a date range.
use std::sync::Arc;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::data::ledger_store::LedgerStore;
use crate::error::LedgerError;
use crate::reports::AccountSummary;

pub async fn handle_account_summary(
    account: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    ledger_store: Arc<RwLock<LedgerStore>>,
) -> Result<AccountSummary, LedgerError> {
    if let (Some(start), Some(end)) = (from, to) {
        if start > end {
            return Err(LedgerError::ProcessingError(format!(
                "Invalid date range: {} is after {}",
                start, end
            )));
        }
    }

    let store = ledger_store.read().await;
    let entries = store
        .get_entries(account, from, to)
        .ok_or_else(|| LedgerError::LedgerStoreError(format!("Account '{}' not found", account)))?;
    drop(store);

    Ok(AccountSummary::from_entries(account, from, to, entries))
}
