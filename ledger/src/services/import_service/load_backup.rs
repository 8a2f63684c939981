// Handler for backup imports.
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::data::backup::load_backup_from_file;
use crate::error::LedgerError;
use crate::reports::DashboardSummary;

pub async fn handle_load_backup(
    file_path: PathBuf,
    tax_rate: f64,
    reference_date: NaiveDate,
) -> Result<DashboardSummary, LedgerError> {
    let backup = tokio::task::spawn_blocking(move || load_backup_from_file(&file_path))
        .await
        .map_err(|e| LedgerError::ProcessingError(format!("Backup loading task failed: {}", e)))??;

    let summary = DashboardSummary::from_backup(&backup, tax_rate, reference_date);
    tracing::info!(records = summary.record_count, net = summary.net, "Computed dashboard summary");
    Ok(summary)
}
