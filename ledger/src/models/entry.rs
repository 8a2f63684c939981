use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One movement on an account, as read from a bank statement. Positive amounts are inflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub account: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

impl LedgerEntry {
    pub fn new(account: impl Into<String>, date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        LedgerEntry {
            id: Uuid::new_v4(),
            account: account.into(),
            date,
            description: description.into(),
            amount,
        }
    }

    // Two entries with the same date, description and amount are the same movement
    // imported twice.
    pub fn same_movement(&self, other: &LedgerEntry) -> bool {
        self.date == other.date && self.description == other.description && self.amount == other.amount
    }
}
