// Holds imported ledger entries per account.
use crate::error::LedgerError;
use crate::models::LedgerEntry;
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(PartialEq, Eq, Hash)]
struct MovementKey {
    account: String,
    date: NaiveDate,
    description: String,
    amount_bits: u64,
}

impl MovementKey {
    fn of(entry: &LedgerEntry) -> Self {
        MovementKey {
            account: entry.account.clone(),
            date: entry.date,
            description: entry.description.clone(),
            // -0.0 and 0.0 share a key.
            amount_bits: (entry.amount + 0.0).to_bits(),
        }
    }
}

pub struct LedgerStore {
    data: HashMap<String, Vec<LedgerEntry>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        LedgerStore { data: HashMap::new() }
    }

    /// Adds entries to their accounts, keeping each account sorted by date.
    /// Incoming movements are matched against what the account held before this call: if it
    /// already has `m` entries with the same date, description and amount, the first `m`
    /// incoming copies are skipped and the rest are stored. A statement with two identical
    /// rows keeps both, and importing it again adds nothing.
    /// Returns how many entries were actually stored.
    pub fn add_entries(&mut self, new_entries: Vec<LedgerEntry>) -> Result<usize, LedgerError> {
        if let Some(entry) = new_entries.iter().find(|e| e.account.trim().is_empty()) {
            return Err(LedgerError::LedgerStoreError(format!(
                "Entry dated {} has no account",
                entry.date
            )));
        }

        // Copies of each movement already stored and not yet matched by an incoming entry.
        let mut unmatched: HashMap<MovementKey, usize> = HashMap::new();
        let mut stored = 0;
        for entry in new_entries {
            let account_entries = self.data.entry(entry.account.clone()).or_default();
            // Counted on first sight, before any copy from this batch is pushed.
            let remaining = unmatched
                .entry(MovementKey::of(&entry))
                .or_insert_with(|| account_entries.iter().filter(|e| e.same_movement(&entry)).count());
            if *remaining > 0 {
                *remaining -= 1;
                tracing::debug!(account = %entry.account, date = %entry.date, amount = entry.amount, "Skipping duplicate entry");
                continue;
            }
            account_entries.push(entry);
            stored += 1;
        }

        for account_entries in self.data.values_mut() {
            account_entries.sort_by_key(|e| e.date);
        }
        Ok(stored)
    }

    /// Entries of `account` within the inclusive date range, or `None` for an unknown account.
    pub fn get_entries(&self, account: &str, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<Vec<LedgerEntry>> {
        self.data.get(account).map(|entries| {
            entries
                .iter()
                .filter(|e| from.map_or(true, |start| e.date >= start))
                .filter(|e| to.map_or(true, |end| e.date <= end))
                .cloned()
                .collect()
        })
    }

    pub fn balance(&self, account: &str) -> Option<f64> {
        self.data.get(account).map(|entries| entries.iter().map(|e| e.amount).sum())
    }

    pub fn accounts(&self) -> Vec<&str> {
        let mut accounts: Vec<&str> = self.data.keys().map(String::as_str).collect();
        accounts.sort_unstable();
        accounts
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}
