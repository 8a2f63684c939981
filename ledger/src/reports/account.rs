use crate::models::LedgerEntry;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub account: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub inflow: f64,
    pub outflow: f64,
    pub balance: f64,
    pub entries: Vec<LedgerEntry>,
}

impl AccountSummary {
    /// Inflow is the sum of positive amounts, outflow the sum of negative ones (as a positive number).
    pub fn from_entries(account: &str, from: Option<NaiveDate>, to: Option<NaiveDate>, entries: Vec<LedgerEntry>) -> Self {
        let inflow: f64 = entries.iter().map(|e| e.amount).filter(|a| *a > 0.0).sum();
        let outflow: f64 = entries.iter().map(|e| e.amount).filter(|a| *a < 0.0).map(f64::abs).sum();
        AccountSummary {
            account: account.to_string(),
            from,
            to,
            inflow,
            outflow,
            balance: inflow - outflow,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflow_outflow_balance() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entries = vec![
            LedgerEntry::new("Kasa", day, "Satış", 1500.0),
            LedgerEntry::new("Kasa", day, "Kira", -800.0),
            LedgerEntry::new("Kasa", day, "Bilgi", 0.0),
            LedgerEntry::new("Kasa", day, "Komisyon", -12.5),
        ];
        let summary = AccountSummary::from_entries("Kasa", None, None, entries);
        assert_eq!(summary.inflow, 1500.0);
        assert_eq!(summary.outflow, 812.5);
        assert_eq!(summary.balance, 687.5);
        assert_eq!(summary.entries.len(), 4);
    }

    #[test]
    fn test_empty_summary() {
        let summary = AccountSummary::from_entries("Kasa", None, None, Vec::new());
        assert_eq!(summary.balance, 0.0);
    }
}
