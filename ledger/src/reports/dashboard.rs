use crate::data::backup::Backup;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared::models::{InvoiceStatus, SaleStatus};

/// Headline figures of the bookkeeping dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub sales_total: f64,
    pub expense_total: f64,
    pub invoice_total: f64,
    /// Invoices still waiting for payment (sent or overdue).
    pub pending_invoices: f64,
    pub receivables: f64,
    pub payables: f64,
    pub cash: f64,
    pub net: f64,
    pub customer_count: usize,
    /// Change of this month's sales against last month's, in percent.
    pub sales_change_percent: f64,
    pub expense_change_percent: f64,
    pub record_count: usize,
}

// (year, month) of the month before `date`.
fn previous_month(date: NaiveDate) -> (i32, u32) {
    match date.month() {
        1 => (date.year() - 1, 12),
        m => (date.year(), m - 1),
    }
}

fn in_month(date: Option<NaiveDate>, (year, month): (i32, u32)) -> bool {
    date.map_or(false, |d| d.year() == year && d.month() == month)
}

// Zero when there is nothing to compare against.
fn change_percent(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

fn month_over_month<I>(dated_amounts: I, reference_date: NaiveDate) -> f64
where
    I: Iterator<Item = (Option<NaiveDate>, f64)> + Clone,
{
    let this_month = (reference_date.year(), reference_date.month());
    let last_month = previous_month(reference_date);
    let sum_in = |month: (i32, u32)| {
        dated_amounts
            .clone()
            .filter(|(date, _)| in_month(*date, month))
            .map(|(_, amount)| amount)
            .sum::<f64>()
    };
    change_percent(sum_in(this_month), sum_in(last_month))
}

impl DashboardSummary {
    /// Cancelled sales and invoices are left out of the totals; inactive bank accounts are
    /// left out of cash. Monthly changes compare the month of `reference_date` with the one before.
    pub fn from_backup(backup: &Backup, tax_rate: f64, reference_date: NaiveDate) -> Self {
        let sales = backup.sales.iter().filter(|s| s.status != SaleStatus::Cancelled);
        let sales_total: f64 = sales.clone().map(|s| s.effective_amount()).sum();
        let expense_total: f64 = backup.expenses.iter().map(|e| e.amount).sum();
        let invoices = backup
            .invoices
            .iter()
            .filter(|i| i.status != InvoiceStatus::Cancelled);
        let invoice_total: f64 = invoices.clone().map(|i| i.effective_total(tax_rate)).sum();
        let pending_invoices: f64 = invoices
            .filter(|i| matches!(i.status, InvoiceStatus::Sent | InvoiceStatus::Overdue))
            .map(|i| i.effective_total(tax_rate))
            .sum();
        let receivables: f64 = backup.customers.iter().map(|c| c.balance).sum();
        let payables: f64 = backup.suppliers.iter().map(|s| s.balance).sum();
        let cash: f64 = backup
            .bank_accounts
            .iter()
            .filter(|b| b.is_active)
            .map(|b| b.balance)
            .sum();

        let sales_change_percent =
            month_over_month(sales.map(|s| (s.effective_date(), s.effective_amount())), reference_date);
        let expense_change_percent = month_over_month(
            backup.expenses.iter().map(|e| (e.expense_date, e.amount)),
            reference_date,
        );

        DashboardSummary {
            sales_total,
            expense_total,
            invoice_total,
            pending_invoices,
            receivables,
            payables,
            cash,
            net: sales_total - expense_total,
            customer_count: backup.customers.len(),
            sales_change_percent,
            expense_change_percent,
            record_count: backup.record_count(),
        }
    }
}
