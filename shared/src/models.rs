use crate::numeric::serde_amount;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Record ids arrive as numbers (`1`) or strings (`"1"`) depending on where the record was made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

// Dates are `YYYY-MM-DD`, optionally followed by an ISO time; anything else is treated as missing.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| s.get(..10))
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()))
}

/// Reads an explicit `null` as the field's default, the same as a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_currency))
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub created_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "serde_amount::deserialize")]
    pub balance: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub created_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "serde_amount::deserialize")]
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "serde_amount::deserialize")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "serde_amount::deserialize")]
    pub unit_price: f64,
    /// Stored line total as found in the record; see [`InvoiceItem::line_total`].
    #[serde(default, deserialize_with = "serde_amount::deserialize_option")]
    pub total: Option<f64>,
}

impl InvoiceItem {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub invoice_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<InvoiceItem>,
    #[serde(default, deserialize_with = "serde_amount::deserialize_option")]
    pub subtotal: Option<f64>,
    #[serde(default, deserialize_with = "serde_amount::deserialize_option")]
    pub tax_amount: Option<f64>,
    #[serde(default, deserialize_with = "serde_amount::deserialize_option")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: InvoiceStatus,
}


/// Turkish VAT (KDV) applied to invoices unless configured otherwise.
pub const DEFAULT_TAX_RATE: f64 = 0.18;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl InvoiceTotals {
    pub fn compute(items: &[InvoiceItem], tax_rate: f64) -> Self {
        let subtotal: f64 = items.iter().map(InvoiceItem::line_total).sum();
        let tax_amount = subtotal * tax_rate;
        InvoiceTotals {
            subtotal,
            tax_amount,
            total: subtotal + tax_amount,
        }
    }
}

impl Invoice {
    /// The stored total when the record has one, otherwise the total recomputed from its items.
    pub fn effective_total(&self, tax_rate: f64) -> f64 {
        self.total
            .unwrap_or_else(|| InvoiceTotals::compute(&self.items, tax_rate).total)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expense_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "serde_amount::deserialize")]
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expense_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ExpenseStatus,
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Completed,
    Pending,
    Cancelled,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Check,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sale_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(default, deserialize_with = "serde_amount::deserialize")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "serde_amount::deserialize")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "serde_amount::deserialize_option")]
    pub amount: Option<f64>,
    // Records saved from the sale form carry `total` instead of `amount`.
    #[serde(default, deserialize_with = "serde_amount::deserialize_option")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SaleStatus,
    // The sales list stores `date`; older records use `saleDate`.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub sale_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}


impl Sale {
    pub fn effective_amount(&self) -> f64 {
        self.amount
            .or(self.total)
            .unwrap_or(self.quantity * self.unit_price)
    }

    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.date.or(self.sale_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bank_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_name: String,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub iban: Option<String>,
    #[serde(default, deserialize_with = "serde_amount::deserialize")]
    pub balance: f64,
    #[serde(default = "default_currency", deserialize_with = "null_as_default_currency")]
    pub currency: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
}

fn default_currency() -> String {
    "TRY".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tax_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tax_office: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub iban: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invoice_totals_apply_tax_rate() {
        let items = vec![
            InvoiceItem { quantity: 2.0, unit_price: 100.0, ..Default::default() },
            InvoiceItem { quantity: 1.0, unit_price: 50.0, ..Default::default() },
        ];
        let totals = InvoiceTotals::compute(&items, DEFAULT_TAX_RATE);
        assert_eq!(totals.subtotal, 250.0);
        assert!((totals.tax_amount - 45.0).abs() < 1e-9);
        assert!((totals.total - 295.0).abs() < 1e-9);
    }

    #[test]
    fn test_invoice_deserializes_locale_amounts() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": 7,
            "invoiceNumber": "INV-2024-001",
            "customerName": "Ahmet Yılmaz",
            "issueDate": "2024-12-15",
            "items": [
                { "id": "1", "description": "Danışmanlık", "quantity": "2", "unitPrice": "1.250,50" }
            ],
            "status": "sent"
        }))
        .unwrap();

        assert_eq!(invoice.id, RecordId::Number(7));
        assert_eq!(invoice.items[0].unit_price, 1250.5);
        assert_eq!(invoice.items[0].line_total(), 2501.0);
        assert_eq!(invoice.status, InvoiceStatus::Sent);
        assert_eq!(invoice.issue_date, NaiveDate::from_ymd_opt(2024, 12, 15));
        assert!((invoice.effective_total(DEFAULT_TAX_RATE) - 2951.18).abs() < 1e-9);
    }

    #[test]
    fn test_stored_invoice_total_wins() {
        let invoice: Invoice = serde_json::from_value(json!({ "total": "₺5.900,00" })).unwrap();
        assert_eq!(invoice.effective_total(DEFAULT_TAX_RATE), 5900.0);
        assert_eq!(invoice.status, InvoiceStatus::Draft);
    }

    #[test]
    fn test_sale_amount_falls_back_to_quantity_times_price() {
        let sale: Sale = serde_json::from_value(json!({
            "productName": "Web Tasarım Hizmeti",
            "quantity": 3,
            "unitPrice": "1,500.00",
            "paymentMethod": "transfer",
            "saleDate": ""
        }))
        .unwrap();
        assert_eq!(sale.effective_amount(), 4500.0);
        assert_eq!(sale.payment_method, Some(PaymentMethod::Transfer));
        assert_eq!(sale.sale_date, None);

        let from_form: Sale = serde_json::from_value(json!({ "total": 5000, "status": "refunded" })).unwrap();
        assert_eq!(from_form.effective_amount(), 5000.0);
        assert_eq!(from_form.status, SaleStatus::Other);

        let both: Sale = serde_json::from_value(json!({ "amount": "1.200", "total": 1000 })).unwrap();
        assert_eq!(both.effective_amount(), 1200.0);
    }

    #[test]
    fn test_bank_account_defaults() {
        let account: BankAccount = serde_json::from_value(json!({
            "id": "1",
            "bankName": "Ziraat Bankası",
            "accountName": "Ana Hesap",
            "balance": "125.000"
        }))
        .unwrap();
        assert_eq!(account.id, RecordId::Text("1".to_string()));
        assert_eq!(account.balance, 125000.0);
        assert_eq!(account.currency, "TRY");
        assert!(account.is_active);
    }

    #[test]
    fn test_customer_balance_null_is_zero() {
        let customer: Customer =
            serde_json::from_value(json!({ "name": "Ayşe", "balance": null, "createdAt": "2024-12-15" })).unwrap();
        assert_eq!(customer.balance, 0.0);
        assert_eq!(customer.created_at, NaiveDate::from_ymd_opt(2024, 12, 15));
    }

    #[test]
    fn test_null_fields_load_as_defaults() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": null,
            "invoiceNumber": null,
            "items": null,
            "status": null,
            "total": "1.180"
        }))
        .unwrap();
        assert_eq!(invoice.id, RecordId::default());
        assert_eq!(invoice.invoice_number, "");
        assert!(invoice.items.is_empty());
        assert_eq!(invoice.status, InvoiceStatus::Draft);

        let expense: Expense = serde_json::from_value(json!({ "status": null, "amount": "50,5" })).unwrap();
        assert_eq!(expense.status, ExpenseStatus::Pending);

        let sale: Sale = serde_json::from_value(json!({ "id": null, "status": null, "customerName": null })).unwrap();
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.customer_name, "");

        let account: BankAccount =
            serde_json::from_value(json!({ "currency": null, "isActive": null, "bankName": null })).unwrap();
        assert_eq!(account.currency, "TRY");
        assert!(account.is_active);

        let company: CompanyProfile = serde_json::from_value(json!({ "name": "MoneyFlow", "iban": null })).unwrap();
        assert_eq!(company.iban, "");
    }

    #[test]
    fn test_sale_date_prefers_date_key() {
        let sale: Sale = serde_json::from_value(json!({ "amount": 5000, "date": "2024-12-15" })).unwrap();
        assert_eq!(sale.effective_date(), NaiveDate::from_ymd_opt(2024, 12, 15));

        let older: Sale = serde_json::from_value(json!({ "saleDate": "2024-11-02T09:30:00.000Z" })).unwrap();
        assert_eq!(older.effective_date(), NaiveDate::from_ymd_opt(2024, 11, 2));
    }
}
