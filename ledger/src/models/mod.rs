// Ledger-side models. Bookkeeping records (invoices, sales, ...) live in `shared::models`.
pub mod entry;

pub use entry::LedgerEntry;
