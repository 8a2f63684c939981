// Async services over the ledger store.
pub mod import_service;

pub use import_service::{ImportService, LoadStatementResponse};
