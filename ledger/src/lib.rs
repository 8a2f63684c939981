// Ledger library root: statement and backup imports on top of the shared numeric normalizer.

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
