// Import sources and the in-memory ledger.
pub mod backup;
pub mod csv_parser;
pub mod ledger_store;
