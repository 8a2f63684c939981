// Summaries computed over imported data.
pub mod account;
pub mod dashboard;

pub use account::AccountSummary;
pub use dashboard::DashboardSummary;
