pub mod models;
pub mod numeric;

pub use numeric::{normalise_numeric_string, parse_currency_to_number, RawValue};
