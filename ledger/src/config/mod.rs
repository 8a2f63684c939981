// Import configuration: CSV layout, date formats and invoice tax rate.
pub mod settings;
