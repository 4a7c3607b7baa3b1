//! Miscellaneous utilities.

/// Formatting helpers for rates, volatilities, and plain numbers.
pub mod data_formatters;

pub use data_formatters::{format_rate, format_real, format_volatility};
