//! Data formatting helpers used by the console report.

use crate::{Rate, Real, Volatility};

/// Format a rate as a percentage string (e.g. `0.05` → `"5.0000 %"`).
pub fn format_rate(r: Rate) -> String {
    format!("{:.4} %", r * 100.0)
}

/// Format a volatility as a percentage string (e.g. `0.20` → `"20.0000 %"`).
pub fn format_volatility(v: Volatility) -> String {
    format!("{:.4} %", v * 100.0)
}

/// Format a real number with the given number of decimal places.
pub fn format_real(value: Real, decimals: usize) -> String {
    format!("{:.prec$}", value, prec = decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.05), "5.0000 %");
    }

    #[test]
    fn test_format_volatility() {
        assert_eq!(format_volatility(0.2), "20.0000 %");
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(10.351260189, 6), "10.351260");
        assert_eq!(format_real(-0.5, 1), "-0.5");
    }
}
