//! Error types for crr-pricer.
//!
//! A single `thiserror`-derived enum covers every failure the pricing
//! pipeline can report. Parameter checks go through the [`ensure!`] macro,
//! which returns [`Error::InvalidParameter`] when its condition is false.
//!
//! [`ensure!`]: crate::ensure

use thiserror::Error;

use crate::Real;

/// The top-level error type used throughout crr-pricer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An input is outside its domain, or a derived quantity would divide
    /// by zero (zero step count, up factor equal to down factor, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The risk-neutral up probability fell outside `[0, 1]`, i.e. the
    /// no-arbitrage ordering `D < g < U` does not hold.
    #[error(
        "arbitrage violation: up probability {up_probability} is outside [0, 1] \
         (down factor {down_factor}, growth factor {growth_factor}, up factor {up_factor})"
    )]
    ArbitrageViolation {
        /// The computed up probability.
        up_probability: Real,
        /// Multiplicative down move.
        down_factor: Real,
        /// One-step risk-free growth factor.
        growth_factor: Real,
        /// Multiplicative up move.
        up_factor: Real,
    },

    /// A configuration source could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand `Result` type used throughout crr-pricer.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidParameter(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use crr_core::{ensure, errors::Error};
/// fn positive(x: f64) -> crr_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidParameter(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameter(
                format!($($msg)*)
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_steps(n: usize) -> Result<usize> {
        crate::ensure!(n > 0, "step count must be positive, got {n}");
        Ok(n)
    }

    #[test]
    fn ensure_maps_to_invalid_parameter() {
        assert_eq!(checked_steps(3), Ok(3));
        let err = checked_steps(0).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidParameter("step count must be positive, got 0".into())
        );
        assert_eq!(
            err.to_string(),
            "invalid parameter: step count must be positive, got 0"
        );
    }

    #[test]
    fn arbitrage_violation_message_names_all_factors() {
        let err = Error::ArbitrageViolation {
            up_probability: 1.5,
            down_factor: 0.9,
            growth_factor: 1.2,
            up_factor: 1.1,
        };
        let msg = err.to_string();
        assert!(msg.contains("1.5"), "{msg}");
        assert!(msg.contains("growth factor 1.2"), "{msg}");
    }
}
