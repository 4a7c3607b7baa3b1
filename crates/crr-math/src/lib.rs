//! # crr-math
//!
//! Mathematical utilities for crr-pricer.
//!
//! # Modules
//!
//! * [`combinatorics`]: binomial coefficients and terminal-node weights
//! * [`distributions`]: binomial and normal distributions

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Binomial coefficients and per-node binomial weights.
pub mod combinatorics;

/// Probability distributions (binomial, normal).
pub mod distributions;

pub use combinatorics::{binomial_coefficient, BinomialWeights, MAX_DIRECT_TRIALS};
pub use distributions::{normal_cdf, normal_pdf, BinomialDistribution};
