//! Probability distributions.
//!
//! Provides the Binomial distribution (delegating to `statrs`) and the
//! standard Normal density / cumulative function used by the analytic
//! Black-Scholes reference price.

pub mod binomial;
pub mod normal;

pub use binomial::BinomialDistribution;
pub use normal::{normal_cdf, normal_pdf};
