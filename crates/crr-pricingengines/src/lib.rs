//! # crr-pricingengines
//!
//! Pricing engines for European options under the CRR model.
//!
//! ## Engines
//!
//! - [`BinomialEngine`]: backward induction on a lattice or path tree
//! - [`CombinatorialEngine`]: discounted expectation over the terminal
//!   binomial distribution
//! - [`AnalyticEuropeanEngine`]: Black-Scholes closed form, the `N → ∞` limit

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod combinatorial_engine;
pub mod market;

pub use analytic_european_engine::{black_scholes, AnalyticEuropeanEngine, BlackScholesValuation};
pub use binomial_engine::{binomial_price, BinomialEngine, TreeValuation};
pub use combinatorial_engine::{
    combinatorial_price, expected_terminal_payoff, CombinatorialEngine, CombinatorialValuation,
};
pub use market::MarketData;
