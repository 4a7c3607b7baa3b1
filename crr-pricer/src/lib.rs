//! # crr-pricer
//!
//! Cox-Ross-Rubinstein binomial pricing of European options, cross-checked
//! against the closed-form binomial expectation and Black-Scholes.
//!
//! This crate is a **façade** that re-exports the workspace crates and adds
//! the run configuration and the console/JSON report. Application code should
//! depend on this crate rather than the individual `crr-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use crr_pricer::{PricingConfig, PricingReport};
//!
//! let report = PricingReport::compute(&PricingConfig::default()).unwrap();
//! assert!((report.tree_price - report.combinatorial_price).abs() < 1e-9);
//! println!("{report}");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions, and compounding.
pub use crr_core as core;

/// Binomial combinatorics and distributions.
pub use crr_math as math;

/// European option, payoffs, and the pricing-engine trait.
pub use crr_instruments as instruments;

/// CRR parameters, lattice, path tree, and backward induction.
pub use crr_methods as methods;

/// Binomial, combinatorial, and analytic engines.
pub use crr_pricingengines as pricingengines;

/// Run configuration.
pub mod config;

/// Pricing report.
pub mod report;

pub use config::PricingConfig;
pub use report::PricingReport;
