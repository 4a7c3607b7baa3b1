//! # crr-core
//!
//! Core types, error definitions, and discounting conventions for crr-pricer.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – type aliases, the error enum with its
//! `ensure!` macro, the [`Compounding`] convention that drives both
//! the risk-neutral probability and the discount factors, and small formatting
//! helpers for console reports.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Compounding (discounting) conventions.
pub mod compounding;

/// Error types and the `ensure!` macro.
pub mod errors;

/// Miscellaneous utilities.
pub mod utilities;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for step counts, array sizes and indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor, normally in (0, 1].
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

/// A probability weight.
pub type Probability = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use compounding::Compounding;
pub use errors::{Error, Result};
