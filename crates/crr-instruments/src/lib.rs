//! # crr-instruments
//!
//! European options, their payoffs, and the pricing-engine interface.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod instrument;
pub mod option;
pub mod payoff;

pub use instrument::{PricingEngine, PricingResults};
pub use option::EuropeanOption;
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff, StrikedPayoff};
