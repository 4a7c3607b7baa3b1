//! European option instrument.

use crate::payoff::{OptionType, PlainVanillaPayoff, StrikedPayoff};
use crr_core::{Price, Time};

/// A European call or put, exercisable only at `maturity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanOption {
    payoff: PlainVanillaPayoff,
    maturity: Time,
}

impl EuropeanOption {
    /// Create a European option expiring in `maturity` years.
    pub fn new(option_type: OptionType, strike: Price, maturity: Time) -> Self {
        Self {
            payoff: PlainVanillaPayoff::new(option_type, strike),
            maturity,
        }
    }

    /// Convenience: a European call.
    pub fn call(strike: Price, maturity: Time) -> Self {
        Self::new(OptionType::Call, strike, maturity)
    }

    /// Convenience: a European put.
    pub fn put(strike: Price, maturity: Time) -> Self {
        Self::new(OptionType::Put, strike, maturity)
    }

    /// The strike price.
    pub fn strike(&self) -> Price {
        self.payoff.strike()
    }

    /// The option type (call/put).
    pub fn option_type(&self) -> OptionType {
        self.payoff.option_type()
    }

    /// Time to maturity in years.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// The terminal payoff.
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.payoff
    }
}
