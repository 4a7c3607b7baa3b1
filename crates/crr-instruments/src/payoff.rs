//! Option payoffs.
//!
//! Payoffs describe the terminal value of an option as a function of the
//! underlying asset price at expiry.

use crr_core::{errors::Error, Price, Real};
use std::fmt;
use std::str::FromStr;

/// Direction of a vanilla option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike.
    #[default]
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// `φ` in `max(φ(S − K), 0)`.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(Error::InvalidParameter(format!(
                "unknown option type '{other}' (expected 'call' or 'put')"
            ))),
        }
    }
}

/// Terminal value of an option as a function of the underlying price.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at expiry.
    fn value(&self, price: Price) -> Real;
}

/// A payoff with a strike and a direction.
pub trait StrikedPayoff: Payoff {
    /// The strike price.
    fn strike(&self) -> Price;

    /// Call or put.
    fn option_type(&self) -> OptionType;
}

/// Standard "plain vanilla" European option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Price,
}

impl PlainVanillaPayoff {
    /// A vanilla payoff struck at `strike`.
    pub fn new(option_type: OptionType, strike: Price) -> Self {
        Self {
            option_type,
            strike,
        }
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Price) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }
}

impl StrikedPayoff for PlainVanillaPayoff {
    fn strike(&self) -> Price {
        self.strike
    }

    fn option_type(&self) -> OptionType {
        self.option_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_vanilla_call() {
        let p = PlainVanillaPayoff::new(OptionType::Call, 100.0);
        assert!((p.value(122.14) - 22.14).abs() < 1e-12);
        assert_eq!(p.value(81.87), 0.0);
        assert_eq!(p.value(100.0), 0.0);
    }

    #[test]
    fn plain_vanilla_put() {
        let p = PlainVanillaPayoff::new(OptionType::Put, 100.0);
        assert!((p.value(81.87) - 18.13).abs() < 1e-12);
        assert_eq!(p.value(122.14), 0.0);
    }

    #[test]
    fn option_type_parsing() {
        assert_eq!("call".parse::<OptionType>(), Ok(OptionType::Call));
        assert_eq!("PUT".parse::<OptionType>(), Ok(OptionType::Put));
        assert_eq!("c".parse::<OptionType>(), Ok(OptionType::Call));
        assert!("straddle".parse::<OptionType>().is_err());
    }
}
