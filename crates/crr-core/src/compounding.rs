//! Compounding conventions.
//!
//! The same convention must drive the one-step growth factor used in the
//! risk-neutral probability and every discount factor applied afterwards,
//! otherwise the tree price and the combinatorial price drift apart.

use std::fmt;
use std::str::FromStr;

use crate::errors::Error;
use crate::{DiscountFactor, Rate, Real, Size, Time};

/// How the risk-free rate accrues over a time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Compounding {
    /// Simple interest over each step: `1 + r·t`
    Simple,
    /// Continuously compounded: `e^(r·t)`
    #[default]
    Continuous,
}

impl Compounding {
    /// Growth of one unit of cash over `t` at `rate`.
    pub fn growth_factor(self, rate: Rate, t: Time) -> Real {
        match self {
            Compounding::Simple => 1.0 + rate * t,
            Compounding::Continuous => (rate * t).exp(),
        }
    }

    /// Discount factor over a single interval `t`.
    pub fn discount_factor(self, rate: Rate, t: Time) -> DiscountFactor {
        match self {
            Compounding::Simple => 1.0 / (1.0 + rate * t),
            Compounding::Continuous => (-rate * t).exp(),
        }
    }

    /// Discount factor over `periods` consecutive intervals of length `dt`.
    ///
    /// For continuous compounding this is exactly `e^(−r·dt·periods)`; for
    /// simple compounding each period is discounted separately, i.e.
    /// `(1 + r·dt)^(−periods)`.
    pub fn compounded_discount(self, rate: Rate, dt: Time, periods: Size) -> DiscountFactor {
        match self {
            Compounding::Simple => (1.0 + rate * dt).powf(-(periods as Real)),
            Compounding::Continuous => (-rate * dt * periods as Real).exp(),
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compounding::Simple => write!(f, "simple"),
            Compounding::Continuous => write!(f, "continuous"),
        }
    }
}

impl FromStr for Compounding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Compounding::Simple),
            "continuous" => Ok(Compounding::Continuous),
            other => Err(Error::InvalidParameter(format!(
                "unknown compounding '{other}' (expected 'simple' or 'continuous')"
            ))),
        }
    }
}
