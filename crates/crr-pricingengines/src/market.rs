//! Flat market inputs shared by every engine.

use crr_core::{Price, Rate, Volatility};

/// Spot, a flat continuously quoted risk-free rate, and a flat volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketData {
    /// Current price of the underlying.
    pub spot: Price,
    /// Risk-free rate.
    pub risk_free_rate: Rate,
    /// Volatility of the underlying.
    pub volatility: Volatility,
}

impl MarketData {
    /// Bundle the three market inputs.
    pub fn new(spot: Price, risk_free_rate: Rate, volatility: Volatility) -> Self {
        Self {
            spot,
            risk_free_rate,
            volatility,
        }
    }
}
