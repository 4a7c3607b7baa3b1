//! Run configuration.
//!
//! A [`PricingConfig`] carries every input of a pricing run. Its `Default` is
//! the reference run (20-step call, `s0 = K = 100`, `T = 1`, `r = 5 %`,
//! `σ = 20 %`); any field may be omitted from a JSON file and falls back to
//! that default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crr_core::{
    errors::{Error, Result},
    Compounding, Price, Rate, Size, Time, Volatility,
};
use crr_instruments::{EuropeanOption, OptionType};
use crr_methods::{ArbitragePolicy, CrrInputs, ModelConventions, TreeMode};
use crr_pricingengines::MarketData;

/// All inputs of a single pricing run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Call or put.
    pub option_type: OptionType,
    /// Number of tree steps `N`.
    pub step_count: Size,
    /// Spot price `s0`.
    pub initial_price: Price,
    /// Strike `K`.
    pub strike: Price,
    /// Time to maturity in years.
    pub maturity: Time,
    /// Risk-free rate.
    pub risk_free_rate: Rate,
    /// Volatility.
    pub volatility: Volatility,
    /// Growth / discounting convention.
    pub compounding: Compounding,
    /// Handling of `q ∉ [0, 1]`.
    pub arbitrage_policy: ArbitragePolicy,
    /// Tree structure walked by the backward pricer.
    pub tree_mode: TreeMode,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            option_type: OptionType::Call,
            step_count: 20,
            initial_price: 100.0,
            strike: 100.0,
            maturity: 1.0,
            risk_free_rate: 0.05,
            volatility: 0.20,
            compounding: Compounding::Continuous,
            arbitrage_policy: ArbitragePolicy::Reject,
            tree_mode: TreeMode::Lattice,
        }
    }
}

impl PricingConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid JSON config: {e}")))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read '{}': {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse '{}': {e}", path.display())))
    }

    /// The raw CRR inputs.
    pub fn inputs(&self) -> CrrInputs {
        CrrInputs {
            step_count: self.step_count,
            initial_price: self.initial_price,
            strike: self.strike,
            maturity: self.maturity,
            risk_free_rate: self.risk_free_rate,
            volatility: self.volatility,
        }
    }

    /// Compounding and arbitrage conventions.
    pub fn conventions(&self) -> ModelConventions {
        ModelConventions {
            compounding: self.compounding,
            arbitrage_policy: self.arbitrage_policy,
        }
    }

    /// The option being priced.
    pub fn option(&self) -> EuropeanOption {
        EuropeanOption::new(self.option_type, self.strike, self.maturity)
    }

    /// Market inputs for the engines.
    pub fn market(&self) -> MarketData {
        MarketData::new(self.initial_price, self.risk_free_rate, self.volatility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_run() {
        let c = PricingConfig::default();
        assert_eq!(c.step_count, 20);
        assert_eq!(c.option_type, OptionType::Call);
        assert_eq!(c.compounding, Compounding::Continuous);
        assert_eq!(c.tree_mode, TreeMode::Lattice);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c = PricingConfig::from_json_str(
            r#"{ "option_type": "put", "step_count": 50, "compounding": "simple", "tree_mode": "path" }"#,
        )
        .unwrap();
        assert_eq!(c.option_type, OptionType::Put);
        assert_eq!(c.step_count, 50);
        assert_eq!(c.compounding, Compounding::Simple);
        assert_eq!(c.tree_mode, TreeMode::PathTree);
        assert_eq!(c.strike, 100.0);
        assert_eq!(c.arbitrage_policy, ArbitragePolicy::Reject);
    }

    #[test]
    fn unknown_fields_are_config_errors() {
        let err = PricingConfig::from_json_str(r#"{ "steps": 10 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{err}");
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = PricingConfig::from_json_file("/nonexistent/crr-config.json").unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("failed to read")), "{err}");
    }

    #[test]
    fn json_round_trip() {
        let c = PricingConfig {
            arbitrage_policy: ArbitragePolicy::Warn,
            ..Default::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains(r#""arbitrage_policy":"warn""#), "{json}");
        assert_eq!(PricingConfig::from_json_str(&json).unwrap(), c);
    }
}
