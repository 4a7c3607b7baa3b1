//! Pricing results and the `PricingEngine` trait.
//!
//! Instruments are plain data; engines hold the market inputs and numerical
//! settings and compute results on demand.

use crr_core::{errors::Result, Real};
use std::collections::BTreeMap;

/// Results of pricing an instrument.
///
/// Contains the NPV and optionally additional named results
/// (e.g. "up_factor", "node_count").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingResults {
    /// Net present value.
    pub npv: Real,
    /// Additional named results.
    pub additional_results: BTreeMap<String, Real>,
}

impl PricingResults {
    /// Create pricing results with just an NPV.
    pub fn from_npv(npv: Real) -> Self {
        Self {
            npv,
            additional_results: BTreeMap::new(),
        }
    }

    /// Add a named result.
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }

    /// Look up a named result.
    pub fn result(&self, key: &str) -> Option<Real> {
        self.additional_results.get(key).copied()
    }
}

/// Base trait for all pricing engines.
///
/// A pricing engine computes `PricingResults` for a specific instrument type.
pub trait PricingEngine<Args>: std::fmt::Debug + Send + Sync {
    /// Price the instrument described by `args`.
    fn calculate(&self, args: &Args) -> Result<PricingResults>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_results_builder() {
        let r = PricingResults::from_npv(42.0)
            .with_result("up_factor", 1.05)
            .with_result("node_count", 231.0);
        assert!((r.npv - 42.0).abs() < 1e-15);
        assert_eq!(r.result("up_factor"), Some(1.05));
        assert_eq!(r.result("node_count"), Some(231.0));
        assert_eq!(r.result("delta"), None);
    }
}
