//! Binomial (CRR) engine for European options.
//!
//! Derives the CRR parameters, builds the requested tree structure and rolls
//! the payoff back to today.

use crr_core::{errors::Result, Real, Size};
use crr_instruments::{EuropeanOption, Payoff, PricingEngine, PricingResults};
use crr_methods::{
    price_european, price_european_path_tree, BinomialLattice, CrrInputs, CrrParameters,
    ModelConventions, PathTree, TreeMode,
};

use crate::market::MarketData;

/// Result of a backward-induction run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeValuation {
    /// Option value at the root.
    pub price: Real,
    /// Number of nodes the tree held.
    pub node_count: Size,
}

/// Price `payoff` by backward induction on the structure selected by `mode`.
///
/// # Errors
/// [`crr_core::Error::InvalidParameter`] if `mode` is
/// [`TreeMode::PathTree`] and the step count exceeds [`PathTree::MAX_STEPS`].
pub fn binomial_price(params: &CrrParameters, payoff: &dyn Payoff, mode: TreeMode) -> Result<TreeValuation> {
    let value = |s: Real| payoff.value(s);
    let (s0, u, d, n) = (
        params.initial_price(),
        params.up_factor(),
        params.down_factor(),
        params.step_count(),
    );
    let discount = params.step_discount();
    let q = params.up_probability();

    let valuation = match mode {
        TreeMode::Lattice => {
            let mut lattice = BinomialLattice::new(s0, u, d, n)?;
            TreeValuation {
                price: price_european(&mut lattice, &value, discount, q),
                node_count: lattice.node_count(),
            }
        }
        TreeMode::PathTree => {
            let mut tree = PathTree::build(s0, u, d, n)?;
            TreeValuation {
                price: price_european_path_tree(&mut tree, &value, discount, q),
                node_count: tree.node_count(),
            }
        }
    };

    tracing::debug!(
        mode = %mode,
        price = valuation.price,
        node_count = valuation.node_count,
        "backward induction complete"
    );
    Ok(valuation)
}

/// CRR binomial engine.
#[derive(Debug, Clone)]
pub struct BinomialEngine {
    market: MarketData,
    steps: Size,
    conventions: ModelConventions,
    tree_mode: TreeMode,
}

impl BinomialEngine {
    /// An engine with `steps` periods, continuous compounding, strict
    /// no-arbitrage checking and a recombining lattice.
    pub fn new(market: MarketData, steps: Size) -> Self {
        Self {
            market,
            steps,
            conventions: ModelConventions::default(),
            tree_mode: TreeMode::default(),
        }
    }

    /// Override the compounding and arbitrage conventions.
    pub fn with_conventions(mut self, conventions: ModelConventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Select the tree structure.
    pub fn with_tree_mode(mut self, tree_mode: TreeMode) -> Self {
        self.tree_mode = tree_mode;
        self
    }

    /// The market inputs.
    pub fn market(&self) -> &MarketData {
        &self.market
    }

    /// Number of tree steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Derive the CRR parameters for `option` under this engine's market.
    pub fn parameters(&self, option: &EuropeanOption) -> Result<CrrParameters> {
        let inputs = CrrInputs {
            step_count: self.steps,
            initial_price: self.market.spot,
            strike: option.strike(),
            maturity: option.maturity(),
            risk_free_rate: self.market.risk_free_rate,
            volatility: self.market.volatility,
        };
        CrrParameters::derive(inputs, self.conventions)
    }
}

impl PricingEngine<EuropeanOption> for BinomialEngine {
    fn calculate(&self, option: &EuropeanOption) -> Result<PricingResults> {
        let params = self.parameters(option)?;
        let valuation = binomial_price(&params, option.payoff(), self.tree_mode)?;
        Ok(PricingResults::from_npv(valuation.price)
            .with_result("up_factor", params.up_factor())
            .with_result("down_factor", params.down_factor())
            .with_result("up_probability", params.up_probability())
            .with_result("step_size", params.step_size())
            .with_result("node_count", valuation.node_count as Real))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crr_core::Error;

    fn engine(steps: Size) -> BinomialEngine {
        BinomialEngine::new(MarketData::new(100.0, 0.05, 0.20), steps)
    }

    #[test]
    fn twenty_step_call() {
        let r = engine(20).calculate(&EuropeanOption::call(100.0, 1.0)).unwrap();
        assert_relative_eq!(r.npv, 10.351_260_19, max_relative = 1e-8);
        assert_eq!(r.result("node_count"), Some(231.0));
        assert_relative_eq!(r.result("up_factor").unwrap(), 1.045_736_434_8, max_relative = 1e-9);
    }

    #[test]
    fn path_tree_mode_reports_exponential_node_count() {
        let r = engine(10)
            .with_tree_mode(TreeMode::PathTree)
            .calculate(&EuropeanOption::put(100.0, 1.0))
            .unwrap();
        let lattice = engine(10).calculate(&EuropeanOption::put(100.0, 1.0)).unwrap();
        assert_eq!(r.result("node_count"), Some(2047.0));
        assert_relative_eq!(r.npv, lattice.npv, max_relative = 1e-12);
    }

    #[test]
    fn path_tree_too_deep() {
        let err = engine(30)
            .with_tree_mode(TreeMode::PathTree)
            .calculate(&EuropeanOption::call(100.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)), "{err}");
    }

    #[test]
    fn zero_steps_is_rejected() {
        let err = engine(0)
            .calculate(&EuropeanOption::call(100.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)), "{err}");
    }
}
