//! Closed-form binomial expectation over terminal nodes.
//!
//! After `N` steps the stock sits at `s0 · U^k · D^(N−k)` with probability
//! `C(N, k) · q^k · (1 − q)^(N−k)`. Summing the weighted payoff gives the
//! expected terminal payoff without building a tree; discounting it by
//! `g^(−N)` gives the same price as backward induction.

use crr_core::{ensure, errors::Result, Real, Size};
use crr_instruments::{EuropeanOption, Payoff, PricingEngine, PricingResults};
use crr_math::BinomialWeights;
use crr_methods::{CrrInputs, CrrParameters, ModelConventions};

use crate::market::MarketData;

/// Discounted and undiscounted combinatorial values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinatorialValuation {
    /// Present value, `g^(−N) · E[payoff]`.
    pub price: Real,
    /// Risk-neutral expected payoff at maturity.
    pub expected_payoff: Real,
    /// Discount factor applied, `g^(−N)`.
    pub discount: Real,
}

/// Risk-neutral expected payoff at maturity, undiscounted.
///
/// # Errors
/// [`Error::InvalidParameter`](crr_core::errors::Error::InvalidParameter) if
/// the terminal weights cannot be formed or the sum is not finite, which can
/// only happen when `q ∉ [0, 1]`.
pub fn expected_terminal_payoff(params: &CrrParameters, payoff: &dyn Payoff) -> Result<Real> {
    let n = params.step_count();
    let weights = BinomialWeights::new(n as u64, params.up_probability())?;
    let expected: Real = (0..=n)
        .map(|k| weights.weight(k as u64) * payoff.value(params.terminal_price(k)))
        .sum();
    ensure!(
        expected.is_finite(),
        "expected terminal payoff is not finite (up probability {})",
        params.up_probability()
    );
    Ok(expected)
}

/// Present value of `payoff` from the terminal distribution.
///
/// # Errors
/// As for [`expected_terminal_payoff`].
pub fn combinatorial_price(
    params: &CrrParameters,
    payoff: &dyn Payoff,
) -> Result<CombinatorialValuation> {
    let expected_payoff = expected_terminal_payoff(params, payoff)?;
    let discount = params.terminal_discount();
    tracing::debug!(expected_payoff, discount, "combinatorial expectation");
    Ok(CombinatorialValuation {
        price: discount * expected_payoff,
        expected_payoff,
        discount,
    })
}

/// Engine pricing from the terminal binomial distribution.
#[derive(Debug, Clone)]
pub struct CombinatorialEngine {
    market: MarketData,
    steps: Size,
    conventions: ModelConventions,
}

impl CombinatorialEngine {
    /// An engine with `steps` periods and default conventions.
    pub fn new(market: MarketData, steps: Size) -> Self {
        Self {
            market,
            steps,
            conventions: ModelConventions::default(),
        }
    }

    /// Override the compounding and arbitrage conventions.
    pub fn with_conventions(mut self, conventions: ModelConventions) -> Self {
        self.conventions = conventions;
        self
    }
}

impl PricingEngine<EuropeanOption> for CombinatorialEngine {
    fn calculate(&self, option: &EuropeanOption) -> Result<PricingResults> {
        let params = CrrParameters::derive(
            CrrInputs {
                step_count: self.steps,
                initial_price: self.market.spot,
                strike: option.strike(),
                maturity: option.maturity(),
                risk_free_rate: self.market.risk_free_rate,
                volatility: self.market.volatility,
            },
            self.conventions,
        )?;
        let v = combinatorial_price(&params, option.payoff())?;
        Ok(PricingResults::from_npv(v.price)
            .with_result("expected_payoff", v.expected_payoff)
            .with_result("discount", v.discount))
    }
}
