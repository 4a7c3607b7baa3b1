//! Analytic European option engine (Black-Scholes).
//!
//! The continuous-time limit of the CRR tree, used as the convergence target
//! for the binomial and combinatorial engines:
//!
//! $$C = S N(d_1) - K e^{-rT} N(d_2)$$
//! $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
//!
//! where $d_{1,2} = \frac{\ln(S/K) + (r \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
//! The underlying pays no dividends.

use crr_core::{errors::Result, Price, Rate, Real, Time, Volatility};
use crr_instruments::{EuropeanOption, OptionType, PricingEngine, PricingResults};
use crr_math::distributions::{normal_cdf, normal_pdf};

use crate::market::MarketData;

/// Black-Scholes price and first/second-order sensitivities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesValuation {
    /// Option value.
    pub price: Real,
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂²V/∂S².
    pub gamma: Real,
    /// ∂V/∂σ, per 1.0 of volatility.
    pub vega: Real,
    /// ∂V/∂t, per year.
    pub theta: Real,
    /// ∂V/∂r, per 1.0 of rate.
    pub rho: Real,
}

/// Black-Scholes value of a European option on a non-dividend-paying stock.
///
/// With no time left (or no volatility) the value collapses to the
/// discounted intrinsic value of the forward.
pub fn black_scholes(
    option_type: OptionType,
    spot: Price,
    strike: Price,
    risk_free_rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> BlackScholesValuation {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return BlackScholesValuation {
            price: (phi * (spot - strike)).max(0.0),
            delta: 0.0,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
        };
    }

    let r = risk_free_rate;
    let sigma = volatility;
    let sqrt_t = t.sqrt();
    let std_dev = sigma * sqrt_t;
    let df = (-r * t).exp();

    let (d1, d2) = if std_dev > 1e-15 {
        let d1 = ((spot / strike).ln() + (r + 0.5 * sigma * sigma) * t) / std_dev;
        (d1, d1 - std_dev)
    } else {
        let big = if spot > strike * df { 1e15 } else { -1e15 };
        (big, big)
    };

    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    let price = phi * (spot * nd1 - strike * df * nd2);
    let delta = phi * nd1;
    let gamma = if std_dev > 1e-15 {
        npd1 / (spot * std_dev)
    } else {
        0.0
    };
    let vega = spot * npd1 * sqrt_t;
    let theta = -(spot * npd1 * sigma) / (2.0 * sqrt_t) - phi * r * strike * df * nd2;
    let rho = phi * strike * t * df * nd2;

    BlackScholesValuation {
        price,
        delta,
        gamma,
        vega,
        theta,
        rho,
    }
}

/// Analytic pricing engine for European options.
#[derive(Debug, Clone)]
pub struct AnalyticEuropeanEngine {
    market: MarketData,
}

impl AnalyticEuropeanEngine {
    /// Create an engine over a flat market.
    pub fn new(market: MarketData) -> Self {
        Self { market }
    }

    /// The market inputs.
    pub fn market(&self) -> &MarketData {
        &self.market
    }
}

impl PricingEngine<EuropeanOption> for AnalyticEuropeanEngine {
    fn calculate(&self, option: &EuropeanOption) -> Result<PricingResults> {
        let v = black_scholes(
            option.option_type(),
            self.market.spot,
            option.strike(),
            self.market.risk_free_rate,
            self.market.volatility,
            option.maturity(),
        );
        Ok(PricingResults::from_npv(v.price)
            .with_result("delta", v.delta)
            .with_result("gamma", v.gamma)
            .with_result("vega", v.vega)
            .with_result("theta", v.theta)
            .with_result("rho", v.rho))
    }
}
