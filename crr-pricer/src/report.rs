//! The pricing report: every intermediate value of a run, both prices, and
//! the Black-Scholes reference.

use std::fmt;

use serde::Serialize;

use crr_core::{
    errors::Result,
    utilities::{format_rate, format_real, format_volatility},
    Compounding, DiscountFactor, Price, Probability, Real, Size, Time,
};
use crr_methods::CrrParameters;
use crr_pricingengines::{binomial_price, black_scholes, combinatorial_price};

use crate::config::PricingConfig;

/// Outcome of a full pricing run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingReport {
    /// The configuration that produced this report.
    pub config: PricingConfig,
    /// `dt = T / N`.
    pub step_size: Time,
    /// `U`.
    pub up_factor: Real,
    /// `D`.
    pub down_factor: Real,
    /// One-step growth factor `g`.
    pub growth_factor: Real,
    /// Risk-neutral `q`.
    pub up_probability: Probability,
    /// Whether `q ∈ [0, 1]`.
    pub arbitrage_free: bool,
    /// Backward-induction price.
    pub tree_price: Price,
    /// Nodes held by the tree that produced `tree_price`.
    pub node_count: Size,
    /// Discounted combinatorial price.
    pub combinatorial_price: Price,
    /// Undiscounted expected terminal payoff.
    pub expected_payoff: Price,
    /// `g^(−N)`.
    pub terminal_discount: DiscountFactor,
    /// Black-Scholes price for the same inputs.
    ///
    /// Always discounted continuously at `r`, so under
    /// [`Compounding::Simple`] it differs from the tree prices by more than
    /// discretisation error.
    pub black_scholes_price: Price,
    /// `|tree_price − combinatorial_price|`.
    pub discrepancy: Real,
}

impl PricingReport {
    /// Derive the CRR parameters once and run every pricer on them.
    pub fn compute(config: &PricingConfig) -> Result<Self> {
        let params = CrrParameters::derive(config.inputs(), config.conventions())?;
        let option = config.option();

        let tree = binomial_price(&params, option.payoff(), config.tree_mode)?;
        let comb = combinatorial_price(&params, option.payoff())?;
        let bs = black_scholes(
            config.option_type,
            config.initial_price,
            config.strike,
            config.risk_free_rate,
            config.volatility,
            config.maturity,
        );

        let discrepancy = (tree.price - comb.price).abs();
        tracing::info!(
            option = %config.option_type,
            steps = config.step_count,
            tree_price = tree.price,
            combinatorial_price = comb.price,
            discrepancy,
            "priced European option"
        );

        Ok(Self {
            config: *config,
            step_size: params.step_size(),
            up_factor: params.up_factor(),
            down_factor: params.down_factor(),
            growth_factor: params.growth_factor(),
            up_probability: params.up_probability(),
            arbitrage_free: params.is_arbitrage_free(),
            tree_price: tree.price,
            node_count: tree.node_count,
            combinatorial_price: comb.price,
            expected_payoff: comb.expected_payoff,
            terminal_discount: comb.discount,
            black_scholes_price: bs.price,
            discrepancy,
        })
    }
}

impl fmt::Display for PricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        writeln!(
            f,
            "European {} | N = {} | S0 = {} | K = {} | T = {} | r = {} | vol = {}",
            c.option_type,
            c.step_count,
            format_real(c.initial_price, 4),
            format_real(c.strike, 4),
            format_real(c.maturity, 4),
            format_rate(c.risk_free_rate),
            format_volatility(c.volatility),
        )?;
        writeln!(f, "Compounding = {} | Tree = {}", c.compounding, c.tree_mode)?;
        writeln!(f)?;
        writeln!(f, "Step Size = {}", format_real(self.step_size, 6))?;
        writeln!(f, "Up Factor = {}", format_real(self.up_factor, 10))?;
        writeln!(f, "Down Factor = {}", format_real(self.down_factor, 10))?;
        writeln!(f, "Growth Factor = {}", format_real(self.growth_factor, 10))?;
        write!(f, "Q = {}", format_real(self.up_probability, 10))?;
        if !self.arbitrage_free {
            write!(f, "  (outside [0, 1]: no-arbitrage violated)")?;
        }
        writeln!(f)?;
        writeln!(f)?;
        writeln!(
            f,
            "The Option Price is {}  ({} nodes)",
            format_real(self.tree_price, 6),
            self.node_count
        )?;
        writeln!(
            f,
            "Combinatorial Price = {}  (undiscounted {}, discount {})",
            format_real(self.combinatorial_price, 6),
            format_real(self.expected_payoff, 6),
            format_real(self.terminal_discount, 6),
        )?;
        write!(f, "Black-Scholes Price = {}", format_real(self.black_scholes_price, 6))?;
        if c.compounding != Compounding::Continuous {
            write!(f, "  (continuous compounding)")?;
        }
        writeln!(f)?;
        write!(f, "Tree vs Combinatorial = {:.3e}", self.discrepancy)
    }
}
