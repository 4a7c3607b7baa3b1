//! Cox-Ross-Rubinstein model parameters.
//!
//! [`CrrParameters::derive`] turns the raw inputs into the up/down factors and
//! the risk-neutral up probability:
//!
//! * `dt = T / N`
//! * `U = exp(σ √dt)`, `D = 1 / U`
//! * `g` = one-step growth factor under the chosen [`Compounding`]
//! * `q = (g − D) / (U − D)`
//!
//! Every precondition is checked here, before any tree is built.

use std::fmt;
use std::str::FromStr;

use crr_core::{
    ensure,
    errors::{Error, Result},
    Compounding, DiscountFactor, Price, Probability, Rate, Real, Size, Time, Volatility,
};

use super::BinomialLattice;

/// What to do when the risk-neutral up probability falls outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ArbitragePolicy {
    /// Fail with [`Error::ArbitrageViolation`].
    #[default]
    Reject,
    /// Log a warning and price anyway; the result is numerically defined but
    /// carries no economic meaning.
    Warn,
}

impl fmt::Display for ArbitragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArbitragePolicy::Reject => write!(f, "reject"),
            ArbitragePolicy::Warn => write!(f, "warn"),
        }
    }
}

impl FromStr for ArbitragePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(ArbitragePolicy::Reject),
            "warn" => Ok(ArbitragePolicy::Warn),
            other => Err(Error::InvalidParameter(format!(
                "unknown arbitrage policy '{other}' (expected 'reject' or 'warn')"
            ))),
        }
    }
}

/// Conventions applied on top of the raw inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelConventions {
    /// Growth / discounting convention, shared by every pricer.
    pub compounding: Compounding,
    /// Handling of an up probability outside `[0, 1]`.
    pub arbitrage_policy: ArbitragePolicy,
}

/// Raw inputs of a CRR run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrrInputs {
    /// Number of discrete periods `N`.
    pub step_count: Size,
    /// Spot price `s0`.
    pub initial_price: Price,
    /// Strike `K`.
    pub strike: Price,
    /// Time to maturity `T` in years.
    pub maturity: Time,
    /// Risk-free rate `r`.
    pub risk_free_rate: Rate,
    /// Volatility `σ`.
    pub volatility: Volatility,
}

/// Immutable CRR model parameters, threaded through every pricer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrrParameters {
    inputs: CrrInputs,
    conventions: ModelConventions,
    step_size: Time,
    up_factor: Real,
    down_factor: Real,
    growth_factor: Real,
    up_probability: Probability,
}

impl CrrParameters {
    /// Largest step count accepted by [`derive`](Self::derive).
    pub const MAX_STEPS: Size = BinomialLattice::MAX_STEPS;

    /// Largest step count accepted when `q ∉ [0, 1]` under
    /// [`ArbitragePolicy::Warn`]; beyond it the signed node weights overflow.
    pub const MAX_UNCHECKED_STEPS: Size = 1_020;

    /// Validate `inputs` and derive `U`, `D`, `g`, and `q`.
    ///
    /// # Errors
    /// * [`Error::InvalidParameter`] if `step_count` is `0` or above
    ///   [`MAX_STEPS`](Self::MAX_STEPS), if `s0` or `K` is
    ///   not strictly positive, if `T` or `σ` is negative, if any input is not
    ///   finite, if `U == D` (zero volatility or zero maturity), or if the
    ///   one-step growth factor is not positive. Also if `q ∉ [0, 1]` under
    ///   [`ArbitragePolicy::Warn`] with more than
    ///   [`MAX_UNCHECKED_STEPS`](Self::MAX_UNCHECKED_STEPS) steps.
    /// * [`Error::ArbitrageViolation`] if `q ∉ [0, 1]` and the policy is
    ///   [`ArbitragePolicy::Reject`].
    pub fn derive(inputs: CrrInputs, conventions: ModelConventions) -> Result<Self> {
        let CrrInputs {
            step_count,
            initial_price,
            strike,
            maturity,
            risk_free_rate,
            volatility,
        } = inputs;

        ensure!(step_count > 0, "step count must be at least 1, got 0");
        ensure!(
            step_count <= Self::MAX_STEPS,
            "step count must be at most {}, got {step_count}",
            Self::MAX_STEPS
        );
        ensure!(
            initial_price.is_finite() && initial_price > 0.0,
            "initial price must be positive and finite, got {initial_price}"
        );
        ensure!(
            strike.is_finite() && strike > 0.0,
            "strike must be positive and finite, got {strike}"
        );
        ensure!(
            maturity.is_finite() && maturity >= 0.0,
            "maturity must be non-negative and finite, got {maturity}"
        );
        ensure!(
            risk_free_rate.is_finite(),
            "risk-free rate must be finite, got {risk_free_rate}"
        );
        ensure!(
            volatility.is_finite() && volatility >= 0.0,
            "volatility must be non-negative and finite, got {volatility}"
        );

        let step_size = maturity / step_count as Real;
        let up_factor = (volatility * step_size.sqrt()).exp();
        let down_factor = 1.0 / up_factor;
        ensure!(
            up_factor != down_factor,
            "up factor equals down factor ({up_factor}); volatility and maturity must both be positive"
        );

        let growth_factor = conventions
            .compounding
            .growth_factor(risk_free_rate, step_size);
        ensure!(
            growth_factor.is_finite() && growth_factor > 0.0,
            "one-step growth factor must be positive, got {growth_factor}"
        );

        let up_probability = (growth_factor - down_factor) / (up_factor - down_factor);

        tracing::debug!(
            step_count,
            step_size,
            up_factor,
            down_factor,
            growth_factor,
            up_probability,
            compounding = %conventions.compounding,
            "derived CRR parameters"
        );

        if !(0.0..=1.0).contains(&up_probability) {
            match conventions.arbitrage_policy {
                ArbitragePolicy::Reject => {
                    return Err(Error::ArbitrageViolation {
                        up_probability,
                        down_factor,
                        growth_factor,
                        up_factor,
                    });
                }
                ArbitragePolicy::Warn => {
                    ensure!(
                        step_count <= Self::MAX_UNCHECKED_STEPS,
                        "up probability {up_probability} is outside [0, 1]; at most {} steps \
                         are supported in that case, got {step_count}",
                        Self::MAX_UNCHECKED_STEPS
                    );
                    tracing::warn!(
                        up_probability,
                        down_factor,
                        growth_factor,
                        up_factor,
                        "no-arbitrage condition D < g < U violated; price is not economically meaningful"
                    );
                }
            }
        }

        Ok(Self {
            inputs,
            conventions,
            step_size,
            up_factor,
            down_factor,
            growth_factor,
            up_probability,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// The raw inputs.
    pub fn inputs(&self) -> &CrrInputs {
        &self.inputs
    }

    /// The conventions used for the derivation.
    pub fn conventions(&self) -> ModelConventions {
        self.conventions
    }

    /// Number of steps `N`.
    pub fn step_count(&self) -> Size {
        self.inputs.step_count
    }

    /// Spot price `s0`.
    pub fn initial_price(&self) -> Price {
        self.inputs.initial_price
    }

    /// Strike `K`.
    pub fn strike(&self) -> Price {
        self.inputs.strike
    }

    /// Time to maturity `T`.
    pub fn maturity(&self) -> Time {
        self.inputs.maturity
    }

    /// Risk-free rate `r`.
    pub fn risk_free_rate(&self) -> Rate {
        self.inputs.risk_free_rate
    }

    /// Volatility `σ`.
    pub fn volatility(&self) -> Volatility {
        self.inputs.volatility
    }

    /// `dt = T / N`.
    pub fn step_size(&self) -> Time {
        self.step_size
    }

    /// `U = exp(σ √dt)`.
    pub fn up_factor(&self) -> Real {
        self.up_factor
    }

    /// `D = 1 / U`.
    pub fn down_factor(&self) -> Real {
        self.down_factor
    }

    /// One-step risk-free growth factor `g`.
    pub fn growth_factor(&self) -> Real {
        self.growth_factor
    }

    /// Risk-neutral up probability `q`.
    pub fn up_probability(&self) -> Probability {
        self.up_probability
    }

    /// `1 − q`.
    pub fn down_probability(&self) -> Probability {
        1.0 - self.up_probability
    }

    /// Whether `D ≤ g ≤ U`, i.e. `q ∈ [0, 1]`.
    pub fn is_arbitrage_free(&self) -> bool {
        (0.0..=1.0).contains(&self.up_probability)
    }

    /// Per-step discount factor `1 / g`.
    pub fn step_discount(&self) -> DiscountFactor {
        self.conventions
            .compounding
            .discount_factor(self.inputs.risk_free_rate, self.step_size)
    }

    /// Discount factor from maturity back to today, `g^(−N)`.
    pub fn terminal_discount(&self) -> DiscountFactor {
        self.conventions.compounding.compounded_discount(
            self.inputs.risk_free_rate,
            self.step_size,
            self.inputs.step_count,
        )
    }

    /// Stock price at maturity after `up_moves` up-moves out of `N`.
    pub fn terminal_price(&self, up_moves: Size) -> Price {
        let down_moves = self.inputs.step_count.saturating_sub(up_moves);
        self.inputs.initial_price
            * self.up_factor.powi(up_moves as i32)
            * self.down_factor.powi(down_moves as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn inputs(step_count: Size, r: Rate, v: Volatility) -> CrrInputs {
        CrrInputs {
            step_count,
            initial_price: 100.0,
            strike: 100.0,
            maturity: 1.0,
            risk_free_rate: r,
            volatility: v,
        }
    }

    #[test]
    fn twenty_step_reference_parameters() {
        let p = CrrParameters::derive(inputs(20, 0.05, 0.20), ModelConventions::default()).unwrap();
        assert_abs_diff_eq!(p.step_size(), 0.05, epsilon = 1e-15);
        assert_abs_diff_eq!(p.up_factor(), 1.045_736_434_838_406_8, epsilon = 1e-12);
        assert_abs_diff_eq!(p.down_factor(), 0.956_263_898_517_149_5, epsilon = 1e-12);
        assert_abs_diff_eq!(p.up_probability(), 0.516_798_014_114_862_1, epsilon = 1e-12);
        assert!(p.is_arbitrage_free());
    }

    #[test]
    fn one_step_zero_rate_parameters() {
        let p = CrrParameters::derive(inputs(1, 0.0, 0.20), ModelConventions::default()).unwrap();
        assert_abs_diff_eq!(p.up_factor(), 1.221_402_758_160_17, epsilon = 1e-12);
        assert_abs_diff_eq!(p.down_factor(), 0.818_730_753_077_981_8, epsilon = 1e-12);
        assert_abs_diff_eq!(p.up_probability(), 0.450_166_002_687_522_1, epsilon = 1e-12);
        assert_eq!(p.step_discount(), 1.0);
    }

    #[test]
    fn down_factor_is_reciprocal_of_up_factor() {
        let p = CrrParameters::derive(inputs(7, 0.03, 0.35), ModelConventions::default()).unwrap();
        assert_abs_diff_eq!(p.up_factor() * p.down_factor(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p.up_probability() + p.down_probability(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn simple_compounding_uses_linear_growth() {
        let conventions = ModelConventions {
            compounding: Compounding::Simple,
            ..Default::default()
        };
        let p = CrrParameters::derive(inputs(20, 0.05, 0.20), conventions).unwrap();
        assert_abs_diff_eq!(p.growth_factor(), 1.0025, epsilon = 1e-15);
        assert_abs_diff_eq!(p.step_discount(), 1.0 / 1.0025, epsilon = 1e-15);
        assert_abs_diff_eq!(p.terminal_discount(), 1.0025_f64.powi(-20), epsilon = 1e-14);
    }

    #[test]
    fn terminal_discount_is_exp_minus_rt() {
        let p = CrrParameters::derive(inputs(20, 0.05, 0.20), ModelConventions::default()).unwrap();
        assert_abs_diff_eq!(p.terminal_discount(), (-0.05_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn terminal_prices_recombine() {
        let p = CrrParameters::derive(inputs(4, 0.05, 0.20), ModelConventions::default()).unwrap();
        assert_abs_diff_eq!(p.terminal_price(2), 100.0, epsilon = 1e-12);
        assert!(p.terminal_price(4) > p.terminal_price(3));
    }

    #[test]
    fn zero_steps_is_invalid() {
        let err = CrrParameters::derive(inputs(0, 0.05, 0.20), ModelConventions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)), "{err}");
    }

    #[test]
    fn zero_volatility_is_invalid() {
        let err = CrrParameters::derive(inputs(10, 0.05, 0.0), ModelConventions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(ref m) if m.contains("up factor")), "{err}");
    }

    #[test]
    fn zero_maturity_is_invalid() {
        let mut i = inputs(10, 0.05, 0.20);
        i.maturity = 0.0;
        let err = CrrParameters::derive(i, ModelConventions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)), "{err}");
    }

    #[test]
    fn out_of_domain_inputs_are_invalid() {
        let base = inputs(10, 0.05, 0.20);
        let bad = [
            CrrInputs { initial_price: 0.0, ..base },
            CrrInputs { strike: -1.0, ..base },
            CrrInputs { maturity: -0.5, ..base },
            CrrInputs { volatility: -0.2, ..base },
            CrrInputs { risk_free_rate: Real::NAN, ..base },
            CrrInputs { initial_price: Real::INFINITY, ..base },
        ];
        for b in bad {
            assert!(
                matches!(
                    CrrParameters::derive(b, ModelConventions::default()),
                    Err(Error::InvalidParameter(_))
                ),
                "{b:?} should be rejected"
            );
        }
    }

    #[test]
    fn high_rate_violates_no_arbitrage() {
        // g = exp(0.5) > U = exp(0.1)
        let err = CrrParameters::derive(inputs(1, 0.5, 0.10), ModelConventions::default())
            .unwrap_err();
        match err {
            Error::ArbitrageViolation {
                up_probability,
                growth_factor,
                up_factor,
                ..
            } => {
                assert!(up_probability > 1.0);
                assert!(growth_factor > up_factor);
            }
            other => panic!("expected arbitrage violation, got {other}"),
        }
    }

    #[test]
    fn warn_policy_keeps_out_of_range_probability() {
        let conventions = ModelConventions {
            arbitrage_policy: ArbitragePolicy::Warn,
            ..Default::default()
        };
        let p = CrrParameters::derive(inputs(1, 0.5, 0.10), conventions).unwrap();
        assert!(!p.is_arbitrage_free());
        assert!(p.up_probability() > 1.0);
    }

    #[test]
    fn step_count_is_capped() {
        for n in [CrrParameters::MAX_STEPS + 1, (1usize << 32) + 4, usize::MAX] {
            let err = CrrParameters::derive(inputs(n, 0.05, 0.20), ModelConventions::default())
                .unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(ref m) if m.contains("at most")), "{err}");
        }
        let p = CrrParameters::derive(
            inputs(CrrParameters::MAX_STEPS, 0.05, 0.20),
            ModelConventions::default(),
        )
        .unwrap();
        // s0 · U^N = s0 · exp(σ √N) when T = 1
        let top = p.terminal_price(CrrParameters::MAX_STEPS);
        let expected = 100.0_f64.ln() + 0.20 * (CrrParameters::MAX_STEPS as Real).sqrt();
        assert_abs_diff_eq!(top.ln(), expected, epsilon = 1e-9);
    }

    #[test]
    fn warn_policy_caps_steps_when_probability_is_out_of_range() {
        let conventions = ModelConventions {
            arbitrage_policy: ArbitragePolicy::Warn,
            ..Default::default()
        };
        // r = 0.5, σ = 0.01: g exceeds U at every N
        let err = CrrParameters::derive(inputs(1_021, 0.5, 0.01), conventions).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(ref m) if m.contains("outside [0, 1]")), "{err}");
        assert!(CrrParameters::derive(inputs(1_020, 0.5, 0.01), conventions).is_ok());
        // a proper probability is not limited by the warn cap
        assert!(CrrParameters::derive(inputs(2_000, 0.05, 0.20), conventions).is_ok());
    }

    #[test]
    fn simple_growth_must_be_positive() {
        let conventions = ModelConventions {
            compounding: Compounding::Simple,
            arbitrage_policy: ArbitragePolicy::Warn,
        };
        let err = CrrParameters::derive(inputs(1, -2.0, 0.20), conventions).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)), "{err}");
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("warn".parse::<ArbitragePolicy>(), Ok(ArbitragePolicy::Warn));
        assert_eq!("Reject".parse::<ArbitragePolicy>(), Ok(ArbitragePolicy::Reject));
        assert!("ignore".parse::<ArbitragePolicy>().is_err());
    }
}
