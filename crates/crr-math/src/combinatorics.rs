//! Binomial coefficients and terminal-node weights.
//!
//! Naive factorial ratios overflow an `f64` once `n! > 1.8·10³⁰⁸`, i.e. for
//! `n > 170`. [`binomial_coefficient`] uses the multiplicative formula
//! instead and stays finite up to [`MAX_DIRECT_TRIALS`]; genuine
//! probabilities go through [`BinomialDistribution`], which works in log
//! space for any `n`.

use crr_core::{ensure, errors::Result, Probability, Real};

use crate::distributions::BinomialDistribution;

/// Largest `n` for which [`binomial_coefficient`] is finite for every `k`.
pub const MAX_DIRECT_TRIALS: u64 = 1_020;

/// `C(n, k)` by the multiplicative formula `∏ (n − k + i) / i`, `i = 1..=k`.
///
/// Exact for results below 2⁵³, finite for every `k` while `n ≤ 1020`.
/// Returns `0.0` for `k > n`.
pub fn binomial_coefficient(n: u64, k: u64) -> Real {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut c = 1.0;
    for i in 1..=k {
        c = c * (n - k + i) as Real / i as Real;
    }
    c
}

/// Probability weights `C(n, k) · p^k · (1 − p)^(n − k)` of the terminal
/// nodes of an `n`-step binomial tree.
///
/// For `p ∈ [0, 1]` the weights come from [`BinomialDistribution`] (log
/// space, any `n`). An up probability outside `[0, 1]` only arises when the
/// no-arbitrage check is relaxed to a warning; the signed "weights" are then
/// computed directly with [`binomial_coefficient`], which caps `n` at
/// [`MAX_DIRECT_TRIALS`].
#[derive(Debug, Clone)]
pub struct BinomialWeights {
    n: u64,
    p: Probability,
    dist: Option<BinomialDistribution>,
}

impl BinomialWeights {
    /// Weights for `n` steps with up probability `p`.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`](crr_core::errors::Error::InvalidParameter)
    /// if `p` is not finite, or if `p ∉ [0, 1]` and `n > MAX_DIRECT_TRIALS`.
    pub fn new(n: u64, p: Probability) -> Result<Self> {
        ensure!(p.is_finite(), "up probability must be finite, got {p}");
        let dist = BinomialDistribution::new(p, n).ok();
        ensure!(
            dist.is_some() || n <= MAX_DIRECT_TRIALS,
            "up probability {p} is outside [0, 1]; signed weights overflow beyond {MAX_DIRECT_TRIALS} steps, got {n}"
        );
        Ok(Self { n, p, dist })
    }

    /// Weight of the terminal node reached by exactly `k` up-moves.
    pub fn weight(&self, k: u64) -> Real {
        if k > self.n {
            return 0.0;
        }
        match &self.dist {
            Some(d) => d.pmf(k),
            None => {
                // powers first: C(n, k) alone nears f64::MAX at n = 1020
                binomial_coefficient(self.n, k)
                    * (self.p.powf(k as Real) * (1.0 - self.p).powf((self.n - k) as Real))
            }
        }
    }
}
