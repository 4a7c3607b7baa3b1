//! Binomial distribution.
//!
//! Wraps the `statrs` crate's binomial implementation, whose mass function
//! is evaluated in log space (`ln C(n, k) + k ln p + (n − k) ln(1 − p)`) and
//! therefore stays finite for step counts far beyond the factorial range.

use crr_core::{ensure, errors::Result, Probability, Real};
use statrs::distribution::{Binomial, Discrete};

/// Number of up-moves in `n` independent steps, each up with probability `p`.
#[derive(Debug, Clone)]
pub struct BinomialDistribution {
    dist: Binomial,
}

impl BinomialDistribution {
    /// Distribution of up-moves over `n` steps.
    ///
    /// `n = 0` is allowed and describes the point mass at zero.
    ///
    /// # Errors
    /// [`InvalidParameter`](crr_core::Error::InvalidParameter) if `p` is not
    /// in `[0, 1]`.
    pub fn new(p: Probability, n: u64) -> Result<Self> {
        ensure!((0.0..=1.0).contains(&p), "p must be in [0, 1], got {p}");
        let dist = Binomial::new(p, n)
            .map_err(|e| crr_core::Error::InvalidParameter(format!("binomial({p}, {n}): {e}")))?;
        Ok(Self { dist })
    }

    /// `P(X = k)`.
    pub fn pmf(&self, k: u64) -> Real {
        self.dist.pmf(k)
    }
}
