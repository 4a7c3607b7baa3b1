//! Recombining binomial lattice.
//!
//! Layer `i` holds `i + 1` nodes; node `(i, j)` is reached by `j` up-moves
//! and `i − j` down-moves, so its price is `s0 · U^j · D^(i−j)`. Because
//! `U · D = 1` in the CRR model, up-then-down and down-then-up land on the
//! same node and the whole lattice has `(N+1)(N+2)/2` nodes.
//!
//! Nodes live in a single arena laid out layer by layer; `(i, j)` sits at
//! offset `i(i+1)/2 + j`.

use crr_core::{ensure, errors::Result, Price, Real, Size};

/// A recombining CRR lattice with an option-value slot per node.
#[derive(Debug, Clone)]
pub struct BinomialLattice {
    steps: Size,
    up_factor: Real,
    down_factor: Real,
    stock_prices: Vec<Price>,
    option_values: Vec<Option<Real>>,
}

impl BinomialLattice {
    /// Largest supported step count.
    ///
    /// `(N+1)(N+2)/2` nodes at 24 bytes each: about 300 MB at the cap.
    pub const MAX_STEPS: Size = 5_000;

    /// Build a lattice of `steps` periods rooted at `initial_price`.
    ///
    /// `steps = 0` gives a single node.
    pub fn new(initial_price: Price, up_factor: Real, down_factor: Real, steps: Size) -> Result<Self> {
        ensure!(
            steps <= Self::MAX_STEPS,
            "lattice supports at most {} steps, got {steps}",
            Self::MAX_STEPS
        );
        ensure!(
            initial_price.is_finite() && initial_price > 0.0,
            "initial price must be positive and finite, got {initial_price}"
        );
        ensure!(
            up_factor.is_finite() && up_factor > 0.0,
            "up factor must be positive and finite, got {up_factor}"
        );
        ensure!(
            down_factor.is_finite() && down_factor > 0.0,
            "down factor must be positive and finite, got {down_factor}"
        );

        let node_count = (steps + 1) * (steps + 2) / 2;
        let mut stock_prices = Vec::with_capacity(node_count);
        for i in 0..=steps {
            for j in 0..=i {
                stock_prices.push(
                    initial_price * up_factor.powi(j as i32) * down_factor.powi((i - j) as i32),
                );
            }
        }

        tracing::debug!(steps, node_count, "built binomial lattice");

        Ok(Self {
            steps,
            up_factor,
            down_factor,
            stock_prices,
            option_values: vec![None; node_count],
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Multiplicative up move.
    pub fn up_factor(&self) -> Real {
        self.up_factor
    }

    /// Multiplicative down move.
    pub fn down_factor(&self) -> Real {
        self.down_factor
    }

    /// Number of nodes at layer `i` (always `i + 1`).
    pub fn size(&self, i: Size) -> Size {
        i + 1
    }

    /// Index of the descendant at layer `i + 1`.
    ///
    /// `branch = 0` → down, `branch = 1` → up.
    pub fn descendant(&self, _i: Size, index: Size, branch: Size) -> Size {
        index + branch
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> Size {
        self.stock_prices.len()
    }

    /// Stock price at node `(i, j)`.
    pub fn underlying(&self, i: Size, j: Size) -> Price {
        self.stock_prices[Self::offset(i, j)]
    }

    /// Option value at node `(i, j)`, once backward induction has reached it.
    pub fn option_value(&self, i: Size, j: Size) -> Option<Real> {
        self.option_values[Self::offset(i, j)]
    }

    /// Stock prices at maturity, lowest first.
    pub fn terminal_prices(&self) -> &[Price] {
        &self.stock_prices[Self::offset(self.steps, 0)..]
    }

    pub(crate) fn set_option_value(&mut self, i: Size, j: Size, value: Real) {
        self.option_values[Self::offset(i, j)] = Some(value);
    }

    pub(crate) fn clear_option_values(&mut self) {
        self.option_values.iter_mut().for_each(|v| *v = None);
    }

    fn offset(i: Size, j: Size) -> Size {
        debug_assert!(j <= i, "node ({i}, {j}) is outside the lattice");
        i * (i + 1) / 2 + j
    }
}
