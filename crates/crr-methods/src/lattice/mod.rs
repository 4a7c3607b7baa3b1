//! Lattice methods for European option pricing.
//!
//! # Overview
//!
//! * [`CrrParameters`]: validated Cox-Ross-Rubinstein factors and probability
//! * [`BinomialLattice`]: recombining lattice, `O(N²)` nodes
//! * [`PathTree`]: one node per path, `O(2^N)` nodes, for cross-checking
//! * [`price_european`] / [`price_european_path_tree`]: backward induction

pub mod binomial_lattice;
pub mod parameters;
pub mod path_tree;

pub use binomial_lattice::BinomialLattice;
pub use parameters::{ArbitragePolicy, CrrInputs, CrrParameters, ModelConventions};
pub use path_tree::{PathNode, PathTree};

use std::fmt;
use std::str::FromStr;

use crr_core::{errors::Error, DiscountFactor, Probability, Real};

// ─── TreeMode ─────────────────────────────────────────────────────────────────

/// Which tree structure the backward pricer walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TreeMode {
    /// Recombining [`BinomialLattice`].
    #[default]
    Lattice,
    /// Non-recombining [`PathTree`], limited to [`PathTree::MAX_STEPS`].
    #[cfg_attr(feature = "serde", serde(rename = "path"))]
    PathTree,
}

impl fmt::Display for TreeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeMode::Lattice => write!(f, "lattice"),
            TreeMode::PathTree => write!(f, "path"),
        }
    }
}

impl FromStr for TreeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lattice" => Ok(TreeMode::Lattice),
            "path" | "path-tree" | "pathtree" => Ok(TreeMode::PathTree),
            other => Err(Error::InvalidParameter(format!(
                "unknown tree mode '{other}' (expected 'lattice' or 'path')"
            ))),
        }
    }
}

// ─── Backward-induction pricing ───────────────────────────────────────────────

/// Price a European option by backward induction on a recombining lattice.
///
/// Every node's option value is filled in and stays readable through
/// [`BinomialLattice::option_value`].
///
/// # Arguments
/// * `lattice`: the lattice (already constructed)
/// * `payoff`: payoff function `S → value` (e.g. `|s| (s - K).max(0.0)`)
/// * `discount`: per-step discount factor, `1 / g`
/// * `up_probability`: risk-neutral `q`
pub fn price_european(
    lattice: &mut BinomialLattice,
    payoff: &dyn Fn(Real) -> Real,
    discount: DiscountFactor,
    up_probability: Probability,
) -> Real {
    let n = lattice.steps();
    let (pu, pd) = (up_probability, 1.0 - up_probability);
    lattice.clear_option_values();

    // Terminal values at maturity
    let mut values: Vec<Real> = (0..lattice.size(n))
        .map(|j| payoff(lattice.underlying(n, j)))
        .collect();
    for (j, &v) in values.iter().enumerate() {
        lattice.set_option_value(n, j, v);
    }

    // Roll back through the lattice; values[j] only reads j and j + 1
    for i in (0..n).rev() {
        for j in 0..lattice.size(i) {
            let d_up = lattice.descendant(i, j, 1);
            let d_down = lattice.descendant(i, j, 0);
            values[j] = discount * (pu * values[d_up] + pd * values[d_down]);
            lattice.set_option_value(i, j, values[j]);
        }
    }

    values[0]
}

/// Price a European option by backward induction on a path tree.
///
/// Post-order: both children are valued before their parent, and each node
/// is valued exactly once. Arguments as for [`price_european`].
pub fn price_european_path_tree(
    tree: &mut PathTree,
    payoff: &dyn Fn(Real) -> Real,
    discount: DiscountFactor,
    up_probability: Probability,
) -> Real {
    let nodes = tree.nodes_mut();
    nodes.iter_mut().for_each(|n| n.option_value = None);
    roll_back(nodes, 0, payoff, discount, up_probability)
}

fn roll_back(
    nodes: &mut [PathNode],
    index: usize,
    payoff: &dyn Fn(Real) -> Real,
    discount: DiscountFactor,
    q: Probability,
) -> Real {
    if let Some(v) = nodes[index].option_value {
        return v;
    }
    let up = 2 * index + 1;
    let value = if up < nodes.len() {
        let up_value = roll_back(nodes, up, payoff, discount, q);
        let down_value = roll_back(nodes, up + 1, payoff, discount, q);
        discount * (q * up_value + (1.0 - q) * down_value)
    } else {
        payoff(nodes[index].stock_price)
    };
    nodes[index].option_value = Some(value);
    value
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn call(k: Real) -> impl Fn(Real) -> Real {
        move |s| (s - k).max(0.0)
    }

    #[test]
    fn one_step_lattice_by_hand() {
        let (u, d) = (1.2_f64, 0.8_f64);
        let q = 0.6;
        let disc = 0.95;
        let mut l = BinomialLattice::new(100.0, u, d, 1).unwrap();
        let price = price_european(&mut l, &call(100.0), disc, q);
        // leaves 20 and 0
        assert_abs_diff_eq!(price, 0.95 * 0.6 * 20.0, epsilon = 1e-12);
        assert_eq!(l.option_value(1, 0), Some(0.0));
        assert_abs_diff_eq!(l.option_value(1, 1).unwrap(), 20.0, epsilon = 1e-12);
        assert_eq!(l.option_value(0, 0), Some(price));
    }

    #[test]
    fn zero_step_structures_return_immediate_payoff() {
        let mut l = BinomialLattice::new(110.0, 1.1, 1.0 / 1.1, 0).unwrap();
        assert_eq!(price_european(&mut l, &call(100.0), 0.5, 0.5), 10.0);
        let mut t = PathTree::build(110.0, 1.1, 1.0 / 1.1, 0).unwrap();
        assert_eq!(price_european_path_tree(&mut t, &call(100.0), 0.5, 0.5), 10.0);
    }

    #[test]
    fn path_tree_matches_lattice() {
        let u = 1.05_f64;
        let (d, q, disc) = (1.0 / u, 0.52, 0.997);
        for n in [1, 2, 5, 10] {
            let mut l = BinomialLattice::new(100.0, u, d, n).unwrap();
            let mut t = PathTree::build(100.0, u, d, n).unwrap();
            let a = price_european(&mut l, &call(98.0), disc, q);
            let b = price_european_path_tree(&mut t, &call(98.0), disc, q);
            assert_relative_eq!(a, b, max_relative = 1e-12);
        }
    }

    #[test]
    fn every_path_node_is_valued() {
        let mut t = PathTree::build(100.0, 1.1, 1.0 / 1.1, 4).unwrap();
        let price = price_european_path_tree(&mut t, &call(100.0), 0.99, 0.5);
        assert!(t.nodes().iter().all(|n| n.option_value.is_some()));
        assert_eq!(t.root().option_value, Some(price));
    }

    #[test]
    fn repricing_overwrites_previous_values() {
        let mut l = BinomialLattice::new(100.0, 1.1, 1.0 / 1.1, 3).unwrap();
        let first = price_european(&mut l, &call(100.0), 0.99, 0.5);
        let second = price_european(&mut l, &call(90.0), 0.99, 0.5);
        assert!(second > first);
        assert_eq!(l.option_value(0, 0), Some(second));
    }

    #[test]
    fn out_of_range_probability_still_evaluates() {
        let mut l = BinomialLattice::new(100.0, 1.1, 1.0 / 1.1, 3).unwrap();
        let price = price_european(&mut l, &call(100.0), 0.9, 1.4);
        assert!(price.is_finite());
    }

    #[test]
    fn tree_mode_parsing_and_display() {
        assert_eq!("path".parse::<TreeMode>(), Ok(TreeMode::PathTree));
        assert_eq!("Lattice".parse::<TreeMode>(), Ok(TreeMode::Lattice));
        assert!("trinomial".parse::<TreeMode>().is_err());
        assert_eq!(TreeMode::PathTree.to_string(), "path");
        assert_eq!(TreeMode::default(), TreeMode::Lattice);
    }
}
