//! Non-recombining path tree.
//!
//! Every path through the model gets its own node, so an `N`-step tree holds
//! `2^(N+1) − 1` nodes even though only `N + 1` terminal prices are distinct.
//! It exists to cross-check [`BinomialLattice`](super::BinomialLattice) and
//! is capped at [`PathTree::MAX_STEPS`].
//!
//! Construction is breadth-first: each frontier node gets an up child then a
//! down child, and the next frontier is those children in parent order. With
//! the root at index 0 this places the up child of node `i` at `2i + 1` and
//! the down child at `2i + 2`.

use crr_core::{ensure, errors::Result, Price, Real, Size};

/// A node of a [`PathTree`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    /// Stock price at this node.
    pub stock_price: Price,
    /// Option value, set by backward induction.
    pub option_value: Option<Real>,
    /// Number of steps from the root.
    pub depth: Size,
    /// Number of up-moves on the path from the root.
    pub up_moves: Size,
}

/// A full binary tree of stock-price paths, stored as a BFS arena.
#[derive(Debug, Clone)]
pub struct PathTree {
    steps: Size,
    nodes: Vec<PathNode>,
}

impl PathTree {
    /// Largest supported step count.
    ///
    /// `2^21 − 1` nodes of 40 bytes each: about 84 MB at the cap.
    pub const MAX_STEPS: Size = 20;

    /// Build the tree of every `steps`-long path starting at `initial_price`.
    ///
    /// `steps = 0` gives a lone root, which is also a leaf.
    pub fn build(initial_price: Price, up_factor: Real, down_factor: Real, steps: Size) -> Result<Self> {
        ensure!(
            steps <= Self::MAX_STEPS,
            "path tree supports at most {} steps, got {steps}; use the recombining lattice",
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

        let node_count = (1usize << (steps + 1)) - 1;
        let mut nodes = Vec::with_capacity(node_count);
        nodes.push(PathNode {
            stock_price: initial_price,
            option_value: None,
            depth: 0,
            up_moves: 0,
        });

        let mut frontier = 0..1;
        for depth in 1..=steps {
            let start = nodes.len();
            for parent in frontier.clone() {
                let PathNode {
                    stock_price,
                    up_moves,
                    ..
                } = nodes[parent];
                nodes.push(PathNode {
                    stock_price: stock_price * up_factor,
                    option_value: None,
                    depth,
                    up_moves: up_moves + 1,
                });
                nodes.push(PathNode {
                    stock_price: stock_price * down_factor,
                    option_value: None,
                    depth,
                    up_moves,
                });
            }
            frontier = start..nodes.len();
        }

        tracing::debug!(steps, node_count = nodes.len(), "built path tree");

        Ok(Self { steps, nodes })
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> Size {
        self.nodes.len()
    }

    /// The root node.
    pub fn root(&self) -> &PathNode {
        &self.nodes[0]
    }

    /// Node at arena index `index`.
    pub fn node(&self, index: Size) -> Option<&PathNode> {
        self.nodes.get(index)
    }

    /// Arena indices of the `(up, down)` children, or `None` for a leaf.
    pub fn children(&self, index: Size) -> Option<(Size, Size)> {
        let up = 2 * index + 1;
        (up < self.nodes.len()).then_some((up, up + 1))
    }

    /// The terminal nodes, in BFS order.
    pub fn leaves(&self) -> &[PathNode] {
        &self.nodes[(1usize << self.steps) - 1..]
    }

    /// Every node, in BFS order.
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [PathNode] {
        &mut self.nodes
    }
}
