//! # crr-methods
//!
//! Cox-Ross-Rubinstein tree construction and backward induction.
//!
//! # Modules
//!
//! * [`lattice`]: parameter derivation, recombining lattice, path tree, and
//!   backward-induction pricing

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: CRR parameters, binomial lattice, path tree, backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    price_european, price_european_path_tree, ArbitragePolicy, BinomialLattice, CrrInputs,
    CrrParameters, ModelConventions, PathNode, PathTree, TreeMode,
};
