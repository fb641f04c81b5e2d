//! # Domain Errors
//!
//! Misuse of the tree builder. Verification itself never fails; it returns
//! `false` on mismatch.

use thiserror::Error;

/// Hash tree builder errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HashTreeError {
    /// Fewer than two leaves were supplied.
    #[error("Degenerate input: {leaves} leaves, at least 2 required")]
    DegenerateInput {
        /// Number of leaves supplied
        leaves: usize,
    },

    /// Proof requested for a leaf index past the end of the list.
    #[error("Leaf index out of range: {index} >= {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of leaves
        len: usize,
    },
}
