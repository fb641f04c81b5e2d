//! # Replay Set
//!
//! Signatures that have already authorized a grant, keyed on
//! [`RawSignature::replay_key`] so the 0/1 and 27/28 spellings of one
//! recovery id count as the same signature. Entries go absent -> present
//! once and are never deleted; `rollback` only undoes an `insert` made by an
//! operation that then failed, so no completed operation is ever reverted.

use super::entities::RawSignature;
use std::collections::HashSet;

/// Set of consumed signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySet {
    used: HashSet<RawSignature>,
}

impl ReplaySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `signature`, in any recovery-id spelling, has been consumed.
    #[must_use]
    pub fn contains(&self, signature: &RawSignature) -> bool {
        self.used.contains(&signature.replay_key())
    }

    /// Mark `signature` as consumed.
    ///
    /// Returns `false` if it was already present; the set is unchanged.
    pub fn insert(&mut self, signature: &RawSignature) -> bool {
        self.used.insert(signature.replay_key())
    }

    /// Undo an `insert` made by the failing operation in flight.
    ///
    /// Returns `false` if the signature was not present.
    pub fn rollback(&mut self, signature: &RawSignature) -> bool {
        self.used.remove(&signature.replay_key())
    }

    /// Number of consumed signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// True if nothing has been consumed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
