//! # Mint Ledger
//!
//! Per-principal "has minted" flag. At most one grant per principal across
//! all phases; a flag set by a completed operation is never cleared.

use crate::errors::ControllerError;
use shared_types::Address;
use std::collections::HashSet;

/// Principals that have received their one grant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MintLedger {
    minted: HashSet<Address>,
}

impl MintLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `principal` has already been granted an item.
    #[must_use]
    pub fn has_minted(&self, principal: &Address) -> bool {
        self.minted.contains(principal)
    }

    /// Fail with `AlreadyGranted` if `principal` has minted.
    ///
    /// # Errors
    ///
    /// `ControllerError::AlreadyGranted`.
    pub fn ensure_not_granted(&self, principal: &Address) -> Result<(), ControllerError> {
        if self.has_minted(principal) {
            return Err(ControllerError::AlreadyGranted(*principal));
        }
        Ok(())
    }

    /// Set the flag. Returns `false` if it was already set.
    pub fn record(&mut self, principal: Address) -> bool {
        self.minted.insert(principal)
    }

    /// Clear a flag set by the failing operation in flight.
    pub(crate) fn rollback(&mut self, principal: &Address) -> bool {
        self.minted.remove(principal)
    }

    /// Number of principals that have minted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.minted.len()
    }

    /// True if no one has minted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.minted.is_empty()
    }
}
