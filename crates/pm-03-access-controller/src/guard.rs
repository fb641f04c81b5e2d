//! # Reentrancy Guard
//!
//! Token held for the duration of a mutating operation. A second
//! acquisition while the token is alive fails.

use crate::errors::ControllerError;
use std::cell::Cell;

/// Held while a mutating operation is in flight; clears the flag on drop.
#[must_use = "the guard releases as soon as it is dropped"]
pub struct ReentrancyGuard<'a> {
    entered: &'a Cell<bool>,
}

impl<'a> ReentrancyGuard<'a> {
    /// Set the flag, or fail with `Reentrant` if it is already set.
    pub fn acquire(entered: &'a Cell<bool>) -> Result<Self, ControllerError> {
        if entered.replace(true) {
            return Err(ControllerError::Reentrant);
        }
        Ok(Self { entered })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.entered.set(false);
    }
}
