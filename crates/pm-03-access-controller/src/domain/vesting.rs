//! # Vesting Ledger
//!
//! Accumulates collected fees and releases them to the owner linearly over
//! a fixed duration.
//!
//! ## Release Rule
//!
//! ```text
//! elapsed    = now - start
//! releasable = total                       if elapsed >= duration
//!            = total * elapsed / duration  otherwise (truncating)
//! ```
//!
//! `start` is set by the first deposit and never moves. `total` is the
//! unclaimed balance: deposits add to it, claims subtract exactly the
//! released amount. Because nothing is re-based, deposits made after the
//! window has closed are releasable in full immediately.

use crate::errors::ControllerError;
use serde::{Deserialize, Serialize};
use shared_types::{Timestamp, U256, U512};

/// 365 days in seconds.
pub const DEFAULT_VESTING_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Observable vesting state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingState {
    /// Unclaimed collected fees.
    pub total_vested_amount: U256,
    /// Time of the first fee ever collected.
    pub vesting_start_time: Option<Timestamp>,
    /// Length of the release window in seconds.
    pub duration_secs: u64,
}

/// Linear vesting over collected fees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VestingLedger {
    total_vested: U256,
    start_time: Option<Timestamp>,
    duration_secs: u64,
}

impl VestingLedger {
    /// Empty ledger with a fixed window. `duration_secs` must be non-zero;
    /// configuration validation enforces this.
    #[must_use]
    pub fn new(duration_secs: u64) -> Self {
        Self {
            total_vested: U256::zero(),
            start_time: None,
            duration_secs,
        }
    }

    /// Record a collected fee. The first deposit starts the clock.
    pub fn deposit(&mut self, amount: U256, now: Timestamp) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        self.total_vested = self.total_vested.saturating_add(amount);
    }

    /// Amount a claim at `now` would release.
    ///
    /// # Errors
    ///
    /// `VestingNotStarted` before the first deposit.
    pub fn releasable(&self, now: Timestamp) -> Result<U256, ControllerError> {
        let start = self.start_time.ok_or(ControllerError::VestingNotStarted)?;
        let elapsed = now.saturating_sub(start);

        if elapsed >= self.duration_secs {
            return Ok(self.total_vested);
        }

        // 512-bit product keeps the floor exact for any balance
        let scaled = self.total_vested.full_mul(U256::from(elapsed));
        let released = scaled / U512::from(self.duration_secs);
        // elapsed < duration, so the quotient is below total and fits
        Ok(U256::try_from(released).unwrap_or(self.total_vested))
    }

    /// Deduct a released amount. Never goes below zero.
    pub fn release(&mut self, amount: U256) {
        self.total_vested = self.total_vested.saturating_sub(amount);
    }

    /// Unclaimed balance.
    #[must_use]
    pub fn total_vested(&self) -> U256 {
        self.total_vested
    }

    /// Snapshot for callers.
    #[must_use]
    pub fn state(&self) -> VestingState {
        VestingState {
            total_vested_amount: self.total_vested,
            vesting_start_time: self.start_time,
            duration_secs: self.duration_secs,
        }
    }
}
