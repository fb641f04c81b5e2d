//! # Domain Layer
//!
//! Pure controller logic: phase gating, grant bookkeeping and vesting
//! arithmetic. No collaborator calls happen here.

pub mod mint_ledger;
pub mod phase;
pub mod state;
pub mod vesting;

pub use mint_ledger::MintLedger;
pub use phase::{Phase, PhaseGate};
pub use state::ControllerState;
pub use vesting::{VestingLedger, VestingState, DEFAULT_VESTING_DURATION_SECS};

/// Identifier of an issued item. Assigned as `total_supply + 1`, starting at 1.
pub type ItemId = u64;
