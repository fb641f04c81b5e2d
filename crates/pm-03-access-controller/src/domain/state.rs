//! # Controller State
//!
//! Every piece of mutable controller state in one value. Failed operations
//! undo their own writes; cloning the whole value is for inspection only.

use super::mint_ledger::MintLedger;
use super::phase::{Phase, PhaseGate};
use super::vesting::VestingLedger;
use crate::config::ControllerConfig;
use pm_02_signature_authorization::ReplaySet;
use shared_types::Address;

/// Mutable controller state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerState {
    /// Privileged principal.
    pub owner: Address,
    /// Active phase and allow-list roots.
    pub phase_gate: PhaseGate,
    /// One-grant-per-principal flags.
    pub mint_ledger: MintLedger,
    /// Consumed authorization signatures.
    pub replay_set: ReplaySet,
    /// Collected fee balance and release schedule.
    pub vesting: VestingLedger,
}

impl ControllerState {
    /// Initial state from configuration.
    #[must_use]
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            owner: config.owner,
            phase_gate: PhaseGate::new(config.initial_phase, config.phase1_root, config.phase2_root),
            mint_ledger: MintLedger::new(),
            replay_set: ReplaySet::new(),
            vesting: VestingLedger::new(config.vesting_duration_secs),
        }
    }

    /// The active phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase_gate.current()
    }
}
