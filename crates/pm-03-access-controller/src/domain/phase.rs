//! # Phase Gate
//!
//! The active access phase and the two allow-list roots.
//!
//! Transitions are total: the owner may move from any phase to any phase,
//! including the current one. No ordering is implied by the variant names.

use crate::errors::ControllerError;
use pm_01_hash_tree::{leaf_for, verify};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash};
use std::fmt;
use std::str::FromStr;

/// Access phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Free mint for the first allow-list.
    #[default]
    Phase1,
    /// Discounted mint for the second allow-list, with an owner signature.
    Phase2,
    /// Open mint at full price.
    Phase3,
}

impl Phase {
    /// All variants.
    pub const ALL: [Phase; 3] = [Phase::Phase1, Phase::Phase2, Phase::Phase3];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Phase1 => "phase1",
            Self::Phase2 => "phase2",
            Self::Phase3 => "phase3",
        };
        f.write_str(name)
    }
}

impl FromStr for Phase {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "phase1" | "phase_1" => Ok(Self::Phase1),
            "2" | "phase2" | "phase_2" => Ok(Self::Phase2),
            "3" | "phase3" | "phase_3" => Ok(Self::Phase3),
            other => Err(ControllerError::UnknownPhase(other.to_string())),
        }
    }
}

/// Current phase plus the allow-list roots for phases 1 and 2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseGate {
    current: Phase,
    phase1_root: Hash,
    phase2_root: Hash,
}

impl PhaseGate {
    /// Create a gate. Roots are fixed for the lifetime of the gate.
    #[must_use]
    pub fn new(initial: Phase, phase1_root: Hash, phase2_root: Hash) -> Self {
        Self {
            current: initial,
            phase1_root,
            phase2_root,
        }
    }

    /// The active phase.
    #[must_use]
    pub fn current(&self) -> Phase {
        self.current
    }

    /// Switch phase, returning the previous one.
    pub fn set(&mut self, phase: Phase) -> Phase {
        std::mem::replace(&mut self.current, phase)
    }

    /// Fail with `PhaseMismatch` unless `required` is active.
    ///
    /// # Errors
    ///
    /// `ControllerError::PhaseMismatch`.
    pub fn require(&self, required: Phase) -> Result<(), ControllerError> {
        if self.current != required {
            return Err(ControllerError::PhaseMismatch {
                required,
                current: self.current,
            });
        }
        Ok(())
    }

    /// Allow-list root for a phase. Phase 3 has none.
    #[must_use]
    pub fn root_for(&self, phase: Phase) -> Option<Hash> {
        match phase {
            Phase::Phase1 => Some(self.phase1_root),
            Phase::Phase2 => Some(self.phase2_root),
            Phase::Phase3 => None,
        }
    }

    /// True if `principal` is proven to be on the allow-list of `phase`.
    #[must_use]
    pub fn verify_membership(&self, phase: Phase, proof: &[Hash], principal: &Address) -> bool {
        self.root_for(phase)
            .is_some_and(|root| verify(&root, proof, &leaf_for(principal)))
    }
}
