//! # Controller Events
//!
//! Append-only record of successful operations. Nothing is recorded for a
//! failed call.

use crate::domain::{ItemId, Phase};
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// Event emitted by a successful controller operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControllerEvent {
    /// An item was issued to `principal`.
    Minted {
        principal: Address,
        item_id: ItemId,
        price: U256,
    },
    /// Vested fees were paid to the owner.
    TokensClaimed { owner: Address, amount: U256 },
    /// The owner switched phase.
    PhaseChanged { from: Phase, to: Phase },
    /// Ownership moved.
    OwnershipTransferred { previous: Address, new: Address },
}
