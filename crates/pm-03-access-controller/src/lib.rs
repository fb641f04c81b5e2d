//! # Access Controller Subsystem (PM-03)
//!
//! Phase-gated, one-grant-per-principal issuance with fee collection and
//! linear fee vesting.
//!
//! ## Phases
//!
//! | Phase  | Operation            | Requires                          | Price          |
//! |--------|----------------------|-----------------------------------|----------------|
//! | Phase1 | `mint_free`          | phase 1 allow-list proof          | zero           |
//! | Phase2 | `mint_with_discount` | phase 2 proof + owner signature   | discount price |
//! | Phase3 | `mint_nft`           | nothing                           | full price     |
//!
//! The owner may switch to any phase at any time.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Phase gate, mint ledger, vesting ledger
//! - **Ports Layer** (`ports/`): `AccessControlApi` in, payment/registry/clock out
//! - **Adapters Layer** (`adapters/`): In-memory payment ledger, registry, clocks
//! - **Service Layer** (`service.rs`): `AccessController`, the composition root
//!
//! ## Security Notes
//!
//! - **Reentrancy**: every mutating operation holds a guard token; a nested
//!   call from a collaborator callback fails with `Reentrant`.
//! - **Effects before interactions**: the mint flag and used-signature mark
//!   are written before any registry or payment call.
//! - **Atomicity**: a failed operation leaves state and the event log untouched.
//!
//! ## Example
//!
//! ```ignore
//! use pm_03_access_controller::prelude::*;
//! use std::sync::Arc;
//!
//! let controller = AccessController::with_ecdsa(
//!     config,
//!     Arc::new(InMemoryPaymentLedger::new()),
//!     Arc::new(InMemoryItemRegistry::new()),
//!     Arc::new(SystemClock),
//! )?;
//! let item_id = controller.mint_free(caller, proof.as_slice())?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod guard;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{InMemoryItemRegistry, InMemoryPaymentLedger, ManualClock, SystemClock};
pub use config::ControllerConfig;
pub use domain::{
    ControllerState, ItemId, MintLedger, Phase, PhaseGate, VestingLedger, VestingState,
    DEFAULT_VESTING_DURATION_SECS,
};
pub use errors::{ConfigError, ControllerError};
pub use events::ControllerEvent;
pub use ports::{
    AccessControlApi, Clock, ItemRegistry, PaymentError, PaymentMedium, RegistryError,
};
pub use service::AccessController;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;

/// Common imports for controller users.
pub mod prelude {
    pub use crate::{
        AccessControlApi, AccessController, Clock, ControllerConfig, ControllerError,
        ControllerEvent, InMemoryItemRegistry, InMemoryPaymentLedger, ItemId, ItemRegistry,
        ManualClock, PaymentError, PaymentMedium, Phase, SystemClock,
    };
}
