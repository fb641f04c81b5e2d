//! # Adapters Layer
//!
//! In-memory implementations of the outbound ports, for tests and
//! single-process deployments.

pub mod clock;
pub mod item_registry;
pub mod payment_ledger;

pub use clock::{ManualClock, SystemClock};
pub use item_registry::InMemoryItemRegistry;
pub use payment_ledger::InMemoryPaymentLedger;
