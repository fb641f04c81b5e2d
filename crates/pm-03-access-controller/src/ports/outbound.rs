//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the controller depends on but does not own.
//!
//! Calls into `PaymentMedium` and `ItemRegistry` are suspension points: a
//! hostile implementation may call back into the controller. The controller
//! never holds a state borrow across these calls.

use crate::domain::ItemId;
use shared_types::{Address, Timestamp, U256};
use thiserror::Error;

// =============================================================================
// PAYMENT MEDIUM
// =============================================================================

/// Error from the payment medium.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// Sender balance too low.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Spender allowance too low.
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: U256, available: U256 },

    /// Transfer refused for another reason.
    #[error("transfer rejected: {reason}")]
    Rejected { reason: String },
}

/// Fungible balance ledger with allowance-based pulls.
///
/// `caller` / `spender` name the account on whose authority the call is
/// made, since there is no ambient message sender.
pub trait PaymentMedium: Send + Sync {
    /// Move `amount` from `caller` to `to`.
    ///
    /// # Errors
    /// * `PaymentError::InsufficientBalance` - `caller` holds less than `amount`
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> Result<(), PaymentError>;

    /// Move `amount` from `from` to `to` using `spender`'s allowance.
    ///
    /// # Errors
    /// * `PaymentError::InsufficientAllowance` - allowance below `amount`
    /// * `PaymentError::InsufficientBalance` - `from` holds less than `amount`
    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), PaymentError>;

    /// Let `spender` pull up to `amount` from `owner`.
    ///
    /// # Errors
    /// * `PaymentError::Rejected` - implementation-specific refusal
    fn approve(&self, owner: Address, spender: Address, amount: U256) -> Result<(), PaymentError>;

    /// Balance of `account`.
    fn balance_of(&self, account: Address) -> U256;

    /// Remaining allowance of `spender` over `owner`.
    fn allowance(&self, owner: Address, spender: Address) -> U256;
}

// =============================================================================
// ITEM REGISTRY
// =============================================================================

/// Error from the item registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The id is already issued.
    #[error("item {0} already minted")]
    AlreadyMinted(ItemId),

    /// The id was never issued.
    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    /// Items cannot be issued to the zero address.
    #[error("invalid recipient")]
    InvalidRecipient,
}

/// Enumerable ownership registry of uniquely-numbered items.
pub trait ItemRegistry: Send + Sync {
    /// Issue item `id` to `to`.
    ///
    /// # Errors
    /// * `RegistryError::AlreadyMinted` - `id` exists
    /// * `RegistryError::InvalidRecipient` - `to` is the zero address
    fn mint(&self, to: Address, id: ItemId) -> Result<(), RegistryError>;

    /// Destroy item `id`. Used only to unwind an issuance whose operation failed.
    ///
    /// # Errors
    /// * `RegistryError::UnknownItem` - `id` does not exist
    fn burn(&self, id: ItemId) -> Result<(), RegistryError>;

    /// Number of items held by `owner`.
    fn balance_of(&self, owner: Address) -> u64;

    /// Holder of item `id`.
    fn owner_of(&self, id: ItemId) -> Option<Address>;

    /// Number of items currently issued.
    fn total_supply(&self) -> u64;
}

// =============================================================================
// CLOCK
// =============================================================================

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current unix time in seconds.
    fn now(&self) -> Timestamp;
}
