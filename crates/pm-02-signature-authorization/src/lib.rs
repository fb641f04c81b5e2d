//! # Signature Authorization Subsystem (PM-02)
//!
//! Recovers the signer of a price-tier authorization and remembers which
//! signatures have already been spent.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): The `SignatureAuthorizer` trait consumed by the controller
//!
//! ## Message Construction
//!
//! `digest = keccak256(principal (20 bytes) || price (32 bytes, big-endian))`
//!
//! The authority signs the EIP-191 personal-message hash of the digest.
//! Binding the price into the digest stops a signature issued for one tier
//! from being replayed against another.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//!   as malformed. Otherwise `(r, n - s)` would be a second, distinct byte string
//!   authorizing the same grant and would slip past the replay set.
//! - **Recovery never judges the signer**: a well-formed signature always
//!   recovers *some* address; the caller compares it to the expected authority.

pub mod domain;
pub mod ports;

// Re-export public API
pub use domain::ecdsa::{
    address_from_pubkey, eth_signed_message_hash, recover_signer, EcdsaAuthorizer,
};
pub use domain::entities::{AuthorizationMessage, RawSignature, SIGNATURE_LENGTH};
pub use domain::errors::{MalformationKind, SignatureError};
pub use domain::replay::ReplaySet;
pub use ports::inbound::SignatureAuthorizer;

#[cfg(any(test, feature = "test-helpers"))]
pub use domain::ecdsa::test_helpers;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;
