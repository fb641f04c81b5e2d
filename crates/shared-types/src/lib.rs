//! # Shared Types Crate
//!
//! Primitive value objects used across every subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: address, hash and amount encodings are
//!   defined once here so the tree builder, the signature authorizer and the
//!   controller can never disagree on byte layouts.
//! - **Fixed Width**: hashes are 32 bytes (Keccak-256), addresses 20 bytes,
//!   amounts are `U256`.

pub mod errors;
pub mod hashing;
pub mod value_objects;

pub use errors::ParseError;
pub use hashing::keccak256;
pub use value_objects::{Address, Hash, Timestamp, U256, U512};
