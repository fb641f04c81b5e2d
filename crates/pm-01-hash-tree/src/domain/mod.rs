//! # Domain Layer
//!
//! Proof container and error types.

pub mod entities;
pub mod errors;

pub use entities::MerkleProof;
pub use errors::HashTreeError;
