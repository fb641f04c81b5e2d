//! # PM-01 Hash Tree
//!
//! Merkle tree used to prove membership in an allow-list without storing
//! the list itself. Only the 32-byte root is retained by the controller.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Pure domain logic, no I/O
//!
//! ## Canonical Pair-Hashing
//!
//! Every internal node is `keccak256(min(a, b) || max(a, b))`. Because the
//! children are sorted before hashing, a proof is a flat list of sibling
//! hashes with no left/right markers, and verification cannot be confused
//! by child position.
//!
//! ## Module Structure
//!
//! ```text
//! pm-01-hash-tree/
//! ├── domain/          # MerkleProof, HashTreeError
//! ├── algorithms/      # hash_pair, build_root, build_proof, verify
//! └── allow_list.rs    # Off-chain helper: addresses -> root + proofs
//! ```
//!
//! ## Degenerate Input
//!
//! A list with zero or one leaf is rejected with `DegenerateInput`. This is a
//! policy of the system, not a cryptographic requirement.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod allow_list;
pub mod domain;

// Re-exports
pub use algorithms::{build_proof, build_root, hash_pair, leaf_for, verify};
pub use allow_list::AllowList;
pub use domain::{HashTreeError, MerkleProof};
pub use shared_types::Hash;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;
