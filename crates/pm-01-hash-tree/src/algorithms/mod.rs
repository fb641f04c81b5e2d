//! # Algorithms
//!
//! Tree construction, proof extraction and verification.

pub mod merkle;

pub use merkle::{build_levels, build_proof, build_root, hash_pair, leaf_for, proof_from_levels, verify};
