//! Keccak-256, the single hash function of the system.

use crate::value_objects::Hash;
use sha3::{Digest, Keccak256};

/// Keccak-256 over an arbitrary byte string.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    Hash(hash)
}
