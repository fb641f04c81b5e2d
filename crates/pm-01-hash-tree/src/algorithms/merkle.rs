//! # Merkle Tree with Canonical Pair-Hashing
//!
//! The tree is rebuilt bottom-up from the full leaf list on every call;
//! no structure is persisted.
//!
//! # Algorithm
//!
//! 1. Level 0 is the leaf list.
//! 2. Adjacent nodes are paired: `parent = hash_pair(left, right)`.
//! 3. An odd node at the end of a level is carried up unchanged.
//! 4. Repeat until one hash remains: the root.
//!
//! A carried node has no sibling at that level, so its proof simply skips
//! the level. Proof length is the depth of that particular leaf.
//!
//! # Time Complexity: O(n) build, O(log n) verify

use crate::domain::HashTreeError;
use shared_types::{keccak256, Address, Hash};

/// Canonical pair-hash: `keccak256(min(a, b) || max(a, b))`.
///
/// Symmetric in its arguments, so verification never needs to know whether
/// a sibling sat on the left or the right.
#[must_use]
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_bytes());
    buf[32..].copy_from_slice(hi.as_bytes());
    keccak256(&buf)
}

/// Leaf value for an allow-listed principal: `keccak256(address)`.
#[must_use]
pub fn leaf_for(principal: &Address) -> Hash {
    keccak256(principal.as_bytes())
}

fn ensure_not_degenerate(leaves: &[Hash]) -> Result<(), HashTreeError> {
    if leaves.len() <= 1 {
        return Err(HashTreeError::DegenerateInput {
            leaves: leaves.len(),
        });
    }
    Ok(())
}

fn next_level(level: &[Hash]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_pair(left, right),
            // Odd node: carry up unchanged
            _ => pair[0],
        })
        .collect()
}

/// Build every level of the tree, leaves first, root last.
///
/// # Errors
///
/// `DegenerateInput` if fewer than two leaves are supplied.
pub fn build_levels(leaves: &[Hash]) -> Result<Vec<Vec<Hash>>, HashTreeError> {
    ensure_not_degenerate(leaves)?;

    let mut levels = vec![leaves.to_vec()];
    while levels.last().map_or(0, Vec::len) > 1 {
        let parent = next_level(&levels[levels.len() - 1]);
        levels.push(parent);
    }
    Ok(levels)
}

/// Compute the Merkle root of a leaf list.
///
/// # Errors
///
/// `DegenerateInput` if fewer than two leaves are supplied.
pub fn build_root(leaves: &[Hash]) -> Result<Hash, HashTreeError> {
    ensure_not_degenerate(leaves)?;

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level);
    }
    Ok(level[0])
}

/// Build the inclusion proof for `leaves[index]`.
///
/// Returns the sibling at each level on the path to the root, in
/// leaf-to-root order.
///
/// # Errors
///
/// - `DegenerateInput` if fewer than two leaves are supplied (checked first).
/// - `IndexOutOfRange` if `index >= leaves.len()`.
pub fn build_proof(leaves: &[Hash], index: usize) -> Result<Vec<Hash>, HashTreeError> {
    ensure_not_degenerate(leaves)?;
    if index >= leaves.len() {
        return Err(HashTreeError::IndexOutOfRange {
            index,
            len: leaves.len(),
        });
    }

    let levels = build_levels(leaves)?;
    Ok(proof_from_levels(&levels, index))
}

/// Extract the proof for leaf `index` from prebuilt levels.
///
/// Caller guarantees `index < levels[0].len()`.
#[must_use]
pub fn proof_from_levels(levels: &[Vec<Hash>], index: usize) -> Vec<Hash> {
    let mut proof = Vec::with_capacity(levels.len());
    let mut index = index;

    // The last level is the root and has no sibling
    for level in levels.iter().take(levels.len().saturating_sub(1)) {
        let sibling = index ^ 1;
        if sibling < level.len() {
            proof.push(level[sibling]);
        }
        index /= 2;
    }

    proof
}

/// Verify that `leaf` is included under `root`.
///
/// Folds the leaf with each sibling via `hash_pair` and compares the result
/// to the root. Never fails: any mismatch is `false`.
#[must_use]
pub fn verify(root: &Hash, proof: &[Hash], leaf: &Hash) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(&current, sibling));
    computed == *root
}

// =============================================================================
// TESTS
// =============================================================================
