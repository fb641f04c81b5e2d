//! # Allow-List Builder
//!
//! Off-chain tooling that turns a list of addresses into the root a
//! controller is configured with, and hands out the proof each principal
//! submits when minting.

use crate::algorithms::{build_levels, leaf_for, proof_from_levels};
use crate::domain::{HashTreeError, MerkleProof};
use rayon::prelude::*;
use shared_types::{Address, Hash};
use std::collections::HashMap;
use tracing::debug;

/// An allow-list with its tree levels precomputed.
#[derive(Debug, Clone)]
pub struct AllowList {
    members: Vec<Address>,
    positions: HashMap<Address, usize>,
    levels: Vec<Vec<Hash>>,
}

impl AllowList {
    /// Build the tree for `members`, in the given order.
    ///
    /// Duplicate addresses keep their first position.
    ///
    /// # Errors
    ///
    /// `DegenerateInput` for fewer than two members.
    pub fn from_addresses(members: Vec<Address>) -> Result<Self, HashTreeError> {
        let leaves: Vec<Hash> = members.iter().map(leaf_for).collect();
        let levels = build_levels(&leaves)?;

        let mut positions = HashMap::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            positions.entry(*member).or_insert(index);
        }

        debug!(
            members = members.len(),
            depth = levels.len() - 1,
            "Allow-list tree built"
        );

        Ok(Self {
            members,
            positions,
            levels,
        })
    }

    /// The Merkle root to configure the controller with.
    #[must_use]
    pub fn root(&self) -> Hash {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(Hash::ZERO)
    }

    /// Number of listed addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: construction rejects lists with fewer than two members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True if `address` is listed.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.positions.contains_key(address)
    }

    /// Leaf hashes in tree order.
    #[must_use]
    pub fn leaves(&self) -> &[Hash] {
        &self.levels[0]
    }

    /// Proof for a listed address, `None` if not listed.
    #[must_use]
    pub fn proof_for(&self, address: &Address) -> Option<MerkleProof> {
        self.positions
            .get(address)
            .map(|&index| MerkleProof(proof_from_levels(&self.levels, index)))
    }

    /// Proofs for every listed address, computed in parallel.
    #[must_use]
    pub fn proofs(&self) -> Vec<(Address, MerkleProof)> {
        self.members
            .par_iter()
            .enumerate()
            .map(|(index, member)| {
                (
                    *member,
                    MerkleProof(proof_from_levels(&self.levels, index)),
                )
            })
            .collect()
    }
}
