//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::Hash;

/// Ordered sibling hashes from leaf to root.
///
/// Consumed once per verification and never stored by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof(pub Vec<Hash>);

impl MerkleProof {
    /// An empty proof. Only verifies when the leaf equals the root.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Sibling hashes as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Hash] {
        &self.0
    }

    /// Number of siblings (depth of the leaf).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no siblings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Hash>> for MerkleProof {
    fn from(siblings: Vec<Hash>) -> Self {
        Self(siblings)
    }
}

impl AsRef<[Hash]> for MerkleProof {
    fn as_ref(&self) -> &[Hash] {
        &self.0
    }
}
