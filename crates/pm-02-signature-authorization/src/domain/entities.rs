//! # Domain Entities
//!
//! Authorization message and raw signature bytes.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{keccak256, Address, Hash, U256};

/// Length of a well-formed signature: r (32) || s (32) || v (1).
pub const SIGNATURE_LENGTH: usize = 65;

/// Signature bytes exactly as submitted by the caller.
///
/// Kept as an unchecked byte string: well-formedness is decided during
/// recovery. The replay set keys on [`RawSignature::replay_key`].
#[serde_as]
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSignature(#[serde_as(as = "Hex")] pub Vec<u8>);

impl RawSignature {
    /// Wrap raw bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Assemble from components.
    #[must_use]
    pub fn from_parts(r: &[u8; 32], s: &[u8; 32], v: u8) -> Self {
        let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH);
        bytes.extend_from_slice(r);
        bytes.extend_from_slice(s);
        bytes.push(v);
        Self(bytes)
    }

    /// The raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Bytes with the recovery id folded to its 27/28 form.
    ///
    /// `v = 0` and `v = 27` (likewise 1 and 28) recover the same signer, so
    /// both encodings of one signature map to the same key. Anything that is
    /// not 65 bytes is returned unchanged.
    #[must_use]
    pub fn replay_key(&self) -> RawSignature {
        let mut bytes = self.0.clone();
        if bytes.len() == SIGNATURE_LENGTH && bytes[64] < 2 {
            bytes[64] += 27;
        }
        Self(bytes)
    }
}

impl std::fmt::Debug for RawSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RawSignature(0x")?;
        for byte in self.0.iter().take(4) {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..., {} bytes)", self.0.len())
    }
}

impl From<Vec<u8>> for RawSignature {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// The data an authorization signature commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationMessage {
    /// Principal allowed to mint.
    pub principal: Address,
    /// Exact price tier the authorization is valid for.
    pub price: U256,
}

impl AuthorizationMessage {
    /// Create a message for `principal` at `price`.
    #[must_use]
    pub fn new(principal: Address, price: U256) -> Self {
        Self { principal, price }
    }

    /// `keccak256(principal || price_be32)`.
    #[must_use]
    pub fn digest(&self) -> Hash {
        let mut buf = [0u8; 52];
        buf[..20].copy_from_slice(self.principal.as_bytes());
        self.price.to_big_endian(&mut buf[20..]);
        keccak256(&buf)
    }

    /// The prehash actually signed: EIP-191 personal message over `digest()`.
    #[must_use]
    pub fn signing_hash(&self) -> Hash {
        super::ecdsa::eth_signed_message_hash(&self.digest())
    }
}
