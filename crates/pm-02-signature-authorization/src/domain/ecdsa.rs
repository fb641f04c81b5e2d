//! # ECDSA Signer Recovery (secp256k1)
//!
//! Pure domain logic for recovering the authority behind an authorization.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be STRICTLY LESS THAN SECP256K1_HALF_ORDER
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Operations**: Uses `subtle` crate for side-channel resistance
//! - Uses k256 crate for cryptographic operations

use super::entities::{AuthorizationMessage, RawSignature, SIGNATURE_LENGTH};
use super::errors::{MalformationKind, SignatureError};
use crate::ports::inbound::SignatureAuthorizer;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_types::{keccak256, Address, Hash};
use subtle::{Choice, ConstantTimeEq};
use tracing::debug;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// EIP-191 prefix for a 32-byte personal message.
const ETH_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

// =============================================================================
// ECDSA AUTHORIZER
// =============================================================================

/// secp256k1 implementation of [`SignatureAuthorizer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdsaAuthorizer;

impl EcdsaAuthorizer {
    /// Create a new authorizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SignatureAuthorizer for EcdsaAuthorizer {
    fn recover(
        &self,
        message: &AuthorizationMessage,
        signature: &RawSignature,
    ) -> Result<Address, SignatureError> {
        recover_signer(&message.signing_hash(), signature)
    }
}

// =============================================================================
// CORE RECOVERY
// =============================================================================

/// EIP-191 personal-message hash of a 32-byte digest.
#[must_use]
pub fn eth_signed_message_hash(digest: &Hash) -> Hash {
    let mut buf = Vec::with_capacity(ETH_MESSAGE_PREFIX.len() + 32);
    buf.extend_from_slice(ETH_MESSAGE_PREFIX);
    buf.extend_from_slice(digest.as_bytes());
    keccak256(&buf)
}

/// Recover the signer's address from a prehashed message.
///
/// Security validations performed:
/// 1. Length is exactly 65 bytes
/// 2. R and S are in valid range [1, n-1] per SEC1 standard
/// 3. S is in lower half per EIP-2 malleability protection
/// 4. Recovery ID (v) is valid (0, 1, 27, or 28)
/// 5. Public key recovery succeeds
///
/// # Errors
///
/// `SignatureError::Malformed` for any of the above. A valid signature by
/// the wrong key is not an error here.
pub fn recover_signer(
    message_hash: &Hash,
    signature: &RawSignature,
) -> Result<Address, SignatureError> {
    use zeroize::Zeroize;

    let bytes = signature.as_bytes();
    if bytes.len() != SIGNATURE_LENGTH {
        return Err(malformed(MalformationKind::InvalidLength(bytes.len())));
    }

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..64]);
    let v = bytes[64];

    if !is_valid_scalar(&r) || !is_valid_scalar(&s) {
        return Err(malformed(MalformationKind::ScalarOutOfRange));
    }

    // Check malleability (EIP-2): S must be in lower half of curve order
    if !is_low_s(&s) {
        return Err(malformed(MalformationKind::HighS));
    }

    let recovery_id = parse_recovery_id(v)?;

    // sig_bytes is zeroized on both paths
    let mut sig_bytes = [0u8; 64];
    sig_bytes.copy_from_slice(&bytes[..64]);
    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| malformed(MalformationKind::ScalarOutOfRange))?;

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash.as_bytes(), &sig, recovery_id)
        .map_err(|_| malformed(MalformationKind::RecoveryFailed))?;

    let address = address_from_pubkey(&recovered_key);
    debug!(signer = %address, "Recovered authorization signer");
    Ok(address)
}

/// Derive the 20-byte address from a public key.
#[must_use]
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let pubkey_slice = pubkey_bytes.as_bytes();

    // Keccak256 hash of public key (without 0x04 prefix)
    let hash = keccak256(&pubkey_slice[1..]);

    // Take last 20 bytes as address
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash.as_bytes()[12..]);
    Address(address)
}

fn malformed(kind: MalformationKind) -> SignatureError {
    SignatureError::Malformed(kind)
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Check if S value is in lower half of curve order (EIP-2).
///
/// Constant-time: the comparison runs in fixed time regardless of input.
fn is_low_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = s[i];
        let h_byte = SECP256K1_HALF_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(s_byte < h_byte));
        let byte_greater = Choice::from(u8::from(s_byte > h_byte));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less.into()
}

/// Check if a scalar value is in valid range [1, n-1] for ECDSA.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = scalar[i];
        let n_byte = SECP256K1_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(s_byte < n_byte));
        let byte_greater = Choice::from(u8::from(s_byte > n_byte));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!is_zero & less).into()
}

/// Parse recovery ID from v value.
///
/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(malformed(MalformationKind::InvalidRecoveryId(v))),
    };

    RecoveryId::try_from(id).map_err(|_| malformed(MalformationKind::InvalidRecoveryId(v)))
}

/// Compute n - s, flipping a signature between its low-S and high-S forms.
#[must_use]
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = i32::from(SECP256K1_ORDER[i]) - i32::from(s[i]) - borrow;
        if diff < 0 {
            result[i] = u8::try_from(diff + 256).unwrap_or(0);
            borrow = 1;
        } else {
            result[i] = u8::try_from(diff).unwrap_or(0);
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    //! Key generation and authorization signing for tests.

    use super::*;
    use k256::ecdsa::SigningKey;

    /// Generate a new secp256k1 keypair and its address.
    #[must_use]
    pub fn generate_keypair() -> (SigningKey, Address) {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let address = address_from_pubkey(signing_key.verifying_key());
        (signing_key, address)
    }

    /// Sign a prehash, returning a low-S 65-byte signature with v in {27, 28}.
    ///
    /// # Panics
    ///
    /// If the signing backend fails, which does not happen for valid keys.
    #[must_use]
    pub fn sign_prehash(message_hash: &Hash, private_key: &SigningKey) -> RawSignature {
        let (sig, recid) = private_key
            .sign_prehash_recoverable(message_hash.as_bytes())
            .expect("signing failed");

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        // Normalize S to low value (EIP-2)
        let s_normalized = if is_low_s(&s) { s } else { invert_s(&s) };

        // Flip recovery id if S was inverted
        let v = if s_normalized == s {
            recid.to_byte() + 27
        } else if recid.to_byte() == 0 {
            28
        } else {
            27
        };

        RawSignature::from_parts(&r, &s_normalized, v)
    }

    /// Sign an authorization for `message` with `private_key`.
    #[must_use]
    pub fn sign_authorization(
        message: &AuthorizationMessage,
        private_key: &SigningKey,
    ) -> RawSignature {
        sign_prehash(&message.signing_hash(), private_key)
    }

    /// Produce the high-S twin of a signature: same (r, message), s' = n - s, v flipped.
    #[must_use]
    pub fn malleate(signature: &RawSignature) -> RawSignature {
        let bytes = signature.as_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        let v = if bytes[64] == 27 { 28 } else { 27 };
        RawSignature::from_parts(&r, &invert_s(&s), v)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
