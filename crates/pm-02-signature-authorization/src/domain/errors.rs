//! # Signature Errors
//!
//! Error types for authorization signature handling.

use shared_types::Address;
use thiserror::Error;

/// Why a signature is not well-formed for secp256k1 recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformationKind {
    /// Not exactly 65 bytes.
    InvalidLength(usize),
    /// Recovery ID (v) not in {0, 1, 27, 28}.
    InvalidRecoveryId(u8),
    /// R or S is zero or not below the curve order.
    ScalarOutOfRange,
    /// S is in the upper half of the curve order (EIP-2).
    HighS,
    /// The curve math yielded no public key.
    RecoveryFailed,
}

impl std::fmt::Display for MalformationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(f, "invalid length {len}, expected 65"),
            Self::InvalidRecoveryId(v) => write!(f, "invalid recovery id {v}"),
            Self::ScalarOutOfRange => write!(f, "r or s out of range"),
            Self::HighS => write!(f, "high s value"),
            Self::RecoveryFailed => write!(f, "public key recovery failed"),
        }
    }
}

/// Errors that can occur while authorizing a signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature is not well-formed for the scheme.
    #[error("Malformed signature: {0}")]
    Malformed(MalformationKind),

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch { expected: Address, actual: Address },
}

impl SignatureError {
    /// True for any well-formedness failure.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}
