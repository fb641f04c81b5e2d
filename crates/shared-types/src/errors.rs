//! # Error Types
//!
//! Errors raised while decoding shared primitives from text.

use thiserror::Error;

/// Failure to parse a hex-encoded primitive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded byte length does not match the primitive width.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl From<hex::FromHexError> for ParseError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidHex(err.to_string())
    }
}
