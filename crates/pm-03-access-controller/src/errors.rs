//! # Error Types
//!
//! All error types for controller operations. Every failure leaves
//! controller state exactly as it was before the call.

use crate::domain::Phase;
use crate::ports::outbound::{PaymentError, RegistryError};
use pm_02_signature_authorization::SignatureError;
use shared_types::Address;
use thiserror::Error;

// =============================================================================
// CONTROLLER ERRORS
// =============================================================================

/// Errors returned by controller operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// Non-owner called an owner-only operation.
    #[error("access denied for {caller:?}")]
    AccessDenied { caller: Address },

    /// Operation invoked outside its required phase.
    #[error("phase mismatch: requires {required}, current {current}")]
    PhaseMismatch { required: Phase, current: Phase },

    /// Principal already received its one grant.
    #[error("already granted: {0:?}")]
    AlreadyGranted(Address),

    /// Allow-list membership proof did not verify.
    #[error("invalid merkle proof")]
    InvalidProof,

    /// Signature is malformed or not from the owner.
    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    /// Signature has already authorized a grant.
    #[error("signature already used")]
    SignatureAlreadyUsed,

    /// No fee has ever been collected.
    #[error("vesting not started")]
    VestingNotStarted,

    /// Nothing is releasable right now.
    #[error("nothing vested")]
    NothingVested,

    /// Ownership cannot be handed to the zero address.
    #[error("zero address not allowed")]
    ZeroAddress,

    /// A mutating operation was entered while another was in flight.
    #[error("reentrant call")]
    Reentrant,

    /// Phase name could not be parsed.
    #[error("unknown phase: {0}")]
    UnknownPhase(String),

    /// Payment medium refused the transfer.
    #[error("payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Item registry refused the issuance.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl ControllerError {
    /// Short, stable name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccessDenied { .. } => "access_denied",
            Self::PhaseMismatch { .. } => "phase_mismatch",
            Self::AlreadyGranted(_) => "already_granted",
            Self::InvalidProof => "invalid_proof",
            Self::InvalidSignature(_) => "invalid_signature",
            Self::SignatureAlreadyUsed => "signature_already_used",
            Self::VestingNotStarted => "vesting_not_started",
            Self::NothingVested => "nothing_vested",
            Self::ZeroAddress => "zero_address",
            Self::Reentrant => "reentrant",
            Self::UnknownPhase(_) => "unknown_phase",
            Self::Payment(_) => "payment",
            Self::Registry(_) => "registry",
        }
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
