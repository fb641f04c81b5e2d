//! # Inbound Ports (Driving Ports / API)
//!
//! Trait that defines the public API of this subsystem.

use crate::domain::entities::{AuthorizationMessage, RawSignature};
use crate::domain::errors::SignatureError;
use shared_types::Address;

/// Recovers and checks the signer of an authorization.
///
/// Implementations must be thread-safe (`Send + Sync`) and stateless.
pub trait SignatureAuthorizer: Send + Sync {
    /// Recover the identity that signed `message`.
    ///
    /// Never fails on a valid-but-wrong signer: it returns whatever identity
    /// the math yields.
    ///
    /// # Errors
    /// * `SignatureError::Malformed` - signature is not well-formed for the scheme
    fn recover(
        &self,
        message: &AuthorizationMessage,
        signature: &RawSignature,
    ) -> Result<Address, SignatureError>;

    /// Recover and require the signer to be `expected`.
    ///
    /// # Errors
    /// * `SignatureError::Malformed` - signature is not well-formed
    /// * `SignatureError::SignerMismatch` - recovered identity differs from `expected`
    fn authorize(
        &self,
        message: &AuthorizationMessage,
        signature: &RawSignature,
        expected: Address,
    ) -> Result<(), SignatureError> {
        let actual = self.recover(message, signature)?;
        if actual != expected {
            return Err(SignatureError::SignerMismatch { expected, actual });
        }
        Ok(())
    }
}
