//! # Inbound Ports (Driving Ports / API)
//!
//! The public operation surface of the controller.
//!
//! Every mutating operation is atomic: it fully applies or fails with no
//! state change. The principal a request is attributed to is passed
//! explicitly as `caller`.

use crate::domain::{ItemId, Phase, VestingState};
use crate::errors::ControllerError;
use crate::events::ControllerEvent;
use pm_02_signature_authorization::RawSignature;
use shared_types::{Address, Hash, U256};

/// Access controller API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait AccessControlApi: Send + Sync {
    // =========================================================================
    // Owner Operations
    // =========================================================================

    /// Switch the active phase. Any phase may follow any phase.
    ///
    /// # Errors
    /// * `AccessDenied` - caller is not the owner
    /// * `Reentrant` - nested mutating call
    fn set_phase(&self, caller: Address, phase: Phase) -> Result<(), ControllerError>;

    /// Hand ownership to `new_owner`.
    ///
    /// # Errors
    /// * `AccessDenied` - caller is not the owner
    /// * `ZeroAddress` - `new_owner` is zero
    /// * `Reentrant` - nested mutating call
    fn set_owner(&self, caller: Address, new_owner: Address) -> Result<(), ControllerError>;

    /// Release vested fees to the owner.
    ///
    /// Returns the amount released.
    ///
    /// # Errors
    /// * `AccessDenied`, `VestingNotStarted`, `NothingVested`, `Reentrant`
    /// * `Payment` - transfer to owner refused
    fn claim_vested_tokens(&self, caller: Address) -> Result<U256, ControllerError>;

    // =========================================================================
    // Mint Operations
    // =========================================================================

    /// Free mint for the phase 1 allow-list.
    ///
    /// # Errors
    /// Checked in order: `PhaseMismatch`, `AlreadyGranted`, `InvalidProof`.
    fn mint_free(&self, caller: Address, proof: &[Hash]) -> Result<ItemId, ControllerError>;

    /// Discounted mint for the phase 2 allow-list with an owner signature.
    ///
    /// # Errors
    /// Checked in order: `PhaseMismatch`, `SignatureAlreadyUsed`,
    /// `AlreadyGranted`, `InvalidProof`, `InvalidSignature`, then any
    /// `Payment` failure of the fee pull.
    fn mint_with_discount(
        &self,
        caller: Address,
        proof: &[Hash],
        signature: &RawSignature,
    ) -> Result<ItemId, ControllerError>;

    /// Open mint at full price.
    ///
    /// # Errors
    /// Checked in order: `PhaseMismatch`, `AlreadyGranted`, then `Payment`.
    fn mint_nft(&self, caller: Address) -> Result<ItemId, ControllerError>;

    // =========================================================================
    // Views
    // =========================================================================

    /// Unclaimed collected fees.
    fn get_total_vested_amount(&self) -> U256;

    /// What a claim would release right now (zero before vesting starts).
    fn releasable_amount(&self) -> U256;

    /// Full vesting state.
    fn vesting_state(&self) -> VestingState;

    /// The active phase.
    fn current_phase(&self) -> Phase;

    /// The privileged principal.
    fn owner(&self) -> Address;

    /// True if `principal` has received its grant.
    fn has_minted(&self, principal: Address) -> bool;

    /// True if `signature` has been consumed.
    fn is_signature_used(&self, signature: &RawSignature) -> bool;

    /// Successful-operation log, oldest first.
    fn events(&self) -> Vec<ControllerEvent>;

    /// Number of items issued through the registry.
    fn total_issued(&self) -> u64;
}
