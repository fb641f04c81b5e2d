//! # Access Controller Service
//!
//! Application service that implements the `AccessControlApi` trait.
//!
//! ## Architecture
//!
//! - Owns all mutable controller state (`ControllerState`) and the event log
//! - Uses the outbound ports (`PaymentMedium`, `ItemRegistry`, `Clock`) and
//!   the signature authorizer from subsystem 2
//! - Delegates phase, grant and vesting rules to the domain layer
//!
//! ## Serialization and re-entry
//!
//! State sits behind a `parking_lot::ReentrantMutex`. Calls from other
//! threads block until the in-flight operation finishes. A nested call on
//! the same thread (a collaborator calling back in) re-acquires the mutex
//! and is refused by the `ReentrancyGuard` with `Reentrant`. Views take the
//! mutex but not the guard, so they stay callable from inside a callback.
//!
//! No `RefCell` borrow is held across a collaborator call.
//!
//! ## Atomicity
//!
//! Grant-gating writes (mint flag, used signature) land before the registry
//! and payment calls. If either call fails exactly those writes are rolled
//! back and an already-issued item is burned. A failed claim payout
//! restores the vesting ledger as it was before the release.

use crate::config::ControllerConfig;
use crate::domain::{ControllerState, ItemId, Phase, VestingState};
use crate::errors::{ConfigError, ControllerError};
use crate::events::ControllerEvent;
use crate::guard::ReentrancyGuard;
use crate::ports::inbound::AccessControlApi;
use crate::ports::outbound::{Clock, ItemRegistry, PaymentMedium};
use parking_lot::ReentrantMutex;
use pm_02_signature_authorization::{
    AuthorizationMessage, EcdsaAuthorizer, RawSignature, SignatureAuthorizer,
};
use shared_types::{Address, Hash, U256};
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

struct Core {
    entered: Cell<bool>,
    state: RefCell<ControllerState>,
    events: RefCell<Vec<ControllerEvent>>,
}

/// Phased access controller.
pub struct AccessController {
    core: ReentrantMutex<Core>,
    controller_address: Address,
    discount_price: U256,
    full_price: U256,
    payment: Arc<dyn PaymentMedium>,
    registry: Arc<dyn ItemRegistry>,
    clock: Arc<dyn Clock>,
    authorizer: Arc<dyn SignatureAuthorizer>,
}

impl AccessController {
    /// Create a controller from validated configuration.
    ///
    /// # Errors
    /// `ConfigError::Invalid` if `config` fails validation.
    pub fn new(
        config: ControllerConfig,
        payment: Arc<dyn PaymentMedium>,
        registry: Arc<dyn ItemRegistry>,
        clock: Arc<dyn Clock>,
        authorizer: Arc<dyn SignatureAuthorizer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        info!(
            owner = %config.owner,
            controller = %config.controller_address,
            phase = %config.initial_phase,
            "[pm-03] Access controller initialized"
        );

        Ok(Self {
            core: ReentrantMutex::new(Core {
                entered: Cell::new(false),
                state: RefCell::new(ControllerState::from_config(&config)),
                events: RefCell::new(Vec::new()),
            }),
            controller_address: config.controller_address,
            discount_price: config.discount_price,
            full_price: config.full_price,
            payment,
            registry,
            clock,
            authorizer,
        })
    }

    /// Create a controller that checks authorizations with secp256k1 ECDSA.
    ///
    /// # Errors
    /// `ConfigError::Invalid` if `config` fails validation.
    pub fn with_ecdsa(
        config: ControllerConfig,
        payment: Arc<dyn PaymentMedium>,
        registry: Arc<dyn ItemRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        Self::new(config, payment, registry, clock, Arc::new(EcdsaAuthorizer::new()))
    }

    /// Account that receives fees.
    pub fn controller_address(&self) -> Address {
        self.controller_address
    }

    /// Phase 2 price.
    pub fn discount_price(&self) -> U256 {
        self.discount_price
    }

    /// Phase 3 price.
    pub fn full_price(&self) -> U256 {
        self.full_price
    }

    /// Copy of the full controller state.
    pub fn snapshot(&self) -> ControllerState {
        self.core.lock().state.borrow().clone()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Run a mutating operation under the lock and the reentrancy guard.
    fn guarded<T>(
        &self,
        operation: &'static str,
        body: impl FnOnce(&Core) -> Result<T, ControllerError>,
    ) -> Result<T, ControllerError> {
        let core = self.core.lock();
        let result = ReentrancyGuard::acquire(&core.entered).and_then(|_guard| body(&core));
        if let Err(err) = &result {
            warn!(operation, kind = err.kind(), %err, "[pm-03] Operation rejected");
        }
        result
    }

    fn require_owner(state: &ControllerState, caller: Address) -> Result<(), ControllerError> {
        if caller != state.owner {
            return Err(ControllerError::AccessDenied { caller });
        }
        Ok(())
    }

    /// Issue the next item to the grant's principal, then collect `price`.
    ///
    /// The grant must already be recorded. On failure it is rolled back and
    /// any issued item is burned.
    fn issue(
        &self,
        core: &Core,
        grant: &Grant<'_>,
        price: U256,
    ) -> Result<ItemId, ControllerError> {
        let principal = grant.principal;
        let item_id = self.registry.total_supply().saturating_add(1);

        if let Err(err) = self.registry.mint(principal, item_id) {
            Self::rollback_grant(core, grant);
            return Err(err.into());
        }

        if !price.is_zero() {
            let pulled = self.payment.transfer_from(
                self.controller_address,
                principal,
                self.controller_address,
                price,
            );
            if let Err(err) = pulled {
                if let Err(burn_err) = self.registry.burn(item_id) {
                    error!(item_id, %burn_err, "[pm-03] Failed to unwind issued item");
                }
                Self::rollback_grant(core, grant);
                return Err(err.into());
            }

            let now = self.clock.now();
            core.state.borrow_mut().vesting.deposit(price, now);
        }

        core.events.borrow_mut().push(ControllerEvent::Minted {
            principal,
            item_id,
            price,
        });
        info!(%principal, item_id, %price, "[pm-03] Item minted");
        Ok(item_id)
    }

    /// Record the grant, plus a consumed signature if any.
    fn record_grant<'a>(
        core: &Core,
        principal: Address,
        signature: Option<&'a RawSignature>,
    ) -> Grant<'a> {
        let mut state = core.state.borrow_mut();
        state.mint_ledger.record(principal);
        if let Some(signature) = signature {
            state.replay_set.insert(signature);
        }
        Grant {
            principal,
            signature,
        }
    }

    /// Undo exactly the writes of [`Self::record_grant`].
    fn rollback_grant(core: &Core, grant: &Grant<'_>) {
        let mut state = core.state.borrow_mut();
        state.mint_ledger.rollback(&grant.principal);
        if let Some(signature) = grant.signature {
            state.replay_set.rollback(signature);
        }
    }
}

/// Gating writes of a mint in flight.
struct Grant<'a> {
    principal: Address,
    signature: Option<&'a RawSignature>,
}

impl AccessControlApi for AccessController {
    #[instrument(skip_all, fields(caller = %caller, phase = %phase))]
    fn set_phase(&self, caller: Address, phase: Phase) -> Result<(), ControllerError> {
        self.guarded("set_phase", |core| {
            let from = {
                let mut state = core.state.borrow_mut();
                Self::require_owner(&state, caller)?;
                state.phase_gate.set(phase)
            };
            core.events
                .borrow_mut()
                .push(ControllerEvent::PhaseChanged { from, to: phase });
            info!(%from, to = %phase, "[pm-03] Phase changed");
            Ok(())
        })
    }

    #[instrument(skip_all, fields(caller = %caller, new_owner = %new_owner))]
    fn set_owner(&self, caller: Address, new_owner: Address) -> Result<(), ControllerError> {
        self.guarded("set_owner", |core| {
            let previous = {
                let mut state = core.state.borrow_mut();
                Self::require_owner(&state, caller)?;
                if new_owner.is_zero() {
                    return Err(ControllerError::ZeroAddress);
                }
                std::mem::replace(&mut state.owner, new_owner)
            };
            core.events
                .borrow_mut()
                .push(ControllerEvent::OwnershipTransferred {
                    previous,
                    new: new_owner,
                });
            info!(%previous, new = %new_owner, "[pm-03] Ownership transferred");
            Ok(())
        })
    }

    #[instrument(skip_all, fields(caller = %caller))]
    fn claim_vested_tokens(&self, caller: Address) -> Result<U256, ControllerError> {
        self.guarded("claim_vested_tokens", |core| {
            let now = self.clock.now();
            let (owner, amount, vesting_before) = {
                let mut state = core.state.borrow_mut();
                Self::require_owner(&state, caller)?;
                let amount = state.vesting.releasable(now)?;
                if amount.is_zero() {
                    return Err(ControllerError::NothingVested);
                }
                let vesting_before = state.vesting.clone();
                state.vesting.release(amount);
                (state.owner, amount, vesting_before)
            };

            if let Err(err) = self.payment.transfer(self.controller_address, owner, amount) {
                core.state.borrow_mut().vesting = vesting_before;
                return Err(err.into());
            }

            core.events
                .borrow_mut()
                .push(ControllerEvent::TokensClaimed { owner, amount });
            info!(%owner, %amount, "[pm-03] Vested tokens claimed");
            Ok(amount)
        })
    }

    #[instrument(skip_all, fields(caller = %caller, proof_len = proof.len()))]
    fn mint_free(&self, caller: Address, proof: &[Hash]) -> Result<ItemId, ControllerError> {
        self.guarded("mint_free", |core| {
            {
                let state = core.state.borrow();
                state.phase_gate.require(Phase::Phase1)?;
                state.mint_ledger.ensure_not_granted(&caller)?;
                if !state.phase_gate.verify_membership(Phase::Phase1, proof, &caller) {
                    return Err(ControllerError::InvalidProof);
                }
            }
            debug!("[pm-03] Phase 1 membership verified");

            let grant = Self::record_grant(core, caller, None);
            self.issue(core, &grant, U256::zero())
        })
    }

    #[instrument(skip_all, fields(caller = %caller, proof_len = proof.len()))]
    fn mint_with_discount(
        &self,
        caller: Address,
        proof: &[Hash],
        signature: &RawSignature,
    ) -> Result<ItemId, ControllerError> {
        self.guarded("mint_with_discount", |core| {
            let owner = {
                let state = core.state.borrow();
                state.phase_gate.require(Phase::Phase2)?;
                if state.replay_set.contains(signature) {
                    return Err(ControllerError::SignatureAlreadyUsed);
                }
                state.mint_ledger.ensure_not_granted(&caller)?;
                if !state.phase_gate.verify_membership(Phase::Phase2, proof, &caller) {
                    return Err(ControllerError::InvalidProof);
                }
                state.owner
            };
            debug!("[pm-03] Phase 2 membership verified");

            let message = AuthorizationMessage::new(caller, self.discount_price);
            self.authorizer.authorize(&message, signature, owner)?;
            debug!("[pm-03] Discount authorization verified");

            let grant = Self::record_grant(core, caller, Some(signature));
            self.issue(core, &grant, self.discount_price)
        })
    }

    #[instrument(skip_all, fields(caller = %caller))]
    fn mint_nft(&self, caller: Address) -> Result<ItemId, ControllerError> {
        self.guarded("mint_nft", |core| {
            {
                let state = core.state.borrow();
                state.phase_gate.require(Phase::Phase3)?;
                state.mint_ledger.ensure_not_granted(&caller)?;
            }

            let grant = Self::record_grant(core, caller, None);
            self.issue(core, &grant, self.full_price)
        })
    }

    fn get_total_vested_amount(&self) -> U256 {
        self.core.lock().state.borrow().vesting.total_vested()
    }

    fn releasable_amount(&self) -> U256 {
        let now = self.clock.now();
        self.core
            .lock()
            .state
            .borrow()
            .vesting
            .releasable(now)
            .unwrap_or_default()
    }

    fn vesting_state(&self) -> VestingState {
        self.core.lock().state.borrow().vesting.state()
    }

    fn current_phase(&self) -> Phase {
        self.core.lock().state.borrow().phase()
    }

    fn owner(&self) -> Address {
        self.core.lock().state.borrow().owner
    }

    fn has_minted(&self, principal: Address) -> bool {
        self.core.lock().state.borrow().mint_ledger.has_minted(&principal)
    }

    fn is_signature_used(&self, signature: &RawSignature) -> bool {
        self.core.lock().state.borrow().replay_set.contains(signature)
    }

    fn events(&self) -> Vec<ControllerEvent> {
        self.core.lock().events.borrow().clone()
    }

    fn total_issued(&self) -> u64 {
        self.registry.total_supply()
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
