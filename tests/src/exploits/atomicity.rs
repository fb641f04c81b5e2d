//! # Atomicity Under Collaborator Failure
//!
//! Grant-gating writes happen before the registry and payment calls. When a
//! later call fails, the controller must look exactly as it did before:
//! no mint flag, no spent signature, no vested fee, no issued item, no event.

use std::sync::Arc;

use parking_lot::Mutex;
use pm_03_access_controller::prelude::*;
use pm_03_access_controller::{ItemRegistry, RegistryError};
use shared_types::{Address, U256};

/// Payment medium that refuses every pull while switched off.
pub struct SwitchablePayment {
    inner: Arc<InMemoryPaymentLedger>,
    refusing: Mutex<bool>,
}

impl SwitchablePayment {
    pub fn new(inner: Arc<InMemoryPaymentLedger>) -> Self {
        Self {
            inner,
            refusing: Mutex::new(false),
        }
    }

    pub fn refuse(&self, refusing: bool) {
        *self.refusing.lock() = refusing;
    }

    fn check(&self) -> Result<(), PaymentError> {
        if *self.refusing.lock() {
            return Err(PaymentError::Rejected {
                reason: "medium paused".into(),
            });
        }
        Ok(())
    }
}

impl PaymentMedium for SwitchablePayment {
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> Result<(), PaymentError> {
        self.check()?;
        self.inner.transfer(caller, to, amount)
    }

    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), PaymentError> {
        self.check()?;
        self.inner.transfer_from(spender, from, to, amount)
    }

    fn approve(&self, owner: Address, spender: Address, amount: U256) -> Result<(), PaymentError> {
        self.inner.approve(owner, spender, amount)
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.inner.balance_of(account)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.inner.allowance(owner, spender)
    }
}

/// Registry that already holds item 1 from some other issuer.
pub struct SquattedRegistry {
    inner: InMemoryItemRegistry,
    squatted: u64,
}

impl SquattedRegistry {
    pub fn new() -> Self {
        Self {
            inner: InMemoryItemRegistry::new(),
            squatted: 1,
        }
    }
}

impl ItemRegistry for SquattedRegistry {
    fn mint(&self, to: Address, id: ItemId) -> Result<(), RegistryError> {
        if id == self.squatted {
            return Err(RegistryError::AlreadyMinted(id));
        }
        self.inner.mint(to, id)
    }

    fn burn(&self, id: ItemId) -> Result<(), RegistryError> {
        self.inner.burn(id)
    }

    fn balance_of(&self, owner: Address) -> u64 {
        self.inner.balance_of(owner)
    }

    fn owner_of(&self, id: ItemId) -> Option<Address> {
        self.inner.owner_of(id)
    }

    fn total_supply(&self) -> u64 {
        self.inner.total_supply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use std::sync::OnceLock;

    fn switchable_scenario() -> (Scenario, Arc<SwitchablePayment>) {
        let slot: Arc<OnceLock<Arc<SwitchablePayment>>> = Arc::new(OnceLock::new());
        let capture = slot.clone();
        let s = Scenario::builder()
            .wrap_payment(move |ledger| {
                let medium = Arc::new(SwitchablePayment::new(ledger));
                let _ = capture.set(medium.clone());
                let medium: Arc<dyn PaymentMedium> = medium;
                medium
            })
            .build();
        let medium = slot.get().cloned().expect("wrapper ran during build");
        (s, medium)
    }

    #[test]
    fn test_refused_full_price_pull_unwinds_everything() {
        let (s, medium) = switchable_scenario();
        s.enter(Phase::Phase3);
        let buyer = outsider(0);
        s.fund(buyer, 1_000);
        let before = s.controller.snapshot();
        let events_before = s.controller.events();

        medium.refuse(true);
        let err = s.controller.mint_nft(buyer).unwrap_err();

        assert!(matches!(err, ControllerError::Payment(PaymentError::Rejected { .. })));
        assert_eq!(s.controller.snapshot(), before);
        assert_eq!(s.controller.events(), events_before);
        assert_eq!(s.registry.total_supply(), 0);
        assert_eq!(s.registry.owner_of(1), None);

        // Once the medium is back the same principal succeeds with the same id
        medium.refuse(false);
        assert_eq!(s.controller.mint_nft(buyer), Ok(1));
    }

    #[test]
    fn test_refused_discount_pull_leaves_signature_unspent() {
        let (s, medium) = switchable_scenario();
        s.enter(Phase::Phase2);
        let buyer = phase2_member(0);
        s.fund(buyer, 500);
        let sig = s.discount_signature(buyer);
        let proof = s.phase2_proof(buyer);

        medium.refuse(true);
        assert!(s
            .controller
            .mint_with_discount(buyer, proof.as_slice(), &sig)
            .is_err());
        assert!(!s.controller.is_signature_used(&sig));
        assert!(!s.controller.has_minted(buyer));
        assert_eq!(s.controller.vesting_state().vesting_start_time, None);

        medium.refuse(false);
        assert!(s
            .controller
            .mint_with_discount(buyer, proof.as_slice(), &sig)
            .is_ok());
    }

    #[test]
    fn test_refused_payout_keeps_vested_balance() {
        let (s, medium) = switchable_scenario();
        s.enter(Phase::Phase3);
        s.fund(outsider(0), 1_000);
        s.controller.mint_nft(outsider(0)).unwrap();
        s.clock.set(GENESIS + 200 * DAY);

        medium.refuse(true);
        assert!(s.controller.claim_vested_tokens(s.owner).is_err());
        assert_eq!(s.controller.get_total_vested_amount(), U256::from(1_000u64));

        medium.refuse(false);
        // 1000 * 200 / 365
        assert_eq!(
            s.controller.claim_vested_tokens(s.owner),
            Ok(U256::from(547u64))
        );
    }

    #[test]
    fn test_registry_refusal_leaves_no_grant() {
        let (owner_key, owner) = pm_02_signature_authorization::test_helpers::generate_keypair();
        let ledger = Arc::new(InMemoryPaymentLedger::new());
        let config = ControllerConfig {
            owner,
            initial_phase: Phase::Phase3,
            ..ControllerConfig::for_testing()
        };
        let controller = AccessController::with_ecdsa(
            config,
            ledger.clone(),
            Arc::new(SquattedRegistry::new()),
            Arc::new(ManualClock::new(GENESIS)),
        )
        .unwrap();

        let buyer = outsider(0);
        ledger.mint_to(buyer, U256::from(1_000u64));
        ledger
            .approve(buyer, controller.controller_address(), U256::from(1_000u64))
            .unwrap();

        assert_eq!(
            controller.mint_nft(buyer),
            Err(ControllerError::Registry(RegistryError::AlreadyMinted(1)))
        );
        assert!(!controller.has_minted(buyer));
        assert_eq!(ledger.balance_of(buyer), U256::from(1_000u64));
        assert!(controller.events().is_empty());
    }
}
