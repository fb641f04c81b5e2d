//! # Reentrancy via a Hostile Payment Medium
//!
//! The payment medium is the one collaborator the controller hands control
//! to in the middle of an operation. A malicious medium calls back into the
//! controller from inside `transfer_from` / `transfer` and tries to:
//!
//! - mint a second item for the principal being charged
//! - mint for an accomplice while the first mint is in flight
//! - flip the phase or steal ownership mid-operation
//! - claim vested fees twice
//!
//! Every nested mutating call must fail with `Reentrant`, while views stay
//! readable and already reflect the gating writes.

use std::sync::{Arc, OnceLock, Weak};

use parking_lot::Mutex;
use pm_03_access_controller::prelude::*;
use shared_types::{Address, U256};

/// What the hostile medium does when it gets control.
#[derive(Clone, Copy, Debug)]
pub enum Attack {
    /// Mint again for the principal currently paying.
    RemintSelf,
    /// Mint for another principal.
    MintFor(Address),
    /// Try to switch phase as the given caller.
    SetPhase(Address, Phase),
    /// Try to take ownership as the given caller.
    SetOwner(Address, Address),
    /// Claim vested fees again as the given caller.
    Claim(Address),
}

/// What the hostile medium saw while it had control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Result of the nested call, with the success value dropped.
    pub outcome: Result<(), ControllerError>,
    /// Whether the paying principal was already marked as minted.
    pub payer_marked: bool,
    /// Vested total visible from inside the callback.
    pub vested_seen: U256,
}

/// Payment medium that re-enters the controller before moving funds.
pub struct HostilePayment {
    inner: Arc<InMemoryPaymentLedger>,
    target: OnceLock<Weak<AccessController>>,
    attack: Mutex<Attack>,
    pub observations: Mutex<Vec<Observation>>,
}

impl HostilePayment {
    pub fn new(inner: Arc<InMemoryPaymentLedger>, attack: Attack) -> Self {
        Self {
            inner,
            target: OnceLock::new(),
            attack: Mutex::new(attack),
            observations: Mutex::new(Vec::new()),
        }
    }

    /// Point the medium at the controller it will attack.
    pub fn arm(&self, controller: &Arc<AccessController>) {
        let _ = self.target.set(Arc::downgrade(controller));
    }

    /// Replace the attack, e.g. once the owner address is known.
    pub fn retarget(&self, attack: Attack) {
        *self.attack.lock() = attack;
    }

    fn strike(&self, payer: Address) {
        let Some(controller) = self.target.get().and_then(Weak::upgrade) else {
            return;
        };

        let attack = *self.attack.lock();
        let outcome = match attack {
            Attack::RemintSelf => controller.mint_nft(payer).map(drop),
            Attack::MintFor(accomplice) => controller.mint_nft(accomplice).map(drop),
            Attack::SetPhase(caller, phase) => controller.set_phase(caller, phase),
            Attack::SetOwner(caller, new_owner) => controller.set_owner(caller, new_owner),
            Attack::Claim(caller) => controller.claim_vested_tokens(caller).map(drop),
        };

        self.observations.lock().push(Observation {
            outcome,
            payer_marked: controller.has_minted(payer),
            vested_seen: controller.get_total_vested_amount(),
        });
    }
}

impl PaymentMedium for HostilePayment {
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> Result<(), PaymentError> {
        self.strike(caller);
        self.inner.transfer(caller, to, amount)
    }

    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), PaymentError> {
        self.strike(from);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    /// Scenario whose payment medium runs `attack` on every payment.
    fn hostile_scenario(attack: Attack) -> (Scenario, Arc<HostilePayment>) {
        let slot: Arc<OnceLock<Arc<HostilePayment>>> = Arc::new(OnceLock::new());
        let capture = slot.clone();

        let s = Scenario::builder()
            .wrap_payment(move |ledger| {
                let hostile = Arc::new(HostilePayment::new(ledger, attack));
                let _ = capture.set(hostile.clone());
                let medium: Arc<dyn PaymentMedium> = hostile;
                medium
            })
            .build();

        let hostile = slot.get().cloned().expect("wrapper ran during build");
        hostile.arm(&s.controller);
        (s, hostile)
    }

    #[test]
    fn test_remint_during_fee_pull_rejected() {
        let (s, hostile) = hostile_scenario(Attack::RemintSelf);
        s.enter(Phase::Phase3);
        let payer = outsider(0);
        s.fund(payer, 10_000);

        assert_eq!(s.controller.mint_nft(payer), Ok(1));

        let seen = hostile.observations.lock().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].outcome, Err(ControllerError::Reentrant));
        // Mint flag was written before control left the controller
        assert!(seen[0].payer_marked);
        assert_eq!(s.registry.balance_of(payer), 1);
        assert_eq!(s.ledger.balance_of(payer), U256::from(9_000u64));
    }

    #[test]
    fn test_accomplice_mint_during_fee_pull_rejected() {
        let accomplice = outsider(9);
        let (s, hostile) = hostile_scenario(Attack::MintFor(accomplice));
        s.enter(Phase::Phase3);
        s.fund(outsider(0), 1_000);
        s.fund(accomplice, 1_000);

        s.controller.mint_nft(outsider(0)).unwrap();

        assert_eq!(
            hostile.observations.lock()[0].outcome,
            Err(ControllerError::Reentrant)
        );
        assert!(!s.controller.has_minted(accomplice));
        // Outside a callback the accomplice mints normally, and is attacked in turn
        assert_eq!(s.controller.mint_nft(accomplice), Ok(2));
    }

    #[test]
    fn test_discount_mint_reentry_rejected() {
        let (s, hostile) = hostile_scenario(Attack::RemintSelf);
        s.enter(Phase::Phase2);
        let buyer = phase2_member(0);
        s.fund(buyer, 500);
        let sig = s.discount_signature(buyer);

        s.controller
            .mint_with_discount(buyer, s.phase2_proof(buyer).as_slice(), &sig)
            .unwrap();

        let seen = hostile.observations.lock().clone();
        assert_eq!(seen[0].outcome, Err(ControllerError::Reentrant));
        assert!(seen[0].payer_marked);
        assert!(s.controller.is_signature_used(&sig));
    }

    #[test]
    fn test_owner_actions_during_callback_rejected() {
        let (s, hostile) = hostile_scenario(Attack::RemintSelf);
        s.enter(Phase::Phase3);
        // Even the owner's identity is refused while an operation is in flight
        hostile.retarget(Attack::SetPhase(s.owner, Phase::Phase1));
        s.fund(outsider(0), 1_000);
        s.controller.mint_nft(outsider(0)).unwrap();

        assert_eq!(
            hostile.observations.lock()[0].outcome,
            Err(ControllerError::Reentrant)
        );
        assert_eq!(s.controller.current_phase(), Phase::Phase3);
    }

    #[test]
    fn test_ownership_grab_during_callback_rejected() {
        let thief = outsider(7);
        let (s, hostile) = hostile_scenario(Attack::SetOwner(thief, thief));
        s.enter(Phase::Phase3);
        s.fund(outsider(0), 1_000);
        s.controller.mint_nft(outsider(0)).unwrap();

        assert_eq!(
            hostile.observations.lock()[0].outcome,
            Err(ControllerError::Reentrant)
        );
        assert_eq!(s.controller.owner(), s.owner);
    }

    #[test]
    fn test_double_claim_during_payout_rejected() {
        let (s, hostile) = hostile_scenario(Attack::RemintSelf);
        hostile.retarget(Attack::Claim(s.owner));
        s.enter(Phase::Phase3);
        s.fund(outsider(0), 1_000);
        s.controller.mint_nft(outsider(0)).unwrap();
        s.clock.set(GENESIS + 365 * DAY);

        assert_eq!(
            s.controller.claim_vested_tokens(s.owner),
            Ok(U256::from(1_000u64))
        );

        let seen = hostile.observations.lock().clone();
        // One observation from the fee pull, one from the payout
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|o| o.outcome == Err(ControllerError::Reentrant)));
        // Release was booked before the payout call
        assert_eq!(seen[1].vested_seen, U256::zero());
        assert_eq!(s.ledger.balance_of(s.owner), U256::from(1_000u64));
    }

    #[test]
    fn test_guard_released_after_operation() {
        let (s, _hostile) = hostile_scenario(Attack::RemintSelf);
        s.enter(Phase::Phase3);
        for i in 0..3 {
            s.fund(outsider(i), 1_000);
            assert!(s.controller.mint_nft(outsider(i)).is_ok());
        }
        assert_eq!(s.controller.total_issued(), 3);
    }
}
