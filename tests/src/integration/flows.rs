//! # Integration Test Flows
//!
//! Full lifecycle of a phased mint:
//!
//! 1. **Phase 1**: allow-listed principals mint free with a Merkle proof
//! 2. **Phase 2**: allow-listed principals pay the discount price with an
//!    owner-signed authorization
//! 3. **Phase 3**: anyone pays the full price
//! 4. **Vesting**: the owner claims collected fees over time

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use pm_01_hash_tree::{build_proof, leaf_for, verify, AllowList};
    use pm_03_access_controller::prelude::*;
    use shared_types::U256;

    #[test]
    fn test_full_lifecycle_across_phases() {
        pm_telemetry::init_test_logging();
        let _span =
            pm_telemetry::subsystem_span!("full_lifecycle", subsystem = "access-controller");
        let s = Scenario::new();

        // Phase 1: every allow-listed principal gets one free item
        for i in 0..PHASE1_SIZE {
            let member = phase1_member(i);
            let proof = s.phase1_proof(member);
            let id = s.controller.mint_free(member, proof.as_slice()).unwrap();
            assert_eq!(id, u64::from(i) + 1);
        }
        assert_eq!(s.controller.get_total_vested_amount(), U256::zero());

        // Phase 2: discounted, signed
        s.enter(Phase::Phase2);
        let buyer = phase2_member(0);
        s.fund(buyer, 500);
        let sig = s.discount_signature(buyer);
        let proof = s.phase2_proof(buyer);
        let id = s
            .controller
            .mint_with_discount(buyer, proof.as_slice(), &sig)
            .unwrap();
        assert_eq!(id, u64::from(PHASE1_SIZE) + 1);
        assert_eq!(s.controller.get_total_vested_amount(), U256::from(500u64));

        // Phase 3: open sale
        s.enter(Phase::Phase3);
        let stranger = outsider(0);
        s.fund(stranger, 1_000);
        let id = s.controller.mint_nft(stranger).unwrap();
        assert_eq!(id, u64::from(PHASE1_SIZE) + 2);
        assert_eq!(s.controller.get_total_vested_amount(), U256::from(1_500u64));
        assert_eq!(s.controller_balance(), U256::from(1_500u64));

        // Everyone holds exactly one item
        assert_eq!(s.registry.balance_of(buyer), 1);
        assert_eq!(s.registry.balance_of(stranger), 1);
        assert_eq!(s.controller.total_issued(), u64::from(PHASE1_SIZE) + 2);

        // Owner drains the vault once the window has passed
        s.clock.set(GENESIS + 365 * DAY);
        let claimed = s.controller.claim_vested_tokens(s.owner).unwrap();
        assert_eq!(claimed, U256::from(1_500u64));
        assert_eq!(s.ledger.balance_of(s.owner), U256::from(1_500u64));
        assert_eq!(s.controller_balance(), U256::zero());
    }

    #[test]
    fn test_event_log_matches_operations() {
        let s = Scenario::new();
        let member = phase1_member(0);
        s.controller
            .mint_free(member, s.phase1_proof(member).as_slice())
            .unwrap();
        s.enter(Phase::Phase3);
        s.fund(outsider(1), 1_000);
        s.controller.mint_nft(outsider(1)).unwrap();

        // Failures leave no trace
        let _ = s.controller.mint_nft(outsider(1));
        let _ = s.controller.set_phase(outsider(1), Phase::Phase1);

        assert_eq!(
            s.controller.events(),
            vec![
                ControllerEvent::Minted {
                    principal: member,
                    item_id: 1,
                    price: U256::zero(),
                },
                ControllerEvent::PhaseChanged {
                    from: Phase::Phase1,
                    to: Phase::Phase3,
                },
                ControllerEvent::Minted {
                    principal: outsider(1),
                    item_id: 2,
                    price: U256::from(1_000u64),
                },
            ]
        );
    }

    #[test]
    fn test_one_grant_across_phases() {
        let s = Scenario::new();
        // A principal on both lists is still limited to one item overall
        let both = phase1_member(0);
        s.controller
            .mint_free(both, s.phase1_proof(both).as_slice())
            .unwrap();

        s.enter(Phase::Phase3);
        s.fund(both, 1_000);
        assert_eq!(
            s.controller.mint_nft(both),
            Err(ControllerError::AlreadyGranted(both))
        );
        assert_eq!(s.ledger.balance_of(both), U256::from(1_000u64));
    }

    #[test]
    fn test_offchain_proofs_match_hash_tree() {
        let s = Scenario::new();
        let leaves: Vec<_> = (0..PHASE1_SIZE).map(|i| leaf_for(&phase1_member(i))).collect();

        for (index, (address, proof)) in s.phase1.proofs().into_iter().enumerate() {
            assert_eq!(proof.as_slice(), build_proof(&leaves, index).unwrap().as_slice());
            assert!(verify(&s.phase1.root(), proof.as_slice(), &leaf_for(&address)));
        }
    }

    #[test]
    fn test_phase_round_trip_keeps_grants() {
        let s = Scenario::new();
        let member = phase1_member(2);
        s.controller
            .mint_free(member, s.phase1_proof(member).as_slice())
            .unwrap();

        s.enter(Phase::Phase3);
        s.enter(Phase::Phase1);

        assert_eq!(
            s.controller.mint_free(member, s.phase1_proof(member).as_slice()),
            Err(ControllerError::AlreadyGranted(member))
        );
        let other = phase1_member(3);
        assert_eq!(
            s.controller.mint_free(other, s.phase1_proof(other).as_slice()),
            Ok(2)
        );
    }

    #[test]
    fn test_ownership_handover_moves_signing_authority() -> anyhow::Result<()> {
        let s = Scenario::new();
        let (new_key, new_owner) =
            pm_02_signature_authorization::test_helpers::generate_keypair();

        s.controller.set_owner(s.owner, new_owner)?;
        s.controller.set_phase(new_owner, Phase::Phase2)?;

        let buyer = phase2_member(1);
        s.fund(buyer, 1_000);
        let proof = s.phase2_proof(buyer);

        // Old owner's signature no longer authorizes
        let stale = s.discount_signature(buyer);
        assert!(matches!(
            s.controller.mint_with_discount(buyer, proof.as_slice(), &stale),
            Err(ControllerError::InvalidSignature(_))
        ));

        let message = pm_02_signature_authorization::AuthorizationMessage::new(
            buyer,
            s.controller.discount_price(),
        );
        let fresh = pm_02_signature_authorization::test_helpers::sign_authorization(&message, &new_key);
        s.controller.mint_with_discount(buyer, proof.as_slice(), &fresh)?;
        assert!(s.controller.has_minted(buyer));
        Ok(())
    }

    #[test]
    fn test_allow_list_from_json_config() -> anyhow::Result<()> {
        let list = AllowList::from_addresses((0..3).map(phase1_member).collect())?;
        let json = format!(
            r#"{{
                "owner": "0x{owner}",
                "controller_address": "0x{vault}",
                "phase1_root": "{root}",
                "phase2_root": "{root}",
                "discount_price": "0x1f4",
                "full_price": "0x3e8"
            }}"#,
            owner = hex::encode([0xaa; 20]),
            vault = hex::encode([0xcc; 20]),
            root = list.root().to_hex(),
        );

        let config = ControllerConfig::from_json(&json)?;
        assert_eq!(config.phase1_root, list.root());
        assert_eq!(config.discount_price, U256::from(500u64));
        assert_eq!(config.initial_phase, Phase::Phase1);
        Ok(())
    }
}
