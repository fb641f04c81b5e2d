//! In-memory payment medium.
//!
//! Implements the `PaymentMedium` port with balances and allowances held in
//! process memory.

use crate::ports::outbound::{PaymentError, PaymentMedium};
use parking_lot::RwLock;
use shared_types::{Address, U256};
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
struct Ledger {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl Ledger {
    fn balance(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) -> Result<(), PaymentError> {
        let available = self.balance(&from);
        if available < amount {
            return Err(PaymentError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.balances.insert(from, available - amount);
        let credited = self.balance(&to).saturating_add(amount);
        self.balances.insert(to, credited);
        Ok(())
    }
}

/// Fungible balance ledger held in memory.
pub struct InMemoryPaymentLedger {
    ledger: RwLock<Ledger>,
}

impl InMemoryPaymentLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self {
            ledger: RwLock::new(Ledger::default()),
        }
    }

    /// Credit `amount` to `account` out of thin air. Test faucet.
    pub fn mint_to(&self, account: Address, amount: U256) {
        let mut ledger = self.ledger.write();
        let credited = ledger.balance(&account).saturating_add(amount);
        ledger.balances.insert(account, credited);
    }
}

impl Default for InMemoryPaymentLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentMedium for InMemoryPaymentLedger {
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> Result<(), PaymentError> {
        debug!(from = %caller, to = %to, %amount, "transfer");
        self.ledger.write().move_balance(caller, to, amount)
    }

    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), PaymentError> {
        debug!(spender = %spender, from = %from, to = %to, %amount, "transfer_from");
        let mut ledger = self.ledger.write();

        let allowed = ledger.allowance(&from, &spender);
        if allowed < amount {
            return Err(PaymentError::InsufficientAllowance {
                required: amount,
                available: allowed,
            });
        }

        ledger.move_balance(from, to, amount)?;
        ledger.allowances.insert((from, spender), allowed - amount);
        Ok(())
    }

    fn approve(&self, owner: Address, spender: Address, amount: U256) -> Result<(), PaymentError> {
        self.ledger.write().allowances.insert((owner, spender), amount);
        Ok(())
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.ledger.read().balance(&account)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.read().allowance(&owner, &spender)
    }
}
