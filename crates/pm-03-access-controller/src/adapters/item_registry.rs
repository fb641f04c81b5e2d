//! In-memory item registry.

use crate::domain::ItemId;
use crate::ports::outbound::{ItemRegistry, RegistryError};
use parking_lot::RwLock;
use shared_types::Address;
use std::collections::HashMap;

/// Ownership registry held in memory.
pub struct InMemoryItemRegistry {
    owners: RwLock<HashMap<ItemId, Address>>,
}

impl InMemoryItemRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            owners: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRegistry for InMemoryItemRegistry {
    fn mint(&self, to: Address, id: ItemId) -> Result<(), RegistryError> {
        if to.is_zero() {
            return Err(RegistryError::InvalidRecipient);
        }
        let mut owners = self.owners.write();
        if owners.contains_key(&id) {
            return Err(RegistryError::AlreadyMinted(id));
        }
        owners.insert(id, to);
        Ok(())
    }

    fn burn(&self, id: ItemId) -> Result<(), RegistryError> {
        self.owners
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(RegistryError::UnknownItem(id))
    }

    fn balance_of(&self, owner: Address) -> u64 {
        self.owners
            .read()
            .values()
            .filter(|holder| **holder == owner)
            .count() as u64
    }

    fn owner_of(&self, id: ItemId) -> Option<Address> {
        self.owners.read().get(&id).copied()
    }

    fn total_supply(&self) -> u64 {
        self.owners.read().len() as u64
    }
}
