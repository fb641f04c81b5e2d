//! # Controller Configuration
//!
//! Construction-time parameters. Roots, prices and the fee account are fixed
//! for the lifetime of a controller; no operation changes them.

use crate::domain::{Phase, DEFAULT_VESTING_DURATION_SECS};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};
use std::path::Path;

/// Access controller configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Initial privileged principal.
    pub owner: Address,

    /// Account that receives fees and pays out claims.
    pub controller_address: Address,

    /// Allow-list root for free mints.
    pub phase1_root: Hash,

    /// Allow-list root for discounted mints.
    pub phase2_root: Hash,

    /// Price paid in phase 2.
    pub discount_price: U256,

    /// Price paid in phase 3.
    pub full_price: U256,

    /// Vesting window in seconds.
    #[serde(default = "default_vesting_duration")]
    pub vesting_duration_secs: u64,

    /// Phase at construction.
    #[serde(default)]
    pub initial_phase: Phase,
}

fn default_vesting_duration() -> u64 {
    DEFAULT_VESTING_DURATION_SECS
}

impl ControllerConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed JSON, `ConfigError::Invalid` on bad values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, otherwise as [`Self::from_json`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// `ConfigError::Invalid` for a zero vesting window or a zero fee account.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vesting_duration_secs == 0 {
            return Err(ConfigError::Invalid(
                "vesting_duration_secs must be non-zero".into(),
            ));
        }
        if self.controller_address.is_zero() {
            return Err(ConfigError::Invalid(
                "controller_address must not be the zero address".into(),
            ));
        }
        Ok(())
    }

    /// Deterministic config for tests. Roots are zero; tests replace them.
    pub fn for_testing() -> Self {
        Self {
            owner: Address::new([0x0a; 20]),
            controller_address: Address::new([0xc0; 20]),
            phase1_root: Hash::ZERO,
            phase2_root: Hash::ZERO,
            discount_price: U256::from(500u64),
            full_price: U256::from(1000u64),
            vesting_duration_secs: DEFAULT_VESTING_DURATION_SECS,
            initial_phase: Phase::Phase1,
        }
    }
}
