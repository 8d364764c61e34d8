//! State types for the Superfan Pass.

use {
    crate::{
        constants::{KEY_ADMIN, KEY_POINTS, KEY_TIER},
        error::SuperfanError,
    },
    encore_ledger::{Address, CallContext, StateMap, StateValue},
};

/// Global configuration: the single admin key set at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperfanConfig {
    pub admin: Address,
}

impl SuperfanConfig {
    /// Typed read over raw global state, for off-chain inspection tooling.
    pub fn read(global: &StateMap) -> Result<Self, SuperfanError> {
        let bytes = global
            .get(KEY_ADMIN)
            .and_then(|value| value.as_bytes())
            .ok_or(SuperfanError::ConfigCorrupt)?;
        let admin = Address::try_from(bytes).map_err(|_| SuperfanError::ConfigCorrupt)?;
        Ok(Self { admin })
    }

    /// Load the admin from the executing call's global state.
    pub(crate) fn load(ctx: &CallContext<'_>) -> Result<Self, SuperfanError> {
        match ctx.global_get(KEY_ADMIN) {
            Some(StateValue::Bytes(bytes)) => {
                let admin = Address::try_from(bytes.as_slice())
                    .map_err(|_| SuperfanError::ConfigCorrupt)?;
                Ok(Self { admin })
            }
            _ => Err(SuperfanError::ConfigCorrupt),
        }
    }
}

/// One account's pass record: monotonically increasing points and the last
/// claimed tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuperfanAccountRecord {
    pub points: u64,
    pub tier: u64,
}

impl SuperfanAccountRecord {
    /// Typed read over an account's raw local state.
    ///
    /// Missing slots read as zero, matching a freshly opted-in account.
    pub fn read(local: &StateMap) -> Self {
        let uint = |key: &[u8]| {
            local
                .get(key)
                .and_then(|value| value.as_uint())
                .unwrap_or(0)
        };
        Self {
            points: uint(KEY_POINTS),
            tier: uint(KEY_TIER),
        }
    }
}
