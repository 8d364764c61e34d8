//! Global configuration state for the Royalty Router.
//!
//! The configuration is written exactly once, at creation, as nine
//! key-value slots; it is immutable thereafter.  [`RouterConfig::read`]
//! gives off-chain tooling a typed view over raw global state keyed by the
//! same byte strings the program writes.

use {
    crate::{
        constants::{
            KEY_ASA, KEY_BPS1, KEY_BPS2, KEY_BPS3, KEY_P1, KEY_P2, KEY_P3, KEY_ROY_BPS,
            KEY_SELLER,
        },
        error::RouterError,
    },
    encore_ledger::{Address, AssetId, CallContext, StateMap, StateValue, TxnError},
};

/// Creation-time configuration of one router deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Payout addresses for primary-sale splits; `p1` also receives the
    /// secondary-sale royalty.
    pub p1: Address,
    pub p2: Address,
    pub p3: Address,

    /// Primary-sale weights in basis points, `bps1 + bps2 + bps3 ≤ 10000`.
    pub bps1: u64,
    pub bps2: u64,
    pub bps3: u64,

    /// Secondary-sale royalty weight in basis points.
    pub roy_bps: u64,

    /// Reference asset moved (amount = 1) by every sale group.
    pub asa: AssetId,

    /// Canonical seller for primary sales.
    pub seller: Address,
}

impl RouterConfig {
    /// Sum of the three primary-sale weights.
    pub fn bps_sum(&self) -> u64 {
        self.bps1
            .saturating_add(self.bps2)
            .saturating_add(self.bps3)
    }

    /// Typed read over raw global state, for off-chain inspection tooling.
    pub fn read(global: &StateMap) -> Result<Self, RouterError> {
        Ok(Self {
            p1: read_address(global, KEY_P1)?,
            p2: read_address(global, KEY_P2)?,
            p3: read_address(global, KEY_P3)?,
            bps1: read_uint(global, KEY_BPS1)?,
            bps2: read_uint(global, KEY_BPS2)?,
            bps3: read_uint(global, KEY_BPS3)?,
            roy_bps: read_uint(global, KEY_ROY_BPS)?,
            asa: read_uint(global, KEY_ASA)?,
            seller: read_address(global, KEY_SELLER)?,
        })
    }

    /// Load from the executing call's global state.
    pub(crate) fn load(ctx: &CallContext<'_>) -> Result<Self, RouterError> {
        Ok(Self {
            p1: ctx_address(ctx, KEY_P1)?,
            p2: ctx_address(ctx, KEY_P2)?,
            p3: ctx_address(ctx, KEY_P3)?,
            bps1: ctx_uint(ctx, KEY_BPS1)?,
            bps2: ctx_uint(ctx, KEY_BPS2)?,
            bps3: ctx_uint(ctx, KEY_BPS3)?,
            roy_bps: ctx_uint(ctx, KEY_ROY_BPS)?,
            asa: ctx_uint(ctx, KEY_ASA)?,
            seller: ctx_address(ctx, KEY_SELLER)?,
        })
    }

    /// Install all nine slots.  Runs once, on the creation call.
    pub(crate) fn store(&self, ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
        ctx.global_put(KEY_P1, StateValue::Bytes(self.p1.to_vec()))?;
        ctx.global_put(KEY_P2, StateValue::Bytes(self.p2.to_vec()))?;
        ctx.global_put(KEY_P3, StateValue::Bytes(self.p3.to_vec()))?;
        ctx.global_put(KEY_BPS1, StateValue::Uint(self.bps1))?;
        ctx.global_put(KEY_BPS2, StateValue::Uint(self.bps2))?;
        ctx.global_put(KEY_BPS3, StateValue::Uint(self.bps3))?;
        ctx.global_put(KEY_ROY_BPS, StateValue::Uint(self.roy_bps))?;
        ctx.global_put(KEY_ASA, StateValue::Uint(self.asa))?;
        ctx.global_put(KEY_SELLER, StateValue::Bytes(self.seller.to_vec()))?;
        Ok(())
    }
}

fn read_address(global: &StateMap, key: &[u8]) -> Result<Address, RouterError> {
    let bytes = global
        .get(key)
        .and_then(|value| value.as_bytes())
        .ok_or(RouterError::ConfigCorrupt)?;
    Address::try_from(bytes).map_err(|_| RouterError::ConfigCorrupt)
}

fn read_uint(global: &StateMap, key: &[u8]) -> Result<u64, RouterError> {
    global
        .get(key)
        .and_then(|value| value.as_uint())
        .ok_or(RouterError::ConfigCorrupt)
}

fn ctx_address(ctx: &CallContext<'_>, key: &[u8]) -> Result<Address, RouterError> {
    match ctx.global_get(key) {
        Some(StateValue::Bytes(bytes)) => {
            Address::try_from(bytes.as_slice()).map_err(|_| RouterError::ConfigCorrupt)
        }
        _ => Err(RouterError::ConfigCorrupt),
    }
}

fn ctx_uint(ctx: &CallContext<'_>, key: &[u8]) -> Result<u64, RouterError> {
    match ctx.global_get(key) {
        Some(StateValue::Uint(value)) => Ok(value),
        _ => Err(RouterError::ConfigCorrupt),
    }
}
