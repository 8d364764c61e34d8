//! Keys, selectors, and schema constants for the Superfan Pass.

use encore_ledger::StateSchema;

/// Program name used in rejection traces.
pub const PROGRAM_NAME: &str = "superfan-pass";

// Global and local state keys.  Byte-for-byte part of the observable
// contract; inspection tooling reads them verbatim.

/// Admin address authorized to issue points (global).
pub const KEY_ADMIN: &[u8] = b"admin";
/// Accumulated points (local, per opted-in account).
pub const KEY_POINTS: &[u8] = b"pts";
/// Last claimed tier (local, per opted-in account).
pub const KEY_TIER: &[u8] = b"tier";

// Call selectors.

pub const SELECTOR_ADD_POINTS: &[u8] = b"add_points";
pub const SELECTOR_CLAIM_TIER: &[u8] = b"claim_tier";

/// `add_points` and `claim_tier` both take selector + one uint argument.
pub const MIN_CALL_ARGS: usize = 2;

// Deployment schemas.

/// One byte slot: the admin address.
pub const GLOBAL_SCHEMA: StateSchema = StateSchema::new(0, 1);

/// Two uint slots per account: `pts` and `tier`.
pub const LOCAL_SCHEMA: StateSchema = StateSchema::new(2, 0);
