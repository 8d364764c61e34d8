//! Keys, selectors, and group-shape constants for the Royalty Router.

use encore_ledger::StateSchema;

/// Program name used in rejection traces.
pub const PROGRAM_NAME: &str = "royalty-router";

// ---------------------------------------------------------------------------
// Global-state keys
// ---------------------------------------------------------------------------
// These key strings are part of the externally observable contract:
// deployment and inspection tooling parses global state by these exact
// bytes.  Keep them short and never rename them.

/// Payout address 1 (e.g. artist).
pub const KEY_P1: &[u8] = b"p1";
/// Payout address 2 (e.g. venue/label).
pub const KEY_P2: &[u8] = b"p2";
/// Payout address 3 (e.g. DAO/crew).
pub const KEY_P3: &[u8] = b"p3";

/// Basis points routed to `p1` on primary sale.
pub const KEY_BPS1: &[u8] = b"bps1";
/// Basis points routed to `p2` on primary sale.
pub const KEY_BPS2: &[u8] = b"bps2";
/// Basis points routed to `p3` on primary sale.
pub const KEY_BPS3: &[u8] = b"bps3";

/// Royalty basis points paid to `p1` on secondary sale.
pub const KEY_ROY_BPS: &[u8] = b"roybps";

/// Reference asset id for the ticket/membership token (amount = 1).
pub const KEY_ASA: &[u8] = b"asa";

/// Canonical seller/treasury for primary sales.
pub const KEY_SELLER: &[u8] = b"seller";

// ---------------------------------------------------------------------------
// Call selectors
// ---------------------------------------------------------------------------

pub const SELECTOR_BUY: &[u8] = b"buy";
pub const SELECTOR_RESALE: &[u8] = b"resale";

// ---------------------------------------------------------------------------
// Group shape
// ---------------------------------------------------------------------------
// Both entrypoints expect the fixed atomic shape
//
//   0: ApplicationCall (this program)
//   1: Payment         (buyer → app account)
//   2: AssetTransfer   (seller → buyer, exactly 1 unit of `asa`)
//
// The ordering is a protocol-breaking choice; every caller must match it.

pub const SALE_GROUP_SIZE: usize = 3;
pub const APP_CALL_INDEX: usize = 0;
pub const PAYMENT_INDEX: usize = 1;
pub const ASSET_TRANSFER_INDEX: usize = 2;

/// Inner payments emitted by a successful `buy` (p1/p2/p3).
pub const BUY_INNER_PAYMENTS: u64 = 3;
/// Inner payments emitted by a successful `resale` (royalty + seller).
pub const RESALE_INNER_PAYMENTS: u64 = 2;

/// Creation takes exactly nine positional arguments:
/// P1, P2, P3, BPS1, BPS2, BPS3, ROY_BPS, ASA, SELLER.
pub const CREATE_ARG_COUNT: usize = 9;

// ---------------------------------------------------------------------------
// Deployment schemas
// ---------------------------------------------------------------------------

/// Five uint slots (bps1, bps2, bps3, roybps, asa) and four byte slots
/// (p1, p2, p3, seller).
pub const GLOBAL_SCHEMA: StateSchema = StateSchema::new(5, 4);

/// The router keeps no per-account state.
pub const LOCAL_SCHEMA: StateSchema = StateSchema::new(0, 0);
