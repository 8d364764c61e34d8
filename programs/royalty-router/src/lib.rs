//! Encore Royalty Router Program
//!
//! Routes primary sale revenue to up to three payout addresses and handles
//! secondary sales by paying an artist royalty and returning the remainder
//! to the current seller.  All revenue movement happens through fee-free
//! inner payments inside one atomic sale group, so a sale either settles
//! completely or not at all.
//!
//! ## Entrypoints
//!
//! | Selector   | Group shape                                              | Effect                                   |
//! |------------|----------------------------------------------------------|------------------------------------------|
//! | `buy`      | \[AppCall, Payment buyer→app, AssetTransfer seller→buyer\] | split payment to p1/p2/p3 per basis points |
//! | `resale`   | \[AppCall, Payment buyer→app, AssetTransfer holder→buyer\] | royalty to p1, remainder to the holder    |
//!
//! Lifecycle operations are selected by the call's on-completion field:
//! opt-in and close-out are vacuous (no local state), update and delete
//! require the creator's signature, and anything unrecognized rejects.
//!
//! ## Invariants
//!
//! * `bps1 + bps2 + bps3 ≤ 10000`, checked at creation and again on every
//!   `buy`.
//! * The sale group's payment must land on the application account and the
//!   asset must land with whoever paid.
//! * Close-to, rekey-to, and clawback fields on both value legs must be
//!   unset.
//! * The call fee must pre-pay every inner payment (3 × min fee for `buy`,
//!   2 × for `resale`).
//!
//! Flooring dust from the basis-point splits accumulates in the
//! application account; sweeping it is an operational concern, not program
//! logic.

pub mod constants;
pub mod error;
pub mod processor;
pub mod state;


pub use {
    constants::{GLOBAL_SCHEMA, LOCAL_SCHEMA},
    error::RouterError,
    processor::RoyaltyRouterProgram,
    state::RouterConfig,
};
