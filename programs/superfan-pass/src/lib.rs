//! Encore Superfan Pass Program
//!
//! A loyalty pass: the configured admin issues points to opted-in
//! accounts, and account holders claim tiers against their own balance.
//!
//! ## Entrypoints
//!
//! | Selector     | Caller     | Effect                                          |
//! |--------------|------------|-------------------------------------------------|
//! | `add_points` | admin only | `pts += amount` on the target account           |
//! | `claim_tier` | any member | `tier := threshold` if `pts ≥ threshold`        |
//!
//! Opt-in zero-initializes the caller's `pts` and `tier`; close-out and
//! clear-state release them.  Update and delete require the admin's
//! signature; unrecognized selectors and completions reject.
//!
//! ## Invariants
//!
//! * `pts` never decreases — there is no decrement entrypoint.
//! * `tier` is only ever set to a value covered by the account's points at
//!   claim time.  It is "last claimed value", not "highest ever achieved".

pub mod constants;
pub mod error;
pub mod processor;
pub mod state;


pub use {
    constants::{GLOBAL_SCHEMA, LOCAL_SCHEMA},
    error::SuperfanError,
    processor::SuperfanPassProgram,
    state::{SuperfanAccountRecord, SuperfanConfig},
};
