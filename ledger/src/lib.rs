//! # Encore Ledger
//!
//! A deterministic, single-threaded model of the account-centric execution
//! substrate the Encore programs deploy to: accounts with µ-unit balances
//! and asset holdings, applications with global/local key-value state, and
//! **atomic transaction groups** that commit or reject as one unit.
//!
//! The model exposes exactly the operation contracts the programs rely on —
//! atomic group validation, global/local storage, inner-payment submission —
//! and nothing of the surrounding chain (consensus, networking, and key
//! management are external concerns).
//!
//! ## Quick start
//!
//! ```rust
//! use {
//!     encore_ledger::{
//!         ApplicationProgram, CallContext, Ledger, StateSchema, Transaction, TransactionGroup,
//!         TxnError,
//!     },
//!     std::sync::Arc,
//! };
//!
//! struct ApproveAll;
//!
//! impl ApplicationProgram for ApproveAll {
//!     fn approval(&self, _ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
//!         Ok(())
//!     }
//! }
//!
//! let mut ledger = Ledger::new();
//! let creator = encore_ledger::Address::new_unique();
//! ledger.fund(creator, 1_000_000);
//!
//! let handle = ledger.register_program(Arc::new(ApproveAll));
//! let create = Transaction::app_create(
//!     creator,
//!     handle,
//!     StateSchema::new(0, 0),
//!     StateSchema::new(0, 0),
//!     vec![],
//!     1_000,
//! );
//! let group = TransactionGroup::new(vec![create]).unwrap();
//! let receipt = ledger.submit_group(&group).unwrap();
//! assert_eq!(receipt.created_apps, vec![1]);
//! ```
//!
//! See [`ledger`] for the evaluation rules and [`context`] for the surface
//! an approval program sees.

pub mod address;
pub mod bps;
pub mod context;
pub mod error;
pub mod ledger;
pub mod program;
pub mod state;
pub mod transaction;


// Re-exports for convenience.
pub use {
    address::Address,
    context::CallContext,
    error::{GroupError, LedgerError, TxnError},
    ledger::{AppInstance, GroupReceipt, Ledger, ProtocolParams},
    program::{ApplicationProgram, ProgramHandle, Rejection},
    state::{StateMap, StateSchema, StateValue},
    transaction::{
        AppId, ApplicationCallFields, AssetId, AssetTransferFields, AssetTransferLeg, GroupId,
        OnCompletion, PaymentFields, PaymentLeg, Transaction, TransactionBody, TransactionGroup,
        TransactionHeader, MAX_GROUP_SIZE,
    },
};
