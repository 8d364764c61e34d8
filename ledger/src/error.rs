//! Failure types for group construction and group evaluation.
//!
//! Observably there is exactly one failure at the submission boundary:
//! the whole group is rejected and the ledger is left byte-identical.
//! [`TxnError`] is the human-readable trace of *which* assertion or
//! substrate rule failed — useful for tooling, never a structured
//! protocol surface.

use {
    crate::{
        address::Address,
        program::{ProgramHandle, Rejection},
        transaction::{AppId, AssetId},
    },
    thiserror::Error,
};

/// A group that cannot even be formed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("a transaction group must contain at least one transaction")]
    Empty,

    #[error("group of {len} transactions exceeds the {max} maximum")]
    TooLarge { len: usize, max: usize },

    #[error("failed to encode transactions for the group id: {0}")]
    Encode(String),
}

/// Why a transaction within a group failed to apply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxnError {
    #[error("fee {fee} is below the protocol minimum of {min_fee}")]
    FeeBelowMinimum { fee: u64, min_fee: u64 },

    #[error("{address} holds {available} µ-units, needs {required}")]
    InsufficientBalance {
        address: Address,
        required: u64,
        available: u64,
    },

    #[error("{address} holds {available} units of asset {asset_id}, needs {required}")]
    InsufficientAssetBalance {
        address: Address,
        asset_id: AssetId,
        required: u64,
        available: u64,
    },

    #[error("application {app_id} does not exist")]
    UnknownApplication { app_id: AppId },

    #[error("creation call carries no program")]
    MissingProgram,

    #[error("program handle {0:?} is not registered")]
    UnknownProgramHandle(ProgramHandle),

    #[error("application creation must use the no-op completion")]
    InvalidCreation,

    #[error("{address} is not opted in to application {app_id}")]
    NotOptedIn { address: Address, app_id: AppId },

    #[error("{address} is not in the call's account reference list")]
    AccountNotReferenced { address: Address },

    #[error("call references {count} foreign accounts, limit is {max}")]
    TooManyForeignAccounts { count: usize, max: usize },

    #[error("state key of {len} bytes exceeds the {max}-byte limit")]
    KeyTooLong { len: usize, max: usize },

    #[error("state value of {len} bytes exceeds the {max}-byte limit")]
    ValueTooLarge { len: usize, max: usize },

    #[error("application {app_id} exceeded its global state schema")]
    GlobalSchemaExceeded { app_id: AppId },

    #[error("{address} exceeded the local state schema of application {app_id}")]
    LocalSchemaExceeded { app_id: AppId, address: Address },

    #[error("balance arithmetic overflow")]
    ArithmeticOverflow,

    /// The approval program refused the call.
    #[error(transparent)]
    Program(#[from] Rejection),
}

/// Outcome of [`crate::ledger::Ledger::submit_group`] when the group does
/// not commit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("transaction group rejected at index {group_index}: {cause}")]
    Rejected { group_index: usize, cause: TxnError },
}
