//! The interface an on-chain program presents to the ledger.

use {
    crate::{context::CallContext, error::TxnError},
    serde::{Deserialize, Serialize},
    thiserror::Error,
};

/// Handle to a program registered with the ledger.
///
/// Creation and update calls name the program to install through this
/// handle so that transactions stay plain, canonically encodable data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProgramHandle(pub u64);

/// An approval program's refusal of a call.
///
/// Every refusal — bad shape, bad authority, bad arithmetic — surfaces the
/// same way: the group is rejected with this trace attached.  `code` is the
/// program error's discriminant; `reason` is a human-readable line for
/// debugging tooling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{program} rejected the call (code {code}): {reason}")]
pub struct Rejection {
    pub program: &'static str,
    pub code: u32,
    pub reason: String,
}

impl Rejection {
    pub fn new(program: &'static str, code: u32, reason: impl Into<String>) -> Self {
        Self {
            program,
            code,
            reason: reason.into(),
        }
    }
}

/// A deployed application: a pair of decision procedures over the call
/// context.
///
/// `approval` runs once per application-call transaction and decides the
/// fate of the whole group: `Ok(())` approves, any error rejects with no
/// effects.  State writes and inner payments performed through the context
/// take hold only if every transaction in the group commits.
pub trait ApplicationProgram {
    fn approval(&self, ctx: &mut CallContext<'_>) -> Result<(), TxnError>;

    /// Clear-state escape hatch.  The ledger releases the caller's local
    /// state regardless of this verdict; deployed programs here are
    /// intentionally no-ops.
    fn clear_state(&self, _ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
        Ok(())
    }
}
