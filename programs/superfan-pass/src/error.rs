//! Custom errors for the Superfan Pass program.

use {
    crate::constants::PROGRAM_NAME,
    encore_ledger::{Rejection, TxnError},
    num_derive::{FromPrimitive, ToPrimitive},
    num_traits::ToPrimitive as _,
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum SuperfanError {
    #[error("creation expects the admin address argument")]
    MissingAdminArg = 0,

    #[error("admin address argument is not 32 bytes")]
    MalformedAdminAddress,

    #[error("call carries no selector argument")]
    MissingSelector,

    #[error("unrecognized call selector")]
    UnknownSelector,

    #[error("call expects selector and amount arguments")]
    MissingAmountArg,

    #[error("integer argument is not 8 bytes big-endian")]
    MalformedUint,

    #[error("point amount must be strictly positive")]
    ZeroAmount,

    #[error("caller is not the configured admin")]
    AdminMismatch,

    #[error("tier threshold must be strictly positive")]
    ZeroThreshold,

    #[error("caller's points are below the claimed threshold")]
    InsufficientPoints,

    #[error("point balance overflow")]
    PointsOverflow,

    #[error("admin configuration is missing or corrupt")]
    ConfigCorrupt,

    #[error("on-completion not handled by the approval program")]
    UnsupportedCompletion,
}

impl From<SuperfanError> for Rejection {
    fn from(err: SuperfanError) -> Self {
        let code = err.to_u32().unwrap_or(u32::MAX);
        Rejection::new(PROGRAM_NAME, code, err.to_string())
    }
}

impl From<SuperfanError> for TxnError {
    fn from(err: SuperfanError) -> Self {
        TxnError::Program(Rejection::from(err))
    }
}
