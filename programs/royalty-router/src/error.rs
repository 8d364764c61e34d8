//! Custom errors for the Royalty Router program.
//!
//! Every variant surfaces identically at the submission boundary — the
//! whole group is rejected with no effects.  The variants exist for the
//! human-readable trace, not as a structured protocol surface.

use {
    crate::constants::PROGRAM_NAME,
    encore_ledger::{Rejection, TxnError},
    num_derive::{FromPrimitive, ToPrimitive},
    num_traits::ToPrimitive as _,
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum RouterError {
    #[error("creation expects exactly 9 arguments")]
    BadCreateArgCount = 0,

    #[error("address argument is not 32 bytes")]
    MalformedAddress,

    #[error("integer argument is not 8 bytes big-endian")]
    MalformedUint,

    #[error("basis-point argument exceeds the 10000 denominator")]
    BpsOutOfRange,

    #[error("configured split exceeds 10000 basis points")]
    BpsSumExceeded,

    #[error("reference asset id must be nonzero")]
    ZeroAssetId,

    #[error("call carries no selector argument")]
    MissingSelector,

    #[error("unrecognized call selector")]
    UnknownSelector,

    #[error("sale group must contain exactly 3 transactions")]
    BadGroupSize,

    #[error("application call must be the first transaction in the group")]
    BadCallPosition,

    #[error("call fee does not cover the inner payments")]
    FeeTooLow,

    #[error("second transaction in the group must be a payment")]
    BadPaymentLeg,

    #[error("payment must go to the application account")]
    PaymentNotToApp,

    #[error("payment close-to must be unset")]
    PaymentCloseToSet,

    #[error("payment rekey-to must be unset")]
    PaymentRekeySet,

    #[error("third transaction in the group must be an asset transfer")]
    BadAssetLeg,

    #[error("asset transfer does not move the configured asset")]
    WrongAsset,

    #[error("asset transfer must move exactly 1 unit")]
    WrongAssetAmount,

    #[error("asset transfer sender is not the configured seller")]
    WrongSeller,

    #[error("asset must go to the paying buyer")]
    AssetReceiverMismatch,

    #[error("asset close-to must be unset")]
    AssetCloseToSet,

    #[error("asset transfer rekey-to must be unset")]
    AssetRekeySet,

    #[error("clawback transfers are not accepted")]
    ClawbackSet,

    #[error("router configuration is missing or corrupt")]
    ConfigCorrupt,

    #[error("caller is not the application creator")]
    CreatorMismatch,

    #[error("on-completion not handled by the approval program")]
    UnsupportedCompletion,

    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

impl From<RouterError> for Rejection {
    fn from(err: RouterError) -> Self {
        let code = err.to_u32().unwrap_or(u32::MAX);
        Rejection::new(PROGRAM_NAME, code, err.to_string())
    }
}

impl From<RouterError> for TxnError {
    fn from(err: RouterError) -> Self {
        TxnError::Program(Rejection::from(err))
    }
}
