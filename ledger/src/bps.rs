//! Basis-point share arithmetic.
//!
//! All split and royalty math is `floor(amount × bps / 10_000)` computed
//! with a u128 intermediate so the product can never overflow, then
//! narrowed back to u64.  Rounding is always toward zero; callers that sum
//! several shares of the same principal accept up to one µ-unit of dust
//! per share.  Never floating point.

use thiserror::Error;

/// Basis points denominator: 10_000 bps = 100 %.
pub const BPS_DENOMINATOR: u64 = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BpsError {
    #[error("{bps} basis points exceed the {BPS_DENOMINATOR} denominator")]
    OutOfRange { bps: u64 },

    #[error("share does not fit in 64 bits")]
    Overflow,
}

/// `floor(amount × bps / 10_000)`.
///
/// With `bps` validated to the denominator the quotient is bounded by
/// `amount` and the `Overflow` arm is unreachable; it is still checked so
/// the caller, not this helper, decides what an out-of-width result means.
pub fn share(amount: u64, bps: u64) -> Result<u64, BpsError> {
    if bps > BPS_DENOMINATOR {
        return Err(BpsError::OutOfRange { bps });
    }
    let product = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(BpsError::Overflow)?;
    let quotient = product / (BPS_DENOMINATOR as u128);
    u64::try_from(quotient).map_err(|_| BpsError::Overflow)
}
