//! Approval logic for the Superfan Pass.

use {
    crate::{
        constants::{
            KEY_ADMIN, KEY_POINTS, KEY_TIER, MIN_CALL_ARGS, SELECTOR_ADD_POINTS,
            SELECTOR_CLAIM_TIER,
        },
        error::SuperfanError,
        state::SuperfanConfig,
    },
    encore_ledger::{ApplicationProgram, CallContext, OnCompletion, StateValue, TxnError},
    log::trace,
};

/// The Superfan Pass approval/clear program.
///
/// Admin-gated point issuance and self-service tier claims against
/// per-account `pts`/`tier` counters.
pub struct SuperfanPassProgram;

impl ApplicationProgram for SuperfanPassProgram {
    fn approval(&self, ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
        if ctx.is_creation() {
            return process_create(ctx);
        }
        match ctx.call().on_completion {
            OnCompletion::OptIn => process_opt_in(ctx),
            OnCompletion::NoOp => process_call(ctx),
            OnCompletion::CloseOut => Ok(()),
            OnCompletion::UpdateApplication | OnCompletion::DeleteApplication => {
                require_admin(ctx)
            }
            OnCompletion::ClearState => Err(SuperfanError::UnsupportedCompletion.into()),
        }
    }
}

/// Stores the admin address from the single creation argument.
fn process_create(ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
    let admin = ctx
        .call()
        .application_args
        .first()
        .ok_or(SuperfanError::MissingAdminArg)?
        .clone();
    if admin.len() != 32 {
        return Err(SuperfanError::MalformedAdminAddress.into());
    }
    ctx.global_put(KEY_ADMIN, StateValue::Bytes(admin))
}

/// Zero-initializes the caller's counters.
///
/// Opting in again runs the same branch and re-zeroes both slots; callers
/// that care must check their opt-in status off-chain first.
fn process_opt_in(ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
    let sender = *ctx.sender();
    ctx.local_put(&sender, KEY_POINTS, StateValue::Uint(0))?;
    ctx.local_put(&sender, KEY_TIER, StateValue::Uint(0))?;
    Ok(())
}

/// The pass's call selectors, closed over the two known literals.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Entrypoint {
    AddPoints,
    ClaimTier,
}

pub(crate) fn parse_selector(args: &[Vec<u8>]) -> Result<Entrypoint, SuperfanError> {
    let selector = args.first().ok_or(SuperfanError::MissingSelector)?;
    match selector.as_slice() {
        SELECTOR_ADD_POINTS => Ok(Entrypoint::AddPoints),
        SELECTOR_CLAIM_TIER => Ok(Entrypoint::ClaimTier),
        _ => Err(SuperfanError::UnknownSelector),
    }
}

fn process_call(ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
    match parse_selector(&ctx.call().application_args)? {
        Entrypoint::AddPoints => process_add_points(ctx),
        Entrypoint::ClaimTier => process_claim_tier(ctx),
    }
}

/// `add_points` — admin-only point issuance.
///
/// The target is the first foreign account reference if one is supplied,
/// otherwise the caller.  The target must be opted in.
fn process_add_points(ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
    require_admin(ctx)?;

    let args = &ctx.call().application_args;
    if args.len() < MIN_CALL_ARGS {
        return Err(SuperfanError::MissingAmountArg.into());
    }
    let amount = decode_uint(&args[1])?;
    if amount == 0 {
        return Err(SuperfanError::ZeroAmount.into());
    }

    let target = ctx
        .call()
        .accounts
        .first()
        .copied()
        .unwrap_or(*ctx.sender());

    let current = ctx
        .local_get(&target, KEY_POINTS)?
        .and_then(|value| value.as_uint())
        .unwrap_or(0);
    let updated = current
        .checked_add(amount)
        .ok_or(SuperfanError::PointsOverflow)?;
    ctx.local_put(&target, KEY_POINTS, StateValue::Uint(updated))?;

    trace!("superfan add_points: target={target} {current} → {updated}");
    Ok(())
}

/// `claim_tier` — self-service tier claim.
///
/// The tier is set to exactly the claimed threshold, never incremented;
/// claiming a lower threshold later lowers the tier.  Intended "last
/// claimed value" semantics.
fn process_claim_tier(ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
    let args = &ctx.call().application_args;
    if args.len() < MIN_CALL_ARGS {
        return Err(SuperfanError::MissingAmountArg.into());
    }
    let threshold = decode_uint(&args[1])?;
    if threshold == 0 {
        return Err(SuperfanError::ZeroThreshold.into());
    }

    let sender = *ctx.sender();
    let points = ctx
        .local_get(&sender, KEY_POINTS)?
        .and_then(|value| value.as_uint())
        .unwrap_or(0);
    if points < threshold {
        return Err(SuperfanError::InsufficientPoints.into());
    }
    ctx.local_put(&sender, KEY_TIER, StateValue::Uint(threshold))?;

    trace!("superfan claim_tier: sender={sender} tier={threshold}");
    Ok(())
}

fn require_admin(ctx: &CallContext<'_>) -> Result<(), TxnError> {
    let config = SuperfanConfig::load(ctx)?;
    if *ctx.sender() == config.admin {
        Ok(())
    } else {
        Err(SuperfanError::AdminMismatch.into())
    }
}

pub(crate) fn decode_uint(arg: &[u8]) -> Result<u64, SuperfanError> {
    let bytes: [u8; 8] = arg.try_into().map_err(|_| SuperfanError::MalformedUint)?;
    Ok(u64::from_be_bytes(bytes))
}
