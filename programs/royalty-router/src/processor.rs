//! Approval logic for the Royalty Router.

use {
    crate::{
        constants::{
            APP_CALL_INDEX, ASSET_TRANSFER_INDEX, BUY_INNER_PAYMENTS, CREATE_ARG_COUNT,
            PAYMENT_INDEX, RESALE_INNER_PAYMENTS, SALE_GROUP_SIZE, SELECTOR_BUY, SELECTOR_RESALE,
        },
        error::RouterError,
        state::RouterConfig,
    },
    encore_ledger::{bps, Address, ApplicationProgram, CallContext, OnCompletion, TxnError},
    log::trace,
};

/// The Royalty Router approval/clear program.
///
/// Splits primary-sale revenue across three payout addresses and routes a
/// fixed royalty plus remainder on secondary sales, all within one atomic
/// sale group.
pub struct RoyaltyRouterProgram;

impl ApplicationProgram for RoyaltyRouterProgram {
    fn approval(&self, ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
        if ctx.is_creation() {
            return process_create(ctx);
        }
        match ctx.call().on_completion {
            OnCompletion::NoOp => process_call(ctx),
            // The router keeps no local state; joining and leaving are vacuous.
            OnCompletion::OptIn | OnCompletion::CloseOut => Ok(()),
            OnCompletion::UpdateApplication | OnCompletion::DeleteApplication => {
                require_creator(ctx)
            }
            OnCompletion::ClearState => Err(RouterError::UnsupportedCompletion.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Reads the nine positional creation arguments and installs the
/// configuration atomically.
///
/// Argument order: P1, P2, P3, BPS1, BPS2, BPS3, ROY_BPS, ASA, SELLER.
fn process_create(ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
    let args = &ctx.call().application_args;
    if args.len() != CREATE_ARG_COUNT {
        return Err(RouterError::BadCreateArgCount.into());
    }

    let config = RouterConfig {
        p1: decode_address(&args[0])?,
        p2: decode_address(&args[1])?,
        p3: decode_address(&args[2])?,
        bps1: decode_bps(&args[3])?,
        bps2: decode_bps(&args[4])?,
        bps3: decode_bps(&args[5])?,
        roy_bps: decode_bps(&args[6])?,
        asa: decode_uint(&args[7])?,
        seller: decode_address(&args[8])?,
    };

    if config.bps_sum() > bps::BPS_DENOMINATOR {
        return Err(RouterError::BpsSumExceeded.into());
    }
    if config.asa == 0 {
        return Err(RouterError::ZeroAssetId.into());
    }

    trace!(
        "router create: asa={} split=({}/{}/{}) roybps={}",
        config.asa,
        config.bps1,
        config.bps2,
        config.bps3,
        config.roy_bps
    );
    config.store(ctx)
}

// ---------------------------------------------------------------------------
// Entrypoint dispatch
// ---------------------------------------------------------------------------

/// The router's call selectors, closed over the two known literals.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Entrypoint {
    Buy,
    Resale,
}

pub(crate) fn parse_selector(args: &[Vec<u8>]) -> Result<Entrypoint, RouterError> {
    let selector = args.first().ok_or(RouterError::MissingSelector)?;
    match selector.as_slice() {
        SELECTOR_BUY => Ok(Entrypoint::Buy),
        SELECTOR_RESALE => Ok(Entrypoint::Resale),
        _ => Err(RouterError::UnknownSelector),
    }
}

fn process_call(ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
    match parse_selector(&ctx.call().application_args)? {
        Entrypoint::Buy => process_buy(ctx),
        Entrypoint::Resale => process_resale(ctx),
    }
}

// ---------------------------------------------------------------------------
// Sale entrypoints
// ---------------------------------------------------------------------------

/// `buy` — primary sale.
///
/// Validates the sale group, then splits the payment leg's amount across
/// p1/p2/p3 per the configured basis points.  Flooring dust stays in the
/// application account.
fn process_buy(ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
    let config = RouterConfig::load(ctx)?;
    // Re-asserted on every sale, not just at creation.
    if config.bps_sum() > bps::BPS_DENOMINATOR {
        return Err(RouterError::BpsSumExceeded.into());
    }

    let sale = validate_sale_group(ctx, &config, SaleKind::Primary)?;

    let to_p1 = share(sale.principal, config.bps1)?;
    let to_p2 = share(sale.principal, config.bps2)?;
    let to_p3 = share(sale.principal, config.bps3)?;

    trace!(
        "router buy: buyer={} principal={} splits=({}/{}/{})",
        sale.buyer,
        sale.principal,
        to_p1,
        to_p2,
        to_p3
    );

    ctx.submit_inner_payment(config.p1, to_p1)?;
    ctx.submit_inner_payment(config.p2, to_p2)?;
    ctx.submit_inner_payment(config.p3, to_p3)?;
    Ok(())
}

/// `resale` — secondary sale.
///
/// Pays the configured royalty to p1 and the exact remainder to whoever is
/// transferring the asset in this group (the current seller).
fn process_resale(ctx: &mut CallContext<'_>) -> Result<(), TxnError> {
    let config = RouterConfig::load(ctx)?;
    let sale = validate_sale_group(ctx, &config, SaleKind::Secondary)?;

    let royalty = share(sale.principal, config.roy_bps)?;
    let remainder = sale
        .principal
        .checked_sub(royalty)
        .ok_or(RouterError::ArithmeticOverflow)?;

    trace!(
        "router resale: buyer={} seller={} principal={} royalty={}",
        sale.buyer,
        sale.asset_sender,
        sale.principal,
        royalty
    );

    ctx.submit_inner_payment(config.p1, royalty)?;
    ctx.submit_inner_payment(sale.asset_sender, remainder)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Group shape validation
// ---------------------------------------------------------------------------

enum SaleKind {
    Primary,
    Secondary,
}

/// What a validated sale group pins down.
struct SaleShape {
    /// Amount of the payment leg, in µ-units.
    principal: u64,
    /// Sender of the payment leg; the asset must land here.
    buyer: Address,
    /// Sender of the asset leg; the remainder recipient on resale.
    asset_sender: Address,
}

/// Asserts the entire shape of the enclosing atomic group before any
/// sub-payment is emitted.
///
/// Primary and secondary sales share one shape; the only differences are
/// the inner-payment count (3 vs 2) and whether the asset sender is pinned
/// to the configured seller.
fn validate_sale_group(
    ctx: &CallContext<'_>,
    config: &RouterConfig,
    kind: SaleKind,
) -> Result<SaleShape, TxnError> {
    if ctx.group_size() != SALE_GROUP_SIZE {
        return Err(RouterError::BadGroupSize.into());
    }
    if ctx.group_index() != APP_CALL_INDEX {
        return Err(RouterError::BadCallPosition.into());
    }

    // Inner payments carry zero fee; the outer call pre-pays for them.
    let inner_payments = match kind {
        SaleKind::Primary => BUY_INNER_PAYMENTS,
        SaleKind::Secondary => RESALE_INNER_PAYMENTS,
    };
    let required_fee = ctx.min_txn_fee().saturating_mul(inner_payments);
    if ctx.header().fee < required_fee {
        return Err(RouterError::FeeTooLow.into());
    }

    let payment = ctx
        .group()
        .payment_leg(PAYMENT_INDEX)
        .ok_or(RouterError::BadPaymentLeg)?;
    if payment.fields.receiver != ctx.app_address() {
        return Err(RouterError::PaymentNotToApp.into());
    }
    if !payment.fields.close_remainder_to.is_zero() {
        return Err(RouterError::PaymentCloseToSet.into());
    }
    if !payment.header.rekey_to.is_zero() {
        return Err(RouterError::PaymentRekeySet.into());
    }

    let transfer = ctx
        .group()
        .asset_transfer_leg(ASSET_TRANSFER_INDEX)
        .ok_or(RouterError::BadAssetLeg)?;
    if transfer.fields.asset_id != config.asa {
        return Err(RouterError::WrongAsset.into());
    }
    if transfer.fields.asset_amount != 1 {
        return Err(RouterError::WrongAssetAmount.into());
    }
    if matches!(kind, SaleKind::Primary) && transfer.header.sender != config.seller {
        return Err(RouterError::WrongSeller.into());
    }
    // Buyer symmetry is structural: the asset goes to whoever paid.
    if transfer.fields.asset_receiver != payment.header.sender {
        return Err(RouterError::AssetReceiverMismatch.into());
    }
    if !transfer.fields.asset_close_to.is_zero() {
        return Err(RouterError::AssetCloseToSet.into());
    }
    if !transfer.header.rekey_to.is_zero() {
        return Err(RouterError::AssetRekeySet.into());
    }
    if !transfer.fields.asset_sender.is_zero() {
        return Err(RouterError::ClawbackSet.into());
    }

    Ok(SaleShape {
        principal: payment.fields.amount,
        buyer: payment.header.sender,
        asset_sender: transfer.header.sender,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_creator(ctx: &CallContext<'_>) -> Result<(), TxnError> {
    if *ctx.sender() == ctx.creator()? {
        Ok(())
    } else {
        Err(RouterError::CreatorMismatch.into())
    }
}

fn share(amount: u64, weight: u64) -> Result<u64, RouterError> {
    bps::share(amount, weight).map_err(|_| RouterError::ArithmeticOverflow)
}

pub(crate) fn decode_address(arg: &[u8]) -> Result<Address, RouterError> {
    Address::try_from(arg).map_err(|_| RouterError::MalformedAddress)
}

pub(crate) fn decode_uint(arg: &[u8]) -> Result<u64, RouterError> {
    let bytes: [u8; 8] = arg.try_into().map_err(|_| RouterError::MalformedUint)?;
    Ok(u64::from_be_bytes(bytes))
}

pub(crate) fn decode_bps(arg: &[u8]) -> Result<u64, RouterError> {
    let value = decode_uint(arg)?;
    if value > bps::BPS_DENOMINATOR {
        return Err(RouterError::BpsOutOfRange);
    }
    Ok(value)
}
