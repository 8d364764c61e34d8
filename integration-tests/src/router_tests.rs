//! Integration tests for Royalty Router sales: split economics, rounding
//! dust, resale royalties, and fee provisioning.

#![allow(clippy::arithmetic_side_effects)]

use {
    crate::harness::{
        set_call_args, Harness, APP_CALL_FLAT_FEE, ENC, MIN_FEE, ROUTER_FLOAT, TICKET_ASA,
    },
    assert_matches::assert_matches,
    encore_ledger::{LedgerError, TxnError},
    encore_royalty_router_program::RouterError,
};

// ═══════════════════════════════════════════════════════════════════════════
//  1. Primary sale splits
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn buy_splits_exactly_when_bps_sum_to_denominator() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 500);
    let buyer = harness.funded_account(10 * ENC);

    // 1_000_000 × (7000, 2500, 500) bps divides evenly: no dust.
    let price = 1_000_000;
    let group = harness.buy_group(&fixture, buyer, price);
    harness.submit(group).unwrap();

    assert_eq!(harness.ledger.balance(&fixture.p1), 700_000);
    assert_eq!(harness.ledger.balance(&fixture.p2), 250_000);
    assert_eq!(harness.ledger.balance(&fixture.p3), 50_000);

    // The app account took the principal in and paid all of it out.
    assert_eq!(harness.ledger.balance(&fixture.app_address), ROUTER_FLOAT);

    // Buyer paid price plus the two outer fees it signed.
    assert_eq!(
        harness.ledger.balance(&buyer),
        10 * ENC - price - APP_CALL_FLAT_FEE - MIN_FEE
    );

    // The ticket moved seller → buyer.
    assert_eq!(harness.ledger.asset_balance(&buyer, TICKET_ASA), 1);
    assert_eq!(harness.ledger.asset_balance(&fixture.seller, TICKET_ASA), 99);
}

#[test]
fn buy_floors_each_split_and_retains_the_dust() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 500);
    let buyer = harness.funded_account(10 * ENC);

    // 1_000_001 floors every leg; 1 µ-unit stays with the app.
    let group = harness.buy_group(&fixture, buyer, 1_000_001);
    harness.submit(group).unwrap();

    assert_eq!(harness.ledger.balance(&fixture.p1), 700_000);
    assert_eq!(harness.ledger.balance(&fixture.p2), 250_000);
    assert_eq!(harness.ledger.balance(&fixture.p3), 50_000);
    assert_eq!(
        harness.ledger.balance(&fixture.app_address),
        ROUTER_FLOAT + 1
    );
}

#[test]
fn dust_accumulates_across_sales() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 500);
    let buyer = harness.funded_account(100 * ENC);

    for _ in 0..3 {
        let group = harness.buy_group(&fixture, buyer, 1_000_001);
        harness.submit(group).unwrap();
    }

    assert_eq!(
        harness.ledger.balance(&fixture.app_address),
        ROUTER_FLOAT + 3
    );
    assert_eq!(harness.ledger.asset_balance(&buyer, TICKET_ASA), 3);
    assert_eq!(harness.ledger.balance(&fixture.p1), 3 * 700_000);
}

#[test]
fn buy_with_partial_weights_leaves_the_residue_with_the_app() {
    let mut harness = Harness::new();
    // 1000 + 2000 + 3000 = 6000 bps: 40 % of every sale stays put.
    let fixture = harness.deploy_router((1_000, 2_000, 3_000), 500);
    let buyer = harness.funded_account(10 * ENC);

    let price = 1_000_000;
    let group = harness.buy_group(&fixture, buyer, price);
    harness.submit(group).unwrap();

    assert_eq!(harness.ledger.balance(&fixture.p1), 100_000);
    assert_eq!(harness.ledger.balance(&fixture.p2), 200_000);
    assert_eq!(harness.ledger.balance(&fixture.p3), 300_000);
    assert_eq!(
        harness.ledger.balance(&fixture.app_address),
        ROUTER_FLOAT + 400_000
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  2. Secondary sale royalties
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn resale_pays_royalty_and_exact_remainder() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 500);
    let holder = harness.funded_account(ENC);
    let buyer = harness.funded_account(10 * ENC);
    harness.ledger.set_asset_balance(holder, TICKET_ASA, 1);

    // 1_200_000 at 500 bps royalty: 60_000 to p1, 1_140_000 back to the
    // holder, summing to the principal exactly.
    let price = 1_200_000;
    let group = harness.resale_group(&fixture, holder, buyer, price);
    harness.submit(group).unwrap();

    assert_eq!(harness.ledger.balance(&fixture.p1), 60_000);
    assert_eq!(
        harness.ledger.balance(&holder),
        ENC + 1_140_000 - MIN_FEE // remainder in, asset-transfer fee out
    );
    assert_eq!(harness.ledger.balance(&fixture.app_address), ROUTER_FLOAT);
    assert_eq!(harness.ledger.asset_balance(&buyer, TICKET_ASA), 1);
    assert_eq!(harness.ledger.asset_balance(&holder, TICKET_ASA), 0);
}

#[test]
fn resale_with_zero_royalty_returns_everything_to_the_holder() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 0);
    let holder = harness.funded_account(ENC);
    let buyer = harness.funded_account(10 * ENC);
    harness.ledger.set_asset_balance(holder, TICKET_ASA, 1);

    let group = harness.resale_group(&fixture, holder, buyer, 500_000);
    harness.submit(group).unwrap();

    assert_eq!(harness.ledger.balance(&fixture.p1), 0);
    assert_eq!(harness.ledger.balance(&holder), ENC + 500_000 - MIN_FEE);
}

#[test]
fn resale_with_full_royalty_leaves_the_holder_nothing() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 10_000);
    let holder = harness.funded_account(ENC);
    let buyer = harness.funded_account(10 * ENC);
    harness.ledger.set_asset_balance(holder, TICKET_ASA, 1);

    let group = harness.resale_group(&fixture, holder, buyer, 500_000);
    harness.submit(group).unwrap();

    assert_eq!(harness.ledger.balance(&fixture.p1), 500_000);
    assert_eq!(harness.ledger.balance(&holder), ENC - MIN_FEE);
}

// ═══════════════════════════════════════════════════════════════════════════
//  3. Fee provisioning
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn buy_call_must_prepay_three_inner_fees() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 500);
    let buyer = harness.funded_account(10 * ENC);

    let mut group = harness.buy_group(&fixture, buyer, 1_000_000);
    group[0].header.fee = 3 * MIN_FEE - 1;
    let err = harness.submit(group).unwrap_err();
    assert_eq!(
        err,
        LedgerError::Rejected {
            group_index: 0,
            cause: RouterError::FeeTooLow.into(),
        }
    );
    assert_eq!(harness.ledger.balance(&buyer), 10 * ENC);
    assert_eq!(harness.ledger.balance(&fixture.p1), 0);

    // Exactly 3 × min fee is the floor.
    let mut group = harness.buy_group(&fixture, buyer, 1_000_000);
    group[0].header.fee = 3 * MIN_FEE;
    harness.submit(group).unwrap();
}

#[test]
fn resale_call_must_prepay_two_inner_fees() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 500);
    let holder = harness.funded_account(ENC);
    let buyer = harness.funded_account(10 * ENC);
    harness.ledger.set_asset_balance(holder, TICKET_ASA, 1);

    let mut group = harness.resale_group(&fixture, holder, buyer, 500_000);
    group[0].header.fee = 2 * MIN_FEE - 1;
    let err = harness.submit(group).unwrap_err();
    assert_eq!(
        err,
        LedgerError::Rejected {
            group_index: 0,
            cause: RouterError::FeeTooLow.into(),
        }
    );

    let mut group = harness.resale_group(&fixture, holder, buyer, 500_000);
    group[0].header.fee = 2 * MIN_FEE;
    harness.submit(group).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
//  4. Dispatch
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn unknown_selector_rejects_the_whole_group() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 500);
    let buyer = harness.funded_account(10 * ENC);

    let mut group = harness.buy_group(&fixture, buyer, 1_000_000);
    set_call_args(&mut group[0], vec![b"refund".to_vec()]);
    let err = harness.submit(group).unwrap_err();
    assert_eq!(
        err,
        LedgerError::Rejected {
            group_index: 0,
            cause: RouterError::UnknownSelector.into(),
        }
    );
    assert_eq!(harness.ledger.balance(&buyer), 10 * ENC);
    assert_eq!(harness.ledger.asset_balance(&buyer, TICKET_ASA), 0);
}

#[test]
fn missing_selector_rejects() {
    let mut harness = Harness::new();
    let fixture = harness.deploy_router((7_000, 2_500, 500), 500);
    let buyer = harness.funded_account(10 * ENC);

    let mut group = harness.buy_group(&fixture, buyer, 1_000_000);
    set_call_args(&mut group[0], vec![]);
    let err = harness.submit(group).unwrap_err();
    assert_eq!(
        err,
        LedgerError::Rejected {
            group_index: 0,
            cause: RouterError::MissingSelector.into(),
        }
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  5. Funding discipline
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn unfunded_app_account_cannot_cover_splits_and_rolls_back() {
    let mut harness = Harness::new();
    // Hand-rolled deployment with no float: the inner payments are emitted
    // before the payment leg lands, so there is nothing to pay them from.
    let creator = harness.funded_account(10 * ENC);
    let p1 = encore_ledger::Address::new_unique();
    let p2 = encore_ledger::Address::new_unique();
    let p3 = encore_ledger::Address::new_unique();
    let seller = encore_ledger::Address::new_unique();
    harness.ledger.set_asset_balance(seller, TICKET_ASA, 1);
    let args =
        Harness::router_create_args((p1, p2, p3), (7_000, 2_500, 500), 500, TICKET_ASA, seller);
    let receipt = harness.try_deploy_router(creator, args).unwrap();
    let fixture = crate::harness::RouterFixture {
        app_id: receipt.created_apps[0],
        app_address: encore_ledger::Address::app_address(receipt.created_apps[0]),
        creator,
        p1,
        p2,
        p3,
        seller,
    };

    let buyer = harness.funded_account(10 * ENC);
    let group = harness.buy_group(&fixture, buyer, 1_000_000);
    let err = harness.submit(group).unwrap_err();
    assert_matches!(
        err,
        LedgerError::Rejected {
            group_index: 0,
            cause: TxnError::InsufficientBalance { .. },
        }
    );
    // All-or-nothing: the buyer keeps everything, nobody was paid.
    assert_eq!(harness.ledger.balance(&buyer), 10 * ENC);
    assert_eq!(harness.ledger.balance(&p1), 0);
    assert_eq!(harness.ledger.asset_balance(&seller, TICKET_ASA), 1);
}
