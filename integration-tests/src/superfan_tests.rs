//! Integration tests for the Superfan Pass: opt-in zeroing, admin-gated
//! point issuance, and tier claims.

#![allow(clippy::arithmetic_side_effects)]

use {
    crate::harness::{u64_arg, Harness, ENC, MIN_FEE},
    assert_matches::assert_matches,
    encore_ledger::{LedgerError, OnCompletion, Transaction, TxnError},
    encore_superfan_pass_program::{constants::SELECTOR_ADD_POINTS, SuperfanError},
};

fn rejected_with(err: LedgerError, cause: SuperfanError) {
    assert_eq!(
        err,
        LedgerError::Rejected {
            group_index: 0,
            cause: cause.into(),
        }
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  1. Opt-in
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn opt_in_zero_initializes_both_counters() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);

    harness.opt_in(pass.app_id, fan).unwrap();

    let record = harness.pass_record(pass.app_id, &fan).unwrap();
    assert_eq!(record.points, 0);
    assert_eq!(record.tier, 0);
}

#[test]
fn repeat_opt_in_re_zeroes_an_existing_record() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);

    harness.opt_in(pass.app_id, fan).unwrap();
    harness
        .add_points(&pass, pass.admin, Some(fan), 40)
        .unwrap();
    harness.claim_tier(&pass, fan, 25).unwrap();

    // Opting in again wipes the slate.  Callers that care must check their
    // opt-in status off-chain first.
    harness.opt_in(pass.app_id, fan).unwrap();
    let record = harness.pass_record(pass.app_id, &fan).unwrap();
    assert_eq!(record.points, 0);
    assert_eq!(record.tier, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
//  2. add_points
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn admin_grants_points_to_a_target_account() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);
    harness.opt_in(pass.app_id, fan).unwrap();

    harness
        .add_points(&pass, pass.admin, Some(fan), 25)
        .unwrap();
    assert_eq!(harness.pass_record(pass.app_id, &fan).unwrap().points, 25);

    harness
        .add_points(&pass, pass.admin, Some(fan), 100)
        .unwrap();
    assert_eq!(harness.pass_record(pass.app_id, &fan).unwrap().points, 125);
}

#[test]
fn add_points_defaults_to_the_caller_when_no_target_is_given() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    harness.opt_in(pass.app_id, pass.admin).unwrap();

    harness.add_points(&pass, pass.admin, None, 7).unwrap();
    assert_eq!(
        harness.pass_record(pass.app_id, &pass.admin).unwrap().points,
        7
    );
}

#[test]
fn non_admin_cannot_grant_points() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);
    let impostor = harness.funded_account(ENC);
    harness.opt_in(pass.app_id, fan).unwrap();

    let err = harness
        .add_points(&pass, impostor, Some(fan), 1_000)
        .unwrap_err();
    rejected_with(err, SuperfanError::AdminMismatch);
    assert_eq!(harness.pass_record(pass.app_id, &fan).unwrap().points, 0);
}

#[test]
fn zero_point_grants_are_refused() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);
    harness.opt_in(pass.app_id, fan).unwrap();

    let err = harness
        .add_points(&pass, pass.admin, Some(fan), 0)
        .unwrap_err();
    rejected_with(err, SuperfanError::ZeroAmount);
}

#[test]
fn granting_to_an_account_that_never_opted_in_rejects() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let stranger = harness.funded_account(ENC);

    let err = harness
        .add_points(&pass, pass.admin, Some(stranger), 10)
        .unwrap_err();
    assert_matches!(
        err,
        LedgerError::Rejected {
            group_index: 0,
            cause: TxnError::NotOptedIn { .. },
        }
    );
}

#[test]
fn point_balances_cannot_wrap() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);
    harness.opt_in(pass.app_id, fan).unwrap();

    harness
        .add_points(&pass, pass.admin, Some(fan), u64::MAX)
        .unwrap();
    let err = harness
        .add_points(&pass, pass.admin, Some(fan), 1)
        .unwrap_err();
    rejected_with(err, SuperfanError::PointsOverflow);
    assert_eq!(
        harness.pass_record(pass.app_id, &fan).unwrap().points,
        u64::MAX
    );
}

#[test]
fn add_points_requires_an_amount_argument() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();

    let err = harness
        .submit(vec![Transaction::app_call(
            pass.admin,
            pass.app_id,
            OnCompletion::NoOp,
            vec![SELECTOR_ADD_POINTS.to_vec()],
            vec![],
            MIN_FEE,
        )])
        .unwrap_err();
    rejected_with(err, SuperfanError::MissingAmountArg);

    let err = harness
        .submit(vec![Transaction::app_call(
            pass.admin,
            pass.app_id,
            OnCompletion::NoOp,
            vec![SELECTOR_ADD_POINTS.to_vec(), vec![1, 2, 3]],
            vec![],
            MIN_FEE,
        )])
        .unwrap_err();
    rejected_with(err, SuperfanError::MalformedUint);
}

#[test]
fn unknown_selector_rejects() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();

    let err = harness
        .submit(vec![Transaction::app_call(
            pass.admin,
            pass.app_id,
            OnCompletion::NoOp,
            vec![b"remove_points".to_vec(), u64_arg(5)],
            vec![],
            MIN_FEE,
        )])
        .unwrap_err();
    rejected_with(err, SuperfanError::UnknownSelector);
}

// ═══════════════════════════════════════════════════════════════════════════
//  3. claim_tier
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn points_gate_the_tier_claim() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);
    harness.opt_in(pass.app_id, fan).unwrap();

    // Fresh member with 25 points cannot claim tier 100.
    harness
        .add_points(&pass, pass.admin, Some(fan), 25)
        .unwrap();
    let err = harness.claim_tier(&pass, fan, 100).unwrap_err();
    rejected_with(err, SuperfanError::InsufficientPoints);
    assert_eq!(harness.pass_record(pass.app_id, &fan).unwrap().tier, 0);

    // Another 100 points later the same claim succeeds, and the tier is
    // the threshold itself, not the balance.
    harness
        .add_points(&pass, pass.admin, Some(fan), 100)
        .unwrap();
    harness.claim_tier(&pass, fan, 100).unwrap();
    let record = harness.pass_record(pass.app_id, &fan).unwrap();
    assert_eq!(record.points, 125);
    assert_eq!(record.tier, 100);
}

#[test]
fn claiming_a_lower_threshold_lowers_the_tier() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);
    harness.opt_in(pass.app_id, fan).unwrap();
    harness
        .add_points(&pass, pass.admin, Some(fan), 500)
        .unwrap();

    harness.claim_tier(&pass, fan, 100).unwrap();
    assert_eq!(harness.pass_record(pass.app_id, &fan).unwrap().tier, 100);

    // Tier is "last claimed value", not "highest ever achieved".
    harness.claim_tier(&pass, fan, 50).unwrap();
    assert_eq!(harness.pass_record(pass.app_id, &fan).unwrap().tier, 50);
}

#[test]
fn zero_threshold_claims_are_refused() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);
    harness.opt_in(pass.app_id, fan).unwrap();

    let err = harness.claim_tier(&pass, fan, 0).unwrap_err();
    rejected_with(err, SuperfanError::ZeroThreshold);
}

#[test]
fn claim_tier_requires_opt_in() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let stranger = harness.funded_account(ENC);

    let err = harness.claim_tier(&pass, stranger, 1).unwrap_err();
    assert_matches!(
        err,
        LedgerError::Rejected {
            cause: TxnError::NotOptedIn { .. },
            ..
        }
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  4. End-to-end loyalty flow
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn grant_claim_grant_claim_walkthrough() {
    let mut harness = Harness::new();
    let pass = harness.deploy_superfan();
    let fan = harness.funded_account(ENC);

    harness.opt_in(pass.app_id, fan).unwrap();
    harness
        .add_points(&pass, pass.admin, Some(fan), 25)
        .unwrap();
    assert_eq!(harness.pass_record(pass.app_id, &fan).unwrap().points, 25);

    let err = harness.claim_tier(&pass, fan, 100).unwrap_err();
    rejected_with(err, SuperfanError::InsufficientPoints);

    harness
        .add_points(&pass, pass.admin, Some(fan), 100)
        .unwrap();
    harness.claim_tier(&pass, fan, 100).unwrap();

    let record = harness.pass_record(pass.app_id, &fan).unwrap();
    assert_eq!(record.points, 125);
    assert_eq!(record.tier, 100);
}
