//! Encore Test Harness
//!
//! A lightweight environment for driving the Encore programs end-to-end:
//! a fresh ledger with both programs registered, fixture accounts, and
//! builders for the canonical sale and loyalty groups.
//!
//! Group builders return plain `Vec<Transaction>` so tests can mis-shape
//! any leg before sealing the group — the adversarial matrix lives in the
//! tests, not here.

#![allow(clippy::arithmetic_side_effects)]

use {
    encore_ledger::{
        Address, AppId, AssetId, GroupReceipt, Ledger, LedgerError, OnCompletion, ProgramHandle,
        Transaction, TransactionGroup,
    },
    encore_royalty_router_program as router,
    encore_superfan_pass_program as superfan,
    std::sync::Arc,
};

// ─── Constants ───────────────────────────────────────────────────────────────

/// One ENC in µ-units.
pub const ENC: u64 = 1_000_000;

/// Protocol minimum fee per outer transaction.
pub const MIN_FEE: u64 = 1_000;

/// Flat fee on sale application calls, conservative for 3 inner payments.
pub const APP_CALL_FLAT_FEE: u64 = 4_000;

/// Ticket asset id used across tests (decimals = 0, amount moved = 1).
pub const TICKET_ASA: AssetId = 4_242;

/// Float pre-funded into the router's app account so inner payments clear
/// while the payment leg is still in flight.
pub const ROUTER_FLOAT: u64 = 100 * ENC;

// ─── Fixtures ────────────────────────────────────────────────────────────────

/// A deployed Royalty Router and its cast of participants.
#[derive(Debug)]
pub struct RouterFixture {
    pub app_id: AppId,
    pub app_address: Address,
    pub creator: Address,
    pub p1: Address,
    pub p2: Address,
    pub p3: Address,
    pub seller: Address,
}

/// A deployed Superfan Pass.
#[derive(Debug)]
pub struct SuperfanFixture {
    pub app_id: AppId,
    pub admin: Address,
}

// ─── Harness ─────────────────────────────────────────────────────────────────

/// Fresh ledger with both Encore programs registered.
pub struct Harness {
    pub ledger: Ledger,
    pub router_handle: ProgramHandle,
    pub superfan_handle: ProgramHandle,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        let mut ledger = Ledger::new();
        let router_handle = ledger.register_program(Arc::new(router::RoyaltyRouterProgram));
        let superfan_handle = ledger.register_program(Arc::new(superfan::SuperfanPassProgram));
        Self {
            ledger,
            router_handle,
            superfan_handle,
        }
    }

    /// A new account funded with `micros` µ-units.
    pub fn funded_account(&mut self, micros: u64) -> Address {
        let address = Address::new_unique();
        self.ledger.fund(address, micros);
        address
    }

    /// Seal `txns` into a group and submit it.
    pub fn submit(&mut self, txns: Vec<Transaction>) -> Result<GroupReceipt, LedgerError> {
        let group = TransactionGroup::new(txns).expect("test groups are well-formed");
        self.ledger.submit_group(&group)
    }

    // ── Royalty Router ──────────────────────────────────────────────────

    /// The nine positional creation arguments, in protocol order.
    pub fn router_create_args(
        payouts: (Address, Address, Address),
        bps: (u64, u64, u64),
        roy_bps: u64,
        asa: AssetId,
        seller: Address,
    ) -> Vec<Vec<u8>> {
        vec![
            payouts.0.to_vec(),
            payouts.1.to_vec(),
            payouts.2.to_vec(),
            u64_arg(bps.0),
            u64_arg(bps.1),
            u64_arg(bps.2),
            u64_arg(roy_bps),
            u64_arg(asa),
            seller.to_vec(),
        ]
    }

    /// Deploy a router, give the seller a stock of tickets, and float the
    /// app account.
    pub fn deploy_router(&mut self, bps: (u64, u64, u64), roy_bps: u64) -> RouterFixture {
        let creator = self.funded_account(10 * ENC);
        let p1 = Address::new_unique();
        let p2 = Address::new_unique();
        let p3 = Address::new_unique();
        // The seller signs the asset leg, so it needs fee money too.
        let seller = self.funded_account(ENC);
        self.ledger.set_asset_balance(seller, TICKET_ASA, 100);

        let args = Self::router_create_args((p1, p2, p3), bps, roy_bps, TICKET_ASA, seller);
        let receipt = self
            .try_deploy_router(creator, args)
            .expect("router deploys");
        let app_id = receipt.created_apps[0];
        let app_address = Address::app_address(app_id);
        self.ledger.fund(app_address, ROUTER_FLOAT);

        RouterFixture {
            app_id,
            app_address,
            creator,
            p1,
            p2,
            p3,
            seller,
        }
    }

    /// Submit a router creation call with arbitrary arguments.
    pub fn try_deploy_router(
        &mut self,
        creator: Address,
        args: Vec<Vec<u8>>,
    ) -> Result<GroupReceipt, LedgerError> {
        let create = Transaction::app_create(
            creator,
            self.router_handle,
            router::GLOBAL_SCHEMA,
            router::LOCAL_SCHEMA,
            args,
            MIN_FEE,
        );
        self.submit(vec![create])
    }

    /// The canonical primary-sale group:
    /// `[AppCall "buy", Payment buyer→app, AssetTransfer seller→buyer]`.
    pub fn buy_group(
        &self,
        fixture: &RouterFixture,
        buyer: Address,
        price: u64,
    ) -> Vec<Transaction> {
        vec![
            Transaction::app_call(
                buyer,
                fixture.app_id,
                OnCompletion::NoOp,
                vec![router::constants::SELECTOR_BUY.to_vec()],
                vec![fixture.p1, fixture.p2, fixture.p3, fixture.seller],
                APP_CALL_FLAT_FEE,
            ),
            Transaction::payment(buyer, fixture.app_address, price, MIN_FEE),
            Transaction::asset_transfer(fixture.seller, TICKET_ASA, buyer, 1, MIN_FEE),
        ]
    }

    /// The canonical secondary-sale group:
    /// `[AppCall "resale", Payment buyer→app, AssetTransfer holder→buyer]`.
    pub fn resale_group(
        &self,
        fixture: &RouterFixture,
        holder: Address,
        buyer: Address,
        price: u64,
    ) -> Vec<Transaction> {
        vec![
            Transaction::app_call(
                buyer,
                fixture.app_id,
                OnCompletion::NoOp,
                vec![router::constants::SELECTOR_RESALE.to_vec()],
                vec![fixture.p1, fixture.p2, fixture.p3, holder],
                APP_CALL_FLAT_FEE,
            ),
            Transaction::payment(buyer, fixture.app_address, price, MIN_FEE),
            Transaction::asset_transfer(holder, TICKET_ASA, buyer, 1, MIN_FEE),
        ]
    }

    // ── Superfan Pass ───────────────────────────────────────────────────

    pub fn deploy_superfan(&mut self) -> SuperfanFixture {
        let admin = self.funded_account(10 * ENC);
        let create = Transaction::app_create(
            admin,
            self.superfan_handle,
            superfan::GLOBAL_SCHEMA,
            superfan::LOCAL_SCHEMA,
            vec![admin.to_vec()],
            MIN_FEE,
        );
        let receipt = self.submit(vec![create]).expect("superfan deploys");
        SuperfanFixture {
            app_id: receipt.created_apps[0],
            admin,
        }
    }

    pub fn opt_in(&mut self, app_id: AppId, account: Address) -> Result<GroupReceipt, LedgerError> {
        self.submit(vec![Transaction::app_call(
            account,
            app_id,
            OnCompletion::OptIn,
            vec![],
            vec![],
            MIN_FEE,
        )])
    }

    /// `add_points` from `sender`, optionally targeting a foreign account.
    pub fn add_points(
        &mut self,
        fixture: &SuperfanFixture,
        sender: Address,
        target: Option<Address>,
        amount: u64,
    ) -> Result<GroupReceipt, LedgerError> {
        let accounts = target.into_iter().collect();
        self.submit(vec![Transaction::app_call(
            sender,
            fixture.app_id,
            OnCompletion::NoOp,
            vec![
                superfan::constants::SELECTOR_ADD_POINTS.to_vec(),
                u64_arg(amount),
            ],
            accounts,
            MIN_FEE,
        )])
    }

    pub fn claim_tier(
        &mut self,
        fixture: &SuperfanFixture,
        sender: Address,
        threshold: u64,
    ) -> Result<GroupReceipt, LedgerError> {
        self.submit(vec![Transaction::app_call(
            sender,
            fixture.app_id,
            OnCompletion::NoOp,
            vec![
                superfan::constants::SELECTOR_CLAIM_TIER.to_vec(),
                u64_arg(threshold),
            ],
            vec![],
            MIN_FEE,
        )])
    }

    /// Typed view of an account's pass record, if opted in.
    pub fn pass_record(&self, app_id: AppId, account: &Address) -> Option<superfan::SuperfanAccountRecord> {
        self.ledger
            .local_state(app_id, account)
            .map(superfan::SuperfanAccountRecord::read)
    }
}

/// Encode a uint argument the way every caller does: 8 bytes big-endian.
pub fn u64_arg(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Rewrite an application call's argument vector in place.  No-op on other
/// transaction types.
pub fn set_call_args(txn: &mut Transaction, args: Vec<Vec<u8>>) {
    if let encore_ledger::TransactionBody::ApplicationCall(call) = &mut txn.body {
        call.application_args = args;
    }
}
