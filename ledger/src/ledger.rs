//! The ledger: account balances, asset holdings, deployed applications,
//! and the atomic group evaluator.
//!
//! Evaluation is single-threaded, synchronous, and deterministic.  A group
//! is applied transaction by transaction against a working copy of the
//! ledger; the copy replaces the live state only if every transaction —
//! including every inner payment and every approval program verdict —
//! succeeds.  There is no partial commit and no compensation path.

use {
    crate::{
        address::Address,
        context::CallContext,
        error::{LedgerError, TxnError},
        program::{ApplicationProgram, ProgramHandle},
        state::{StateMap, StateSchema},
        transaction::{
            AppId, ApplicationCallFields, AssetId, OnCompletion, Transaction, TransactionBody,
            TransactionGroup, TransactionHeader,
        },
    },
    log::{debug, trace},
    std::{collections::BTreeMap, fmt, sync::Arc},
};

/// Protocol parameters, fixed for the life of the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtocolParams {
    /// Minimum declared fee per outer transaction, in µ-units.
    pub min_txn_fee: u64,
    /// Maximum number of foreign account references per application call.
    pub max_foreign_accounts: usize,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            min_txn_fee: 1_000,
            max_foreign_accounts: 4,
        }
    }
}

/// A deployed application.
#[derive(Clone)]
pub struct AppInstance {
    pub creator: Address,
    pub global_schema: StateSchema,
    pub local_schema: StateSchema,
    pub global: StateMap,
    /// Local state per opted-in account.
    pub locals: BTreeMap<Address, StateMap>,
    pub(crate) program: Arc<dyn ApplicationProgram + Send + Sync>,
}

impl fmt::Debug for AppInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppInstance")
            .field("creator", &self.creator)
            .field("global_schema", &self.global_schema)
            .field("local_schema", &self.local_schema)
            .field("global", &self.global)
            .field("locals", &self.locals)
            .finish_non_exhaustive()
    }
}

/// What a committed group produced beyond its balance and state effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupReceipt {
    /// App ids allocated by creation calls, in group order.
    pub created_apps: Vec<AppId>,
}

/// The simulated chain state.
#[derive(Clone)]
pub struct Ledger {
    pub(crate) params: ProtocolParams,
    pub(crate) balances: BTreeMap<Address, u64>,
    pub(crate) asset_holdings: BTreeMap<(Address, AssetId), u64>,
    pub(crate) apps: BTreeMap<AppId, AppInstance>,
    pub(crate) registry: BTreeMap<ProgramHandle, Arc<dyn ApplicationProgram + Send + Sync>>,
    next_app_id: AppId,
    next_handle: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_params(ProtocolParams::default())
    }

    pub fn with_params(params: ProtocolParams) -> Self {
        Self {
            params,
            balances: BTreeMap::new(),
            asset_holdings: BTreeMap::new(),
            apps: BTreeMap::new(),
            registry: BTreeMap::new(),
            next_app_id: 1,
            next_handle: 1,
        }
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    // ── Setup (external-collaborator surface) ───────────────────────────

    /// Register a program so creation/update calls can reference it.
    pub fn register_program(
        &mut self,
        program: Arc<dyn ApplicationProgram + Send + Sync>,
    ) -> ProgramHandle {
        let handle = ProgramHandle(self.next_handle);
        self.next_handle = self.next_handle.saturating_add(1);
        self.registry.insert(handle, program);
        handle
    }

    /// Credit `micros` µ-units to `address`.
    ///
    /// Funding is an external-collaborator responsibility (faucets, deploy
    /// tooling); it is not reachable from program logic.
    pub fn fund(&mut self, address: Address, micros: u64) {
        let balance = self.balances.entry(address).or_insert(0);
        *balance = balance.saturating_add(micros);
    }

    /// Set an account's holding of an asset.
    ///
    /// Asset issuance and opt-in bookkeeping are out of scope; tests seed
    /// holdings directly.
    pub fn set_asset_balance(&mut self, address: Address, asset_id: AssetId, amount: u64) {
        self.asset_holdings.insert((address, asset_id), amount);
    }

    // ── Read surface ────────────────────────────────────────────────────

    pub fn balance(&self, address: &Address) -> u64 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    pub fn asset_balance(&self, address: &Address, asset_id: AssetId) -> u64 {
        self.asset_holdings
            .get(&(*address, asset_id))
            .copied()
            .unwrap_or(0)
    }

    pub fn app(&self, app_id: AppId) -> Option<&AppInstance> {
        self.apps.get(&app_id)
    }

    /// An application's global state, by the exact key strings the
    /// deployment tooling reads.
    pub fn global_state(&self, app_id: AppId) -> Option<&StateMap> {
        self.apps.get(&app_id).map(|app| &app.global)
    }

    /// An account's local state for an application, if opted in.
    pub fn local_state(&self, app_id: AppId, address: &Address) -> Option<&StateMap> {
        self.apps
            .get(&app_id)
            .and_then(|app| app.locals.get(address))
    }

    // ── Group evaluation ────────────────────────────────────────────────

    /// Apply an atomic group: all of it or none of it.
    ///
    /// On rejection the ledger is untouched — byte-identical to its
    /// pre-call value — and the error carries the index and trace of the
    /// transaction that failed.
    pub fn submit_group(&mut self, group: &TransactionGroup) -> Result<GroupReceipt, LedgerError> {
        trace!("evaluating group {} ({} txns)", group.id(), group.len());
        let mut working = self.clone();
        let mut receipt = GroupReceipt::default();
        for (index, txn) in group.iter().enumerate() {
            working
                .apply_transaction(group, index, txn, &mut receipt)
                .map_err(|cause| {
                    debug!("group {} rejected at index {index}: {cause}", group.id());
                    LedgerError::Rejected {
                        group_index: index,
                        cause,
                    }
                })?;
        }
        *self = working;
        Ok(receipt)
    }

    fn apply_transaction(
        &mut self,
        group: &TransactionGroup,
        index: usize,
        txn: &Transaction,
        receipt: &mut GroupReceipt,
    ) -> Result<(), TxnError> {
        let header = &txn.header;
        if header.fee < self.params.min_txn_fee {
            return Err(TxnError::FeeBelowMinimum {
                fee: header.fee,
                min_fee: self.params.min_txn_fee,
            });
        }
        // Fees are debited unconditionally; fee routing is out of scope, so
        // they are burned by the model.
        self.debit(&header.sender, header.fee)?;

        match &txn.body {
            TransactionBody::Payment(fields) => {
                self.debit(&header.sender, fields.amount)?;
                self.credit(&fields.receiver, fields.amount)?;
                if !fields.close_remainder_to.is_zero() {
                    let rest = self.balance(&header.sender);
                    self.debit(&header.sender, rest)?;
                    self.credit(&fields.close_remainder_to, rest)?;
                }
                Ok(())
            }
            TransactionBody::AssetTransfer(fields) => {
                // A set clawback field spends from the clawback target, not
                // the transaction sender.
                let source = if fields.asset_sender.is_zero() {
                    header.sender
                } else {
                    fields.asset_sender
                };
                self.debit_asset(&source, fields.asset_id, fields.asset_amount)?;
                self.credit_asset(&fields.asset_receiver, fields.asset_id, fields.asset_amount)?;
                if !fields.asset_close_to.is_zero() {
                    let rest = self.asset_balance(&source, fields.asset_id);
                    self.debit_asset(&source, fields.asset_id, rest)?;
                    self.credit_asset(&fields.asset_close_to, fields.asset_id, rest)?;
                }
                Ok(())
            }
            TransactionBody::ApplicationCall(call) => {
                self.apply_application_call(group, index, header, call, receipt)
            }
        }
    }

    fn apply_application_call(
        &mut self,
        group: &TransactionGroup,
        index: usize,
        header: &TransactionHeader,
        call: &ApplicationCallFields,
        receipt: &mut GroupReceipt,
    ) -> Result<(), TxnError> {
        if call.accounts.len() > self.params.max_foreign_accounts {
            return Err(TxnError::TooManyForeignAccounts {
                count: call.accounts.len(),
                max: self.params.max_foreign_accounts,
            });
        }

        let (app_id, is_creation) = if call.app_id == 0 {
            if call.on_completion != OnCompletion::NoOp {
                return Err(TxnError::InvalidCreation);
            }
            let handle = call.program.ok_or(TxnError::MissingProgram)?;
            let program = self
                .registry
                .get(&handle)
                .cloned()
                .ok_or(TxnError::UnknownProgramHandle(handle))?;
            let app_id = self.next_app_id;
            self.next_app_id = self
                .next_app_id
                .checked_add(1)
                .ok_or(TxnError::ArithmeticOverflow)?;
            self.apps.insert(
                app_id,
                AppInstance {
                    creator: header.sender,
                    global_schema: call.global_schema,
                    local_schema: call.local_schema,
                    global: StateMap::new(),
                    locals: BTreeMap::new(),
                    program,
                },
            );
            receipt.created_apps.push(app_id);
            (app_id, true)
        } else {
            if !self.apps.contains_key(&call.app_id) {
                return Err(TxnError::UnknownApplication {
                    app_id: call.app_id,
                });
            }
            (call.app_id, false)
        };

        let Some(app) = self.apps.get(&app_id) else {
            return Err(TxnError::UnknownApplication { app_id });
        };
        let program = app.program.clone();

        // Leaving requires having joined.
        if matches!(
            call.on_completion,
            OnCompletion::CloseOut | OnCompletion::ClearState
        ) {
            let opted_in = self
                .apps
                .get(&app_id)
                .is_some_and(|app| app.locals.contains_key(&header.sender));
            if !opted_in {
                return Err(TxnError::NotOptedIn {
                    address: header.sender,
                    app_id,
                });
            }
        }

        // The clear-state escape hatch bypasses the approval program:
        // local state is released whatever the clear program says.
        if call.on_completion == OnCompletion::ClearState {
            let mut ctx = CallContext {
                ledger: self,
                group,
                group_index: index,
                header,
                call,
                app_id,
                is_creation: false,
            };
            let _ = program.clear_state(&mut ctx);
            if let Some(app) = self.apps.get_mut(&app_id) {
                app.locals.remove(&header.sender);
            }
            return Ok(());
        }

        // Opt-in allocates the local slots before the approval program
        // runs, so its opt-in branch can initialize them.  Re-opt-in keeps
        // the existing slots; what happens to their contents is the
        // program's decision.
        if !is_creation && call.on_completion == OnCompletion::OptIn {
            if let Some(app) = self.apps.get_mut(&app_id) {
                app.locals.entry(header.sender).or_default();
            }
        }

        {
            let mut ctx = CallContext {
                ledger: self,
                group,
                group_index: index,
                header,
                call,
                app_id,
                is_creation,
            };
            program.approval(&mut ctx)?;
        }

        match call.on_completion {
            OnCompletion::CloseOut => {
                if let Some(app) = self.apps.get_mut(&app_id) {
                    app.locals.remove(&header.sender);
                }
            }
            OnCompletion::DeleteApplication => {
                self.apps.remove(&app_id);
            }
            OnCompletion::UpdateApplication => {
                if let Some(handle) = call.program {
                    let program = self
                        .registry
                        .get(&handle)
                        .cloned()
                        .ok_or(TxnError::UnknownProgramHandle(handle))?;
                    if let Some(app) = self.apps.get_mut(&app_id) {
                        app.program = program;
                    }
                }
            }
            _ => {}
        }

        // Slot budgets were fixed at creation; an approved write-set that
        // no longer fits rejects the group.
        if let Some(app) = self.apps.get(&app_id) {
            if !app.global_schema.fits(&app.global) {
                return Err(TxnError::GlobalSchemaExceeded { app_id });
            }
            for (address, local) in &app.locals {
                if !app.local_schema.fits(local) {
                    return Err(TxnError::LocalSchemaExceeded {
                        app_id,
                        address: *address,
                    });
                }
            }
        }
        Ok(())
    }

    // ── Balance plumbing ────────────────────────────────────────────────

    pub(crate) fn debit(&mut self, address: &Address, micros: u64) -> Result<(), TxnError> {
        let balance = self.balances.entry(*address).or_insert(0);
        *balance = balance
            .checked_sub(micros)
            .ok_or(TxnError::InsufficientBalance {
                address: *address,
                required: micros,
                available: *balance,
            })?;
        Ok(())
    }

    pub(crate) fn credit(&mut self, address: &Address, micros: u64) -> Result<(), TxnError> {
        let balance = self.balances.entry(*address).or_insert(0);
        *balance = balance
            .checked_add(micros)
            .ok_or(TxnError::ArithmeticOverflow)?;
        Ok(())
    }

    fn debit_asset(
        &mut self,
        address: &Address,
        asset_id: AssetId,
        amount: u64,
    ) -> Result<(), TxnError> {
        let holding = self.asset_holdings.entry((*address, asset_id)).or_insert(0);
        *holding = holding
            .checked_sub(amount)
            .ok_or(TxnError::InsufficientAssetBalance {
                address: *address,
                asset_id,
                required: amount,
                available: *holding,
            })?;
        Ok(())
    }

    fn credit_asset(
        &mut self,
        address: &Address,
        asset_id: AssetId,
        amount: u64,
    ) -> Result<(), TxnError> {
        let holding = self.asset_holdings.entry((*address, asset_id)).or_insert(0);
        *holding = holding
            .checked_add(amount)
            .ok_or(TxnError::ArithmeticOverflow)?;
        Ok(())
    }
}
