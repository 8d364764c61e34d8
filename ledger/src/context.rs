//! The execution context handed to an approval program.
//!
//! A [`CallContext`] is the complete decision-procedure input: the call
//! transaction, the enclosing group, global/local state access, protocol
//! parameters, and the inner-payment emitter.  Everything mutated through
//! the context lands on the group's working ledger and takes hold only if
//! the whole group commits.

use {
    crate::{
        address::Address,
        error::TxnError,
        ledger::Ledger,
        state::{StateValue, MAX_STATE_KEY_LEN, MAX_STATE_VALUE_LEN},
        transaction::{AppId, ApplicationCallFields, TransactionGroup, TransactionHeader},
    },
    log::trace,
};

pub struct CallContext<'a> {
    pub(crate) ledger: &'a mut Ledger,
    pub(crate) group: &'a TransactionGroup,
    pub(crate) group_index: usize,
    pub(crate) header: &'a TransactionHeader,
    pub(crate) call: &'a ApplicationCallFields,
    pub(crate) app_id: AppId,
    pub(crate) is_creation: bool,
}

impl CallContext<'_> {
    // ── Call identity ───────────────────────────────────────────────────

    pub fn sender(&self) -> &Address {
        &self.header.sender
    }

    pub fn header(&self) -> &TransactionHeader {
        self.header
    }

    pub fn call(&self) -> &ApplicationCallFields {
        self.call
    }

    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    /// The application's own derived account address.
    pub fn app_address(&self) -> Address {
        Address::app_address(self.app_id)
    }

    /// The account that created the application.
    pub fn creator(&self) -> Result<Address, TxnError> {
        self.ledger
            .apps
            .get(&self.app_id)
            .map(|app| app.creator)
            .ok_or(TxnError::UnknownApplication {
                app_id: self.app_id,
            })
    }

    /// Whether this call is the one-shot creation call.
    pub fn is_creation(&self) -> bool {
        self.is_creation
    }

    // ── Group view ──────────────────────────────────────────────────────

    pub fn group(&self) -> &TransactionGroup {
        self.group
    }

    /// This call's position within the group.
    pub fn group_index(&self) -> usize {
        self.group_index
    }

    pub fn group_size(&self) -> usize {
        self.group.len()
    }

    // ── Protocol parameters ─────────────────────────────────────────────

    /// The protocol's minimum transaction fee, in µ-units.
    pub fn min_txn_fee(&self) -> u64 {
        self.ledger.params.min_txn_fee
    }

    // ── Global state ────────────────────────────────────────────────────

    pub fn global_get(&self, key: &[u8]) -> Option<StateValue> {
        self.ledger
            .apps
            .get(&self.app_id)
            .and_then(|app| app.global.get(key).cloned())
    }

    pub fn global_put(&mut self, key: &[u8], value: StateValue) -> Result<(), TxnError> {
        check_slot(key, &value)?;
        let app = self
            .ledger
            .apps
            .get_mut(&self.app_id)
            .ok_or(TxnError::UnknownApplication {
                app_id: self.app_id,
            })?;
        app.global.insert(key.to_vec(), value);
        Ok(())
    }

    // ── Local state ─────────────────────────────────────────────────────

    /// Read a local slot of `account`, which must be the sender, the app
    /// account, or in the call's account reference list, and must be opted
    /// in.
    pub fn local_get(
        &self,
        account: &Address,
        key: &[u8],
    ) -> Result<Option<StateValue>, TxnError> {
        self.require_referenced(account)?;
        let app = self
            .ledger
            .apps
            .get(&self.app_id)
            .ok_or(TxnError::UnknownApplication {
                app_id: self.app_id,
            })?;
        let local = app.locals.get(account).ok_or(TxnError::NotOptedIn {
            address: *account,
            app_id: self.app_id,
        })?;
        Ok(local.get(key).cloned())
    }

    /// Write a local slot of `account` under the same reference and opt-in
    /// rules as [`CallContext::local_get`].
    pub fn local_put(
        &mut self,
        account: &Address,
        key: &[u8],
        value: StateValue,
    ) -> Result<(), TxnError> {
        self.require_referenced(account)?;
        check_slot(key, &value)?;
        let app_id = self.app_id;
        let app = self
            .ledger
            .apps
            .get_mut(&app_id)
            .ok_or(TxnError::UnknownApplication { app_id })?;
        let local = app.locals.get_mut(account).ok_or(TxnError::NotOptedIn {
            address: *account,
            app_id,
        })?;
        local.insert(key.to_vec(), value);
        Ok(())
    }

    // ── Inner payments ──────────────────────────────────────────────────

    /// Emit a payment from the application's own account, at zero declared
    /// fee, within this execution.
    ///
    /// The recipient must be available through the call's reference list.
    /// The application balance is not pre-checked anywhere else: an
    /// underfunded emission fails here and rolls back the whole group.
    pub fn submit_inner_payment(
        &mut self,
        receiver: Address,
        amount: u64,
    ) -> Result<(), TxnError> {
        self.require_referenced(&receiver)?;
        let source = self.app_address();
        trace!(
            "app {}: inner payment of {} µ-units to {}",
            self.app_id,
            amount,
            receiver
        );
        self.ledger.debit(&source, amount)?;
        self.ledger.credit(&receiver, amount)?;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────────

    /// An address is available to the program if it is the sender, the
    /// application's own account, or listed in the call's foreign account
    /// references.
    fn require_referenced(&self, address: &Address) -> Result<(), TxnError> {
        if *address == self.header.sender
            || *address == self.app_address()
            || self.call.accounts.contains(address)
        {
            Ok(())
        } else {
            Err(TxnError::AccountNotReferenced { address: *address })
        }
    }
}

fn check_slot(key: &[u8], value: &StateValue) -> Result<(), TxnError> {
    if key.len() > MAX_STATE_KEY_LEN {
        return Err(TxnError::KeyTooLong {
            len: key.len(),
            max: MAX_STATE_KEY_LEN,
        });
    }
    if let StateValue::Bytes(bytes) = value {
        if bytes.len() > MAX_STATE_VALUE_LEN {
            return Err(TxnError::ValueTooLarge {
                len: bytes.len(),
                max: MAX_STATE_VALUE_LEN,
            });
        }
    }
    Ok(())
}
