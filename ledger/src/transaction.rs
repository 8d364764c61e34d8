//! Transactions and atomic transaction groups.
//!
//! A [`TransactionGroup`] is the unit of submission: every member shares one
//! group id and the ledger commits all of them or none of them.  Programs
//! never index sibling transactions through raw casts — the group exposes
//! typed leg accessors ([`TransactionGroup::payment_leg`],
//! [`TransactionGroup::asset_transfer_leg`]) so shape validation reads the
//! way the protocol is specified.

use {
    crate::{
        address::Address,
        error::GroupError,
        program::ProgramHandle,
        state::StateSchema,
    },
    serde::{Deserialize, Serialize},
    sha2::{Digest, Sha256},
    std::fmt,
};

/// Application identifier.  Id `0` on an application call means "create".
pub type AppId = u64;

/// Asset identifier.
pub type AssetId = u64;

/// Maximum number of transactions in one atomic group.
pub const MAX_GROUP_SIZE: usize = 16;

/// The lifecycle operation requested by an application call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnCompletion {
    /// Plain call into the approval program's entrypoint dispatcher.
    NoOp,
    /// Allocate local state for the sender, then run the approval program.
    OptIn,
    /// Run the approval program; on approval, release the sender's local state.
    CloseOut,
    /// Run the approval program; on approval, swap the installed program.
    UpdateApplication,
    /// Run the approval program; on approval, remove the application.
    DeleteApplication,
    /// Escape hatch: run the clear program and release local state
    /// regardless of its verdict.
    ClearState,
}

/// Fields common to every transaction type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub sender: Address,
    /// Declared fee in µ-units.  Debited from the sender unconditionally.
    pub fee: u64,
    /// Authorization handoff; [`Address::ZERO`] means unset.  The model
    /// carries this field for programs to assert on but does not track
    /// delegated signing authority.
    pub rekey_to: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFields {
    pub receiver: Address,
    /// Amount in µ-units.
    pub amount: u64,
    /// Sweep-and-close target; [`Address::ZERO`] means unset.
    pub close_remainder_to: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransferFields {
    pub asset_id: AssetId,
    pub asset_receiver: Address,
    pub asset_amount: u64,
    /// Sweep-and-close target for the asset holding; [`Address::ZERO`] means unset.
    pub asset_close_to: Address,
    /// Clawback source; [`Address::ZERO`] means a plain transfer from the sender.
    pub asset_sender: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCallFields {
    /// Target application; `0` creates a new application.
    pub app_id: AppId,
    pub on_completion: OnCompletion,
    /// Positional byte-string arguments.  args\[0\] carries the entrypoint
    /// selector on plain calls.
    pub application_args: Vec<Vec<u8>>,
    /// Foreign account reference list.  Bounds which addresses the program
    /// may touch beyond its own account and the sender.
    pub accounts: Vec<Address>,
    /// Program to install (creation) or swap in (update).
    pub program: Option<ProgramHandle>,
    /// Global slot budget, fixed at creation.
    pub global_schema: StateSchema,
    /// Local slot budget, fixed at creation.
    pub local_schema: StateSchema,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionBody {
    Payment(PaymentFields),
    AssetTransfer(AssetTransferFields),
    ApplicationCall(ApplicationCallFields),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub header: TransactionHeader,
    pub body: TransactionBody,
}

impl Transaction {
    /// A plain payment with no close-out or rekey.
    pub fn payment(sender: Address, receiver: Address, amount: u64, fee: u64) -> Self {
        Self {
            header: TransactionHeader {
                sender,
                fee,
                rekey_to: Address::ZERO,
            },
            body: TransactionBody::Payment(PaymentFields {
                receiver,
                amount,
                close_remainder_to: Address::ZERO,
            }),
        }
    }

    /// A plain asset transfer with no close-out, rekey, or clawback.
    pub fn asset_transfer(
        sender: Address,
        asset_id: AssetId,
        asset_receiver: Address,
        asset_amount: u64,
        fee: u64,
    ) -> Self {
        Self {
            header: TransactionHeader {
                sender,
                fee,
                rekey_to: Address::ZERO,
            },
            body: TransactionBody::AssetTransfer(AssetTransferFields {
                asset_id,
                asset_receiver,
                asset_amount,
                asset_close_to: Address::ZERO,
                asset_sender: Address::ZERO,
            }),
        }
    }

    /// A call into an existing application.
    pub fn app_call(
        sender: Address,
        app_id: AppId,
        on_completion: OnCompletion,
        application_args: Vec<Vec<u8>>,
        accounts: Vec<Address>,
        fee: u64,
    ) -> Self {
        Self {
            header: TransactionHeader {
                sender,
                fee,
                rekey_to: Address::ZERO,
            },
            body: TransactionBody::ApplicationCall(ApplicationCallFields {
                app_id,
                on_completion,
                application_args,
                accounts,
                program: None,
                global_schema: StateSchema::default(),
                local_schema: StateSchema::default(),
            }),
        }
    }

    /// An application-creation call.
    pub fn app_create(
        sender: Address,
        program: ProgramHandle,
        global_schema: StateSchema,
        local_schema: StateSchema,
        application_args: Vec<Vec<u8>>,
        fee: u64,
    ) -> Self {
        Self {
            header: TransactionHeader {
                sender,
                fee,
                rekey_to: Address::ZERO,
            },
            body: TransactionBody::ApplicationCall(ApplicationCallFields {
                app_id: 0,
                on_completion: OnCompletion::NoOp,
                application_args,
                accounts: Vec::new(),
                program: Some(program),
                global_schema,
                local_schema,
            }),
        }
    }

    pub fn sender(&self) -> &Address {
        &self.header.sender
    }

    pub fn fee(&self) -> u64 {
        self.header.fee
    }

    pub fn payment_fields(&self) -> Option<&PaymentFields> {
        match &self.body {
            TransactionBody::Payment(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn asset_transfer_fields(&self) -> Option<&AssetTransferFields> {
        match &self.body {
            TransactionBody::AssetTransfer(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn application_call_fields(&self) -> Option<&ApplicationCallFields> {
        match &self.body {
            TransactionBody::ApplicationCall(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Identity of an atomic group: a digest over the canonical encoding of its
/// member transactions.  Every member carries the same id; changing any
/// field of any member changes the id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId([u8; 32]);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..", hex::encode(&self.0[..6]))
    }
}

/// A payment sibling, viewed with its header.
#[derive(Clone, Copy, Debug)]
pub struct PaymentLeg<'a> {
    pub header: &'a TransactionHeader,
    pub fields: &'a PaymentFields,
}

/// An asset-transfer sibling, viewed with its header.
#[derive(Clone, Copy, Debug)]
pub struct AssetTransferLeg<'a> {
    pub header: &'a TransactionHeader,
    pub fields: &'a AssetTransferFields,
}

/// An ordered set of transactions that commits or rejects as one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionGroup {
    id: GroupId,
    transactions: Vec<Transaction>,
}

impl TransactionGroup {
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, GroupError> {
        if transactions.is_empty() {
            return Err(GroupError::Empty);
        }
        if transactions.len() > MAX_GROUP_SIZE {
            return Err(GroupError::TooLarge {
                len: transactions.len(),
                max: MAX_GROUP_SIZE,
            });
        }
        let encoded = bincode::serialize(&transactions)
            .map_err(|err| GroupError::Encode(err.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(b"encore/group");
        hasher.update(&encoded);
        Ok(Self {
            id: GroupId(hasher.finalize().into()),
            transactions,
        })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transaction(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// The sibling at `index`, if it is a payment.
    pub fn payment_leg(&self, index: usize) -> Option<PaymentLeg<'_>> {
        let txn = self.transactions.get(index)?;
        txn.payment_fields().map(|fields| PaymentLeg {
            header: &txn.header,
            fields,
        })
    }

    /// The sibling at `index`, if it is an asset transfer.
    pub fn asset_transfer_leg(&self, index: usize) -> Option<AssetTransferLeg<'_>> {
        let txn = self.transactions.get(index)?;
        txn.asset_transfer_fields().map(|fields| AssetTransferLeg {
            header: &txn.header,
            fields,
        })
    }
}
