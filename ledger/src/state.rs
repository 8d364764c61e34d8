//! Key-value state for applications.
//!
//! Both global state (one map per application) and local state (one map per
//! application per opted-in account) are flat maps of short byte-string keys
//! to [`StateValue`]s.  Slot budgets are fixed permanently by the
//! [`StateSchema`] declared on the creation transaction; a write-set that no
//! longer fits the schema rejects the whole group.

use {
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// Maximum length of a state key in bytes.
pub const MAX_STATE_KEY_LEN: usize = 64;

/// Maximum length of a byte-string state value.
pub const MAX_STATE_VALUE_LEN: usize = 128;

/// A single state slot: an unsigned 64-bit integer or a byte string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateValue {
    Uint(u64),
    Bytes(Vec<u8>),
}

impl StateValue {
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(n) => Some(*n),
            Self::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Uint(_) => None,
            Self::Bytes(bytes) => Some(bytes),
        }
    }
}

/// One application's global state, or one account's local state.
pub type StateMap = BTreeMap<Vec<u8>, StateValue>;

/// Slot budget declared at application creation.
///
/// The schema can never grow after creation; it must be dimensioned up
/// front for every key the program will ever write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSchema {
    pub num_uints: u16,
    pub num_byte_slices: u16,
}

impl StateSchema {
    pub const fn new(num_uints: u16, num_byte_slices: u16) -> Self {
        Self {
            num_uints,
            num_byte_slices,
        }
    }

    /// Whether `map` fits within this schema's slot budget.
    pub fn fits(&self, map: &StateMap) -> bool {
        let uints = map
            .values()
            .filter(|value| matches!(value, StateValue::Uint(_)))
            .count();
        let byte_slices = map
            .values()
            .filter(|value| matches!(value, StateValue::Bytes(_)))
            .count();
        uints <= usize::from(self.num_uints) && byte_slices <= usize::from(self.num_byte_slices)
    }
}
