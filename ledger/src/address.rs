//! Account addresses.

use {
    serde::{Deserialize, Serialize},
    sha2::{Digest, Sha256},
    std::{
        fmt,
        sync::atomic::{AtomicU64, Ordering},
    },
};

/// Length of an account public key in bytes.
pub const ADDRESS_BYTES: usize = 32;

/// A 32-byte account public key.
///
/// The all-zero address doubles as the protocol's "unset" sentinel for
/// optional transaction fields (`rekey_to`, `close_remainder_to`,
/// `asset_close_to`, `asset_sender`).
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Address([u8; ADDRESS_BYTES]);

impl Address {
    /// The zero sentinel address.
    pub const ZERO: Self = Self([0u8; ADDRESS_BYTES]);

    pub const fn new(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns a unique address for tests and fixtures.
    ///
    /// Addresses are produced from a process-wide counter, so they are
    /// deterministic within a run and never collide with each other or
    /// with [`Address::ZERO`].
    pub fn new_unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; ADDRESS_BYTES];
        bytes[..8].copy_from_slice(&n.to_be_bytes());
        bytes[8..16].copy_from_slice(b"encoreuq");
        Self(bytes)
    }

    /// The derived account address owned by an application.
    ///
    /// Deterministic digest of a domain prefix and the big-endian app id,
    /// standing in for the substrate's application-address derivation.
    pub fn app_address(app_id: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"encore/appaccount");
        hasher.update(app_id.to_be_bytes());
        Self(hasher.finalize().into())
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        <[u8; ADDRESS_BYTES]>::try_from(slice).map(Self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps traces readable.
        write!(f, "{}..", hex::encode(&self.0[..6]))
    }
}
