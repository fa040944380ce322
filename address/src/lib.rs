//! Account address representation.
//!
//! An address is a sequence of 32 bytes, shown as a base58 encoded string
//! (e.g. `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`). It is either an
//! ed25519 public key or a program-derived digest; see [`pda`] for the
//! latter.

pub mod pda;

use {
    core::{fmt, str::FromStr},
    serde::{Deserialize, Deserializer, Serialize, Serializer},
    std::sync::atomic::{AtomicU64, Ordering},
    thiserror::Error,
};
pub use pda::{PdaError, MAX_SEEDS, MAX_SEED_LEN, PDA_MARKER};

/// Number of bytes in an address.
pub const ADDRESS_BYTES: usize = 32;
/// Maximum string length of a base58 encoded address.
const MAX_BASE58_ADDRESS_LEN: usize = 44;

#[repr(transparent)]
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Address([u8; ADDRESS_BYTES]);

/// Errors raised when constructing an address from foreign input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseAddressError {
    /// The integer form does not fit in 256 bits.
    #[error("integer does not fit in 32 big-endian bytes")]
    IntegerTooLarge,
    /// Input was not valid base58.
    #[error("failed to decode string to address")]
    Invalid,
    /// Input did not produce exactly 32 bytes.
    #[error("input decoded to wrong size for address")]
    WrongSize,
}

impl Address {
    pub const fn new_from_array(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Self(bytes)
    }

    /// Return a reference to the address's byte array.
    #[inline(always)]
    pub const fn as_array(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    pub const fn to_bytes(self) -> [u8; ADDRESS_BYTES] {
        self.0
    }

    /// Construct an address from a big-endian unsigned integer.
    ///
    /// The digit string is interpreted as one unsigned number and left-padded
    /// with zero bytes to 32 bytes. Values of 2^256 or more are rejected.
    pub fn from_uint_be(digits: &[u8]) -> Result<Self, ParseAddressError> {
        let first_nonzero = digits.iter().position(|&b| b != 0).unwrap_or(digits.len());
        let digits = &digits[first_nonzero..];
        if digits.len() > ADDRESS_BYTES {
            return Err(ParseAddressError::IntegerTooLarge);
        }
        let mut bytes = [0u8; ADDRESS_BYTES];
        bytes[ADDRESS_BYTES - digits.len()..].copy_from_slice(digits);
        Ok(Self(bytes))
    }

    /// Unique address for tests and benchmarks. Not random, just distinct.
    pub fn new_unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; ADDRESS_BYTES];
        // Big-endian so that unique addresses sort in creation order.
        bytes[..8].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    #[inline]
    fn from(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; ADDRESS_BYTES] {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = ParseAddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; ADDRESS_BYTES]>::try_from(bytes)
            .map(Self)
            .map_err(|_| ParseAddressError::WrongSize)
    }
}

impl TryFrom<Vec<u8>> for Address {
    type Error = ParseAddressError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_BASE58_ADDRESS_LEN {
            return Err(ParseAddressError::WrongSize);
        }
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| ParseAddressError::Invalid)?;
        <[u8; ADDRESS_BYTES]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_| ParseAddressError::WrongSize)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
