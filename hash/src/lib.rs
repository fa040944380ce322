//! 32-byte blockhash value.
//!
//! A blockhash identifies a recent ledger entry and doubles as the
//! transaction nonce. It is shown as a base58 string at every API boundary.

use {
    core::{fmt, str::FromStr},
    serde::{Deserialize, Deserializer, Serialize, Serializer},
    std::sync::atomic::{AtomicU64, Ordering},
    thiserror::Error,
};

/// Number of bytes in a hash.
pub const HASH_BYTES: usize = 32;
/// Maximum string length of a base58 encoded hash.
const MAX_BASE58_HASH_LEN: usize = 44;

#[repr(transparent)]
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Hash([u8; HASH_BYTES]);

impl Hash {
    pub const fn new_from_array(bytes: [u8; HASH_BYTES]) -> Self {
        Self(bytes)
    }

    /// Return a reference to the hash's byte array.
    #[inline(always)]
    pub const fn as_array(&self) -> &[u8; HASH_BYTES] {
        &self.0
    }

    pub const fn to_bytes(self) -> [u8; HASH_BYTES] {
        self.0
    }

    /// Unique hash for tests and benchmarks. Not random, just distinct.
    pub fn new_unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; HASH_BYTES];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl From<[u8; HASH_BYTES]> for Hash {
    #[inline]
    fn from(bytes: [u8; HASH_BYTES]) -> Self {
        Self(bytes)
    }
}

impl<'a> TryFrom<&'a [u8]> for Hash {
    type Error = <[u8; HASH_BYTES] as TryFrom<&'a [u8]>>::Error;

    #[inline]
    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        <[u8; HASH_BYTES]>::try_from(bytes).map(Self::from)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseHashError {
    #[error("failed to decode string to hash")]
    Invalid,
    #[error("string decoded to wrong size for hash")]
    WrongSize,
}

impl FromStr for Hash {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_BASE58_HASH_LEN {
            return Err(ParseHashError::WrongSize);
        }
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| ParseHashError::Invalid)?;
        <[u8; HASH_BYTES]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_| ParseHashError::WrongSize)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
