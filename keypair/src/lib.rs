//! Ed25519 keypair handling.
//!
//! The serialized secret is the 64-byte expanded form: the 32-byte seed
//! followed by the 32-byte public key. Construction from bytes checks that
//! the embedded public half actually belongs to the seed.

use {
    core::fmt,
    ed25519_dalek::Signer,
    rand::rngs::OsRng,
    thiserror::Error,
    zenith_address::Address,
    zenith_signature::Signature,
};

/// Number of bytes in the expanded secret key (seed ∥ public key).
pub const KEYPAIR_BYTES: usize = 64;
/// Number of bytes in the seed half of the secret key.
pub const SEED_BYTES: usize = 32;

/// Errors raised when reconstructing a keypair from secret key material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeypairError {
    /// The embedded public key does not match the one the seed derives.
    #[error("public half of the secret key does not match its seed")]
    PubkeyMismatch,
    /// Secret key material was not exactly 64 bytes.
    #[error("expected {KEYPAIR_BYTES} bytes of secret key material, got {0}")]
    WrongSize(usize),
}

/// A signing keypair.
#[derive(Clone, PartialEq, Eq)]
pub struct Keypair(ed25519_dalek::SigningKey);

impl Keypair {
    /// Generate a fresh keypair from the system RNG.
    pub fn new() -> Self {
        Self(ed25519_dalek::SigningKey::generate(&mut OsRng))
    }

    /// Reconstruct a keypair from its 32-byte seed.
    pub fn from_seed(seed: &[u8; SEED_BYTES]) -> Self {
        Self(ed25519_dalek::SigningKey::from_bytes(seed))
    }

    /// Reconstruct a keypair from the 64-byte expanded secret.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeypairError> {
        let bytes: &[u8; KEYPAIR_BYTES] = bytes
            .try_into()
            .map_err(|_| KeypairError::WrongSize(bytes.len()))?;
        let mut seed = [0u8; SEED_BYTES];
        seed.copy_from_slice(&bytes[..SEED_BYTES]);
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        if signing_key.verifying_key().as_bytes()[..] != bytes[SEED_BYTES..] {
            return Err(KeypairError::PubkeyMismatch);
        }
        Ok(Self(signing_key))
    }

    /// Serialize as seed ∥ public key.
    pub fn to_bytes(&self) -> [u8; KEYPAIR_BYTES] {
        let mut out = [0u8; KEYPAIR_BYTES];
        out[..SEED_BYTES].copy_from_slice(&self.0.to_bytes());
        out[SEED_BYTES..].copy_from_slice(self.0.verifying_key().as_bytes());
        out
    }

    /// The address of this keypair's public key.
    pub fn pubkey(&self) -> Address {
        Address::new_from_array(self.0.verifying_key().to_bytes())
    }

    /// Produce a detached signature over `message`.
    pub fn sign_message(&self, message: &[u8]) -> Signature {
        Signature::from(self.0.sign(message).to_bytes())
    }
}

// Keep the seed out of debug output.
impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Keypair").field(&self.pubkey()).finish()
    }
}
