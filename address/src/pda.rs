//! Program-derived address computation.
//!
//! A program-derived address is the SHA-256 digest of the caller's seeds,
//! the deriving program's address, and a fixed domain separator. A digest
//! that decompresses as an ed25519 point would collide with a real signing
//! key, so derivation rejects it; callers search bump seeds for an off-curve
//! result instead.

use {
    crate::Address,
    curve25519_dalek::edwards::CompressedEdwardsY,
    sha2::{Digest, Sha256},
    thiserror::Error,
};

/// Domain separator appended after the program id before hashing.
pub const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

/// Maximum length of a single derivation seed.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, including any bump seed.
pub const MAX_SEEDS: usize = 16;

/// Errors raised during program-derived address computation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PdaError {
    /// The derived digest decompresses as an ed25519 point.
    #[error("derived address falls on the ed25519 curve")]
    InvalidSeeds,
    /// More than [`MAX_SEEDS`] seeds were supplied.
    #[error("more than {MAX_SEEDS} seeds supplied")]
    MaxSeedCountExceeded,
    /// A seed longer than [`MAX_SEED_LEN`] bytes was supplied.
    #[error("seed exceeds {MAX_SEED_LEN} bytes")]
    MaxSeedLengthExceeded,
    /// No bump seed in `0..=255` produced an off-curve digest.
    #[error("no viable bump seed found")]
    NoViableBump,
}

impl Address {
    /// Whether these 32 bytes decompress as an ed25519 curve point.
    ///
    /// This is full Edwards decompression per RFC 8032 §5.1.3, not a cheaper
    /// structural check; the subgroup is not consulted.
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY(self.0).decompress().is_some()
    }

    /// Derive the program address for the given seeds, rejecting on-curve
    /// results.
    ///
    /// The digest is `SHA-256(seed_0 ∥ … ∥ seed_n ∥ program_id ∥
    /// "ProgramDerivedAddress")`. A digest that lands on the curve would be
    /// indistinguishable from a real public key and fails with
    /// [`PdaError::InvalidSeeds`]; use [`Address::find_program_address`] to
    /// search for a bump seed that avoids it.
    pub fn create_program_address(
        seeds: &[&[u8]],
        program_id: &Address,
    ) -> Result<Address, PdaError> {
        if seeds.len() > MAX_SEEDS {
            return Err(PdaError::MaxSeedCountExceeded);
        }
        if seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
            return Err(PdaError::MaxSeedLengthExceeded);
        }

        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update(seed);
        }
        hasher.update(program_id.as_array());
        hasher.update(PDA_MARKER);
        let address = Address::new_from_array(hasher.finalize().into());

        if address.is_on_curve() {
            return Err(PdaError::InvalidSeeds);
        }
        Ok(address)
    }

    /// Search bump seeds from 255 downward for a valid program address.
    ///
    /// Returns the first off-curve derivation together with the bump that
    /// produced it. The bump is appended to `seeds` as a one-byte seed, so
    /// `seeds` itself may hold at most [`MAX_SEEDS`]` - 1` entries.
    pub fn find_program_address(
        seeds: &[&[u8]],
        program_id: &Address,
    ) -> Result<(Address, u8), PdaError> {
        for bump in (0..=u8::MAX).rev() {
            let bump_seed = [bump];
            let mut seeds_with_bump = Vec::with_capacity(seeds.len() + 1);
            seeds_with_bump.extend_from_slice(seeds);
            seeds_with_bump.push(&bump_seed[..]);
            match Self::create_program_address(&seeds_with_bump, program_id) {
                Ok(address) => return Ok((address, bump)),
                Err(PdaError::InvalidSeeds) => (),
                Err(err) => return Err(err),
            }
        }
        Err(PdaError::NoViableBump)
    }
}
