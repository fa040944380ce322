//! Transaction message: the portion of a transaction covered by each
//! signature.
//!
//! A message holds the header, the ordered account list, the blockhash
//! acting as the transaction nonce, and the compiled instructions. The
//! ordering of the account list is load bearing: signature slots, writable
//! ranges, and every instruction index refer into it.

pub mod compiled_instruction;
pub mod error;
pub mod instruction;
pub mod message;
pub mod serde_base64;
pub mod serialization;

use serde_derive::{Deserialize, Serialize};
pub use {
    compiled_instruction::CompiledInstruction,
    error::MessageError,
    instruction::{AccountMeta, Instruction},
    message::{Message, MAX_ACCOUNTS},
    serialization::MESSAGE_VERSION_PREFIX,
};

/// Number of bytes the header occupies on the wire.
pub const MESSAGE_HEADER_BYTES: usize = 3;

/// Counts mapping the ordered account list onto signer and writable roles.
///
/// The first `num_required_signatures` accounts sign; of those, the last
/// `num_readonly_signed_accounts` are read-only. Of the remaining accounts,
/// the last `num_readonly_unsigned_accounts` are read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeader {
    /// The number of signatures required for this message to be considered
    /// valid.
    pub num_required_signatures: u8,
    /// The last `num_readonly_signed_accounts` of the signing accounts are
    /// read-only.
    pub num_readonly_signed_accounts: u8,
    /// The last `num_readonly_unsigned_accounts` of the non-signing accounts
    /// are read-only.
    pub num_readonly_unsigned_accounts: u8,
}
