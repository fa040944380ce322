//! Factory-shape instructions: a program id, the accounts it touches, and an
//! opaque data payload. This is what callers hand to the compiler before
//! account references become indices.

use {serde_derive::{Deserialize, Serialize}, zenith_address::Address};

/// An account an instruction touches, with the access it requests.
///
/// When the same account is mentioned more than once across a transaction,
/// the strongest access wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    #[serde(rename = "address")]
    pub pubkey: Address,
    #[serde(rename = "signer", default)]
    pub is_signer: bool,
    #[serde(rename = "writable", default)]
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account.
    pub fn new(pubkey: Address, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account.
    pub fn new_readonly(pubkey: Address, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// A request naming a program, the accounts it touches, and an opaque data
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(rename = "program")]
    pub program_id: Address,
    pub accounts: Vec<AccountMeta>,
    #[serde(rename = "dataBase64", with = "crate::serde_base64")]
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id: Address, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Self {
        Self {
            program_id,
            accounts,
            data,
        }
    }
}
