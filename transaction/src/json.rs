//! JSON view of a transaction.
//!
//! Serializes the logical shape collaborators consume: base58 strings for
//! addresses, signatures, and the blockhash; factory-shape instructions with
//! base64 data; and the canonical message bytes as base64. The top-level
//! `signature` mirrors the first slot.

use {
    crate::Transaction,
    base64::{prelude::BASE64_STANDARD, Engine},
    serde::{ser::Error, Serialize, Serializer},
    serde_derive::Serialize as DeriveSerialize,
    zenith_address::Address,
    zenith_hash::Hash,
    zenith_message::{AccountMeta, Instruction},
    zenith_signature::Signature,
};

fn as_base64<S: Serializer, T: AsRef<[u8]>>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64_STANDARD.encode(bytes.as_ref()))
}

#[derive(DeriveSerialize)]
struct SignatureSlot<'a> {
    address: &'a Address,
    signature: Option<&'a Signature>,
}

#[derive(DeriveSerialize)]
#[serde(rename_all = "camelCase")]
struct TransactionView<'a> {
    signature: Option<&'a Signature>,
    signatures: Vec<SignatureSlot<'a>>,
    accounts: Vec<AccountMeta>,
    latest_blockhash: &'a Hash,
    instructions: Vec<Instruction>,
    #[serde(serialize_with = "as_base64")]
    message_bytes: &'a [u8],
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let signatures = self
            .signer_addresses()
            .iter()
            .zip(&self.signatures)
            .map(|(address, slot)| SignatureSlot {
                address,
                signature: slot.as_ref(),
            })
            .collect();
        let view = TransactionView {
            signature: self.signature(),
            signatures,
            accounts: self.accounts(),
            latest_blockhash: &self.message().recent_blockhash,
            instructions: self
                .message()
                .decompile_instructions()
                .map_err(S::Error::custom)?,
            message_bytes: self.message_bytes(),
        };
        view.serialize(serializer)
    }
}
