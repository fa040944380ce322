//! An instruction whose account references have been resolved to indices.

use serde_derive::{Deserialize, Serialize};

/// A program invocation with every account named by its position in the
/// transaction's ordered account list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledInstruction {
    /// Index of the program to invoke.
    pub program_id_index: u8,
    /// Indices of the accounts the instruction touches, in call order.
    pub accounts: Vec<u8>,
    /// Opaque data handed to the program.
    #[serde(with = "crate::serde_base64")]
    pub data: Vec<u8>,
}

impl CompiledInstruction {
    pub fn new(program_id_index: u8, accounts: Vec<u8>, data: Vec<u8>) -> Self {
        Self {
            program_id_index,
            accounts,
            data,
        }
    }
}
