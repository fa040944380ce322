//! Wire encoding for messages.
//!
//! Layout, in order:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Header (3 x u8)                                          │
//! │ Account count (compact-u16)                              │
//! │ Accounts [[u8; 32] x count]                              │
//! │ Recent blockhash [u8; 32]                                │
//! │ Instruction count (compact-u16)                          │
//! │ Per instruction:                                         │
//! │   program id index (u8)                                  │
//! │   account index count (compact-u16), then that many u8   │
//! │   data length (compact-u16), then that many raw bytes    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Signatures are not part of the message; they precede it in the full
//! transaction buffer and are handled by the transaction container.

use {
    crate::{
        compiled_instruction::CompiledInstruction, error::MessageError, message::Message,
        MessageHeader, MESSAGE_HEADER_BYTES,
    },
    zenith_address::{Address, ADDRESS_BYTES},
    zenith_hash::{Hash, HASH_BYTES},
    zenith_short_vec as short_vec,
};

/// A first header byte with this bit set introduces a versioned message,
/// which this codec does not speak.
pub const MESSAGE_VERSION_PREFIX: u8 = 0x80;

/// Read a fixed-size array out of `bytes` at `offset`.
fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N], MessageError> {
    bytes
        .get(offset..)
        .and_then(|rest| rest.get(..N))
        .and_then(|chunk| chunk.try_into().ok())
        .ok_or(MessageError::BufferTooSmall)
}

fn prefix_len(len: usize) -> usize {
    if len < 0x80 {
        1
    } else if len < 0x4000 {
        2
    } else {
        3
    }
}

impl Message {
    /// Exact size of this message once serialized.
    pub fn serialized_size(&self) -> usize {
        let instructions_size: usize = self
            .instructions
            .iter()
            .map(|instruction| {
                1 + prefix_len(instruction.accounts.len())
                    + instruction.accounts.len()
                    + prefix_len(instruction.data.len())
                    + instruction.data.len()
            })
            .sum();
        MESSAGE_HEADER_BYTES
            + prefix_len(self.account_keys.len())
            + self.account_keys.len() * ADDRESS_BYTES
            + HASH_BYTES
            + prefix_len(self.instructions.len())
            + instructions_size
    }

    /// Serialize this message to its canonical wire form.
    pub fn serialize(&self) -> Result<Vec<u8>, MessageError> {
        // A signer count carrying the version prefix bit would parse back as
        // a versioned message.
        if self.header.num_required_signatures & MESSAGE_VERSION_PREFIX != 0 {
            return Err(MessageError::InvalidHeader);
        }
        let num_accounts =
            u16::try_from(self.account_keys.len()).map_err(|_| MessageError::TooManyAccounts)?;
        let num_instructions = u16::try_from(self.instructions.len())
            .map_err(|_| MessageError::TooManyInstructions)?;

        let mut bytes = Vec::with_capacity(self.serialized_size());
        bytes.push(self.header.num_required_signatures);
        bytes.push(self.header.num_readonly_signed_accounts);
        bytes.push(self.header.num_readonly_unsigned_accounts);

        short_vec::encode_len(num_accounts, &mut bytes);
        for key in &self.account_keys {
            bytes.extend_from_slice(key.as_array());
        }

        bytes.extend_from_slice(self.recent_blockhash.as_array());

        short_vec::encode_len(num_instructions, &mut bytes);
        for instruction in &self.instructions {
            bytes.push(instruction.program_id_index);
            let num_indices = u16::try_from(instruction.accounts.len())
                .map_err(|_| MessageError::TooManyInstructionAccounts)?;
            short_vec::encode_len(num_indices, &mut bytes);
            bytes.extend_from_slice(&instruction.accounts);
            let data_len = u16::try_from(instruction.data.len())
                .map_err(|_| MessageError::InstructionDataTooLarge)?;
            short_vec::encode_len(data_len, &mut bytes);
            bytes.extend_from_slice(&instruction.data);
        }

        Ok(bytes)
    }

    /// Deserialize a message, rejecting trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageError> {
        let (message, consumed) = Self::from_bytes_partial(bytes)?;
        if consumed != bytes.len() {
            return Err(MessageError::TrailingData);
        }
        Ok(message)
    }

    /// Deserialize a message from the front of a larger buffer, returning
    /// bytes consumed.
    ///
    /// Used when the message is embedded in a transaction. Validates header
    /// consistency and every instruction index; `offset` never moves past a
    /// bounds check, so slicing below stays in range.
    pub fn from_bytes_partial(bytes: &[u8]) -> Result<(Self, usize), MessageError> {
        let first = *bytes.first().ok_or(MessageError::BufferTooSmall)?;
        if first & MESSAGE_VERSION_PREFIX != 0 {
            return Err(MessageError::VersionedNotSupported);
        }
        let header = MessageHeader {
            num_required_signatures: first,
            num_readonly_signed_accounts: *bytes.get(1).ok_or(MessageError::BufferTooSmall)?,
            num_readonly_unsigned_accounts: *bytes.get(2).ok_or(MessageError::BufferTooSmall)?,
        };
        let mut offset = MESSAGE_HEADER_BYTES;

        let (num_accounts, prefix) = short_vec::decode_len(&bytes[offset..])?;
        offset += prefix;

        let num_signers = usize::from(header.num_required_signatures);
        if num_signers > num_accounts
            || usize::from(header.num_readonly_signed_accounts) > num_signers
            || usize::from(header.num_readonly_unsigned_accounts) > num_accounts - num_signers
        {
            return Err(MessageError::InvalidHeader);
        }

        let mut account_keys = Vec::with_capacity(num_accounts);
        for _ in 0..num_accounts {
            account_keys.push(Address::new_from_array(read_array(bytes, offset)?));
            offset += ADDRESS_BYTES;
        }

        let recent_blockhash = Hash::new_from_array(read_array(bytes, offset)?);
        offset += HASH_BYTES;

        let (num_instructions, prefix) = short_vec::decode_len(&bytes[offset..])?;
        offset += prefix;

        let mut instructions = Vec::with_capacity(num_instructions);
        for _ in 0..num_instructions {
            let program_id_index = *bytes.get(offset).ok_or(MessageError::BufferTooSmall)?;
            offset += 1;
            if usize::from(program_id_index) >= num_accounts {
                return Err(MessageError::InvalidProgramIdIndex);
            }

            let (num_indices, prefix) = short_vec::decode_len(&bytes[offset..])?;
            offset += prefix;
            let accounts = bytes
                .get(offset..offset + num_indices)
                .ok_or(MessageError::BufferTooSmall)?
                .to_vec();
            offset += num_indices;
            for &account_index in &accounts {
                if usize::from(account_index) >= num_accounts {
                    return Err(MessageError::InvalidAccountIndex);
                }
            }

            let (data_len, prefix) = short_vec::decode_len(&bytes[offset..])?;
            offset += prefix;
            let data = bytes
                .get(offset..offset + data_len)
                .ok_or(MessageError::BufferTooSmall)?
                .to_vec();
            offset += data_len;

            instructions.push(CompiledInstruction {
                program_id_index,
                accounts,
                data,
            });
        }

        Ok((
            Self {
                header,
                account_keys,
                recent_blockhash,
                instructions,
            },
            offset,
        ))
    }
}
