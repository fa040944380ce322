//! Core message type and account compilation.

use {
    crate::{
        compiled_instruction::CompiledInstruction,
        error::MessageError,
        instruction::{AccountMeta, Instruction},
        MessageHeader,
    },
    serde_derive::{Deserialize, Serialize},
    zenith_address::Address,
    zenith_hash::Hash,
};

/// Most accounts a single transaction can index (instruction account
/// references are one byte).
pub const MAX_ACCOUNTS: usize = 256;

/// A transaction message: header, ordered account list, blockhash nonce, and
/// compiled instructions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    pub header: MessageHeader,
    /// All account addresses referenced by this message, in the canonical
    /// order the header describes.
    #[serde(rename = "addresses")]
    pub account_keys: Vec<Address>,
    /// The id of a recent ledger entry; doubles as the transaction nonce.
    #[serde(rename = "latestBlockhash")]
    pub recent_blockhash: Hash,
    /// Instructions to execute in sequence, committed atomically.
    pub instructions: Vec<CompiledInstruction>,
}

fn merge_mention(metas: &mut Vec<AccountMeta>, pubkey: Address, is_signer: bool, is_writable: bool) {
    if let Some(meta) = metas.iter_mut().find(|meta| meta.pubkey == pubkey) {
        meta.is_signer |= is_signer;
        meta.is_writable |= is_writable;
    } else {
        metas.push(AccountMeta {
            pubkey,
            is_signer,
            is_writable,
        });
    }
}

fn position(account_keys: &[Address], pubkey: &Address) -> Result<u8, MessageError> {
    account_keys
        .iter()
        .position(|key| key == pubkey)
        .and_then(|index| u8::try_from(index).ok())
        .ok_or(MessageError::InvalidAccountIndex)
}

impl Message {
    /// Compile instructions into a message with a canonically ordered
    /// account list.
    ///
    /// Every mentioned account folds into the strongest access requested for
    /// it; a program id joins as read-only non-signer unless some other
    /// mention upgrades it. The fee payer, when given, is forced to a
    /// writable signer and sorts first. The rest of the list orders by
    /// signer-before-non-signer, writable-before-read-only, with ties broken
    /// by base58 so the result is identical across builds.
    pub fn compile(
        instructions: &[Instruction],
        payer: Option<&Address>,
        recent_blockhash: Hash,
    ) -> Result<Self, MessageError> {
        let mut metas: Vec<AccountMeta> = Vec::new();
        for instruction in instructions {
            merge_mention(&mut metas, instruction.program_id, false, false);
            for account in &instruction.accounts {
                merge_mention(&mut metas, account.pubkey, account.is_signer, account.is_writable);
            }
        }
        if let Some(payer) = payer {
            merge_mention(&mut metas, *payer, true, true);
        }

        // Rank 1 is reserved for a future category; the gap keeps any
        // extension from reordering existing output.
        metas.sort_by_cached_key(|meta| {
            let rank: u8 = if payer == Some(&meta.pubkey) {
                0
            } else {
                match (meta.is_signer, meta.is_writable) {
                    (true, true) => 2,
                    (true, false) => 3,
                    (false, true) => 4,
                    (false, false) => 5,
                }
            };
            (rank, meta.pubkey.to_string())
        });

        if metas.len() > MAX_ACCOUNTS {
            return Err(MessageError::TooManyAccounts);
        }

        let count = |pred: fn(&AccountMeta) -> bool| -> Result<u8, MessageError> {
            u8::try_from(metas.iter().filter(|meta| pred(meta)).count())
                .map_err(|_| MessageError::TooManyAccounts)
        };
        let header = MessageHeader {
            num_required_signatures: count(|meta| meta.is_signer)?,
            num_readonly_signed_accounts: count(|meta| meta.is_signer && !meta.is_writable)?,
            num_readonly_unsigned_accounts: count(|meta| !meta.is_signer && !meta.is_writable)?,
        };

        let account_keys: Vec<Address> = metas.iter().map(|meta| meta.pubkey).collect();
        let instructions = instructions
            .iter()
            .map(|instruction| {
                let accounts = instruction
                    .accounts
                    .iter()
                    .map(|meta| position(&account_keys, &meta.pubkey))
                    .collect::<Result<Vec<u8>, _>>()?;
                Ok(CompiledInstruction {
                    program_id_index: position(&account_keys, &instruction.program_id)?,
                    accounts,
                    data: instruction.data.clone(),
                })
            })
            .collect::<Result<Vec<_>, MessageError>>()?;

        Ok(Self {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    }

    /// The account that pays fees: the first signer, when there is one.
    pub fn fee_payer(&self) -> Option<&Address> {
        if self.header.num_required_signatures == 0 {
            None
        } else {
            self.account_keys.first()
        }
    }

    /// Account keys are ordered with signers first. An index falls in the
    /// signer region if it is less than `num_required_signatures`.
    pub fn is_signer(&self, index: usize) -> bool {
        index < usize::from(self.header.num_required_signatures)
    }

    /// Whether the account at this index was requested as writable.
    ///
    /// Account keys are ordered `[writable signers][readonly signers]
    /// [writable non-signers][readonly non-signers]`; this checks which
    /// region the index falls into based on the header counts.
    pub fn is_writable_index(&self, index: usize) -> bool {
        let num_account_keys = self.account_keys.len();
        let num_signers = usize::from(self.header.num_required_signatures);
        if index >= num_account_keys {
            return false;
        }
        if index >= num_signers {
            let num_unsigned = num_account_keys.saturating_sub(num_signers);
            let num_writable_unsigned = num_unsigned
                .saturating_sub(usize::from(self.header.num_readonly_unsigned_accounts));
            index.saturating_sub(num_signers) < num_writable_unsigned
        } else {
            let num_writable_signed =
                num_signers.saturating_sub(usize::from(self.header.num_readonly_signed_accounts));
            index < num_writable_signed
        }
    }

    /// The account at `index` with its roles read off the header.
    pub fn account_meta(&self, index: usize) -> Option<AccountMeta> {
        let pubkey = *self.account_keys.get(index)?;
        Some(AccountMeta {
            pubkey,
            is_signer: self.is_signer(index),
            is_writable: self.is_writable_index(index),
        })
    }

    /// Every account with its roles read off the header, in list order.
    pub fn account_metas(&self) -> Vec<AccountMeta> {
        self.account_keys
            .iter()
            .enumerate()
            .map(|(index, &pubkey)| AccountMeta {
                pubkey,
                is_signer: self.is_signer(index),
                is_writable: self.is_writable_index(index),
            })
            .collect()
    }

    /// Rebuild factory-shape instructions from the compiled form.
    ///
    /// Account roles come from the header, so recompiling the result against
    /// the same fee payer reproduces this message exactly.
    pub fn decompile_instructions(&self) -> Result<Vec<Instruction>, MessageError> {
        self.instructions
            .iter()
            .map(|instruction| {
                let program_id = *self
                    .account_keys
                    .get(usize::from(instruction.program_id_index))
                    .ok_or(MessageError::InvalidProgramIdIndex)?;
                let accounts = instruction
                    .accounts
                    .iter()
                    .map(|&index| {
                        self.account_meta(usize::from(index))
                            .ok_or(MessageError::InvalidAccountIndex)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Instruction {
                    program_id,
                    accounts,
                    data: instruction.data.clone(),
                })
            })
            .collect()
    }
}
