//! Transaction container: signatures bound to an encoded message.
//!
//! Wire format: `[compact-u16 signature count][64 bytes per slot][message]`.
//! An empty slot is written as 64 zero bytes. The signature count always
//! equals `num_required_signatures` from the message header, and slot `i`
//! belongs to the `i`-th account of the message.
//!
//! A transaction owns the canonical message bytes alongside the structured
//! message; the bytes are the single signed artifact, and every operation
//! that would change a transaction returns a fresh value instead of
//! mutating in place. That keeps the encoded form from drifting out of sync
//! with the structured form.

pub mod error;
mod json;

pub use error::TransactionError;

use {
    zenith_address::Address,
    zenith_hash::Hash,
    zenith_keypair::Keypair,
    zenith_message::{AccountMeta, Instruction, Message},
    zenith_short_vec as short_vec,
    zenith_signature::{Signature, SIGNATURE_BYTES},
};

/// A transaction: an encoded message plus one signature slot per required
/// signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    message: Message,
    message_bytes: Vec<u8>,
    signatures: Vec<Option<Signature>>,
}

impl Transaction {
    /// Wrap a message with empty signature slots.
    pub fn new_unsigned(message: Message) -> Result<Self, TransactionError> {
        let num_signers = usize::from(message.header.num_required_signatures);
        if message.account_keys.len() < num_signers {
            return Err(zenith_message::MessageError::InvalidHeader.into());
        }
        let message_bytes = message.serialize()?;
        Ok(Self {
            message,
            message_bytes,
            signatures: vec![None; num_signers],
        })
    }

    /// Compile instructions into an unsigned transaction.
    pub fn new_with_payer(
        instructions: &[Instruction],
        payer: Option<&Address>,
        recent_blockhash: Hash,
    ) -> Result<Self, TransactionError> {
        Self::new_unsigned(Message::compile(instructions, payer, recent_blockhash)?)
    }

    /// Compile instructions and sign with every given keypair.
    ///
    /// Fails with [`TransactionError::UnknownSigner`] if a keypair does not
    /// own a signer slot.
    pub fn new_signed_with_payer(
        instructions: &[Instruction],
        payer: Option<&Address>,
        keypairs: &[&Keypair],
        recent_blockhash: Hash,
    ) -> Result<Self, TransactionError> {
        Self::new_with_payer(instructions, payer, recent_blockhash)?.try_sign(keypairs)
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// The canonical message encoding: exactly the bytes each signer signs.
    pub fn message_bytes(&self) -> &[u8] {
        &self.message_bytes
    }

    /// The first signature, when present. Conventionally used as the
    /// transaction id.
    pub fn signature(&self) -> Option<&Signature> {
        self.signatures.first().and_then(|slot| slot.as_ref())
    }

    /// The addresses that must sign, in slot order.
    pub fn signer_addresses(&self) -> &[Address] {
        &self.message.account_keys[..self.signatures.len()]
    }

    /// Every signature slot paired with its signer's address.
    pub fn signatures(&self) -> Vec<(Address, Option<Signature>)> {
        self.signer_addresses()
            .iter()
            .copied()
            .zip(self.signatures.iter().copied())
            .collect()
    }

    /// Every account with signer/writable roles read off the header.
    pub fn accounts(&self) -> Vec<AccountMeta> {
        self.message.account_metas()
    }

    /// Whether every signer slot holds a signature.
    pub fn is_signed(&self) -> bool {
        self.signatures.iter().all(|slot| slot.is_some())
    }

    fn signer_slot(&self, address: &Address) -> Option<usize> {
        self.signer_addresses()
            .iter()
            .position(|candidate| candidate == address)
    }

    fn sign_inner(
        &self,
        keypairs: &[&Keypair],
        skip_unknown: bool,
    ) -> Result<Self, TransactionError> {
        let mut next = self.clone();
        for keypair in keypairs {
            let address = keypair.pubkey();
            match next.signer_slot(&address) {
                Some(slot) => {
                    next.signatures[slot] = Some(keypair.sign_message(&next.message_bytes))
                }
                None if skip_unknown => {}
                None => return Err(TransactionError::UnknownSigner(address)),
            }
        }
        Ok(next)
    }

    /// Sign with every keypair, returning a new transaction.
    ///
    /// Every keypair must own a signer slot; an address outside the signer
    /// prefix fails with [`TransactionError::UnknownSigner`].
    pub fn try_sign(&self, keypairs: &[&Keypair]) -> Result<Self, TransactionError> {
        self.sign_inner(keypairs, false)
    }

    /// Sign with the keypairs that own signer slots and silently skip the
    /// rest.
    ///
    /// Slots a skipped keypair would have filled stay empty, so a later
    /// strict [`Transaction::verify_signatures`] still fails; this flag and
    /// the verifier's are independent.
    pub fn try_partial_sign(&self, keypairs: &[&Keypair]) -> Result<Self, TransactionError> {
        self.sign_inner(keypairs, true)
    }

    /// Bind an externally produced signature to its signer's slot.
    pub fn add_signature(
        &self,
        address: &Address,
        signature: Signature,
    ) -> Result<Self, TransactionError> {
        let slot = self
            .signer_slot(address)
            .ok_or(TransactionError::UnknownSigner(*address))?;
        let mut next = self.clone();
        next.signatures[slot] = Some(signature);
        Ok(next)
    }

    fn verify_inner(&self, allow_missing: bool) -> Result<(), TransactionError> {
        for (address, slot) in self.signer_addresses().iter().zip(&self.signatures) {
            match slot {
                None if allow_missing => {}
                None => return Err(TransactionError::MissingSignature(*address)),
                Some(signature) => {
                    if !signature.verify(address.as_array(), &self.message_bytes) {
                        return Err(TransactionError::InvalidSignature(*address));
                    }
                }
            }
        }
        Ok(())
    }

    /// Verify every signer slot against the message bytes.
    pub fn verify_signatures(&self) -> Result<(), TransactionError> {
        self.verify_inner(false)
    }

    /// Verify the slots that hold signatures and allow empty ones.
    pub fn verify_present_signatures(&self) -> Result<(), TransactionError> {
        self.verify_inner(true)
    }

    /// Serialize to the wire format.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            short_vec::encoded_len(self.signatures.len() as u16)
                + self.signatures.len() * SIGNATURE_BYTES
                + self.message_bytes.len(),
        );
        // Slot count always fits: it equals a u8 header field.
        short_vec::encode_len(self.signatures.len() as u16, &mut bytes);
        for slot in &self.signatures {
            match slot {
                Some(signature) => bytes.extend_from_slice(signature.as_array()),
                None => bytes.extend_from_slice(&[0u8; SIGNATURE_BYTES]),
            }
        }
        bytes.extend_from_slice(&self.message_bytes);
        bytes
    }

    /// Parse a transaction, rejecting trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let (transaction, consumed) = Self::from_bytes_partial(bytes)?;
        if consumed != bytes.len() {
            return Err(TransactionError::TrailingData);
        }
        Ok(transaction)
    }

    /// Parse a transaction from the front of a larger buffer, returning
    /// bytes consumed.
    ///
    /// An all-zero signature parses as an empty slot.
    pub fn from_bytes_partial(bytes: &[u8]) -> Result<(Self, usize), TransactionError> {
        let (num_signatures, prefix) =
            short_vec::decode_len(bytes).map_err(zenith_message::MessageError::from)?;
        let mut offset = prefix;

        let mut signatures = Vec::with_capacity(num_signatures);
        for _ in 0..num_signatures {
            let chunk = bytes
                .get(offset..offset + SIGNATURE_BYTES)
                .ok_or(TransactionError::NotEnoughSignatureBytes)?;
            offset += SIGNATURE_BYTES;
            let signature = Signature::try_from(chunk)
                .map_err(|_| TransactionError::NotEnoughSignatureBytes)?;
            signatures.push((signature != Signature::default()).then_some(signature));
        }

        let (message, message_len) = Message::from_bytes_partial(&bytes[offset..])?;
        let expected = usize::from(message.header.num_required_signatures);
        if signatures.len() != expected {
            return Err(TransactionError::SignatureCountMismatch {
                expected,
                actual: signatures.len(),
            });
        }
        let message_bytes = bytes[offset..offset + message_len].to_vec();
        offset += message_len;

        Ok((
            Self {
                message,
                message_bytes,
                signatures,
            },
            offset,
        ))
    }

    /// Re-emit the message under a new blockhash, keeping the signature
    /// slots as they are.
    ///
    /// Existing signatures are not cleared; they no longer match the new
    /// message bytes, so verification fails until the signers re-sign.
    pub fn with_blockhash(&self, recent_blockhash: Hash) -> Result<Self, TransactionError> {
        let mut message = self.message.clone();
        message.recent_blockhash = recent_blockhash;
        let message_bytes = message.serialize()?;
        Ok(Self {
            message,
            message_bytes,
            signatures: self.signatures.clone(),
        })
    }

    /// Rebuild the transaction with a different fee payer.
    ///
    /// Instructions, blockhash, and account roles carry over; the account
    /// list is recompiled around the new payer. Signatures whose addresses
    /// still own signer slots are re-attached (and are stale unless the
    /// message happens to be unchanged); signatures for addresses that are
    /// no longer signers are dropped.
    pub fn with_fee_payer(&self, payer: &Address) -> Result<Self, TransactionError> {
        let instructions = self.message.decompile_instructions()?;
        let mut next =
            Self::new_with_payer(&instructions, Some(payer), self.message.recent_blockhash)?;
        for (address, slot) in self.signer_addresses().iter().zip(&self.signatures) {
            if let Some(signature) = slot {
                if next.signer_slot(address).is_some() {
                    next = next.add_signature(address, *signature)?;
                }
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        proptest::prelude::*,
        zenith_message::{AccountMeta, Instruction, MessageError},
        zenith_short_vec::ShortVecError,
    };

    /// A transfer-shaped instruction: payer debits, recipient credits.
    fn transfer_ix(program: Address, from: Address, to: Address, amount: u64) -> Instruction {
        let mut data = vec![2, 0, 0, 0];
        data.extend_from_slice(&amount.to_le_bytes());
        Instruction::new(
            program,
            vec![AccountMeta::new(from, true), AccountMeta::new(to, false)],
            data,
        )
    }

    fn system_program() -> Address {
        Address::new_from_array([0u8; 32])
    }

    #[test]
    fn unsigned_transaction_has_empty_slots() {
        let payer = Keypair::from_seed(&[1u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            1_000,
        );
        let tx =
            Transaction::new_with_payer(&[ix], Some(&payer.pubkey()), Hash::new_unique()).unwrap();

        assert_eq!(tx.signatures().len(), 1);
        assert_eq!(tx.signature(), None);
        assert!(!tx.is_signed());
        assert_eq!(tx.signer_addresses(), &[payer.pubkey()]);
    }

    #[test]
    fn sign_then_verify() {
        let payer = Keypair::from_seed(&[2u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            500,
        );
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer],
            Hash::new_unique(),
        )
        .unwrap();

        assert!(tx.is_signed());
        assert!(tx.verify_signatures().is_ok());
        assert_eq!(tx.signature(), tx.signatures[0].as_ref());
    }

    #[test]
    fn every_required_signer_verifies() {
        let payer = Keypair::from_seed(&[3u8; 32]);
        let second = Keypair::from_seed(&[4u8; 32]);
        let ix = transfer_ix(system_program(), second.pubkey(), Address::new_unique(), 9);
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer, &second],
            Hash::new_unique(),
        )
        .unwrap();

        assert_eq!(tx.signatures().len(), 2);
        assert!(tx.verify_signatures().is_ok());
    }

    #[test]
    fn try_sign_rejects_a_non_signer_keypair() {
        let payer = Keypair::from_seed(&[5u8; 32]);
        let stranger = Keypair::from_seed(&[6u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            1,
        );
        let tx =
            Transaction::new_with_payer(&[ix], Some(&payer.pubkey()), Hash::new_unique()).unwrap();

        assert_eq!(
            tx.try_sign(&[&payer, &stranger]).unwrap_err(),
            TransactionError::UnknownSigner(stranger.pubkey())
        );
    }

    #[test]
    fn partial_sign_skips_strangers_and_stays_orthogonal_to_verification() {
        let payer = Keypair::from_seed(&[7u8; 32]);
        let second = Keypair::from_seed(&[8u8; 32]);
        let stranger = Keypair::from_seed(&[9u8; 32]);
        let ix = transfer_ix(system_program(), second.pubkey(), Address::new_unique(), 2);
        let tx =
            Transaction::new_with_payer(&[ix], Some(&payer.pubkey()), Hash::new_unique()).unwrap();

        // The stranger is skipped, the payer's slot fills, the second
        // signer's slot stays empty.
        let partially_signed = tx.try_partial_sign(&[&payer, &stranger]).unwrap();
        assert!(!partially_signed.is_signed());

        // Strict verification still reports the hole; the lenient form
        // checks what is there.
        assert_eq!(
            partially_signed.verify_signatures().unwrap_err(),
            TransactionError::MissingSignature(second.pubkey())
        );
        assert!(partially_signed.verify_present_signatures().is_ok());

        // Filling the hole satisfies the strict form.
        let fully_signed = partially_signed.try_sign(&[&second]).unwrap();
        assert!(fully_signed.verify_signatures().is_ok());
    }

    #[test]
    fn add_signature_binds_a_detached_signature() {
        let payer = Keypair::from_seed(&[10u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            77,
        );
        let tx =
            Transaction::new_with_payer(&[ix], Some(&payer.pubkey()), Hash::new_unique()).unwrap();

        let detached = payer.sign_message(tx.message_bytes());
        let signed = tx.add_signature(&payer.pubkey(), detached).unwrap();
        assert!(signed.verify_signatures().is_ok());

        // The original value is untouched.
        assert_eq!(tx.signature(), None);
        assert!(!tx.is_signed());
    }

    #[test]
    fn add_signature_rejects_unknown_addresses() {
        let payer = Keypair::from_seed(&[11u8; 32]);
        let stranger = Address::new_unique();
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            1,
        );
        let tx =
            Transaction::new_with_payer(&[ix], Some(&payer.pubkey()), Hash::new_unique()).unwrap();

        assert_eq!(
            tx.add_signature(&stranger, Signature::default()).unwrap_err(),
            TransactionError::UnknownSigner(stranger)
        );
    }

    #[test]
    fn corrupted_signatures_fail_verification() {
        let payer = Keypair::from_seed(&[12u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            3,
        );
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer],
            Hash::new_unique(),
        )
        .unwrap();

        let mut sig_bytes = *tx.signature().unwrap().as_array();
        sig_bytes[0] ^= 0x01;
        let corrupted = tx
            .add_signature(&payer.pubkey(), Signature::from(sig_bytes))
            .unwrap();
        assert_eq!(
            corrupted.verify_signatures().unwrap_err(),
            TransactionError::InvalidSignature(payer.pubkey())
        );
    }

    #[test]
    fn wire_roundtrip_preserves_observable_fields() {
        let payer = Keypair::from_seed(&[13u8; 32]);
        let second = Keypair::from_seed(&[14u8; 32]);
        let ix = transfer_ix(system_program(), second.pubkey(), Address::new_unique(), 21);
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer, &second],
            Hash::new_unique(),
        )
        .unwrap();

        let parsed = Transaction::from_bytes(&tx.serialize()).unwrap();
        assert_eq!(parsed, tx);
        assert_eq!(parsed.signatures(), tx.signatures());
        assert_eq!(parsed.accounts(), tx.accounts());
        assert!(parsed.verify_signatures().is_ok());
    }

    #[test]
    fn unsigned_slots_roundtrip_as_zero_bytes() {
        let payer = Keypair::from_seed(&[15u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            4,
        );
        let tx =
            Transaction::new_with_payer(&[ix], Some(&payer.pubkey()), Hash::new_unique()).unwrap();

        let bytes = tx.serialize();
        // One slot: prefix byte, then 64 zeros.
        assert_eq!(bytes[0], 1);
        assert!(bytes[1..1 + 64].iter().all(|&b| b == 0));

        let parsed = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.signature(), None);
        assert_eq!(parsed, tx);
    }

    #[test]
    fn golden_byte_layout() {
        let payer = Keypair::from_seed(&[16u8; 32]);
        let recipient = Address::new_from_array([9u8; 32]);
        let blockhash = Hash::new_from_array([0xcd; 32]);
        let ix = transfer_ix(system_program(), payer.pubkey(), recipient, 256);
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer],
            blockhash,
        )
        .unwrap();

        let bytes = tx.serialize();
        let signature = tx.signature().unwrap();

        let mut expected = Vec::new();
        expected.push(1); // signature count
        expected.extend_from_slice(signature.as_array());
        expected.push(1); // num_required_signatures
        expected.push(0); // num_readonly_signed_accounts
        expected.push(1); // num_readonly_unsigned_accounts
        expected.push(3); // account count
        expected.extend_from_slice(payer.pubkey().as_array());
        expected.extend_from_slice(recipient.as_array());
        expected.extend_from_slice(system_program().as_array()); // read-only program last
        expected.extend_from_slice(&[0xcd; 32]); // blockhash
        expected.push(1); // instruction count
        expected.push(2); // program id index
        expected.push(2); // account index count
        expected.extend_from_slice(&[0, 1]); // payer, recipient
        expected.push(12); // data length
        expected.extend_from_slice(&[2, 0, 0, 0]); // transfer tag
        expected.extend_from_slice(&256u64.to_le_bytes());

        assert_eq!(bytes, expected);
    }

    #[test]
    fn from_bytes_rejects_truncated_signatures() {
        let payer = Keypair::from_seed(&[17u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            5,
        );
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer],
            Hash::new_unique(),
        )
        .unwrap();

        let bytes = tx.serialize();
        assert_eq!(
            Transaction::from_bytes(&bytes[..32]),
            Err(TransactionError::NotEnoughSignatureBytes)
        );
    }

    #[test]
    fn from_bytes_rejects_trailing_bytes() {
        let payer = Keypair::from_seed(&[18u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            6,
        );
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer],
            Hash::new_unique(),
        )
        .unwrap();

        let mut bytes = tx.serialize();
        bytes.push(0x00);
        assert_eq!(
            Transaction::from_bytes(&bytes),
            Err(TransactionError::TrailingData)
        );
    }

    #[test]
    fn from_bytes_rejects_a_count_disagreeing_with_the_header() {
        let payer = Keypair::from_seed(&[19u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            7,
        );
        let tx =
            Transaction::new_with_payer(&[ix], Some(&payer.pubkey()), Hash::new_unique()).unwrap();

        // Prepend an extra zeroed signature slot.
        let mut bytes = Vec::new();
        short_vec::encode_len(2, &mut bytes);
        bytes.extend_from_slice(&[0u8; 64]);
        bytes.extend_from_slice(&[0u8; 64]);
        bytes.extend_from_slice(tx.message_bytes());

        assert_eq!(
            Transaction::from_bytes(&bytes),
            Err(TransactionError::SignatureCountMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn from_bytes_rejects_versioned_messages() {
        let mut bytes = Vec::new();
        short_vec::encode_len(1, &mut bytes);
        bytes.extend_from_slice(&[0u8; 64]);
        bytes.push(0x80); // versioned message prefix where the header starts
        assert_eq!(
            Transaction::from_bytes(&bytes),
            Err(TransactionError::Message(
                MessageError::VersionedNotSupported
            ))
        );
    }

    #[test]
    fn from_bytes_partial_returns_consumed() {
        let payer = Keypair::from_seed(&[20u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            8,
        );
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer],
            Hash::new_unique(),
        )
        .unwrap();

        let mut bytes = tx.serialize();
        let tx_len = bytes.len();
        bytes.extend_from_slice(&[0xee; 32]);

        let (parsed, consumed) = Transaction::from_bytes_partial(&bytes).unwrap();
        assert_eq!(consumed, tx_len);
        assert_eq!(parsed, tx);
    }

    #[test]
    fn with_blockhash_invalidates_existing_signatures() {
        let payer = Keypair::from_seed(&[21u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            50,
        );
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer],
            Hash::new_unique(),
        )
        .unwrap();
        assert!(tx.verify_signatures().is_ok());

        let updated = tx.with_blockhash(Hash::new_unique()).unwrap();
        // The stale signature is still in its slot but no longer matches.
        assert!(updated.signature().is_some());
        assert_eq!(
            updated.verify_signatures().unwrap_err(),
            TransactionError::InvalidSignature(payer.pubkey())
        );
        // Re-signing repairs it; the original is untouched throughout.
        assert!(updated.try_sign(&[&payer]).unwrap().verify_signatures().is_ok());
        assert!(tx.verify_signatures().is_ok());
    }

    #[test]
    fn with_blockhash_changes_only_the_blockhash() {
        let payer = Keypair::from_seed(&[22u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            51,
        );
        let tx =
            Transaction::new_with_payer(&[ix], Some(&payer.pubkey()), Hash::new_unique()).unwrap();

        let new_blockhash = Hash::new_unique();
        let updated = tx.with_blockhash(new_blockhash).unwrap();
        assert_eq!(updated.message().recent_blockhash, new_blockhash);
        assert_eq!(updated.message().account_keys, tx.message().account_keys);
        assert_eq!(updated.message().instructions, tx.message().instructions);
    }

    #[test]
    fn with_fee_payer_moves_the_payer_and_keeps_surviving_slots() {
        let old_payer = Keypair::from_seed(&[23u8; 32]);
        let second = Keypair::from_seed(&[24u8; 32]);
        let new_payer = Keypair::from_seed(&[25u8; 32]);
        // The second signer is named by the instruction, so its slot
        // survives the rebuild; the old payer's slot does not.
        let ix = transfer_ix(system_program(), second.pubkey(), Address::new_unique(), 90);
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&old_payer.pubkey()),
            &[&old_payer, &second],
            Hash::new_unique(),
        )
        .unwrap();

        let moved = tx.with_fee_payer(&new_payer.pubkey()).unwrap();
        assert_eq!(moved.message().fee_payer(), Some(&new_payer.pubkey()));
        assert!(moved
            .signer_addresses()
            .iter()
            .all(|address| *address != old_payer.pubkey()));

        // The carried-over signature is stale against the rebuilt message.
        let signatures = moved.signatures();
        let second_slot = signatures
            .iter()
            .find(|(address, _)| *address == second.pubkey())
            .unwrap();
        assert!(second_slot.1.is_some());
        assert_eq!(
            moved.verify_present_signatures().unwrap_err(),
            TransactionError::InvalidSignature(second.pubkey())
        );

        // Fresh signatures over the rebuilt message verify.
        let resigned = moved.try_sign(&[&new_payer, &second]).unwrap();
        assert!(resigned.verify_signatures().is_ok());
    }

    #[test]
    fn with_fee_payer_is_a_no_op_shape_change_for_the_same_payer() {
        let payer = Keypair::from_seed(&[26u8; 32]);
        let ix = transfer_ix(
            system_program(),
            payer.pubkey(),
            Address::new_unique(),
            13,
        );
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[&payer],
            Hash::new_unique(),
        )
        .unwrap();

        // Rebuilding around the same payer reproduces the same message, so
        // the re-attached signature is still valid.
        let rebuilt = tx.with_fee_payer(&payer.pubkey()).unwrap();
        assert_eq!(rebuilt.message(), tx.message());
        assert!(rebuilt.verify_signatures().is_ok());
    }

    #[test]
    fn accounts_reconstruct_roles_after_parsing() {
        let payer = Keypair::from_seed(&[27u8; 32]);
        let readonly_signer = Keypair::from_seed(&[28u8; 32]);
        let program = Address::new_unique();
        let ix = Instruction::new(
            program,
            vec![
                AccountMeta::new_readonly(readonly_signer.pubkey(), true),
                AccountMeta::new(Address::new_unique(), false),
            ],
            vec![1],
        );
        let tx =
            Transaction::new_with_payer(&[ix], Some(&payer.pubkey()), Hash::new_unique()).unwrap();

        let parsed = Transaction::from_bytes(&tx.serialize()).unwrap();
        for (meta, original) in parsed.accounts().iter().zip(tx.accounts()) {
            assert_eq!(*meta, original);
        }
        let roles: Vec<(bool, bool)> = parsed
            .accounts()
            .iter()
            .map(|meta| (meta.is_signer, meta.is_writable))
            .collect();
        // payer, readonly signer, writable non-signer, read-only program.
        assert_eq!(
            roles,
            vec![(true, true), (true, false), (false, true), (false, false)]
        );
    }

    #[test]
    fn new_unsigned_rejects_a_header_without_enough_accounts() {
        let message = Message {
            header: zenith_message::MessageHeader {
                num_required_signatures: 3,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 0,
            },
            account_keys: vec![Address::new_unique()],
            recent_blockhash: Hash::new_unique(),
            instructions: vec![],
        };
        assert_eq!(
            Transaction::new_unsigned(message),
            Err(TransactionError::Message(MessageError::InvalidHeader))
        );
    }

    proptest! {
        #[test]
        fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..1024)) {
            let _ = Transaction::from_bytes(&bytes);
        }

        #[test]
        fn truncations_of_a_valid_transaction_fail(cut in 0usize..200) {
            let payer = Keypair::from_seed(&[29u8; 32]);
            let ix = transfer_ix(
                system_program(),
                payer.pubkey(),
                Address::new_from_array([5u8; 32]),
                1,
            );
            let tx = Transaction::new_signed_with_payer(
                &[ix],
                Some(&payer.pubkey()),
                &[&payer],
                Hash::new_from_array([6u8; 32]),
            )
            .unwrap();
            let bytes = tx.serialize();
            prop_assume!(cut < bytes.len());
            prop_assert!(Transaction::from_bytes(&bytes[..cut]).is_err());
        }

    }

    #[test]
    fn length_prefix_errors_surface_through_the_message_error() {
        assert_eq!(
            Transaction::from_bytes(&[0x80]).unwrap_err(),
            TransactionError::Message(MessageError::LengthPrefix(ShortVecError::Truncated))
        );
    }
}
