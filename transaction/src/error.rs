//! Error type for transaction operations.

use {thiserror::Error, zenith_address::Address, zenith_message::MessageError};

/// Ways building, parsing, signing, or verifying a transaction can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// Ed25519 verification failed for this signer's slot.
    #[error("signature verification failed for {0}")]
    InvalidSignature(Address),
    /// The message portion was malformed or impossible to encode.
    #[error("message: {0}")]
    Message(#[from] MessageError),
    /// A signer slot was empty during strict verification.
    #[error("no signature present for signer {0}")]
    MissingSignature(Address),
    /// The buffer ended inside the signature section.
    #[error("not enough bytes for the declared signature count")]
    NotEnoughSignatureBytes,
    /// The signature count does not match the message header.
    #[error("signature count mismatch: expected {expected}, got {actual}")]
    SignatureCountMismatch { expected: usize, actual: usize },
    /// Bytes remained after the transaction ended.
    #[error("unexpected trailing bytes after transaction")]
    TrailingData,
    /// A signature was offered for an address outside the signer prefix.
    #[error("{0} is not a required signer of this transaction")]
    UnknownSigner(Address),
}
