//! Error type shared by message construction and the wire codec.

use {thiserror::Error, zenith_short_vec::ShortVecError};

/// Ways a message can be malformed or impossible to encode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Input ended before the structure it declares.
    #[error("buffer too small")]
    BufferTooSmall,
    /// An instruction references an account index past the account list.
    #[error("instruction account index out of bounds")]
    InvalidAccountIndex,
    /// Header counts do not fit the account list.
    #[error("header counts are inconsistent with the account list")]
    InvalidHeader,
    /// An instruction's program id index is past the account list.
    #[error("program id index out of bounds")]
    InvalidProgramIdIndex,
    /// A compact-u16 length prefix failed to decode.
    #[error("length prefix: {0}")]
    LengthPrefix(#[from] ShortVecError),
    /// More accounts than a one-byte index can address.
    #[error("too many accounts to index with a single byte")]
    TooManyAccounts,
    /// An instruction's account list cannot be length-prefixed.
    #[error("instruction account list too long to encode")]
    TooManyInstructionAccounts,
    /// The instruction list cannot be length-prefixed.
    #[error("too many instructions to encode")]
    TooManyInstructions,
    /// An instruction's data cannot be length-prefixed.
    #[error("instruction data too long to encode")]
    InstructionDataTooLarge,
    /// Bytes remained after the message ended.
    #[error("unexpected trailing bytes after message")]
    TrailingData,
    /// The first header byte carries the version prefix bit.
    #[error("versioned messages are not supported")]
    VersionedNotSupported,
}
