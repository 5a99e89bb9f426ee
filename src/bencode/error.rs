use thiserror::Error;

use super::byte_string::ByteString;

/// Errors produced while decoding or encoding bencode values.
///
/// Every variant except [`BencodeError::BufferTooSmall`] describes malformed
/// input. `BufferTooSmall` is returned by the encoder when the destination
/// slice cannot hold the encoded value.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// The input ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A delimiter or type marker was missing or wrong.
    #[error("unexpected character {found:?}, expected {expected}")]
    UnexpectedChar { expected: &'static str, found: char },

    /// Malformed or non-canonical integer.
    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    /// The integer does not fit in a signed 64-bit value.
    #[error("integer out of range")]
    IntegerOverflow,

    /// Malformed byte string length prefix.
    #[error("invalid string length")]
    InvalidStringLength,

    /// A dictionary key was not a byte string.
    #[error("dictionary key is not a byte string")]
    NonStringKey,

    /// Dictionary keys arrived out of ascending order on a strict reader.
    #[error("dictionary keys are not ordered: {key:?} follows {previous:?}")]
    UnsortedKeys { previous: ByteString, key: ByteString },

    /// The same key appeared twice in one dictionary.
    #[error("duplicate dictionary key {0:?}")]
    DuplicateKey(ByteString),

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("trailing data after value")]
    TrailingData,

    /// The destination buffer is too small for the encoded value.
    #[error("buffer too small: need {needed} bytes, {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    /// Maps reader failures, folding a short read into [`BencodeError::UnexpectedEof`].
    pub(crate) fn from_io(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            BencodeError::UnexpectedEof
        } else {
            BencodeError::Io(err)
        }
    }

    pub(crate) fn unexpected(expected: &'static str, found: u8) -> Self {
        BencodeError::UnexpectedChar {
            expected,
            found: found as char,
        }
    }
}
