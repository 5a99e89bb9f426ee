use std::io::{Read, Seek};

use bytes::BufMut;

use super::error::BencodeError;
use super::reader::PeekReader;

/// Capabilities shared by every bencode value type.
///
/// Implemented by `i64`, [`ByteString`](super::ByteString),
/// [`List`](super::List), [`Dictionary`](super::Dictionary) and the
/// [`Value`](super::Value) sum type. For every implementor,
/// `length_in_bytes()` is exactly the number of bytes `write_to` produces.
pub trait Bencode: Sized {
    /// Size of the canonical encoding in bytes.
    fn length_in_bytes(&self) -> usize;

    /// Appends the canonical encoding to `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf` has less than `length_in_bytes()` bytes of remaining
    /// capacity, as `BufMut` does for fixed-size slices. Use
    /// [`encode_into`](Self::encode_into) to get an error instead.
    fn write_to<B: BufMut>(&self, buf: &mut B);

    /// Decodes one value of this type from `reader`, honoring its strictness.
    fn decode_from<R: Read + Seek>(reader: &mut PeekReader<R>) -> Result<Self, BencodeError>;

    /// Writes the encoding into `buf` starting at `offset` and returns the
    /// number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`BencodeError::BufferTooSmall`] without touching `buf` if the
    /// value does not fit.
    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, BencodeError> {
        let needed = self.length_in_bytes();
        let available = buf.len().saturating_sub(offset);
        if needed > available {
            return Err(BencodeError::BufferTooSmall { needed, available });
        }

        let mut dst = &mut buf[offset..offset + needed];
        self.write_to(&mut dst);
        debug_assert!(dst.is_empty(), "length_in_bytes disagrees with write_to");
        Ok(needed)
    }

    /// Encodes into a freshly allocated, exactly sized vector.
    fn to_bencode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.length_in_bytes());
        self.write_to(&mut buf);
        buf
    }
}

/// Writes the encoded form of `value` as lossy UTF-8 text.
pub(crate) fn fmt_encoded<T: Bencode>(
    value: &T,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    f.write_str(&String::from_utf8_lossy(&value.to_bencode()))
}
