use std::borrow::{Borrow, Cow};
use std::fmt;
use std::io::{Read, Seek};

use bytes::{BufMut, Bytes};

use super::error::BencodeError;
use super::integer::{decimal_len, put_decimal};
use super::reader::PeekReader;
use super::traits::{fmt_encoded, Bencode};
use crate::constants::LENGTH_SEPARATOR;

/// A bencode byte string, encoded as `<length>:<bytes>`.
///
/// The raw bytes are the identity of the value; text is only a view.
/// Ordering is byte-wise lexicographic, which is the order dictionary keys
/// must appear in on the wire.
///
/// # Examples
///
/// ```
/// use bencoding::bencode::{Bencode, ByteString};
///
/// let s = ByteString::from("spam");
/// assert_eq!(s.as_str(), Some("spam"));
/// assert_eq!(s.to_bencode(), b"4:spam");
/// assert!(ByteString::from("a") < ByteString::from("b"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteString(Bytes);

impl ByteString {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        ByteString(bytes.into())
    }

    pub const fn from_static(bytes: &'static [u8]) -> Self {
        ByteString(Bytes::from_static(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the bytes as UTF-8 text, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Returns the bytes as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl Bencode for ByteString {
    fn length_in_bytes(&self) -> usize {
        decimal_len(self.0.len() as u64) + 1 + self.0.len()
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        put_decimal(buf, self.0.len() as u64);
        buf.put_u8(LENGTH_SEPARATOR);
        buf.put_slice(&self.0);
    }

    fn decode_from<R: Read + Seek>(reader: &mut PeekReader<R>) -> Result<Self, BencodeError> {
        let mut len: usize = 0;
        let mut digits = 0usize;
        loop {
            match reader.next_byte()? {
                LENGTH_SEPARATOR => break,
                byte @ b'0'..=b'9' => {
                    if digits == 1 && len == 0 {
                        return Err(BencodeError::InvalidStringLength);
                    }
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(byte - b'0')))
                        .ok_or(BencodeError::InvalidStringLength)?;
                    digits += 1;
                }
                byte => return Err(BencodeError::unexpected("digit or ':'", byte)),
            }
        }

        if digits == 0 {
            return Err(BencodeError::InvalidStringLength);
        }

        // Grow with the data actually read so a bogus length cannot force a
        // huge allocation up front.
        let mut payload = Vec::new();
        reader
            .by_ref()
            .take(len as u64)
            .read_to_end(&mut payload)
            .map_err(BencodeError::from_io)?;
        if payload.len() != len {
            return Err(BencodeError::UnexpectedEof);
        }

        Ok(ByteString(Bytes::from(payload)))
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_encoded(self, f)
    }
}

impl Borrow<[u8]> for ByteString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for ByteString {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<str> for ByteString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl From<Bytes> for ByteString {
    fn from(b: Bytes) -> Self {
        ByteString(b)
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(v: Vec<u8>) -> Self {
        ByteString(Bytes::from(v))
    }
}

impl From<&[u8]> for ByteString {
    fn from(s: &[u8]) -> Self {
        ByteString(Bytes::copy_from_slice(s))
    }
}

impl<const N: usize> From<&[u8; N]> for ByteString {
    fn from(s: &[u8; N]) -> Self {
        ByteString(Bytes::copy_from_slice(s))
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        ByteString(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for ByteString {
    fn from(s: String) -> Self {
        ByteString(Bytes::from(s))
    }
}

impl From<ByteString> for Bytes {
    fn from(s: ByteString) -> Self {
        s.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(data: &[u8]) -> Result<ByteString, BencodeError> {
        ByteString::decode_from(&mut PeekReader::new(Cursor::new(data)))
    }

    #[test]
    fn test_decode_lengths() {
        assert_eq!(decode(b"4:spam").unwrap().as_bytes(), b"spam");
        assert!(decode(b"0:").unwrap().is_empty());
        assert_eq!(decode(b"10:0123456789").unwrap().len(), 10);
    }

    #[test]
    fn test_decode_invalid_prefix() {
        assert!(matches!(
            decode(b"04:spam"),
            Err(BencodeError::InvalidStringLength)
        ));
        assert!(matches!(
            decode(b":spam"),
            Err(BencodeError::InvalidStringLength)
        ));
        assert!(matches!(
            decode(b"99999999999999999999999:x"),
            Err(BencodeError::InvalidStringLength)
        ));
        assert!(matches!(
            decode(b"4xspam"),
            Err(BencodeError::UnexpectedChar { .. })
        ));
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(decode(b"5:spam"), Err(BencodeError::UnexpectedEof)));
        assert!(matches!(decode(b"4"), Err(BencodeError::UnexpectedEof)));
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let mut keys = vec![
            ByteString::from("b"),
            ByteString::from("ab"),
            ByteString::from(&[0xffu8]),
            ByteString::from("a"),
            ByteString::from("B"),
        ];
        keys.sort();
        let sorted: Vec<&[u8]> = keys.iter().map(|k| k.as_bytes()).collect();
        assert_eq!(
            sorted,
            vec![&b"B"[..], &b"a"[..], &b"ab"[..], &b"b"[..], &[0xff][..]]
        );
    }

    #[test]
    fn test_text_views() {
        let s = ByteString::from(vec![0x66u8, 0x6f, 0xff]);
        assert_eq!(s.as_str(), None);
        assert_eq!(s.text(), "fo\u{fffd}");
        assert_eq!(s.to_string(), "3:fo\u{fffd}");
    }
}
