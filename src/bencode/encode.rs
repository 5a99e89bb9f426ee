use bytes::BufMut;

use super::error::BencodeError;
use super::traits::Bencode;

/// Encodes a bencode value to a byte vector.
///
/// The output follows the canonical bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted lexicographically)
///
/// # Examples
///
/// ```
/// use bencoding::bencode::{encode, Dictionary, List, Value};
///
/// // Encode an integer
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
///
/// // Encode a string
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// // Encode a list
/// let list: List = vec![Value::Integer(1), Value::string("two")].into();
/// assert_eq!(encode(&list), b"li1e3:twoe");
///
/// // Encode a dictionary
/// let mut dict = Dictionary::new();
/// dict.insert("b", 2i64);
/// dict.insert("a", 1i64);
/// assert_eq!(encode(&dict), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode<T: Bencode>(value: &T) -> Vec<u8> {
    value.to_bencode()
}

/// Encodes `value` into `buf` at `offset`, returning the bytes written.
///
/// Size the buffer with [`encoded_len`] first.
///
/// # Errors
///
/// Returns [`BencodeError::BufferTooSmall`] if `buf[offset..]` cannot hold
/// the encoding. Nothing is written in that case.
///
/// # Examples
///
/// ```
/// use bencoding::bencode::{encode_into, encoded_len, Value};
///
/// let value = Value::Integer(-42);
/// let mut buf = vec![0u8; 2 + encoded_len(&value)];
/// let written = encode_into(&value, &mut buf, 2).unwrap();
/// assert_eq!(written, 5);
/// assert_eq!(&buf[2..], b"i-42e");
///
/// assert!(encode_into(&value, &mut buf, 4).is_err());
/// ```
pub fn encode_into<T: Bencode>(
    value: &T,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize, BencodeError> {
    value.encode_into(buf, offset)
}

/// Exact size of the encoding of `value`.
pub fn encoded_len<T: Bencode>(value: &T) -> usize {
    value.length_in_bytes()
}

/// Appends the encoding of `value` to a growable buffer such as `BytesMut`.
pub fn encode_to<T: Bencode, B: BufMut>(value: &T, buf: &mut B) {
    value.write_to(buf);
}
