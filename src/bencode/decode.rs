use std::io::{Cursor, Read, Seek};

use tracing::{debug, trace};

use super::byte_string::ByteString;
use super::dictionary::Dictionary;
use super::error::BencodeError;
use super::list::List;
use super::reader::PeekReader;
use super::traits::Bencode;
use super::value::Value;
use crate::constants::{DICT_START, INFO_KEY, INT_START, LIST_START};

/// Decodes a single bencode value spanning all of `data`.
///
/// Dictionaries must have their keys in ascending order; use
/// [`decode_lenient`] to accept out-of-order keys.
///
/// # Errors
///
/// Returns an error if the input is malformed, ends early, nests deeper than
/// [`MAX_DEPTH`](crate::constants::MAX_DEPTH), or has bytes left over after
/// the value.
///
/// # Examples
///
/// ```
/// use bencoding::bencode::{decode, Value};
///
/// assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
/// assert_eq!(decode(b"4:spam").unwrap().as_str(), Some("spam"));
/// assert!(decode(b"d1:bi1e1:ai2ee").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    decode_as(data)
}

/// Like [`decode`], but tolerates dictionary keys in any order.
pub fn decode_lenient(data: &[u8]) -> Result<Value, BencodeError> {
    let mut reader = PeekReader::lenient(Cursor::new(data));
    let value = decode_from(&mut reader)?;
    ensure_consumed(&mut reader)?;
    Ok(value)
}

/// Decodes `data` directly into one value type.
///
/// # Examples
///
/// ```
/// use bencoding::bencode::{decode_as, Dictionary, List};
///
/// let dict: Dictionary = decode_as(b"d3:cow3:mooe").unwrap();
/// assert_eq!(dict.len(), 1);
///
/// assert!(decode_as::<List>(b"d3:cow3:mooe").is_err());
/// ```
pub fn decode_as<T: Bencode>(data: &[u8]) -> Result<T, BencodeError> {
    let mut reader = PeekReader::new(Cursor::new(data));
    trace!("decoding {} bytes", data.len());
    let value = T::decode_from(&mut reader)?;
    ensure_consumed(&mut reader)?;
    Ok(value)
}

/// Decodes one value from `reader`, leaving it positioned after the value.
///
/// Key ordering follows the reader's strictness.
pub fn decode_from<R: Read + Seek>(reader: &mut PeekReader<R>) -> Result<Value, BencodeError> {
    Value::decode_from(reader)
}

/// Decodes a complete torrent file.
///
/// Values nested under the root are decoded with the default (strict)
/// policy, while the root's own keys may appear in any order. See
/// [`decode_torrent_from`] for how the `info` entry is handled.
///
/// # Examples
///
/// ```
/// use bencoding::bencode::{decode_torrent, decode_torrent_lenient};
///
/// // "name" sorts after "length": rejected inside info even when lenient.
/// assert!(decode_torrent_lenient(b"d4:infod4:name1:a6:lengthi1eee").is_err());
///
/// let torrent = decode_torrent(b"d8:announce3:url4:infod6:lengthi1e4:name1:aee").unwrap();
/// assert!(torrent.get(b"info").unwrap().as_dict().is_some());
/// ```
pub fn decode_torrent(data: &[u8]) -> Result<Dictionary, BencodeError> {
    let mut reader = PeekReader::new(Cursor::new(data));
    let torrent = decode_torrent_from(&mut reader)?;
    ensure_consumed(&mut reader)?;
    Ok(torrent)
}

/// Decodes a complete torrent file, tolerating out-of-order keys everywhere
/// except inside the `info` entry.
pub fn decode_torrent_lenient(data: &[u8]) -> Result<Dictionary, BencodeError> {
    let mut reader = PeekReader::lenient(Cursor::new(data));
    let torrent = decode_torrent_from(&mut reader)?;
    ensure_consumed(&mut reader)?;
    Ok(torrent)
}

/// Decodes a torrent root dictionary from `reader`.
///
/// The root's own keys are accepted in any order. Values other than `info`
/// follow the reader's strictness. The value under the `info` key (matched
/// ASCII case-insensitively) is always decoded strictly, including everything
/// nested inside it, because its encoding must be canonical to be hashed.
pub fn decode_torrent_from<R: Read + Seek>(
    reader: &mut PeekReader<R>,
) -> Result<Dictionary, BencodeError> {
    let strict = reader.strict_decoding();
    trace!(strict, "decoding torrent root");

    Dictionary::decode_with(reader, false, |reader, key| {
        if is_info_key(key) {
            if !strict {
                debug!("decoding info dictionary strictly");
            }
            decode_value_with(reader, true)
        } else {
            decode_value_with(reader, strict)
        }
    })
}

fn is_info_key(key: &ByteString) -> bool {
    key.as_bytes().eq_ignore_ascii_case(INFO_KEY.as_bytes())
}

/// Classifies the next value by its leading byte and decodes it.
pub(crate) fn decode_value_with<R: Read + Seek>(
    reader: &mut PeekReader<R>,
    strict: bool,
) -> Result<Value, BencodeError> {
    match reader.peek()? {
        Some(DICT_START) => {
            Dictionary::decode_with(reader, strict, |reader, _| decode_value_with(reader, strict))
                .map(Value::Dict)
        }
        Some(LIST_START) => List::decode_with(reader, strict).map(Value::List),
        Some(INT_START) => i64::decode_from(reader).map(Value::Integer),
        Some(b'0'..=b'9') => ByteString::decode_from(reader).map(Value::Bytes),
        Some(byte) => Err(BencodeError::unexpected("'d', 'l', 'i' or a digit", byte)),
        None => Err(BencodeError::UnexpectedEof),
    }
}

fn ensure_consumed<R: Read + Seek>(reader: &mut PeekReader<R>) -> Result<(), BencodeError> {
    match reader.peek()? {
        Some(_) => Err(BencodeError::TrailingData),
        None => Ok(()),
    }
}
