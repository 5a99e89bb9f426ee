//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Rust type | Example |
//! |------|--------|-----------|---------|
//! | Integer | `i<number>e` | `i64` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | [`ByteString`] | `4:spam` → "spam" |
//! | List | `l<items>e` | [`List`] | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | [`Dictionary`] | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! [`Value`] is the sum of the four. All of them implement [`Bencode`], which
//! reports the exact encoded size, writes the canonical encoding and decodes
//! from a [`PeekReader`].
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use bencoding::bencode::{decode, Value};
//!
//! let value = decode(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list.len(), 2);
//!
//! let value = decode(b"d3:foo3:bare").unwrap();
//! assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
//! ```
//!
//! ## Encoding into a pre-sized buffer
//!
//! ```
//! use bencoding::bencode::{Bencode, Dictionary};
//!
//! let mut dict = Dictionary::new();
//! dict.insert("spam", "eggs");
//! dict.insert("cow", "moo");
//!
//! let mut buf = vec![0u8; dict.length_in_bytes()];
//! let written = dict.encode_into(&mut buf, 0).unwrap();
//! assert_eq!(written, buf.len());
//! assert_eq!(buf, b"d3:cow3:moo4:spam4:eggse");
//! ```
//!
//! ## Decoding from a stream
//!
//! ```
//! use bencoding::bencode::{decode_from, PeekReader, Value};
//! use std::io::Cursor;
//!
//! let mut reader = PeekReader::lenient(Cursor::new(b"i1ei2e".to_vec()));
//! assert_eq!(decode_from(&mut reader).unwrap(), Value::Integer(1));
//! assert_eq!(reader.position().unwrap(), 3);
//! assert_eq!(decode_from(&mut reader).unwrap(), Value::Integer(2));
//! ```
//!
//! # Strict decoding
//!
//! Canonical bencode requires dictionary keys in ascending byte order.
//! Readers are strict by default and reject out-of-order keys with
//! [`BencodeError::UnsortedKeys`]; lenient readers accept them. The `info`
//! dictionary of a torrent file is always decoded strictly
//! ([`decode_torrent`]).
//!
//! # Error Handling
//!
//! Decoding can fail for various reasons:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended unexpectedly
//! - [`BencodeError::InvalidInteger`] - Malformed integer (e.g., leading zeros)
//! - [`BencodeError::UnexpectedChar`] - Missing delimiter or unknown type marker
//! - [`BencodeError::UnsortedKeys`] - Dictionary keys out of order (strict mode)
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (max 64 levels)
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! Encoding into a slice fails only with [`BencodeError::BufferTooSmall`].
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod byte_string;
mod decode;
mod dictionary;
mod encode;
mod error;
mod integer;
mod list;
mod reader;
mod traits;
mod value;

pub use byte_string::ByteString;
pub use decode::{
    decode, decode_as, decode_from, decode_lenient, decode_torrent, decode_torrent_from,
    decode_torrent_lenient,
};
pub use dictionary::Dictionary;
pub use encode::{encode, encode_into, encode_to, encoded_len};
pub use error::BencodeError;
pub use list::List;
pub use reader::PeekReader;
pub use traits::Bencode;
pub use value::Value;
