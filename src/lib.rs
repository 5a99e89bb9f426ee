//! bencoding - A BEncode codec for BitTorrent metadata
//!
//! Decodes and encodes the four bencode value kinds (byte strings, integers,
//! lists and dictionaries) used by `.torrent` files and peer-wire messages.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 value model, encoder, decoder and torrent-root decoding
//! - [`constants`] - Decoding policy defaults and wire markers

pub mod bencode;
pub mod constants;

pub use bencode::{
    decode, decode_torrent, encode, Bencode, BencodeError, ByteString, Dictionary, List,
    PeekReader, Value,
};
