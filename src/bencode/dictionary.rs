use std::collections::btree_map::{self, BTreeMap};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Seek};

use bytes::BufMut;
use tracing::debug;

use super::byte_string::ByteString;
use super::decode::decode_value_with;
use super::error::BencodeError;
use super::reader::PeekReader;
use super::traits::{fmt_encoded, Bencode};
use super::value::Value;
use crate::constants::{DICT_START, END};

/// A bencode dictionary, encoded as `d<key><value>...e`.
///
/// Keys are byte strings kept in ascending byte-wise order, so iteration and
/// encoding order never depend on insertion order. Equality compares entry
/// sets, and the hash combines entries order-independently.
///
/// # Examples
///
/// ```
/// use bencoding::bencode::{Bencode, Dictionary};
///
/// let mut dict = Dictionary::new();
/// dict.insert("spam", "eggs");
/// dict.insert("cow", "moo");
/// assert_eq!(dict.to_bencode(), b"d3:cow3:moo4:spam4:eggse");
/// assert_eq!(dict.get(b"cow").and_then(|v| v.as_str()), Some("moo"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary(BTreeMap<ByteString, Value>);

impl Dictionary {
    pub fn new() -> Self {
        Dictionary(BTreeMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts an entry, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<ByteString>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterates over entries in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, ByteString, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, ByteString, Value> {
        self.0.iter_mut()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, ByteString, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, ByteString, Value> {
        self.0.values()
    }

    pub fn into_map(self) -> BTreeMap<ByteString, Value> {
        self.0
    }

    /// Decodes `d...e` with an explicit key-order policy.
    ///
    /// `decode_entry` decodes each value and receives the key it belongs to.
    pub(crate) fn decode_with<R, F>(
        reader: &mut PeekReader<R>,
        strict: bool,
        mut decode_entry: F,
    ) -> Result<Self, BencodeError>
    where
        R: Read + Seek,
        F: FnMut(&mut PeekReader<R>, &ByteString) -> Result<Value, BencodeError>,
    {
        reader.expect_byte(DICT_START, "'d'")?;

        let dict = reader.nested(|reader| {
            let mut entries: BTreeMap<ByteString, Value> = BTreeMap::new();
            let mut previous: Option<ByteString> = None;

            while !matches!(reader.peek()?, None | Some(END)) {
                let key = match reader.peek()? {
                    Some(b'0'..=b'9') => ByteString::decode_from(reader)?,
                    _ => return Err(BencodeError::NonStringKey),
                };

                if entries.contains_key(&key) {
                    return Err(BencodeError::DuplicateKey(key));
                }
                if let Some(previous) = previous.as_ref().filter(|p| **p > key) {
                    if strict {
                        return Err(BencodeError::UnsortedKeys {
                            previous: previous.clone(),
                            key,
                        });
                    }
                    debug!(
                        "accepting out-of-order dictionary key {:?} after {:?}",
                        key.text(),
                        previous.text()
                    );
                }

                let value = decode_entry(reader, &key)?;
                entries.insert(key.clone(), value);
                previous = Some(key);
            }

            Ok(Dictionary(entries))
        })?;

        reader.expect_byte(END, "'e'")?;
        Ok(dict)
    }
}

impl Bencode for Dictionary {
    fn length_in_bytes(&self) -> usize {
        2 + self
            .0
            .iter()
            .map(|(key, value)| key.length_in_bytes() + value.length_in_bytes())
            .sum::<usize>()
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(DICT_START);
        for (key, value) in &self.0 {
            key.write_to(buf);
            value.write_to(buf);
        }
        buf.put_u8(END);
    }

    fn decode_from<R: Read + Seek>(reader: &mut PeekReader<R>) -> Result<Self, BencodeError> {
        let strict = reader.strict_decoding();
        Self::decode_with(reader, strict, |reader, _| decode_value_with(reader, strict))
    }
}

impl Hash for Dictionary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self
            .0
            .iter()
            .fold(0u64, |acc, (key, value)| acc ^ hash_of(key) ^ hash_of(value));
        state.write_usize(self.0.len());
        state.write_u64(combined);
    }
}

fn hash_of<T: Hash + ?Sized>(item: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    item.hash(&mut hasher);
    hasher.finish()
}

impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_encoded(self, f)
    }
}

impl From<BTreeMap<ByteString, Value>> for Dictionary {
    fn from(map: BTreeMap<ByteString, Value>) -> Self {
        Dictionary(map)
    }
}

impl<K: Into<ByteString>, V: Into<Value>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Dictionary(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<ByteString>, V: Into<Value>> Extend<(K, V)> for Dictionary {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Dictionary {
    type Item = (ByteString, Value);
    type IntoIter = btree_map::IntoIter<ByteString, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a ByteString, &'a Value);
    type IntoIter = btree_map::Iter<'a, ByteString, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Cursor;

    fn decode(data: &[u8], strict: bool) -> Result<Dictionary, BencodeError> {
        let mut reader = PeekReader::with_strictness(Cursor::new(data), strict);
        Dictionary::decode_from(&mut reader)
    }

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let mut a = Dictionary::new();
        a.insert("zeta", 1i64);
        a.insert("alpha", 2i64);

        let mut b = Dictionary::new();
        b.insert("alpha", 2i64);
        b.insert("zeta", 1i64);

        assert_eq!(a, b);
        assert_eq!(a.to_bencode(), b.to_bencode());
        assert_eq!(a.to_bencode(), b"d5:alphai2e4:zetai1ee");

        let set: HashSet<Dictionary> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let dict: Dictionary = [("c", 3i64), ("a", 1), ("b", 2)].into_iter().collect();
        let keys: Vec<_> = dict.keys().map(|k| k.as_bytes().to_vec()).collect();
        assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn test_length_in_bytes() {
        let mut dict = Dictionary::new();
        assert_eq!(dict.length_in_bytes(), 2);
        dict.insert("cow", "moo");
        assert_eq!(dict.length_in_bytes(), b"d3:cow3:mooe".len());
    }

    #[test]
    fn test_unsorted_keys_strict() {
        let err = decode(b"d4:spami1e3:cowi2ee", true).unwrap_err();
        match err {
            BencodeError::UnsortedKeys { previous, key } => {
                assert_eq!(previous.as_bytes(), b"spam");
                assert_eq!(key.as_bytes(), b"cow");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsorted_keys_lenient() {
        let dict = decode(b"d4:spami1e3:cowi2ee", false).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.to_bencode(), b"d3:cowi2e4:spami1ee");
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        for strict in [true, false] {
            assert!(matches!(
                decode(b"d3:cowi1e3:cowi2ee", strict),
                Err(BencodeError::DuplicateKey(_))
            ));
        }
        assert!(matches!(
            decode(b"d1:bi1e1:ai2e1:bi3ee", false),
            Err(BencodeError::DuplicateKey(_))
        ));
    }

    #[test]
    fn test_non_string_key() {
        assert!(matches!(
            decode(b"di1ei2ee", true),
            Err(BencodeError::NonStringKey)
        ));
    }

    #[test]
    fn test_missing_delimiters() {
        assert!(matches!(
            decode(b"l3:cowe", true),
            Err(BencodeError::UnexpectedChar { .. })
        ));
        assert!(matches!(
            decode(b"d3:cowi1e", true),
            Err(BencodeError::UnexpectedEof)
        ));
        assert!(matches!(
            decode(b"d3:cow", true),
            Err(BencodeError::UnexpectedEof)
        ));
    }
}
