use std::fmt;
use std::io::{Read, Seek};
use std::ops::{Deref, DerefMut, Index, IndexMut};

use bytes::BufMut;

use super::decode::decode_value_with;
use super::error::BencodeError;
use super::reader::PeekReader;
use super::traits::{fmt_encoded, Bencode};
use super::value::Value;
use crate::constants::{END, LIST_START};

/// An ordered bencode list, encoded as `l<items>e`.
///
/// Equality and hashing are positional: two lists are equal when they have
/// the same length and equal elements at every index.
///
/// # Examples
///
/// ```
/// use bencoding::bencode::{Bencode, ByteString, List, Value};
///
/// let mut list = List::new();
/// list.push(ByteString::from(""));
/// assert_eq!(list.to_bencode(), b"l0:e");
/// assert_eq!(list.length_in_bytes(), 4);
///
/// list.insert(0, Value::Integer(7));
/// assert_eq!(list[0], Value::Integer(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct List(Vec<Value>);

impl List {
    pub fn new() -> Self {
        List(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        List(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a value to the end of the list.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    /// Inserts a value at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) {
        self.0.insert(index, value.into());
    }

    /// Removes and returns the element at `index`, or `None` if out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<Value> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Removes the first element equal to `value`. Returns true if one was found.
    pub fn remove_item(&mut self, value: &Value) -> bool {
        match self.index_of(value) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.0.iter().position(|v| v == value)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.0.get_mut(index)
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// Returns `Err(value)` unchanged if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value, Value> {
        let value = value.into();
        match self.0.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(value),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.0.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }

    pub(crate) fn decode_with<R: Read + Seek>(
        reader: &mut PeekReader<R>,
        strict: bool,
    ) -> Result<Self, BencodeError> {
        reader.expect_byte(LIST_START, "'l'")?;

        let list = reader.nested(|reader| {
            let mut list = Vec::new();
            while !matches!(reader.peek()?, None | Some(END)) {
                list.push(decode_value_with(reader, strict)?);
            }
            Ok(List(list))
        })?;

        reader.expect_byte(END, "'e'")?;
        Ok(list)
    }
}

impl Bencode for List {
    fn length_in_bytes(&self) -> usize {
        2 + self.0.iter().map(Bencode::length_in_bytes).sum::<usize>()
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(LIST_START);
        for item in &self.0 {
            item.write_to(buf);
        }
        buf.put_u8(END);
    }

    fn decode_from<R: Read + Seek>(reader: &mut PeekReader<R>) -> Result<Self, BencodeError> {
        let strict = reader.strict_decoding();
        Self::decode_with(reader, strict)
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_encoded(self, f)
    }
}

impl Deref for List {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl DerefMut for List {
    fn deref_mut(&mut self) -> &mut [Value] {
        &mut self.0
    }
}

impl Index<usize> for List {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl IndexMut<usize> for List {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        &mut self.0[index]
    }
}

impl From<Vec<Value>> for List {
    fn from(v: Vec<Value>) -> Self {
        List(v)
    }
}

impl<V: Into<Value>> FromIterator<V> for List {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        List(iter.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> Extend<V> for List {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::ByteString;

    fn empty_string() -> Value {
        Value::Bytes(ByteString::from(""))
    }

    #[test]
    fn test_push_and_extend() {
        let mut list = List::new();
        list.push(empty_string());
        assert!(list.contains(&empty_string()));

        list.extend(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.index_of(&Value::Integer(2)), Some(2));
    }

    #[test]
    fn test_clear() {
        let mut list: List = vec![empty_string()].into();
        list.clear();
        assert!(list.is_empty());
        assert!(!list.contains(&empty_string()));
    }

    #[test]
    fn test_insert_at_front() {
        let mut list = List::new();
        list.push(empty_string());
        list.insert(0, "0");
        assert_eq!(list[0], Value::from("0"));
        assert_eq!(list[1], empty_string());
    }

    #[test]
    fn test_remove() {
        let mut list: List = vec![empty_string(), Value::Integer(3)].into();
        assert!(list.remove_item(&empty_string()));
        assert!(!list.remove_item(&empty_string()));
        assert_eq!(list.remove_at(5), None);
        assert_eq!(list.remove_at(0), Some(Value::Integer(3)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_set_is_bounds_checked() {
        let mut list: List = vec![Value::Integer(1)].into();
        assert_eq!(list.set(0, 2i64), Ok(Value::Integer(1)));
        assert_eq!(list.set(1, 3i64), Err(Value::Integer(3)));
        assert_eq!(list.get(0), Some(&Value::Integer(2)));
        assert_eq!(list.get(1), None);
    }

    #[test]
    fn test_encode_single_empty_string() {
        let list: List = vec![empty_string()].into();
        let mut buf = [0u8; 4];
        let written = list.encode_into(&mut buf, 0).unwrap();
        assert_eq!(written, 4);
        assert_eq!(&buf, b"l0:e");
        assert_eq!(list.length_in_bytes(), 4);
        assert_eq!(list.to_string(), "l0:e");
    }

    #[test]
    fn test_equality_is_positional() {
        let a: List = vec![Value::Integer(1), Value::Integer(2)].into();
        let b: List = vec![Value::Integer(2), Value::Integer(1)].into();
        let c: List = vec![Value::Integer(1)].into();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, List::from(vec![Value::Integer(1), Value::Integer(2)]));
    }

    #[test]
    fn test_slice_methods_through_deref() {
        let mut list: List = vec![Value::Integer(3), Value::Integer(1), Value::Integer(2)].into();
        assert_eq!(list.first(), Some(&Value::Integer(3)));
        assert_eq!(list.last(), Some(&Value::Integer(2)));

        list.sort();
        assert_eq!(list.to_bencode(), b"li1ei2ei3ee");

        list.reverse();
        assert_eq!(&list[..2], &[Value::Integer(3), Value::Integer(2)]);
        assert!(list.iter().any(|v| v.as_integer() == Some(1)));
    }
}
