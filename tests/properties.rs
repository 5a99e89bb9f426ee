//! Property tests for the bencode codec: round trips, exact length
//! accounting and canonical dictionary ordering over generated value trees.

use std::collections::BTreeMap;

use bencoding::bencode::{
    decode, decode_lenient, encode_into, Bencode, BencodeError, ByteString, Dictionary, List,
    Value,
};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 0..12)
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        vec(any::<u8>(), 0..32).prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..8).prop_map(|items| Value::List(List::from(items))),
            vec((arb_key(), inner), 0..8)
                .prop_map(|entries| Value::Dict(entries.into_iter().collect())),
        ]
    })
}

fn arb_entries() -> impl Strategy<Value = BTreeMap<Vec<u8>, Value>> {
    btree_map(arb_key(), arb_value(), 2..8)
}

/// Encodes `entries` as a dictionary in exactly the given order.
fn encode_in_order(entries: &[(&Vec<u8>, &Value)]) -> Vec<u8> {
    let mut out = vec![b'd'];
    for (key, value) in entries {
        out.extend(ByteString::from(key.as_slice()).to_bencode());
        out.extend(value.to_bencode());
    }
    out.push(b'e');
    out
}

proptest! {
    #[test]
    fn prop_roundtrip(value in arb_value()) {
        let encoded = value.to_bencode();
        prop_assert_eq!(decode(&encoded)?, value);
    }

    #[test]
    fn prop_length_matches_encoding(value in arb_value()) {
        prop_assert_eq!(value.length_in_bytes(), value.to_bencode().len());
    }

    #[test]
    fn prop_encode_into_exact_buffer(value in arb_value(), offset in 0usize..4) {
        let len = value.length_in_bytes();
        let mut buf = vec![0u8; offset + len];
        prop_assert_eq!(encode_into(&value, &mut buf, offset)?, len);
        let encoded = value.to_bencode();
        prop_assert_eq!(&buf[offset..], encoded.as_slice());

        let mut short = vec![0u8; offset + len - 1];
        let too_small = matches!(
            encode_into(&value, &mut short, offset),
            Err(BencodeError::BufferTooSmall { .. })
        );
        prop_assert!(too_small);
    }

    #[test]
    fn prop_canonical_integers(n in any::<i64>()) {
        prop_assert_eq!(n.to_bencode(), format!("i{n}e").into_bytes());
        prop_assert_eq!(decode(&n.to_bencode())?, Value::Integer(n));
    }

    #[test]
    fn prop_dictionary_insertion_order_is_irrelevant(entries in arb_entries()) {
        let forward: Dictionary = entries.clone().into_iter().collect();
        let backward: Dictionary = entries.into_iter().rev().collect();

        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(forward.to_bencode(), backward.to_bencode());

        let keys: Vec<&ByteString> = forward.keys().collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_strict_mode_rejects_descending_keys(entries in arb_entries()) {
        let descending: Vec<_> = entries.iter().rev().collect();
        let data = encode_in_order(&descending);

        let unsorted = matches!(decode(&data), Err(BencodeError::UnsortedKeys { .. }));
        prop_assert!(unsorted);

        let lenient = decode_lenient(&data)?;
        let expected: Dictionary = entries.into_iter().collect();
        prop_assert_eq!(lenient, Value::Dict(expected));
    }
}
