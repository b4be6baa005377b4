//! Property-based tests for the round-trip guarantee.
//!
//! Hashtables built from strings, booleans, nested hashtables and arrays of
//! those must parse back to the same value, whatever the quoting inside.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_pslit::{from_str, parse_value, serialize, to_string, PsMap, PsValue};
use std::collections::BTreeMap;

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

/// Strings weighted towards the characters that need escaping.
fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-z'\u{2018}\u{2019}\" {}$`#;=\n]{0,12}",
    ]
}

fn value() -> impl Strategy<Value = PsValue> {
    let leaf = prop_oneof![
        text().prop_map(PsValue::String),
        any::<bool>().prop_map(PsValue::Bool),
    ];
    leaf.prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(PsValue::Array),
            prop::collection::vec((text(), inner), 0..5)
                .prop_map(|entries| PsValue::Hashtable(entries.into_iter().collect::<PsMap>())),
        ]
    })
}

fn hashtable() -> impl Strategy<Value = PsValue> {
    prop::collection::vec((text(), value()), 0..6)
        .prop_map(|entries| PsValue::Hashtable(entries.into_iter().collect::<PsMap>()))
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    id: i64,
    count: u32,
    score: f64,
    label: String,
    flag: bool,
    parent: Option<i32>,
}

proptest! {
    #[test]
    fn prop_hashtable_round_trip(value in hashtable()) {
        let literal = serialize(&value, false);
        let parsed = parse_value(literal.as_str());
        prop_assert_eq!(parsed.ok(), Some(value));
    }

    #[test]
    fn prop_non_hashtable_is_empty(value in value()) {
        prop_assume!(!value.is_hashtable());
        prop_assert!(serialize(&value, false).is_empty());
    }

    #[test]
    fn prop_string_map(map in prop::collection::btree_map(text(), text(), 0..8)) {
        prop_assert!(roundtrip::<BTreeMap<String, String>>(&map));
    }

    #[test]
    fn prop_record(
        id in any::<i64>(),
        count in any::<u32>(),
        score in -1.0e12f64..1.0e12,
        label in text(),
        flag in any::<bool>(),
        parent in proptest::option::of(any::<i32>()),
    ) {
        let record = Record { id, count, score, label, flag, parent };
        prop_assert!(roundtrip(&record));
    }
}
