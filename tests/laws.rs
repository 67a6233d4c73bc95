//! Property tests for the Laws the container is expected to satisfy,
//! checked against randomly generated keys and payloads rather than a
//! fixed set of examples.

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use art::{AdaptiveRadixTree, Direction, FoldOutcome, Key, Mode, Scope};
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

/// A non-empty byte string containing no NUL byte, usable as either a text
/// or binary key without tripping the binary-prefix-collision limitation
/// that this container reports as `Error::Exists` (a NUL-free text key
/// never collides with another NUL-free text key as a byte-for-byte
/// prefix, since `Key::text` appends its own trailing NUL).
#[derive(Clone, Debug)]
struct SafeKey(Vec<u8>);

impl Arbitrary for SafeKey {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = (usize::arbitrary(g) % 12) + 1;
        let bytes: Vec<u8> = (0..len)
            .map(|_| {
                let b = u8::arbitrary(g);
                if b == 0 {
                    1
                } else {
                    b
                }
            })
            .collect();
        SafeKey(bytes)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let v = self.0.clone();
        Box::new((0..v.len()).rev().filter(|_| v.len() > 1).map(move |i| {
            let mut shorter = v.clone();
            shorter.remove(i);
            SafeKey(shorter)
        }))
    }
}

fn dedup_keys(keys: Vec<SafeKey>) -> Vec<Vec<u8>> {
    let mut seen = std::collections::HashSet::new();
    keys.into_iter()
        .filter_map(|k| seen.insert(k.0.clone()).then_some(k.0))
        .collect()
}

#[quickcheck]
fn insert_get_roundtrip(key: SafeKey, value: i64) -> bool {
    let mut t: AdaptiveRadixTree<i64> = AdaptiveRadixTree::new(Mode::Ordered);
    t.insert(Key::text(&key.0), value).unwrap();
    t.get(Key::text(&key.0)).unwrap() == Some(&value)
}

#[quickcheck]
fn insert_then_remove_restores_emptiness(key: SafeKey, value: i64) -> bool {
    let mut t: AdaptiveRadixTree<i64> = AdaptiveRadixTree::new(Mode::Ordered);
    t.insert(Key::text(&key.0), value).unwrap();
    let removed = t.remove(Key::text(&key.0)).unwrap();
    removed == value && t.is_empty() && t.get(Key::text(&key.0)).unwrap().is_none()
}

#[quickcheck]
fn ascending_fold_is_sorted(keys: Vec<SafeKey>) -> TestResult {
    let keys = dedup_keys(keys);
    if keys.is_empty() {
        return TestResult::discard();
    }
    let mut t: AdaptiveRadixTree<()> = AdaptiveRadixTree::new(Mode::Ordered);
    for k in &keys {
        t.insert(Key::text(k), ()).unwrap();
    }
    let mut seen = Vec::new();
    t.fold(
        Scope::All,
        Direction::Ascending,
        true,
        |k, _: &()| -> ControlFlow<FoldOutcome<(), ()>> {
            seen.push(k.to_vec());
            ControlFlow::Continue(())
        },
    )
    .unwrap();
    let mut sorted = seen.clone();
    sorted.sort();
    TestResult::from_bool(seen == sorted && seen.len() == keys.len())
}

#[quickcheck]
fn descending_fold_is_reverse_of_ascending(keys: Vec<SafeKey>) -> TestResult {
    let keys = dedup_keys(keys);
    if keys.is_empty() {
        return TestResult::discard();
    }
    let mut t: AdaptiveRadixTree<()> = AdaptiveRadixTree::new(Mode::Ordered);
    for k in &keys {
        t.insert(Key::text(k), ()).unwrap();
    }
    let mut ascending = Vec::new();
    t.fold(
        Scope::All,
        Direction::Ascending,
        true,
        |k, _: &()| -> ControlFlow<FoldOutcome<(), ()>> {
            ascending.push(k.to_vec());
            ControlFlow::Continue(())
        },
    )
    .unwrap();
    let mut descending = Vec::new();
    t.fold(
        Scope::All,
        Direction::Descending,
        true,
        |k, _: &()| -> ControlFlow<FoldOutcome<(), ()>> {
            descending.push(k.to_vec());
            ControlFlow::Continue(())
        },
    )
    .unwrap();
    ascending.reverse();
    TestResult::from_bool(ascending == descending)
}

#[quickcheck]
fn prefix_fold_restricts_to_matching_keys(keys: Vec<SafeKey>, prefix: SafeKey) -> TestResult {
    let keys = dedup_keys(keys);
    if keys.is_empty() {
        return TestResult::discard();
    }
    let mut t: AdaptiveRadixTree<()> = AdaptiveRadixTree::new(Mode::Ordered);
    for k in &keys {
        t.insert(Key::text(k), ()).unwrap();
    }

    let mut whole = Vec::new();
    t.fold(
        Scope::All,
        Direction::Ascending,
        true,
        |k, _: &()| -> ControlFlow<FoldOutcome<(), ()>> {
            whole.push(k.to_vec());
            ControlFlow::Continue(())
        },
    )
    .unwrap();
    // `whole`'s reconstructed keys carry the trailing NUL every text key
    // gets; compare the prefix against the same raw bytes.
    let expected: Vec<Vec<u8>> = whole
        .into_iter()
        .filter(|k| k.starts_with(&prefix.0))
        .collect();

    let mut got = Vec::new();
    let result = t.fold(
        Scope::Prefix(&prefix.0),
        Direction::Ascending,
        true,
        |k, _: &()| -> ControlFlow<FoldOutcome<(), ()>> {
            got.push(k.to_vec());
            ControlFlow::Continue(())
        },
    );
    match result {
        Ok(_) => TestResult::from_bool(got == expected),
        Err(_) => TestResult::from_bool(expected.is_empty()),
    }
}

#[quickcheck]
fn complete_extension_is_shared_by_every_matching_key(keys: Vec<SafeKey>, prefix: SafeKey) -> TestResult {
    let keys = dedup_keys(keys);
    if keys.is_empty() {
        return TestResult::discard();
    }
    let mut t: AdaptiveRadixTree<()> = AdaptiveRadixTree::new(Mode::Ordered);
    for k in &keys {
        t.insert(Key::binary(k), ()).unwrap();
    }
    let extension = match t.complete(Some(&prefix.0)) {
        Ok(ext) => ext,
        Err(_) => return TestResult::discard(),
    };
    let mut full = prefix.0.clone();
    full.extend_from_slice(&extension);
    let all_match = keys
        .iter()
        .filter(|k| k.starts_with(&prefix.0))
        .all(|k| k.starts_with(&full[..]) || full.starts_with(k.as_slice()));
    TestResult::from_bool(all_match)
}

#[quickcheck]
fn insert_get_remove_matches_btreemap_reference(ops: Vec<(SafeKey, i32, bool)>) -> bool {
    let mut t: AdaptiveRadixTree<i32> = AdaptiveRadixTree::new(Mode::Ordered);
    let mut reference: BTreeMap<Vec<u8>, i32> = BTreeMap::new();
    for (key, value, should_remove) in ops {
        if should_remove {
            let want = reference.remove(&key.0);
            let got = t.remove(Key::text(&key.0)).ok();
            if want != got {
                return false;
            }
        } else {
            let _ = t.insert(Key::text(&key.0), value).unwrap();
            reference.insert(key.0.clone(), value);
        }
    }
    for (k, v) in &reference {
        if t.get(Key::text(k)).unwrap() != Some(v) {
            return false;
        }
    }
    t.len() == reference.len()
}
