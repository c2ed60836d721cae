use std::collections::BTreeMap;

use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};
use radix_mut::{Error, Trie};

/// A key over a three-letter alphabet, so random keys share prefixes often.
#[derive(Clone, Debug)]
struct SmallKey(Vec<u8>);

impl Arbitrary for SmallKey {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 6;
        SmallKey((0..len).map(|_| *g.choose(b"abc").unwrap()).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(SmallKey))
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(SmallKey, u8),
    Remove(SmallKey),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(SmallKey::arbitrary(g), u8::arbitrary(g))
        } else {
            Op::Remove(SmallKey::arbitrary(g))
        }
    }
}

fn apply(ops: &[Op]) -> Option<(Trie<u8>, BTreeMap<Vec<u8>, u8>)> {
    let mut trie = Trie::new();
    let mut model = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(SmallKey(key), value) => {
                if key.is_empty() {
                    if trie.insert(key, *value) != Err(Error::InvalidKey) {
                        return None;
                    }
                } else {
                    let id = trie.insert(key, *value).ok()?;
                    model.insert(key.clone(), *value);
                    if trie.key(id)? != *key || trie.value(id) != Some(value) {
                        return None;
                    }
                }
            }
            Op::Remove(SmallKey(key)) => {
                if trie.remove(key) != model.remove(key) || trie.find(key).is_some() {
                    return None;
                }
            }
        }
        if !trie.is_well_formed() {
            return None;
        }
    }
    Some((trie, model))
}

quickcheck! {
    fn matches_btreemap_model(ops: Vec<Op>) -> bool {
        let Some((trie, model)) = apply(&ops) else {
            return false;
        };
        trie.len() == model.len()
            && trie.iter().map(|(key, &value)| (key, value)).eq(model.into_iter())
    }

    fn successor_walk_visits_sorted_keys(ops: Vec<Op>) -> bool {
        let Some((trie, model)) = apply(&ops) else {
            return false;
        };
        let mut walked = Vec::new();
        let mut at = trie.first();
        while let Some(id) = at {
            walked.push(trie.key(id).unwrap());
            at = trie.next(id);
        }
        walked == model.keys().cloned().collect::<Vec<_>>()
    }

    fn prefix_returns_exactly_matching_keys(ops: Vec<Op>, probe: SmallKey) -> bool {
        let Some((trie, model)) = apply(&ops) else {
            return false;
        };
        let expected: Vec<Vec<u8>> = model
            .keys()
            .filter(|key| key.starts_with(&probe.0))
            .cloned()
            .collect();
        match trie.prefix_keys(&probe.0) {
            Ok(keys) => keys == expected,
            Err(Error::NotFound) => expected.is_empty(),
            Err(_) => false,
        }
    }

    fn insert_then_find_round_trips(key: SmallKey, value: u8, others: Vec<SmallKey>) -> TestResult {
        if key.0.is_empty() {
            return TestResult::discard();
        }
        let mut trie = Trie::new();
        for other in others.iter().filter(|other| !other.0.is_empty()) {
            trie.insert(&other.0, value.wrapping_add(1)).unwrap();
        }
        trie.insert(&key.0, value).unwrap();
        let found = trie.find(&key.0).and_then(|id| trie.value(id));
        TestResult::from_bool(found == Some(&value))
    }

    fn remove_round_trips(key: SmallKey, value: u8, others: Vec<SmallKey>) -> TestResult {
        if key.0.is_empty() {
            return TestResult::discard();
        }
        let mut trie = Trie::new();
        for other in others.iter().filter(|other| !other.0.is_empty() && other.0 != key.0) {
            trie.insert(&other.0, value.wrapping_add(1)).unwrap();
        }
        let before = trie.len();
        trie.insert(&key.0, value).unwrap();
        let removed = trie.remove(&key.0);
        TestResult::from_bool(
            removed == Some(value)
                && trie.find(&key.0).is_none()
                && trie.len() == before
                && trie.is_well_formed(),
        )
    }
}
