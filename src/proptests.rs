use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

use crate::utils::FromU32;

/// Checks the structural invariants of the double array.
pub(crate) fn validate_map<V>(map: &TrieMap<V>) {
    let nodes = &map.nodes;
    assert_eq!(nodes.len(), map.values.len(), "arrays must have the same length");
    assert_eq!(nodes[0].check, 0, "the root must have no parent");

    let mut num_children = vec![0usize; nodes.len()];
    let mut num_values = 0;

    for (node_idx, nd) in nodes.iter().enumerate() {
        let has_value = map.values[node_idx].is_some();
        if has_value {
            num_values += 1;
        }
        if nd.check == 0 {
            assert!(!has_value, "free slot {node_idx} must hold no value");
            if node_idx != 0 {
                assert_eq!(nd.base, 0, "free slot {node_idx} must have no base");
            }
            continue;
        }

        let parent_idx = usize::from_u32(nd.check - 1);
        assert!(parent_idx < nodes.len(), "parent of {node_idx} is out of range");
        let parent_base = usize::from_u32(nodes[parent_idx].base);
        assert_ne!(parent_base, 0, "parent of {node_idx} must have a base");
        assert!(
            parent_base <= node_idx + 1,
            "{node_idx} is not reachable from its parent"
        );
        num_children[parent_idx] += 1;

        // Only the end marker leads to values, and it always leads to leaves.
        let code = node_idx + 1 - parent_base;
        if code == usize::from_u32(END_CODE) {
            assert_eq!(nd.base, 0, "terminal {node_idx} must be a leaf");
            assert!(has_value, "terminal {node_idx} must hold a value");
        } else {
            assert!(!has_value, "non-terminal {node_idx} must hold no value");
        }

        // Follows the parents up to the root without cycles.
        let mut depth = 0;
        let mut idx = node_idx;
        while idx != 0 {
            idx = usize::from_u32(nodes[idx].check - 1);
            depth += 1;
            assert!(depth <= nodes.len(), "cycle detected from {node_idx}");
        }
    }

    for (node_idx, nd) in nodes.iter().enumerate() {
        if nd.base != 0 {
            assert_ne!(num_children[node_idx], 0, "{node_idx} has a base but no child");
        }
    }
    assert_eq!(num_values, map.len(), "values must match the number of keys");
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet mixing one- to four-byte characters to provoke collisions.
    "[abcあい世界\u{1f980}]{1,6}"
}

fn naive_common_prefix_search(
    m: &BTreeMap<String, u32>,
    haystack: &str,
) -> Vec<(usize, String, u32)> {
    let chars: Vec<char> = haystack.chars().collect();
    let mut matches = vec![];
    for start in 0..chars.len() {
        for end in start + 1..=chars.len() {
            let key: String = chars[start..end].iter().collect();
            if let Some(&v) = m.get(&key) {
                matches.push((start, key, v));
            }
        }
    }
    matches
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u32),
    Get(String),
    Search(String),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        60 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Get),
        10 => "[abcあい世界\u{1f980} ]{0,12}".prop_map(Op::Search),
    ];
    prop::collection::vec(op, 0..=300)
}

fn run_equivalence(mode: SymbolMode, ops: Vec<Op>) -> std::result::Result<(), TestCaseError> {
    let mut t: TrieMap<u32> = Builder::new().symbol_mode(mode).build();
    let mut m: BTreeMap<String, u32> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                let old_t = t.insert(&key, value);
                let old_m = m.insert(key, value);
                prop_assert_eq!(old_t, old_m);
            }
            Op::Get(key) => {
                prop_assert_eq!(t.get(&key), m.get(&key));
                prop_assert_eq!(t.contains_exact(&key), m.contains_key(&key));
            }
            Op::Search(haystack) => {
                let got: Vec<_> = t
                    .common_prefix_search(&haystack)
                    .into_iter()
                    .map(|mt| (mt.start_chars(), mt.key().to_string(), *mt.value()))
                    .collect();
                prop_assert_eq!(got, naive_common_prefix_search(&m, &haystack));
            }
        }
        prop_assert_eq!(t.len(), m.len());
    }

    validate_map(&t);
    for (key, value) in &m {
        prop_assert_eq!(t.get(key), Some(value));
        prop_assert!(t.contains_exact(key));
    }
    Ok(())
}

fn keys_and_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::btree_set(key_strategy(), 1..60).prop_flat_map(|keys| {
        let keys: Vec<String> = keys.into_iter().collect();
        (Just(keys.clone()), Just(keys).prop_shuffle())
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_code_point(ops in ops_strategy()) {
        run_equivalence(SymbolMode::CodePoint, ops)?;
    }

    #[test]
    fn prop_equivalence_dense(ops in ops_strategy()) {
        run_equivalence(SymbolMode::Dense, ops)?;
    }

    #[test]
    fn prop_insertion_order_does_not_matter((keys, shuffled) in keys_and_permutation()) {
        let forward: TrieMap<usize> = keys.iter().enumerate().map(|(i, k)| (k, i)).collect();

        let mut backward = TrieMap::new();
        for key in &shuffled {
            let i = keys.binary_search(key).unwrap();
            backward.insert(key, i);
            validate_map(&backward);
        }

        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(forward.get(key), Some(&i));
            prop_assert_eq!(backward.get(key), Some(&i));
        }
    }
}
