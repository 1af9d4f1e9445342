//! Structural invariant tests for both index structures
//!
//! Random operation sequences are applied and the structure is verified
//! after every single step.

use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeMap;
use wordindex_core::{DocumentId, HashTableConfig, WordIndex};
use wordindex_index::{AvlTree, HashTable};

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Observe(String, u8),
    Remove(String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let word = "[a-f]{1,3}";
    prop_oneof![
        4 => (word, 0u8..4).prop_map(|(w, d)| Op::Observe(w, d)),
        1 => word.prop_map(Op::Remove),
    ]
}

fn doc(n: u8) -> DocumentId {
    DocumentId::new(format!("d{}", n))
}

/// Reference model: word -> document -> count
type Model = BTreeMap<String, BTreeMap<DocumentId, u32>>;

fn apply_model(model: &mut Model, op: &Op) {
    match op {
        Op::Observe(w, d) => {
            *model.entry(w.clone()).or_default().entry(doc(*d)).or_default() += 1;
        }
        Op::Remove(w) => {
            model.remove(w);
        }
    }
}

fn apply_index(index: &mut impl WordIndex, op: &Op) {
    match op {
        Op::Observe(w, d) => index.observe(w, &doc(*d)),
        Op::Remove(w) => {
            index.remove(w);
        }
    }
}

fn assert_matches_model(index: &impl WordIndex, model: &Model) {
    assert_eq!(index.unique_count(), model.len());
    for (word, docs) in model {
        let entry = index.lookup(word).expect("word missing from index");
        let expected: Vec<(DocumentId, u32)> =
            docs.iter().map(|(d, c)| (d.clone(), *c)).collect();
        assert_eq!(entry.sorted_counts(), expected);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_avl_balanced_and_ordered_after_every_op(ops in vec(op_strategy(), 1..200)) {
        let mut tree = AvlTree::new();
        let mut model = Model::new();
        for op in &ops {
            apply_index(&mut tree, op);
            apply_model(&mut model, op);
            prop_assert_eq!(tree.verify(), Ok(()));
        }
        assert_matches_model(&tree, &model);

        let in_order: Vec<&str> = tree.iter().map(|e| e.word()).collect();
        let expected: Vec<&str> = model.keys().map(String::as_str).collect();
        prop_assert_eq!(in_order, expected);
    }

    #[test]
    fn prop_hash_table_load_bound_after_every_op(ops in vec(op_strategy(), 1..200)) {
        let mut table = HashTable::with_config(&HashTableConfig::for_testing()).unwrap();
        let mut model = Model::new();
        for op in &ops {
            apply_index(&mut table, op);
            apply_model(&mut model, op);
            prop_assert!(table.load_factor() <= table.max_load_factor());
            prop_assert_eq!(table.verify(), Ok(()));
        }
        assert_matches_model(&table, &model);
    }

    #[test]
    fn prop_count_accuracy(k in 1u32..64) {
        let mut tree = AvlTree::new();
        let mut table = HashTable::new();
        let d = doc(1);
        for _ in 0..k {
            tree.observe("word", &d);
            table.observe("word", &d);
        }
        prop_assert_eq!(tree.lookup("word").unwrap().count_in(&d), k);
        prop_assert_eq!(table.lookup("word").unwrap().count_in(&d), k);
    }

    #[test]
    fn prop_rehash_preserves_content(words in vec("[a-z]{1,8}", 1..120)) {
        let mut table = HashTable::with_config(&HashTableConfig::for_testing()).unwrap();
        for (i, w) in words.iter().enumerate() {
            table.insert(w, &doc((i % 3) as u8));
        }
        let before: Vec<_> = {
            let mut v: Vec<_> = table.iter().map(|e| (e.word().to_string(), e.sorted_counts())).collect();
            v.sort();
            v
        };
        let unique = table.unique_count();

        table.rehash();

        prop_assert_eq!(table.unique_count(), unique);
        for (word, counts) in &before {
            prop_assert_eq!(&table.find(word).unwrap().sorted_counts(), counts);
        }
        prop_assert_eq!(table.verify(), Ok(()));
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_forty_distinct_words_from_size_53() {
    let mut table = HashTable::new();
    assert_eq!(table.capacity(), 53);

    let words: Vec<String> = (0..40)
        .map(|i| {
            let a = (b'a' + (i / 26) as u8) as char;
            let b = (b'a' + (i % 26) as u8) as char;
            format!("{}{}", a, b)
        })
        .collect();

    for (i, w) in words.iter().enumerate() {
        for _ in 0..=(i % 3) {
            table.insert(w, &doc(0));
        }
        assert!(table.load_factor() <= 0.75);
    }

    assert!(table.rehash_count() >= 1);
    assert_eq!(table.unique_count(), 40);
    for (i, w) in words.iter().enumerate() {
        let entry = table.find(w).unwrap();
        assert_eq!(entry.count_in(&doc(0)), (i % 3) as u32 + 1);
    }
    table.verify().unwrap();
}

#[test]
fn test_removal_on_both_indexes() {
    let mut tree = AvlTree::new();
    let mut table = HashTable::new();
    for w in ["alpha", "beta", "gamma", "delta", "epsilon"] {
        tree.observe(w, &doc(1));
        table.observe(w, &doc(1));
    }

    for index in [&mut tree as &mut dyn WordIndex, &mut table as &mut dyn WordIndex] {
        let removed = index.remove("gamma").unwrap();
        assert_eq!(removed.word(), "gamma");
        assert!(index.lookup("gamma").is_none());
        assert!(index.remove("gamma").is_none());
        assert_eq!(index.unique_count(), 4);
    }
    tree.verify().unwrap();
    table.verify().unwrap();
}
