//! Open-addressing hash table index
//!
//! This module provides:
//! - HashTable with quadratic probing over a prime-length slot array
//! - Tombstone deletion (slots are never shrunk)
//! - Load-factor-triggered rehash into the next prime >= 2x length
//!
//! # Probing
//!
//! A word hashes to `h`; slots `(h + i²) mod len` are visited for
//! `i = 0, 1, 2, …`. `Deleted` slots are skipped, so a word inserted past a
//! tombstone stays reachable after the tombstone is created. A probe stops at
//! the first `Empty` slot or at the slot holding the word.
//!
//! # Growth
//!
//! The rehash check runs on every insertion, after the entry is in place
//! and before the caller observes the result, so the probe loop never runs
//! against a table above its load threshold.

use crate::invariant::InvariantError;
use crate::prime::{is_prime, next_prime};
use std::mem;
use wordindex_core::{
    fold_case, ConfigError, DocumentId, HashTableConfig, WordEntry, WordIndex,
};

// ============================================================================
// Hashing
// ============================================================================

/// Polynomial string hash reduced into `0..size`
///
/// Accumulates `37 * acc + code` over the characters with 32-bit wrapping
/// arithmetic, then takes the non-negative remainder.
pub fn polynomial_hash(word: &str, size: usize) -> usize {
    debug_assert!(size > 0);
    let mut acc: i32 = 0;
    for ch in word.chars() {
        acc = acc.wrapping_mul(37).wrapping_add(ch as i32);
    }
    i64::from(acc).rem_euclid(size as i64) as usize
}

// ============================================================================
// Slot
// ============================================================================

#[derive(Debug, Default)]
enum Slot {
    #[default]
    Empty,
    Active(WordEntry),
    Deleted,
}

impl Slot {
    fn take_entry(&mut self) -> Option<WordEntry> {
        match mem::take(self) {
            Slot::Active(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Outcome of probing for a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// Slot holding the word
    Found(usize),
    /// Word absent; first reusable slot on its probe path
    Vacant(usize),
    /// Word absent and every probed slot is active
    Exhausted,
}

fn empty_slots(len: usize) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(len);
    slots.resize_with(len, Slot::default);
    slots
}

fn probe(slots: &[Slot], word: &str) -> Probe {
    let len = slots.len();
    let home = polynomial_hash(word, len);
    let mut tombstone = None;
    // i² mod len repeats with period len, so len steps cover every reachable slot
    for i in 0..len {
        let pos = (home + (i * i) % len) % len;
        match &slots[pos] {
            Slot::Empty => return Probe::Vacant(tombstone.unwrap_or(pos)),
            Slot::Active(entry) if entry.word() == word => return Probe::Found(pos),
            Slot::Active(_) => {}
            Slot::Deleted => {
                tombstone.get_or_insert(pos);
            }
        }
    }
    tombstone.map_or(Probe::Exhausted, Probe::Vacant)
}

/// Move every entry into a fresh table, or hand them all back if one cannot be placed
fn place_all(slots: &mut [Slot], entries: Vec<WordEntry>) -> Result<(), Vec<WordEntry>> {
    let mut pending = entries.into_iter();
    while let Some(entry) = pending.next() {
        match probe(slots, entry.word()) {
            Probe::Found(pos) | Probe::Vacant(pos) => slots[pos] = Slot::Active(entry),
            Probe::Exhausted => {
                let mut all: Vec<WordEntry> =
                    slots.iter_mut().filter_map(Slot::take_entry).collect();
                all.push(entry);
                all.extend(pending);
                return Err(all);
            }
        }
    }
    Ok(())
}

// ============================================================================
// HashTable
// ============================================================================

/// Hash table mapping normalized words to their document occurrences
#[derive(Debug)]
pub struct HashTable {
    slots: Vec<Slot>,
    active: usize,
    tombstones: usize,
    max_load_factor: f64,
    rehashes: usize,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::with_validated(&HashTableConfig::default())
    }
}

impl HashTable {
    /// Create an empty table with the default configuration (53 slots, 0.75)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table from a configuration
    ///
    /// The initial length is rounded up to the next prime.
    pub fn with_config(config: &HashTableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_validated(config))
    }

    fn with_validated(config: &HashTableConfig) -> Self {
        HashTable {
            slots: empty_slots(next_prime(config.initial_capacity)),
            active: 0,
            tombstones: 0,
            max_load_factor: config.max_load_factor,
            rehashes: 0,
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Active entries divided by table length
    pub fn load_factor(&self) -> f64 {
        self.active as f64 / self.slots.len() as f64
    }

    /// Number of distinct words currently stored
    pub fn unique_count(&self) -> usize {
        self.active
    }

    /// Check if the table holds no words
    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Table length (always prime)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of `Deleted` slots
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Number of rehashes performed since creation
    pub fn rehash_count(&self) -> usize {
        self.rehashes
    }

    /// Configured load factor threshold
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Case-insensitive exact lookup
    pub fn find(&self, word: &str) -> Option<&WordEntry> {
        match probe(&self.slots, &fold_case(word)) {
            Probe::Found(pos) => match &self.slots[pos] {
                Slot::Active(entry) => Some(entry),
                _ => None,
            },
            _ => None,
        }
    }

    /// Case-insensitive exact lookup, mutable
    pub fn find_mut(&mut self, word: &str) -> Option<&mut WordEntry> {
        match probe(&self.slots, &fold_case(word)) {
            Probe::Found(pos) => match &mut self.slots[pos] {
                Slot::Active(entry) => Some(entry),
                _ => None,
            },
            _ => None,
        }
    }

    /// Iterate over active entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Active(entry) => Some(entry),
            _ => None,
        })
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Record one observation of `word` in `document`
    ///
    /// A new word gets a fresh entry with count 1; a known word has its
    /// count for `document` incremented. Rehashes before returning if the
    /// load factor ends up above the threshold.
    pub fn insert(&mut self, word: &str, document: &DocumentId) {
        let word = fold_case(word);
        loop {
            match probe(&self.slots, &word) {
                Probe::Found(pos) => {
                    if let Slot::Active(entry) = &mut self.slots[pos] {
                        entry.record(document);
                    }
                    break;
                }
                Probe::Vacant(pos) => {
                    if matches!(self.slots[pos], Slot::Deleted) {
                        self.tombstones -= 1;
                    }
                    self.slots[pos] =
                        Slot::Active(WordEntry::with_first(word.to_string(), document.clone()));
                    self.active += 1;
                    break;
                }
                Probe::Exhausted => self.rehash(),
            }
        }
        while self.load_factor() > self.max_load_factor {
            self.rehash();
        }
    }

    /// Remove a word, leaving a tombstone in its slot
    pub fn remove(&mut self, word: &str) -> Option<WordEntry> {
        let Probe::Found(pos) = probe(&self.slots, &fold_case(word)) else {
            return None;
        };
        let entry = mem::replace(&mut self.slots[pos], Slot::Deleted).take_entry();
        self.active -= 1;
        self.tombstones += 1;
        entry
    }

    /// Grow to the next prime >= 2x the current length
    ///
    /// Every active entry moves to the new table with its occurrences and
    /// counts intact; tombstones are discarded. The table never shrinks.
    pub fn rehash(&mut self) {
        let previous_size = self.slots.len();
        let mut entries: Vec<WordEntry> = self
            .slots
            .iter_mut()
            .filter_map(Slot::take_entry)
            .collect();

        let mut size = next_prime(previous_size * 2);
        loop {
            let mut slots = empty_slots(size);
            match place_all(&mut slots, entries) {
                Ok(()) => {
                    self.slots = slots;
                    break;
                }
                Err(returned) => {
                    tracing::warn!(size, "quadratic probe exhausted during rehash, growing again");
                    entries = returned;
                    size = next_prime(size * 2);
                }
            }
        }
        self.tombstones = 0;
        self.rehashes += 1;

        tracing::info!(
            previous_size,
            new_size = self.slots.len(),
            unique_words = self.active,
            load_factor = self.load_factor(),
            "rehashed"
        );
    }

    /// Drop every entry, keeping the current length
    pub fn clear(&mut self) {
        self.slots = empty_slots(self.slots.len());
        self.active = 0;
        self.tombstones = 0;
    }

    /// Check length primality, slot accounting, load bound and reachability
    pub fn verify(&self) -> Result<(), InvariantError> {
        if !is_prime(self.slots.len()) {
            return Err(InvariantError::CapacityNotPrime(self.slots.len()));
        }
        let mut active = 0;
        let mut tombstones = 0;
        for (slot_index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => {}
                Slot::Deleted => tombstones += 1,
                Slot::Active(entry) => {
                    active += 1;
                    if probe(&self.slots, entry.word()) != Probe::Found(slot_index) {
                        return Err(InvariantError::Unreachable {
                            word: entry.word().to_string(),
                            slot: slot_index,
                        });
                    }
                    if let Some(zero) = entry.occurrences().iter().find(|o| o.count == 0) {
                        return Err(InvariantError::ZeroCount {
                            word: entry.word().to_string(),
                            document: zero.document.to_string(),
                        });
                    }
                }
            }
        }
        if active != self.active {
            return Err(InvariantError::LengthMismatch {
                recorded: self.active,
                actual: active,
            });
        }
        if tombstones != self.tombstones {
            return Err(InvariantError::LengthMismatch {
                recorded: self.tombstones,
                actual: tombstones,
            });
        }
        if self.load_factor() > self.max_load_factor {
            return Err(InvariantError::LoadFactorExceeded {
                load_factor: self.load_factor(),
                max: self.max_load_factor,
            });
        }
        Ok(())
    }
}

// ============================================================================
// WordIndex
// ============================================================================

impl WordIndex for HashTable {
    fn name(&self) -> &'static str {
        "hash table"
    }

    fn observe(&mut self, word: &str, document: &DocumentId) {
        self.insert(word, document);
    }

    fn lookup(&self, word: &str) -> Option<&WordEntry> {
        self.find(word)
    }

    fn remove(&mut self, word: &str) -> Option<WordEntry> {
        HashTable::remove(self, word)
    }

    fn unique_count(&self) -> usize {
        self.active
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> DocumentId {
        DocumentId::from(name)
    }

    /// Words that all hash to the same home slot of a 53-slot table
    fn colliding_words(count: usize) -> Vec<String> {
        let target = polynomial_hash("aa", 53);
        let mut words = Vec::new();
        for a in b'a'..=b'z' {
            for b in b'a'..=b'z' {
                for c in b'a'..=b'z' {
                    let w = format!("{}{}{}", a as char, b as char, c as char);
                    if polynomial_hash(&w, 53) == target {
                        words.push(w);
                        if words.len() == count {
                            return words;
                        }
                    }
                }
            }
        }
        words
    }

    #[test]
    fn test_polynomial_hash_matches_formula() {
        // 'a' = 97, 'b' = 98: 37 * 97 + 98 = 3687
        assert_eq!(polynomial_hash("ab", 53), 3687 % 53);
        assert_eq!(polynomial_hash("", 53), 0);
    }

    #[test]
    fn test_polynomial_hash_non_negative_on_overflow() {
        let long = "z".repeat(64);
        for size in [2, 53, 107, 1_000_003] {
            assert!(polynomial_hash(&long, size) < size);
        }
    }

    #[test]
    fn test_default_table() {
        let table = HashTable::new();
        assert_eq!(table.capacity(), 53);
        assert_eq!(table.unique_count(), 0);
        assert_eq!(table.load_factor(), 0.0);
        assert!(table.verify().is_ok());
    }

    #[test]
    fn test_config_rounds_capacity_to_prime() {
        let config = HashTableConfig::new().with_initial_capacity(100);
        let table = HashTable::with_config(&config).unwrap();
        assert_eq!(table.capacity(), 101);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = HashTableConfig::new().with_max_load_factor(1.5);
        assert!(HashTable::with_config(&config).is_err());
    }

    #[test]
    fn test_insert_and_count() {
        let mut table = HashTable::new();
        let d1 = doc("d1");
        table.insert("a", &d1);
        table.insert("a", &d1);
        table.insert("a", &d1);
        let entry = table.find("a").unwrap();
        assert_eq!(entry.count_in(&d1), 3);
        assert_eq!(table.unique_count(), 1);
    }

    #[test]
    fn test_insert_appends_documents() {
        let mut table = HashTable::new();
        table.insert("sat", &doc("d1"));
        table.insert("sat", &doc("d2"));
        let entry = table.find("SAT").unwrap();
        assert_eq!(entry.sorted_counts(), vec![(doc("d1"), 1), (doc("d2"), 1)]);
    }

    #[test]
    fn test_find_absent() {
        let table = HashTable::new();
        assert!(table.find("nothing").is_none());
    }

    #[test]
    fn test_collisions_resolve_by_quadratic_probe() {
        let words = colliding_words(5);
        assert_eq!(words.len(), 5);
        let mut table = HashTable::new();
        for w in &words {
            table.insert(w, &doc("d1"));
        }
        table.verify().unwrap();
        for w in &words {
            assert_eq!(table.find(w).unwrap().word(), w);
        }
    }

    #[test]
    fn test_lookup_skips_tombstone_on_probe_path() {
        let words = colliding_words(3);
        let mut table = HashTable::new();
        for w in &words {
            table.insert(w, &doc("d1"));
        }

        // words[0] sits at the home slot; the others are further along
        let removed = table.remove(&words[0]).unwrap();
        assert_eq!(removed.word(), words[0]);
        assert_eq!(table.tombstones(), 1);

        assert!(table.find(&words[0]).is_none());
        assert!(table.find(&words[1]).is_some());
        assert!(table.find(&words[2]).is_some());
        table.verify().unwrap();
    }

    #[test]
    fn test_insert_reuses_tombstone() {
        let words = colliding_words(2);
        let mut table = HashTable::new();
        table.insert(&words[0], &doc("d1"));
        table.insert(&words[1], &doc("d1"));
        table.remove(&words[0]);

        let capacity = table.capacity();
        table.insert(&words[0], &doc("d2"));
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.find(&words[0]).unwrap().count_in(&doc("d2")), 1);
        assert_eq!(table.find(&words[0]).unwrap().count_in(&doc("d1")), 0);
        table.verify().unwrap();
    }

    #[test]
    fn test_reinsert_known_word_past_tombstone_does_not_duplicate() {
        let words = colliding_words(3);
        let mut table = HashTable::new();
        for w in &words {
            table.insert(w, &doc("d1"));
        }
        table.remove(&words[0]);
        table.insert(&words[2], &doc("d1"));

        assert_eq!(table.unique_count(), 2);
        assert_eq!(table.find(&words[2]).unwrap().count_in(&doc("d1")), 2);
        table.verify().unwrap();
    }

    #[test]
    fn test_remove_absent() {
        let mut table = HashTable::new();
        assert!(table.remove("ghost").is_none());
        assert_eq!(table.tombstones(), 0);
    }

    #[test]
    fn test_rehash_triggered_by_load_factor() {
        let mut table = HashTable::new();
        for i in 0..39 {
            table.insert(&format!("w{}", "a".repeat(i + 1)), &doc("d1"));
        }
        // 39 / 53 = 0.736
        assert_eq!(table.rehash_count(), 0);

        table.insert("fortieth", &doc("d1"));
        // 40 / 53 = 0.755 > 0.75
        assert_eq!(table.rehash_count(), 1);
        assert_eq!(table.capacity(), 107);
        assert_eq!(table.unique_count(), 40);
        assert!(table.load_factor() <= 0.75);
        table.verify().unwrap();
    }

    #[test]
    fn test_rehash_preserves_counts_and_drops_tombstones() {
        let mut table = HashTable::with_config(&HashTableConfig::for_testing()).unwrap();
        table.insert("keep", &doc("d1"));
        table.insert("keep", &doc("d1"));
        table.insert("keep", &doc("d2"));
        table.insert("gone", &doc("d1"));
        table.remove("gone");
        assert_eq!(table.tombstones(), 1);

        table.rehash();

        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.capacity(), 11);
        let keep = table.find("keep").unwrap();
        assert_eq!(keep.count_in(&doc("d1")), 2);
        assert_eq!(keep.count_in(&doc("d2")), 1);
        assert!(table.find("gone").is_none());
        table.verify().unwrap();
    }

    #[test]
    fn test_tombstones_never_block_insertion() {
        // Churn a tiny table so every slot has been a tombstone at some point
        let mut table = HashTable::with_config(&HashTableConfig::for_testing()).unwrap();
        let capacity = table.capacity();
        for round in 0..50 {
            let word = format!("w{}", "x".repeat(round % 7 + 1));
            table.insert(&word, &doc("d1"));
            table.remove(&word);
        }
        assert_eq!(table.unique_count(), 0);
        assert_eq!(table.capacity(), capacity);
        table.insert("final", &doc("d1"));
        assert!(table.find("final").is_some());
        table.verify().unwrap();
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut table = HashTable::new();
        for i in 0..60 {
            table.insert(&format!("k{}", "q".repeat(i + 1)), &doc("d1"));
        }
        let capacity = table.capacity();
        table.clear();
        assert_eq!(table.capacity(), capacity);
        assert!(table.is_empty());
        assert!(table.iter().next().is_none());
    }

    #[test]
    fn test_iter_yields_active_entries() {
        let mut table = HashTable::new();
        for w in ["a", "b", "c"] {
            table.insert(w, &doc("d1"));
        }
        table.remove("b");
        let mut words: Vec<&str> = table.iter().map(|e| e.word()).collect();
        words.sort();
        assert_eq!(words, vec!["a", "c"]);
    }
}
