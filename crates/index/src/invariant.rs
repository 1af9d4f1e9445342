//! Structural invariant violations
//!
//! Every mutating operation restores its structure's invariants before
//! returning, so none of these can be observed unless there is a bug.
//! `verify()` on either index reports the first violation it finds.

use thiserror::Error;

/// A broken structural invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    /// A tree key is not strictly between its ancestors' bounds
    #[error("Key {word:?} violates search-tree ordering against {bound:?}")]
    OutOfOrder {
        /// Offending key
        word: String,
        /// Ancestor key it should be ordered against
        bound: String,
    },

    /// A tree node's subtree heights differ by more than one
    #[error("Node {word:?} has balance factor {balance}")]
    Unbalanced {
        /// Key of the unbalanced node
        word: String,
        /// height(left) - height(right)
        balance: i32,
    },

    /// A tree node's cached height is stale
    #[error("Node {word:?} caches height {cached}, actual {actual}")]
    HeightMismatch {
        /// Key of the node
        word: String,
        /// Height stored in the node
        cached: i32,
        /// Height computed from its children
        actual: i32,
    },

    /// The tracked entry count disagrees with the structure
    #[error("Index records {recorded} entries, found {actual}")]
    LengthMismatch {
        /// Count tracked by the index
        recorded: usize,
        /// Count found by walking the structure
        actual: usize,
    },

    /// A document occurrence with a zero count
    #[error("Word {word:?} has a zero count for document {document:?}")]
    ZeroCount {
        /// Word holding the occurrence
        word: String,
        /// Document with the zero count
        document: String,
    },

    /// Hash table length is not prime
    #[error("Table length {0} is not prime")]
    CapacityNotPrime(usize),

    /// Hash table load factor above its threshold
    #[error("Load factor {load_factor} exceeds {max}")]
    LoadFactorExceeded {
        /// Current load factor
        load_factor: f64,
        /// Configured threshold
        max: f64,
    },

    /// An active hash entry cannot be found by probing for its own word
    #[error("Word {word:?} in slot {slot} is not reachable by probing")]
    Unreachable {
        /// Word stored in the slot
        word: String,
        /// Slot index
        slot: usize,
    },
}
