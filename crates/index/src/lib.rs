//! Index structures for wordindex
//!
//! This crate provides the two interchangeable implementations of
//! [`wordindex_core::WordIndex`]:
//! - AvlTree: height-balanced binary search tree, ordered by word
//! - HashTable: open addressing with quadratic probing and automatic growth
//!
//! Both structures hold the same logical content for the same sequence of
//! observations; only their physical layout and cost profile differ.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod avl;
pub mod hash_table;
pub mod invariant;
pub mod prime;

pub use avl::AvlTree;
pub use hash_table::{polynomial_hash, HashTable};
pub use invariant::InvariantError;
