//! Height-balanced binary search tree index
//!
//! This module provides:
//! - AvlTree keyed by normalized word, one WordEntry per node
//! - Rotation-based rebalancing after every insert and remove
//! - In-order iteration and invariant verification
//!
//! # Ownership
//!
//! Every node exclusively owns its children (`Option<Box<Node>>`).
//! Rotations take a subtree by value and return the new subtree root,
//! so no node is ever aliased while the tree is being restructured.
//!
//! # Heights
//!
//! An absent subtree has height -1 and a leaf has height 0. After any
//! public operation returns, every node satisfies
//! `|height(left) - height(right)| <= 1`, which bounds recursion depth
//! to O(log n).

use crate::invariant::InvariantError;
use std::cmp::Ordering;
use std::mem;
use wordindex_core::{fold_case, DocumentId, WordEntry, WordIndex};

type Link = Option<Box<Node>>;

// ============================================================================
// Node
// ============================================================================

#[derive(Debug)]
struct Node {
    entry: WordEntry,
    height: i32,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(entry: WordEntry) -> Box<Node> {
        Box::new(Node {
            entry,
            height: 0,
            left: None,
            right: None,
        })
    }

    fn key(&self) -> &str {
        self.entry.word()
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height(link: &Link) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

fn balance(link: &Link) -> i32 {
    link.as_ref().map_or(0, |node| node.balance())
}

// ============================================================================
// Rotations
// ============================================================================

/// Single right rotation: the left child becomes the subtree root
fn rotate_with_left_child(mut k2: Box<Node>) -> Box<Node> {
    let Some(mut k1) = k2.left.take() else {
        return k2;
    };
    k2.left = k1.right.take();
    k2.update_height();
    k1.right = Some(k2);
    k1.update_height();
    k1
}

/// Single left rotation: the right child becomes the subtree root
fn rotate_with_right_child(mut k1: Box<Node>) -> Box<Node> {
    let Some(mut k2) = k1.right.take() else {
        return k1;
    };
    k1.right = k2.left.take();
    k1.update_height();
    k2.left = Some(k1);
    k2.update_height();
    k2
}

/// Left-right case: rotate the left child left, then the node right
fn double_with_left_child(mut k3: Box<Node>) -> Box<Node> {
    k3.left = k3.left.take().map(rotate_with_right_child);
    rotate_with_left_child(k3)
}

/// Right-left case: rotate the right child right, then the node left
fn double_with_right_child(mut k1: Box<Node>) -> Box<Node> {
    k1.right = k1.right.take().map(rotate_with_left_child);
    rotate_with_right_child(k1)
}

/// Recompute the node's height and restore balance if it is off by two
///
/// Single vs double rotation is decided by the balance of the child on the
/// heavy side. This is correct after both insertion and deletion; a
/// balanced heavy child (possible only after deletion) takes the single
/// rotation.
fn rebalance(mut node: Box<Node>) -> Box<Node> {
    node.update_height();
    let factor = node.balance();
    if factor > 1 {
        if balance(&node.left) >= 0 {
            rotate_with_left_child(node)
        } else {
            double_with_left_child(node)
        }
    } else if factor < -1 {
        if balance(&node.right) <= 0 {
            rotate_with_right_child(node)
        } else {
            double_with_right_child(node)
        }
    } else {
        node
    }
}

// ============================================================================
// Recursive insert / remove
// ============================================================================

fn insert_into(link: Link, word: &str) -> (Box<Node>, bool) {
    let Some(mut node) = link else {
        return (Node::leaf(WordEntry::new(word)), true);
    };
    let inserted = match word.cmp(node.key()) {
        Ordering::Less => {
            let (child, inserted) = insert_into(node.left.take(), word);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert_into(node.right.take(), word);
            node.right = Some(child);
            inserted
        }
        Ordering::Equal => return (node, false),
    };
    (rebalance(node), inserted)
}

fn remove_from(link: Link, word: &str) -> (Link, Option<WordEntry>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    let removed = match word.cmp(node.key()) {
        Ordering::Less => {
            let (child, removed) = remove_from(node.left.take(), word);
            node.left = child;
            removed
        }
        Ordering::Greater => {
            let (child, removed) = remove_from(node.right.take(), word);
            node.right = child;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (Some(left), Some(right)) => {
                // The in-order successor moves up into this node, occurrences included
                let (right, successor) = remove_min(right);
                node.left = Some(left);
                node.right = right;
                Some(mem::replace(&mut node.entry, successor))
            }
            (Some(child), None) | (None, Some(child)) => {
                let Node { entry, .. } = *node;
                return (Some(child), Some(entry));
            }
            (None, None) => {
                let Node { entry, .. } = *node;
                return (None, Some(entry));
            }
        },
    };
    (Some(rebalance(node)), removed)
}

/// Detach the leftmost entry of a subtree, rebalancing on the way up
fn remove_min(mut node: Box<Node>) -> (Link, WordEntry) {
    match node.left.take() {
        None => {
            let Node { entry, right, .. } = *node;
            (right, entry)
        }
        Some(left) => {
            let (left, min) = remove_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
    }
}

// ============================================================================
// AvlTree
// ============================================================================

/// AVL tree mapping normalized words to their document occurrences
///
/// Operating on an empty tree is always safe: lookups return None and
/// removals are no-ops.
#[derive(Debug, Default)]
pub struct AvlTree {
    root: Link,
    len: usize,
}

impl AvlTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of words in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree (-1 when empty, 0 for a single node)
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Insert a bare key if absent
    ///
    /// Returns true if the word was newly inserted. The caller attaches
    /// occurrences through [`AvlTree::find_mut`].
    pub fn insert(&mut self, word: &str) -> bool {
        let key = fold_case(word);
        let (root, inserted) = insert_into(self.root.take(), &key);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove a word and return its entry
    pub fn remove(&mut self, word: &str) -> Option<WordEntry> {
        let key = fold_case(word);
        let (root, removed) = remove_from(self.root.take(), &key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Case-insensitive exact lookup
    pub fn find(&self, word: &str) -> Option<&WordEntry> {
        let key = fold_case(word);
        let key: &str = &key;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.entry),
            };
        }
        None
    }

    /// Case-insensitive exact lookup, mutable
    pub fn find_mut(&mut self, word: &str) -> Option<&mut WordEntry> {
        let key = fold_case(word);
        let key: &str = &key;
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(node.key()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.entry),
            };
        }
        None
    }

    /// Entry with the smallest word
    pub fn find_min(&self) -> Option<&WordEntry> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.entry)
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// In-order iterator over entries (ascending by word)
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Check ordering, balance, cached heights and occurrence counts
    pub fn verify(&self) -> Result<(), InvariantError> {
        let mut count = 0;
        if let Some(root) = self.root.as_deref() {
            verify_node(root, None, None, &mut count)?;
        }
        if count != self.len {
            return Err(InvariantError::LengthMismatch {
                recorded: self.len,
                actual: count,
            });
        }
        Ok(())
    }
}

fn verify_node(
    node: &Node,
    lower: Option<&str>,
    upper: Option<&str>,
    count: &mut usize,
) -> Result<i32, InvariantError> {
    let key = node.key();
    let violated = lower
        .filter(|bound| key <= *bound)
        .or_else(|| upper.filter(|bound| key >= *bound));
    if let Some(bound) = violated {
        return Err(InvariantError::OutOfOrder {
            word: key.to_string(),
            bound: bound.to_string(),
        });
    }
    if let Some(zero) = node.entry.occurrences().iter().find(|o| o.count == 0) {
        return Err(InvariantError::ZeroCount {
            word: key.to_string(),
            document: zero.document.to_string(),
        });
    }
    *count += 1;

    let left = match node.left.as_deref() {
        Some(child) => verify_node(child, lower, Some(key), count)?,
        None => -1,
    };
    let right = match node.right.as_deref() {
        Some(child) => verify_node(child, Some(key), upper, count)?,
        None => -1,
    };

    let actual = 1 + left.max(right);
    if node.height != actual {
        return Err(InvariantError::HeightMismatch {
            word: key.to_string(),
            cached: node.height,
            actual,
        });
    }
    if (left - right).abs() > 1 {
        return Err(InvariantError::Unbalanced {
            word: key.to_string(),
            balance: left - right,
        });
    }
    Ok(actual)
}

// ============================================================================
// Iteration
// ============================================================================

/// In-order iterator over an [`AvlTree`]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a WordEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.entry)
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = &'a WordEntry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// WordIndex
// ============================================================================

impl WordIndex for AvlTree {
    fn name(&self) -> &'static str {
        "AVL tree"
    }

    fn observe(&mut self, word: &str, document: &DocumentId) {
        self.insert(word);
        if let Some(entry) = self.find_mut(word) {
            entry.record(document);
        }
    }

    fn lookup(&self, word: &str) -> Option<&WordEntry> {
        self.find(word)
    }

    fn remove(&mut self, word: &str) -> Option<WordEntry> {
        AvlTree::remove(self, word)
    }

    fn unique_count(&self) -> usize {
        self.len
    }
}

// ============================================================================
// Tests
// ============================================================================
