//! Token normalization
//!
//! Only fully lower-cased, purely alphabetic words ever reach an index.
//! This module is the single place that decides what such a word is.
//!
//! # Example
//!
//! ```
//! use wordindex_core::normalize::{normalize, tokenize, SplitMode};
//!
//! assert_eq!(normalize("Hello"), Some("hello".to_string()));
//! assert_eq!(normalize("it's"), None);
//! assert_eq!(tokenize("It's a DOG!", SplitMode::NonAlphabetic), vec!["it", "s", "a", "dog"]);
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How raw text is cut into candidate tokens before normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitMode {
    /// Every non-alphabetic character is a separator
    ///
    /// Nothing is ever rejected in this mode: "don't" yields "don" and "t".
    #[default]
    NonAlphabetic,
    /// Split on whitespace, then reject tokens with any non-alphabetic character
    ///
    /// "don't" is dropped entirely.
    Whitespace,
}

/// Lower-case `token`, or reject it
///
/// Returns `None` for empty tokens and for tokens containing any
/// non-alphabetic character (checked after lower-casing).
pub fn normalize(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    let lowered = token.to_lowercase();
    if lowered.chars().all(char::is_alphabetic) {
        Some(lowered)
    } else {
        None
    }
}

/// Lower-case a lookup key without allocating when it already is
pub fn fold_case(word: &str) -> Cow<'_, str> {
    if word.chars().any(char::is_uppercase) {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}

/// Cut `text` into raw candidate tokens according to `mode`
///
/// Tokens are not normalized; empty pieces are skipped.
pub fn raw_tokens(text: &str, mode: SplitMode) -> Box<dyn Iterator<Item = &str> + '_> {
    match mode {
        SplitMode::NonAlphabetic => Box::new(
            text.split(|c: char| !c.is_alphabetic())
                .filter(|s| !s.is_empty()),
        ),
        SplitMode::Whitespace => Box::new(text.split_whitespace()),
    }
}

/// Split and normalize `text`, dropping rejected tokens
pub fn tokenize(text: &str, mode: SplitMode) -> Vec<String> {
    raw_tokens(text, mode).filter_map(normalize).collect()
}
