//! Text normalization ahead of chunking
//!
//! Lowercases the input and drops every character that is not a Latin or
//! Cyrillic letter, an ASCII digit, or whitespace. Whitespace runs are kept
//! as they are; the counter treats any run as a single separator.
//!
//! The ASCII information separators U+001C..=U+001F also split words. They
//! are not `char::is_whitespace`, so they are rewritten to a plain space.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Lowercase text made only of Latin/Cyrillic letters, digits and whitespace
///
/// Only [`normalize`] builds one. The buffer is shared, so chunks can borrow
/// ranges of it from other tasks without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(Arc<str>);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn shared(&self) -> Arc<str> {
        Arc::clone(&self.0)
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase `raw` and strip everything outside the kept alphabet
pub fn normalize(raw: &str) -> NormalizedText {
    let cleaned: String = raw
        .chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| match c {
            '\u{1C}'..='\u{1F}' => Some(' '),
            c if is_kept(c) => Some(c),
            _ => None,
        })
        .collect();
    NormalizedText(cleaned.into())
}

fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || is_cyrillic_letter(c)
}

// Cyrillic and Cyrillic Supplement blocks
fn is_cyrillic_letter(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{052F}') && c.is_alphabetic()
}
