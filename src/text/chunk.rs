//! Splitting normalized text into contiguous chunks for parallel counting

use super::NormalizedText;
use std::ops::Range;
use std::sync::Arc;

/// Default number of chunks per source
pub const DEFAULT_CHUNK_COUNT: usize = 4;

/// Contiguous slice of a normalized text
///
/// Holds the shared buffer plus a byte range, so it can be moved onto a
/// worker thread without copying the text.
#[derive(Debug, Clone)]
pub struct Chunk {
    text: Arc<str>,
    range: Range<usize>,
}

impl Chunk {
    pub fn as_str(&self) -> &str {
        &self.text[self.range.clone()]
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

impl PartialEq<&str> for Chunk {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Split `text` into `count` chunks of equal character length
///
/// The last chunk absorbs the remainder. Text shorter than `count` characters
/// becomes a single chunk, and empty text yields no chunks at all. Boundaries
/// are character positions, so a word may be cut in two.
pub fn chunk(text: &NormalizedText, count: usize) -> Vec<Chunk> {
    let count = count.max(1);
    let shared = text.shared();
    let char_len = shared.chars().count();

    if char_len == 0 {
        return Vec::new();
    }

    let base = char_len / count;
    if base == 0 {
        return vec![Chunk {
            range: 0..shared.len(),
            text: shared,
        }];
    }

    // byte offset of every chunk start after the first
    let boundaries: Vec<usize> = shared
        .char_indices()
        .enumerate()
        .filter(|(i, _)| *i > 0 && i % base == 0 && i / base < count)
        .map(|(_, (offset, _))| offset)
        .collect();

    let mut chunks = Vec::with_capacity(count);
    let mut start = 0;
    for end in boundaries.into_iter().chain(std::iter::once(shared.len())) {
        chunks.push(Chunk {
            text: Arc::clone(&shared),
            range: start..end,
        });
        start = end;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;

    fn pieces(text: &str, count: usize) -> Vec<String> {
        chunk(&normalize(text), count)
            .iter()
            .map(|c| c.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_even_split() {
        assert_eq!(pieces("aaaabbbbccccdddd", 4), vec!["aaaa", "bbbb", "cccc", "dddd"]);
    }

    #[test]
    fn test_remainder_goes_to_last_chunk() {
        assert_eq!(pieces("abcdefghij", 4), vec!["ab", "cd", "ef", "ghij"]);
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        assert_eq!(pieces("abc", 4), vec!["abc"]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(chunk(&normalize(""), 4).is_empty());
    }

    #[test]
    fn test_single_chunk_holds_everything() {
        assert_eq!(pieces("hello world", 1), vec!["hello world"]);
    }

    #[test]
    fn test_splits_on_char_boundaries() {
        // two bytes per char
        let chunks = chunk(&normalize("абвгдеж"), 3);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "аб");
        assert_eq!(chunks[1], "вг");
        assert_eq!(chunks[2], "деж");
        assert_eq!(chunks[0].len(), 4);
    }

    #[test]
    fn test_concatenation_reconstructs_text() {
        let text = normalize("the quick brown fox jumps over the lazy dog");
        for count in 1..=12 {
            let joined: String = chunk(&text, count).iter().map(Chunk::as_str).collect();
            assert_eq!(joined, text.as_str(), "count = {count}");
        }
    }

    #[test]
    fn test_no_empty_chunks() {
        let text = normalize("a b c d e");
        for count in 1..=20 {
            assert!(chunk(&text, count).iter().all(|c| !c.is_empty()));
        }
    }
}
