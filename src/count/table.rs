//! Word frequency table and its reduction
//!
//! Merging is a pointwise sum of counts, so it is associative and commutative
//! and the empty table is its identity. Keys keep first-insertion order, which
//! is what top-K uses to break ties between equal counts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapping from word to number of occurrences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` occurrences of `word`
    pub fn add(&mut self, word: &str, n: u64) {
        if let Some(count) = self.counts.get_mut(word) {
            *count += n;
        } else {
            self.counts.insert(word.to_string(), n);
        }
    }

    /// Count for `word`, zero when absent
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Fold `other` into `self`; words new to `self` are appended in `other`'s order
    pub fn absorb(&mut self, other: FrequencyTable) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }

    /// Pointwise sum of two tables
    pub fn merge(mut self, other: FrequencyTable) -> FrequencyTable {
        self.absorb(other);
        self
    }

    /// The `k` most frequent words, ties kept in first-insertion order
    pub fn top_k(&self, k: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        // stable: equal counts stay in insertion order
        entries.sort_by(|a, b| b.1.cmp(a.1));
        entries
            .into_iter()
            .take(k)
            .map(|(word, count)| (word.clone(), *count))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (word, count) in iter {
            let word: String = word.into();
            table.add(&word, count);
        }
        table
    }
}

/// Left fold of any number of tables, starting from the empty table
pub fn merge_all<I>(tables: I) -> FrequencyTable
where
    I: IntoIterator<Item = FrequencyTable>,
{
    tables
        .into_iter()
        .fold(FrequencyTable::new(), FrequencyTable::merge)
}
