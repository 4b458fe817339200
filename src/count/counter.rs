//! Map stage: count the words of one chunk

use super::FrequencyTable;

/// Count whitespace-delimited tokens of `text`
pub fn count_words(text: &str) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for word in text.split_whitespace() {
        table.add(word, 1);
    }
    table
}
