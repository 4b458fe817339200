//! Counting (map) and merging (reduce) of word frequencies

pub mod counter;
pub mod table;

pub use counter::count_words;
pub use table::{merge_all, FrequencyTable};
