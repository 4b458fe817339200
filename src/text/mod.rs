//! Pure text stages: normalization and chunking

pub mod chunk;
pub mod normalize;

pub use chunk::{chunk, Chunk, DEFAULT_CHUNK_COUNT};
pub use normalize::{normalize, NormalizedText};
