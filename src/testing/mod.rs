//! Testing utilities
//!
//! Test doubles for the network boundary and the pipeline observer, so the
//! full pipeline can be exercised without touching the network.

pub mod mock_http;
pub mod observer;

pub use mock_http::MockHttpClient;
pub use observer::{ObservedEvent, RecordingObserver};
