//! Retrieval of raw text over HTTP
//!
//! The fetcher is the only I/O boundary of the pipeline. It does not retry;
//! see `pipeline::retry` for the policy the coordinator wraps around it.

pub mod client;
pub mod error;
pub mod fetcher;

pub use client::{HttpClient, HttpResponse, ReqwestClient};
pub use error::{FetchCause, FetchError};
pub use fetcher::{Fetcher, DEFAULT_FETCH_TIMEOUT};
