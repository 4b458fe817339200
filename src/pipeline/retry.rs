//! Retry wrapper the coordinator puts around each fetch

use super::observer::PipelineObserver;
use crate::config::RetryPolicy;
use crate::fetch::{FetchError, Fetcher, HttpClient};
use crate::types::{RawText, Source};
use tokio::sync::Semaphore;
use tokio::time::sleep;

/// Fetch `source`, retrying transient failures according to `policy`
///
/// Returns the final outcome together with the number of attempts made.
/// Malformed URLs and permanent HTTP errors are never retried.
///
/// When `slots` is given, each attempt holds one slot while the request is in
/// flight. The slot is free again during the backoff.
pub async fn fetch_with_retry<C: HttpClient>(
    fetcher: &Fetcher<C>,
    source: &Source,
    policy: &RetryPolicy,
    slots: Option<&Semaphore>,
    observer: &dyn PipelineObserver,
) -> (Result<RawText, FetchError>, u32) {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let outcome = {
            let _slot = match slots {
                Some(slots) => slots.acquire().await.ok(),
                None => None,
            };
            fetcher.fetch(source).await
        };
        match outcome {
            Ok(text) => return (Ok(text), attempt),
            Err(e) if e.is_retryable() && attempt <= policy.max_retries => {
                observer.on_retry(source, attempt, &e.cause.to_string());
                sleep(policy.backoff(attempt)).await;
            }
            Err(e) => return (Err(e), attempt),
        }
    }
}
