use super::{FetchCause, FetchError, HttpClient};
use crate::types::{RawText, Source};
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// Default per-request timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieves the raw text of a source over an [`HttpClient`]
pub struct Fetcher<C> {
    client: C,
    timeout: Duration,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Parse and check a source before any network traffic
    pub fn parse(&self, source: &Source) -> Result<Url, FetchError> {
        let url = Url::parse(source.as_str())
            .map_err(|e| FetchError::new(source, FetchCause::InvalidUrl(e)))?;

        if !self.client.supports_scheme(url.scheme()) {
            return Err(FetchError::new(
                source,
                FetchCause::UnsupportedScheme(url.scheme().to_string()),
            ));
        }
        Ok(url)
    }

    /// Fetch the full body of `source`
    ///
    /// Fails on a malformed URL, a non-2xx status, a transport error or when
    /// the request outlives the configured timeout.
    pub async fn fetch(&self, source: &Source) -> Result<RawText, FetchError> {
        let url = self.parse(source)?;
        debug!("Fetching {}", url);

        let response = tokio::time::timeout(self.timeout, self.client.get(&url))
            .await
            .map_err(|_| FetchError::new(source, FetchCause::Timeout))?
            .map_err(|cause| FetchError::new(source, cause))?;

        if !response.is_success() {
            return Err(FetchError::new(source, FetchCause::Status(response.status)));
        }

        trace!("Fetched {} bytes from {}", response.body.len(), url);
        Ok(response.body)
    }
}
