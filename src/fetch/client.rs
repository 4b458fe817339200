//! HTTP GET capability used by the fetcher
//!
//! Anything that can issue a GET, report the status code and hand back the
//! body as text can stand in for the network. `ReqwestClient` is the real one;
//! tests use `testing::MockHttpClient`.

use super::FetchCause;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Status and body of a completed GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET for `url`
    ///
    /// A non-success status is still `Ok`; only transport level problems are
    /// errors here.
    async fn get(&self, url: &Url) -> std::result::Result<HttpResponse, FetchCause>;

    /// Whether this client can reach URLs with `scheme`
    fn supports_scheme(&self, scheme: &str) -> bool {
        matches!(scheme, "http" | "https")
    }
}

#[async_trait]
impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    async fn get(&self, url: &Url) -> std::result::Result<HttpResponse, FetchCause> {
        (**self).get(url).await
    }

    fn supports_scheme(&self, scheme: &str) -> bool {
        (**self).supports_scheme(scheme)
    }
}

/// `HttpClient` backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wordfreq/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &Url) -> std::result::Result<HttpResponse, FetchCause> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        // skip downloading bodies we are going to discard
        if !status.is_success() {
            return Ok(HttpResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.text().await?;
        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
