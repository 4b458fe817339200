//! Scripted HTTP client for tests

use crate::fetch::{FetchCause, HttpClient, HttpResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

type Reply = Result<HttpResponse, FetchCause>;

/// Mock implementation of `HttpClient`
///
/// Each URL gets a script of replies served in order; the last reply repeats
/// once the script runs out. Unknown URLs answer with a 404.
#[derive(Debug, Default, Clone)]
pub struct MockHttpClient {
    scripts: HashMap<String, Vec<Reply>>,
    delays: HashMap<String, Duration>,
    /// URLs requested so far, in call order
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockHttpClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reply to the script of `url`
    #[must_use]
    pub fn with_reply(mut self, url: &str, reply: Reply) -> Self {
        self.scripts.entry(normalize_key(url)).or_default().push(reply);
        self
    }

    #[must_use]
    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.with_reply(url, Ok(HttpResponse::ok(body)))
    }

    #[must_use]
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.with_reply(
            url,
            Ok(HttpResponse {
                status,
                body: String::new(),
            }),
        )
    }

    #[must_use]
    pub fn with_error(self, url: &str, cause: FetchCause) -> Self {
        self.with_reply(url, Err(cause))
    }

    /// Hold every reply for `url` back by `delay`
    #[must_use]
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(normalize_key(url), delay);
        self
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self, url: &str) -> usize {
        let key = normalize_key(url);
        self.calls.lock().await.iter().filter(|u| **u == key).count()
    }
}

// Url::parse adds a trailing slash to bare hosts
fn normalize_key(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchCause> {
        let key = url.to_string();
        let attempt = {
            let mut calls = self.calls.lock().await;
            let attempt = calls.iter().filter(|u| **u == key).count();
            calls.push(key.clone());
            attempt
        };

        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }

        match self.scripts.get(&key) {
            Some(script) if !script.is_empty() => script[attempt.min(script.len() - 1)].clone(),
            _ => Ok(HttpResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}
