// src/core/net.rs
// Blocking HTTP GET. No retries here; callers decide what a failure means.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{Result, ScrapeError};

/// Anything that can turn a URL into bytes.
///
/// The acquirer only talks to this trait, so tests can swap in an in-memory
/// fake without a network.
pub trait Fetch {
    /// GET `url` and return the body.
    ///
    /// * `Network` when the connection fails or `timeout` elapses
    /// * `Http` when the server answers with a non-2xx status
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ScrapeError::Config(format!("could not build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// GET `url` with query pairs and return the body as text.
    pub fn get_text(&self, url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .map_err(|e| network(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Http { status: status.as_u16(), url: resp.url().to_string() });
        }
        resp.text().map_err(|e| network(url, e))
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| network(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Http { status: status.as_u16(), url: url.to_string() });
        }
        let bytes = resp.bytes().map_err(|e| network(url, e))?;
        Ok(bytes.to_vec())
    }
}

fn network(url: &str, e: reqwest::Error) -> ScrapeError {
    ScrapeError::Network { url: url.to_string(), reason: e.to_string() }
}
