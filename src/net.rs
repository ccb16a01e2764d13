// modcat: Mod Catalog Aggregator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP plumbing shared by every source and the webhook transport.
//!
//! ```text
//! HttpRequest::get(url) / ::post(url)
//!   .header() .bearer() .timeout()
//!        |
//!        +--------------+--------------+
//!        v              v              v
//!   fetch_string()  fetch_json<T>()  send_json(&body)
//!
//! Global client: OnceLock, connection pool, keep-alive
//! Timeouts:      per request, surfaced as NetworkError::Timeout
//! ```

use crate::error::{CatalogResult, NetworkError};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Global HTTP client - initialized once, reused across all requests.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("modcat/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Async HTTP request with builder pattern.
///
/// # Example
/// ```ignore
/// use modcat::net::HttpRequest;
///
/// let releases: Vec<GitHubRelease> = HttpRequest::get(url)
///     .bearer(token)
///     .fetch_json()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpRequest {
    client: Client,
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
}

impl HttpRequest {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            client: global_client().clone(),
            method,
            url: url.into(),
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Add a custom header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add an `Authorization: Bearer` header.
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn builder(&self) -> RequestBuilder {
        let mut request = self
            .client
            .request(self.method.clone(), &self.url)
            .timeout(self.timeout);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }

    fn map_send_error(&self, err: reqwest::Error) -> NetworkError {
        if err.is_timeout() {
            NetworkError::Timeout {
                url: self.url.clone(),
            }
        } else {
            NetworkError::Reqwest(err)
        }
    }

    async fn send(&self, request: RequestBuilder) -> CatalogResult<Response> {
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: self.url.clone(),
            }
            .into());
        }

        Ok(response)
    }

    /// Perform the request and return the body as string.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or returns a
    /// non-success status code.
    pub async fn fetch_string(&self) -> CatalogResult<String> {
        let response = self.send(self.builder()).await?;
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;
        Ok(text)
    }

    /// Perform the request and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, returns a
    /// non-success status code, or the body does not decode into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self) -> CatalogResult<T> {
        let text = self.fetch_string().await?;
        serde_json::from_str(&text).map_err(|e| {
            NetworkError::Decode {
                url: self.url.clone(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Send `body` as JSON, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or returns a
    /// non-success status code.
    pub async fn send_json<B: Serialize + Sync>(&self, body: &B) -> CatalogResult<()> {
        self.send(self.builder().json(body)).await?;
        Ok(())
    }
}
