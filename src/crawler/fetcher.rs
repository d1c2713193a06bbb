//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with a descriptive user agent string
//! - GET requests for HTML pages and binary image bodies
//! - Error classification (HTTP status vs network failure)
//!
//! Every request gets exactly one attempt. Callers treat any failure as "this
//! branch produced nothing" and move on.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult<T> {
    /// Successfully fetched the resource
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: T,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, broken body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl<T> FetchResult<T> {
    /// Returns the body on success, None otherwise
    pub fn into_body(self) -> Option<T> {
        match self {
            FetchResult::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Human-readable description of a failed fetch
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            FetchResult::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Formats the user agent string: `Name/Version` or `Name/Version (+ContactURL)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    match &config.contact_url {
        Some(contact_url) => format!(
            "{}/{} (+{})",
            config.crawler_name, config.crawler_version, contact_url
        ),
        None => format!("{}/{}", config.crawler_name, config.crawler_version),
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Optional per-request timeout; None leaves requests unbounded
///
/// # Example
///
/// ```no_run
/// use catalog_scraper::config::UserAgentConfig;
/// use catalog_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Option<Duration>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent_string(config))
        .gzip(true)
        .brotli(true);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Fetches a page and returns its body as text
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult<String> {
    match send(client, url).await {
        Ok((final_url, status_code, response)) => match response.text().await {
            Ok(body) => FetchResult::Success {
                final_url,
                status_code,
                body,
            },
            Err(e) => FetchResult::NetworkError {
                error: e.to_string(),
            },
        },
        Err(failure) => failure,
    }
}

/// Fetches a binary resource (an image) and returns its raw bytes
pub async fn fetch_bytes(client: &Client, url: &Url) -> FetchResult<Vec<u8>> {
    match send(client, url).await {
        Ok((final_url, status_code, response)) => match response.bytes().await {
            Ok(body) => FetchResult::Success {
                final_url,
                status_code,
                body: body.to_vec(),
            },
            Err(e) => FetchResult::NetworkError {
                error: e.to_string(),
            },
        },
        Err(failure) => failure,
    }
}

/// Fetches a page, logging any failure
///
/// Returns the final URL (after redirects) and the body, or None when the
/// fetch failed. The final URL is the base that relative links on the page
/// resolve against.
pub async fn fetch_page(client: &Client, url: &Url) -> Option<(Url, String)> {
    match fetch_url(client, url).await {
        FetchResult::Success {
            final_url, body, ..
        } => Some((final_url, body)),
        failure => {
            tracing::warn!(
                "Failed to fetch {}: {}",
                url,
                failure.failure_reason().unwrap_or_default()
            );
            None
        }
    }
}

/// Sends a GET request and classifies the status
async fn send<T>(
    client: &Client,
    url: &Url,
) -> Result<(Url, u16, reqwest::Response), FetchResult<T>> {
    let response = client.get(url.clone()).send().await.map_err(|e| {
        let error = if e.is_timeout() {
            "Request timeout".to_string()
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else {
            e.to_string()
        };
        FetchResult::NetworkError { error }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchResult::HttpError {
            status_code: status.as_u16(),
        });
    }

    Ok((response.url().clone(), status.as_u16(), response))
}
