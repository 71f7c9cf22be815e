//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client from configuration
//! - GET requests with status checking
//! - Loading a fetched page into a parsed [`Page`]

use crate::config::{FetchConfig, UserAgentConfig};
use crate::crawler::parser::Page;
use crate::{Result, WikiscribeError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Formats the user agent header value
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// Without a `[user-agent]` section reqwest's defaults are kept, and without
/// `timeout-secs` a request waits as long as the server takes.
///
/// # Example
///
/// ```no_run
/// use wikiscribe::config::FetchConfig;
/// use wikiscribe::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    fetch: &FetchConfig,
    user_agent: Option<&UserAgentConfig>,
) -> std::result::Result<Client, reqwest::Error> {
    let mut builder = Client::builder().gzip(true).brotli(true);

    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(format_user_agent(user_agent));
    }

    if let Some(secs) = fetch.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a URL and returns the response body
///
/// # Errors
///
/// * `WikiscribeError::Http` - Transport failure or unreadable body
/// * `WikiscribeError::Status` - The server answered with a non-2xx status
pub async fn fetch_body(client: &Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| WikiscribeError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(WikiscribeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| WikiscribeError::Http {
        url: url.to_string(),
        source,
    })
}

/// Fetches a page and parses it into a [`Page`]
///
/// Every call goes to the network; nothing is cached.
pub async fn load_page(client: &Client, url: &str) -> Result<Page> {
    let url = Url::parse(url)?;
    tracing::debug!("Fetching {}", url);

    let body = fetch_body(client, &url).await?;
    tracing::trace!(bytes = body.len(), "Received {}", url);

    Ok(Page::parse(url, &body))
}
