//! Common utilities shared across tool definitions.

use anyhow::Context;
use reqwest::Client;

use crate::core::config::UpstreamConfig;
use crate::domains::tools::envelope::ContentItem;

/// Build the HTTP client shared by the network tools.
///
/// No request timeout is configured: an upstream that never answers stalls
/// only the invocation waiting on it.
pub fn http_client(upstream: &UpstreamConfig) -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(upstream.user_agent.clone())
        .build()
        .context("Failed to build HTTP client")
}

/// A single text item, the content shape of every text tool.
pub fn text_content(text: impl Into<String>) -> Vec<ContentItem> {
    vec![ContentItem::text(text)]
}

/// Join a base URL and an already encoded query string.
pub fn with_query(base: &str, query: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}
