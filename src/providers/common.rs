// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! HTTP plumbing shared by the hosted service clients

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::error::{OmbeeError, Result};

/// HTTP client configuration for hosted services
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("ombee/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Build a configured HTTP client
pub fn build_http_client(config: &HttpClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(&config.user_agent)
        .build()
        .map_err(OmbeeError::from)
}

/// Pass successful responses through; turn anything else into a provider
/// error carrying the status and body.
pub fn ensure_success(provider: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(OmbeeError::provider(
        provider,
        format!("HTTP {}: {}", status, truncate_chars(body.trim(), 500)),
    ))
}

/// First `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
