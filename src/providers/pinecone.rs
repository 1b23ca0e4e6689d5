// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Pinecone vector index queries
//!
//! API Reference: https://docs.pinecone.io/reference/api/data-plane/query

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::common::{build_http_client, ensure_success, HttpClientConfig};
use super::{Passage, UNKNOWN_SOURCE};
use crate::error::{OmbeeError, Result};

const PROVIDER: &str = "pinecone";
const CONTROL_PLANE: &str = "https://api.pinecone.io";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest<'a> {
    pub vector: &'a [f32],
    pub top_k: usize,
    pub include_metadata: bool,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
pub struct QueryMatch {
    pub id: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl QueryMatch {
    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }

    /// Convert to a passage; missing text becomes empty, missing source
    /// becomes `Unknown`.
    pub fn into_passage(self) -> Passage {
        Passage {
            text: self.metadata_str("text").unwrap_or_default().to_string(),
            source: self
                .metadata_str("source")
                .unwrap_or(UNKNOWN_SOURCE)
                .to_string(),
            score: self.score,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

/// A Pinecone index, addressed by name
pub struct PineconeIndex {
    client: Client,
    api_key: String,
    index_name: String,
    control_plane: String,
    host: OnceCell<String>,
}

impl PineconeIndex {
    pub fn new(api_key: impl Into<String>, index_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(&HttpClientConfig::default())?,
            api_key: api_key.into(),
            index_name: index_name.into(),
            control_plane: CONTROL_PLANE.to_string(),
            host: OnceCell::new(),
        })
    }

    /// Use a known data-plane host instead of looking it up
    pub fn with_host(self, host: impl Into<String>) -> Self {
        let host = normalize_host(&host.into());
        let cell = OnceCell::new();
        let _ = cell.set(host);
        Self { host: cell, ..self }
    }

    /// Describe indexes through a different control plane URL
    pub fn with_control_plane(mut self, url: impl Into<String>) -> Self {
        self.control_plane = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Data-plane base URL, described once via the control plane
    pub fn host(&self) -> Result<&str> {
        self.host
            .get_or_try_init(|| {
                log::debug!("Describing Pinecone index {}", self.index_name);
                let response = self
                    .client
                    .get(format!("{}/indexes/{}", self.control_plane, self.index_name))
                    .header("Api-Key", &self.api_key)
                    .header("Accept", "application/json")
                    .send()?;
                let described: IndexDescription = ensure_success(PROVIDER, response)?.json()?;
                Ok::<_, OmbeeError>(normalize_host(&described.host))
            })
            .map(String::as_str)
    }

    /// Nearest neighbours of `vector`
    pub fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<Passage>> {
        let host = self.host()?;
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self
            .client
            .post(format!("{}/query", host))
            .header("Api-Key", &self.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()?;

        let parsed: QueryResponse = ensure_success(PROVIDER, response)?.json()?;
        Ok(parsed
            .matches
            .into_iter()
            .map(QueryMatch::into_passage)
            .collect())
    }
}

/// Index hosts are reported without a scheme; HTTPS unless one is given.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
