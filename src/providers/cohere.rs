// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Cohere query embeddings
//!
//! API Reference: https://docs.cohere.com/reference/embed

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::common::{build_http_client, ensure_success, HttpClientConfig};
use crate::error::{OmbeeError, Result};

const PROVIDER: &str = "cohere";
const DEFAULT_ENDPOINT: &str = "https://api.cohere.com";

/// Input type for embeddings used as queries against a document index
pub const SEARCH_QUERY: &str = "search_query";

#[derive(Debug, Serialize)]
pub struct EmbedRequest<'a> {
    pub texts: Vec<&'a str>,
    pub model: &'a str,
    pub input_type: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct EmbedResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub embeddings: Vec<Vec<f32>>,
}

/// Embeds queries with a Cohere model
pub struct CohereEmbedder {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl CohereEmbedder {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(&HttpClientConfig::default())?,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Point at a different API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Embed one search query
    pub fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let body = EmbedRequest {
            texts: vec![query],
            model: &self.model,
            input_type: SEARCH_QUERY,
        };

        let response = self
            .client
            .post(format!("{}/v1/embed", self.endpoint))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()?;

        let parsed: EmbedResponse = ensure_success(PROVIDER, response)?.json()?;
        first_embedding(parsed)
    }
}

fn first_embedding(response: EmbedResponse) -> Result<Vec<f32>> {
    response
        .embeddings
        .into_iter()
        .next()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| OmbeeError::provider(PROVIDER, "response contained no embeddings"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::stub::StubServer;

    #[test]
    fn test_embed_request_shape() {
        let body = EmbedRequest {
            texts: vec!["how do I sleep better"],
            model: "embed-english-v3.0",
            input_type: SEARCH_QUERY,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["texts"][0], "how do I sleep better");
        assert_eq!(json["model"], "embed-english-v3.0");
        assert_eq!(json["input_type"], "search_query");
    }

    #[test]
    fn test_first_embedding() {
        let parsed: EmbedResponse = serde_json::from_str(
            r#"{"id": "abc", "embeddings": [[0.1, -0.2, 0.3]], "meta": {}}"#,
        )
        .unwrap();
        assert_eq!(first_embedding(parsed).unwrap(), vec![0.1, -0.2, 0.3]);

        let empty: EmbedResponse = serde_json::from_str(r#"{"embeddings": []}"#).unwrap();
        assert!(matches!(
            first_embedding(empty),
            Err(OmbeeError::Provider { .. })
        ));
    }

    #[test]
    fn test_embed_query_against_endpoint() {
        let stub = StubServer::start(
            200,
            serde_json::json!({"id": "e1", "embeddings": [[0.5, 0.25]], "meta": {}}),
        );
        let embedder = CohereEmbedder::new("co-key", "embed-english-v3.0")
            .unwrap()
            .with_endpoint(format!("{}/", stub.base_url));

        assert_eq!(embedder.embed_query("sleep tips").unwrap(), vec![0.5, 0.25]);

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/v1/embed");
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer co-key"));
        assert_eq!(requests[0].body["texts"][0], "sleep tips");
        assert_eq!(requests[0].body["input_type"], "search_query");
    }

    #[test]
    fn test_embed_query_rejected() {
        let stub = StubServer::start(401, serde_json::json!({"message": "invalid api token"}));
        let embedder = CohereEmbedder::new("bad", "embed-english-v3.0")
            .unwrap()
            .with_endpoint(stub.base_url.clone());

        let err = embedder.embed_query("sleep tips").unwrap_err();
        assert!(matches!(err, OmbeeError::Provider { ref provider, .. } if provider == "cohere"));
        let message = err.to_string();
        assert!(message.contains("HTTP 401"));
        assert!(message.contains("invalid api token"));
    }
}
