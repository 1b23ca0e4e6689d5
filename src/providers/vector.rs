// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Vector search retriever (Cohere embeddings + Pinecone index)

use std::time::Instant;

use super::{CohereEmbedder, PineconeIndex, RetrievedContext, Retriever};
use crate::config::Config;
use crate::error::{OmbeeError, Result};

pub struct VectorRetriever {
    embedder: CohereEmbedder,
    index: PineconeIndex,
}

impl VectorRetriever {
    pub fn new(embedder: CohereEmbedder, index: PineconeIndex) -> Self {
        Self { embedder, index }
    }

    /// Build from configuration; both API keys must be present
    pub fn from_config(config: &Config) -> Result<Self> {
        let cohere_key = config
            .cohere_api_key
            .clone()
            .ok_or_else(|| OmbeeError::MissingConfig("COHERE_API_KEY".to_string()))?;
        let pinecone_key = config
            .pinecone_api_key
            .clone()
            .ok_or_else(|| OmbeeError::MissingConfig("PINECONE_API_KEY".to_string()))?;

        let embedder = CohereEmbedder::new(cohere_key, config.cohere_embed_model.clone())?;
        let mut index = PineconeIndex::new(pinecone_key, config.pinecone_index_name.clone())?;
        if let Some(host) = &config.pinecone_index_host {
            index = index.with_host(host.clone());
        }

        Ok(Self::new(embedder, index))
    }
}

impl Retriever for VectorRetriever {
    fn retrieve(&self, query: &str, top_k: usize) -> Result<RetrievedContext> {
        let started = Instant::now();

        let vector = self.embedder.embed_query(query)?;
        log::debug!("Embedded query with {} ({} dims)", self.embedder.model(), vector.len());

        let passages = self.index.query(&vector, top_k)?;
        for passage in &passages {
            log::debug!("  {} ({:.2})", passage.source, passage.score);
        }

        let elapsed = started.elapsed();
        log::info!(
            "Retrieved {} passages from {} in {:?}",
            passages.len(),
            self.index.index_name(),
            elapsed
        );

        Ok(RetrievedContext { passages, elapsed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::stub::StubServer;

    #[test]
    fn test_from_config_requires_keys() {
        let config = Config {
            pinecone_api_key: Some("pc".to_string()),
            ..Config::default()
        };
        match VectorRetriever::from_config(&config) {
            Err(OmbeeError::MissingConfig(key)) => assert_eq!(key, "COHERE_API_KEY"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected missing key"),
        }
    }

    #[test]
    fn test_from_config_with_keys() {
        let config = Config {
            pinecone_api_key: Some("pc".to_string()),
            cohere_api_key: Some("co".to_string()),
            pinecone_index_host: Some("idx.svc.pinecone.io".to_string()),
            ..Config::default()
        };
        let retriever = VectorRetriever::from_config(&config).unwrap();
        assert_eq!(retriever.index.host().unwrap(), "https://idx.svc.pinecone.io");
    }

    #[test]
    fn test_retrieve_embeds_then_queries() {
        let cohere = StubServer::start(200, serde_json::json!({"embeddings": [[0.3, 0.4]]}));
        let pinecone = StubServer::start(
            200,
            serde_json::json!({
                "matches": [
                    {"id": "1", "score": 0.82, "metadata": {"text": "Magnesium may help.", "source": "sleep.pdf"}},
                    {"id": "2", "score": 0.40, "metadata": {"text": "Limit caffeine."}}
                ]
            }),
        );
        let retriever = VectorRetriever::new(
            CohereEmbedder::new("co", "embed-english-v3.0")
                .unwrap()
                .with_endpoint(cohere.base_url.clone()),
            PineconeIndex::new("pc", "ombee-holistic")
                .unwrap()
                .with_host(pinecone.base_url.clone()),
        );

        let context = retriever.retrieve("magnesium for sleep", 2).unwrap();
        assert_eq!(
            context.source_labels(),
            vec!["sleep.pdf (score: 0.82)", "Unknown (score: 0.40)"]
        );
        assert_eq!(pinecone.requests()[0].body["vector"][1].as_f64().unwrap() as f32, 0.4);
        assert_eq!(pinecone.requests()[0].body["topK"], 2);
    }
}
