// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Hosted service integrations for the holistic domain
//!
//! Live answers need two collaborators:
//!
//! ## Retrieval
//! - Cohere (query embeddings)
//! - Pinecone (vector index of the holistic knowledge base)
//!
//! ## Generation
//! - Groq (OpenAI-compatible chat completions)

pub mod cohere;
pub mod common;
pub mod groq;
pub mod pinecone;
pub mod vector;

#[cfg(test)]
pub(crate) mod stub;

pub use cohere::CohereEmbedder;
pub use common::{build_http_client, HttpClientConfig};
pub use groq::GroqGenerator;
pub use pinecone::PineconeIndex;
pub use vector::VectorRetriever;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::UserProfile;

/// Separator placed between retrieved passages
pub const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Context text used when retrieval finds nothing
pub const NO_CONTEXT: &str = "No relevant information found.";

/// Source for passages whose metadata lacks one
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Trait for knowledge base retrieval
pub trait Retriever: Send + Sync {
    /// Fetch up to `top_k` passages relevant to `query`
    fn retrieve(&self, query: &str, top_k: usize) -> Result<RetrievedContext>;
}

/// Trait for answer generation
pub trait Generator: Send + Sync {
    /// Produce an answer grounded in the request's context
    fn generate(&self, request: &GenerationRequest) -> Result<Generation>;
}

/// A single retrieved passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    pub source: String,
    pub score: f64,
}

/// Passages returned for one query
#[derive(Debug, Clone, Default)]
pub struct RetrievedContext {
    pub passages: Vec<Passage>,
    pub elapsed: Duration,
}

impl RetrievedContext {
    pub fn new(passages: Vec<Passage>) -> Self {
        Self {
            passages,
            elapsed: Duration::ZERO,
        }
    }

    /// Passage texts joined for the prompt
    pub fn context_text(&self) -> String {
        if self.passages.is_empty() {
            return NO_CONTEXT.to_string();
        }
        self.passages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR)
    }

    /// Human readable source labels, e.g. `guide.pdf (score: 0.87)`
    pub fn source_labels(&self) -> Vec<String> {
        self.passages
            .iter()
            .map(|p| format!("{} (score: {:.2})", p.source, p.score))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

/// Input to a generator
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub query: String,
    pub context: String,
    pub profile: Option<UserProfile>,
}

/// Generator output
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    pub elapsed: Duration,
    pub usage: Option<TokenUsage>,
}

/// Token accounting reported by the model host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(text: &str, source: &str, score: f64) -> Passage {
        Passage {
            text: text.to_string(),
            source: source.to_string(),
            score,
        }
    }

    #[test]
    fn test_empty_context_text() {
        let ctx = RetrievedContext::default();
        assert_eq!(ctx.context_text(), NO_CONTEXT);
        assert!(ctx.source_labels().is_empty());
    }

    #[test]
    fn test_context_text_joins_passages() {
        let ctx = RetrievedContext::new(vec![
            passage("Breathe slowly.", "breathing.pdf", 0.912),
            passage("Sleep eight hours.", "sleep.md", 0.5),
        ]);
        assert_eq!(
            ctx.context_text(),
            "Breathe slowly.\n\n---\n\nSleep eight hours."
        );
        assert_eq!(
            ctx.source_labels(),
            vec!["breathing.pdf (score: 0.91)", "sleep.md (score: 0.50)"]
        );
    }
}
