// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Groq answer generation over the OpenAI Chat Completions API

use std::time::Instant;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::common::{build_http_client, ensure_success, HttpClientConfig};
use super::{Generation, GenerationRequest, Generator, TokenUsage};
use crate::config::Config;
use crate::error::{OmbeeError, Result};
use crate::models::UserProfile;

const PROVIDER: &str = "groq";
const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 500;

pub const SYSTEM_PROMPT: &str = "\
You are Ombee, a knowledgeable and empathetic AI health assistant specializing in holistic wellness, nutrition, and daily health longevity.

Your role:
- Provide evidence-based health and wellness guidance based on the provided context
- Be supportive, encouraging, and conversational
- Always remind users you are not a substitute for professional medical advice
- Cite the context when making specific health claims
- If the context doesn't contain relevant information, say so honestly

Important guidelines:
- NEVER diagnose medical conditions
- For serious health concerns, always recommend consulting a healthcare provider
- Base your advice primarily on the provided context
- Be friendly and approachable in tone
- Keep responses concise but informative (aim for 150-300 words)";

/// OpenAI chat message format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Build the user turn: retrieved context, optional health background,
/// then the question.
pub fn build_user_message(query: &str, context: &str, profile: Option<&UserProfile>) -> String {
    let background = match profile {
        Some(p) if !p.is_empty() => {
            format!("\n\nUser's health background: {}", p.conditions.join(", "))
        }
        _ => String::new(),
    };

    format!(
        "Context from Ombee knowledge base:\n{}\n{}\n\nUser question: {}\n\n\
Please provide a helpful, accurate response based primarily on the context above. \
If the context doesn't fully answer the question, acknowledge that and provide what information you can.",
        context, background, query
    )
}

/// Chat completions against Groq
pub struct GroqGenerator {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GroqGenerator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(&HttpClientConfig {
                timeout_secs: 60,
                ..HttpClientConfig::default()
            })?,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .groq_api_key
            .clone()
            .ok_or_else(|| OmbeeError::MissingConfig("GROQ_API_KEY".to_string()))?;
        Self::new(api_key, config.groq_model.clone())
    }

    /// Any OpenAI-compatible chat completions URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completion_request(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatCompletionMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatCompletionMessage {
                    role: "user".to_string(),
                    content: build_user_message(
                        &request.query,
                        &request.context,
                        request.profile.as_ref(),
                    ),
                },
            ],
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
        }
    }
}

impl Generator for GroqGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Generation> {
        let started = Instant::now();
        let body = self.completion_request(request);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let parsed: ChatCompletionResponse = ensure_success(PROVIDER, response)?.json()?;
        let usage = parsed.usage;
        let text = first_choice_text(parsed)?;

        let elapsed = started.elapsed();
        log::info!("Generated {} chars with {} in {:?}", text.len(), self.model, elapsed);

        Ok(Generation {
            text,
            elapsed,
            usage,
        })
    }
}

fn first_choice_text(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| OmbeeError::provider(PROVIDER, "response contained no choices"))
}
