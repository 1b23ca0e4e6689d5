// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Application state for the API server

use crate::assistant::Assistant;
use crate::config::Config;

/// Which hosted services have credentials
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentStatus {
    pub pinecone: bool,
    pub cohere: bool,
    pub groq: bool,
}

impl ComponentStatus {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pinecone: config.pinecone_api_key.is_some(),
            cohere: config.cohere_api_key.is_some(),
            groq: config.groq_api_key.is_some(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub assistant: Assistant,
    pub components: ComponentStatus,
}

impl AppState {
    pub fn new(assistant: Assistant, components: ComponentStatus) -> Self {
        Self {
            assistant,
            components,
        }
    }
}
