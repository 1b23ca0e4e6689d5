// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Runtime configuration
//!
//! Everything is read from environment variables (a `.env` file is loaded by
//! the binary before this runs). Credentials for the hosted services are only
//! required when live answers are needed; routing works without them.

use std::path::PathBuf;

use crate::error::{OmbeeError, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./ombee.db";
pub const DEFAULT_PINECONE_ENVIRONMENT: &str = "us-east-1";
pub const DEFAULT_PINECONE_INDEX: &str = "ombee-holistic";
pub const DEFAULT_EMBED_MODEL: &str = "embed-english-v3.0";
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TOP_K: usize = 5;

pub const APP_NAME: &str = "Ombee AI";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub pinecone_api_key: Option<String>,
    pub pinecone_environment: String,
    pub pinecone_index_name: String,
    pub pinecone_index_host: Option<String>,
    pub cohere_api_key: Option<String>,
    pub cohere_embed_model: String,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub retrieval_top_k: usize,
    pub trace_file: Option<PathBuf>,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            pinecone_api_key: None,
            pinecone_environment: DEFAULT_PINECONE_ENVIRONMENT.to_string(),
            pinecone_index_name: DEFAULT_PINECONE_INDEX.to_string(),
            pinecone_index_host: None,
            cohere_api_key: None,
            cohere_embed_model: DEFAULT_EMBED_MODEL.to_string(),
            groq_api_key: None,
            groq_model: DEFAULT_CHAT_MODEL.to_string(),
            retrieval_top_k: DEFAULT_TOP_K,
            trace_file: None,
            debug: false,
        }
    }
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let retrieval_top_k = match get("RETRIEVAL_TOP_K") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(k) if k > 0 => k,
                _ => {
                    return Err(OmbeeError::InvalidConfig {
                        key: "RETRIEVAL_TOP_K".to_string(),
                        value: raw,
                    })
                }
            },
            None => defaults.retrieval_top_k,
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            pinecone_api_key: get("PINECONE_API_KEY"),
            pinecone_environment: get("PINECONE_ENVIRONMENT")
                .unwrap_or(defaults.pinecone_environment),
            pinecone_index_name: get("PINECONE_INDEX_NAME").unwrap_or(defaults.pinecone_index_name),
            pinecone_index_host: get("PINECONE_INDEX_HOST"),
            cohere_api_key: get("COHERE_API_KEY"),
            cohere_embed_model: get("COHERE_EMBED_MODEL").unwrap_or(defaults.cohere_embed_model),
            groq_api_key: get("GROQ_API_KEY"),
            groq_model: get("GROQ_MODEL").unwrap_or(defaults.groq_model),
            retrieval_top_k,
            trace_file: get("OMBEE_TRACE_FILE").map(PathBuf::from),
            debug: get("DEBUG")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// Fail with the first missing credential needed for live answers
    pub fn require_live(&self) -> Result<()> {
        let required = [
            ("PINECONE_API_KEY", &self.pinecone_api_key),
            ("COHERE_API_KEY", &self.cohere_api_key),
            ("GROQ_API_KEY", &self.groq_api_key),
        ];

        for (key, value) in required {
            if value.is_none() {
                return Err(OmbeeError::MissingConfig(key.to_string()));
            }
        }
        Ok(())
    }

    /// SQLite file path from `DATABASE_URL`
    pub fn database_path(&self) -> Result<PathBuf> {
        parse_database_url(&self.database_url)
    }
}

/// Accepts SQLAlchemy-style URLs (`sqlite:///relative.db`,
/// `sqlite:////absolute.db`), `sqlite://path`, or a bare path.
pub fn parse_database_url(url: &str) -> Result<PathBuf> {
    let url = url.trim();

    if let Some(rest) = url.strip_prefix("sqlite:///") {
        return non_empty_path(rest, url);
    }
    if let Some(rest) = url.strip_prefix("sqlite://") {
        return non_empty_path(rest, url);
    }
    if url.contains("://") {
        return Err(OmbeeError::UnsupportedDatabase(url.to_string()));
    }
    non_empty_path(url, url)
}

fn non_empty_path(path: &str, url: &str) -> Result<PathBuf> {
    if path.is_empty() {
        Err(OmbeeError::InvalidConfig {
            key: "DATABASE_URL".to_string(),
            value: url.to_string(),
        })
    } else {
        Ok(PathBuf::from(path))
    }
}
