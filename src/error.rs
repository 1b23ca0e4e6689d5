// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Error types for ombee

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OmbeeError {
    #[error("Missing required environment variable: {0}")]
    MissingConfig(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("Unsupported database URL: {0} (only sqlite is supported)")]
    UnsupportedDatabase(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("{provider} request failed: {message}")]
    Provider { provider: String, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
}

impl OmbeeError {
    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        OmbeeError::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OmbeeError>;
