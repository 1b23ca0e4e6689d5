// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Query traces
//!
//! One record per chat turn: routing decision, answer, sources, timings and
//! any error. Traces always go to the log (target `ombee::trace`) and can
//! also be appended to a local JSONL file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::ResponseStatus;
use crate::providers::common::truncate_chars;
use crate::routing::Domain;

const MAX_RESPONSE_CHARS: usize = 2000;
const MAX_CONTEXT_CHARS: usize = 1000;
const MAX_TOP_SOURCES: usize = 10;

/// Log target for trace records
pub const TRACE_TARGET: &str = "ombee::trace";

/// A single chat turn as seen by monitoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTrace {
    pub query: String,
    pub domain: Domain,
    pub confidence: f64,
    pub status: ResponseStatus,
    /// Truncated answer text
    pub response: String,
    pub num_sources: usize,
    pub top_sources: Vec<String>,
    /// Truncated retrieval context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_snippet: Option<String>,
    pub latency_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC 3339
    pub timestamp: String,
}

impl QueryTrace {
    pub fn new(
        query: &str,
        domain: Domain,
        confidence: f64,
        status: ResponseStatus,
        response: &str,
        sources: &[String],
        latency: Duration,
    ) -> Self {
        Self {
            query: query.to_string(),
            domain,
            confidence,
            status,
            response: truncate_chars(response, MAX_RESPONSE_CHARS).to_string(),
            num_sources: sources.len(),
            top_sources: sources.iter().take(MAX_TOP_SOURCES).cloned().collect(),
            context_snippet: None,
            latency_ms: millis(latency),
            retrieval_ms: None,
            generation_ms: None,
            total_tokens: None,
            user_id: None,
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn with_context(mut self, context: &str) -> Self {
        if !context.is_empty() {
            self.context_snippet = Some(truncate_chars(context, MAX_CONTEXT_CHARS).to_string());
        }
        self
    }

    pub fn with_timings(mut self, retrieval: Option<Duration>, generation: Option<Duration>) -> Self {
        self.retrieval_ms = retrieval.map(millis);
        self.generation_ms = generation.map(millis);
        self
    }

    pub fn with_tokens(mut self, total_tokens: Option<u32>) -> Self {
        self.total_tokens = total_tokens;
        self
    }

    pub fn with_user(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.map(String::from);
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Records query traces
#[derive(Debug, Default)]
pub struct QueryTracer {
    path: Option<PathBuf>,
    lock: Mutex<()>,
}

impl QueryTracer {
    /// Log-only tracer
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracer that also appends JSON lines to `path`
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            lock: Mutex::new(()),
        }
    }

    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::with_file(p),
            None => Self::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a trace. Sink failures are logged, never returned.
    pub fn record(&self, trace: &QueryTrace) {
        log::info!(
            target: TRACE_TARGET,
            "domain={} confidence={:.2} status={} sources={} latency_ms={:.1}{}",
            trace.domain,
            trace.confidence,
            trace.status,
            trace.num_sources,
            trace.latency_ms,
            trace
                .error
                .as_deref()
                .map(|e| format!(" error={}", e))
                .unwrap_or_default()
        );

        if let Some(path) = &self.path {
            if let Err(e) = self.append(path, trace) {
                log::warn!("Failed to write query trace to {}: {}", path.display(), e);
            }
        }
    }

    fn append(&self, path: &Path, trace: &QueryTrace) -> Result<()> {
        let line = serde_json::to_string(trace)?;

        // Poisoning only means another writer panicked mid-append
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}
