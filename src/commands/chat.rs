// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Chat command implementations

use anyhow::{Context, Result};
use colored::*;

use super::load_config;
use crate::assistant::Assistant;
use crate::models::{ChatRequest, ResponseStatus};

/// Run one chat turn and print the answer
pub fn ask(
    query: &str,
    session: Option<&str>,
    user: Option<&str>,
    database: Option<&str>,
) -> Result<()> {
    let config = load_config(database)?;
    let assistant = Assistant::from_config(&config)
        .context("Live answers need PINECONE_API_KEY, COHERE_API_KEY and GROQ_API_KEY")?;

    let mut request = ChatRequest::new(query);
    if let Some(id) = session {
        request = request.in_session(id);
    }
    if let Some(id) = user {
        request = request.for_user(id);
    }

    let reply = assistant.chat(&request)?;

    let status = match reply.status {
        ResponseStatus::Live => reply.status.as_str().green(),
        ResponseStatus::Demo | ResponseStatus::ComingSoon => reply.status.as_str().yellow(),
        ResponseStatus::Error => reply.status.as_str().red(),
    };

    println!(
        "{} {} ({:.0}%) [{}]",
        "[>]".blue().bold(),
        reply.domain.display_name().bold(),
        reply.confidence * 100.0,
        status
    );
    println!();
    println!("{}", reply.response);

    if !reply.sources.is_empty() {
        println!();
        println!("{}", "Sources:".bold());
        for source in &reply.sources {
            println!("  - {}", source);
        }
    }

    println!();
    println!("{} {}", "Session:".dimmed(), reply.session_id.cyan());

    Ok(())
}
