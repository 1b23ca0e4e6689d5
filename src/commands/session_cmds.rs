// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Session command implementations

use anyhow::Result;
use colored::*;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use super::{load_config, open_store};
use crate::error::OmbeeError;
use crate::providers::common::truncate_chars;

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Content")]
    content: String,
}

/// Create a session, optionally owned by a registered user
pub fn session_new(user: Option<&str>, database: Option<&str>) -> Result<()> {
    let store = open_store(&load_config(database)?)?;
    if let Some(id) = user {
        if store.get_user(id)?.is_none() {
            return Err(OmbeeError::UserNotFound(id.to_string()).into());
        }
    }
    let session = store.create_session(user)?;

    println!(
        "{} Created session {}",
        "[OK]".green().bold(),
        session.session_id.cyan()
    );
    Ok(())
}

/// Print the latest messages of a session
pub fn session_history(session_id: &str, limit: usize, database: Option<&str>) -> Result<()> {
    let store = open_store(&load_config(database)?)?;
    if store.get_session(session_id)?.is_none() {
        return Err(OmbeeError::SessionNotFound(session_id.to_string()).into());
    }

    let messages = store.recent_messages(session_id, limit)?;
    if messages.is_empty() {
        println!("{} No messages in session {}", "[i]".blue(), session_id);
        return Ok(());
    }

    let rows: Vec<MessageRow> = messages
        .iter()
        .map(|m| MessageRow {
            time: m.timestamp(),
            role: m.role.to_string(),
            domain: m
                .metadata
                .domain
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            content: {
                let content = m.content.replace('\n', " ");
                let short = truncate_chars(&content, 60);
                if short.len() < content.len() {
                    format!("{}...", short)
                } else {
                    content
                }
            },
        })
        .collect();

    let table = Table::new(rows).with(TableStyle::ascii_rounded()).to_string();
    println!("{}", table);
    println!();
    let total = store.count_messages(session_id)?;
    println!(
        "{} Showing {} of {} message(s)",
        "[i]".blue(),
        messages.len(),
        total
    );

    Ok(())
}

/// Delete a session and its messages
pub fn session_delete(session_id: &str, database: Option<&str>) -> Result<()> {
    let store = open_store(&load_config(database)?)?;
    if !store.delete_session(session_id)? {
        return Err(OmbeeError::SessionNotFound(session_id.to_string()).into());
    }

    println!(
        "{} Deleted session {}",
        "[OK]".green().bold(),
        session_id.cyan()
    );
    Ok(())
}
