// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! User command implementations

use anyhow::Result;
use colored::*;

use super::{load_config, open_store};
use crate::database::to_rfc3339;
use crate::error::OmbeeError;

/// Register a user
pub fn user_create(
    name: &str,
    email: Option<&str>,
    conditions: &[String],
    database: Option<&str>,
) -> Result<()> {
    let store = open_store(&load_config(database)?)?;

    let preferences = if conditions.is_empty() {
        serde_json::json!({})
    } else {
        serde_json::json!({ "conditions": conditions })
    };
    let user = store.create_user(email, Some(name), Some(preferences))?;

    println!(
        "{} Created user {} ({})",
        "[OK]".green().bold(),
        user.name.bold(),
        user.user_id.cyan()
    );
    Ok(())
}

/// Show a user by ID or email
pub fn user_show(user: &str, database: Option<&str>) -> Result<()> {
    let store = open_store(&load_config(database)?)?;

    let found = match store.get_user(user)? {
        Some(u) => Some(u),
        None if user.contains('@') => store.get_user_by_email(user)?,
        None => None,
    };
    let found = found.ok_or_else(|| OmbeeError::UserNotFound(user.to_string()))?;
    let profile = found.profile();

    println!("{}", found.name.bold());
    println!("  {:<12} {}", "ID:", found.user_id);
    println!(
        "  {:<12} {}",
        "Email:",
        found.email.as_deref().unwrap_or("-")
    );
    println!("  {:<12} {}", "Created:", to_rfc3339(found.created_at));
    println!(
        "  {:<12} {}",
        "Conditions:",
        if profile.is_empty() {
            "-".to_string()
        } else {
            profile.conditions.join(", ")
        }
    );

    Ok(())
}
