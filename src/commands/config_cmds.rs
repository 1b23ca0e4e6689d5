// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Configuration status command

use anyhow::Result;
use colored::*;

use crate::config::{Config, APP_NAME};

fn secret_status(value: &Option<String>) -> ColoredString {
    if value.is_some() {
        "set".green()
    } else {
        "missing".red()
    }
}

/// Print which settings are present. Secret values are never printed.
pub fn show_config() -> Result<()> {
    let config = Config::from_env()?;

    println!("{} {}", APP_NAME.bold(), env!("CARGO_PKG_VERSION").dimmed());
    println!();

    println!("{}", "Storage".bold());
    println!("  {:<22} {}", "DATABASE_URL", config.database_url);
    match config.database_path() {
        Ok(path) => println!("  {:<22} {}", "database path", path.display()),
        Err(e) => println!("  {:<22} {}", "database path", e.to_string().red()),
    }

    println!();
    println!("{}", "Retrieval".bold());
    println!("  {:<22} {}", "PINECONE_API_KEY", secret_status(&config.pinecone_api_key));
    println!("  {:<22} {}", "PINECONE_ENVIRONMENT", config.pinecone_environment);
    println!("  {:<22} {}", "PINECONE_INDEX_NAME", config.pinecone_index_name);
    println!(
        "  {:<22} {}",
        "PINECONE_INDEX_HOST",
        config
            .pinecone_index_host
            .as_deref()
            .unwrap_or("(resolved by index name)")
    );
    println!("  {:<22} {}", "COHERE_API_KEY", secret_status(&config.cohere_api_key));
    println!("  {:<22} {}", "COHERE_EMBED_MODEL", config.cohere_embed_model);
    println!("  {:<22} {}", "RETRIEVAL_TOP_K", config.retrieval_top_k);

    println!();
    println!("{}", "Generation".bold());
    println!("  {:<22} {}", "GROQ_API_KEY", secret_status(&config.groq_api_key));
    println!("  {:<22} {}", "GROQ_MODEL", config.groq_model);

    println!();
    println!("{}", "Diagnostics".bold());
    println!(
        "  {:<22} {}",
        "OMBEE_TRACE_FILE",
        config
            .trace_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(log only)".to_string())
    );
    println!("  {:<22} {}", "DEBUG", config.debug);

    println!();
    match config.require_live() {
        Ok(()) => println!("{} Live answers are available", "[OK]".green().bold()),
        Err(e) => println!("{} {}; only routing, demo and coming-soon answers work", "[!]".yellow().bold(), e),
    }

    Ok(())
}
