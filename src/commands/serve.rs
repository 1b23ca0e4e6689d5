// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! API server command

use anyhow::{Context, Result};
use colored::*;

use super::load_config;
use crate::api::{self, AppState, ComponentStatus, ServerConfig};
use crate::assistant::Assistant;

/// Start the HTTP API server and block until it stops
pub fn serve(host: String, port: u16, database: Option<&str>) -> Result<()> {
    let config = load_config(database)?;
    let assistant = Assistant::from_config(&config)
        .context("The API server needs PINECONE_API_KEY, COHERE_API_KEY and GROQ_API_KEY")?;
    let state = AppState::new(assistant, ComponentStatus::from_config(&config));

    println!("{} Ombee API server starting...", "[*]".blue().bold());
    println!("   Address: http://{}:{}", host, port);
    println!("   Database: {}", config.database_url);
    println!();
    println!("{}", "[*] Endpoints:".bold());
    println!("   GET    /api/health                  - Component status");
    println!("   POST   /api/sessions/create         - Create a session");
    println!("   POST   /api/chat                    - Ask a question");
    println!("   GET    /api/sessions/:id/messages   - Message history");
    println!("   DELETE /api/sessions/:id            - Delete a session");
    println!("   POST   /api/route                   - Explain routing");
    println!();
    println!("Press Ctrl+C to stop the server...");

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    rt.block_on(api::start_server(ServerConfig { host, port }, state))
}
