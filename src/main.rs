// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Ombee AI - Main entry point
//!
//! A CLI for routing questions across Ombee domains, chatting with the
//! assistant and running its HTTP API.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ombee::cli::{Cli, Commands, SessionCommands, UserCommands};
use ombee::commands;

/// Log to stderr so command output on stdout stays machine readable
fn init_logging() {
    let debug = std::env::var("DEBUG")
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let default_filter = if debug { "debug" } else { "info" };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        // ====================================================================
        // Routing Commands
        // ====================================================================
        Commands::Route { query, json } => commands::route_query(&query, json),
        Commands::Explain { query, json } => commands::explain_query(&query, json),

        // ====================================================================
        // Chat Commands
        // ====================================================================
        Commands::Ask {
            query,
            session,
            user,
            database,
        } => commands::ask(
            &query,
            session.as_deref(),
            user.as_deref(),
            database.as_deref(),
        ),

        Commands::Session { command, database } => match command {
            SessionCommands::New { user } => {
                commands::session_new(user.as_deref(), database.as_deref())
            }
            SessionCommands::History { session_id, limit } => {
                commands::session_history(&session_id, limit, database.as_deref())
            }
            SessionCommands::Delete { session_id } => {
                commands::session_delete(&session_id, database.as_deref())
            }
        },

        Commands::User { command, database } => match command {
            UserCommands::Create {
                name,
                email,
                conditions,
            } => commands::user_create(&name, email.as_deref(), &conditions, database.as_deref()),
            UserCommands::Show { user } => commands::user_show(&user, database.as_deref()),
        },

        // ====================================================================
        // Status Commands
        // ====================================================================
        Commands::Config => commands::show_config(),

        // ====================================================================
        // API Server Commands
        // ====================================================================
        Commands::Serve {
            host,
            port,
            database,
        } => commands::serve(host, port, database.as_deref()),
    }
}
