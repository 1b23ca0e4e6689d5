// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! CLI argument definitions using clap derive macros

use clap::{Parser, Subcommand};

/// Ombee AI - multi-domain assistant for wellness, finance and wireless questions
#[derive(Parser)]
#[command(name = "ombee")]
#[command(author = "Nervosys")]
#[command(version)]
#[command(about = "Route and answer questions across Ombee domains", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // ============================================================================
    // Routing Commands
    // ============================================================================
    /// Show which domain a question routes to
    Route {
        /// The question to route
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show domain scores, matched keywords and adjustments for a question
    Explain {
        /// The question to explain
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    // ============================================================================
    // Chat Commands
    // ============================================================================
    /// Ask the assistant a question (one chat turn)
    Ask {
        /// The question to ask
        query: String,

        /// Continue an existing session
        #[arg(short, long)]
        session: Option<String>,

        /// Answer on behalf of a user (uses their health background)
        #[arg(short, long)]
        user: Option<String>,

        /// Path to the database file (overrides DATABASE_URL)
        #[arg(long)]
        database: Option<String>,
    },

    /// Manage chat sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,

        /// Path to the database file (overrides DATABASE_URL)
        #[arg(long, global = true)]
        database: Option<String>,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,

        /// Path to the database file (overrides DATABASE_URL)
        #[arg(long, global = true)]
        database: Option<String>,
    },

    // ============================================================================
    // Status Commands
    // ============================================================================
    /// Show configuration status (never prints secret values)
    Config,

    // ============================================================================
    // API Server Commands
    // ============================================================================
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default: 0.0.0.0 for all interfaces)
        #[arg(long, env = "OMBEE_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "OMBEE_PORT", default_value = "8000")]
        port: u16,

        /// Path to the database file (overrides DATABASE_URL)
        #[arg(long)]
        database: Option<String>,
    },
}

// ============================================================================
// Session Subcommands
// ============================================================================

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Create a new session
    New {
        /// Owner of the session
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show the latest messages of a session
    History {
        /// Session ID
        session_id: String,

        /// Maximum number of messages
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },

    /// Delete a session and all its messages
    Delete {
        /// Session ID
        session_id: String,
    },
}

// ============================================================================
// User Subcommands
// ============================================================================

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Create {
        /// Display name
        #[arg(long, default_value = "User")]
        name: String,

        /// Email address (must be unique)
        #[arg(long)]
        email: Option<String>,

        /// Health condition to take into account (repeatable)
        #[arg(long = "condition")]
        conditions: Vec<String>,
    },

    /// Show a user by ID or email
    Show {
        /// User ID or email
        user: String,
    },
}
