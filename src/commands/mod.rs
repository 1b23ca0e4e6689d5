// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Command implementations

mod chat;
mod config_cmds;
mod route;
mod serve;
mod session_cmds;
mod user_cmds;

pub use chat::*;
pub use config_cmds::*;
pub use route::*;
pub use serve::*;
pub use session_cmds::*;
pub use user_cmds::*;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::database::ChatDatabase;

/// Configuration from the environment, with an optional database override
pub(crate) fn load_config(database: Option<&str>) -> Result<Config> {
    let mut config = Config::from_env().context("Failed to read configuration")?;
    if let Some(path) = database {
        config.database_url = path.to_string();
    }
    Ok(config)
}

/// Open the conversation store named by the configuration
pub(crate) fn open_store(config: &Config) -> Result<ChatDatabase> {
    let path = config.database_path()?;
    ChatDatabase::open(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))
}
