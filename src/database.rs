// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Conversation store
//!
//! Users, chat sessions and the messages exchanged in them, kept in SQLite.
//! Every message carries a SHA-256 content hash, and assistant messages carry
//! stable identifiers for the documents that grounded them.
//!
//! A session's `user_id` is a plain reference: it may name a local user or
//! an identity owned by an external auth provider.
//!
//! ## Schema Overview
//!
//! ```text
//! +-----------------+     +-----------------+     +-----------------+
//! |      Users      |----<|    Sessions     |----<|    Messages     |
//! +-----------------+     +-----------------+     +-----------------+
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{OmbeeError, Result};
use crate::models::{MessageHistory, ResponseStatus, Role, SessionInfo, UserProfile};
use crate::routing::Domain;

/// Database schema version
pub const SCHEMA_VERSION: &str = "1.0";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
INSERT OR IGNORE INTO metadata (key, value) VALUES ('schema_version', '1.0');

CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY,
    email TEXT UNIQUE,
    name TEXT NOT NULL DEFAULT 'User',
    preferences TEXT NOT NULL DEFAULT '{}',
    is_admin INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    session_id TEXT PRIMARY KEY,
    user_id TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
    message_id TEXT PRIMARY KEY,
    session_id TEXT NOT NULL REFERENCES sessions(session_id) ON DELETE CASCADE,
    role TEXT NOT NULL,
    content TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    source_document_uids TEXT,
    metadata TEXT NOT NULL DEFAULT '{}',
    retrieval_time REAL,
    generation_time REAL
);

CREATE INDEX IF NOT EXISTS idx_messages_session ON messages(session_id, created_at);
CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
"#;

// =============================================================================
// Database Models
// =============================================================================

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: Option<String>,
    pub name: String,
    pub preferences: serde_json::Value,
    pub is_admin: bool,
    /// Unix millis
    pub created_at: i64,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile::from_preferences(&self.preferences)
    }
}

/// A chat session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_id: Option<String>,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

impl Session {
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.session_id.clone(),
            created_at: to_rfc3339(self.created_at),
        }
    }
}

/// Routing and provenance details kept alongside a message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
}

/// A stored message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub session_id: String,
    pub role: Role,
    pub content: String,
    pub content_hash: String,
    /// Unix millis
    pub created_at: i64,
    pub source_document_uids: Option<Vec<String>>,
    pub metadata: MessageMetadata,
    /// Seconds
    pub retrieval_time: Option<f64>,
    /// Seconds
    pub generation_time: Option<f64>,
}

impl Message {
    pub fn timestamp(&self) -> String {
        to_rfc3339(self.created_at)
    }

    /// Shape returned by the history endpoint
    pub fn to_history(&self) -> MessageHistory {
        MessageHistory {
            message_id: self.message_id.clone(),
            role: self.role.as_str().to_string(),
            content: self.content.clone(),
            timestamp: self.timestamp(),
            domain: self.metadata.domain,
            sources: self.metadata.sources.clone(),
        }
    }
}

/// A message about to be stored
#[derive(Debug, Clone)]
pub struct NewMessage<'a> {
    pub session_id: &'a str,
    pub role: Role,
    pub content: &'a str,
    pub metadata: MessageMetadata,
    pub retrieval_time: Option<f64>,
    pub generation_time: Option<f64>,
}

impl<'a> NewMessage<'a> {
    pub fn user(session_id: &'a str, content: &'a str) -> Self {
        Self {
            session_id,
            role: Role::User,
            content,
            metadata: MessageMetadata::default(),
            retrieval_time: None,
            generation_time: None,
        }
    }

    pub fn assistant(session_id: &'a str, content: &'a str, metadata: MessageMetadata) -> Self {
        Self {
            session_id,
            role: Role::Assistant,
            content,
            metadata,
            retrieval_time: None,
            generation_time: None,
        }
    }

    pub fn with_timings(mut self, retrieval_time: Option<f64>, generation_time: Option<f64>) -> Self {
        self.retrieval_time = retrieval_time;
        self.generation_time = generation_time;
        self
    }
}

// =============================================================================
// Hashing
// =============================================================================

/// Lowercase hex SHA-256 of `content`
pub fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Stable identifier for a source document label
pub fn source_uid(source: &str) -> String {
    format!("UID:doc:{}", &content_hash(source)[..16])
}

/// RFC 3339 rendering of unix millis
pub fn to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339()
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// =============================================================================
// Database Manager
// =============================================================================

/// Conversation database manager
pub struct ChatDatabase {
    conn: Connection,
}

impl ChatDatabase {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;

        let db = ChatDatabase { conn };
        db.initialize()?;
        log::debug!("Opened conversation store at {}", path.display());

        Ok(db)
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let db = ChatDatabase { conn };
        db.initialize()?;

        Ok(db)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get schema version
    pub fn get_version(&self) -> Result<String> {
        let version = self
            .conn
            .query_row(
                "SELECT value FROM metadata WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(version.unwrap_or_else(|| "unknown".to_string()))
    }

    // -------------------------------------------------------------------------
    // User Operations
    // -------------------------------------------------------------------------

    /// Create a user with a fresh id
    pub fn create_user(
        &self,
        email: Option<&str>,
        name: Option<&str>,
        preferences: Option<serde_json::Value>,
    ) -> Result<User> {
        let user = User {
            user_id: Uuid::new_v4().to_string(),
            email: email.map(String::from),
            name: name.unwrap_or("User").to_string(),
            preferences: preferences.unwrap_or_else(|| serde_json::json!({})),
            is_admin: false,
            created_at: now_millis(),
        };

        self.conn.execute(
            "INSERT INTO users (user_id, email, name, preferences, is_admin, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.user_id,
                user.email,
                user.name,
                serde_json::to_string(&user.preferences)?,
                user.is_admin,
                user.created_at,
            ],
        )?;

        Ok(user)
    }

    /// Get a user by ID
    pub fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.query_user("WHERE user_id = ?1", user_id)
    }

    /// Get a user by email
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.query_user("WHERE email = ?1", email)
    }

    fn query_user(&self, filter: &str, value: &str) -> Result<Option<User>> {
        let sql = format!(
            "SELECT user_id, email, name, preferences, is_admin, created_at FROM users {}",
            filter
        );
        let row = self
            .conn
            .query_row(&sql, [value], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, bool>(4)?,
                    row.get::<_, i64>(5)?,
                ))
            })
            .optional()?;

        row.map(|(user_id, email, name, preferences, is_admin, created_at)| -> Result<User> {
            Ok(User {
                user_id,
                email,
                name,
                preferences: serde_json::from_str(&preferences)?,
                is_admin,
                created_at,
            })
        })
        .transpose()
    }

    // -------------------------------------------------------------------------
    // Session Operations
    // -------------------------------------------------------------------------

    /// Create a session, optionally owned by a user
    pub fn create_session(&self, user_id: Option<&str>) -> Result<Session> {
        let now = now_millis();
        let session = Session {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.map(String::from),
            created_at: now,
            updated_at: now,
        };

        self.conn.execute(
            "INSERT INTO sessions (session_id, user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session.session_id,
                session.user_id,
                session.created_at,
                session.updated_at,
            ],
        )?;

        Ok(session)
    }

    /// Get a session by ID
    pub fn get_session(&self, session_id: &str) -> Result<Option<Session>> {
        let session = self
            .conn
            .query_row(
                "SELECT session_id, user_id, created_at, updated_at
                 FROM sessions WHERE session_id = ?1",
                [session_id],
                |row| {
                    Ok(Session {
                        session_id: row.get(0)?,
                        user_id: row.get(1)?,
                        created_at: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(session)
    }

    /// Delete a session and its messages. Returns false if it did not exist.
    pub fn delete_session(&self, session_id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM sessions WHERE session_id = ?1", [session_id])?;
        Ok(deleted > 0)
    }

    // -------------------------------------------------------------------------
    // Message Operations
    // -------------------------------------------------------------------------

    /// Store a message and touch its session
    pub fn insert_message(&self, new: NewMessage<'_>) -> Result<Message> {
        let now = now_millis();
        let source_document_uids = new
            .metadata
            .sources
            .as_ref()
            .filter(|sources| !sources.is_empty())
            .map(|sources| sources.iter().map(|s| source_uid(s)).collect::<Vec<_>>());

        let message = Message {
            message_id: Uuid::new_v4().to_string(),
            session_id: new.session_id.to_string(),
            role: new.role,
            content: new.content.to_string(),
            content_hash: content_hash(new.content),
            created_at: now,
            source_document_uids,
            metadata: new.metadata,
            retrieval_time: new.retrieval_time,
            generation_time: new.generation_time,
        };

        let tx = self.conn.unchecked_transaction()?;

        let touched = tx.execute(
            "UPDATE sessions SET updated_at = ?1 WHERE session_id = ?2",
            params![now, message.session_id],
        )?;
        if touched == 0 {
            return Err(OmbeeError::SessionNotFound(message.session_id));
        }

        let uids_json = message
            .source_document_uids
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        tx.execute(
            r#"
            INSERT INTO messages (message_id, session_id, role, content, content_hash,
                                  created_at, source_document_uids, metadata,
                                  retrieval_time, generation_time)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                message.message_id,
                message.session_id,
                message.role.as_str(),
                message.content,
                message.content_hash,
                message.created_at,
                uids_json,
                serde_json::to_string(&message.metadata)?,
                message.retrieval_time,
                message.generation_time,
            ],
        )?;

        tx.commit()?;
        Ok(message)
    }

    /// The latest `limit` messages of a session, oldest first
    pub fn recent_messages(&self, session_id: &str, limit: usize) -> Result<Vec<Message>> {
        let mut stmt = self.conn.prepare(
            "SELECT message_id, session_id, role, content, content_hash, created_at,
                    source_document_uids, metadata, retrieval_time, generation_time
             FROM (
                 SELECT *, rowid AS seq FROM messages
                 WHERE session_id = ?1
                 ORDER BY created_at DESC, seq DESC
                 LIMIT ?2
             )
             ORDER BY created_at ASC, seq ASC",
        )?;

        let rows = stmt
            .query_map(params![session_id, limit as i64], MessageRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(MessageRow::into_message).collect()
    }

    /// Get a message by ID
    pub fn get_message(&self, message_id: &str) -> Result<Option<Message>> {
        let row = self
            .conn
            .query_row(
                "SELECT message_id, session_id, role, content, content_hash, created_at,
                        source_document_uids, metadata, retrieval_time, generation_time
                 FROM messages WHERE message_id = ?1",
                [message_id],
                MessageRow::from_row,
            )
            .optional()?;

        row.map(MessageRow::into_message).transpose()
    }

    /// Count messages in a session
    pub fn count_messages(&self, session_id: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM messages WHERE session_id = ?1",
            [session_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Row counts for status output
    pub fn get_statistics(&self) -> Result<DatabaseStats> {
        let count = |table: &str| -> Result<i64> {
            let n = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
            Ok(n)
        };

        Ok(DatabaseStats {
            schema_version: self.get_version()?,
            user_count: count("users")?,
            session_count: count("sessions")?,
            message_count: count("messages")?,
        })
    }
}

/// Raw message columns before JSON decoding
struct MessageRow {
    message_id: String,
    session_id: String,
    role: String,
    content: String,
    content_hash: String,
    created_at: i64,
    source_document_uids: Option<String>,
    metadata: String,
    retrieval_time: Option<f64>,
    generation_time: Option<f64>,
}

impl MessageRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            message_id: row.get(0)?,
            session_id: row.get(1)?,
            role: row.get(2)?,
            content: row.get(3)?,
            content_hash: row.get(4)?,
            created_at: row.get(5)?,
            source_document_uids: row.get(6)?,
            metadata: row.get(7)?,
            retrieval_time: row.get(8)?,
            generation_time: row.get(9)?,
        })
    }

    fn into_message(self) -> Result<Message> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            OmbeeError::CorruptRecord(format!(
                "message {} has role '{}'",
                self.message_id, self.role
            ))
        })?;

        Ok(Message {
            message_id: self.message_id,
            session_id: self.session_id,
            role,
            content: self.content,
            content_hash: self.content_hash,
            created_at: self.created_at,
            source_document_uids: self
                .source_document_uids
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            metadata: serde_json::from_str(&self.metadata)?,
            retrieval_time: self.retrieval_time,
            generation_time: self.generation_time,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub schema_version: String,
    pub user_count: i64,
    pub session_count: i64,
    pub message_count: i64,
}
