//! Tests for error handling
//!
//! This file contains unit tests for:
//! - OmbeeError types and variants
//! - Error messages and Display trait
//! - Error conversions and From implementations
//! - Errors surfaced by configuration and storage

use ombee::config::{parse_database_url, Config};
use ombee::error::OmbeeError;

// ============================================================================
// OmbeeError Variant Tests
// ============================================================================

mod error_variant_tests {
    use super::*;

    #[test]
    fn test_missing_config_error() {
        let err = OmbeeError::MissingConfig("GROQ_API_KEY".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Missing required environment variable"));
        assert!(msg.contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_invalid_config_error() {
        let err = OmbeeError::InvalidConfig {
            key: "RETRIEVAL_TOP_K".to_string(),
            value: "many".to_string(),
        };
        assert_eq!(format!("{}", err), "Invalid value for RETRIEVAL_TOP_K: many");
    }

    #[test]
    fn test_unsupported_database_error() {
        let err = OmbeeError::UnsupportedDatabase("postgres://db".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("postgres://db"));
        assert!(msg.contains("sqlite"));
    }

    #[test]
    fn test_session_not_found_error() {
        let uuid = "550e8400-e29b-41d4-a716-446655440000";
        let err = OmbeeError::SessionNotFound(uuid.to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Session not found"));
        assert!(msg.contains(uuid));
    }

    #[test]
    fn test_user_not_found_error() {
        let err = OmbeeError::UserNotFound("ana@example.com".to_string());
        assert_eq!(format!("{}", err), "User not found: ana@example.com");
    }

    #[test]
    fn test_corrupt_record_error() {
        let err = OmbeeError::CorruptRecord("unknown role 'system'".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Corrupt record"));
        assert!(msg.contains("system"));
    }

    #[test]
    fn test_provider_error() {
        let err = OmbeeError::Provider {
            provider: "Groq".to_string(),
            message: "HTTP 429: rate limited".to_string(),
        };
        assert_eq!(format!("{}", err), "Groq request failed: HTTP 429: rate limited");
    }
}

// ============================================================================
// Error From Implementations Tests
// ============================================================================

mod error_from_tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OmbeeError = io_err.into();
        let msg = format!("{}", err);
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not valid json").unwrap_err();
        let err: OmbeeError = json_err.into();
        assert!(format!("{}", err).contains("JSON error"));
    }

    #[test]
    fn test_from_sqlite_error() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let sqlite_err = conn.execute("INVALID SQL STATEMENT", []).unwrap_err();
        let err: OmbeeError = sqlite_err.into();
        assert!(format!("{}", err).contains("SQLite error"));
    }

    #[test]
    fn test_into_anyhow_keeps_message() {
        let err: anyhow::Error = OmbeeError::SessionNotFound("abc".to_string()).into();
        assert_eq!(err.to_string(), "Session not found: abc");
        assert!(matches!(
            err.downcast_ref::<OmbeeError>(),
            Some(OmbeeError::SessionNotFound(_))
        ));
    }
}

// ============================================================================
// Surfaced Errors Tests
// ============================================================================

mod surfaced_error_tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_require_live_reports_first_missing_key() {
        let config = Config::from_lookup(lookup(&[("COHERE_API_KEY", "c")])).unwrap();
        match config.require_live() {
            Err(OmbeeError::MissingConfig(key)) => assert_eq!(key, "PINECONE_API_KEY"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_top_k_is_invalid_config() {
        let result = Config::from_lookup(lookup(&[("RETRIEVAL_TOP_K", "0")]));
        assert!(matches!(
            result,
            Err(OmbeeError::InvalidConfig { ref key, .. }) if key == "RETRIEVAL_TOP_K"
        ));
    }

    #[test]
    fn test_non_sqlite_url_is_unsupported() {
        assert!(matches!(
            parse_database_url("postgresql://localhost/ombee"),
            Err(OmbeeError::UnsupportedDatabase(_))
        ));
    }

    #[test]
    fn test_empty_sqlite_path_is_invalid() {
        assert!(matches!(
            parse_database_url("sqlite:///"),
            Err(OmbeeError::InvalidConfig { .. })
        ));
    }
}

// ============================================================================
// Error Traits Tests
// ============================================================================

mod error_traits_tests {
    use super::*;

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OmbeeError>();
    }

    #[test]
    fn test_wrapped_errors_have_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: OmbeeError = io_err.into();
        assert!(err.source().is_some());

        let err = OmbeeError::SessionNotFound("x".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> ombee::Result<()> {
            Err(OmbeeError::UserNotFound("u".to_string()))
        }

        fn caller() -> ombee::Result<String> {
            inner()?;
            Ok("unreachable".to_string())
        }

        assert!(matches!(caller(), Err(OmbeeError::UserNotFound(_))));
    }
}
