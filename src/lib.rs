// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Ombee AI - Library
//!
//! A multi-domain assistant. Every question is routed to one of three
//! domains by a deterministic weighted keyword and phrase router:
//!
//! - **Holistic Health** - live, answered from a vector-indexed knowledge base
//! - **Ombee Finance** - demo answers, launching later
//! - **Ombee Wireless** - demo answers, launching later
//!
//! ## Routing
//!
//! ```rust
//! use ombee::routing::{classify, Domain};
//!
//! let result = classify("How can I reduce stress with meditation?");
//! assert_eq!(result.domain, Domain::Holistic);
//! assert!(result.confidence >= 0.70 && result.confidence <= 0.95);
//! ```

pub mod api;
pub mod assistant;
pub mod cli;
pub mod commands;
pub mod config;
pub mod database;
pub mod demo;
pub mod error;
pub mod models;
pub mod providers;
pub mod routing;
pub mod telemetry;

pub use assistant::Assistant;
pub use config::Config;
pub use database::ChatDatabase;
pub use error::{OmbeeError, Result};
pub use routing::{classify, explain, Domain, DomainRouter, RoutingResult};
