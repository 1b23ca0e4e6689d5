// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Routing module
//!
//! Deterministic routing of user questions to assistant domains.

pub mod domain;
pub mod domain_router;
pub mod tables;

pub use domain::*;
pub use domain_router::*;
pub use tables::{DomainTable, PHRASE_BONUS};
