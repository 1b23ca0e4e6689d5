// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Assistant domains

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A domain a query can be routed to.
///
/// The set is closed: adding a domain means adding a variant, a table in
/// [`super::tables`], and a demo/coming-soon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Holistic health and wellness (live, retrieval-augmented)
    Holistic,
    /// Personal finance (demo only)
    Financial,
    /// Wireless plans and usage (demo only)
    Telecom,
}

impl Domain {
    /// Number of domains
    pub const COUNT: usize = 3;

    /// All domains in canonical order. Ties between equal scores are broken
    /// in favour of the domain that appears first here.
    pub const ALL: [Domain; Domain::COUNT] = [Domain::Holistic, Domain::Financial, Domain::Telecom];

    /// Domain used when a query matches nothing
    pub const DEFAULT: Domain = Domain::Holistic;

    /// Position in [`Domain::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Domain::Holistic => 0,
            Domain::Financial => 1,
            Domain::Telecom => 2,
        }
    }

    /// Wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Holistic => "holistic",
            Domain::Financial => "financial",
            Domain::Telecom => "telecom",
        }
    }

    /// Product name shown to users
    pub fn display_name(&self) -> &'static str {
        match self {
            Domain::Holistic => "Holistic Health",
            Domain::Financial => "Ombee Finance",
            Domain::Telecom => "Ombee Wireless",
        }
    }

    /// Whether the domain is answered by retrieval + generation
    pub fn is_live(&self) -> bool {
        matches!(self, Domain::Holistic)
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::DEFAULT
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "holistic" => Ok(Domain::Holistic),
            "financial" => Ok(Domain::Financial),
            "telecom" => Ok(Domain::Telecom),
            other => Err(format!("Unknown domain: {}", other)),
        }
    }
}
