// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Keyword and key phrase tables for the domain router
//!
//! Keywords are lowercase substrings with a weight; higher weights are more
//! diagnostic of the domain. Key phrases award a fixed bonus each.

/// Keyword table and key phrase set for one domain
#[derive(Debug, Clone, Copy)]
pub struct DomainTable<'a> {
    pub keywords: &'a [(&'a str, f64)],
    pub phrases: &'a [&'a str],
}

/// Bonus awarded for each key phrase found in a query
pub const PHRASE_BONUS: f64 = 5.0;

// ============================================================================
// Holistic
// ============================================================================

pub const HOLISTIC_KEYWORDS: &[(&str, f64)] = &[
    // High
    ("meditation", 3.0),
    ("mindfulness", 3.0),
    ("yoga", 3.0),
    ("wellness", 3.0),
    ("nutrition", 3.0),
    ("diet", 2.5),
    ("exercise", 2.5),
    ("sleep", 2.5),
    ("stress", 2.0),
    ("mental health", 3.0),
    ("blood pressure", 3.0),
    ("diabetes", 3.0),
    ("chronic", 2.0),
    ("healthy eating", 3.0),
    ("fasting", 3.0),
    ("intermittent fasting", 3.0),
    // Medium
    ("health", 1.5),
    ("food", 1.5),
    ("eat", 1.0),
    ("meal", 1.5),
    ("vitamin", 2.0),
    ("supplement", 2.0),
    ("fitness", 2.0),
    ("breathing", 2.0),
    ("relax", 1.5),
    ("calm", 1.5),
    // Low
    ("body", 0.5),
    ("weight", 1.0),
    ("energy", 1.0),
    ("tired", 1.0),
    ("feeling", 0.5),
    ("better", 0.5),
];

pub const HOLISTIC_PHRASES: &[&str] = &[
    "blood pressure",
    "mental health",
    "healthy eating",
    "lose weight",
    "gain weight",
    "feel better",
    "meditation technique",
    "stress management",
    "sleep better",
    "improve sleep",
    "intermittent fasting",
    "fasting",
];

// ============================================================================
// Financial
// ============================================================================

pub const FINANCIAL_KEYWORDS: &[(&str, f64)] = &[
    // High
    ("budget", 3.0),
    ("spending", 3.0),
    ("expense", 3.0),
    ("savings", 3.0),
    ("credit card", 3.0),
    ("bank account", 3.0),
    ("transaction", 2.5),
    ("ombee finance", 5.0),
    // Medium
    ("money", 2.0),
    ("spend", 2.0),
    ("spent", 2.0),
    ("cost", 1.5),
    ("save", 1.5),
    ("payment", 2.0),
    ("bill", 1.5),
    ("paid", 1.5),
    ("dollar", 2.0),
    ("cash", 2.0),
    ("debt", 2.5),
    // Context
    ("restaurant", 1.0),
    ("bought", 1.0),
    ("purchase", 1.5),
    ("balance", 1.5),
    ("income", 2.0),
];

pub const FINANCIAL_PHRASES: &[&str] = &[
    "how much did i spend",
    "spent on",
    "my budget",
    "save money",
    "credit card",
    "bank account",
    "financial plan",
    "spending habit",
];

// ============================================================================
// Telecom
// ============================================================================

pub const TELECOM_KEYWORDS: &[(&str, f64)] = &[
    // High
    ("phone plan", 4.0),
    ("data usage", 4.0),
    ("mobile plan", 4.0),
    ("ombee wireless", 5.0),
    ("carrier", 3.0),
    ("cellular", 3.0),
    // Medium
    ("phone", 2.0),
    ("mobile", 2.0),
    ("data", 2.0),
    ("network", 2.0),
    ("wireless", 2.5),
    ("signal", 2.0),
    ("coverage", 2.5),
    ("device", 1.5),
    ("upgrade", 1.5),
    // Low
    ("bill", 1.0),
    ("plan", 1.0),
    ("service", 0.5),
    ("usage", 1.5),
    ("minutes", 1.5),
    ("text", 1.0),
];

pub const TELECOM_PHRASES: &[&str] = &[
    "phone plan",
    "data usage",
    "phone bill",
    "mobile plan",
    "data limit",
    "wireless plan",
    "ombee wireless",
    "my plan",
    "current plan",
];

/// Shipped tables in canonical domain order (holistic, financial, telecom)
pub const STANDARD_TABLES: [DomainTable<'static>; 3] = [
    DomainTable {
        keywords: HOLISTIC_KEYWORDS,
        phrases: HOLISTIC_PHRASES,
    },
    DomainTable {
        keywords: FINANCIAL_KEYWORDS,
        phrases: FINANCIAL_PHRASES,
    },
    DomainTable {
        keywords: TELECOM_KEYWORDS,
        phrases: TELECOM_PHRASES,
    },
];
