// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Weighted keyword domain router
//!
//! Decides which domain handles a query and how confident that decision is.
//! Matching is plain substring containment on the lowercased query; there is
//! no tokenizer. Scoring runs in four passes:
//!
//! 1. keyword weights from each domain's table
//! 2. a fixed bonus per key phrase
//! 3. a small set of syntactic adjustments (see [`Adjustment`])
//! 4. confidence calibration from the winner's share of the total score
//!
//! The router is pure: it reads `'static` tables and writes only to a
//! per-call accumulator, so one instance can be shared freely across threads.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::domain::Domain;
use super::tables::{DomainTable, PHRASE_BONUS, STANDARD_TABLES};

/// Confidence reported for the default route and the floor for every route
pub const MIN_CONFIDENCE: f64 = 0.70;
/// Ceiling for every route
pub const MAX_CONFIDENCE: f64 = 0.95;
/// Confidence gained between zero and total dominance
const DOMINANCE_SPAN: f64 = 0.20;
/// Dominance used when the total score is not positive
const EVEN_SPLIT_DOMINANCE: f64 = 0.33;
const STRONG_SCORE: f64 = 10.0;
const VERY_STRONG_SCORE: f64 = 15.0;
const SCORE_BOOST: f64 = 0.05;

static SPEND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(spend|spent|cost|paid).*(on|for|at)").expect("valid regex"));
static EAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(should|can) (i|we) eat").expect("valid regex"));

const PAYMENT_WORDS: &[&str] = &["pay", "cost", "spend"];
const CARRIER_WORDS: &[&str] = &["wireless", "mobile", "carrier", "network"];
const SPEND_WORDS: &[&str] = &["spend", "spent", "cost"];

// ============================================================================
// Scores
// ============================================================================

/// Accumulated score per domain for one query
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreVector([f64; Domain::COUNT]);

impl ScoreVector {
    /// Score of one domain
    pub fn get(&self, domain: Domain) -> f64 {
        self.0[domain.index()]
    }

    /// Add a (possibly negative) delta to one domain
    pub fn add(&mut self, domain: Domain, delta: f64) {
        self.0[domain.index()] += delta;
    }

    /// Sum over all domains
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True when no rule contributed to any domain
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|score| *score == 0.0)
    }

    /// Highest-scoring domain; on equal scores the earlier domain in
    /// [`Domain::ALL`] wins.
    pub fn leader(&self) -> (Domain, f64) {
        let mut best = (Domain::ALL[0], self.get(Domain::ALL[0]));
        for domain in Domain::ALL.iter().skip(1) {
            let score = self.get(*domain);
            if score > best.1 {
                best = (*domain, score);
            }
        }
        best
    }

    /// Scores in canonical domain order
    pub fn iter(&self) -> impl Iterator<Item = (Domain, f64)> + '_ {
        Domain::ALL.iter().map(move |d| (*d, self.get(*d)))
    }
}

impl Serialize for ScoreVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Domain::COUNT))?;
        for (domain, score) in self.iter() {
            map.serialize_entry(domain.as_str(), &score)?;
        }
        map.end()
    }
}

// ============================================================================
// Adjustments
// ============================================================================

/// Syntactic rules applied after keyword and phrase scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// "spend/spent/cost/paid ... on/for/at"
    SpendPattern,
    /// "should/can I/we eat"
    EatPattern,
    /// "my" + payment word + carrier word
    PossessiveCarrier,
    /// "my" + payment word + spend word, no carrier word
    PossessiveSpend,
    /// "phone bill" + payment word: usually a money question
    PhoneBillPayment,
}

impl Adjustment {
    /// Score changes applied when the rule fires
    pub fn deltas(&self) -> &'static [(Domain, f64)] {
        match self {
            Adjustment::SpendPattern => &[(Domain::Financial, 3.0)],
            Adjustment::EatPattern => &[(Domain::Holistic, 3.0)],
            Adjustment::PossessiveCarrier => &[(Domain::Telecom, 2.0)],
            Adjustment::PossessiveSpend => &[(Domain::Financial, 2.0)],
            Adjustment::PhoneBillPayment => &[(Domain::Financial, 2.0), (Domain::Telecom, -1.0)],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Adjustment::SpendPattern => "spending pattern",
            Adjustment::EatPattern => "eating question",
            Adjustment::PossessiveCarrier => "own carrier costs",
            Adjustment::PossessiveSpend => "own spending",
            Adjustment::PhoneBillPayment => "paying a phone bill",
        }
    }

    /// Rules that fire for an already lowercased query, in application order
    fn detect(lower: &str) -> Vec<Adjustment> {
        let mut fired = Vec::new();

        if SPEND_PATTERN.is_match(lower) {
            fired.push(Adjustment::SpendPattern);
        }
        if EAT_PATTERN.is_match(lower) {
            fired.push(Adjustment::EatPattern);
        }

        let mentions_payment = contains_any(lower, PAYMENT_WORDS);
        if lower.contains("my") && mentions_payment {
            if contains_any(lower, CARRIER_WORDS) {
                fired.push(Adjustment::PossessiveCarrier);
            } else if contains_any(lower, SPEND_WORDS) {
                fired.push(Adjustment::PossessiveSpend);
            }
        }

        if lower.contains("phone bill") && mentions_payment {
            fired.push(Adjustment::PhoneBillPayment);
        }

        fired
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

// ============================================================================
// Results
// ============================================================================

/// Router output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingResult {
    pub domain: Domain,
    /// Always within [`MIN_CONFIDENCE`, `MAX_CONFIDENCE`]
    pub confidence: f64,
}

impl RoutingResult {
    /// Route used when nothing matched
    pub fn fallback() -> Self {
        Self {
            domain: Domain::DEFAULT,
            confidence: MIN_CONFIDENCE,
        }
    }

    /// Turn a score vector into a route
    pub fn from_scores(scores: &ScoreVector) -> Self {
        if scores.is_zero() {
            return Self::fallback();
        }

        let (domain, max_score) = scores.leader();
        let total = scores.total();
        let dominance = if total > 0.0 {
            max_score / total
        } else {
            EVEN_SPLIT_DOMINANCE
        };

        let mut confidence = MIN_CONFIDENCE + dominance * DOMINANCE_SPAN;
        if max_score >= STRONG_SCORE {
            confidence += SCORE_BOOST;
        }
        if max_score >= VERY_STRONG_SCORE {
            confidence += SCORE_BOOST;
        }

        let confidence = if confidence.is_nan() {
            MIN_CONFIDENCE
        } else {
            confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
        };

        Self { domain, confidence }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordMatch {
    pub domain: Domain,
    pub keyword: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseMatch {
    pub domain: Domain,
    pub phrase: String,
    pub bonus: f64,
}

/// Why a query was routed where it was
#[derive(Debug, Clone, Serialize)]
pub struct RoutingExplanation {
    pub query: String,
    pub domain: Domain,
    pub confidence: f64,
    pub scores: ScoreVector,
    pub keywords: Vec<KeywordMatch>,
    pub phrases: Vec<PhraseMatch>,
    pub adjustments: Vec<Adjustment>,
    pub explanation: String,
}

/// One scoring contribution, reported while scoring
enum Hit<'a> {
    Keyword(Domain, &'a str, f64),
    Phrase(Domain, &'a str),
    Adjusted(Adjustment),
}

// ============================================================================
// Router
// ============================================================================

/// Weighted keyword router over one table per domain
#[derive(Debug, Clone, Copy)]
pub struct DomainRouter<'a> {
    /// Indexed by [`Domain::index`]
    tables: [DomainTable<'a>; Domain::COUNT],
    phrase_bonus: f64,
}

/// Router over the shipped tables
pub static STANDARD_ROUTER: DomainRouter<'static> = DomainRouter::standard();

impl DomainRouter<'static> {
    pub const fn standard() -> Self {
        Self {
            tables: STANDARD_TABLES,
            phrase_bonus: PHRASE_BONUS,
        }
    }
}

impl Default for DomainRouter<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> DomainRouter<'a> {
    /// Router over custom tables, given in [`Domain::ALL`] order.
    /// Weights are expected to be positive and finite.
    pub fn with_tables(tables: [DomainTable<'a>; Domain::COUNT]) -> Self {
        Self {
            tables,
            phrase_bonus: PHRASE_BONUS,
        }
    }

    pub fn table(&self, domain: Domain) -> &DomainTable<'a> {
        &self.tables[domain.index()]
    }

    /// Route a query. Total: every input, including the empty string, yields
    /// a route.
    pub fn classify(&self, query: &str) -> RoutingResult {
        let scores = self.evaluate(&query.to_lowercase(), |_| {});
        RoutingResult::from_scores(&scores)
    }

    /// Raw per-domain scores for a query
    pub fn score(&self, query: &str) -> ScoreVector {
        self.evaluate(&query.to_lowercase(), |_| {})
    }

    /// Route a query and report every contribution that led there
    pub fn explain(&self, query: &str) -> RoutingExplanation {
        let mut keywords = Vec::new();
        let mut phrases = Vec::new();
        let mut adjustments = Vec::new();

        let scores = self.evaluate(&query.to_lowercase(), |hit| match hit {
            Hit::Keyword(domain, keyword, weight) => keywords.push(KeywordMatch {
                domain,
                keyword: keyword.to_string(),
                weight,
            }),
            Hit::Phrase(domain, phrase) => phrases.push(PhraseMatch {
                domain,
                phrase: phrase.to_string(),
                bonus: self.phrase_bonus,
            }),
            Hit::Adjusted(adjustment) => adjustments.push(adjustment),
        });

        let result = RoutingResult::from_scores(&scores);

        RoutingExplanation {
            query: query.to_string(),
            domain: result.domain,
            confidence: result.confidence,
            scores,
            keywords,
            phrases,
            adjustments,
            explanation: format!(
                "routed to {} with {:.0}% confidence.",
                result.domain,
                result.confidence * 100.0
            ),
        }
    }

    fn evaluate<'q>(&'q self, lower: &str, mut on_hit: impl FnMut(Hit<'q>)) -> ScoreVector {
        let mut scores = ScoreVector::default();

        for domain in Domain::ALL {
            let table = self.table(domain);

            for (keyword, weight) in table.keywords {
                if lower.contains(keyword) {
                    scores.add(domain, *weight);
                    on_hit(Hit::Keyword(domain, *keyword, *weight));
                }
            }

            for phrase in table.phrases {
                if lower.contains(phrase) {
                    scores.add(domain, self.phrase_bonus);
                    on_hit(Hit::Phrase(domain, *phrase));
                }
            }
        }

        for adjustment in Adjustment::detect(lower) {
            for (domain, delta) in adjustment.deltas() {
                scores.add(*domain, *delta);
            }
            on_hit(Hit::Adjusted(adjustment));
        }

        scores
    }
}

/// Route a query with the shipped tables
pub fn classify(query: &str) -> RoutingResult {
    STANDARD_ROUTER.classify(query)
}

/// Explain how the shipped tables route a query
pub fn explain(query: &str) -> RoutingExplanation {
    STANDARD_ROUTER.explain(query)
}
