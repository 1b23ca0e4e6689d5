// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Routing command implementations

use anyhow::Result;
use colored::*;

use crate::routing::{self, Domain};

fn colored_domain(domain: Domain) -> ColoredString {
    match domain {
        Domain::Holistic => domain.as_str().green(),
        Domain::Financial => domain.as_str().yellow(),
        Domain::Telecom => domain.as_str().cyan(),
    }
}

/// Print the domain and confidence for a question
pub fn route_query(query: &str, json: bool) -> Result<()> {
    let result = routing::classify(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {} ({:.0}% confidence)",
        "[>]".blue().bold(),
        colored_domain(result.domain).bold(),
        result.confidence * 100.0
    );
    if !result.domain.is_live() {
        println!(
            "    {} is not live yet; answers use demo data or a coming-soon notice",
            result.domain.display_name().dimmed()
        );
    }

    Ok(())
}

/// Print scores, matches and adjustments for a question
pub fn explain_query(query: &str, json: bool) -> Result<()> {
    let explanation = routing::explain(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
        return Ok(());
    }

    println!("{} {}", "Query:".bold(), explanation.query);
    println!();
    println!("{}", "Scores:".bold());
    for (domain, score) in explanation.scores.iter() {
        let marker = if domain == explanation.domain { "*" } else { " " };
        println!("  {} {:<10} {:>6.2}", marker, colored_domain(domain), score);
    }

    if !explanation.keywords.is_empty() {
        println!();
        println!("{}", "Keywords:".bold());
        for m in &explanation.keywords {
            println!("  {:<10} {:<20} +{:.1}", m.domain.as_str(), m.keyword, m.weight);
        }
    }

    if !explanation.phrases.is_empty() {
        println!();
        println!("{}", "Phrases:".bold());
        for m in &explanation.phrases {
            println!("  {:<10} \"{}\" +{:.1}", m.domain.as_str(), m.phrase, m.bonus);
        }
    }

    if !explanation.adjustments.is_empty() {
        println!();
        println!("{}", "Adjustments:".bold());
        for adjustment in &explanation.adjustments {
            println!("  {}", adjustment.description());
        }
    }

    println!();
    println!(
        "{} {}",
        "[OK]".green().bold(),
        explanation.explanation
    );

    Ok(())
}
