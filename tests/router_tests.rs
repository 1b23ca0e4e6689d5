//! Tests for domain routing
//!
//! This file covers:
//! - Routing of representative questions for every domain
//! - Confidence bounds and the no-match default
//! - Phrase bonuses, heuristic adjustments and tie-breaking
//! - Behaviour with custom tables

use ombee::routing::{
    classify, explain, Adjustment, Domain, DomainRouter, DomainTable, MAX_CONFIDENCE,
    MIN_CONFIDENCE,
};

const EPS: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ============================================================================
// Representative Questions
// ============================================================================

mod scenario_tests {
    use super::*;

    #[test]
    fn test_meditation_question_routes_holistic() {
        let result = classify("What are some meditation techniques for beginners?");
        assert_eq!(result.domain, Domain::Holistic);
        assert_close(result.confidence, 0.90);
    }

    #[test]
    fn test_restaurant_spending_routes_financial() {
        let explanation = explain("How much did I spend on restaurants last month?");
        assert_eq!(explanation.domain, Domain::Financial);
        assert!(explanation.confidence > 0.90);
        assert_close(explanation.scores.get(Domain::Financial), 11.0);
        assert!(explanation
            .phrases
            .iter()
            .any(|p| p.phrase == "how much did i spend"));
        assert!(explanation.adjustments.contains(&Adjustment::SpendPattern));
    }

    #[test]
    fn test_phone_plan_routes_telecom() {
        let result = classify("What's my current phone plan?");
        assert_eq!(result.domain, Domain::Telecom);
        assert!(result.confidence > 0.85);
        assert_close(result.confidence, MAX_CONFIDENCE);
    }

    #[test]
    fn test_gibberish_uses_default() {
        let result = classify("asdf qwerty zzxcv");
        assert_eq!(result.domain, Domain::Holistic);
        assert_eq!(result.confidence, MIN_CONFIDENCE);
    }

    #[test]
    fn test_phone_bill_payment_boosts_financial() {
        let explanation = explain("phone bill payment due");
        assert!(explanation
            .adjustments
            .contains(&Adjustment::PhoneBillPayment));
        // payment 2 + bill 1.5 + rule 2
        assert_close(explanation.scores.get(Domain::Financial), 5.5);
        // phone 2 + bill 1 + phrase 5 - rule 1
        assert_close(explanation.scores.get(Domain::Telecom), 7.0);
        assert_eq!(explanation.domain, Domain::Telecom);
    }

    #[test]
    fn test_eating_question() {
        let explanation = explain("Can I eat bread?");
        assert_eq!(explanation.domain, Domain::Holistic);
        assert_eq!(explanation.adjustments, vec![Adjustment::EatPattern]);
        assert_close(explanation.scores.get(Domain::Holistic), 4.0);
    }

    #[test]
    fn test_carrier_costs_route_telecom() {
        let explanation = explain("How much do I pay for my mobile carrier?");
        assert_eq!(explanation.domain, Domain::Telecom);
        assert!(explanation
            .adjustments
            .contains(&Adjustment::PossessiveCarrier));
    }

    #[test]
    fn test_competing_domains_lower_confidence() {
        // yoga 3 for holistic, paid 1.5 + spend pattern 3 for financial
        let result = classify("I paid for my yoga class");
        assert_eq!(result.domain, Domain::Financial);
        assert_close(result.confidence, 0.70 + 0.20 * (4.5 / 7.5));
    }
}

// ============================================================================
// Properties
// ============================================================================

mod property_tests {
    use super::*;

    const QUERIES: &[&str] = &[
        "",
        "   ",
        "!!!",
        "Привет мир",
        "睡眠を改善するには？",
        "MEDITATION",
        "budget budget budget",
        "ombee wireless ombee finance wellness",
        "phone bill payment due",
        "🙂 my plan 🙂",
        "a\u{0}b",
    ];

    #[test]
    fn test_confidence_is_bounded() {
        for query in QUERIES {
            let result = classify(query);
            assert!(
                (MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&result.confidence),
                "{:?} gave {}",
                query,
                result.confidence
            );
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        for query in QUERIES {
            assert_eq!(classify(query), classify(query));
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            classify("HOW MUCH DID I SPEND ON RESTAURANTS?"),
            classify("how much did i spend on restaurants?")
        );
    }

    #[test]
    fn test_empty_and_non_latin_default() {
        for query in ["", "Привет мир", "!!!"] {
            let result = classify(query);
            assert_eq!(result.domain, Domain::Holistic);
            assert_eq!(result.confidence, MIN_CONFIDENCE);
        }
    }

    #[test]
    fn test_lone_phrase_overrides() {
        let result = classify("my plan");
        assert_eq!(result.domain, Domain::Telecom);
        assert!(result.confidence >= 0.90);

        let result = classify("ombee finance");
        assert_eq!(result.domain, Domain::Financial);
        assert!(result.confidence >= 0.90);
    }

    #[test]
    fn test_explanation_matches_classification() {
        for query in QUERIES {
            let explanation = explain(query);
            let result = classify(query);
            assert_eq!(explanation.domain, result.domain);
            assert_eq!(explanation.confidence, result.confidence);
            assert!(explanation.explanation.starts_with("routed to "));
        }
    }
}

// ============================================================================
// Custom Tables
// ============================================================================

mod custom_table_tests {
    use super::*;

    const EMPTY: DomainTable<'static> = DomainTable {
        keywords: &[],
        phrases: &[],
    };

    fn router<'a>(
        holistic: &'a [(&'a str, f64)],
        financial: &'a [(&'a str, f64)],
        telecom: &'a [(&'a str, f64)],
    ) -> DomainRouter<'a> {
        DomainRouter::with_tables([
            DomainTable {
                keywords: holistic,
                phrases: &[],
            },
            DomainTable {
                keywords: financial,
                phrases: &[],
            },
            DomainTable {
                keywords: telecom,
                phrases: &[],
            },
        ])
    }

    #[test]
    fn test_scaling_winner_never_lowers_confidence() {
        let mut previous = 0.0;
        for weight in [2.0, 4.0, 8.0, 16.0, 32.0] {
            let holistic = [("sleep", weight)];
            let financial = [("money", 1.0)];
            let result = router(&holistic, &financial, &[]).classify("sleep money");
            assert_eq!(result.domain, Domain::Holistic);
            assert!(result.confidence >= previous);
            previous = result.confidence;
        }
        assert_close(previous, MAX_CONFIDENCE);
    }

    #[test]
    fn test_ties_go_to_canonical_order() {
        let shared = [("alpha", 2.0)];
        assert_eq!(
            router(&shared, &shared, &shared).classify("alpha").domain,
            Domain::Holistic
        );
        assert_eq!(
            router(&[], &shared, &shared).classify("alpha").domain,
            Domain::Financial
        );
    }

    #[test]
    fn test_each_keyword_counts_once() {
        let holistic = [("calm", 1.0)];
        let scores = router(&holistic, &[], &[]).score("calm calm calm");
        assert_close(scores.get(Domain::Holistic), 1.0);
    }

    #[test]
    fn test_negative_scores_are_kept() {
        let router = DomainRouter::with_tables([EMPTY, EMPTY, EMPTY]);
        let scores = router.score("my phone bill cost");
        assert_close(scores.get(Domain::Financial), 4.0);
        assert_close(scores.get(Domain::Telecom), -1.0);

        let result = router.classify("my phone bill cost");
        assert_eq!(result.domain, Domain::Financial);
        assert_close(result.confidence, MAX_CONFIDENCE);
    }
}
