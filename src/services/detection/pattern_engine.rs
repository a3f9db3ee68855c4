// Pattern Engine
// Lexical trigger matching: every rule's phrase groups against one sentence

use regex::Match;
use std::collections::HashSet;
use tracing::debug;

use crate::models::{Confidence, DetectionEvent, DetectionMethod, Sentence};
use crate::services::rule_catalog::RuleBook;

/// Run all rules against `sentence`.
///
/// Rules flagged `requires_context` are skipped unless `is_argumentative`.
/// Within a rule, a hit lying inside a longer hit from another trigger group
/// is dropped, and each distinct surface string is reported once; repeats
/// across rules are left for the aggregator.
pub fn match_patterns(book: &RuleBook, sentence: &Sentence, is_argumentative: bool) -> Vec<DetectionEvent> {
    let mut events = Vec::new();

    for rule in book.rules() {
        if rule.requires_context && !is_argumentative {
            continue;
        }

        let hits: Vec<Match> = rule
            .trigger_groups()
            .iter()
            .flat_map(|group| group.find_iter(&sentence.text))
            .collect();

        let mut seen: HashSet<&str> = HashSet::new();
        for m in hits.iter().filter(|m| !is_covered(m, &hits)) {
            if !seen.insert(m.as_str()) {
                continue;
            }
            events.push(DetectionEvent {
                category: rule.category,
                phrase: m.as_str().to_string(),
                explanation: rule.description.clone(),
                sentence: sentence.text.clone(),
                method: DetectionMethod::Pattern,
                confidence: Confidence::Medium,
            });
        }
    }

    if !events.is_empty() {
        debug!(
            "[pattern_engine] Sentence {}: {} trigger hit(s)",
            sentence.ordinal,
            events.len()
        );
    }

    events
}

/// True when another hit spans `m` and is strictly longer.
fn is_covered(m: &Match, hits: &[Match]) -> bool {
    hits.iter()
        .any(|o| o.start() <= m.start() && m.end() <= o.end() && o.len() > m.len())
}
