// Aggregation Logic
// Merges per-sentence detector output into the overall analysis result

use std::collections::{BTreeMap, HashSet};

use crate::models::{AnalysisResult, DetectionEvent, DetectionMethod, FallacyCategory, SentenceAnalysis};

/// Identity of a finding for deduplication: same method, same phrase, same
/// sentence, compared case-insensitively.
fn dedupe_key(event: &DetectionEvent) -> (DetectionMethod, String, String) {
    (
        event.method,
        event.phrase.to_lowercase(),
        event.sentence.to_lowercase(),
    )
}

/// Merge one sentence's events, keeping the first occurrence of each key.
/// Returns `None` when nothing survives.
pub fn merge_sentence(
    sentence_number: usize,
    sentence: &str,
    is_argumentative: bool,
    events: Vec<DetectionEvent>,
) -> Option<SentenceAnalysis> {
    let mut seen = HashSet::new();
    let fallacies: Vec<DetectionEvent> = events
        .into_iter()
        .filter(|e| seen.insert(dedupe_key(e)))
        .collect();

    if fallacies.is_empty() {
        return None;
    }

    Some(SentenceAnalysis {
        sentence_number,
        sentence: sentence.to_string(),
        fallacies,
        is_argumentative,
    })
}

/// Tally counts over the retained sentences. Input order is preserved.
pub fn aggregate_sentences(sentence_analysis: Vec<SentenceAnalysis>) -> AnalysisResult {
    let mut fallacy_counts: BTreeMap<FallacyCategory, usize> = BTreeMap::new();
    for event in sentence_analysis.iter().flat_map(|s| s.fallacies.iter()) {
        *fallacy_counts.entry(event.category).or_insert(0) += 1;
    }
    let total_fallacies = fallacy_counts.values().sum();

    AnalysisResult {
        total_fallacies,
        fallacy_counts,
        sentence_analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;

    fn event(category: FallacyCategory, phrase: &str, sentence: &str, method: DetectionMethod) -> DetectionEvent {
        DetectionEvent {
            category,
            phrase: phrase.to_string(),
            explanation: String::new(),
            sentence: sentence.to_string(),
            method,
            confidence: Confidence::Medium,
        }
    }

    #[test]
    fn test_same_method_duplicates_collapse() {
        let s = "Bobo ka, bobo ka talaga.";
        let merged = merge_sentence(
            1,
            s,
            true,
            vec![
                event(FallacyCategory::AdHominem, "Bobo", s, DetectionMethod::Pattern),
                event(FallacyCategory::AdHominem, "bobo", s, DetectionMethod::Pattern),
            ],
        )
        .unwrap();
        assert_eq!(merged.fallacies.len(), 1);
        assert_eq!(merged.fallacies[0].phrase, "Bobo");
    }

    #[test]
    fn test_cross_method_kept() {
        let s = "Bobo ka kaya mali ka.";
        let merged = merge_sentence(
            3,
            s,
            true,
            vec![
                event(FallacyCategory::AdHominem, "x", s, DetectionMethod::Pattern),
                event(FallacyCategory::AdHominem, "x", s, DetectionMethod::Grammar),
                event(FallacyCategory::AdHominem, "x", s, DetectionMethod::Sequence),
            ],
        )
        .unwrap();
        assert_eq!(merged.fallacies.len(), 3);
        assert_eq!(merged.sentence_number, 3);
        assert!(merged.is_argumentative);
    }

    #[test]
    fn test_cross_rule_same_phrase_collapses() {
        // "ayaw mo" is a trigger for two rules; the first rule keeps it.
        let s = "Ayaw mo ng pagbabago.";
        let merged = merge_sentence(
            1,
            s,
            true,
            vec![
                event(FallacyCategory::Strawman, "Ayaw mo", s, DetectionMethod::Pattern),
                event(FallacyCategory::FalseDilemma, "Ayaw mo", s, DetectionMethod::Pattern),
            ],
        )
        .unwrap();
        assert_eq!(merged.fallacies.len(), 1);
        assert_eq!(merged.fallacies[0].category, FallacyCategory::Strawman);
    }

    #[test]
    fn test_empty_sentence_dropped() {
        assert!(merge_sentence(1, "Walang laman.", false, vec![]).is_none());
    }

    #[test]
    fn test_counts_sum_to_total() {
        let a = "Bobo ka kaya mali ka.";
        let b = "Paano naman sila?";
        let result = aggregate_sentences(vec![
            merge_sentence(
                1,
                a,
                true,
                vec![
                    event(FallacyCategory::AdHominem, "Bobo", a, DetectionMethod::Pattern),
                    event(FallacyCategory::AdHominem, "INSULT", a, DetectionMethod::Sequence),
                ],
            )
            .unwrap(),
            merge_sentence(
                2,
                b,
                false,
                vec![event(FallacyCategory::Whataboutism, "Paano naman", b, DetectionMethod::Pattern)],
            )
            .unwrap(),
        ]);
        assert_eq!(result.total_fallacies, 3);
        assert_eq!(result.fallacy_counts[&FallacyCategory::AdHominem], 2);
        assert_eq!(result.fallacy_counts[&FallacyCategory::Whataboutism], 1);
        assert_eq!(result.fallacy_counts.values().sum::<usize>(), result.total_fallacies);
    }

    #[test]
    fn test_aggregate_empty() {
        let result = aggregate_sentences(vec![]);
        assert!(result.is_empty());
        assert!(result.fallacy_counts.is_empty());
        assert!(result.sentence_analysis.is_empty());
    }
}
