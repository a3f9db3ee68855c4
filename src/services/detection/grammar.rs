// Grammar Matcher
// Structural templates: ordered word-class probes that must occur in sequence
// (intervening words allowed). One template per fallacy category.

use std::sync::OnceLock;

use crate::models::{Confidence, DetectionEvent, DetectionMethod, FallacyCategory, Sentence};
use crate::services::lexicon::WordClass;

pub struct GrammarTemplate {
    pub category: FallacyCategory,
    probes: Vec<WordClass>,
}

impl GrammarTemplate {
    fn new(category: FallacyCategory, probes: Vec<WordClass>) -> Self {
        Self { category, probes }
    }

    /// "INSULT + PERSON_REF + CONNECTOR + CLAIM"
    pub fn structure(&self) -> String {
        self.probes.iter().map(|p| p.name()).collect::<Vec<_>>().join(" + ")
    }

    /// True when every probe matches, each starting after the previous match ends.
    pub fn matches(&self, text: &str) -> bool {
        let mut cursor = 0;
        for probe in &self.probes {
            match probe.find_at(text, cursor) {
                Some(m) => cursor = m.end(),
                None => return false,
            }
        }
        true
    }
}

fn class(name: &str, terms: &[&str]) -> WordClass {
    WordClass::new(name, terms).expect("grammar word class")
}

pub fn templates() -> &'static [GrammarTemplate] {
    static TEMPLATES: OnceLock<Vec<GrammarTemplate>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        vec![
            GrammarTemplate::new(
                FallacyCategory::AdHominem,
                vec![
                    class("INSULT", &["bobo", "tanga", "walang pinag-aralan", "ignorante", "stupid"]),
                    class("PERSON_REF", &["ka", "ikaw", "mo", "niya", "siya"]),
                    class("CONNECTOR", &["kaya", "dahil", "kasi"]),
                    class("CLAIM", &["mali", "tama", "dapat"]),
                ],
            ),
            GrammarTemplate::new(
                FallacyCategory::AppealToEmotion,
                vec![
                    class("EMOTION", &["kawawa", "maawa", "isipin ang mga"]),
                    WordClass::with_trailing_word("TARGET", &["mga", "ang"]).expect("target class"),
                    class("REASON", &["kaya", "dahil", "dapat"]),
                ],
            ),
            GrammarTemplate::new(
                FallacyCategory::Bandwagon,
                vec![
                    class("MAJORITY", &["lahat", "marami", "karamihan", "milyun-milyong"]),
                    class("ACTION", &["gusto", "suporta", "ayaw", "naniniwala"]),
                    class("CONCLUSION", &["kaya", "so", "dahil", "dapat"]),
                ],
            ),
            GrammarTemplate::new(
                FallacyCategory::Strawman,
                vec![
                    class("MISREPRESENTATION", &["ibig mong sabihin", "gusto mo", "ayaw mo", "sinasabi mo"]),
                    class("CONNECTOR", &["ay", "na", "ng"]),
                    class("CLAIM", &["mali", "tama", "dapat", "pabayaan", "sirain"]),
                ],
            ),
            GrammarTemplate::new(
                FallacyCategory::FalseDilemma,
                vec![
                    class("CONDITION", &["kung hindi", "either", "dalawa lang"]),
                    class("OR", &["o", "or"]),
                    class("ALTERNATIVE", &["walang", "nothing", "wala"]),
                ],
            ),
            GrammarTemplate::new(
                FallacyCategory::Whataboutism,
                vec![
                    class("DEFLECTION", &["paano naman", "what about", "eh yung", "bakit hindi"]),
                    class("COUNTER_SUBJECT", &["nila", "kanila", "mga", "sila"]),
                ],
            ),
        ]
    })
}

/// Every template that matches the sentence, in template order.
pub fn match_grammar(sentence: &Sentence) -> Vec<DetectionEvent> {
    templates()
        .iter()
        .filter(|t| t.matches(&sentence.text))
        .map(|t| {
            let structure = t.structure();
            DetectionEvent {
                category: t.category,
                explanation: format!("Matched grammar pattern: {}", structure),
                phrase: structure,
                sentence: sentence.text.clone(),
                method: DetectionMethod::Grammar,
                confidence: Confidence::High,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str) -> Sentence {
        Sentence {
            ordinal: 1,
            text: text.to_string(),
        }
    }

    fn categories(text: &str) -> Vec<FallacyCategory> {
        match_grammar(&sentence(text)).into_iter().map(|e| e.category).collect()
    }

    #[test]
    fn test_ad_hominem_template() {
        let events = match_grammar(&sentence("Bobo ka kaya mali ka."));
        let hit = events.iter().find(|e| e.category == FallacyCategory::AdHominem).unwrap();
        assert_eq!(hit.phrase, "INSULT + PERSON_REF + CONNECTOR + CLAIM");
        assert_eq!(hit.confidence, Confidence::High);
        assert_eq!(hit.method, DetectionMethod::Grammar);
        assert!(hit.explanation.contains("INSULT + PERSON_REF"));
    }

    #[test]
    fn test_order_matters() {
        // Claim before insult: the probes are not satisfied in sequence.
        assert!(!categories("Mali ka kaya bobo siya.").contains(&FallacyCategory::AdHominem));
    }

    #[test]
    fn test_emotion_template_needs_target_word() {
        assert!(categories("Kawawa naman ang mga magsasaka kaya tulungan natin sila.")
            .contains(&FallacyCategory::AppealToEmotion));
        assert!(!categories("Kawawa naman kaya tulungan.").contains(&FallacyCategory::AppealToEmotion));
    }

    #[test]
    fn test_false_dilemma_template() {
        assert!(categories("Kung hindi ka sasama, o kaya aalis ka, walang mangyayari.")
            .contains(&FallacyCategory::FalseDilemma));
    }

    #[test]
    fn test_whataboutism_template() {
        assert!(categories("Eh yung ginawa nila noon?").contains(&FallacyCategory::Whataboutism));
    }

    #[test]
    fn test_multiple_templates_may_match() {
        let found = categories("Bobo ka kaya mali ka, paano naman sila?");
        assert!(found.contains(&FallacyCategory::AdHominem));
        assert!(found.contains(&FallacyCategory::Whataboutism));
    }

    #[test]
    fn test_structure_labels_unique() {
        let labels: Vec<String> = templates().iter().map(|t| t.structure()).collect();
        assert_eq!(labels.len(), 6);
        assert!(labels.contains(&"DEFLECTION + COUNTER_SUBJECT".to_string()));
        assert!(labels.contains(&"EMOTION + TARGET + REASON".to_string()));
    }

    #[test]
    fn test_neutral_sentence() {
        assert!(categories("Ang pulong ay magsisimula bukas ng umaga.").is_empty());
    }
}
