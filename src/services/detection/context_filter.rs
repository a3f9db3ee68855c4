// Context Filter Module
// Decides whether a sentence is a plausible argumentative utterance before
// context-gated rules are allowed to fire on it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::services::lexicon::{
    alternation_source, WordClass, CLAIM_WORDS, CONNECTORS, COPULA_MARKERS, EXISTENTIALS,
    GREETINGS, OBJECT_NOUNS, PHYSICAL_DESCRIPTORS, POSSESSIVES, PRONOUNS, REPORTING_VERBS,
};
use crate::services::text_processor::word_count;

const MIN_ARGUMENT_WORDS: usize = 4;

/// Indicator threshold profile. One profile applies to a whole analysis run.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentProfile {
    /// Pronoun present and at least 3 of the 4 indicators.
    #[default]
    Strict,
    /// Any 2 of the 4 indicators.
    Lenient,
}

impl ArgumentProfile {
    pub fn from_str(val: &str) -> Self {
        match val.trim().to_lowercase().as_str() {
            "lenient" | "loose" => Self::Lenient,
            _ => Self::Strict,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArgumentProfile::Strict => "strict",
            ArgumentProfile::Lenient => "lenient",
        }
    }
}

/// Why a sentence was accepted or rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextReason {
    ObjectDescription,
    PhysicalDescription,
    Possession,
    Greeting,
    TooShort,
    WeakIndicators,
    Argumentative,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentIndicators {
    pub pronoun: bool,
    pub connector: bool,
    pub claim: bool,
    pub reporting_verb: bool,
}

impl ArgumentIndicators {
    pub fn count(&self) -> usize {
        [self.pronoun, self.connector, self.claim, self.reporting_verb]
            .iter()
            .filter(|b| **b)
            .count()
    }

    pub fn satisfies(&self, profile: ArgumentProfile) -> bool {
        match profile {
            ArgumentProfile::Strict => self.pronoun && self.count() >= 3,
            ArgumentProfile::Lenient => self.count() >= 2,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextVerdict {
    pub is_argumentative: bool,
    pub reason: ContextReason,
    pub indicators: ArgumentIndicators,
}

struct ContextClasses {
    pronouns: WordClass,
    connectors: WordClass,
    claims: WordClass,
    verbs: WordClass,
    objects: WordClass,
    physical: Regex,
    possession: Regex,
    greeting: Regex,
}

fn classes() -> &'static ContextClasses {
    static CLASSES: OnceLock<ContextClasses> = OnceLock::new();
    CLASSES.get_or_init(|| ContextClasses {
        pronouns: WordClass::new("PRONOUN", PRONOUNS).expect("pronoun class"),
        connectors: WordClass::new("CONNECTOR", CONNECTORS).expect("connector class"),
        claims: WordClass::new("CLAIM", CLAIM_WORDS).expect("claim class"),
        verbs: WordClass::new("REPORTING_VERB", REPORTING_VERBS).expect("verb class"),
        objects: WordClass::new("OBJECT", OBJECT_NOUNS).expect("object class"),
        physical: Regex::new(&format!(
            r"{}\s+{}\s+",
            alternation_source(PHYSICAL_DESCRIPTORS),
            alternation_source(COPULA_MARKERS)
        ))
        .expect("physical descriptor regex"),
        possession: Regex::new(&format!(
            r"{}\s+{}\s+",
            alternation_source(EXISTENTIALS),
            alternation_source(POSSESSIVES)
        ))
        .expect("possession regex"),
        greeting: Regex::new(&format!(r"^\s*{}(?:[\s,.!?]|$)", alternation_source(GREETINGS)))
            .expect("greeting regex"),
    })
}

pub fn detect_indicators(sentence: &str) -> ArgumentIndicators {
    let c = classes();
    ArgumentIndicators {
        pronoun: c.pronouns.is_match(sentence),
        connector: c.connectors.is_match(sentence),
        claim: c.claims.is_match(sentence),
        reporting_verb: c.verbs.is_match(sentence),
    }
}

/// Concrete object mentioned with no pronoun and no connector around it.
fn is_object_description(sentence: &str, indicators: &ArgumentIndicators) -> bool {
    classes().objects.is_match(sentence) && !indicators.pronoun && !indicators.connector
}

/// "malaki ang ...", "maganda yung ..."
fn is_physical_description(sentence: &str) -> bool {
    classes().physical.is_match(sentence)
}

/// "may akong ...", "wala niyang ..."
fn is_possession_statement(sentence: &str) -> bool {
    classes().possession.is_match(sentence)
}

fn is_greeting(sentence: &str) -> bool {
    classes().greeting.is_match(sentence)
}

/// Classify one sentence. Exclusions are checked in order and the first one
/// that applies decides; otherwise the indicator profile decides.
pub fn classify_sentence(sentence: &str, profile: ArgumentProfile) -> ContextVerdict {
    let indicators = detect_indicators(sentence);
    let reject = |reason| ContextVerdict {
        is_argumentative: false,
        reason,
        indicators,
    };

    if is_object_description(sentence, &indicators) {
        return reject(ContextReason::ObjectDescription);
    }
    if is_physical_description(sentence) {
        return reject(ContextReason::PhysicalDescription);
    }
    if is_possession_statement(sentence) {
        return reject(ContextReason::Possession);
    }
    if is_greeting(sentence) {
        return reject(ContextReason::Greeting);
    }
    if word_count(sentence) < MIN_ARGUMENT_WORDS {
        return reject(ContextReason::TooShort);
    }
    if !indicators.satisfies(profile) {
        return reject(ContextReason::WeakIndicators);
    }

    ContextVerdict {
        is_argumentative: true,
        reason: ContextReason::Argumentative,
        indicators,
    }
}

pub fn is_argumentative(sentence: &str, profile: ArgumentProfile) -> bool {
    classify_sentence(sentence, profile).is_argumentative
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_object_description() {
        let s = "Bobo ng lamesa.";
        assert!(is_object_description(s, &detect_indicators(s)));
        let s = "Sira ang lamesa kaya bumili kami.";
        assert!(!is_object_description(s, &detect_indicators(s)));
    }

    #[test]
    fn test_is_physical_description() {
        assert!(is_physical_description("Maganda ang bulaklak sa hardin."));
        assert!(is_physical_description("malaki yung bahay nila"));
        assert!(!is_physical_description("Maganda sana kung tumulong ka."));
    }

    #[test]
    fn test_is_possession_statement() {
        assert!(is_possession_statement("Wala akong pera ngayon."));
        assert!(is_possession_statement("May niyang kotse daw."));
        assert!(!is_possession_statement("Walang alam ang taong iyan."));
    }

    #[test]
    fn test_is_greeting() {
        assert!(is_greeting("Magandang umaga sa inyong lahat."));
        assert!(is_greeting("Salamat po sa pagdalo ninyo."));
        assert!(!is_greeting("Hindi ko kayo pasasalamatan."));
        assert!(is_greeting("Hello, mga kababayan."));
        assert!(is_greeting("Salamat"));
    }

    #[test]
    fn test_hyphenated_word_is_not_greeting() {
        assert!(!is_greeting("Hi-tech ka kaya mali ka, bobo ka."));
        let verdict = classify_sentence("Hi-tech ka kaya mali ka, bobo ka.", ArgumentProfile::Strict);
        assert!(verdict.is_argumentative);
    }

    #[test]
    fn test_classify_rejects_object_sentence() {
        let verdict = classify_sentence("Bobo ng lamesa.", ArgumentProfile::Strict);
        assert!(!verdict.is_argumentative);
        assert_eq!(verdict.reason, ContextReason::ObjectDescription);
    }

    #[test]
    fn test_classify_rejects_short() {
        let verdict = classify_sentence("Mali ka.", ArgumentProfile::Lenient);
        assert_eq!(verdict.reason, ContextReason::TooShort);
    }

    #[test]
    fn test_classify_accepts_directed_claim() {
        let verdict = classify_sentence("Bobo ka kaya mali ka.", ArgumentProfile::Strict);
        assert!(verdict.is_argumentative);
        assert_eq!(verdict.reason, ContextReason::Argumentative);
        assert_eq!(verdict.indicators.count(), 3);
    }

    #[test]
    fn test_profiles_differ() {
        // Connector + claim, no pronoun: lenient accepts, strict does not.
        let s = "Dapat tayong magkaisa dahil kailangan ito ng bayan.";
        assert!(!is_argumentative(s, ArgumentProfile::Strict));
        assert!(is_argumentative(s, ArgumentProfile::Lenient));

        // Pronoun + claim only: strict needs a third indicator.
        let s = "Sinungaling siya, hindi iyon tama.";
        assert!(is_argumentative(s, ArgumentProfile::Lenient));
        assert!(!is_argumentative(s, ArgumentProfile::Strict));

        // "at" counts as a connector.
        let s = "Sinungaling siya at hindi iyon tama.";
        assert!(is_argumentative(s, ArgumentProfile::Strict));
    }

    #[test]
    fn test_neutral_sentence_rejected_in_both_profiles() {
        let s = "Sumusuporta ang lahat sa bill na ito.";
        let verdict = classify_sentence(s, ArgumentProfile::Lenient);
        assert!(!verdict.is_argumentative);
        assert_eq!(verdict.reason, ContextReason::WeakIndicators);
        assert!(!is_argumentative(s, ArgumentProfile::Strict));
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(ArgumentProfile::from_str("lenient"), ArgumentProfile::Lenient);
        assert_eq!(ArgumentProfile::from_str(" STRICT "), ArgumentProfile::Strict);
        assert_eq!(ArgumentProfile::from_str("unknown"), ArgumentProfile::Strict);
    }
}
