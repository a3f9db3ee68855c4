// Sequence Checker
// Single-pass token automaton for the insult -> connector -> claim structure

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::models::{Confidence, DetectionEvent, DetectionMethod, FallacyCategory, Sentence};
use crate::services::lexicon::{SEQ_CLAIMS, SEQ_CONNECTORS, SEQ_INSULTS, SEQ_PERSON_REFS};
use crate::services::text_processor::tokenize;

const ARROW: &str = " → ";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SequenceState {
    Start,
    HasInsult,
    HasConnector,
    Complete,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Marker {
    Insult,
    Connector,
    Claim,
}

impl Marker {
    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Insult => "INSULT",
            Marker::Connector => "CONNECTOR",
            Marker::Claim => "CLAIM",
        }
    }
}

struct WordSets {
    insults: HashSet<&'static str>,
    connectors: HashSet<&'static str>,
    claims: HashSet<&'static str>,
    person_refs: HashSet<&'static str>,
}

fn word_sets() -> &'static WordSets {
    static SETS: OnceLock<WordSets> = OnceLock::new();
    SETS.get_or_init(|| WordSets {
        insults: SEQ_INSULTS.iter().copied().collect(),
        connectors: SEQ_CONNECTORS.iter().copied().collect(),
        claims: SEQ_CLAIMS.iter().copied().collect(),
        person_refs: SEQ_PERSON_REFS.iter().copied().collect(),
    })
}

/// Final automaton configuration after one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceScan {
    pub state: SequenceState,
    pub stack: Vec<Marker>,
    pub has_person_ref: bool,
}

impl SequenceScan {
    pub fn structure(&self) -> String {
        self.stack.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(ARROW)
    }

    pub fn confidence(&self) -> Option<Confidence> {
        if !self.has_person_ref {
            return None;
        }
        match self.state {
            SequenceState::Complete if self.stack.len() == 3 => Some(Confidence::High),
            SequenceState::HasConnector if self.stack.len() >= 2 => Some(Confidence::Medium),
            _ => None,
        }
    }
}

/// Walk the tokens once. States only move forward; a token that does not fit
/// the current state is ignored.
pub fn scan(text: &str) -> SequenceScan {
    let sets = word_sets();
    let mut state = SequenceState::Start;
    let mut stack = Vec::with_capacity(3);
    let mut has_person_ref = false;

    for token in tokenize(text) {
        let token = token.as_str();
        if sets.person_refs.contains(token) {
            has_person_ref = true;
        }
        match state {
            SequenceState::Start if sets.insults.contains(token) => {
                state = SequenceState::HasInsult;
                stack.push(Marker::Insult);
            }
            SequenceState::HasInsult if sets.connectors.contains(token) => {
                state = SequenceState::HasConnector;
                stack.push(Marker::Connector);
            }
            SequenceState::HasConnector if sets.claims.contains(token) => {
                state = SequenceState::Complete;
                stack.push(Marker::Claim);
            }
            _ => {}
        }
    }

    SequenceScan {
        state,
        stack,
        has_person_ref,
    }
}

pub fn check_sequence(sentence: &Sentence) -> Option<DetectionEvent> {
    let result = scan(&sentence.text);
    let confidence = result.confidence()?;
    Some(DetectionEvent {
        category: FallacyCategory::AdHominem,
        phrase: result.structure(),
        explanation: "Detected via sequence state analysis".to_string(),
        sentence: sentence.text.clone(),
        method: DetectionMethod::Sequence,
        confidence,
    })
}
