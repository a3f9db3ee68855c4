// Detection Module
// Fallacy detection core organized into specialized submodules:
// - context_filter: Argumentativeness gate for context-dependent rules
// - pattern_engine: Lexical trigger matching against the rule book
// - grammar: Ordered word-class templates per fallacy category
// - sequence: Token automaton for insult/connector/claim structure
// - aggregation: Per-sentence dedupe and overall tally
// - pipeline: The Detector wiring everything together

pub mod context_filter;
pub mod pattern_engine;
pub mod grammar;
pub mod sequence;
pub mod aggregation;
pub mod pipeline;

// Re-export commonly used items
pub use context_filter::{
    classify_sentence,
    detect_indicators,
    is_argumentative,
    ArgumentIndicators,
    ArgumentProfile,
    ContextReason,
    ContextVerdict,
};
pub use pattern_engine::match_patterns;
pub use grammar::{match_grammar, templates, GrammarTemplate};
pub use sequence::{check_sequence, scan, Marker, SequenceScan, SequenceState};
pub use aggregation::{aggregate_sentences, merge_sentence};
pub use pipeline::{detect_fallacies, Detector, DetectorOptions};
