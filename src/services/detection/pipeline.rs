// Detection Pipeline
// Segment -> filter -> pattern/grammar/sequence -> merge, per sentence

use rayon::prelude::*;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, info};

use crate::models::{AnalysisResult, Sentence, SentenceAnalysis};
use crate::services::config_store::AppConfig;
use crate::services::rule_catalog::{RuleBook, RuleError};
use crate::services::text_processor::segment_sentences;

use super::aggregation::{aggregate_sentences, merge_sentence};
use super::context_filter::{classify_sentence, ArgumentProfile};
use super::grammar::match_grammar;
use super::pattern_engine::match_patterns;
use super::sequence::check_sequence;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DetectorOptions {
    pub profile: ArgumentProfile,
    /// Evaluate sentences on the rayon pool. Output order is unaffected.
    pub parallel: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            profile: ArgumentProfile::Strict,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Detector {
    rules: RuleBook,
    options: DetectorOptions,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(RuleBook::bundled().clone(), DetectorOptions::default())
    }
}

impl Detector {
    pub fn new(rules: RuleBook, options: DetectorOptions) -> Self {
        Self { rules, options }
    }

    /// Build from stored settings. A configured rules path must load cleanly.
    pub fn from_config(config: &AppConfig) -> Result<Self, RuleError> {
        let rules = match config.detection.rules_path.as_deref() {
            Some(path) => RuleBook::from_path(path)?,
            None => RuleBook::bundled().clone(),
        };
        let options = DetectorOptions {
            profile: ArgumentProfile::from_str(&config.detection.argument_profile),
            parallel: config.detection.parallel,
        };
        Ok(Self::new(rules, options))
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn options(&self) -> DetectorOptions {
        self.options
    }

    /// Analyze a text block. Empty or whitespace-only input yields an empty result.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let t0 = Instant::now();
        let sentences = segment_sentences(text);
        if sentences.is_empty() {
            return AnalysisResult::default();
        }

        let analyzed: Vec<SentenceAnalysis> = if self.options.parallel {
            self.analyze_parallel(&sentences)
        } else {
            self.analyze_sequential(&sentences)
        };
        let result = aggregate_sentences(analyzed);

        info!(
            "[pipeline] {} sentences, {} flagged, {} fallacies ({} profile, {}) in {}ms",
            sentences.len(),
            result.sentence_analysis.len(),
            result.total_fallacies,
            self.options.profile.as_str(),
            if self.options.parallel { "parallel" } else { "sequential" },
            t0.elapsed().as_millis()
        );
        result
    }

    // par_iter over a slice is indexed, so collect keeps ordinal order.
    fn analyze_parallel(&self, sentences: &[Sentence]) -> Vec<SentenceAnalysis> {
        sentences
            .par_iter()
            .filter_map(|s| self.analyze_sentence(s))
            .collect()
    }

    fn analyze_sequential(&self, sentences: &[Sentence]) -> Vec<SentenceAnalysis> {
        sentences
            .iter()
            .filter_map(|s| self.analyze_sentence(s))
            .collect()
    }

    /// Run all three detectors on one sentence and merge their findings.
    pub fn analyze_sentence(&self, sentence: &Sentence) -> Option<SentenceAnalysis> {
        let verdict = classify_sentence(&sentence.text, self.options.profile);
        debug!(
            "[pipeline] Sentence {}: {:?} ({} indicators)",
            sentence.ordinal,
            verdict.reason,
            verdict.indicators.count()
        );

        let mut events = match_patterns(&self.rules, sentence, verdict.is_argumentative);
        if verdict.is_argumentative {
            events.extend(match_grammar(sentence));
            events.extend(check_sequence(sentence));
        }

        merge_sentence(sentence.ordinal, &sentence.text, verdict.is_argumentative, events)
    }
}

/// Analyze with the process-wide default detector (bundled rules, strict).
pub fn detect_fallacies(text: &str) -> AnalysisResult {
    static DEFAULT: OnceLock<Detector> = OnceLock::new();
    DEFAULT.get_or_init(Detector::default).analyze(text)
}
