// Charot Checker Data Models
// Detection results exchanged between the pipeline and its callers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============ Taxonomy ============

/// Closed set of fallacy kinds the detector can report.
///
/// Variant order is the canonical display order; `fallacyCounts` is keyed and
/// sorted by it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FallacyCategory {
    #[serde(rename = "Ad Hominem")]
    AdHominem,
    #[serde(rename = "Appeal to Emotion")]
    AppealToEmotion,
    #[serde(rename = "Bandwagon")]
    Bandwagon,
    #[serde(rename = "Strawman", alias = "Straw Man")]
    Strawman,
    #[serde(rename = "False Dilemma")]
    FalseDilemma,
    #[serde(rename = "Whataboutism")]
    Whataboutism,
    #[serde(rename = "Hasty Generalization")]
    HastyGeneralization,
}

impl FallacyCategory {
    pub const ALL: [FallacyCategory; 7] = [
        FallacyCategory::AdHominem,
        FallacyCategory::AppealToEmotion,
        FallacyCategory::Bandwagon,
        FallacyCategory::Strawman,
        FallacyCategory::FalseDilemma,
        FallacyCategory::Whataboutism,
        FallacyCategory::HastyGeneralization,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FallacyCategory::AdHominem => "Ad Hominem",
            FallacyCategory::AppealToEmotion => "Appeal to Emotion",
            FallacyCategory::Bandwagon => "Bandwagon",
            FallacyCategory::Strawman => "Strawman",
            FallacyCategory::FalseDilemma => "False Dilemma",
            FallacyCategory::Whataboutism => "Whataboutism",
            FallacyCategory::HastyGeneralization => "Hasty Generalization",
        }
    }

    /// Lenient label lookup used when loading rule files.
    /// Accepts the long-form labels ("Ad Hominem (Personal Attack)") and the
    /// "Straw Man" spelling.
    pub fn from_label(label: &str) -> Option<Self> {
        let norm = label.trim().to_lowercase();
        let head = norm.split('(').next().unwrap_or("").trim();
        match head {
            "ad hominem" => Some(Self::AdHominem),
            "appeal to emotion" | "emotional appeal" => Some(Self::AppealToEmotion),
            "bandwagon" => Some(Self::Bandwagon),
            "strawman" | "straw man" => Some(Self::Strawman),
            "false dilemma" => Some(Self::FalseDilemma),
            "whataboutism" => Some(Self::Whataboutism),
            "hasty generalization" => Some(Self::HastyGeneralization),
            _ => None,
        }
    }
}

impl fmt::Display for FallacyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength of the evidence behind a finding. `Low < Medium < High`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "LOW",
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which detection strategy produced a finding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Pattern,
    Grammar,
    Sequence,
}

impl DetectionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMethod::Pattern => "pattern",
            DetectionMethod::Grammar => "grammar",
            DetectionMethod::Sequence => "sequence",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Segmentation ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// 1-based position in the segmented sequence.
    pub ordinal: usize,
    pub text: String,
}

// ============ Findings ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionEvent {
    pub category: FallacyCategory,
    /// Matched surface phrase, or the structure label for grammar/sequence hits.
    pub phrase: String,
    pub explanation: String,
    pub sentence: String,
    pub method: DetectionMethod,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceAnalysis {
    pub sentence_number: usize,
    pub sentence: String,
    pub fallacies: Vec<DetectionEvent>,
    pub is_argumentative: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_fallacies: usize,
    pub fallacy_counts: BTreeMap<FallacyCategory, usize>,
    pub sentence_analysis: Vec<SentenceAnalysis>,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.total_fallacies == 0
    }

    /// All findings in sentence order.
    pub fn events(&self) -> impl Iterator<Item = &DetectionEvent> {
        self.sentence_analysis.iter().flat_map(|s| s.fallacies.iter())
    }

    /// Category distribution, most frequent first (ties keep category order).
    pub fn distribution(&self) -> Vec<(FallacyCategory, usize)> {
        let mut dist: Vec<(FallacyCategory, usize)> =
            self.fallacy_counts.iter().map(|(c, n)| (*c, *n)).collect();
        dist.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        dist
    }

    /// Plain-text summary for terminal output.
    pub fn summary_lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec!["No fallacy found.".to_string()];
        }

        let mut lines = Vec::new();
        let heading = if self.total_fallacies == 1 { "fallacy" } else { "fallacies" };
        lines.push(format!("{} {} found", self.total_fallacies, heading));
        for (category, count) in self.distribution() {
            let pct = count as f64 * 100.0 / self.total_fallacies as f64;
            let noun = if count == 1 { "instance" } else { "instances" };
            lines.push(format!("  {:<22} {} {} ({:.1}%)", category.as_str(), count, noun, pct));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_order() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert_eq!(
            [Confidence::High, Confidence::Low, Confidence::Medium].iter().max(),
            Some(&Confidence::High)
        );
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(
            FallacyCategory::from_label("Ad Hominem (Personal Attack)"),
            Some(FallacyCategory::AdHominem)
        );
        assert_eq!(
            FallacyCategory::from_label("Bandwagon (Argumentum ad Populum)"),
            Some(FallacyCategory::Bandwagon)
        );
        assert_eq!(FallacyCategory::from_label("Straw Man"), Some(FallacyCategory::Strawman));
        assert_eq!(FallacyCategory::from_label("Red Herring"), None);
        for category in FallacyCategory::ALL {
            assert_eq!(FallacyCategory::from_label(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_result_serialization() {
        let mut counts = BTreeMap::new();
        counts.insert(FallacyCategory::Whataboutism, 1);
        let result = AnalysisResult {
            total_fallacies: 1,
            fallacy_counts: counts,
            sentence_analysis: vec![SentenceAnalysis {
                sentence_number: 2,
                sentence: "Paano naman sila?".to_string(),
                fallacies: vec![DetectionEvent {
                    category: FallacyCategory::Whataboutism,
                    phrase: "Paano naman".to_string(),
                    explanation: "Deflects criticism to another issue".to_string(),
                    sentence: "Paano naman sila?".to_string(),
                    method: DetectionMethod::Pattern,
                    confidence: Confidence::Medium,
                }],
                is_argumentative: false,
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalFallacies"], 1);
        assert_eq!(json["fallacyCounts"]["Whataboutism"], 1);
        assert_eq!(json["sentenceAnalysis"][0]["sentenceNumber"], 2);
        assert_eq!(json["sentenceAnalysis"][0]["fallacies"][0]["method"], "pattern");
        assert_eq!(json["sentenceAnalysis"][0]["fallacies"][0]["confidence"], "MEDIUM");

        let parsed: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_summary_lines() {
        assert_eq!(AnalysisResult::default().summary_lines(), vec!["No fallacy found."]);

        let mut counts = BTreeMap::new();
        counts.insert(FallacyCategory::AdHominem, 1);
        counts.insert(FallacyCategory::Bandwagon, 3);
        let result = AnalysisResult {
            total_fallacies: 4,
            fallacy_counts: counts,
            sentence_analysis: vec![],
        };
        let lines = result.summary_lines();
        assert_eq!(lines[0], "4 fallacies found");
        assert!(lines[1].contains("Bandwagon"));
        assert!(lines[1].contains("75.0%"));
        assert!(lines[2].contains("Ad Hominem"));
    }
}
