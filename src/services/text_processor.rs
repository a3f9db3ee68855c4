// Text Processing Service
// Normalization, sentence segmentation and tokenization for speech text

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Sentence;

fn space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}\u{2009}\u{202F}]").expect("space regex"))
}

fn newline_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n+").expect("newline regex"))
}

fn boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([.!?])\s+").expect("boundary regex"))
}

/// Normalize quotes, odd spaces and line endings. Blank lines are dropped.
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace('\u{2026}', "...");

    s = space_re().replace_all(&s, " ").to_string();
    s = s.replace("\r\n", "\n").replace('\r', "\n");

    s.lines()
        .map(|ln| ln.trim())
        .filter(|ln| !ln.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Paragraph breaks become sentence breaks: every run of newlines turns into ". ".
pub fn preprocess_text(text: &str) -> String {
    let normalized = normalize_punctuation(text);
    newline_run_re()
        .replace_all(&normalized, ". ")
        .trim()
        .to_string()
}

/// Split on whitespace that follows `.`, `!` or `?`, keeping the punctuation.
///
/// No abbreviation handling: "Sen. Cruz" is two sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    // Rust regex has no lookbehind; mark the boundary then split on the marker.
    let marked = boundary_re().replace_all(text, "$1\x00");
    marked
        .split('\x00')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

/// Full segmentation: raw text in, 1-based ordinal sentences out.
/// Whitespace-only input yields no sentences; any other input yields at least one.
pub fn segment_sentences(text: &str) -> Vec<Sentence> {
    split_sentences(&preprocess_text(text))
        .into_iter()
        .enumerate()
        .map(|(i, text)| Sentence { ordinal: i + 1, text })
        .collect()
}

/// Whitespace token count, punctuation included.
pub fn word_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

/// Lowercased whitespace tokens with leading/trailing punctuation removed.
/// Inner hyphens and apostrophes survive ("pinag-aralan", "you're").
pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
