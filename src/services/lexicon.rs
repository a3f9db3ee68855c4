// Lexicon
// Filipino/English word classes shared by the filter, the grammar matcher and
// the sequence checker, plus the whole-word matcher they compile into.

use regex::{Match, Regex};
use std::collections::HashSet;

// ============ Argument indicators ============

pub const PRONOUNS: &[&str] = &[
    "ka", "ikaw", "kayo", "kita", "mo", "niya", "siya", "nila", "sila", "ninyo", "natin", "atin",
    "namin", "amin",
];

pub const CONNECTORS: &[&str] = &[
    "kaya", "dahil", "kasi", "because", "so", "therefore", "kaya nga", "dahil sa", "kung",
    "kapag", "samantalang", "pero", "ngunit", "subalit", "at", "however", "but",
];

pub const CLAIM_WORDS: &[&str] = &[
    "mali", "tama", "dapat", "wrong", "right", "should", "shouldn't", "ayaw", "gusto", "need",
    "kailangan", "wag", "huwag", "maganda", "pangit", "masama", "mabuti",
];

pub const REPORTING_VERBS: &[&str] = &[
    "sinabi", "nagsabi", "sabi", "said", "says", "claims", "argue", "argues", "believes",
    "thinks", "told", "mentioned",
];

// ============ Non-argument exclusions ============

pub const OBJECT_NOUNS: &[&str] = &[
    "lamesa", "upuan", "pinto", "bintana", "bahay", "kotse", "libro", "cellphone", "computer",
    "phone", "laptop", "tablet", "keyboard", "mouse", "monitor", "damit", "sapatos", "pagkain",
    "inumin", "hayop", "pusa", "aso", "manok", "ibon", "halaman", "puno", "bulaklak", "bagay",
    "gamit", "appliance", "furniture", "gadget", "tool", "eraser", "pencil", "pen", "notebook",
    "bag", "wallet", "watch", "clock",
];

pub const PHYSICAL_DESCRIPTORS: &[&str] = &[
    "malaki", "maliit", "maganda", "puti", "itim", "pula", "asul", "berde", "dilaw", "malambot",
    "matigas", "mainit", "malamig",
];

pub const COPULA_MARKERS: &[&str] = &["ang", "ng", "yung"];

pub const EXISTENTIALS: &[&str] = &["may", "meron", "wala"];

pub const POSSESSIVES: &[&str] = &["akong", "kong", "niyang", "nyang"];

pub const GREETINGS: &[&str] = &[
    "hi", "hello", "kumusta", "kamusta", "good morning", "good afternoon", "good evening",
    "magandang umaga", "magandang hapon", "magandang gabi", "salamat", "thank you",
];

// ============ Sequence checker word sets (single tokens) ============

pub const SEQ_PERSON_REFS: &[&str] = &["ka", "ikaw", "mo", "niya", "siya", "kayo", "nila"];

pub const SEQ_INSULTS: &[&str] = &["bobo", "tanga", "ignorante", "stupid", "inutil", "abnoy"];

pub const SEQ_CONNECTORS: &[&str] = &["kaya", "dahil", "kasi", "because", "so", "therefore"];

pub const SEQ_CLAIMS: &[&str] = &[
    "mali", "tama", "dapat", "wrong", "right", "should", "ayaw", "gusto",
];

/// Regex source for one phrase with word boundaries on its alphanumeric edges.
/// Inner spaces match any whitespace run.
fn phrase_source(term: &str) -> String {
    let escaped = regex::escape(term.trim()).replace(' ', r"\s+");
    let starts_word = term.trim().chars().next().map(is_word_char).unwrap_or(false);
    let ends_word = term.trim().chars().last().map(is_word_char).unwrap_or(false);
    format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        escaped,
        if ends_word { r"\b" } else { "" }
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive alternation of `terms`, longest first so multi-word
/// phrases win over their prefixes ("lahat naman" before "lahat").
pub fn alternation_source(terms: &[impl AsRef<str>]) -> String {
    let mut sorted: Vec<&str> = terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect();
    let mut seen = HashSet::new();
    sorted.retain(|t| seen.insert(t.to_lowercase()));
    sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));

    let body = sorted.into_iter().map(phrase_source).collect::<Vec<_>>().join("|");
    format!("(?i)(?:{})", body)
}

/// A named set of words/phrases matched whole-word and case-insensitively.
#[derive(Debug, Clone)]
pub struct WordClass {
    name: String,
    re: Regex,
}

impl WordClass {
    pub fn new(name: &str, terms: &[impl AsRef<str>]) -> Result<Self, regex::Error> {
        Self::from_source(name, &alternation_source(terms))
    }

    /// Word class whose match must be followed by one more word ("mga bata").
    pub fn with_trailing_word(name: &str, terms: &[impl AsRef<str>]) -> Result<Self, regex::Error> {
        Self::from_source(name, &format!(r"{}\s+\w+", alternation_source(terms)))
    }

    pub fn from_source(name: &str, source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.to_string(),
            re: Regex::new(source)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }

    /// First match starting at or after byte offset `start`.
    pub fn find_at<'t>(&self, text: &'t str, start: usize) -> Option<Match<'t>> {
        self.re.find_at(text, start)
    }

    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = Match<'t>> + 'r
    where
        't: 'r,
    {
        self.re.find_iter(text)
    }
}
