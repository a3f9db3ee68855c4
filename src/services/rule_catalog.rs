// Rule Catalog
// Fallacy rule tables: bundled data file, custom rule files, load-time validation

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

use crate::models::FallacyCategory;
use crate::services::lexicon::WordClass;

const BUNDLED_RULES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/fallacy_rules.json"));

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("rule file parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("rule file defines no rules")]
    EmptyRuleSet,
    #[error("unknown fallacy category: {0:?}")]
    UnknownCategory(String),
    #[error("rule {category} has no trigger groups")]
    NoTriggers { category: FallacyCategory },
    #[error("rule {category} trigger group {group} is empty")]
    EmptyTriggerGroup { category: FallacyCategory, group: usize },
    #[error("rule {category} trigger group {group} does not compile: {source}")]
    InvalidPattern {
        category: FallacyCategory,
        group: usize,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleFile {
    #[serde(default)]
    version: String,
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleEntry {
    category: String,
    description: String,
    #[serde(default = "default_true")]
    requires_context: bool,
    triggers: Vec<Vec<String>>,
}

fn default_true() -> bool {
    true
}

/// One fallacy kind with its trigger phrase groups. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct FallacyRule {
    pub category: FallacyCategory,
    pub description: String,
    pub requires_context: bool,
    groups: Vec<WordClass>,
}

impl FallacyRule {
    pub fn trigger_groups(&self) -> &[WordClass] {
        &self.groups
    }
}

#[derive(Debug, Clone)]
pub struct RuleBook {
    version: String,
    rules: Vec<FallacyRule>,
}

impl RuleBook {
    pub fn from_json_str(raw: &str) -> Result<Self, RuleError> {
        let parsed: RuleFile = serde_json::from_str(raw)?;
        if parsed.rules.is_empty() {
            return Err(RuleError::EmptyRuleSet);
        }

        let mut rules = Vec::with_capacity(parsed.rules.len());
        for entry in parsed.rules {
            let category = FallacyCategory::from_label(&entry.category)
                .ok_or_else(|| RuleError::UnknownCategory(entry.category.clone()))?;
            if entry.triggers.is_empty() {
                return Err(RuleError::NoTriggers { category });
            }

            let mut groups = Vec::with_capacity(entry.triggers.len());
            for (idx, terms) in entry.triggers.iter().enumerate() {
                let group = idx + 1;
                if terms.iter().all(|t| t.trim().is_empty()) {
                    return Err(RuleError::EmptyTriggerGroup { category, group });
                }
                let name = format!("{}#{}", category.as_str(), group);
                let class = WordClass::new(&name, terms.as_slice())
                    .map_err(|source| RuleError::InvalidPattern { category, group, source })?;
                groups.push(class);
            }

            rules.push(FallacyRule {
                category,
                description: entry.description.trim().to_string(),
                requires_context: entry.requires_context,
                groups,
            });
        }

        Ok(Self {
            version: parsed.version,
            rules,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, RuleError> {
        let raw = fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let book = Self::from_json_str(&raw)?;
        info!(
            "[rule_catalog] Loaded {} rules ({}) from {}",
            book.rules.len(),
            book.version,
            path.display()
        );
        Ok(book)
    }

    /// Rule table shipped with the crate, validated on first use.
    pub fn bundled() -> &'static RuleBook {
        static BOOK: OnceLock<RuleBook> = OnceLock::new();
        BOOK.get_or_init(|| RuleBook::from_json_str(BUNDLED_RULES).expect("fallacy_rules.json invalid"))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn rules(&self) -> &[FallacyRule] {
        &self.rules
    }

    pub fn rule(&self, category: FallacyCategory) -> Option<&FallacyRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
