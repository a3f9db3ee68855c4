// Charot Checker Core Services

pub mod text_processor;
pub mod lexicon;
pub mod rule_catalog;
pub mod config_store;
pub mod detection;

pub use text_processor::*;
pub use rule_catalog::{FallacyRule, RuleBook, RuleError};
pub use config_store::{AppConfig, ConfigError, ConfigStore, DetectionConfig};

pub use detection::{
    classify_sentence,
    detect_fallacies,
    ArgumentProfile,
    ContextReason,
    ContextVerdict,
    Detector,
    DetectorOptions,
};
