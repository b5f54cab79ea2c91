//! Fixer contract and implementations
//!
//! A fixer inspects a `TokenStream` and mutates it in place. The host owns
//! tokenizing, file traversal and writing results back.

pub mod property;

pub use property::ArrayPropertyDefaultValueFixer;

use std::collections::HashMap;
use std::path::Path;

use propfix_core::{StructureError, TokenStream};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to the host by a fixer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixerError {
    /// The stream is not well-formed source; nothing was inserted for the
    /// class being processed
    #[error("structural assumption violated: {0}")]
    StructuralAssumptionViolation(#[from] StructureError),

    #[error("invalid value for option `{name}`: {reason}")]
    InvalidOption { name: String, reason: String },
}

/// Configuration passed to fixers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixerConfig {
    /// Rule-specific options
    #[serde(default)]
    pub options: HashMap<String, ConfigValue>,
}

impl FixerConfig {
    pub fn with_option(mut self, name: impl Into<String>, value: ConfigValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }
}

/// Configuration value types for fixer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    String(String),
    Number(i64),
}

/// A configurable option for a fixer
#[derive(Debug, Clone)]
pub struct FixerOption {
    pub name: &'static str,
    pub description: &'static str,
    pub option_type: OptionType,
    pub default: Option<ConfigValue>,
}

/// Type of a fixer option
#[derive(Debug, Clone)]
pub enum OptionType {
    Bool,
    Number,
}

/// Human-facing description of a fixer
#[derive(Debug, Clone, Serialize)]
pub struct FixerDefinition {
    pub summary: &'static str,
    pub code_samples: Vec<CodeSample>,
}

/// A before-fix code example
#[derive(Debug, Clone, Serialize)]
pub struct CodeSample {
    pub code: &'static str,
}

impl CodeSample {
    pub fn new(code: &'static str) -> Self {
        Self { code }
    }
}

/// A formatting fixer that mutates a PHP token stream
pub trait Fixer: Send + Sync {
    /// Internal name for this fixer
    fn name(&self) -> &'static str;

    /// Summary and examples
    fn definition(&self) -> FixerDefinition;

    /// Ordering hint among fixers sharing a stream (higher = runs first)
    fn priority(&self) -> i32;

    /// Whether this fixer can change runtime behaviour
    fn is_risky(&self) -> bool {
        false
    }

    /// Whether the fixer applies to this file at all
    fn supports(&self, _path: &Path) -> bool {
        true
    }

    /// Cheap pre-filter; `fix` is only invoked when this returns true
    fn is_candidate(&self, stream: &TokenStream) -> bool;

    /// Apply the fix in place
    fn fix(&self, stream: &mut TokenStream) -> Result<(), FixerError>;

    /// Get configurable options for this fixer
    fn options(&self) -> Vec<FixerOption> {
        vec![]
    }
}

/// Run `fixer` over `source` the way a host would: tokenize, pre-filter,
/// fix and render. Returns the source unchanged when not a candidate.
pub fn fix_source(fixer: &dyn Fixer, source: &str) -> Result<String, FixerError> {
    let mut stream = TokenStream::from_source(source);
    if !fixer.is_candidate(&stream) {
        return Ok(source.to_string());
    }
    fixer.fix(&mut stream)?;
    Ok(stream.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_value_deserializes_untagged() {
        let config: FixerConfig = serde_json::from_str(
            r#"{"options":{"lookback":3,"doc_comments_only":true,"name":"x"}}"#,
        )
        .unwrap();
        assert_eq!(config.options.get("lookback"), Some(&ConfigValue::Number(3)));
        assert_eq!(config.options.get("doc_comments_only"), Some(&ConfigValue::Bool(true)));
        assert_eq!(config.options.get("name"), Some(&ConfigValue::String("x".to_string())));
    }

    #[test]
    fn test_missing_options_default_to_empty() {
        let config: FixerConfig = serde_json::from_str("{}").unwrap();
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_with_option() {
        let config = FixerConfig::default().with_option("lookback", ConfigValue::Number(2));
        assert_eq!(config.options.len(), 1);
    }
}
