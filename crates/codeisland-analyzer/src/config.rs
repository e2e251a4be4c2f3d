//! Analyzer configuration
//!
//! Settings live in a small TOML file, by default
//! `<config dir>/codeisland/analyzer.toml`:
//!
//! ```toml
//! include_suggestions = true
//! disabled_rules = ["index-hint"]
//! or_chain_threshold = 3
//! example_limit = 10
//! ```
//!
//! Every key is optional; a missing file means defaults.

use crate::error::{AnalyzerError, Result};
use crate::suggestions::FindingKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of ` OR ` separators that trigger the IN suggestion
pub const DEFAULT_OR_CHAIN_THRESHOLD: usize = 3;

/// Default row count used in the LIMIT rewrite example
pub const DEFAULT_EXAMPLE_LIMIT: u64 = 10;

/// Configuration for the query advisor and reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Whether reports include optimization findings
    pub include_suggestions: bool,
    /// Rules that never fire
    pub disabled_rules: Vec<FindingKind>,
    /// Minimum number of OR separators for the IN suggestion
    pub or_chain_threshold: usize,
    /// Row count used in the LIMIT rewrite example
    pub example_limit: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            include_suggestions: true,
            disabled_rules: Vec::new(),
            or_chain_threshold: DEFAULT_OR_CHAIN_THRESHOLD,
            example_limit: DEFAULT_EXAMPLE_LIMIT,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether reports include findings
    pub fn with_suggestions(mut self, include: bool) -> Self {
        self.include_suggestions = include;
        self
    }

    /// Disables a rule
    pub fn without_rule(mut self, kind: FindingKind) -> Self {
        if !self.disabled_rules.contains(&kind) {
            self.disabled_rules.push(kind);
        }
        self
    }

    /// Sets the OR-chain threshold (at least 1)
    pub fn with_or_chain_threshold(mut self, threshold: usize) -> Self {
        self.or_chain_threshold = threshold.max(1);
        self
    }

    /// Sets the LIMIT used in rewrite examples
    pub fn with_example_limit(mut self, limit: u64) -> Self {
        self.example_limit = limit;
        self
    }

    /// Returns true if the rule has not been disabled
    pub fn is_rule_enabled(&self, kind: FindingKind) -> bool {
        !self.disabled_rules.contains(&kind)
    }

    /// Parses a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads `path`, or the default location when `path` is `None`.
    ///
    /// A missing default file yields defaults; an explicitly named file must
    /// exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading analyzer config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.or_chain_threshold == 0 {
            return Err(AnalyzerError::Configuration(
                "or_chain_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("codeisland").join("analyzer.toml"))
}
