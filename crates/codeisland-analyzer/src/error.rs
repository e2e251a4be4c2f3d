//! Error types for CodeIsland Analyzer
//!
//! Analysis itself never fails; these errors only come from loading
//! configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for analyzer configuration
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;
