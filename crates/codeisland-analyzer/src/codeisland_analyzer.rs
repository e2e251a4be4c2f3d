//! CodeIsland Analyzer - Query structure extraction, explanations and hints
//!
//! This crate provides functionality for:
//! - Extracting clause components from free-form SQL text
//! - Explaining a query in plain language, in logical evaluation order
//! - Heuristic optimization suggestions for learners
//!
//! Every entry point is a pure function of its input text. Blank input and
//! text that is not SQL at all produce empty results, never errors.
//!
//! # Example
//!
//! ```
//! use codeisland_analyzer::{Complexity, analyze, explain};
//!
//! let explanation = explain("SELECT * FROM employees;");
//! assert_eq!(
//!     explanation.overview,
//!     "This query selects all columns, from the employees table."
//! );
//! assert_eq!(explanation.complexity, Complexity::Basic);
//!
//! let findings = analyze("SELECT * FROM employees;");
//! assert_eq!(findings.len(), 2);
//! ```

pub mod config;
mod error;
pub mod explain;
pub mod report;
mod scan;
pub mod structure;
pub mod suggestions;

pub use config::AnalyzerConfig;
pub use error::*;
pub use explain::*;
pub use report::*;
pub use structure::*;
pub use suggestions::*;
