//! Query Report - Explanation and findings for one editor buffer
//!
//! A report is what a query-explanation panel renders: the breakdown of the
//! query plus, when enabled, the optimization findings. Blank input and text
//! with no recognisable clause produce no report at all.

use crate::config::AnalyzerConfig;
use crate::explain::{Explanation, explain};
use crate::suggestions::{Finding, QueryAdvisor, Severity, sorted_by_severity};
use serde::{Deserialize, Serialize};

/// Explanation plus findings for a single query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReport {
    pub explanation: Explanation,
    /// Empty when suggestions were not requested
    pub findings: Vec<Finding>,
    /// Whether the advisor ran for this report
    pub suggestions_requested: bool,
}

impl QueryReport {
    /// Returns true if suggestions were requested and none fired
    pub fn looks_good(&self) -> bool {
        self.suggestions_requested && self.findings.is_empty()
    }

    /// Returns true if any finding is a warning or worse
    pub fn has_warnings(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity.is_warning_or_above())
    }

    /// Returns findings sorted by severity (most severe first)
    pub fn sorted_findings(&self) -> Vec<&Finding> {
        sorted_by_severity(&self.findings)
    }

    /// One-line summary of the findings
    pub fn summary(&self) -> String {
        if !self.suggestions_requested {
            return "Optimization suggestions are disabled.".to_string();
        }

        let count = |severity: Severity| {
            self.findings
                .iter()
                .filter(|f| f.severity == severity)
                .count()
        };
        let errors = count(Severity::Error);
        let warnings = count(Severity::Warning);
        let info = count(Severity::Info);

        if self.findings.is_empty() {
            "Query looks good - no optimization suggestions.".to_string()
        } else if errors > 0 {
            format!(
                "Query has {} error(s), {} warning(s), and {} suggestion(s).",
                errors, warnings, info
            )
        } else if warnings > 0 {
            format!(
                "Query has {} warning(s) and {} suggestion(s).",
                warnings, info
            )
        } else {
            format!("Query has {} minor suggestion(s).", info)
        }
    }
}

/// Builds the report for a query, or `None` when there is nothing to show.
///
/// # Example
///
/// ```
/// use codeisland_analyzer::{AnalyzerConfig, build_report};
///
/// let report = build_report("SELECT * FROM employees;", &AnalyzerConfig::default()).unwrap();
/// assert_eq!(report.explanation.steps.len(), 2);
/// assert_eq!(report.findings.len(), 2);
///
/// assert!(build_report("   ", &AnalyzerConfig::default()).is_none());
/// ```
pub fn build_report(raw: &str, config: &AnalyzerConfig) -> Option<QueryReport> {
    if raw.trim().is_empty() {
        return None;
    }

    let explanation = explain(raw);
    if explanation.is_empty() {
        tracing::debug!("No recognised clauses, suppressing report");
        return None;
    }

    let findings = if config.include_suggestions {
        QueryAdvisor::with_config(config.clone()).analyze(raw)
    } else {
        Vec::new()
    };

    Some(QueryReport {
        explanation,
        findings,
        suggestions_requested: config.include_suggestions,
    })
}
