//! Optimization Findings - Advisory results produced by the rule battery

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational suggestion
    Info,
    /// Likely mistake or costly pattern
    Warning,
    /// Reserved for rules that detect definite errors
    Error,
}

impl Severity {
    /// Returns true if this is at least a warning
    pub fn is_warning_or_above(&self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }

    /// Sort rank, most severe first
    fn rank(&self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Info => 2,
        }
    }

    /// Returns the severity level as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the rule that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    /// `SELECT *`
    #[serde(rename = "select-all")]
    SelectAll,
    /// Unfiltered, unbounded result set
    #[serde(rename = "missing-limit")]
    MissingLimit,
    /// LIKE with a `%` wildcard in the filter
    #[serde(rename = "like-pattern")]
    LikePattern,
    /// IN-subquery that might be a join
    #[serde(rename = "subquery-join")]
    SubqueryJoin,
    /// Chain of OR equalities
    #[serde(rename = "or-to-in")]
    OrToIn,
    /// Filter and sort on different columns
    #[serde(rename = "index-hint")]
    IndexHint,
    /// Aggregates mixed with plain columns and no GROUP BY
    #[serde(rename = "missing-groupby")]
    MissingGroupBy,
}

impl FindingKind {
    /// Every rule, in evaluation order
    pub const ALL: [FindingKind; 7] = [
        Self::SelectAll,
        Self::MissingLimit,
        Self::LikePattern,
        Self::SubqueryJoin,
        Self::OrToIn,
        Self::IndexHint,
        Self::MissingGroupBy,
    ];

    /// Returns the tag used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelectAll => "select-all",
            Self::MissingLimit => "missing-limit",
            Self::LikePattern => "like-pattern",
            Self::SubqueryJoin => "subquery-join",
            Self::OrToIn => "or-to-in",
            Self::IndexHint => "index-hint",
            Self::MissingGroupBy => "missing-groupby",
        }
    }

    /// Severity every finding of this kind carries
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingLimit | Self::MissingGroupBy => Severity::Warning,
            _ => Severity::Info,
        }
    }

    /// Short title shown above the message
    pub fn title(&self) -> &'static str {
        match self {
            Self::SelectAll => "Consider selecting specific columns",
            Self::MissingLimit => "Consider adding LIMIT clause",
            Self::LikePattern => "LIKE pattern optimization",
            Self::SubqueryJoin => "Consider using JOIN instead of subquery",
            Self::OrToIn => "Consider using IN instead of multiple OR conditions",
            Self::IndexHint => "Index consideration",
            Self::MissingGroupBy => "May need GROUP BY clause",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single advisory finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub title: String,
    /// Human-readable message explaining the issue
    pub message: String,
    /// The query rewritten to follow the suggestion, if the rule has one
    pub rewrite_example: Option<String>,
}

impl Finding {
    /// Creates a finding with the kind's default severity and title
    pub fn new(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            title: kind.title().to_string(),
            message: message.into(),
            rewrite_example: None,
        }
    }

    /// Sets the rewritten example query
    pub fn with_rewrite(mut self, example: impl Into<String>) -> Self {
        self.rewrite_example = Some(example.into());
        self
    }
}

/// Returns findings sorted by severity (errors first), keeping rule order
/// within a severity.
pub fn sorted_by_severity(findings: &[Finding]) -> Vec<&Finding> {
    let mut sorted: Vec<_> = findings.iter().collect();
    sorted.sort_by_key(|f| f.severity.rank());
    sorted
}
