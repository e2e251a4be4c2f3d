//! Explanation Model - Data structures for plain-language query breakdowns

use crate::structure::QueryStructure;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overview used when there is nothing to explain
pub const UNPARSEABLE_OVERVIEW: &str = "Unable to parse query";

/// Coarse difficulty rating of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    /// Nothing could be extracted
    Unknown,
    Basic,
    Intermediate,
    Advanced,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Badge text shown next to the overview
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Basic => "BASIC",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clause handled by an execution step, in logical evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StepClause {
    #[serde(rename = "FROM/JOIN")]
    FromJoin,
    #[serde(rename = "WHERE")]
    Where,
    #[serde(rename = "GROUP BY")]
    GroupBy,
    #[serde(rename = "HAVING")]
    Having,
    #[serde(rename = "SELECT")]
    Select,
    #[serde(rename = "ORDER BY")]
    OrderBy,
    #[serde(rename = "LIMIT")]
    Limit,
}

impl StepClause {
    /// All clauses in the order the database logically evaluates them
    pub const EVALUATION_ORDER: [StepClause; 7] = [
        Self::FromJoin,
        Self::Where,
        Self::GroupBy,
        Self::Having,
        Self::Select,
        Self::OrderBy,
        Self::Limit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FromJoin => "FROM/JOIN",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::Having => "HAVING",
            Self::Select => "SELECT",
            Self::OrderBy => "ORDER BY",
            Self::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for StepClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the logical execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStep {
    /// 1-based position among the emitted steps
    pub ordinal: usize,
    pub clause: StepClause,
    /// Human-readable sentence describing the step
    pub narrative: String,
    /// SQL-like snippet reconstructed from the extracted components
    pub fragment: String,
}

/// Plain-language breakdown of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub overview: String,
    pub steps: Vec<ExecutionStep>,
    pub complexity: Complexity,
    /// The extracted structure, absent for blank input
    pub structure: Option<QueryStructure>,
}

impl Explanation {
    /// The "nothing to explain" result
    pub fn unparseable() -> Self {
        Self {
            overview: UNPARSEABLE_OVERVIEW.to_string(),
            steps: Vec::new(),
            complexity: Complexity::Unknown,
            structure: None,
        }
    }

    /// Returns true if the caller should render nothing
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the step for a clause, if it was emitted
    pub fn step(&self, clause: StepClause) -> Option<&ExecutionStep> {
        self.steps.iter().find(|s| s.clause == clause)
    }
}
