//! Query Structure Model - Value types produced by the extractor

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel select item meaning "all columns"
pub const ALL_COLUMNS: &str = "*";

/// Clause and feature detection results
///
/// Each flag is an independent test against the query text; several may be
/// true at once and none implies another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureFlags {
    pub has_select: bool,
    pub has_from: bool,
    pub has_where: bool,
    pub has_join: bool,
    pub has_group_by: bool,
    pub has_having: bool,
    pub has_order_by: bool,
    pub has_limit: bool,
    pub has_distinct: bool,
    /// `COUNT(`, `SUM(`, `AVG(`, `MAX(`, `MIN(` or `GROUP_CONCAT(`
    pub has_aggregate: bool,
    /// A parenthesized group containing `SELECT`
    pub has_subquery: bool,
    /// `WITH <name> AS`
    pub has_cte: bool,
    /// A ranking or aggregate call followed by `OVER`
    pub has_window_function: bool,
}

/// Join kinds that the extractor can capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    /// Parses a join qualifier keyword, case-insensitively
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "INNER" => Some(Self::Inner),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "FULL" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A qualified join found in the query text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub table: String,
}

impl JoinClause {
    pub fn new(kind: JoinKind, table: impl Into<String>) -> Self {
        Self {
            kind,
            table: table.into(),
        }
    }
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} JOIN {}", self.kind, self.table)
    }
}

/// Best-effort decomposition of a single SQL statement
///
/// Identifiers and expressions keep the casing of the original text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStructure {
    /// The query after trimming and trailing-semicolon removal
    pub query: String,
    pub flags: StructureFlags,
    /// Selected expressions, or exactly `["*"]`
    pub select_columns: Vec<String>,
    /// Tables named after FROM (only the first is ever captured)
    pub source_tables: Vec<String>,
    pub where_predicate: Option<String>,
    /// Qualified joins in left-to-right order
    pub join_clauses: Vec<JoinClause>,
    pub group_by_columns: Vec<String>,
    pub having_predicate: Option<String>,
    /// Sort columns with ASC/DESC removed
    pub order_by_columns: Vec<String>,
    pub row_limit: Option<u64>,
}

impl QueryStructure {
    /// Returns true if the select list is the `*` sentinel
    pub fn selects_all_columns(&self) -> bool {
        self.select_columns.len() == 1 && self.select_columns[0] == ALL_COLUMNS
    }

    /// Returns the first captured source table
    pub fn primary_table(&self) -> Option<&str> {
        self.source_tables.first().map(String::as_str)
    }
}
