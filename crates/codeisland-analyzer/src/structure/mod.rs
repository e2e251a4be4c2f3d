//! Query Structure Module
//!
//! This module decomposes raw SQL text into clause components using a table
//! of independent detection and extraction patterns. It is deliberately not a
//! parser: every rule is a best-effort match that may come back empty.
//!
//! Known blind spots, kept as-is:
//! - `FROM a, b` only captures `a` (the token stops at whitespace, not commas)
//! - a bare `JOIN` sets [`StructureFlags::has_join`] but is never captured as
//!   a [`JoinClause`], since its kind is not stated
//! - clauses inside subqueries are not extracted separately
//! - keywords inside quoted identifiers or string literals still count
//!
//! # Example
//!
//! ```
//! use codeisland_analyzer::structure::{JoinKind, extract_structure};
//!
//! let structure = extract_structure(
//!     "SELECT e.name, d.name FROM employees e LEFT JOIN departments d ON e.dept_id = d.id",
//! )
//! .unwrap();
//! assert_eq!(structure.source_tables, vec!["employees"]);
//! assert_eq!(structure.join_clauses[0].kind, JoinKind::Left);
//! assert!(extract_structure("   ").is_none());
//! ```

mod extractor;
mod model;

pub use extractor::extract_structure;
pub use model::{ALL_COLUMNS, JoinClause, JoinKind, QueryStructure, StructureFlags};
