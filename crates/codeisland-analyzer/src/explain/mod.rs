//! Query Explanation Module
//!
//! This module explains a query the way a tutor would: one overview sentence,
//! the clauses in the order the database logically evaluates them
//! (FROM/JOIN, WHERE, GROUP BY, HAVING, SELECT, ORDER BY, LIMIT), and a coarse
//! complexity rating.
//!
//! # Example
//!
//! ```
//! use codeisland_analyzer::explain::{Complexity, explain};
//!
//! let explanation = explain("SELECT name, RANK() OVER(ORDER BY salary DESC) FROM employees");
//! assert_eq!(explanation.complexity, Complexity::Advanced);
//!
//! let blank = explain("   ");
//! assert_eq!(blank.overview, "Unable to parse query");
//! assert_eq!(blank.complexity, Complexity::Unknown);
//! assert!(blank.steps.is_empty());
//! ```

mod generator;
mod model;

pub use generator::{execution_steps, explain, overview_sentence, rate_complexity};
pub use model::{Complexity, ExecutionStep, Explanation, StepClause, UNPARSEABLE_OVERVIEW};
