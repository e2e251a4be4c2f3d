//! Query Optimization Suggestions Module
//!
//! This module provides advisory findings by scanning raw query text for
//! common learner patterns: `SELECT *`, unbounded result sets, leading
//! wildcards in LIKE, IN-subqueries, OR chains, filter/sort index hints and
//! aggregates without GROUP BY.
//!
//! Findings are heuristics. They may not apply to every real-world query and
//! never claim a rewrite is always better.

mod advisor;
mod finding;

pub use advisor::{QueryAdvisor, analyze};
pub use finding::{Finding, FindingKind, Severity, sorted_by_severity};
