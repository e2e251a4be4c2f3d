//! Explanation Generator
//!
//! Turns an extracted [`QueryStructure`] into an overview sentence, the
//! logical execution order and a complexity rating.

use super::model::{Complexity, ExecutionStep, Explanation, StepClause};
use crate::structure::{QueryStructure, extract_structure};

/// Explains a raw query in plain language.
///
/// Blank input yields [`Explanation::unparseable`]. An explanation without
/// steps means no clause was recognised and callers should render nothing.
///
/// # Example
///
/// ```
/// use codeisland_analyzer::explain::{StepClause, explain};
///
/// let explanation =
///     explain("SELECT name, salary FROM employees WHERE salary > 70000 ORDER BY salary DESC LIMIT 5;");
/// let clauses: Vec<_> = explanation.steps.iter().map(|s| s.clause).collect();
/// assert_eq!(
///     clauses,
///     vec![
///         StepClause::FromJoin,
///         StepClause::Where,
///         StepClause::Select,
///         StepClause::OrderBy,
///         StepClause::Limit,
///     ]
/// );
/// ```
pub fn explain(raw: &str) -> Explanation {
    let Some(structure) = extract_structure(raw) else {
        return Explanation::unparseable();
    };

    let explanation = Explanation {
        overview: overview_sentence(&structure),
        steps: execution_steps(&structure),
        complexity: rate_complexity(&structure),
        structure: Some(structure),
    };

    tracing::debug!(
        steps = explanation.steps.len(),
        complexity = explanation.complexity.as_str(),
        "Generated query explanation"
    );

    explanation
}

/// Builds `"This query ..."` from the clauses that are present.
///
/// A SELECT with no extractable list (no FROM) reads "selects the requested
/// values". Text with none of the recognised clauses degenerates to
/// `"This query ."`; such input has no steps, and [`crate::build_report`]
/// suppresses it.
pub fn overview_sentence(structure: &QueryStructure) -> String {
    let flags = &structure.flags;
    let mut parts = Vec::new();

    if flags.has_select {
        if structure.selects_all_columns() {
            parts.push("selects all columns".to_string());
        } else if structure.select_columns.is_empty() {
            parts.push("selects the requested values".to_string());
        } else {
            parts.push(format!(
                "selects {} column(s)",
                structure.select_columns.len()
            ));
        }
    }

    if flags.has_from {
        if let Some(table) = structure.primary_table() {
            parts.push(format!("from the {} table", table));
            let others = structure.source_tables.len() - 1;
            if others > 0 {
                parts.push(format!("and {} other table(s)", others));
            }
        }
    }

    let phrases = [
        (flags.has_join, "using joins"),
        (flags.has_where, "filtered by conditions"),
        (flags.has_group_by, "grouped by specific columns"),
        (flags.has_having, "filtered groups"),
        (flags.has_order_by, "sorted by specified columns"),
        (flags.has_limit, "limited to specific number of rows"),
    ];
    parts.extend(
        phrases
            .into_iter()
            .filter(|(present, _)| *present)
            .map(|(_, phrase)| phrase.to_string()),
    );

    format!("This query {}.", parts.join(", "))
}

/// Emits one step per present clause, in logical evaluation order, numbered
/// densely from 1.
pub fn execution_steps(structure: &QueryStructure) -> Vec<ExecutionStep> {
    StepClause::EVALUATION_ORDER
        .into_iter()
        .filter_map(|clause| describe_step(structure, clause).map(|step| (clause, step)))
        .enumerate()
        .map(|(idx, (clause, (narrative, fragment)))| ExecutionStep {
            ordinal: idx + 1,
            clause,
            narrative,
            fragment,
        })
        .collect()
}

/// Returns `(narrative, fragment)` for a clause, or `None` when the clause is
/// absent or nothing usable was extracted for it.
fn describe_step(structure: &QueryStructure, clause: StepClause) -> Option<(String, String)> {
    let flags = &structure.flags;

    match clause {
        StepClause::FromJoin if flags.has_from => Some(describe_source(structure)),
        StepClause::Where if flags.has_where => {
            let predicate = structure.where_predicate.as_deref()?;
            Some((
                format!("Filter rows where: {}", predicate),
                format!("WHERE {}", predicate),
            ))
        }
        StepClause::GroupBy if flags.has_group_by && !structure.group_by_columns.is_empty() => {
            let columns = structure.group_by_columns.join(", ");
            Some((
                format!("Group rows by: {}", columns),
                format!("GROUP BY {}", columns),
            ))
        }
        StepClause::Having if flags.has_having => {
            let predicate = structure.having_predicate.as_deref()?;
            Some((
                format!("Filter groups where: {}", predicate),
                format!("HAVING {}", predicate),
            ))
        }
        StepClause::Select if flags.has_select => Some(describe_projection(structure)),
        StepClause::OrderBy if flags.has_order_by && !structure.order_by_columns.is_empty() => {
            let columns = structure.order_by_columns.join(", ");
            Some((
                format!("Sort results by: {}", columns),
                format!("ORDER BY {}", columns),
            ))
        }
        StepClause::Limit if flags.has_limit => {
            let limit = structure.row_limit?;
            Some((
                format!("Limit results to {} row(s)", limit),
                format!("LIMIT {}", limit),
            ))
        }
        _ => None,
    }
}

fn describe_source(structure: &QueryStructure) -> (String, String) {
    let mut narrative = match structure.source_tables.as_slice() {
        [] => "Access the source data".to_string(),
        [table] => format!("Access the \"{}\" table", table),
        tables => format!("Access the tables: {}", tables.join(", ")),
    };

    let mut fragment = String::from("FROM");
    if let Some(table) = structure.primary_table() {
        fragment.push(' ');
        fragment.push_str(table);
    }

    if structure.flags.has_join {
        narrative.push_str(&format!(
            " and perform {} join(s)",
            structure.join_clauses.len()
        ));
        for join in &structure.join_clauses {
            narrative.push_str(&format!(" ({})", join));
            fragment.push(' ');
            fragment.push_str(&join.to_string());
        }
    }

    (narrative, fragment)
}

fn describe_projection(structure: &QueryStructure) -> (String, String) {
    let mut narrative = if structure.selects_all_columns() {
        "Select and project all columns".to_string()
    } else if structure.select_columns.is_empty() {
        "Select and project the requested values".to_string()
    } else {
        format!(
            "Select and project columns: {}",
            structure.select_columns.join(", ")
        )
    };

    if structure.flags.has_distinct {
        narrative.push_str(" (removing duplicates)");
    }
    if structure.flags.has_aggregate {
        narrative.push_str(" with aggregate functions");
    }

    let fragment = if structure.select_columns.is_empty() {
        "SELECT".to_string()
    } else {
        format!("SELECT {}", structure.select_columns.join(", "))
    };

    (narrative, fragment)
}

/// Rates a query by the most advanced feature it uses.
///
/// Ratings accumulate: each rule can only raise the tier reached so far.
pub fn rate_complexity(structure: &QueryStructure) -> Complexity {
    let flags = &structure.flags;
    let mut complexity = Complexity::Basic;

    if flags.has_join || flags.has_subquery || flags.has_cte {
        complexity = complexity.max(Complexity::Intermediate);
    }
    if flags.has_window_function || (flags.has_subquery && flags.has_join) {
        complexity = complexity.max(Complexity::Advanced);
    }

    complexity
}

#[cfg(test)]
mod tests;
