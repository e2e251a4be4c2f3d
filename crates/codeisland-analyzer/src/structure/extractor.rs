//! Query Structure Extractor
//!
//! Applies the detection and extraction rules to a cleaned query. Every rule
//! runs independently; a rule that does not match leaves its field empty.

use super::model::{ALL_COLUMNS, JoinClause, JoinKind, QueryStructure, StructureFlags};
use crate::scan::{
    self, AGGREGATE_CALL, CTE, FROM_TABLE, GROUP_BY_BODY, HAVING_BODY, JOIN_KEYWORD, LIMIT_VALUE,
    ORDER_BY_BODY, QUALIFIED_JOIN, SELECT_LIST, SUBQUERY, WHERE_BODY, WINDOW_FUNCTION,
};

/// Extracts clause flags and components from a raw query.
///
/// Returns `None` for empty or whitespace-only input, which callers treat as
/// "nothing to explain". Any other text yields a structure, even if every
/// field in it is empty.
///
/// # Example
///
/// ```
/// use codeisland_analyzer::structure::extract_structure;
///
/// let structure = extract_structure("SELECT name, salary FROM employees LIMIT 5;").unwrap();
/// assert_eq!(structure.select_columns, vec!["name", "salary"]);
/// assert_eq!(structure.row_limit, Some(5));
/// ```
pub fn extract_structure(raw: &str) -> Option<QueryStructure> {
    let query = scan::clean_query(raw);
    if query.is_empty() {
        return None;
    }

    let flags = detect_flags(query);
    let structure = QueryStructure {
        query: query.to_string(),
        flags,
        select_columns: extract_select_columns(query),
        source_tables: extract_source_tables(query),
        where_predicate: extract_predicate(&WHERE_BODY, query),
        join_clauses: extract_joins(query),
        group_by_columns: extract_group_by(query),
        having_predicate: extract_predicate(&HAVING_BODY, query),
        order_by_columns: extract_order_by(query),
        row_limit: extract_limit(query),
    };

    tracing::trace!(
        flags = ?structure.flags,
        columns = structure.select_columns.len(),
        tables = ?structure.source_tables,
        joins = structure.join_clauses.len(),
        "Extracted query structure"
    );

    Some(structure)
}

fn detect_flags(query: &str) -> StructureFlags {
    let upper = query.to_uppercase();

    StructureFlags {
        has_select: upper.contains("SELECT"),
        has_from: upper.contains("FROM"),
        has_where: upper.contains("WHERE"),
        has_join: JOIN_KEYWORD.is_match(query),
        has_group_by: upper.contains("GROUP BY"),
        has_having: upper.contains("HAVING"),
        has_order_by: upper.contains("ORDER BY"),
        has_limit: upper.contains("LIMIT"),
        has_distinct: upper.contains("DISTINCT"),
        has_aggregate: AGGREGATE_CALL.is_match(query),
        has_subquery: SUBQUERY.is_match(query),
        has_cte: CTE.is_match(query),
        has_window_function: WINDOW_FUNCTION.is_match(query),
    }
}

/// Select items between SELECT and the first FROM.
///
/// Any `*` in the list, including inside `COUNT(*)`, collapses the whole list
/// to the sentinel.
pub(crate) fn extract_select_columns(query: &str) -> Vec<String> {
    let Some(list) = scan::capture(&SELECT_LIST, query) else {
        return Vec::new();
    };

    if list.contains(ALL_COLUMNS) {
        return vec![ALL_COLUMNS.to_string()];
    }

    scan::split_top_level(list)
        .into_iter()
        .map(|item| scan::strip_surrounding_quotes(scan::strip_alias(item.trim())).trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn extract_source_tables(query: &str) -> Vec<String> {
    scan::capture(&FROM_TABLE, query)
        .map(scan::remove_quotes)
        .filter(|table| !table.is_empty())
        .into_iter()
        .collect()
}

fn extract_predicate(pattern: &regex::Regex, query: &str) -> Option<String> {
    scan::capture(pattern, query)
        .filter(|body| !body.is_empty())
        .map(str::to_string)
}

fn extract_joins(query: &str) -> Vec<JoinClause> {
    QUALIFIED_JOIN
        .captures_iter(query)
        .filter_map(|caps| {
            let kind = JoinKind::from_keyword(caps.get(1)?.as_str())?;
            let table = scan::remove_quotes(caps.get(2)?.as_str());
            Some(JoinClause::new(kind, table))
        })
        .collect()
}

fn extract_group_by(query: &str) -> Vec<String> {
    split_column_list(&GROUP_BY_BODY, query, |item| item)
}

fn extract_order_by(query: &str) -> Vec<String> {
    split_column_list(&ORDER_BY_BODY, query, scan::strip_sort_direction)
}

fn split_column_list(
    pattern: &regex::Regex,
    query: &str,
    strip: impl Fn(&str) -> &str,
) -> Vec<String> {
    let Some(body) = scan::capture(pattern, query) else {
        return Vec::new();
    };

    body.split(',')
        .map(|item| scan::remove_quotes(strip(item.trim()).trim()))
        .filter(|item| !item.is_empty())
        .collect()
}

fn extract_limit(query: &str) -> Option<u64> {
    scan::capture(&LIMIT_VALUE, query).and_then(|digits| digits.parse().ok())
}
