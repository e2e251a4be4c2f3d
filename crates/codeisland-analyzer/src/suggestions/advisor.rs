//! Query Advisor - Heuristic optimization suggestions
//!
//! This module re-scans the raw query text against a fixed battery of
//! rules. It never consults the extracted structure, so rules can change
//! without touching the explanation path.

use super::finding::{Finding, FindingKind};
use crate::config::AnalyzerConfig;
use crate::scan::{self, AGGREGATE_CALL, SELECT_LIST, SUBQUERY, WHERE_BODY};
use regex::Regex;
use std::sync::LazyLock;

static SELECT_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SELECT\s+\*").expect("valid regex"));

static OR_EQUALITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)OR\s+\w+\s*=\s*\w+").expect("valid regex"));

static OR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+OR\s+").expect("valid regex"));

static FIRST_FILTER_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)WHERE\s+([^\s=<>!]+)").expect("valid regex"));

static FIRST_SORT_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ORDER\s+BY\s+([^\s,]+)").expect("valid regex"));

/// Runs every rule with the default configuration.
///
/// # Example
///
/// ```
/// use codeisland_analyzer::suggestions::{FindingKind, analyze};
///
/// let findings = analyze("SELECT * FROM employees;");
/// let kinds: Vec<_> = findings.iter().map(|f| f.kind).collect();
/// assert_eq!(kinds, vec![FindingKind::SelectAll, FindingKind::MissingLimit]);
/// assert_eq!(
///     findings[1].rewrite_example.as_deref(),
///     Some("SELECT * FROM employees LIMIT 10;")
/// );
/// ```
pub fn analyze(raw: &str) -> Vec<Finding> {
    QueryAdvisor::new().analyze(raw)
}

/// Rule engine that provides optimization suggestions
#[derive(Debug, Clone, Default)]
pub struct QueryAdvisor {
    config: AnalyzerConfig,
}

/// Text views shared by every rule
struct RuleInput<'a> {
    /// Trimmed original text
    query: &'a str,
    upper: String,
}

impl QueryAdvisor {
    /// Creates a new advisor with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new advisor with custom config
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Returns the advisor config
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Evaluates every enabled rule, in order, against the raw query.
    ///
    /// Rules are independent: each contributes at most one finding and none
    /// suppresses another. Blank input yields no findings.
    pub fn analyze(&self, raw: &str) -> Vec<Finding> {
        let query = raw.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let input = RuleInput {
            query,
            upper: query.to_uppercase(),
        };

        let findings: Vec<Finding> = FindingKind::ALL
            .into_iter()
            .filter(|kind| self.config.is_rule_enabled(*kind))
            .filter_map(|kind| self.evaluate(kind, &input))
            .collect();

        for finding in &findings {
            tracing::debug!(
                kind = finding.kind.as_str(),
                severity = finding.severity.as_str(),
                "Optimization rule fired"
            );
        }

        findings
    }

    fn evaluate(&self, kind: FindingKind, input: &RuleInput<'_>) -> Option<Finding> {
        match kind {
            FindingKind::SelectAll => check_select_all(input),
            FindingKind::MissingLimit => self.check_missing_limit(input),
            FindingKind::LikePattern => check_like_pattern(input),
            FindingKind::SubqueryJoin => check_subquery_join(input),
            FindingKind::OrToIn => self.check_or_chain(input),
            FindingKind::IndexHint => check_index_hint(input),
            FindingKind::MissingGroupBy => check_missing_group_by(input),
        }
    }

    fn check_missing_limit(&self, input: &RuleInput<'_>) -> Option<Finding> {
        let upper = &input.upper;
        if upper.contains("LIMIT") || upper.contains("WHERE") || !upper.contains("SELECT") {
            return None;
        }

        let body = input.query.trim_end_matches(';').trim_end();
        let example = if input.query.ends_with(';') {
            format!("{} LIMIT {};", body, self.config.example_limit)
        } else {
            format!("{} LIMIT {}", body, self.config.example_limit)
        };

        Some(
            Finding::new(
                FindingKind::MissingLimit,
                "Without LIMIT, this query may return many rows. Add LIMIT to restrict the \
                 result set if you only need a few rows.",
            )
            .with_rewrite(example),
        )
    }

    /// OR-separated equality chains. The count includes ORs inside string
    /// literals, so quoted text can inflate it.
    fn check_or_chain(&self, input: &RuleInput<'_>) -> Option<Finding> {
        if !input.upper.contains("WHERE") || !OR_EQUALITY.is_match(input.query) {
            return None;
        }

        let or_count = OR_SEPARATOR.find_iter(input.query).count();
        if or_count < self.config.or_chain_threshold {
            return None;
        }

        Some(Finding::new(
            FindingKind::OrToIn,
            format!(
                "Multiple OR conditions ({} conditions) can sometimes be simplified using IN \
                 clause for better readability and potential performance.",
                or_count + 1
            ),
        ))
    }
}

fn check_select_all(input: &RuleInput<'_>) -> Option<Finding> {
    if !SELECT_STAR.is_match(input.query) {
        return None;
    }

    let example = SELECT_STAR.replace(input.query, "SELECT column1, column2");
    Some(
        Finding::new(
            FindingKind::SelectAll,
            "Using SELECT * retrieves all columns. For better performance, specify only the \
             columns you need.",
        )
        .with_rewrite(example),
    )
}

fn check_like_pattern(input: &RuleInput<'_>) -> Option<Finding> {
    if !input.upper.contains("WHERE") {
        return None;
    }

    let predicate = scan::capture(&WHERE_BODY, scan::clean_query(input.query))?;
    if !predicate.to_uppercase().contains("LIKE") || !predicate.contains('%') {
        return None;
    }

    Some(Finding::new(
        FindingKind::LikePattern,
        "LIKE patterns starting with % cannot use indexes efficiently. If possible, use \
         patterns like \"value%\" instead of \"%value%\".",
    ))
}

/// Heuristic only: `IN` is a plain substring test, so `JOIN` or `INNER`
/// satisfy it too.
fn check_subquery_join(input: &RuleInput<'_>) -> Option<Finding> {
    let upper = &input.upper;
    if !SUBQUERY.is_match(input.query) || !upper.contains("WHERE") || !upper.contains("IN") {
        return None;
    }

    Some(Finding::new(
        FindingKind::SubqueryJoin,
        "Some subqueries can be rewritten as JOINs, which may be more efficient. This depends \
         on your specific use case.",
    ))
}

fn check_index_hint(input: &RuleInput<'_>) -> Option<Finding> {
    if !input.upper.contains("WHERE") || !input.upper.contains("ORDER BY") {
        return None;
    }

    let query = scan::clean_query(input.query);
    let filter_column = first_column(&FIRST_FILTER_COLUMN, query)?;
    let sort_column = first_column(&FIRST_SORT_COLUMN, query)?;
    if filter_column.eq_ignore_ascii_case(&sort_column) {
        return None;
    }

    Some(Finding::new(
        FindingKind::IndexHint,
        format!(
            "This query filters by \"{}\" and orders by \"{}\". Consider indexing these \
             columns for better performance on large tables.",
            filter_column, sort_column
        ),
    ))
}

fn first_column(pattern: &Regex, query: &str) -> Option<String> {
    let token = scan::capture(pattern, query)?;
    let column = scan::remove_quotes(token.trim_start_matches('('));
    (!column.is_empty()).then_some(column)
}

fn check_missing_group_by(input: &RuleInput<'_>) -> Option<Finding> {
    let upper = &input.upper;
    if !AGGREGATE_CALL.is_match(input.query) || upper.contains("GROUP BY") {
        return None;
    }

    let list = scan::capture(&SELECT_LIST, input.query)?;
    if list.contains('*') {
        return None;
    }

    let has_plain_column = scan::split_top_level(list)
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .any(|item| !AGGREGATE_CALL.is_match(item));
    if !has_plain_column {
        return None;
    }

    Some(Finding::new(
        FindingKind::MissingGroupBy,
        "You're using aggregate functions with non-aggregated columns. If you want results \
         per group, add a GROUP BY clause.",
    ))
}
