//! Shared pattern table and text helpers
//!
//! Every pattern here is compiled once and shared by the extractor and the
//! advisor. The `regex` crate matches in linear time, so no input can make a
//! scan hang, however odd the text.

use regex::Regex;
use std::sync::LazyLock;

// Detection patterns

pub(crate) static JOIN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)JOIN").expect("valid regex"));

pub(crate) static AGGREGATE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(COUNT|SUM|AVG|MAX|MIN|GROUP_CONCAT)\(").expect("valid regex")
});

/// Any parenthesized group with SELECT somewhere inside it.
pub(crate) static SUBQUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\(.*SELECT.*\)").expect("valid regex"));

pub(crate) static CTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)WITH\s+\w+\s+AS").expect("valid regex"));

pub(crate) static WINDOW_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(ROW_NUMBER|RANK|DENSE_RANK|LAG|LEAD|SUM|AVG|COUNT)\s*\([^)]*\)\s*OVER")
        .expect("valid regex")
});

// Clause capture patterns. Each body is lazy and stops at the first
// clause keyword that may legally follow it, or at the end of the text.

pub(crate) static SELECT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)SELECT\s+(.*?)\s+FROM").expect("valid regex"));

pub(crate) static FROM_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FROM\s+([^\s(]+)").expect("valid regex"));

pub(crate) static WHERE_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)WHERE\s+(.*?)(?:\s+GROUP\s+BY|\s+ORDER\s+BY|\s+HAVING|\s+LIMIT|$)")
        .expect("valid regex")
});

pub(crate) static QUALIFIED_JOIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(INNER|LEFT|RIGHT|FULL)(?:\s+OUTER)?\s+JOIN\s+(\S+)").expect("valid regex")
});

pub(crate) static GROUP_BY_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)GROUP\s+BY\s+(.*?)(?:\s+HAVING|\s+ORDER\s+BY|\s+LIMIT|$)")
        .expect("valid regex")
});

pub(crate) static HAVING_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)HAVING\s+(.*?)(?:\s+ORDER\s+BY|\s+LIMIT|$)").expect("valid regex")
});

pub(crate) static ORDER_BY_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)ORDER\s+BY\s+(.*?)(?:\s+LIMIT|$)").expect("valid regex"));

pub(crate) static LIMIT_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)LIMIT\s+(\d+)").expect("valid regex"));

// Item cleanup

static ALIAS_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+AS\s+\w+$").expect("valid regex"));

static SORT_DIRECTION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(ASC|DESC)$").expect("valid regex"));

const QUOTE_CHARS: [char; 2] = ['"', '`'];

/// Trims whitespace and strips a single trailing run of semicolons.
pub(crate) fn clean_query(raw: &str) -> &str {
    raw.trim().trim_end_matches(';').trim()
}

/// Returns the trimmed first capture group of `pattern`, if any.
pub(crate) fn capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Splits on commas that are not nested inside parentheses or quotes.
///
/// Unbalanced input is tolerated: a stray `)` never drives the depth below
/// zero and an unterminated quote simply swallows the rest of the text.
pub(crate) fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, ch) in list.char_indices() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&list[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts
}

/// Removes a trailing `AS alias` from a select item.
pub(crate) fn strip_alias(item: &str) -> &str {
    match ALIAS_SUFFIX.find(item) {
        Some(m) => &item[..m.start()],
        None => item,
    }
}

/// Removes a trailing `ASC` / `DESC` from a sort item.
pub(crate) fn strip_sort_direction(item: &str) -> &str {
    match SORT_DIRECTION_SUFFIX.find(item) {
        Some(m) => &item[..m.start()],
        None => item,
    }
}

/// Strips identifier quotes wrapping the whole item.
pub(crate) fn strip_surrounding_quotes(item: &str) -> &str {
    item.trim_matches(QUOTE_CHARS.as_slice())
}

/// Removes every identifier quote character.
pub(crate) fn remove_quotes(item: &str) -> String {
    item.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect()
}
