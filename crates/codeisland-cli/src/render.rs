//! Text rendering of explanations, findings and reports

use codeisland_analyzer::{Explanation, Finding, QueryReport, sorted_by_severity};
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};

/// Printed when the input has no recognisable clause
pub const NOTHING_TO_EXPLAIN: &str = "Nothing to explain: no recognisable SQL clauses found.";

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Overview line, complexity badge and the execution steps table
pub fn render_explanation(explanation: &Explanation) -> String {
    if explanation.is_empty() {
        return NOTHING_TO_EXPLAIN.to_string();
    }

    let mut table = new_table(vec!["#", "Clause", "What happens", "SQL"]);
    for step in &explanation.steps {
        table.add_row(vec![
            Cell::new(step.ordinal),
            Cell::new(step.clause),
            Cell::new(&step.narrative),
            Cell::new(&step.fragment),
        ]);
    }

    format!(
        "{}\nComplexity: {}\n\nExecution order:\n{}",
        explanation.overview,
        explanation.complexity.label(),
        table
    )
}

/// Findings table, most severe first
pub fn render_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "No optimization suggestions.".to_string();
    }

    let mut table = new_table(vec!["Severity", "Rule", "Suggestion", "Example"]);
    for finding in sorted_by_severity(findings) {
        table.add_row(vec![
            Cell::new(finding.severity),
            Cell::new(finding.kind),
            Cell::new(format!("{}\n{}", finding.title, finding.message)),
            Cell::new(finding.rewrite_example.as_deref().unwrap_or("-")),
        ]);
    }
    table.to_string()
}

/// Full report: explanation, summary line and findings
pub fn render_report(report: &QueryReport) -> String {
    let mut out = render_explanation(&report.explanation);
    out.push_str("\n\n");
    out.push_str(&report.summary());
    if !report.findings.is_empty() {
        out.push('\n');
        out.push_str(&render_findings(&report.findings));
    }
    out
}
