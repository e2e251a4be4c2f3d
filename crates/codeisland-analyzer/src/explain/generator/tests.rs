//! Tests for the explanation generator

use super::*;
use crate::explain::UNPARSEABLE_OVERVIEW;

fn clauses(explanation: &Explanation) -> Vec<StepClause> {
    explanation.steps.iter().map(|s| s.clause).collect()
}

fn fragment_keyword(clause: StepClause) -> &'static str {
    match clause {
        StepClause::FromJoin => "FROM",
        other => other.as_str(),
    }
}

const SAMPLE_QUERIES: &[&str] = &[
    "SELECT * FROM employees;",
    "SELECT name, salary FROM employees WHERE salary > 70000 ORDER BY salary DESC LIMIT 5;",
    "SELECT dept, COUNT(id) FROM employees GROUP BY dept HAVING COUNT(id) > 3 ORDER BY dept",
    "SELECT o.id FROM orders o LEFT JOIN customers c ON o.cid = c.id LIMIT 10",
    "SELECT name FROM employees WHERE dept_id IN (SELECT id FROM departments)",
    "SELECT",
    "FROM nowhere WHERE",
    "not sql at all",
    "select * from t where a = 1 group by a having count(a) > 1 order by a limit 1",
];

mod scenario_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_all_scenario() {
        let explanation = explain("SELECT * FROM employees;");

        assert_eq!(
            explanation.overview,
            "This query selects all columns, from the employees table."
        );
        assert_eq!(explanation.complexity, Complexity::Basic);
        assert_eq!(
            explanation.steps,
            vec![
                ExecutionStep {
                    ordinal: 1,
                    clause: StepClause::FromJoin,
                    narrative: "Access the \"employees\" table".to_string(),
                    fragment: "FROM employees".to_string(),
                },
                ExecutionStep {
                    ordinal: 2,
                    clause: StepClause::Select,
                    narrative: "Select and project all columns".to_string(),
                    fragment: "SELECT *".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_filter_sort_limit_scenario() {
        let explanation = explain(
            "SELECT name, salary FROM employees WHERE salary > 70000 ORDER BY salary DESC LIMIT 5;",
        );

        assert_eq!(
            explanation.overview,
            "This query selects 2 column(s), from the employees table, filtered by conditions, \
             sorted by specified columns, limited to specific number of rows."
        );
        assert_eq!(
            clauses(&explanation),
            vec![
                StepClause::FromJoin,
                StepClause::Where,
                StepClause::Select,
                StepClause::OrderBy,
                StepClause::Limit,
            ]
        );
        assert_eq!(explanation.complexity, Complexity::Basic);

        let where_step = explanation.step(StepClause::Where).unwrap();
        assert_eq!(where_step.narrative, "Filter rows where: salary > 70000");
        assert_eq!(where_step.fragment, "WHERE salary > 70000");

        let limit_step = explanation.step(StepClause::Limit).unwrap();
        assert_eq!(limit_step.ordinal, 5);
        assert_eq!(limit_step.narrative, "Limit results to 5 row(s)");
        assert_eq!(limit_step.fragment, "LIMIT 5");
    }

    #[test]
    fn test_window_function_scenario() {
        let explanation =
            explain("SELECT name, RANK() OVER(ORDER BY salary DESC) AS position FROM employees");
        assert_eq!(explanation.complexity, Complexity::Advanced);
    }

    #[test]
    fn test_blank_input_scenario() {
        for input in ["", "   ", "\n\t"] {
            let explanation = explain(input);

            assert_eq!(explanation.overview, UNPARSEABLE_OVERVIEW);
            assert!(explanation.steps.is_empty());
            assert_eq!(explanation.complexity, Complexity::Unknown);
            assert!(explanation.structure.is_none());
        }
    }
}

mod step_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_narrative_and_fragment() {
        let explanation = explain(
            "SELECT o.id, c.name FROM orders o INNER JOIN customers c ON o.cid = c.id WHERE o.total > 100",
        );

        assert_eq!(
            explanation.overview,
            "This query selects 2 column(s), from the orders table, using joins, filtered by conditions."
        );

        let from = explanation.step(StepClause::FromJoin).unwrap();
        assert_eq!(
            from.narrative,
            "Access the \"orders\" table and perform 1 join(s) (INNER JOIN customers)"
        );
        assert_eq!(from.fragment, "FROM orders INNER JOIN customers");
    }

    #[test]
    fn test_bare_join_counts_zero_captured_joins() {
        let explanation = explain("SELECT * FROM orders JOIN customers ON orders.cid = customers.id");

        let from = explanation.step(StepClause::FromJoin).unwrap();
        assert_eq!(
            from.narrative,
            "Access the \"orders\" table and perform 0 join(s)"
        );
        assert_eq!(from.fragment, "FROM orders");
        assert_eq!(explanation.complexity, Complexity::Intermediate);
    }

    #[test]
    fn test_grouping_steps() {
        let explanation = explain(
            "SELECT dept, COUNT(id) FROM employees GROUP BY dept HAVING COUNT(id) > 3",
        );

        assert_eq!(
            clauses(&explanation),
            vec![
                StepClause::FromJoin,
                StepClause::GroupBy,
                StepClause::Having,
                StepClause::Select,
            ]
        );
        assert_eq!(
            explanation.step(StepClause::GroupBy).unwrap().fragment,
            "GROUP BY dept"
        );
        assert_eq!(
            explanation.step(StepClause::Having).unwrap().narrative,
            "Filter groups where: COUNT(id) > 3"
        );
        assert_eq!(
            explanation.step(StepClause::Select).unwrap().narrative,
            "Select and project columns: dept, COUNT(id) with aggregate functions"
        );
    }

    #[test]
    fn test_distinct_projection() {
        let explanation = explain("SELECT DISTINCT dept FROM employees");
        let select = explanation.step(StepClause::Select).unwrap();
        assert!(select.narrative.ends_with("(removing duplicates)"));
    }

    #[test]
    fn test_dangling_limit_emits_no_step() {
        let explanation = explain("SELECT * FROM t LIMIT");
        assert!(explanation.structure.as_ref().unwrap().flags.has_limit);
        assert!(explanation.step(StepClause::Limit).is_none());
    }

    #[test]
    fn test_limit_zero_is_still_a_step() {
        let explanation = explain("SELECT * FROM t LIMIT 0");
        assert_eq!(
            explanation.step(StepClause::Limit).unwrap().fragment,
            "LIMIT 0"
        );
    }

    #[test]
    fn test_from_without_table_token() {
        let explanation = explain("SELECT * FROM (SELECT 1) AS t");
        let from = explanation.step(StepClause::FromJoin).unwrap();
        assert_eq!(from.narrative, "Access the source data");
        assert_eq!(from.fragment, "FROM");
    }

    #[test]
    fn test_unrecognised_text_has_no_steps() {
        let explanation = explain("not sql at all");
        assert!(explanation.is_empty());
        assert!(explanation.structure.is_some());
        assert_eq!(explanation.complexity, Complexity::Basic);
    }

    #[test]
    fn test_select_without_from_overview() {
        let explanation = explain("SELECT NOW();");

        assert_eq!(
            explanation.overview,
            "This query selects the requested values."
        );
        assert_eq!(clauses(&explanation), vec![StepClause::Select]);
        assert_eq!(
            explanation.steps[0].narrative,
            "Select and project the requested values"
        );
    }

    #[test]
    fn test_unrecognised_text_overview_is_degenerate() {
        let explanation = explain("((((((");
        assert_eq!(explanation.overview, "This query .");
        assert!(explanation.is_empty());
        assert!(crate::build_report("((((((", &crate::AnalyzerConfig::default()).is_none());
    }
}

mod property_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ordinals_are_contiguous() {
        for query in SAMPLE_QUERIES {
            let explanation = explain(query);
            let ordinals: Vec<_> = explanation.steps.iter().map(|s| s.ordinal).collect();
            let expected: Vec<_> = (1..=explanation.steps.len()).collect();
            assert_eq!(ordinals, expected, "{query}");
        }
    }

    #[test]
    fn test_steps_follow_evaluation_order() {
        for query in SAMPLE_QUERIES {
            let explanation = explain(query);
            let order = clauses(&explanation);
            let mut sorted = order.clone();
            sorted.sort();
            assert_eq!(order, sorted, "{query}");
        }
    }

    #[test]
    fn test_no_limit_step_without_limit_keyword() {
        for query in SAMPLE_QUERIES {
            let explanation = explain(query);
            let has_limit = explanation
                .structure
                .as_ref()
                .is_some_and(|s| s.flags.has_limit);
            if !has_limit {
                assert!(explanation.step(StepClause::Limit).is_none(), "{query}");
            }
        }
    }

    #[test]
    fn test_fragments_start_with_their_clause_keyword() {
        for query in SAMPLE_QUERIES {
            let explanation = explain(query);
            for step in &explanation.steps {
                assert!(
                    step.fragment.starts_with(fragment_keyword(step.clause)),
                    "{query}: {}",
                    step.fragment
                );
            }
        }
    }

    #[test]
    fn test_full_clause_set_round_trips() {
        let explanation = explain(
            "select * from t where a = 1 group by a having count(a) > 1 order by a limit 1",
        );
        let fragments: Vec<_> = explanation.steps.iter().map(|s| s.fragment.as_str()).collect();

        assert_eq!(
            fragments,
            vec![
                "FROM t",
                "WHERE a = 1",
                "GROUP BY a",
                "HAVING count(a) > 1",
                "SELECT *",
                "ORDER BY a",
                "LIMIT 1",
            ]
        );
    }

    #[test]
    fn test_explain_is_idempotent() {
        for query in SAMPLE_QUERIES {
            assert_eq!(explain(query), explain(query));
        }
    }
}

mod complexity_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_is_at_least_intermediate() {
        let explanation = explain("SELECT * FROM a LEFT JOIN b ON a.id = b.id");
        assert_eq!(explanation.complexity, Complexity::Intermediate);
    }

    #[test]
    fn test_cte_is_intermediate() {
        let explanation = explain("WITH t AS (SELECT 1) SELECT * FROM t");
        assert_eq!(explanation.complexity, Complexity::Intermediate);
    }

    #[test]
    fn test_subquery_with_join_is_advanced() {
        let explanation = explain(
            "SELECT * FROM a INNER JOIN b ON a.id = b.id WHERE a.x IN (SELECT x FROM c)",
        );
        assert_eq!(explanation.complexity, Complexity::Advanced);
    }

    #[test]
    fn test_window_function_overrides_everything() {
        let explanation = explain(
            "SELECT ROW_NUMBER() OVER (ORDER BY id) FROM a INNER JOIN b ON a.id = b.id",
        );
        assert_eq!(explanation.complexity, Complexity::Advanced);
    }

    #[test]
    fn test_complexity_ordering() {
        assert!(Complexity::Advanced > Complexity::Intermediate);
        assert!(Complexity::Intermediate > Complexity::Basic);
        assert!(Complexity::Basic > Complexity::Unknown);
    }

    #[test]
    fn test_complexity_serialization() {
        let json = serde_json::to_string(&Complexity::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
        assert_eq!(Complexity::Advanced.label(), "ADVANCED");
    }

    #[test]
    fn test_step_clause_serialization() {
        let json = serde_json::to_string(&StepClause::FromJoin).unwrap();
        assert_eq!(json, "\"FROM/JOIN\"");
        let json = serde_json::to_string(&StepClause::OrderBy).unwrap();
        assert_eq!(json, "\"ORDER BY\"");
    }
}
