//! Operator semantics tests for the clause evaluator.

use crate::ast::{FilterClause, LogicalJoin, Operator, Placement};
use crate::evaluator::clause_matches;

/// Builds a client clause the way the parser would.
fn clause(operator_token: &str, operands: &[&str]) -> FilterClause {
    FilterClause {
        field: "field".to_string(),
        operator: Operator::parse(operator_token),
        operand_values: operands.iter().map(|o| o.to_lowercase()).collect(),
        join: LogicalJoin::And,
        placement: Placement::Client,
    }
}

fn matches(operator: &str, operands: &[&str], values: &[&str]) -> bool {
    let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    clause_matches(&clause(operator, operands), &values)
}

#[test]
fn test_eq_exact_match() {
    assert!(matches("eq", &["techno"], &["techno"]));
    assert!(!matches("eq", &["techno"], &["tech house"]));
}

#[test]
fn test_eq_is_case_and_whitespace_insensitive() {
    assert!(matches("eq", &["techno"], &["  Techno "]));
    assert!(matches("eq", &["Techno"], &["techno "]));
}

#[test]
fn test_eq_any_value_against_any_operand() {
    assert!(matches("eq", &["house", "techno"], &["jazz", "techno"]));
    assert!(!matches("eq", &["house", "techno"], &["jazz", "ambient"]));
}

#[test]
fn test_ne_is_negation_of_eq() {
    assert!(!matches("ne", &["techno"], &["techno"]));
    assert!(matches("ne", &["techno"], &["house"]));
}

#[test]
fn test_exact_value_set_property() {
    // A record whose values exactly equal the operand set satisfies the
    // whole positive membership family and fails the negative one.
    let values = &["techno", "house"];
    let operands = &["techno", "house"];
    for op in ["eq", "in", "any", "contains_any", "contains_all", "all"] {
        assert!(matches(op, operands, values), "operator {op}");
    }
    for op in ["ne", "nin", "contains_none"] {
        assert!(!matches(op, operands, values), "operator {op}");
    }
}

#[test]
fn test_contains_all_decomposes_into_has() {
    let records: &[&[&str]] = &[
        &["techno", "industrial"],
        &["techno"],
        &["industrial", "ebm"],
        &[],
        &["techno", "industrial", "ambient"],
    ];
    for values in records {
        let both = matches("has", &["techno"], values) && matches("has", &["industrial"], values);
        assert_eq!(
            matches("contains_all", &["techno", "industrial"], values),
            both,
            "values {values:?}"
        );
    }
}

#[test]
fn test_contains_any_decomposes_into_has() {
    let records: &[&[&str]] = &[&["techno"], &["house"], &["jazz"], &[], &["house", "jazz"]];
    for values in records {
        let either = matches("has", &["techno"], values) || matches("has", &["house"], values);
        assert_eq!(
            matches("contains_any", &["techno", "house"], values),
            either,
            "values {values:?}"
        );
    }
}

#[test]
fn test_contains_none_negates_contains_any() {
    let records: &[&[&str]] = &[&["techno"], &["jazz"], &[], &["house", "jazz"]];
    for values in records {
        assert_ne!(
            matches("contains_none", &["techno", "house"], values),
            matches("contains_any", &["techno", "house"], values),
            "values {values:?}"
        );
    }
}

#[test]
fn test_has_matches_element_or_substring() {
    assert!(matches("has", &["charlotte"], &["Charlotte de Witte"]));
    assert!(matches("has", &["techno"], &["techno"]));
    assert!(!matches("has", &["charlotte"], &["Amelie Lens"]));
}

#[test]
fn test_starts_and_ends() {
    assert!(matches("starts", &["tech"], &["Techno"]));
    assert!(!matches("starts", &["house"], &["tech house"]));
    assert!(matches("ends", &["house"], &["tech house"]));
    assert!(!matches("ends", &["tech"], &["tech house"]));
}

#[test]
fn test_numeric_comparisons() {
    assert!(matches("gt", &["10"], &["15"]));
    assert!(!matches("gt", &["10"], &["10"]));
    assert!(matches("gte", &["10"], &["10"]));
    assert!(matches("lt", &["10"], &["5"]));
    assert!(matches("lte", &["10"], &["10"]));
    assert!(!matches("lte", &["10"], &["10.5"]));
}

#[test]
fn test_numeric_operators_never_raise_on_garbage() {
    assert!(!matches("gt", &["10"], &["free entry"]));
    assert!(!matches("gt", &["cheap"], &["15"]));
    assert!(!matches("between", &["a", "b"], &["15"]));
}

#[test]
fn test_between_is_inclusive() {
    assert!(!matches("between", &["10", "30"], &["5"]));
    assert!(matches("between", &["10", "30"], &["10"]));
    assert!(matches("between", &["10", "30"], &["15"]));
    assert!(matches("between", &["10", "30"], &["30"]));
    assert!(!matches("between", &["10", "30"], &["31"]));
}

#[test]
fn test_between_equals_gte_and_lte() {
    for value in ["5", "10", "15", "30", "31"] {
        assert_eq!(
            matches("between", &["10", "30"], &[value]),
            matches("gte", &["10"], &[value]) && matches("lte", &["30"], &[value]),
            "value {value}"
        );
    }
}

#[test]
fn test_between_with_one_operand_matches_nothing() {
    assert!(!matches("between", &["10"], &["15"]));
    assert!(!matches("between", &[], &["15"]));
}

#[test]
fn test_empty_extraction_fails_everything_except_contains_none() {
    for op in [
        "eq", "in", "any", "contains_any", "contains_all", "all", "has", "starts", "ends", "gt",
        "lt", "gte", "lte", "between",
    ] {
        assert!(!matches(op, &["techno"], &[]), "operator {op}");
    }
    // `ne` too: an absent field is not "not equal", it is absent.
    assert!(!matches("ne", &["techno"], &[]));

    // Vacuous satisfaction: no values contains none of anything.
    assert!(matches("nin", &["techno"], &[]));
    assert!(matches("contains_none", &["techno"], &[]));
}

#[test]
fn test_blank_values_count_as_empty() {
    assert!(!matches("eq", &["techno"], &["", "   "]));
    assert!(matches("contains_none", &["techno"], &["", "   "]));
}

#[test]
fn test_unknown_operator_always_passes() {
    assert!(matches("fuzzy", &["techno"], &["jazz"]));
    assert!(matches("fuzzy", &["techno"], &[]));
}

#[test]
fn test_empty_operand_edge_cases() {
    // all([]) is vacuously true; any([]) is false.
    assert!(matches("contains_all", &[], &["techno"]));
    assert!(!matches("contains_any", &[], &["techno"]));
    assert!(!matches("eq", &[], &["techno"]));
    assert!(matches("contains_none", &[], &["techno"]));
}
