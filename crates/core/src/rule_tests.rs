// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn relationship_defaults_to_and() {
    assert_eq!(Relationship::default(), Relationship::And);
    assert_eq!(RuleGroup::default().relationship, Relationship::And);
}

#[parameterized(
    upper_and = { "AND", Relationship::And },
    lower_or = { "or", Relationship::Or },
    mixed = { "Or", Relationship::Or },
)]
fn relationship_parses(input: &str, expected: Relationship) {
    assert_eq!(input.parse::<Relationship>().unwrap(), expected);
}

#[test]
fn relationship_rejects_unknown() {
    let err = "XOR".parse::<Relationship>().unwrap_err();
    assert_eq!(err, RuleParseError::UnknownRelationship("XOR".to_string()));
}

#[parameterized(
    equals = { "EQUALS", Operator::Equals },
    symbol = { "!=", Operator::NotEquals },
    contains = { "contains", Operator::Contains },
    greater = { "GREATER_THAN", Operator::GreaterThan },
)]
fn operator_parses(input: &str, expected: Operator) {
    assert_eq!(input.parse::<Operator>().unwrap(), expected);
}

#[test]
fn operator_wire_name_round_trips() {
    for op in [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Contains,
        Operator::NotContains,
        Operator::GreaterThan,
        Operator::LessThan,
    ] {
        assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
    }
}

#[test]
fn nested_groups_render_with_parentheses() {
    let rules = RuleGroup::new(Relationship::And)
        .with_term(Term::new("u1", Operator::Equals, "a"))
        .with_group(
            RuleGroup::new(Relationship::Or)
                .with_term(Term::new("u2", Operator::Contains, "b"))
                .with_term(Term::new("u3", Operator::NotEquals, "c")),
        );

    assert_eq!(
        rules.to_filter_expression(),
        r#"(u1 == "a" AND (u2 CONTAINS "b" OR u3 != "c"))"#
    );
    assert_eq!(rules.term_count(), 3);
}

#[test]
fn single_term_group_has_no_parentheses() {
    let rules = RuleGroup::or([Rule::Term(Term::new("u1", Operator::LessThan, "5"))]);
    assert_eq!(rules.to_filter_expression(), r#"u1 < "5""#);
}

#[test]
fn empty_groups_are_dropped() {
    let rules = RuleGroup::and([
        Rule::Group(RuleGroup::default()),
        Rule::Term(Term::new("u1", Operator::Equals, "x")),
    ]);
    assert_eq!(rules.to_filter_expression(), r#"u1 == "x""#);
    assert_eq!(RuleGroup::default().to_filter_expression(), "");
}
