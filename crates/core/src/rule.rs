// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composable audience rule trees.
//!
//! A [`RuleGroup`] joins its rules with a single [`Relationship`]; rules are
//! either leaf [`Term`]s or nested groups, so arbitrary AND/OR expressions can
//! be built up and rendered as a filter expression.

use std::str::FromStr;
use thiserror::Error;

/// Logical join between the rules of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Relationship {
    #[default]
    And,
    Or,
}

crate::simple_display! {
    Relationship {
        And => "AND",
        Or => "OR",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("unknown relationship: {0}")]
    UnknownRelationship(String),
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
}

impl FromStr for Relationship {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AND" => Ok(Relationship::And),
            "OR" => Ok(Relationship::Or),
            _ => Err(RuleParseError::UnknownRelationship(s.to_string())),
        }
    }
}

/// Comparison applied by a leaf rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
}

impl Operator {
    /// Wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOT_EQUALS",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT_CONTAINS",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::LessThan => "LESS_THAN",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT CONTAINS",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
        }
    }
}

impl FromStr for Operator {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EQUALS" | "==" => Ok(Operator::Equals),
            "NOT_EQUALS" | "!=" => Ok(Operator::NotEquals),
            "CONTAINS" => Ok(Operator::Contains),
            "NOT_CONTAINS" => Ok(Operator::NotContains),
            "GREATER_THAN" | ">" => Ok(Operator::GreaterThan),
            "LESS_THAN" | "<" => Ok(Operator::LessThan),
            _ => Err(RuleParseError::UnknownOperator(s.to_string())),
        }
    }
}

/// Leaf comparison on a custom variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub variable: String,
    pub operator: Operator,
    pub value: String,
}

impl Term {
    pub fn new(variable: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self { variable: variable.into(), operator, value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Term(Term),
    Group(RuleGroup),
}

/// `{relationship, rules}` node of a rule tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleGroup {
    pub relationship: Relationship,
    pub rules: Vec<Rule>,
}

impl RuleGroup {
    pub fn new(relationship: Relationship) -> Self {
        Self { relationship, rules: Vec::new() }
    }

    pub fn and(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self { relationship: Relationship::And, rules: rules.into_iter().collect() }
    }

    pub fn or(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self { relationship: Relationship::Or, rules: rules.into_iter().collect() }
    }

    pub fn with_term(mut self, term: Term) -> Self {
        self.rules.push(Rule::Term(term));
        self
    }

    pub fn with_group(mut self, group: RuleGroup) -> Self {
        self.rules.push(Rule::Group(group));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of leaf terms in the whole tree.
    pub fn term_count(&self) -> usize {
        self.rules
            .iter()
            .map(|rule| match rule {
                Rule::Term(_) => 1,
                Rule::Group(group) => group.term_count(),
            })
            .sum()
    }

    /// Render the tree as a parenthesized filter expression.
    ///
    /// Empty nested groups are dropped; an empty tree renders as `""`.
    pub fn to_filter_expression(&self) -> String {
        let parts: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| match rule {
                Rule::Term(term) => {
                    Some(format!("{} {} {:?}", term.variable, term.operator.symbol(), term.value))
                }
                Rule::Group(group) if group.is_empty() => None,
                Rule::Group(group) => Some(group.to_filter_expression()),
            })
            .collect();
        match parts.len() {
            0 => String::new(),
            1 => parts.into_iter().next().unwrap_or_default(),
            _ => format!("({})", parts.join(&format!(" {} ", self.relationship))),
        }
    }
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
