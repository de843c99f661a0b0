// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serde shapes of the wire JSON.
//!
//! One flat [`WireJob`] carries the base fields plus every variant field;
//! which variant fields are present depends on `jobType_`. Every field
//! deserializes leniently, so an object never fails to read: wrongly typed
//! values fall back to their defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct WireJob {
    #[serde(rename = "id_", deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(rename = "index_", deserialize_with = "lenient::int")]
    pub index: i64,
    #[serde(rename = "status_", deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(rename = "offset_", deserialize_with = "lenient::uint")]
    pub offset: u64,
    #[serde(rename = "error_", deserialize_with = "lenient::string")]
    pub error: String,
    #[serde(rename = "jobType_", deserialize_with = "lenient::string")]
    pub job_type: String,
    /// Kept as raw values so malformed entries pass through untouched.
    #[serde(rename = "logs_", deserialize_with = "lenient::values")]
    pub logs: Vec<Value>,
    #[serde(rename = "jobs_", deserialize_with = "lenient::jobs")]
    pub jobs: Vec<WireJob>,

    #[serde(
        rename = "audienceId_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub audience_id: Option<String>,
    #[serde(
        rename = "audienceName_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub audience_name: Option<String>,
    #[serde(
        rename = "description_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub description: Option<String>,
    #[serde(
        rename = "lifespan_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_uint"
    )]
    pub lifespan: Option<u64>,
    #[serde(
        rename = "floodlightId_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub floodlight_id: Option<String>,
    #[serde(
        rename = "isShared_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_bool"
    )]
    pub is_shared: Option<bool>,
    #[serde(
        rename = "changedAttributes_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_strings"
    )]
    pub changed_attributes: Option<Vec<String>>,
    #[serde(
        rename = "relationship_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub relationship: Option<String>,
    #[serde(
        rename = "rules_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_rules"
    )]
    pub rules: Option<Vec<WireRule>>,
}

impl WireJob {
    /// Anything that is not an object reads as an empty job.
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

/// A rule leaf `{variable_, operator_, value_}` or a nested group
/// `{relationship_, rules_}`; a present `rules_` key makes it a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct WireRule {
    #[serde(
        rename = "variable_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub variable: Option<String>,
    #[serde(
        rename = "operator_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub operator: Option<String>,
    #[serde(
        rename = "value_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub value: Option<String>,
    #[serde(
        rename = "relationship_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub relationship: Option<String>,
    #[serde(
        rename = "rules_",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_rules"
    )]
    pub rules: Option<Vec<WireRule>>,
}

/// A well-formed log entry. Entries that do not fit stay raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireLog {
    pub date: String,
    pub message: String,
}

/// Field deserializers that never fail on a wrongly typed value.
mod lenient {
    use super::{WireJob, WireRule};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn int_of(value: &Value) -> i64 {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    fn string_of(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        }
    }

    fn bool_of(value: &Value) -> bool {
        match value {
            Value::Bool(b) => *b,
            Value::String(s) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    fn items(value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            _ => Vec::new(),
        }
    }

    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(int_of(&Value::deserialize(d)?))
    }

    pub fn uint<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        Ok(u64::try_from(int_of(&Value::deserialize(d)?)).unwrap_or(0))
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(string_of(&Value::deserialize(d)?))
    }

    pub fn values<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Value>, D::Error> {
        Ok(items(Value::deserialize(d)?))
    }

    /// Non-object children still count as (empty) jobs so sibling order holds.
    pub fn jobs<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<WireJob>, D::Error> {
        Ok(items(Value::deserialize(d)?).iter().map(WireJob::from_value).collect())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Some(string_of(&Value::deserialize(d)?)))
    }

    pub fn opt_uint<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        uint(d).map(Some)
    }

    pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(Some(bool_of(&Value::deserialize(d)?)))
    }

    pub fn opt_strings<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        let strings = items(Value::deserialize(d)?)
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect();
        Ok(Some(strings))
    }

    /// Rule entries that are not objects are dropped.
    pub fn opt_rules<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<WireRule>>, D::Error> {
        let rules = items(Value::deserialize(d)?)
            .iter()
            .filter(|item| item.is_object())
            .filter_map(|item| WireRule::deserialize(item).ok())
            .collect();
        Ok(Some(rules))
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
