// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audience parameters carried by create/update jobs.

use crate::rule::RuleGroup;

/// Parameters for creating a new audience.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudienceCreateParams {
    pub name: String,
    pub description: String,
    /// Membership duration in days
    pub lifespan: u32,
    pub floodlight_id: String,
    pub shared: bool,
    pub rules: Option<RuleGroup>,
}

impl AudienceCreateParams {
    pub fn new(name: impl Into<String>, floodlight_id: impl Into<String>) -> Self {
        Self { name: name.into(), floodlight_id: floodlight_id.into(), ..Self::default() }
    }

    crate::setters! {
        into {
            description: String,
        }
        set {
            lifespan: u32,
            shared: bool,
        }
        option {
            rules: RuleGroup,
        }
    }

    /// Names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("audienceName");
        }
        if self.floodlight_id.trim().is_empty() {
            missing.push("floodlightId");
        }
        missing
    }
}

/// Parameters for updating an existing audience.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudienceUpdateParams {
    pub audience_id: String,
    pub name: String,
    pub description: String,
    pub lifespan: u32,
    /// Attributes the user edited; only these are sent to the backend
    pub changed_attributes: Vec<String>,
    pub shared: bool,
}

impl AudienceUpdateParams {
    pub fn new(audience_id: impl Into<String>) -> Self {
        Self { audience_id: audience_id.into(), ..Self::default() }
    }

    crate::setters! {
        into {
            name: String,
            description: String,
        }
        set {
            lifespan: u32,
            changed_attributes: Vec<String>,
            shared: bool,
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        if self.audience_id.trim().is_empty() {
            vec!["audienceId"]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "audience_tests.rs"]
mod tests;
