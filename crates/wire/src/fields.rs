// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire field names.

pub const ID: &str = "id_";
pub const INDEX: &str = "index_";
pub const STATUS: &str = "status_";
pub const OFFSET: &str = "offset_";
pub const ERROR: &str = "error_";
pub const JOB_TYPE: &str = "jobType_";
pub const LOGS: &str = "logs_";
pub const JOBS: &str = "jobs_";

/// Log entries keep plain names.
pub const LOG_DATE: &str = "date";
pub const LOG_MESSAGE: &str = "message";

// Audience create/update parameters
pub const AUDIENCE_NAME: &str = "audienceName_";
pub const DESCRIPTION: &str = "description_";
pub const LIFESPAN: &str = "lifespan_";
pub const FLOODLIGHT_ID: &str = "floodlightId_";
pub const IS_SHARED: &str = "isShared_";
pub const AUDIENCE_ID: &str = "audienceId_";
pub const CHANGED_ATTRIBUTES: &str = "changedAttributes_";

// Rule trees
pub const RELATIONSHIP: &str = "relationship_";
pub const RULES: &str = "rules_";
pub const VARIABLE: &str = "variable_";
pub const OPERATOR: &str = "operator_";
pub const VALUE: &str = "value_";
