// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audience backend seam.
//!
//! Job bodies reach the advertising platform and the spreadsheet rows that
//! describe pending work only through [`AudienceBackend`].

use aj_core::{
    AudienceCreateParams, AudienceUpdateParams, Operator, Relationship, RuleGroup, Term,
};
use parking_lot::Mutex;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors from backend operations
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read backend fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid backend fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

/// Audience source and sink used by the audience operations.
pub trait AudienceBackend: Send + Sync {
    /// Audiences the user asked to create.
    fn create_requests(&self) -> Result<Vec<AudienceCreateParams>, BackendError>;
    /// Audiences the user edited.
    fn update_requests(&self) -> Result<Vec<AudienceUpdateParams>, BackendError>;
    /// Every audience currently known to the platform.
    fn existing_audiences(&self) -> Result<Vec<AudienceUpdateParams>, BackendError>;
    /// Create an audience, returning its platform id.
    fn create_audience(&self, params: &AudienceCreateParams) -> Result<String, BackendError>;
    fn update_audience(&self, params: &AudienceUpdateParams) -> Result<(), BackendError>;
}

// ── Dry-run backend ─────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Fixture {
    #[serde(default)]
    create_requests: Vec<CreateRow>,
    #[serde(default)]
    update_requests: Vec<UpdateRow>,
    #[serde(default)]
    existing_audiences: Vec<UpdateRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRow {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    lifespan: u32,
    #[serde(default)]
    floodlight_id: String,
    #[serde(default)]
    shared: bool,
    #[serde(default)]
    relationship: Option<String>,
    #[serde(default)]
    rules: Vec<TermRow>,
}

#[derive(Debug, Deserialize)]
struct TermRow {
    variable: String,
    operator: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRow {
    audience_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    lifespan: u32,
    #[serde(default)]
    changed_attributes: Vec<String>,
    #[serde(default)]
    shared: bool,
}

impl CreateRow {
    fn into_params(self) -> Result<AudienceCreateParams, BackendError> {
        let relationship = match self.relationship {
            Some(raw) => raw.parse::<Relationship>().map_err(|e| BackendError::Rejected(e.to_string()))?,
            None => Relationship::And,
        };
        let mut rules = RuleGroup::new(relationship);
        for row in self.rules {
            let operator =
                row.operator.parse::<Operator>().map_err(|e| BackendError::Rejected(e.to_string()))?;
            rules = rules.with_term(Term::new(row.variable, operator, row.value));
        }
        let mut params = AudienceCreateParams::new(self.name, self.floodlight_id)
            .description(self.description)
            .lifespan(self.lifespan)
            .shared(self.shared);
        if !rules.is_empty() {
            params.rules = Some(rules);
        }
        Ok(params)
    }
}

impl From<UpdateRow> for AudienceUpdateParams {
    fn from(row: UpdateRow) -> Self {
        AudienceUpdateParams::new(row.audience_id)
            .name(row.name)
            .description(row.description)
            .lifespan(row.lifespan)
            .changed_attributes(row.changed_attributes)
            .shared(row.shared)
    }
}

/// Backend that reads pending work from a JSON fixture and only records
/// what it would have sent.
///
/// Fixture shape: `{"createRequests": [...], "updateRequests": [...],
/// "existingAudiences": [...]}`, each key optional.
pub struct DryRunBackend {
    create: Vec<AudienceCreateParams>,
    update: Vec<AudienceUpdateParams>,
    existing: Vec<AudienceUpdateParams>,
    sent: Mutex<Vec<String>>,
}

impl DryRunBackend {
    pub fn empty() -> Self {
        Self { create: Vec::new(), update: Vec::new(), existing: Vec::new(), sent: Mutex::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, BackendError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        let create =
            fixture.create_requests.into_iter().map(CreateRow::into_params).collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            create,
            update: fixture.update_requests.into_iter().map(Into::into).collect(),
            existing: fixture.existing_audiences.into_iter().map(Into::into).collect(),
            sent: Mutex::default(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, BackendError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Requests recorded so far, oldest first.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

impl AudienceBackend for DryRunBackend {
    fn create_requests(&self) -> Result<Vec<AudienceCreateParams>, BackendError> {
        Ok(self.create.clone())
    }

    fn update_requests(&self) -> Result<Vec<AudienceUpdateParams>, BackendError> {
        Ok(self.update.clone())
    }

    fn existing_audiences(&self) -> Result<Vec<AudienceUpdateParams>, BackendError> {
        Ok(self.existing.clone())
    }

    fn create_audience(&self, params: &AudienceCreateParams) -> Result<String, BackendError> {
        let mut sent = self.sent.lock();
        let id = format!("dry-run-{}", sent.len() + 1);
        let filter = params.rules.as_ref().map(RuleGroup::to_filter_expression).unwrap_or_default();
        tracing::info!(audience = %params.name, %id, %filter, "dry run: create audience");
        sent.push(format!("create {}", params.name));
        Ok(id)
    }

    fn update_audience(&self, params: &AudienceUpdateParams) -> Result<(), BackendError> {
        tracing::info!(
            audience_id = %params.audience_id,
            changed = ?params.changed_attributes,
            "dry run: update audience"
        );
        self.sent.lock().push(format!("update {}", params.audience_id));
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{AudienceBackend, BackendError};
    use aj_core::{AudienceCreateParams, AudienceUpdateParams, FakeClock};
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded backend call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum BackendCall {
        Create(String),
        Update(String),
    }

    #[derive(Default)]
    struct FakeBackendState {
        create: Vec<AudienceCreateParams>,
        update: Vec<AudienceUpdateParams>,
        existing: Vec<AudienceUpdateParams>,
        /// Audience names/ids whose create/update is rejected
        rejected: HashSet<String>,
        unavailable: bool,
        calls: Vec<BackendCall>,
        latency: Option<(FakeClock, Duration)>,
    }

    /// Fake backend for testing
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        inner: Arc<Mutex<FakeBackendState>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_create_requests(self, requests: Vec<AudienceCreateParams>) -> Self {
            self.inner.lock().create = requests;
            self
        }

        pub fn with_update_requests(self, requests: Vec<AudienceUpdateParams>) -> Self {
            self.inner.lock().update = requests;
            self
        }

        pub fn with_existing(self, audiences: Vec<AudienceUpdateParams>) -> Self {
            self.inner.lock().existing = audiences;
            self
        }

        /// Reject create/update calls for this audience name or id.
        pub fn reject(self, key: &str) -> Self {
            self.inner.lock().rejected.insert(key.to_string());
            self
        }

        /// Fail every request listing call.
        pub fn unavailable(self) -> Self {
            self.inner.lock().unavailable = true;
            self
        }

        /// Advance `clock` by `per_call` on every create/update.
        pub fn with_latency(self, clock: FakeClock, per_call: Duration) -> Self {
            self.inner.lock().latency = Some((clock, per_call));
            self
        }

        pub fn calls(&self) -> Vec<BackendCall> {
            self.inner.lock().calls.clone()
        }

        fn record(&self, call: BackendCall, key: &str) -> Result<(), BackendError> {
            let mut state = self.inner.lock();
            if let Some((clock, per_call)) = &state.latency {
                clock.advance(*per_call);
            }
            state.calls.push(call);
            if state.rejected.contains(key) {
                return Err(BackendError::Rejected(format!("{} rejected", key)));
            }
            Ok(())
        }

        fn listing<T: Clone>(&self, pick: impl Fn(&FakeBackendState) -> &Vec<T>) -> Result<Vec<T>, BackendError> {
            let state = self.inner.lock();
            if state.unavailable {
                return Err(BackendError::Unavailable("fake backend offline".to_string()));
            }
            Ok(pick(&state).clone())
        }
    }

    impl AudienceBackend for FakeBackend {
        fn create_requests(&self) -> Result<Vec<AudienceCreateParams>, BackendError> {
            self.listing(|state| &state.create)
        }

        fn update_requests(&self) -> Result<Vec<AudienceUpdateParams>, BackendError> {
            self.listing(|state| &state.update)
        }

        fn existing_audiences(&self) -> Result<Vec<AudienceUpdateParams>, BackendError> {
            self.listing(|state| &state.existing)
        }

        fn create_audience(&self, params: &AudienceCreateParams) -> Result<String, BackendError> {
            self.record(BackendCall::Create(params.name.clone()), &params.name)?;
            Ok(format!("aud-{}", params.name))
        }

        fn update_audience(&self, params: &AudienceUpdateParams) -> Result<(), BackendError> {
            self.record(BackendCall::Update(params.audience_id.clone()), &params.audience_id)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{BackendCall, FakeBackend};

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
