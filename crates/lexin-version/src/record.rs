//! Version envelope

use crate::id::{ChangeRequestId, VersionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provenance of a version: who, when, why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionMeta {
    /// Date the version is produced
    pub created_at: NaiveDate,
    /// Actor producing it
    pub created_by: String,
    /// Short description of what changed
    pub summary: String,
    /// Change request justifying the version
    pub change_request_id: Option<ChangeRequestId>,
}

impl RevisionMeta {
    /// Provenance without a change request
    #[must_use]
    pub fn new(created_at: NaiveDate, created_by: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            created_at,
            created_by: created_by.into(),
            summary: summary.into(),
            change_request_id: None,
        }
    }

    /// Attach a change request
    #[inline]
    #[must_use]
    pub fn with_change_request(mut self, id: Option<ChangeRequestId>) -> Self {
        self.change_request_id = id;
        self
    }
}

/// One immutable version of an entity
///
/// Carries the envelope fields plus the full snapshot `S`, flattened into the
/// same JSON object. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord<S> {
    id: VersionId,
    version: u32,
    created_at: NaiveDate,
    created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    change_request_id: Option<ChangeRequestId>,
    summary: String,
    #[serde(flatten)]
    snapshot: S,
}

impl<S> VersionRecord<S> {
    pub(crate) fn new(id: VersionId, version: u32, meta: RevisionMeta, snapshot: S) -> Self {
        Self {
            id,
            version,
            created_at: meta.created_at,
            created_by: meta.created_by,
            change_request_id: meta.change_request_id,
            summary: meta.summary,
            snapshot,
        }
    }

    /// Version identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &VersionId {
        &self.id
    }

    /// Sequence number, starting at 1
    #[inline]
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Creation date
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    /// Producing actor
    #[inline]
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Linked change request
    #[inline]
    #[must_use]
    pub fn change_request_id(&self) -> Option<&ChangeRequestId> {
        self.change_request_id.as_ref()
    }

    /// Change description
    #[inline]
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Entity fields at this version
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }
}
