//! Change requests
//!
//! A change request justifies an edit of a frozen entity. Once built it is
//! never modified.

use crate::error::GovernanceError;
use chrono::NaiveDate;
use lexin_version::{ChangeRequestId, EntityId, EntityKind};
use serde::{Deserialize, Serialize};

/// Reason recorded when none is given
pub const DEFAULT_REASON: &str = "常规更新";
/// Impact recorded when none is given
pub const DEFAULT_IMPACT: &str = "未标注";

/// Approval state of a change request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting a decision
    Pending,
    /// Approved; recorded requests default here
    #[default]
    Approved,
    /// Turned down
    Rejected,
}

/// Caller-supplied change request details
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeRequestDraft {
    /// Why the change is needed
    pub reason: String,
    /// What the change affects
    pub impact: String,
    /// Related task references
    pub related_tasks: Vec<String>,
    /// Explicit approval state; approved when absent
    pub approval_status: Option<ApprovalStatus>,
}

impl ChangeRequestDraft {
    /// Draft with reason and impact
    #[must_use]
    pub fn new(reason: impl Into<String>, impact: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            impact: impact.into(),
            ..Self::default()
        }
    }

    /// Attach related tasks
    #[inline]
    #[must_use]
    pub fn with_related_tasks(mut self, tasks: Vec<String>) -> Self {
        self.related_tasks = tasks;
        self
    }

    /// Set approval state
    #[inline]
    #[must_use]
    pub fn with_approval(mut self, status: ApprovalStatus) -> Self {
        self.approval_status = Some(status);
        self
    }

    /// Approval state the recorded request will carry
    #[inline]
    #[must_use]
    pub fn effective_approval(&self) -> ApprovalStatus {
        self.approval_status.unwrap_or_default()
    }

    /// Require non-blank reason and impact
    ///
    /// # Errors
    /// Returns [`GovernanceError::IncompleteChangeRequest`] naming the blank field
    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.reason.trim().is_empty() {
            return Err(GovernanceError::IncompleteChangeRequest { field: "reason" });
        }
        if self.impact.trim().is_empty() {
            return Err(GovernanceError::IncompleteChangeRequest { field: "impact" });
        }
        Ok(())
    }
}

/// Split a comma-separated task list, dropping blanks
#[must_use]
pub fn parse_related_tasks(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|task| !task.is_empty())
        .map(str::to_string)
        .collect()
}

/// Recorded change request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    id: ChangeRequestId,
    entity_type: EntityKind,
    entity_id: EntityId,
    created_by: String,
    created_at: NaiveDate,
    reason: String,
    impact: String,
    approval_status: ApprovalStatus,
    #[serde(default)]
    related_tasks: Vec<String>,
}

impl ChangeRequest {
    /// Build a change request for an entity from a draft
    ///
    /// Blank reason and impact fall back to [`DEFAULT_REASON`] and
    /// [`DEFAULT_IMPACT`].
    #[must_use]
    pub fn from_draft(
        entity_type: EntityKind,
        entity_id: &EntityId,
        created_by: impl Into<String>,
        draft: ChangeRequestDraft,
        today: NaiveDate,
    ) -> Self {
        let approval_status = draft.effective_approval();
        Self {
            id: ChangeRequestId::generate(entity_type, entity_id),
            entity_type,
            entity_id: entity_id.clone(),
            created_by: created_by.into(),
            created_at: today,
            reason: non_blank_or(draft.reason, DEFAULT_REASON),
            impact: non_blank_or(draft.impact, DEFAULT_IMPACT),
            approval_status,
            related_tasks: draft.related_tasks,
        }
    }

    /// Identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ChangeRequestId {
        &self.id
    }

    /// Kind of the owning entity
    #[inline]
    #[must_use]
    pub fn entity_type(&self) -> EntityKind {
        self.entity_type
    }

    /// Owning entity
    #[inline]
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Submitting actor
    #[inline]
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Submission date
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    /// Reason for the change
    #[inline]
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Expected impact
    #[inline]
    #[must_use]
    pub fn impact(&self) -> &str {
        &self.impact
    }

    /// Approval state
    #[inline]
    #[must_use]
    pub fn approval_status(&self) -> ApprovalStatus {
        self.approval_status
    }

    /// Related task references
    #[inline]
    #[must_use]
    pub fn related_tasks(&self) -> &[String] {
        &self.related_tasks
    }
}

fn non_blank_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
