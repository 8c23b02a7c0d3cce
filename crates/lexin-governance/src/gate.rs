//! Edit admission for governed entities
//!
//! [`GovernanceGate`] decides whether a new version may be written. Under
//! [`EnforcementMode::Strict`] an edit of a frozen entity needs a complete,
//! approved change request; under [`EnforcementMode::Advisory`] the edit is
//! admitted and the violation logged.

use crate::change_request::{ApprovalStatus, ChangeRequestDraft};
use crate::state_machine::GovernanceState;
use lexin_version::{EntityId, EntityKind, VersionId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// How frozen-entity edits are policed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementMode {
    /// Reject ungoverned edits
    #[default]
    Strict,
    /// Admit ungoverned edits with a warning
    Advisory,
}

/// Why an edit was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Frozen entity edited without a change request
    ChangeRequestRequired,
    /// Change request missing a reason or impact
    IncompleteChangeRequest {
        /// Name of the blank field
        field: &'static str,
    },
    /// Change request not approved
    NotApproved(ApprovalStatus),
}

impl Display for RejectionReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChangeRequestRequired => f.write_str("entity is frozen; a change request is required"),
            Self::IncompleteChangeRequest { field } => write!(f, "change request {field} must not be blank"),
            Self::NotApproved(status) => write!(f, "change request is {status:?}, not approved"),
        }
    }
}

/// Result of a governed edit
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Version written
    Applied(VersionId),
    /// Nothing written
    Rejected(RejectionReason),
}

impl EditOutcome {
    /// True if a version was written
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Written version, if any
    #[inline]
    #[must_use]
    pub fn version_id(&self) -> Option<&VersionId> {
        match self {
            Self::Applied(id) => Some(id),
            Self::Rejected(_) => None,
        }
    }

    /// Refusal reason, if any
    #[inline]
    #[must_use]
    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// Edit admission policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GovernanceGate {
    mode: EnforcementMode,
}

impl GovernanceGate {
    /// Gate with the given mode
    #[inline]
    #[must_use]
    pub const fn new(mode: EnforcementMode) -> Self {
        Self { mode }
    }

    /// Enforcement mode
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> EnforcementMode {
        self.mode
    }

    /// Decide whether an edit of `kind`/`id` in `state` may proceed
    ///
    /// # Errors
    /// Returns the refusal reason when the edit must not be written
    pub fn admit(
        &self,
        kind: EntityKind,
        id: &EntityId,
        state: &GovernanceState,
        draft: Option<&ChangeRequestDraft>,
    ) -> Result<(), RejectionReason> {
        if !state.is_frozen() {
            return Ok(());
        }
        let Err(reason) = Self::check_frozen_edit(draft) else {
            return Ok(());
        };
        match self.mode {
            EnforcementMode::Strict => Err(reason),
            EnforcementMode::Advisory => {
                tracing::warn!(kind = %kind, id = %id, %reason, "frozen entity edited without governance");
                Ok(())
            }
        }
    }

    fn check_frozen_edit(draft: Option<&ChangeRequestDraft>) -> Result<(), RejectionReason> {
        let draft = draft.ok_or(RejectionReason::ChangeRequestRequired)?;
        if let Err(crate::error::GovernanceError::IncompleteChangeRequest { field }) = draft.validate() {
            return Err(RejectionReason::IncompleteChangeRequest { field });
        }
        match draft.effective_approval() {
            ApprovalStatus::Approved => Ok(()),
            other => Err(RejectionReason::NotApproved(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::GovernanceStatus;
    use chrono::NaiveDate;

    fn frozen() -> GovernanceState {
        let mut state = GovernanceState::default();
        state
            .transition(GovernanceStatus::Frozen, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap())
            .unwrap();
        state
    }

    fn id() -> EntityId {
        EntityId::new("d1")
    }

    #[test]
    fn unfrozen_edits_always_pass() {
        let gate = GovernanceGate::default();
        assert!(gate.admit(EntityKind::Prd, &id(), &GovernanceState::default(), None).is_ok());
    }

    #[test]
    fn strict_mode_requires_approved_change_request() {
        let gate = GovernanceGate::new(EnforcementMode::Strict);
        let state = frozen();
        assert_eq!(
            gate.admit(EntityKind::Prd, &id(), &state, None),
            Err(RejectionReason::ChangeRequestRequired)
        );

        let pending = ChangeRequestDraft::new("scope", "none").with_approval(ApprovalStatus::Pending);
        assert_eq!(
            gate.admit(EntityKind::Prd, &id(), &state, Some(&pending)),
            Err(RejectionReason::NotApproved(ApprovalStatus::Pending))
        );

        let blank = ChangeRequestDraft::new("scope", " ");
        assert_eq!(
            gate.admit(EntityKind::Prd, &id(), &state, Some(&blank)),
            Err(RejectionReason::IncompleteChangeRequest { field: "impact" })
        );

        let ok = ChangeRequestDraft::new("scope", "none");
        assert!(gate.admit(EntityKind::Prd, &id(), &state, Some(&ok)).is_ok());
    }

    #[test]
    fn advisory_mode_admits_everything() {
        let gate = GovernanceGate::new(EnforcementMode::Advisory);
        assert!(gate.admit(EntityKind::Ui, &id(), &frozen(), None).is_ok());
    }

    #[test]
    fn outcome_accessors() {
        let applied = EditOutcome::Applied(VersionId::new("v2"));
        assert!(applied.is_applied());
        assert_eq!(applied.version_id().unwrap().as_str(), "v2");
        let rejected = EditOutcome::Rejected(RejectionReason::ChangeRequestRequired);
        assert!(rejected.version_id().is_none());
        assert!(rejected.rejection().unwrap().to_string().contains("frozen"));
    }
}
