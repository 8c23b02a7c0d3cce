//! Governance state machine
//!
//! Three statuses, every transition permitted. Entering `frozen` stamps the
//! freeze date; leaving it clears the date.

use crate::error::GovernanceError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Governance status of a document or design
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GovernanceStatus {
    /// Freely editable
    #[default]
    Draft,
    /// Under review, still editable
    Review,
    /// Edits require a change request
    Frozen,
}

impl GovernanceStatus {
    /// All statuses
    pub const ALL: [Self; 3] = [Self::Draft, Self::Review, Self::Frozen];

    /// Wire name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Frozen => "frozen",
        }
    }
}

impl Display for GovernanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GovernanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("unknown governance status: {s}"))
    }
}

/// Statuses reachable from `from`
#[must_use]
pub fn allowed_transitions(_from: GovernanceStatus) -> Vec<GovernanceStatus> {
    GovernanceStatus::ALL.to_vec()
}

/// Validates a status transition
///
/// # Errors
/// Returns [`GovernanceError::IllegalTransition`] if `to` is not reachable
pub fn validate_transition(from: GovernanceStatus, to: GovernanceStatus) -> Result<(), GovernanceError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(GovernanceError::IllegalTransition { from, to })
    }
}

/// Status plus freeze date, as stored on an entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceState {
    #[serde(rename = "governanceStatus")]
    status: GovernanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frozen_at: Option<NaiveDate>,
}

/// Record of one applied transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Status before
    pub from: GovernanceStatus,
    /// Status after
    pub to: GovernanceStatus,
    /// Freeze date after
    pub frozen_at: Option<NaiveDate>,
}

impl GovernanceState {
    /// Rebuild from stored parts, keeping the freeze invariant
    ///
    /// A frozen state without a date takes `fallback`; a date on a
    /// non-frozen state is dropped.
    #[must_use]
    pub fn from_parts(status: GovernanceStatus, frozen_at: Option<NaiveDate>, fallback: NaiveDate) -> Self {
        let frozen_at = match status {
            GovernanceStatus::Frozen => Some(frozen_at.unwrap_or(fallback)),
            GovernanceStatus::Draft | GovernanceStatus::Review => None,
        };
        Self { status, frozen_at }
    }

    /// Current status
    #[inline]
    #[must_use]
    pub const fn status(&self) -> GovernanceStatus {
        self.status
    }

    /// Date of the last transition into `frozen`, while frozen
    #[inline]
    #[must_use]
    pub const fn frozen_at(&self) -> Option<NaiveDate> {
        self.frozen_at
    }

    /// True while frozen
    #[inline]
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        matches!(self.status, GovernanceStatus::Frozen)
    }

    /// Move to `to` on `today`
    ///
    /// Re-entering `frozen` re-stamps the date.
    ///
    /// # Errors
    /// Returns error if the transition is not allowed
    pub fn transition(&mut self, to: GovernanceStatus, today: NaiveDate) -> Result<Transition, GovernanceError> {
        validate_transition(self.status, to)?;
        let from = self.status;
        self.status = to;
        self.frozen_at = match to {
            GovernanceStatus::Frozen => Some(today),
            GovernanceStatus::Draft | GovernanceStatus::Review => None,
        };
        Ok(Transition {
            from,
            to,
            frozen_at: self.frozen_at,
        })
    }
}
