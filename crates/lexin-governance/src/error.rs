//! Error types for governance operations

use crate::state_machine::GovernanceStatus;
use lexin_version::{ChangeRequestId, EntityId, EntityKind};

/// Governance error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GovernanceError {
    /// A required change-request field is blank
    #[error("change request {field} must not be blank")]
    IncompleteChangeRequest {
        /// Name of the blank field
        field: &'static str,
    },

    /// Transition not permitted by the state machine
    #[error("illegal governance transition: {from} -> {to}")]
    IllegalTransition {
        /// Source status
        from: GovernanceStatus,
        /// Target status
        to: GovernanceStatus,
    },

    /// Change request unknown to the ledger
    #[error("change request not found: {0}")]
    ChangeRequestNotFound(ChangeRequestId),

    /// Change request recorded against another entity
    #[error("change request {id} belongs to {kind} {owner}, not {expected}")]
    OwnershipMismatch {
        /// Offending change request
        id: ChangeRequestId,
        /// Kind it was recorded against
        kind: EntityKind,
        /// Entity it was recorded against
        owner: EntityId,
        /// Entity whose ledger holds it
        expected: EntityId,
    },
}
