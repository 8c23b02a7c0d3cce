//! Error types for the store
//!
//! Governance refusals are not errors; they come back as
//! [`EditOutcome::Rejected`](lexin_governance::EditOutcome).

use lexin_governance::GovernanceError;
use lexin_version::{ChangeRequestId, EntityId, EntityKind, HistoryError, VersionId};

/// Main store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Entity does not exist
    #[error("{} not found: {id}", kind.label())]
    NotFound {
        /// Entity family searched
        kind: EntityKind,
        /// Missing id
        id: EntityId,
    },

    /// Version does not belong to the entity
    #[error("version {version} not found in {} {id}", kind.label())]
    VersionNotFound {
        /// Entity family
        kind: EntityKind,
        /// Entity searched
        id: EntityId,
        /// Missing version
        version: VersionId,
    },

    /// Version references an unrecorded change request
    #[error("change request not found: {0}")]
    ChangeRequestNotFound(ChangeRequestId),

    /// Request is well-formed but violates a store rule
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Stored history is malformed
    #[error("invalid history for {} {id}: {source}", kind.label())]
    History {
        /// Entity family
        kind: EntityKind,
        /// Entity whose history is broken
        id: EntityId,
        /// Violated invariant
        #[source]
        source: HistoryError,
    },

    /// Governance rule violated while loading or transitioning
    #[error("governance error: {0}")]
    Governance(#[from] GovernanceError),

    /// Byte store failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// JSON encoding or decoding failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// True for lookups of missing entities or versions
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::VersionNotFound { .. } | Self::ChangeRequestNotFound(_)
        )
    }
}

/// Byte store failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem failure on a key
    #[error("io error on {key}: {source}")]
    Io {
        /// Key being accessed
        key: String,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Any other backend failure
    #[error("backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_family() {
        let err = StoreError::NotFound {
            kind: EntityKind::Prd,
            id: EntityId::new("d9"),
        };
        assert_eq!(err.to_string(), "requirement document not found: d9");
        assert!(err.is_not_found());
        assert!(!StoreError::Config("bad".into()).is_not_found());
    }
}
