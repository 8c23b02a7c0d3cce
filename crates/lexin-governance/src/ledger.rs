//! Append-only change request ledger

use crate::change_request::ChangeRequest;
use crate::error::GovernanceError;
use lexin_version::{ChangeRequestId, EntityId, EntityKind, VersionRecord};
use serde::{Deserialize, Serialize};

/// Change requests of one entity, in submission order
///
/// Entries are permanent: there is no update or removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeRequestLedger {
    entries: Vec<ChangeRequest>,
}

impl ChangeRequestLedger {
    /// Empty ledger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored entries, checking they all belong to one entity
    ///
    /// # Errors
    /// Returns [`GovernanceError::OwnershipMismatch`] for a foreign entry
    pub fn from_entries(
        kind: EntityKind,
        owner: &EntityId,
        entries: Vec<ChangeRequest>,
    ) -> Result<Self, GovernanceError> {
        let ledger = Self { entries };
        ledger.verify_ownership(kind, owner)?;
        Ok(ledger)
    }

    /// Append a change request
    pub fn record(&mut self, request: ChangeRequest) -> &ChangeRequest {
        let index = self.entries.len();
        self.entries.push(request);
        &self.entries[index]
    }

    /// Look up by id
    #[must_use]
    pub fn get(&self, id: &ChangeRequestId) -> Option<&ChangeRequest> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Change request a version was produced under
    #[must_use]
    pub fn for_version<S>(&self, record: &VersionRecord<S>) -> Option<&ChangeRequest> {
        record.change_request_id().and_then(|id| self.get(id))
    }

    /// Entries in submission order
    pub fn iter(&self) -> impl Iterator<Item = &ChangeRequest> {
        self.entries.iter()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every entry names `kind`/`owner`
    ///
    /// # Errors
    /// Returns the first foreign entry
    pub fn verify_ownership(&self, kind: EntityKind, owner: &EntityId) -> Result<(), GovernanceError> {
        match self
            .entries
            .iter()
            .find(|entry| entry.entity_type() != kind || entry.entity_id() != owner)
        {
            Some(entry) => Err(GovernanceError::OwnershipMismatch {
                id: entry.id().clone(),
                kind: entry.entity_type(),
                owner: entry.entity_id().clone(),
                expected: owner.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_request::ChangeRequestDraft;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    #[test]
    fn record_and_lookup() {
        let owner = EntityId::new("d1");
        let mut ledger = ChangeRequestLedger::new();
        let id = ledger
            .record(ChangeRequest::from_draft(
                EntityKind::Prd,
                &owner,
                "alice",
                ChangeRequestDraft::new("clarify scope", "none"),
                today(),
            ))
            .id()
            .clone();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(&id).unwrap().reason(), "clarify scope");
        assert!(ledger.get(&ChangeRequestId::new("missing")).is_none());
        assert!(ledger.verify_ownership(EntityKind::Prd, &owner).is_ok());
    }

    #[test]
    fn foreign_entries_are_rejected() {
        let other = EntityId::new("d2");
        let entry = ChangeRequest::from_draft(EntityKind::Prd, &other, "bob", ChangeRequestDraft::default(), today());
        let err = ChangeRequestLedger::from_entries(EntityKind::Prd, &EntityId::new("d1"), vec![entry]).unwrap_err();
        assert!(matches!(err, GovernanceError::OwnershipMismatch { .. }));
    }

    #[test]
    fn serializes_as_plain_array() {
        let ledger = ChangeRequestLedger::new();
        assert_eq!(serde_json::to_string(&ledger).unwrap(), "[]");
    }
}
