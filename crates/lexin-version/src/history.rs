//! Append-only version history
//!
//! [`VersionHistory`] owns the ordered versions of one entity and the pointer
//! to its current version.
//!
//! # Invariants
//! - never empty
//! - `versions[i].version == i + 1`
//! - `current_version_id` is the id of the last version
//! - version ids are unique within the history

use crate::id::VersionId;
use crate::record::{RevisionMeta, VersionRecord};
use crate::snapshot::Snapshot;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// Ordered versions of one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionHistory<S> {
    current_version_id: VersionId,
    versions: Vec<VersionRecord<S>>,
}

impl<S: Snapshot> VersionHistory<S> {
    /// History holding a single first version with a generated id
    #[must_use]
    pub fn start(snapshot: S, meta: RevisionMeta) -> Self {
        Self::start_with_id(VersionId::generate(S::KIND, 1), snapshot, meta)
    }

    /// History holding a single first version with the given id
    #[must_use]
    pub fn start_with_id(id: VersionId, snapshot: S, meta: RevisionMeta) -> Self {
        Self {
            current_version_id: id.clone(),
            versions: vec![VersionRecord::new(id, 1, meta, snapshot)],
        }
    }

    /// Rebuild a history from stored parts
    ///
    /// A missing current pointer resolves to the last version.
    ///
    /// # Errors
    /// Returns error if the parts violate any history invariant
    pub fn from_parts(
        current_version_id: Option<VersionId>,
        versions: Vec<VersionRecord<S>>,
    ) -> Result<Self, HistoryError> {
        let last = versions.last().ok_or(HistoryError::Empty)?;
        let history = Self {
            current_version_id: current_version_id.unwrap_or_else(|| last.id().clone()),
            versions,
        };
        history.verify()?;
        Ok(history)
    }

    /// Append a version holding `snapshot` and make it current
    pub fn append(&mut self, snapshot: S, meta: RevisionMeta) -> &VersionRecord<S> {
        let number = self.current().version() + 1;
        let id = VersionId::generate(S::KIND, number);
        self.current_version_id = id.clone();
        let index = self.versions.len();
        self.versions.push(VersionRecord::new(id, number, meta, snapshot));
        &self.versions[index]
    }

    /// Check every history invariant
    ///
    /// # Errors
    /// Returns the first violated invariant
    pub fn verify(&self) -> Result<(), HistoryError> {
        let last = self.versions.last().ok_or(HistoryError::Empty)?;
        let mut seen = HashSet::with_capacity(self.versions.len());
        for (position, record) in self.versions.iter().enumerate() {
            let expected = u32::try_from(position + 1).unwrap_or(u32::MAX);
            if record.version() != expected {
                return Err(HistoryError::NonContiguous {
                    position,
                    expected,
                    found: record.version(),
                });
            }
            if !seen.insert(record.id()) {
                return Err(HistoryError::DuplicateId(record.id().clone()));
            }
        }
        if &self.current_version_id != last.id() {
            return Err(HistoryError::CurrentNotLatest {
                current: self.current_version_id.clone(),
                latest: last.id().clone(),
            });
        }
        Ok(())
    }
}

impl<S> VersionHistory<S> {
    /// The current (latest) version
    #[must_use]
    pub fn current(&self) -> &VersionRecord<S> {
        &self.versions[self.versions.len() - 1]
    }

    /// Identifier of the current version
    #[inline]
    #[must_use]
    pub fn current_version_id(&self) -> &VersionId {
        &self.current_version_id
    }

    /// Number of the current version
    #[inline]
    #[must_use]
    pub fn current_version_number(&self) -> u32 {
        self.current().version()
    }

    /// Look up a version by id
    #[must_use]
    pub fn get(&self, id: &VersionId) -> Option<&VersionRecord<S>> {
        self.versions.iter().find(|record| record.id() == id)
    }

    /// True if `id` names a version of this history
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &VersionId) -> bool {
        self.get(id).is_some()
    }

    /// All versions, oldest first
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[VersionRecord<S>] {
        &self.versions
    }

    /// Iterate versions, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &VersionRecord<S>> {
        self.versions.iter()
    }

    /// Number of versions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Always false for a well-formed history
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Current version and the highest-numbered version before it
    #[must_use]
    pub fn latest_two(&self) -> (&VersionRecord<S>, Option<&VersionRecord<S>>) {
        let current = self.current();
        let previous = self
            .versions
            .iter()
            .filter(|record| record.version() < current.version())
            .max_by_key(|record| record.version());
        (current, previous)
    }

    /// Versions created strictly after `date`
    pub fn created_after(&self, date: NaiveDate) -> impl Iterator<Item = &VersionRecord<S>> {
        self.versions
            .iter()
            .filter(move |record| record.created_at() > date)
    }

    /// Number of revisions beyond the first version
    #[inline]
    #[must_use]
    pub fn revision_count(&self) -> usize {
        self.versions.len().saturating_sub(1)
    }
}

/// History invariant violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// No versions at all
    #[error("version history is empty")]
    Empty,

    /// Version numbers skip or repeat
    #[error("version at position {position} is numbered {found}, expected {expected}")]
    NonContiguous {
        /// Index in the history
        position: usize,
        /// Required number
        expected: u32,
        /// Number found
        found: u32,
    },

    /// Two versions share an id
    #[error("duplicate version id: {0}")]
    DuplicateId(VersionId),

    /// Current pointer does not name the last version
    #[error("current version {current} is not the latest version {latest}")]
    CurrentNotLatest {
        /// Stored pointer
        current: VersionId,
        /// Id of the last version
        latest: VersionId,
    },
}
