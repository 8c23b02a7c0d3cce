//! Collections of versioned entities
//!
//! [`VersionStore`] owns one entity family, newest entity first. It creates
//! entities with their first version and appends later versions; it does not
//! consult governance, which the workspace checks before calling in.

use crate::entity::{Governed, Project};
use crate::error::StoreError;
use lexin_version::{
    EntityId, EntityKind, ProjectSnapshot, RevisionMeta, Snapshot, VersionHistory, VersionId,
    VersionRecord,
};
use serde::Serialize;

/// Entity with an append-only version history
pub trait Versioned {
    /// Snapshot type of each version
    type Fields: Snapshot;

    /// New entity holding version 1
    fn build(id: EntityId, fields: Self::Fields, meta: RevisionMeta) -> Self;

    /// Identifier
    fn id(&self) -> &EntityId;

    /// Live fields
    fn fields(&self) -> &Self::Fields;

    /// Version history
    fn history(&self) -> &VersionHistory<Self::Fields>;

    /// Append a version and make its fields live
    fn commit(&mut self, fields: Self::Fields, meta: RevisionMeta) -> VersionId;
}

impl<S: Snapshot> Versioned for Governed<S> {
    type Fields = S;

    fn build(id: EntityId, fields: S, meta: RevisionMeta) -> Self {
        Self::create(id, fields, meta)
    }

    fn id(&self) -> &EntityId {
        Governed::id(self)
    }

    fn fields(&self) -> &S {
        Governed::fields(self)
    }

    fn history(&self) -> &VersionHistory<S> {
        Governed::history(self)
    }

    fn commit(&mut self, fields: S, meta: RevisionMeta) -> VersionId {
        Governed::commit(self, fields, meta)
    }
}

impl Versioned for Project {
    type Fields = ProjectSnapshot;

    fn build(id: EntityId, fields: ProjectSnapshot, meta: RevisionMeta) -> Self {
        Self::create(id, fields, Vec::new(), meta)
    }

    fn id(&self) -> &EntityId {
        Project::id(self)
    }

    fn fields(&self) -> &ProjectSnapshot {
        Project::fields(self)
    }

    fn history(&self) -> &VersionHistory<ProjectSnapshot> {
        Project::history(self)
    }

    fn commit(&mut self, fields: ProjectSnapshot, meta: RevisionMeta) -> VersionId {
        Project::commit(self, fields, meta)
    }
}

/// One entity family, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VersionStore<E> {
    entities: Vec<E>,
}

impl<E> Default for VersionStore<E> {
    fn default() -> Self {
        Self { entities: Vec::new() }
    }
}

impl<E: Versioned> VersionStore<E> {
    const KIND: EntityKind = <E::Fields as Snapshot>::KIND;

    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `entities` in the given order
    #[must_use]
    pub fn from_entities(entities: Vec<E>) -> Self {
        Self { entities }
    }

    /// Create an entity with version 1 and place it first
    pub fn create_initial(&mut self, fields: E::Fields, meta: RevisionMeta) -> EntityId {
        let id = EntityId::generate();
        self.insert_first(E::build(id.clone(), fields, meta));
        id
    }

    pub(crate) fn insert_first(&mut self, entity: E) {
        tracing::info!(
            kind = %Self::KIND,
            id = %entity.id(),
            version_id = %entity.history().current_version_id(),
            "entity created"
        );
        self.entities.insert(0, entity);
    }

    /// Append a version to an existing entity
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the entity does not exist
    pub fn append_version(
        &mut self,
        id: &EntityId,
        fields: E::Fields,
        meta: RevisionMeta,
    ) -> Result<VersionId, StoreError> {
        let entity = self.require_mut(id)?;
        let version_id = entity.commit(fields, meta);
        tracing::info!(
            kind = %Self::KIND,
            id = %id,
            version_id = %version_id,
            version = entity.history().current_version_number(),
            "version appended"
        );
        Ok(version_id)
    }

    /// Look up an entity
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    /// Look up an entity, failing if absent
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the entity does not exist
    pub fn require(&self, id: &EntityId) -> Result<&E, StoreError> {
        self.get(id).ok_or_else(|| self.not_found(id))
    }

    pub(crate) fn require_mut(&mut self, id: &EntityId) -> Result<&mut E, StoreError> {
        let missing = self.not_found(id);
        self.entities
            .iter_mut()
            .find(|entity| entity.id() == id)
            .ok_or(missing)
    }

    /// Current version of an entity
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the entity does not exist
    pub fn current(&self, id: &EntityId) -> Result<&VersionRecord<E::Fields>, StoreError> {
        Ok(self.require(id)?.history().current())
    }

    /// One version of an entity
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] or [`StoreError::VersionNotFound`]
    pub fn version(
        &self,
        id: &EntityId,
        version_id: &VersionId,
    ) -> Result<&VersionRecord<E::Fields>, StoreError> {
        self.require(id)?
            .history()
            .get(version_id)
            .ok_or_else(|| StoreError::VersionNotFound {
                kind: Self::KIND,
                id: id.clone(),
                version: version_id.clone(),
            })
    }

    /// All versions of an entity, oldest first
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the entity does not exist
    pub fn list(&self, id: &EntityId) -> Result<&[VersionRecord<E::Fields>], StoreError> {
        Ok(self.require(id)?.history().records())
    }

    /// Remove a whole entity
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the entity does not exist
    pub fn remove(&mut self, id: &EntityId) -> Result<E, StoreError> {
        let index = self
            .entities
            .iter()
            .position(|entity| entity.id() == id)
            .ok_or_else(|| self.not_found(id))?;
        tracing::info!(kind = %Self::KIND, id = %id, "entity deleted");
        Ok(self.entities.remove(index))
    }

    /// Entities linked to `project`, in store order
    pub fn linked_to<'a>(&'a self, project: &'a EntityId) -> impl Iterator<Item = &'a E> + 'a {
        self.entities
            .iter()
            .filter(move |entity| entity.fields().project_id() == Some(project))
    }

    /// Entities, newest first
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entities.iter()
    }

    /// Number of entities
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if the store holds nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn not_found(&self, id: &EntityId) -> StoreError {
        StoreError::NotFound {
            kind: Self::KIND,
            id: id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Document;
    use chrono::NaiveDate;
    use lexin_version::DocumentSnapshot;

    fn meta(summary: &str) -> RevisionMeta {
        RevisionMeta::new(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(), "系统", summary)
    }

    #[test]
    fn newest_entity_comes_first() {
        let mut store = VersionStore::<Document>::new();
        let first = store.create_initial(DocumentSnapshot::new("A", ""), meta("初始版本"));
        let second = store.create_initial(DocumentSnapshot::new("B", ""), meta("初始版本"));
        let order: Vec<_> = store.iter().map(|d| d.id().clone()).collect();
        assert_eq!(order, vec![second, first]);
    }

    #[test]
    fn append_and_read_back() {
        let mut store = VersionStore::<Document>::new();
        let id = store.create_initial(DocumentSnapshot::new("A", "one"), meta("初始版本"));
        let v1 = store.current(&id).unwrap().id().clone();
        let v2 = store
            .append_version(&id, DocumentSnapshot::new("A", "two"), meta("edit"))
            .unwrap();
        assert_eq!(store.current(&id).unwrap().id(), &v2);
        assert_eq!(store.version(&id, &v1).unwrap().snapshot().content, "one");
        assert_eq!(store.list(&id).unwrap().len(), 2);
        assert_eq!(store.get(&id).unwrap().fields().content, "two");
    }

    #[test]
    fn missing_entities_and_versions() {
        let mut store = VersionStore::<Document>::new();
        let ghost = EntityId::new("ghost");
        assert!(matches!(
            store.append_version(&ghost, DocumentSnapshot::default(), meta("x")),
            Err(StoreError::NotFound { kind: EntityKind::Prd, .. })
        ));
        let id = store.create_initial(DocumentSnapshot::default(), meta("初始版本"));
        assert!(matches!(
            store.version(&id, &VersionId::new("nope")),
            Err(StoreError::VersionNotFound { .. })
        ));
        store.remove(&id).unwrap();
        assert!(store.is_empty());
        assert!(store.remove(&id).is_err());
    }
}
