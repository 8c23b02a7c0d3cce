//! Stored entities and their patches
//!
//! Each entity keeps its live field set alongside its version history. The
//! live fields equal the current version after every versioned edit, and may
//! run ahead of it after an unversioned patch.

use chrono::NaiveDate;
use lexin_governance::{ChangeRequest, ChangeRequestLedger, GovernanceError, GovernanceState, GovernanceStatus, Transition};
use lexin_version::{
    DesignSnapshot, DocumentSnapshot, EntityId, Priority, ProjectSnapshot, ProjectStatus,
    RevisionMeta, Snapshot, VersionHistory, VersionId, VersionRecord, WorkStatus,
};
use serde::Serialize;

/// Requirement document or design artifact under governance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Governed<S> {
    id: EntityId,
    #[serde(flatten)]
    fields: S,
    created_at: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<NaiveDate>,
    #[serde(flatten)]
    history: VersionHistory<S>,
    #[serde(flatten)]
    governance: GovernanceState,
    change_requests: ChangeRequestLedger,
}

/// Requirement document
pub type Document = Governed<DocumentSnapshot>;
/// Design artifact
pub type Design = Governed<DesignSnapshot>;

impl<S: Snapshot> Governed<S> {
    pub(crate) fn create(id: EntityId, fields: S, meta: RevisionMeta) -> Self {
        Self {
            id,
            created_at: meta.created_at,
            updated_at: None,
            history: VersionHistory::start(fields.clone(), meta),
            fields,
            governance: GovernanceState::default(),
            change_requests: ChangeRequestLedger::new(),
        }
    }

    pub(crate) fn from_parts(
        id: EntityId,
        fields: S,
        created_at: NaiveDate,
        updated_at: Option<NaiveDate>,
        history: VersionHistory<S>,
        governance: GovernanceState,
        change_requests: ChangeRequestLedger,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at,
            history,
            governance,
            change_requests,
        }
    }

    /// Identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Live fields
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &S {
        &self.fields
    }

    /// Creation date
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    /// Date of the last edit
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Option<NaiveDate> {
        self.updated_at
    }

    /// Version history
    #[inline]
    #[must_use]
    pub fn history(&self) -> &VersionHistory<S> {
        &self.history
    }

    /// Current version
    #[inline]
    #[must_use]
    pub fn current_version(&self) -> &VersionRecord<S> {
        self.history.current()
    }

    /// Governance status and freeze date
    #[inline]
    #[must_use]
    pub fn governance(&self) -> &GovernanceState {
        &self.governance
    }

    /// Governance status
    #[inline]
    #[must_use]
    pub fn governance_status(&self) -> GovernanceStatus {
        self.governance.status()
    }

    /// Recorded change requests
    #[inline]
    #[must_use]
    pub fn change_requests(&self) -> &ChangeRequestLedger {
        &self.change_requests
    }

    /// Owning project
    #[inline]
    #[must_use]
    pub fn project_id(&self) -> Option<&EntityId> {
        self.fields.project_id()
    }

    pub(crate) fn patch(&mut self, apply: impl FnOnce(&mut S), today: NaiveDate) {
        apply(&mut self.fields);
        self.updated_at = Some(today);
    }

    pub(crate) fn commit(&mut self, fields: S, meta: RevisionMeta) -> VersionId {
        self.updated_at = Some(meta.created_at);
        self.fields = fields.clone();
        self.history.append(fields, meta).id().clone()
    }

    pub(crate) fn record_change_request(&mut self, request: ChangeRequest) {
        self.change_requests.record(request);
    }

    pub(crate) fn set_status(
        &mut self,
        status: GovernanceStatus,
        today: NaiveDate,
    ) -> Result<Transition, GovernanceError> {
        self.governance.transition(status, today)
    }
}

/// Project owning documents and designs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: EntityId,
    #[serde(flatten)]
    fields: ProjectSnapshot,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    members: Vec<String>,
    created_at: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<NaiveDate>,
    #[serde(flatten)]
    history: VersionHistory<ProjectSnapshot>,
    change_requests: ChangeRequestLedger,
}

impl Project {
    pub(crate) fn create(id: EntityId, fields: ProjectSnapshot, members: Vec<String>, meta: RevisionMeta) -> Self {
        Self {
            id,
            created_at: meta.created_at,
            updated_at: None,
            history: VersionHistory::start(fields.clone(), meta),
            fields,
            members,
            change_requests: ChangeRequestLedger::new(),
        }
    }

    pub(crate) fn from_parts(
        id: EntityId,
        fields: ProjectSnapshot,
        members: Vec<String>,
        created_at: NaiveDate,
        updated_at: Option<NaiveDate>,
        history: VersionHistory<ProjectSnapshot>,
        change_requests: ChangeRequestLedger,
    ) -> Self {
        Self {
            id,
            fields,
            members,
            created_at,
            updated_at,
            history,
            change_requests,
        }
    }

    /// Identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Live fields
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &ProjectSnapshot {
        &self.fields
    }

    /// Members, formatted `username(displayName)`
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Creation date
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    /// Date of the last edit
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Option<NaiveDate> {
        self.updated_at
    }

    /// Version history
    #[inline]
    #[must_use]
    pub fn history(&self) -> &VersionHistory<ProjectSnapshot> {
        &self.history
    }

    /// Current version
    #[inline]
    #[must_use]
    pub fn current_version(&self) -> &VersionRecord<ProjectSnapshot> {
        self.history.current()
    }

    /// Change requests; projects carry no governance so this stays empty
    #[inline]
    #[must_use]
    pub fn change_requests(&self) -> &ChangeRequestLedger {
        &self.change_requests
    }

    pub(crate) fn set_members(&mut self, members: Vec<String>) {
        self.members = members;
    }

    pub(crate) fn commit(&mut self, fields: ProjectSnapshot, meta: RevisionMeta) -> VersionId {
        self.updated_at = Some(meta.created_at);
        self.fields = fields.clone();
        self.history.append(fields, meta).id().clone()
    }
}

/// Unversioned edit of a requirement document
///
/// `None` leaves a field alone; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New body
    pub content: Option<String>,
    /// New status
    pub status: Option<WorkStatus>,
    /// New project link
    pub project_id: Option<Option<EntityId>>,
    /// New requirement name
    pub requirement_name: Option<Option<String>>,
    /// New priority
    pub priority: Option<Option<Priority>>,
    /// New source
    pub source: Option<Option<String>>,
}

impl DocumentPatch {
    /// Set title
    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set status
    #[inline]
    #[must_use]
    pub fn status(mut self, status: WorkStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set body
    #[inline]
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Drop the project link
    #[inline]
    #[must_use]
    pub fn unlink_project(mut self) -> Self {
        self.project_id = Some(None);
        self
    }

    pub(crate) fn apply(self, fields: &mut DocumentSnapshot) {
        set(&mut fields.title, self.title);
        set(&mut fields.description, self.description);
        set(&mut fields.content, self.content);
        set(&mut fields.status, self.status);
        set(&mut fields.project_id, self.project_id);
        set(&mut fields.requirement_name, self.requirement_name);
        set(&mut fields.priority, self.priority);
        set(&mut fields.source, self.source);
    }
}

/// Unversioned edit of a design artifact
///
/// `None` leaves a field alone; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New document link
    pub prd_id: Option<Option<EntityId>>,
    /// New linked document title
    pub prd_title: Option<Option<String>>,
    /// New project link
    pub project_id: Option<Option<EntityId>>,
    /// New status
    pub status: Option<WorkStatus>,
    /// New tool
    pub tool: Option<String>,
    /// New thumbnail
    pub thumbnail: Option<Option<String>>,
    /// New component tree
    pub component_tree: Option<Option<String>>,
    /// New HTML mockup
    pub html_content: Option<Option<String>>,
}

impl DesignPatch {
    /// Set title
    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set thumbnail
    #[inline]
    #[must_use]
    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(Some(thumbnail.into()));
        self
    }

    /// Drop the project link
    #[inline]
    #[must_use]
    pub fn unlink_project(mut self) -> Self {
        self.project_id = Some(None);
        self
    }

    pub(crate) fn apply(self, fields: &mut DesignSnapshot) {
        set(&mut fields.title, self.title);
        set(&mut fields.description, self.description);
        set(&mut fields.prd_id, self.prd_id);
        set(&mut fields.prd_title, self.prd_title);
        set(&mut fields.project_id, self.project_id);
        set(&mut fields.status, self.status);
        set(&mut fields.tool, self.tool);
        set(&mut fields.thumbnail, self.thumbnail);
        set(&mut fields.component_tree, self.component_tree);
        set(&mut fields.html_content, self.html_content);
    }
}

/// Versioned edit of project metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New status
    pub status: Option<ProjectStatus>,
    /// New member list
    pub members: Option<Vec<String>>,
}

impl ProjectPatch {
    /// Set title
    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set status
    #[inline]
    #[must_use]
    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replace members
    #[inline]
    #[must_use]
    pub fn members(mut self, members: Vec<String>) -> Self {
        self.members = Some(members);
        self
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
