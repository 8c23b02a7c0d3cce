//! Workspace facade
//!
//! [`Workspace`] owns the three entity collections and is the only entry
//! point for edits. Every operation finishes its in-memory write before it
//! returns; a caller wanting persistence calls
//! [`save`](Workspace::save) afterwards.
//!
//! # Versioned edits
//!
//! 1. the governance gate checks the entity's status and the supplied
//!    change request
//! 2. the change request, if any, is recorded in the entity's ledger
//! 3. a new version is appended and made current
//! 4. if the new version is linked to a project, that project receives a
//!    version carrying the recomputed child version ids

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::entity::{Design, DesignPatch, Document, DocumentPatch, Governed, Project, ProjectPatch};
use crate::error::StoreError;
use crate::insights::ProjectInsights;
use crate::refresher::{initial_summary, ProjectAggregateRefresher, RefreshContext, RefreshTrigger};
use crate::version_store::VersionStore;
use chrono::NaiveDate;
use lexin_diff::{DiffEngine, DiffSummary};
use lexin_governance::{
    ChangeRequest, ChangeRequestDraft, EditOutcome, GovernanceGate, GovernanceStatus,
    RejectionReason, Transition, DEFAULT_REASON,
};
use lexin_version::{
    ChangeRequestId, DesignSnapshot, DocumentSnapshot, EntityId, EntityKind, ProjectSnapshot,
    RevisionMeta, Snapshot, VersionId, VersionRecord,
};

/// Extra inputs of a versioned edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionOptions {
    /// Justification; required by strict governance for frozen entities
    pub change_request: Option<ChangeRequestDraft>,
    /// Version summary; falls back to the change request reason
    pub summary: Option<String>,
    /// Acting user; falls back to the configured default actor
    pub actor: Option<String>,
}

impl RevisionOptions {
    /// Options with nothing set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a change request
    #[inline]
    #[must_use]
    pub fn with_change_request(mut self, draft: ChangeRequestDraft) -> Self {
        self.change_request = Some(draft);
        self
    }

    /// Set summary
    #[inline]
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set acting user
    #[inline]
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

/// Documents, designs and projects with their histories
#[derive(Debug)]
pub struct Workspace {
    config: StoreConfig,
    clock: Box<dyn Clock>,
    gate: GovernanceGate,
    diff: DiffEngine,
    documents: VersionStore<Document>,
    designs: VersionStore<Design>,
    projects: VersionStore<Project>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Workspace {
    /// Empty workspace using the system clock
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self::from_stores(config, VersionStore::new(), VersionStore::new(), VersionStore::new())
    }

    pub(crate) fn from_stores(
        config: StoreConfig,
        documents: VersionStore<Document>,
        designs: VersionStore<Design>,
        projects: VersionStore<Project>,
    ) -> Self {
        Self {
            gate: GovernanceGate::new(config.enforcement),
            diff: DiffEngine::new(config.summary_locale),
            config,
            clock: Box::new(SystemClock),
            documents,
            designs,
            projects,
        }
    }

    /// Replace the date source
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Today's date per the workspace clock
    #[inline]
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Requirement documents, newest first
    #[inline]
    #[must_use]
    pub fn documents(&self) -> &VersionStore<Document> {
        &self.documents
    }

    /// Design artifacts, newest first
    #[inline]
    #[must_use]
    pub fn designs(&self) -> &VersionStore<Design> {
        &self.designs
    }

    /// Projects, newest first
    #[inline]
    #[must_use]
    pub fn projects(&self) -> &VersionStore<Project> {
        &self.projects
    }

    /// Look up a requirement document
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn document(&self, id: &EntityId) -> Result<&Document, StoreError> {
        self.documents.require(id)
    }

    /// Look up a design artifact
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn design(&self, id: &EntityId) -> Result<&Design, StoreError> {
        self.designs.require(id)
    }

    /// Look up a project
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn project(&self, id: &EntityId) -> Result<&Project, StoreError> {
        self.projects.require(id)
    }

    // Creation

    /// Create a requirement document with version 1
    pub fn add_document(&mut self, fields: DocumentSnapshot) -> EntityId {
        let project = linked_project(&fields);
        let meta = self.initial_meta(EntityKind::Prd);
        let actor = meta.created_by.clone();
        let id = self.documents.create_initial(fields, meta);
        if let Some(project) = project {
            self.refresh(&project, &RefreshTrigger::DocumentAdded(id.clone()), &actor, None);
        }
        id
    }

    /// Create a design artifact with version 1
    pub fn add_design(&mut self, fields: DesignSnapshot) -> EntityId {
        let project = linked_project(&fields);
        let meta = self.initial_meta(EntityKind::Ui);
        let actor = meta.created_by.clone();
        let id = self.designs.create_initial(fields, meta);
        if let Some(project) = project {
            self.refresh(&project, &RefreshTrigger::DesignAdded(id.clone()), &actor, None);
        }
        id
    }

    /// Create a project with version 1 and no children
    pub fn add_project(&mut self, mut fields: ProjectSnapshot, members: Vec<String>) -> EntityId {
        fields.prd_version_ids.clear();
        fields.ui_version_ids.clear();
        let id = EntityId::generate();
        let meta = self.initial_meta(EntityKind::Project);
        self.projects
            .insert_first(Project::create(id.clone(), fields, members, meta));
        id
    }

    fn initial_meta(&self, kind: EntityKind) -> RevisionMeta {
        RevisionMeta::new(
            self.today(),
            self.config.default_actor.clone(),
            initial_summary(kind, self.config.summary_locale),
        )
    }

    // Unversioned edits

    /// Patch a document's live fields without creating a version
    ///
    /// Unlinking a project this way leaves the project's recorded version
    /// set untouched.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn update_document(&mut self, id: &EntityId, patch: DocumentPatch) -> Result<(), StoreError> {
        let today = self.today();
        self.documents
            .require_mut(id)?
            .patch(|fields| patch.apply(fields), today);
        tracing::debug!(id = %id, "document patched");
        Ok(())
    }

    /// Patch a design's live fields without creating a version
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn update_design(&mut self, id: &EntityId, patch: DesignPatch) -> Result<(), StoreError> {
        let today = self.today();
        self.designs
            .require_mut(id)?
            .patch(|fields| patch.apply(fields), today);
        tracing::debug!(id = %id, "design patched");
        Ok(())
    }

    /// Edit project metadata, appending a project version with freshly
    /// computed child version ids
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn update_project(&mut self, id: &EntityId, patch: ProjectPatch) -> Result<VersionId, StoreError> {
        let mut fields = self.projects.require(id)?.fields().clone();
        if let Some(title) = patch.title {
            fields.title = title;
        }
        if let Some(description) = patch.description {
            fields.description = description;
        }
        if let Some(status) = patch.status {
            fields.status = status;
        }
        let linked = ProjectAggregateRefresher::new(&self.documents, &self.designs).linked_versions(id, None);
        fields.prd_version_ids = linked.prd_version_ids;
        fields.ui_version_ids = linked.ui_version_ids;

        let meta = RevisionMeta::new(
            self.today(),
            self.config.default_actor.clone(),
            RefreshTrigger::ProjectUpdated.summary(self.config.summary_locale),
        );
        if let Some(members) = patch.members {
            self.projects.require_mut(id)?.set_members(members);
        }
        self.projects.append_version(id, fields, meta)
    }

    // Versioned edits

    /// Append a document version, subject to governance
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent; governance refusals come
    /// back as [`EditOutcome::Rejected`]
    pub fn create_document_version(
        &mut self,
        id: &EntityId,
        next: DocumentSnapshot,
        options: RevisionOptions,
    ) -> Result<EditOutcome, StoreError> {
        let today = self.today();
        let revision = match revise(&mut self.documents, &self.gate, today, &self.config.default_actor, id, next, options)? {
            Ok(revision) => revision,
            Err(reason) => return Ok(EditOutcome::Rejected(reason)),
        };
        if let Some(project) = &revision.project_id {
            let trigger = RefreshTrigger::DocumentRevised {
                id: id.clone(),
                summary: revision.summary.clone(),
            };
            self.refresh(project, &trigger, &revision.actor, revision.change_request_id.as_ref());
        }
        Ok(EditOutcome::Applied(revision.version_id))
    }

    /// Append a design version, subject to governance
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent; governance refusals come
    /// back as [`EditOutcome::Rejected`]
    pub fn create_design_version(
        &mut self,
        id: &EntityId,
        next: DesignSnapshot,
        options: RevisionOptions,
    ) -> Result<EditOutcome, StoreError> {
        let today = self.today();
        let revision = match revise(&mut self.designs, &self.gate, today, &self.config.default_actor, id, next, options)? {
            Ok(revision) => revision,
            Err(reason) => return Ok(EditOutcome::Rejected(reason)),
        };
        if let Some(project) = &revision.project_id {
            let trigger = RefreshTrigger::DesignRevised {
                id: id.clone(),
                summary: revision.summary.clone(),
            };
            self.refresh(project, &trigger, &revision.actor, revision.change_request_id.as_ref());
        }
        Ok(EditOutcome::Applied(revision.version_id))
    }

    fn refresh(
        &mut self,
        project: &EntityId,
        trigger: &RefreshTrigger,
        actor: &str,
        change_request_id: Option<&ChangeRequestId>,
    ) -> Option<VersionId> {
        let context = RefreshContext {
            today: self.clock.today(),
            actor,
            locale: self.config.summary_locale,
            change_request_id,
        };
        ProjectAggregateRefresher::new(&self.documents, &self.designs).refresh(
            &mut self.projects,
            project,
            trigger,
            context,
        )
    }

    // Governance

    /// Move a document to `status`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn set_document_governance_status(
        &mut self,
        id: &EntityId,
        status: GovernanceStatus,
    ) -> Result<Transition, StoreError> {
        let today = self.today();
        set_status(&mut self.documents, id, status, today)
    }

    /// Move a design to `status`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn set_design_governance_status(
        &mut self,
        id: &EntityId,
        status: GovernanceStatus,
    ) -> Result<Transition, StoreError> {
        let today = self.today();
        set_status(&mut self.designs, id, status, today)
    }

    // Deletion

    /// Remove a document with its history; links to it are left dangling
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn delete_document(&mut self, id: &EntityId) -> Result<Document, StoreError> {
        self.documents.remove(id)
    }

    /// Remove a design with its history
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn delete_design(&mut self, id: &EntityId) -> Result<Design, StoreError> {
        self.designs.remove(id)
    }

    /// Remove a project with its history; children keep their project id
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn delete_project(&mut self, id: &EntityId) -> Result<Project, StoreError> {
        self.projects.remove(id)
    }

    // Queries

    /// Versions of a document, oldest first
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn document_versions(&self, id: &EntityId) -> Result<&[VersionRecord<DocumentSnapshot>], StoreError> {
        self.documents.list(id)
    }

    /// Versions of a design, oldest first
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn design_versions(&self, id: &EntityId) -> Result<&[VersionRecord<DesignSnapshot>], StoreError> {
        self.designs.list(id)
    }

    /// Versions of a project, oldest first
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn project_versions(&self, id: &EntityId) -> Result<&[VersionRecord<ProjectSnapshot>], StoreError> {
        self.projects.list(id)
    }

    /// Section diff between two versions of one document, `from` older
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`], [`StoreError::VersionNotFound`], or
    /// [`StoreError::ConstraintViolation`] if a version belongs to another
    /// document
    pub fn diff_document_versions(
        &self,
        id: &EntityId,
        from: &VersionId,
        to: &VersionId,
    ) -> Result<DiffSummary, StoreError> {
        let older = locate_version(&self.documents, id, from)?;
        let newer = locate_version(&self.documents, id, to)?;
        Ok(self.diff.documents(older.snapshot(), newer.snapshot()))
    }

    /// Field diff between two versions of one design, `from` older
    ///
    /// # Errors
    /// Same as [`diff_document_versions`](Self::diff_document_versions)
    pub fn diff_design_versions(
        &self,
        id: &EntityId,
        from: &VersionId,
        to: &VersionId,
    ) -> Result<DiffSummary, StoreError> {
        let older = locate_version(&self.designs, id, from)?;
        let newer = locate_version(&self.designs, id, to)?;
        Ok(self.diff.designs(older.snapshot(), newer.snapshot()))
    }

    /// Diff of a document's current version against its predecessor
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn latest_document_diff(&self, id: &EntityId) -> Result<Option<DiffSummary>, StoreError> {
        let (current, previous) = self.documents.require(id)?.history().latest_two();
        Ok(previous.map(|previous| self.diff.documents(previous.snapshot(), current.snapshot())))
    }

    /// Diff of a design's current version against its predecessor
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn latest_design_diff(&self, id: &EntityId) -> Result<Option<DiffSummary>, StoreError> {
        let (current, previous) = self.designs.require(id)?.history().latest_two();
        Ok(previous.map(|previous| self.diff.designs(previous.snapshot(), current.snapshot())))
    }

    /// Render a diff in the configured locale
    #[must_use]
    pub fn describe(&self, diff: &DiffSummary) -> String {
        self.diff.describe(diff)
    }

    /// Change request behind a version, if it has one
    ///
    /// Project versions resolve against the ledgers of their children.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] or [`StoreError::VersionNotFound`]
    pub fn change_request_for_version(
        &self,
        kind: EntityKind,
        id: &EntityId,
        version: &VersionId,
    ) -> Result<Option<&ChangeRequest>, StoreError> {
        match kind {
            EntityKind::Prd => {
                let record = self.documents.version(id, version)?;
                Ok(self.documents.require(id)?.change_requests().for_version(record))
            }
            EntityKind::Ui => {
                let record = self.designs.version(id, version)?;
                Ok(self.designs.require(id)?.change_requests().for_version(record))
            }
            EntityKind::Project => {
                let record = self.projects.version(id, version)?;
                Ok(record
                    .change_request_id()
                    .and_then(|request| self.find_change_request(request)))
            }
        }
    }

    /// Search every document and design ledger for a change request
    #[must_use]
    pub fn find_change_request(&self, id: &ChangeRequestId) -> Option<&ChangeRequest> {
        self.documents
            .iter()
            .find_map(|doc| doc.change_requests().get(id))
            .or_else(|| self.designs.iter().find_map(|design| design.change_requests().get(id)))
    }

    /// Delivery metrics of a project
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if absent
    pub fn project_insights(&self, id: &EntityId) -> Result<ProjectInsights, StoreError> {
        let project = self.projects.require(id)?;
        Ok(ProjectInsights::compute(project, &self.documents, &self.designs))
    }

    /// Check every history and change-request link
    ///
    /// # Errors
    /// Returns the first violation found
    pub fn verify_integrity(&self) -> Result<(), StoreError> {
        verify_governed(&self.documents)?;
        verify_governed(&self.designs)?;
        for project in self.projects.iter() {
            project.history().verify().map_err(|source| StoreError::History {
                kind: EntityKind::Project,
                id: project.id().clone(),
                source,
            })?;
        }
        Ok(())
    }
}

struct Revision {
    version_id: VersionId,
    summary: String,
    actor: String,
    change_request_id: Option<ChangeRequestId>,
    project_id: Option<EntityId>,
}

fn revise<S: Snapshot>(
    store: &mut VersionStore<Governed<S>>,
    gate: &GovernanceGate,
    today: NaiveDate,
    default_actor: &str,
    id: &EntityId,
    next: S,
    options: RevisionOptions,
) -> Result<Result<Revision, RejectionReason>, StoreError> {
    let entity = store.require(id)?;
    if let Err(reason) = gate.admit(S::KIND, id, entity.governance(), options.change_request.as_ref()) {
        tracing::info!(kind = %S::KIND, id = %id, %reason, "version rejected");
        return Ok(Err(reason));
    }

    let actor = options.actor.unwrap_or_else(|| default_actor.to_string());
    let request = options
        .change_request
        .map(|draft| ChangeRequest::from_draft(S::KIND, id, actor.clone(), draft, today));
    let summary = options
        .summary
        .filter(|summary| !summary.trim().is_empty())
        .or_else(|| request.as_ref().map(|request| request.reason().to_string()))
        .unwrap_or_else(|| DEFAULT_REASON.to_string());
    let change_request_id = request.as_ref().map(|request| request.id().clone());
    let project_id = linked_project(&next);

    if let Some(request) = request {
        store.require_mut(id)?.record_change_request(request);
    }
    let meta = RevisionMeta::new(today, actor.clone(), summary.clone())
        .with_change_request(change_request_id.clone());
    let version_id = store.append_version(id, next, meta)?;
    Ok(Ok(Revision {
        version_id,
        summary,
        actor,
        change_request_id,
        project_id,
    }))
}

fn set_status<S: Snapshot>(
    store: &mut VersionStore<Governed<S>>,
    id: &EntityId,
    status: GovernanceStatus,
    today: NaiveDate,
) -> Result<Transition, StoreError> {
    let transition = store.require_mut(id)?.set_status(status, today)?;
    tracing::info!(
        kind = %S::KIND,
        id = %id,
        from = %transition.from,
        to = %transition.to,
        "governance status changed"
    );
    Ok(transition)
}

fn linked_project<S: Snapshot>(fields: &S) -> Option<EntityId> {
    fields.project_id().filter(|project| !project.is_empty()).cloned()
}

fn locate_version<'a, S: Snapshot>(
    store: &'a VersionStore<Governed<S>>,
    id: &EntityId,
    version: &VersionId,
) -> Result<&'a VersionRecord<S>, StoreError> {
    let entity = store.require(id)?;
    if let Some(record) = entity.history().get(version) {
        return Ok(record);
    }
    match store.iter().find(|other| other.history().contains(version)) {
        Some(owner) => Err(StoreError::ConstraintViolation(format!(
            "version {version} belongs to {} {}, not {id}",
            S::KIND.label(),
            owner.id()
        ))),
        None => Err(StoreError::VersionNotFound {
            kind: S::KIND,
            id: id.clone(),
            version: version.clone(),
        }),
    }
}

fn verify_governed<S: Snapshot>(store: &VersionStore<Governed<S>>) -> Result<(), StoreError> {
    for entity in store.iter() {
        entity.history().verify().map_err(|source| StoreError::History {
            kind: S::KIND,
            id: entity.id().clone(),
            source,
        })?;
        entity.change_requests().verify_ownership(S::KIND, entity.id())?;
        for record in entity.history().iter() {
            if let Some(request) = record.change_request_id() {
                if entity.change_requests().get(request).is_none() {
                    return Err(StoreError::ChangeRequestNotFound(request.clone()));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use lexin_governance::ApprovalStatus;

    fn workspace() -> (Workspace, FixedClock) {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
        (Workspace::new(StoreConfig::default()).with_clock(clock.clone()), clock)
    }

    #[test]
    fn summary_falls_back_to_reason_then_default() {
        let (mut ws, _) = workspace();
        let id = ws.add_document(DocumentSnapshot::new("Login", "a"));

        let outcome = ws
            .create_document_version(
                &id,
                DocumentSnapshot::new("Login", "b"),
                RevisionOptions::new().with_change_request(ChangeRequestDraft::new("clarify", "none")),
            )
            .unwrap();
        assert!(outcome.is_applied());
        assert_eq!(ws.document(&id).unwrap().current_version().summary(), "clarify");

        let _ = ws
            .create_document_version(&id, DocumentSnapshot::new("Login", "c"), RevisionOptions::new())
            .unwrap();
        assert_eq!(ws.document(&id).unwrap().current_version().summary(), DEFAULT_REASON);
        ws.verify_integrity().unwrap();
    }

    #[test]
    fn actor_override_is_recorded() {
        let (mut ws, _) = workspace();
        let id = ws.add_design(DesignSnapshot::new("Checkout"));
        let _ = ws
            .create_design_version(
                &id,
                DesignSnapshot::new("Checkout v2"),
                RevisionOptions::new()
                    .with_actor("alice")
                    .with_change_request(ChangeRequestDraft::new("redo", "layout")),
            )
            .unwrap();
        let design = ws.design(&id).unwrap();
        assert_eq!(design.current_version().created_by(), "alice");
        assert_eq!(design.change_requests().iter().next().unwrap().created_by(), "alice");
    }

    #[test]
    fn rejected_edit_writes_nothing() {
        let (mut ws, _) = workspace();
        let id = ws.add_document(DocumentSnapshot::new("Login", "a"));
        ws.set_document_governance_status(&id, GovernanceStatus::Frozen).unwrap();
        let pending = ChangeRequestDraft::new("scope", "none").with_approval(ApprovalStatus::Pending);

        let outcome = ws
            .create_document_version(
                &id,
                DocumentSnapshot::new("Login", "b"),
                RevisionOptions::new().with_change_request(pending),
            )
            .unwrap();
        assert_eq!(
            outcome,
            EditOutcome::Rejected(RejectionReason::NotApproved(ApprovalStatus::Pending))
        );
        let doc = ws.document(&id).unwrap();
        assert_eq!(doc.history().len(), 1);
        assert!(doc.change_requests().is_empty());
        assert_eq!(doc.fields().content, "a");
    }

    #[test]
    fn versions_from_another_document_are_a_constraint_violation() {
        let (mut ws, _) = workspace();
        let a = ws.add_document(DocumentSnapshot::new("A", "x"));
        let b = ws.add_document(DocumentSnapshot::new("B", "y"));
        let a1 = ws.document(&a).unwrap().current_version().id().clone();
        let b1 = ws.document(&b).unwrap().current_version().id().clone();

        assert!(matches!(
            ws.diff_document_versions(&a, &a1, &b1),
            Err(StoreError::ConstraintViolation(_))
        ));
        assert!(matches!(
            ws.diff_document_versions(&a, &a1, &VersionId::new("nope")),
            Err(StoreError::VersionNotFound { .. })
        ));
        assert!(ws.diff_document_versions(&a, &a1, &a1).unwrap().is_empty());
    }

    #[test]
    fn latest_diff_needs_two_versions() {
        let (mut ws, _) = workspace();
        let id = ws.add_design(DesignSnapshot::new("Checkout"));
        assert!(ws.latest_design_diff(&id).unwrap().is_none());
        let _ = ws
            .create_design_version(&id, DesignSnapshot::new("Checkout").with_tool("Sketch"), RevisionOptions::new())
            .unwrap();
        let diff = ws.latest_design_diff(&id).unwrap().unwrap();
        assert_eq!(ws.describe(&diff), "调整 设计工具");
    }
}
