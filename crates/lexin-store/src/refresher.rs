//! Project aggregate refresh
//!
//! A project version records the current version ids of every linked document
//! and design. When a linked child is created or revised, the owning project
//! receives a new version carrying the recomputed id lists.

use crate::entity::{Design, Document, Project};
use crate::version_store::{Versioned, VersionStore};
use chrono::NaiveDate;
use lexin_diff::SummaryLocale;
use lexin_version::{ChangeRequestId, EntityId, EntityKind, RevisionMeta, VersionId};

/// Event that requires a project version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Linked document created
    DocumentAdded(EntityId),
    /// Linked document received a version
    DocumentRevised {
        /// Revised document
        id: EntityId,
        /// Summary of the document version
        summary: String,
    },
    /// Linked design created
    DesignAdded(EntityId),
    /// Linked design received a version
    DesignRevised {
        /// Revised design
        id: EntityId,
        /// Summary of the design version
        summary: String,
    },
    /// Project metadata edited
    ProjectUpdated,
}

impl RefreshTrigger {
    /// Summary recorded on the project version
    #[must_use]
    pub fn summary(&self, locale: SummaryLocale) -> String {
        match (self, locale) {
            (Self::DocumentAdded(_), SummaryLocale::Zh) => "新增需求版本".to_string(),
            (Self::DocumentAdded(_), SummaryLocale::En) => "document added".to_string(),
            (Self::DocumentRevised { summary, .. }, SummaryLocale::Zh) => format!("需求版本更新：{summary}"),
            (Self::DocumentRevised { summary, .. }, SummaryLocale::En) => format!("document revised: {summary}"),
            (Self::DesignAdded(_), SummaryLocale::Zh) => "新增设计版本".to_string(),
            (Self::DesignAdded(_), SummaryLocale::En) => "design added".to_string(),
            (Self::DesignRevised { summary, .. }, SummaryLocale::Zh) => format!("设计版本更新：{summary}"),
            (Self::DesignRevised { summary, .. }, SummaryLocale::En) => format!("design revised: {summary}"),
            (Self::ProjectUpdated, SummaryLocale::Zh) => "项目信息更新".to_string(),
            (Self::ProjectUpdated, SummaryLocale::En) => "project details updated".to_string(),
        }
    }

    /// Child that caused the refresh, with its family
    #[must_use]
    pub fn focus(&self) -> Option<(EntityKind, &EntityId)> {
        match self {
            Self::DocumentAdded(id) | Self::DocumentRevised { id, .. } => Some((EntityKind::Prd, id)),
            Self::DesignAdded(id) | Self::DesignRevised { id, .. } => Some((EntityKind::Ui, id)),
            Self::ProjectUpdated => None,
        }
    }
}

/// Summary of a first version
#[must_use]
pub fn initial_summary(kind: EntityKind, locale: SummaryLocale) -> &'static str {
    match (kind, locale) {
        (EntityKind::Project, SummaryLocale::Zh) => "项目创建",
        (EntityKind::Project, SummaryLocale::En) => "project created",
        (_, SummaryLocale::Zh) => "初始版本",
        (_, SummaryLocale::En) => "initial version",
    }
}

/// Child version id lists of a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedVersions {
    /// Current version ids of linked documents
    pub prd_version_ids: Vec<VersionId>,
    /// Current version ids of linked designs
    pub ui_version_ids: Vec<VersionId>,
}

/// Recomputes project version sets from the child stores
#[derive(Debug, Clone, Copy)]
pub struct ProjectAggregateRefresher<'a> {
    documents: &'a VersionStore<Document>,
    designs: &'a VersionStore<Design>,
}

impl<'a> ProjectAggregateRefresher<'a> {
    /// Refresher reading the given child stores
    #[inline]
    #[must_use]
    pub fn new(documents: &'a VersionStore<Document>, designs: &'a VersionStore<Design>) -> Self {
        Self { documents, designs }
    }

    /// Current version ids of children linked to `project`
    ///
    /// The `focus` child, if linked, is listed last within its family; others
    /// keep store order.
    #[must_use]
    pub fn linked_versions(&self, project: &EntityId, focus: Option<(EntityKind, &EntityId)>) -> LinkedVersions {
        let focus_prd = focus.and_then(|(kind, id)| (kind == EntityKind::Prd).then_some(id));
        let focus_ui = focus.and_then(|(kind, id)| (kind == EntityKind::Ui).then_some(id));
        LinkedVersions {
            prd_version_ids: ordered_current_ids(self.documents, project, focus_prd),
            ui_version_ids: ordered_current_ids(self.designs, project, focus_ui),
        }
    }

    /// Append a project version reflecting `trigger`
    ///
    /// Returns `None` and writes nothing if the project no longer exists.
    pub fn refresh(
        &self,
        projects: &mut VersionStore<Project>,
        project_id: &EntityId,
        trigger: &RefreshTrigger,
        context: RefreshContext<'_>,
    ) -> Option<VersionId> {
        let Some(project) = projects.get(project_id) else {
            tracing::debug!(project_id = %project_id, ?trigger, "refresh skipped: project not found");
            return None;
        };
        let linked = self.linked_versions(project_id, trigger.focus());
        let mut fields = project.fields().clone();
        fields.prd_version_ids = linked.prd_version_ids;
        fields.ui_version_ids = linked.ui_version_ids;

        let meta = RevisionMeta::new(context.today, context.actor, trigger.summary(context.locale))
            .with_change_request(context.change_request_id.cloned());
        let version_id = projects.append_version(project_id, fields, meta).ok()?;
        tracing::debug!(
            project_id = %project_id,
            version_id = %version_id,
            ?trigger,
            "project aggregate refreshed"
        );
        Some(version_id)
    }
}

/// Provenance of a refresh-generated project version
#[derive(Debug, Clone, Copy)]
pub struct RefreshContext<'a> {
    /// Version date
    pub today: NaiveDate,
    /// Acting user
    pub actor: &'a str,
    /// Summary language
    pub locale: SummaryLocale,
    /// Change request behind the triggering revision
    pub change_request_id: Option<&'a ChangeRequestId>,
}

fn ordered_current_ids<E: Versioned>(
    store: &VersionStore<E>,
    project: &EntityId,
    focus: Option<&EntityId>,
) -> Vec<VersionId> {
    let mut ids = Vec::new();
    let mut focused = None;
    for entity in store.linked_to(project) {
        let current = entity.history().current_version_id().clone();
        if Some(entity.id()) == focus {
            focused = Some(current);
        } else {
            ids.push(current);
        }
    }
    ids.extend(focused);
    ids
}
