//! Snapshot payloads carried by every version
//!
//! A version stores the full field set of its entity at the time it was
//! produced. [`Snapshot`] is **sealed**: the three entity families below are
//! the only implementors.

use crate::id::{EntityId, EntityKind, VersionId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Title given to requirement documents saved without one
pub const UNTITLED_DOCUMENT: &str = "未命名需求";
/// Title given to design artifacts saved without one
pub const UNTITLED_DESIGN: &str = "未命名设计";
/// Title given to projects saved without one
pub const UNTITLED_PROJECT: &str = "未命名项目";
/// Design tool assumed when none is recorded
pub const DEFAULT_TOOL: &str = "Figma";

/// Field set of one entity family
pub trait Snapshot:
    Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static + private::Sealed
{
    /// Entity family this snapshot belongs to
    const KIND: EntityKind;

    /// Display title
    fn title(&self) -> &str;

    /// Owning project, if linked
    fn project_id(&self) -> Option<&EntityId>;
}

#[doc(hidden)]
pub mod private {
    /// Sealed trait marker
    pub trait Sealed {}
}

/// Progress of a document or design
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    /// Still being written
    #[default]
    InProgress,
    /// Done
    Completed,
}

/// Progress of a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Not started
    #[default]
    Planning,
    /// Underway
    InProgress,
    /// Done
    Completed,
}

/// Requirement priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Blocking
    P0,
    /// High
    P1,
    /// Normal
    P2,
    /// Low
    P3,
}

/// Requirement document fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Document title
    pub title: String,
    /// Short description
    pub description: String,
    /// Rich text body, sections introduced by `## ` lines
    pub content: String,
    /// Writing progress
    pub status: WorkStatus,
    /// Owning project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<EntityId>,
    /// Name of the requirement this document specifies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement_name: Option<String>,
    /// Requirement priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Where the requirement came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Default for DocumentSnapshot {
    fn default() -> Self {
        Self {
            title: UNTITLED_DOCUMENT.to_string(),
            description: String::new(),
            content: String::new(),
            status: WorkStatus::default(),
            project_id: None,
            requirement_name: None,
            priority: None,
            source: None,
        }
    }
}

impl DocumentSnapshot {
    /// Document with the given title and body
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Link to a project
    #[inline]
    #[must_use]
    pub fn with_project(mut self, project: EntityId) -> Self {
        self.project_id = Some(project);
        self
    }

    /// Set status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: WorkStatus) -> Self {
        self.status = status;
        self
    }

    /// Set priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl private::Sealed for DocumentSnapshot {}

impl Snapshot for DocumentSnapshot {
    const KIND: EntityKind = EntityKind::Prd;

    fn title(&self) -> &str {
        &self.title
    }

    fn project_id(&self) -> Option<&EntityId> {
        self.project_id.as_ref()
    }
}

/// Design artifact fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignSnapshot {
    /// Design title
    pub title: String,
    /// Short description
    pub description: String,
    /// Requirement document this design implements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prd_id: Option<EntityId>,
    /// Title of the linked requirement document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prd_title: Option<String>,
    /// Owning project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<EntityId>,
    /// Design progress
    pub status: WorkStatus,
    /// Design tool name
    pub tool: String,
    /// Preview image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Serialized component structure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_tree: Option<String>,
    /// Rendered HTML mockup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
}

impl Default for DesignSnapshot {
    fn default() -> Self {
        Self {
            title: UNTITLED_DESIGN.to_string(),
            description: String::new(),
            prd_id: None,
            prd_title: None,
            project_id: None,
            status: WorkStatus::default(),
            tool: DEFAULT_TOOL.to_string(),
            thumbnail: None,
            component_tree: None,
            html_content: None,
        }
    }
}

impl DesignSnapshot {
    /// Design with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Link to a project
    #[inline]
    #[must_use]
    pub fn with_project(mut self, project: EntityId) -> Self {
        self.project_id = Some(project);
        self
    }

    /// Link to a requirement document
    #[inline]
    #[must_use]
    pub fn with_document(mut self, prd: EntityId, prd_title: impl Into<String>) -> Self {
        self.prd_id = Some(prd);
        self.prd_title = Some(prd_title.into());
        self
    }

    /// Set component structure
    #[inline]
    #[must_use]
    pub fn with_component_tree(mut self, tree: impl Into<String>) -> Self {
        self.component_tree = Some(tree.into());
        self
    }

    /// Set design tool
    #[inline]
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }
}

impl private::Sealed for DesignSnapshot {}

impl Snapshot for DesignSnapshot {
    const KIND: EntityKind = EntityKind::Ui;

    fn title(&self) -> &str {
        &self.title
    }

    fn project_id(&self) -> Option<&EntityId> {
        self.project_id.as_ref()
    }
}

/// Project fields, including the child version sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// Project title
    pub title: String,
    /// Short description
    pub description: String,
    /// Project progress
    pub status: ProjectStatus,
    /// Current version ids of linked requirement documents
    pub prd_version_ids: Vec<VersionId>,
    /// Current version ids of linked design artifacts
    pub ui_version_ids: Vec<VersionId>,
}

impl Default for ProjectSnapshot {
    fn default() -> Self {
        Self {
            title: UNTITLED_PROJECT.to_string(),
            description: String::new(),
            status: ProjectStatus::default(),
            prd_version_ids: Vec::new(),
            ui_version_ids: Vec::new(),
        }
    }
}

impl ProjectSnapshot {
    /// Project with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }
}

impl private::Sealed for ProjectSnapshot {}

impl Snapshot for ProjectSnapshot {
    const KIND: EntityKind = EntityKind::Project;

    fn title(&self) -> &str {
        &self.title
    }

    fn project_id(&self) -> Option<&EntityId> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let doc: DocumentSnapshot = serde_json::from_str(r#"{"content":"body"}"#).unwrap();
        assert_eq!(doc.title, UNTITLED_DOCUMENT);
        assert_eq!(doc.status, WorkStatus::InProgress);

        let design: DesignSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(design.tool, DEFAULT_TOOL);
        assert_eq!(design.title, UNTITLED_DESIGN);
    }

    #[test]
    fn wire_shape_is_camel_case_without_empty_options() {
        let doc = DocumentSnapshot::new("Login", "## A\nfoo").with_project(EntityId::new("p1"));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["projectId"], "p1");
        assert_eq!(value["status"], "in_progress");
        assert!(value.get("priority").is_none());
    }

    #[test]
    fn projects_have_no_owner() {
        assert!(ProjectSnapshot::new("Portal").project_id().is_none());
        assert_eq!(ProjectSnapshot::KIND, EntityKind::Project);
    }
}
