//! Testing utilities for the Lexin workspace
//!
//! Shared fixtures: a workspace on a controllable clock, sample documents,
//! and a project with linked children.

#![allow(missing_docs)]

use chrono::NaiveDate;
use lexin_governance::{ChangeRequestDraft, GovernanceStatus};
use lexin_store::{FixedClock, RevisionOptions, StoreConfig, Workspace};
use lexin_version::{DesignSnapshot, DocumentSnapshot, EntityId, ProjectSnapshot, VersionId};

pub const SAMPLE_CONTENT: &str = "intro\n## Background\nlegacy login\n## Scope\nemail and SMS";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn start_date() -> NaiveDate {
    date(2024, 9, 2)
}

pub fn test_workspace_with(config: StoreConfig) -> (Workspace, FixedClock) {
    let clock = FixedClock::new(start_date());
    (Workspace::new(config).with_clock(clock.clone()), clock)
}

pub fn test_workspace() -> (Workspace, FixedClock) {
    test_workspace_with(StoreConfig::default())
}

pub fn sample_document(title: &str) -> DocumentSnapshot {
    DocumentSnapshot::new(title, SAMPLE_CONTENT)
}

pub fn linked_document(title: &str, project: &EntityId) -> DocumentSnapshot {
    sample_document(title).with_project(project.clone())
}

pub fn linked_design(title: &str, project: &EntityId) -> DesignSnapshot {
    DesignSnapshot::new(title).with_project(project.clone())
}

pub fn approved_request(reason: &str) -> RevisionOptions {
    RevisionOptions::new().with_change_request(ChangeRequestDraft::new(reason, "none"))
}

/// Project P holding documents D1 then D2
pub struct LinkedProject {
    pub project: EntityId,
    pub first: EntityId,
    pub second: EntityId,
}

pub fn project_with_two_documents(ws: &mut Workspace) -> LinkedProject {
    let project = ws.add_project(ProjectSnapshot::new("Login revamp"), vec!["alice(Alice)".into()]);
    let first = ws.add_document(linked_document("D1", &project));
    let second = ws.add_document(linked_document("D2", &project));
    LinkedProject {
        project,
        first,
        second,
    }
}

pub fn frozen_document(ws: &mut Workspace) -> EntityId {
    let id = ws.add_document(sample_document("Frozen"));
    ws.set_document_governance_status(&id, GovernanceStatus::Frozen)
        .expect("fixture document exists");
    id
}

pub fn current_document_version(ws: &Workspace, id: &EntityId) -> VersionId {
    ws.document(id)
        .expect("fixture document exists")
        .current_version()
        .id()
        .clone()
}
