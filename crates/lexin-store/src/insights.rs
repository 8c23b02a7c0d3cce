//! Project delivery metrics

use crate::entity::{Design, Document, Project};
use crate::version_store::VersionStore;
use chrono::NaiveDate;
use lexin_version::{EntityId, WorkStatus};
use serde::Serialize;

/// Change and freeze statistics of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInsights {
    /// Project measured
    pub project_id: EntityId,
    /// Current project version number
    pub project_version: u32,
    /// Linked requirement documents
    pub document_count: usize,
    /// Linked design artifacts
    pub design_count: usize,
    /// Percent of linked documents completed
    pub document_completion_rate: u32,
    /// Percent of linked designs completed
    pub design_completion_rate: u32,
    /// Document versions beyond each first version
    pub document_change_count: usize,
    /// Design versions beyond each first version
    pub design_redo_count: usize,
    /// Document versions created after their document was frozen
    pub changes_after_freeze: usize,
    /// `changes_after_freeze` as a rounded percent of `document_change_count`
    pub freeze_change_ratio: u32,
    /// Most recent activity date
    pub latest_activity: NaiveDate,
    /// Days from project creation to latest activity
    pub landing_cycle_days: u32,
}

impl ProjectInsights {
    /// Measure `project` against the child stores
    #[must_use]
    pub fn compute(
        project: &Project,
        documents: &VersionStore<Document>,
        designs: &VersionStore<Design>,
    ) -> Self {
        let project_id = project.id();
        let linked_documents: Vec<&Document> = documents.linked_to(project_id).collect();
        let linked_designs: Vec<&Design> = designs.linked_to(project_id).collect();

        let document_change_count = linked_documents
            .iter()
            .map(|doc| doc.history().revision_count())
            .sum();
        let design_redo_count = linked_designs
            .iter()
            .map(|design| design.history().revision_count())
            .sum();
        let changes_after_freeze = linked_documents
            .iter()
            .filter_map(|doc| {
                doc.governance()
                    .frozen_at()
                    .map(|frozen_at| doc.history().created_after(frozen_at).count())
            })
            .sum();

        let latest_activity = project
            .updated_at()
            .into_iter()
            .chain(linked_documents.iter().map(|doc| doc.current_version().created_at()))
            .chain(linked_designs.iter().map(|design| design.current_version().created_at()))
            .max()
            .unwrap_or_else(|| project.created_at());

        Self {
            project_id: project_id.clone(),
            project_version: project.history().current_version_number(),
            document_count: linked_documents.len(),
            design_count: linked_designs.len(),
            document_completion_rate: percent(
                linked_documents
                    .iter()
                    .filter(|doc| doc.fields().status == WorkStatus::Completed)
                    .count(),
                linked_documents.len(),
            ),
            design_completion_rate: percent(
                linked_designs
                    .iter()
                    .filter(|design| design.fields().status == WorkStatus::Completed)
                    .count(),
                linked_designs.len(),
            ),
            document_change_count,
            design_redo_count,
            changes_after_freeze,
            freeze_change_ratio: percent(changes_after_freeze, document_change_count),
            latest_activity,
            landing_cycle_days: days_between(Some(project.created_at()), Some(latest_activity)),
        }
    }
}

/// Day distance between two dates, at least 1; 0 if either is unknown
#[must_use]
pub fn days_between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u32 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };
    let days = (end - start).num_days().unsigned_abs().max(1);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// `part / whole` as a percent rounded half up; 0 when `whole` is 0
#[must_use]
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn days_between_is_symmetric_and_at_least_one() {
        assert_eq!(days_between(Some(day(1, 1)), Some(day(1, 1))), 1);
        assert_eq!(days_between(Some(day(1, 1)), Some(day(1, 31))), 30);
        assert_eq!(days_between(Some(day(1, 31)), Some(day(1, 1))), 30);
        assert_eq!(days_between(None, Some(day(1, 1))), 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(4, 4), 100);
    }
}
