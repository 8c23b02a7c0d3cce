//! Lexin version model
//!
//! Full-snapshot version histories for requirement documents, design
//! artifacts and projects.
//!
//! # Core Concepts
//!
//! - [`Snapshot`]: sealed trait over the three entity field sets
//! - [`VersionRecord<S>`]: immutable envelope (number, date, actor, summary,
//!   optional change request) around one snapshot
//! - [`VersionHistory<S>`]: append-only, never-empty list of records with a
//!   current-version pointer
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lexin_version::{DocumentSnapshot, RevisionMeta, VersionHistory};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let mut history = VersionHistory::start(
//!     DocumentSnapshot::new("Login", "## Goals\nfast"),
//!     RevisionMeta::new(day, "系统", "初始版本"),
//! );
//! history.append(
//!     DocumentSnapshot::new("Login", "## Goals\nfaster"),
//!     RevisionMeta::new(day, "alice", "tighten goals"),
//! );
//! assert_eq!(history.current_version_number(), 2);
//! ```

mod history;
mod id;
mod record;
mod snapshot;

pub use history::{HistoryError, VersionHistory};
pub use id::{ChangeRequestId, EntityId, EntityKind, UnknownEntityKind, VersionId};
pub use record::{RevisionMeta, VersionRecord};
pub use snapshot::{
    DesignSnapshot, DocumentSnapshot, Priority, ProjectSnapshot, ProjectStatus, Snapshot,
    WorkStatus, DEFAULT_TOOL, UNTITLED_DESIGN, UNTITLED_DOCUMENT, UNTITLED_PROJECT,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn record_serializes_envelope_and_snapshot_side_by_side() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let history = VersionHistory::start_with_id(
            VersionId::new("d1-v1"),
            DocumentSnapshot::new("Login", "body"),
            RevisionMeta::new(day, "系统", "初始版本"),
        );
        let value = serde_json::to_value(&history).unwrap();
        assert_eq!(value["currentVersionId"], "d1-v1");
        let first = &value["versions"][0];
        assert_eq!(first["version"], 1);
        assert_eq!(first["createdAt"], "2024-05-01");
        assert_eq!(first["title"], "Login");
        assert!(first.get("changeRequestId").is_none());

        let parsed: VersionRecord<DocumentSnapshot> = serde_json::from_value(first.clone()).unwrap();
        assert_eq!(&parsed, history.current());
    }
}
