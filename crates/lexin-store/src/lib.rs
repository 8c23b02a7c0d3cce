//! Lexin store
//!
//! Versioned requirement documents, design artifacts and projects.
//!
//! Every committed edit of a document or design appends an immutable
//! version. Frozen entities only accept edits backed by an approved change
//! request. Projects record the current version ids of their linked children
//! and receive a new version whenever one of them changes.
//!
//! ```
//! use lexin_store::{RevisionOptions, StoreConfig, Workspace};
//! use lexin_store::prelude::*;
//!
//! let mut ws = Workspace::new(StoreConfig::default());
//! let project = ws.add_project(ProjectSnapshot::new("Checkout"), Vec::new());
//! let doc = ws.add_document(DocumentSnapshot::new("Payment", "## Scope\ncards").with_project(project.clone()));
//! ws.set_document_governance_status(&doc, GovernanceStatus::Frozen).unwrap();
//!
//! let outcome = ws
//!     .create_document_version(
//!         &doc,
//!         DocumentSnapshot::new("Payment", "## Scope\ncards, wallets").with_project(project.clone()),
//!         RevisionOptions::new().with_change_request(ChangeRequestDraft::new("add wallets", "checkout")),
//!     )
//!     .unwrap();
//! assert!(outcome.is_applied());
//! assert_eq!(ws.project(&project).unwrap().history().len(), 3);
//! ```

mod clock;
mod config;
mod entity;
mod error;
mod insights;
mod persistence;
mod refresher;
mod version_store;
mod workspace;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{StorageKeys, StoreConfig, DEFAULT_ACTOR};
pub use entity::{Design, DesignPatch, Document, DocumentPatch, Governed, Project, ProjectPatch};
pub use error::{StorageError, StoreError};
pub use insights::{days_between, percent, ProjectInsights};
pub use persistence::{ByteStore, FileByteStore, MemoryByteStore};
pub use refresher::{
    initial_summary, LinkedVersions, ProjectAggregateRefresher, RefreshContext, RefreshTrigger,
};
pub use version_store::{VersionStore, Versioned};
pub use workspace::{RevisionOptions, Workspace};

/// Types from the lower crates needed to drive a [`Workspace`]
pub mod prelude {
    pub use lexin_diff::{DiffSummary, SummaryLocale};
    pub use lexin_governance::{
        ApprovalStatus, ChangeRequest, ChangeRequestDraft, EditOutcome, EnforcementMode,
        GovernanceStatus, RejectionReason, Transition,
    };
    pub use lexin_version::{
        ChangeRequestId, DesignSnapshot, DocumentSnapshot, EntityId, EntityKind, Priority,
        ProjectSnapshot, ProjectStatus, VersionId, VersionRecord, WorkStatus,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
