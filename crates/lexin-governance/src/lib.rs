//! Lexin governance
//!
//! Freeze control for requirement documents and design artifacts.
//!
//! - [`GovernanceState`]: `draft` / `review` / `frozen` plus freeze date
//! - [`ChangeRequest`] and [`ChangeRequestLedger`]: immutable, append-only
//!   justifications for edits of frozen entities
//! - [`GovernanceGate`]: admission check run before a version is written,
//!   answering with an [`EditOutcome`] rather than an error

mod change_request;
mod error;
mod gate;
mod ledger;
mod state_machine;

pub use change_request::{
    parse_related_tasks, ApprovalStatus, ChangeRequest, ChangeRequestDraft, DEFAULT_IMPACT,
    DEFAULT_REASON,
};
pub use error::GovernanceError;
pub use gate::{EditOutcome, EnforcementMode, GovernanceGate, RejectionReason};
pub use ledger::ChangeRequestLedger;
pub use state_machine::{
    allowed_transitions, validate_transition, GovernanceState, GovernanceStatus, Transition,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
