//! Lexin diff engine
//!
//! Read-only structural comparison between two versions of a requirement
//! document (by `## ` section) or a design artifact (by field), plus
//! rendering of the result as a one-line summary.

mod engine;
mod sections;
mod summary;

pub use engine::{DesignField, DiffEngine, DiffSummary, FieldDiff, SectionDiff};
pub use sections::{SectionMap, OVERVIEW_SECTION};
pub use summary::SummaryLocale;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
