//! Structural comparison of two versions
//!
//! Comparisons are pure and order-sensitive: the first argument is the older
//! version. Comparing a version with itself yields an empty diff.

use crate::sections::SectionMap;
use crate::summary::{render, SummaryLocale};
use lexin_version::{DesignSnapshot, DocumentSnapshot};
use serde::{Deserialize, Serialize};

/// Section-level change set of a requirement document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDiff {
    /// Sections only in the newer version, in its order
    pub added: Vec<String>,
    /// Sections in both with different bodies, in the newer order
    pub changed: Vec<String>,
    /// Sections only in the older version, in its order
    pub removed: Vec<String>,
}

impl SectionDiff {
    /// Compare two section maps
    #[must_use]
    pub fn between(older: &SectionMap, newer: &SectionMap) -> Self {
        let mut diff = Self::default();
        for (title, body) in newer.iter() {
            match older.get(title) {
                None => diff.added.push(title.to_string()),
                Some(previous) if previous != body => diff.changed.push(title.to_string()),
                Some(_) => {}
            }
        }
        diff.removed = older
            .titles()
            .filter(|title| !newer.contains(title))
            .map(str::to_string)
            .collect();
        diff
    }

    /// True if no section was added, changed or removed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty()
    }
}

/// Design field compared between versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignField {
    /// Title
    Title,
    /// Description
    Description,
    /// Design tool
    Tool,
    /// Title of the linked requirement document
    LinkedDocument,
    /// Component tree
    Structure,
    /// Thumbnail
    Visual,
}

impl DesignField {
    /// Fields in reporting order
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::Tool,
        Self::LinkedDocument,
        Self::Structure,
        Self::Visual,
    ];

    fn value(self, design: &DesignSnapshot) -> Option<&str> {
        match self {
            Self::Title => Some(&design.title),
            Self::Description => Some(&design.description),
            Self::Tool => Some(&design.tool),
            Self::LinkedDocument => design.prd_title.as_deref(),
            Self::Structure => design.component_tree.as_deref(),
            Self::Visual => design.thumbnail.as_deref(),
        }
    }
}

/// Field-level change set of a design artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    /// Differing fields, in [`DesignField::ALL`] order
    pub changed: Vec<DesignField>,
}

impl FieldDiff {
    /// Compare two design snapshots; an absent value differs from an empty one
    #[must_use]
    pub fn between(older: &DesignSnapshot, newer: &DesignSnapshot) -> Self {
        let changed = DesignField::ALL
            .into_iter()
            .filter(|field| field.value(older) != field.value(newer))
            .collect();
        Self { changed }
    }

    /// True if no compared field differs
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Diff of either entity family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffSummary {
    /// Requirement document sections
    Document(SectionDiff),
    /// Design artifact fields
    Design(FieldDiff),
}

impl DiffSummary {
    /// True if nothing structural changed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Document(diff) => diff.is_empty(),
            Self::Design(diff) => diff.is_empty(),
        }
    }

    /// One-line description in `locale`
    #[must_use]
    pub fn render(&self, locale: SummaryLocale) -> String {
        render(self, locale)
    }
}

/// Diff entry point for documents and designs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffEngine {
    locale: SummaryLocale,
}

impl DiffEngine {
    /// Engine rendering in `locale`
    #[inline]
    #[must_use]
    pub const fn new(locale: SummaryLocale) -> Self {
        Self { locale }
    }

    /// Rendering locale
    #[inline]
    #[must_use]
    pub const fn locale(&self) -> SummaryLocale {
        self.locale
    }

    /// Compare two document versions by section
    #[must_use]
    pub fn documents(&self, older: &DocumentSnapshot, newer: &DocumentSnapshot) -> DiffSummary {
        if older.content == newer.content {
            return DiffSummary::Document(SectionDiff::default());
        }
        let diff = SectionDiff::between(
            &SectionMap::parse(&older.content),
            &SectionMap::parse(&newer.content),
        );
        DiffSummary::Document(diff)
    }

    /// Compare two design versions by field
    #[must_use]
    pub fn designs(&self, older: &DesignSnapshot, newer: &DesignSnapshot) -> DiffSummary {
        DiffSummary::Design(FieldDiff::between(older, newer))
    }

    /// Render a diff in this engine's locale
    #[must_use]
    pub fn describe(&self, diff: &DiffSummary) -> String {
        diff.render(self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(content: &str) -> DocumentSnapshot {
        DocumentSnapshot::new("Doc", content)
    }

    #[test]
    fn renamed_section_is_one_add_and_one_remove() {
        let engine = DiffEngine::default();
        let diff = engine.documents(&doc("## A\nfoo\n## B\nbar"), &doc("## A\nfoo\n## C\nbaz"));
        assert_eq!(
            diff,
            DiffSummary::Document(SectionDiff {
                added: vec!["C".into()],
                changed: vec![],
                removed: vec!["B".into()],
            })
        );
    }

    #[test]
    fn body_edit_is_a_change() {
        let engine = DiffEngine::default();
        let diff = engine.documents(&doc("intro\n## A\nfoo"), &doc("intro!\n## A\nfoo"));
        let DiffSummary::Document(sections) = diff else {
            panic!("expected document diff");
        };
        assert_eq!(sections.changed, vec!["概览".to_string()]);
        assert!(sections.added.is_empty() && sections.removed.is_empty());
    }

    #[test]
    fn whitespace_only_edits_inside_a_section_are_ignored() {
        let engine = DiffEngine::default();
        assert!(engine.documents(&doc("## A\nfoo"), &doc("## A\n\nfoo\n\n")).is_empty());
    }

    #[test]
    fn design_fields_distinguish_missing_from_empty() {
        let older = DesignSnapshot::new("Checkout");
        let newer = older.clone().with_component_tree("");
        assert_eq!(
            FieldDiff::between(&older, &newer).changed,
            vec![DesignField::Structure]
        );

        let mut cleared = older.clone();
        cleared.thumbnail = Some(String::new());
        assert_eq!(FieldDiff::between(&older, &cleared).changed, vec![DesignField::Visual]);
        assert!(FieldDiff::between(&cleared, &cleared).is_empty());
    }

    #[test]
    fn design_fields_report_in_fixed_order() {
        let older = DesignSnapshot::new("Checkout");
        let newer = older
            .clone()
            .with_component_tree("Page")
            .with_tool("Sketch")
            .with_description("flow");
        let engine = DiffEngine::default();
        assert_eq!(
            engine.designs(&older, &newer),
            DiffSummary::Design(FieldDiff {
                changed: vec![DesignField::Description, DesignField::Tool, DesignField::Structure],
            })
        );
    }

    #[test]
    fn html_and_status_are_not_compared() {
        let older = DesignSnapshot::new("Checkout");
        let mut newer = older.clone();
        newer.html_content = Some("<div/>".into());
        newer.status = lexin_version::WorkStatus::Completed;
        assert!(DiffEngine::default().designs(&older, &newer).is_empty());
    }
}
