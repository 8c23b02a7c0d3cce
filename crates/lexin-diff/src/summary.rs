//! Human-readable rendering of diffs

use crate::engine::{DesignField, DiffSummary, FieldDiff, SectionDiff};
use serde::{Deserialize, Serialize};

/// Language of rendered summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLocale {
    /// Chinese, matching stored version summaries
    #[default]
    Zh,
    /// English
    En,
}

struct Phrases {
    added: &'static str,
    changed: &'static str,
    removed: &'static str,
    adjusted: &'static str,
    list_separator: &'static str,
    part_separator: &'static str,
    unchanged: &'static str,
}

const ZH: Phrases = Phrases {
    added: "新增",
    changed: "修改",
    removed: "删除",
    adjusted: "调整",
    list_separator: "、",
    part_separator: "；",
    unchanged: "暂无结构性变更",
};

const EN: Phrases = Phrases {
    added: "added",
    changed: "changed",
    removed: "removed",
    adjusted: "adjusted",
    list_separator: ", ",
    part_separator: "; ",
    unchanged: "no structural changes",
};

impl SummaryLocale {
    fn phrases(self) -> &'static Phrases {
        match self {
            Self::Zh => &ZH,
            Self::En => &EN,
        }
    }

    /// Label of a design field
    #[must_use]
    pub const fn field_label(self, field: DesignField) -> &'static str {
        match (self, field) {
            (Self::Zh, DesignField::Title) => "标题",
            (Self::Zh, DesignField::Description) => "描述",
            (Self::Zh, DesignField::Tool) => "设计工具",
            (Self::Zh, DesignField::LinkedDocument) => "关联PRD",
            (Self::Zh, DesignField::Structure) => "结构",
            (Self::Zh, DesignField::Visual) => "视觉",
            (Self::En, DesignField::Title) => "title",
            (Self::En, DesignField::Description) => "description",
            (Self::En, DesignField::Tool) => "design tool",
            (Self::En, DesignField::LinkedDocument) => "linked document",
            (Self::En, DesignField::Structure) => "structure",
            (Self::En, DesignField::Visual) => "visual",
        }
    }
}

pub(crate) fn render(diff: &DiffSummary, locale: SummaryLocale) -> String {
    let phrases = locale.phrases();
    let parts = match diff {
        DiffSummary::Document(sections) => section_parts(sections, phrases),
        DiffSummary::Design(fields) => field_parts(fields, locale, phrases),
    };
    if parts.is_empty() {
        phrases.unchanged.to_string()
    } else {
        parts.join(phrases.part_separator)
    }
}

fn section_parts(diff: &SectionDiff, phrases: &Phrases) -> Vec<String> {
    [
        (phrases.added, &diff.added),
        (phrases.changed, &diff.changed),
        (phrases.removed, &diff.removed),
    ]
    .into_iter()
    .filter(|(_, titles)| !titles.is_empty())
    .map(|(verb, titles)| format!("{verb} {}", titles.join(phrases.list_separator)))
    .collect()
}

fn field_parts(diff: &FieldDiff, locale: SummaryLocale, phrases: &Phrases) -> Vec<String> {
    if diff.is_empty() {
        return Vec::new();
    }
    let labels: Vec<&str> = diff
        .changed
        .iter()
        .map(|field| locale.field_label(*field))
        .collect();
    vec![format!("{} {}", phrases.adjusted, labels.join(phrases.list_separator))]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(added: &[&str], changed: &[&str], removed: &[&str]) -> DiffSummary {
        let own = |v: &[&str]| v.iter().map(|s| (*s).to_string()).collect();
        DiffSummary::Document(SectionDiff {
            added: own(added),
            changed: own(changed),
            removed: own(removed),
        })
    }

    #[test]
    fn chinese_document_summary() {
        let diff = sections(&["C", "D"], &["概览"], &["B"]);
        assert_eq!(diff.render(SummaryLocale::Zh), "新增 C、D；修改 概览；删除 B");
    }

    #[test]
    fn english_document_summary() {
        let diff = sections(&["C"], &[], &["B"]);
        assert_eq!(diff.render(SummaryLocale::En), "added C; removed B");
    }

    #[test]
    fn empty_diffs_render_placeholder() {
        assert_eq!(sections(&[], &[], &[]).render(SummaryLocale::Zh), "暂无结构性变更");
        let design = DiffSummary::Design(FieldDiff::default());
        assert_eq!(design.render(SummaryLocale::En), "no structural changes");
    }

    #[test]
    fn design_summary_lists_labels() {
        let diff = DiffSummary::Design(FieldDiff {
            changed: vec![DesignField::Title, DesignField::LinkedDocument, DesignField::Visual],
        });
        assert_eq!(diff.render(SummaryLocale::Zh), "调整 标题、关联PRD、视觉");
        assert_eq!(diff.render(SummaryLocale::En), "adjusted title, linked document, visual");
    }
}
