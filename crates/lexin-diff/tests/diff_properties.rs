//! Invariant tests for the diff engine

use lexin_diff::{DiffEngine, DiffSummary, SectionDiff, SummaryLocale};
use lexin_version::{DesignSnapshot, DocumentSnapshot};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn section_diff(older: &str, newer: &str) -> SectionDiff {
    let engine = DiffEngine::default();
    match engine.documents(
        &DocumentSnapshot::new("Doc", older),
        &DocumentSnapshot::new("Doc", newer),
    ) {
        DiffSummary::Document(diff) => diff,
        DiffSummary::Design(_) => unreachable!("document comparison"),
    }
}

fn content_strategy() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        Just("## A".to_string()),
        Just("## B".to_string()),
        Just("## C".to_string()),
        Just("##".to_string()),
        Just(String::new()),
        "[a-z ]{0,12}",
    ];
    prop::collection::vec(line, 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn diff_with_itself_is_empty(content in content_strategy()) {
        prop_assert!(section_diff(&content, &content).is_empty());
    }

    #[test]
    fn swapping_arguments_swaps_added_and_removed(a in content_strategy(), b in content_strategy()) {
        let forward = section_diff(&a, &b);
        let backward = section_diff(&b, &a);
        prop_assert_eq!(&forward.added, &backward.removed);
        prop_assert_eq!(&forward.removed, &backward.added);
        let forward_changed: BTreeSet<_> = forward.changed.iter().collect();
        let backward_changed: BTreeSet<_> = backward.changed.iter().collect();
        prop_assert_eq!(forward_changed, backward_changed);
    }

    #[test]
    fn design_diff_with_itself_is_empty(title in "[a-z]{0,10}", tree in proptest::option::of("[a-z>]{0,10}")) {
        let mut design = DesignSnapshot::new(title);
        design.component_tree = tree;
        prop_assert!(DiffEngine::default().designs(&design, &design).is_empty());
    }
}

#[test]
fn renamed_section_scenario() {
    let diff = section_diff("## A\nfoo\n## B\nbar", "## A\nfoo\n## C\nbaz");
    assert_eq!(diff.added, vec!["C".to_string()]);
    assert_eq!(diff.removed, vec!["B".to_string()]);
    assert!(diff.changed.is_empty());

    let rendered = DiffSummary::Document(diff).render(SummaryLocale::Zh);
    assert_eq!(rendered, "新增 C；删除 B");
}
