use lexin_store::prelude::*;
use lexin_store::{RevisionOptions, Workspace};
use lexin_test_utils::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn current_ids(ws: &Workspace, project: &EntityId) -> BTreeSet<VersionId> {
    ws.documents()
        .linked_to(project)
        .map(|doc| doc.current_version().id().clone())
        .collect()
}

proptest! {
    #[test]
    fn prop_project_tracks_current_child_versions(
        children in 1usize..4,
        edits in prop::collection::vec((0usize..4, "[a-z ]{0,12}"), 0..12),
    ) {
        let (mut ws, clock) = test_workspace();
        let project = ws.add_project(ProjectSnapshot::new("P"), Vec::new());
        let docs: Vec<EntityId> = (0..children)
            .map(|i| ws.add_document(linked_document(&format!("D{i}"), &project)))
            .collect();
        let mut expected_project_versions = 1 + children;

        for (target, body) in edits {
            clock.advance_days(1);
            let id = &docs[target % docs.len()];
            let next = DocumentSnapshot::new("edited", body).with_project(project.clone());
            let outcome = ws.create_document_version(id, next, RevisionOptions::new()).unwrap();
            let version = outcome.version_id().cloned().unwrap();
            expected_project_versions += 1;

            let fields = ws.project(&project).unwrap().fields().clone();
            prop_assert_eq!(fields.prd_version_ids.last(), Some(&version));
        }

        let p = ws.project(&project).unwrap();
        prop_assert_eq!(p.history().len(), expected_project_versions);
        let recorded: BTreeSet<VersionId> = p.fields().prd_version_ids.iter().cloned().collect();
        prop_assert_eq!(recorded, current_ids(&ws, &project));

        let numbers: Vec<u32> = p.history().iter().map(|v| v.version()).collect();
        let expected: Vec<u32> = (1..=u32::try_from(expected_project_versions).unwrap()).collect();
        prop_assert_eq!(numbers, expected);
    }

    #[test]
    fn prop_earlier_versions_never_change(bodies in prop::collection::vec("[a-z#\n ]{0,20}", 1..8)) {
        let (mut ws, _) = test_workspace();
        let id = ws.add_document(sample_document("Doc"));
        let mut seen = vec![ws.document(&id).unwrap().current_version().clone()];

        for body in bodies {
            let outcome = ws
                .create_document_version(&id, DocumentSnapshot::new("Doc", body), RevisionOptions::new())
                .unwrap();
            prop_assert!(outcome.is_applied());
            let versions = ws.document_versions(&id).unwrap();
            prop_assert_eq!(&versions[..seen.len()], &seen[..]);
            seen.push(ws.document(&id).unwrap().current_version().clone());
        }
    }
}
