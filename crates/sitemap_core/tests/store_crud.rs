use sitemap_core::{
    is_valid_color_token, Connection, DemoImportSource, HierarchyMode, Note, Point, SiteMapConfig,
    SiteMapStore, StoreError,
};
use std::collections::HashSet;
use std::sync::Arc;

fn store_with(config: SiteMapConfig) -> SiteMapStore {
    SiteMapStore::new(config, Arc::new(DemoImportSource::instant()))
}

fn sample_store() -> SiteMapStore {
    SiteMapStore::with_sample_data(
        SiteMapConfig::default(),
        Arc::new(DemoImportSource::instant()),
    )
}

fn parent_links_config() -> SiteMapConfig {
    SiteMapConfig {
        hierarchy: HierarchyMode::ParentLinks,
        ..SiteMapConfig::default()
    }
}

#[test]
fn ids_stay_unique_across_add_and_delete_sequences() {
    let mut store = sample_store();
    let mut added = Vec::new();
    for round in 0..40 {
        let note = store.add_note(None);
        added.push(note.id);
        if round % 3 == 0 {
            let victim = added.remove(0);
            store.delete_note(&victim).expect("delete added note");
        }
    }

    let ids: HashSet<_> = store.notes().iter().map(|note| note.id.as_str()).collect();
    assert_eq!(ids.len(), store.len());
}

#[test]
fn add_note_uses_defaults_and_palette_color() {
    let mut store = store_with(SiteMapConfig::default());
    let note = store.add_note(None);

    assert_eq!(note.title, "New Page");
    assert_eq!(note.description, "Add description here");
    assert_eq!(note.z_index, 1);
    assert_eq!(note.position, Point::new(400.0, 200.0));
    assert!(is_valid_color_token(&note.color));
    assert!(store.config().palette.contains(&note.color));
    assert_eq!(store.note(&note.id), Some(&note));
}

#[test]
fn add_note_with_parent_links_child_in_connection_mode() {
    let mut store = sample_store();
    let child = store.add_note(Some("2"));

    assert_eq!(child.parent_id.as_deref(), Some("2"));
    assert!(store
        .connections()
        .contains(&Connection::new("2", child.id.as_str())));

    let forest = store.forest();
    let about = &forest[0].children[0];
    assert_eq!(about.id, "2");
    assert_eq!(about.children[0].id, child.id);
}

#[test]
fn add_note_with_parent_in_parent_link_mode_adds_no_connection() {
    let mut store = store_with(parent_links_config());
    let root = store.add_note(None);
    let child = store.add_note(Some(root.id.as_str()));

    assert!(store.connections().is_empty());
    let forest = store.forest();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].children[0].id, child.id);
}

#[test]
fn delete_cascades_every_touching_connection() {
    let mut store = sample_store();
    store.connect("2", "3").expect("connect");
    store.connect("3", "2").expect("connect back");
    store.connect("3", "1").expect("connect to root");

    let removed = store.delete_note("3").expect("delete");
    assert_eq!(removed.id, "3");
    assert!(store.connections().iter().all(|edge| !edge.touches("3")));
    assert_eq!(store.connections(), &[Connection::new("1", "2")]);
}

#[test]
fn delete_leaves_parent_linked_children_as_roots() {
    let mut store = SiteMapStore::with_sample_data(
        parent_links_config(),
        Arc::new(DemoImportSource::instant()),
    );
    store.delete_note("1").expect("delete root");

    let child = store.note("2").expect("child kept");
    assert_eq!(child.parent_id.as_deref(), Some("1"));
    let roots: Vec<_> = store.forest().into_iter().map(|node| node.id).collect();
    assert_eq!(roots, vec!["2", "3"]);
}

#[test]
fn missing_ids_report_not_found_and_change_nothing() {
    let mut store = sample_store();
    let before = store.notes().to_vec();
    let ghost = Note::with_id("ghost", "#ffcc80", Point::ORIGIN);

    let not_found = Err(StoreError::NoteNotFound("ghost".to_string()));
    assert_eq!(store.update_note(ghost), not_found);
    assert_eq!(store.move_note("ghost", Point::new(1.0, 1.0)), not_found);
    assert_eq!(store.update_content("ghost", "t", "d"), not_found);
    assert!(matches!(
        store.delete_note("ghost"),
        Err(StoreError::NoteNotFound(_))
    ));
    assert_eq!(store.notes(), before.as_slice());
}

#[test]
fn update_note_replaces_full_value() {
    let mut store = sample_store();
    let mut note = store.note("2").cloned().expect("note 2");
    note.title = "Team".to_string();
    note.color = "#ef9a9a".to_string();
    note.position = Point::new(1.5, -2.5);

    store.update_note(note.clone()).expect("update");
    assert_eq!(store.note("2"), Some(&note));
}

#[test]
fn move_note_changes_position_only() {
    let mut store = sample_store();
    let before = store.note("3").cloned().expect("note 3");
    store.move_note("3", Point::new(-10.0, 42.0)).expect("move");

    let after = store.note("3").expect("note 3");
    assert_eq!(after.position, Point::new(-10.0, 42.0));
    assert_eq!(after.title, before.title);
    assert_eq!(after.z_index, before.z_index);
}

#[test]
fn self_connection_is_rejected() {
    let mut store = sample_store();
    let before = store.connections().len();

    assert_eq!(
        store.connect("1", "1"),
        Err(StoreError::SelfConnection("1".to_string()))
    );
    assert_eq!(store.connections().len(), before);
}

#[test]
fn connection_to_missing_note_is_rejected() {
    let mut store = sample_store();
    let before = store.connections().len();

    assert_eq!(
        store.connect("1", "nope"),
        Err(StoreError::NoteNotFound("nope".to_string()))
    );
    assert_eq!(store.connections().len(), before);
}

#[test]
fn duplicate_connections_are_kept() {
    let mut store = sample_store();
    store.connect("2", "3").expect("first");
    store.connect("2", "3").expect("duplicate");
    let count = store
        .connections()
        .iter()
        .filter(|edge| edge.from == "2" && edge.to == "3")
        .count();
    assert_eq!(count, 2);
}

#[test]
fn from_parts_rejects_duplicate_ids_and_drops_dangling_connections() {
    let source = Arc::new(DemoImportSource::instant());
    let a = Note::with_id("a", "#ffcc80", Point::ORIGIN);
    let b = Note::with_id("b", "#ffcc80", Point::ORIGIN);

    let err = SiteMapStore::from_parts(
        SiteMapConfig::default(),
        source.clone(),
        vec![a.clone(), a.clone()],
        Vec::new(),
    )
    .err()
    .expect("duplicate ids must fail");
    assert_eq!(err, StoreError::DuplicateNoteId("a".to_string()));

    let store = SiteMapStore::from_parts(
        SiteMapConfig::default(),
        source,
        vec![a, b],
        vec![Connection::new("a", "b"), Connection::new("a", "gone")],
    )
    .expect("valid parts");
    assert_eq!(store.connections(), &[Connection::new("a", "b")]);
}
