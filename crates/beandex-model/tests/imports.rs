//! Resource lookup through document import graphs.

mod common;

use beandex_document::{ConfigId, Document, Origin, ResourcePath};
use beandex_test_utils::FakeDocument;
use common::Fixture;
use std::sync::Arc;

#[test]
fn lookup_traverses_imports_when_asked() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");
    project.add_document(&ConfigId::new("root.xml"), Origin::Explicit);

    let imported = Arc::new(
        FakeDocument::new("extra.xml").with_resource("alpha", "extra.xml"),
    );
    let root = fixture.provider.opened("alpha", "root.xml").unwrap();
    root.add_import(vec![imported.clone() as Arc<dyn Document>]);

    let target = ResourcePath::new("alpha", "extra.xml");
    let found = project.documents_for_resource(&target, true);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), &ConfigId::new("extra.xml"));

    assert!(project.documents_for_resource(&target, false).is_empty());
}

#[test]
fn directly_registered_match_is_not_duplicated() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");
    project.add_document(&ConfigId::new("root.xml"), Origin::Explicit);
    project.add_document(&ConfigId::new("leaf.xml"), Origin::Explicit);

    let root = fixture.provider.opened("alpha", "root.xml").unwrap();
    let leaf = fixture.provider.opened("alpha", "leaf.xml").unwrap();
    root.add_import(vec![leaf.clone() as Arc<dyn Document>]);

    let found = project.documents_for_resource(&ResourcePath::new("alpha", "leaf.xml"), true);
    assert_eq!(found.len(), 1);
}

#[test]
fn cyclic_import_graphs_terminate() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");
    project.add_document(&ConfigId::new("root.xml"), Origin::Explicit);

    let root = fixture.provider.opened("alpha", "root.xml").unwrap();
    let other = Arc::new(
        FakeDocument::new("other.xml").with_resource("alpha", "other.xml"),
    );
    root.add_import(vec![other.clone() as Arc<dyn Document>]);
    other.add_import(vec![root.clone() as Arc<dyn Document>]);

    let found = project.documents_for_resource(&ResourcePath::new("alpha", "other.xml"), true);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), &ConfigId::new("other.xml"));
}

#[test]
fn disabled_imports_skip_traversal() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");
    project.add_document(&ConfigId::new("root.xml"), Origin::Explicit);
    project.set_imports_enabled(false);

    let imported = Arc::new(
        FakeDocument::new("extra.xml").with_resource("alpha", "extra.xml"),
    );
    let root = fixture.provider.opened("alpha", "root.xml").unwrap();
    root.add_import(vec![imported as Arc<dyn Document>]);

    assert!(project
        .documents_for_resource(&ResourcePath::new("alpha", "extra.xml"), true)
        .is_empty());
}
