//! Document and config-set registration semantics on a project.

mod common;

use beandex_document::{Bean, ConfigId, Document, Origin, ResourcePath};
use common::Fixture;
use indexmap::IndexSet;

#[test]
fn add_document_rejects_empty_and_duplicate() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");

    assert!(!project.add_document(&ConfigId::new(""), Origin::Explicit));
    assert!(project.add_document(&ConfigId::new("a.xml"), Origin::Explicit));
    assert!(!project.add_document(&ConfigId::new("a.xml"), Origin::Explicit));
    assert_eq!(project.documents().len(), 1);
}

#[test]
fn remove_document_strips_it_from_every_config_set() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");
    project.add_document(&ConfigId::new("a.xml"), Origin::Explicit);
    project.add_document(&ConfigId::new("b.xml"), Origin::Explicit);
    let set = project.new_config_set(
        "main",
        vec![ConfigId::new("a.xml"), ConfigId::new("b.xml")],
    );
    project.add_config_set(set.clone());

    assert!(project.remove_document(&ConfigId::new("a.xml")));
    assert!(!project.has_document(&ConfigId::new("a.xml")));
    assert_eq!(set.members(), vec![ConfigId::new("b.xml")]);

    assert!(!project.remove_document(&ConfigId::new("a.xml")));
}

#[test]
fn set_documents_keeps_existing_and_cleans_up_removed() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");
    project.add_document(&ConfigId::new("a.xml"), Origin::Explicit);
    project.add_document(&ConfigId::new("b.xml"), Origin::Explicit);

    let kept = fixture.provider.opened("alpha", "a.xml").unwrap();
    let removed = fixture.provider.opened("alpha", "b.xml").unwrap();

    project.set_documents(&IndexSet::from([
        ConfigId::new("a.xml"),
        ConfigId::new("c.xml"),
    ]));

    assert_eq!(
        project.document_ids(),
        vec![ConfigId::new("a.xml"), ConfigId::new("c.xml")]
    );
    // Kept documents are not reopened or rewired.
    assert_eq!(kept.listener_count(), 1);
    assert_eq!(removed.listener_count(), 0);
    assert_eq!(
        fixture.markers.deleted(),
        vec![ResourcePath::new("alpha", "b.xml")]
    );
}

#[test]
fn remove_document_for_resource_of_another_project_only_edits_sets() {
    let fixture = Fixture::new();
    fixture.create_project("beta").add_document(
        &ConfigId::new("b.xml"),
        Origin::Explicit,
    );

    let project = fixture.create_project("alpha");
    project.add_document(&ConfigId::new("a.xml"), Origin::Explicit);
    let set = project.new_config_set(
        "main",
        vec![ConfigId::new("a.xml"), ConfigId::new("/beta/b.xml")],
    );
    project.add_config_set(set.clone());

    assert!(project.remove_document_for_resource(&ResourcePath::new("beta", "b.xml")));
    assert_eq!(set.members(), vec![ConfigId::new("a.xml")]);
    // The document itself still lives in its own project.
    assert!(fixture
        .model
        .document(&ConfigId::new("/beta/b.xml"))
        .is_some());
}

#[test]
fn absolute_identifiers_resolve_through_the_model() {
    let fixture = Fixture::new();
    fixture
        .create_project("beta")
        .add_document(&ConfigId::new("b.xml"), Origin::Explicit);
    let project = fixture.create_project("alpha");

    let document = project.document(&ConfigId::new("/beta/b.xml")).unwrap();
    assert_eq!(document.resource(), Some(ResourcePath::new("beta", "b.xml")));
    assert!(project.document(&ConfigId::new("/gamma/c.xml")).is_none());
}

#[test]
fn document_for_resource_uses_naming_rule() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");
    project.add_document(&ConfigId::new("dir/a.xml"), Origin::Explicit);

    let found = project
        .document_for_resource(&ResourcePath::new("alpha", "dir/a.xml"))
        .unwrap();
    assert_eq!(found.id(), &ConfigId::new("dir/a.xml"));
    assert!(project
        .document_for_resource(&ResourcePath::new("alpha", "other.xml"))
        .is_none());
}

#[test]
fn config_set_registration_and_demotion() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");
    let set = project.new_config_set("main", Vec::new());

    assert!(project.add_config_set(set.clone()));
    assert!(project.has_config_set("main"));
    assert!(!project.add_config_set(set));

    assert!(project.remove_config_set("main"));
    assert!(!project.has_config_set("main"));
    assert!(!project.remove_config_set("main"));
}

#[test]
fn suffix_registry() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");

    assert!(project.has_config_suffix("xml"));
    assert!(project.add_config_suffix("props"));
    assert!(!project.add_config_suffix("props"));
    assert!(!project.add_config_suffix(""));

    project.set_config_suffixes(IndexSet::from(["yaml".to_string()]));
    assert!(project.has_config_suffix("yaml"));
    assert!(!project.has_config_suffix("xml"));
}

#[test]
fn aggregate_bean_queries_span_all_documents() {
    let fixture = Fixture::new();
    fixture.provider.seed_beans(
        "alpha",
        "a.xml",
        vec![Bean::new("service").with_class("com.example.Service")],
    );
    fixture.provider.seed_beans(
        "alpha",
        "b.xml",
        vec![Bean::new("repo").with_class("com.example.Repo$Inner")],
    );
    let project = fixture.create_project("alpha");
    project.add_document(&ConfigId::new("a.xml"), Origin::Explicit);
    project.add_document(&ConfigId::new("b.xml"), Origin::Explicit);

    assert!(project.is_bean_class("com.example.Service"));
    assert!(project.is_bean_class("com.example.Repo"));
    assert!(!project.is_bean_class("com.example.Missing"));

    let classes: Vec<_> = project.bean_classes().into_iter().collect();
    assert_eq!(
        classes,
        vec!["com.example.Service".to_string(), "com.example.Repo".to_string()]
    );
    assert_eq!(project.beans_for_class("com.example.Repo").len(), 1);
    assert!(project.beans_for_class("com.example.Missing").is_empty());
}
