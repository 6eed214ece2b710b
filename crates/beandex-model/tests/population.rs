//! Lazy population behavior: exactly-once semantics, stale-entry pruning,
//! listener wiring, and reset/rearm.

mod common;

use beandex_document::{ConfigId, ResourcePath};
use beandex_model::{
    ConfigSetDescription, DescriptionError, DescriptionStore, DocumentLocator, LocateError,
    Project, ProjectDescription,
};
use beandex_test_utils::FakeDescriptionStore;
use common::Fixture;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn description_with_documents(ids: &[&str]) -> ProjectDescription {
    ProjectDescription {
        documents: ids.iter().map(|id| ConfigId::new(*id)).collect(),
        ..ProjectDescription::default()
    }
}

#[test]
fn population_is_lazy_and_happens_once() {
    let fixture = Fixture::new();
    fixture
        .store
        .seed("alpha", description_with_documents(&["a.xml", "b.xml"]));

    let project = fixture.create_project("alpha");
    assert_eq!(fixture.store.read_count("alpha"), 0);

    assert_eq!(project.documents().len(), 2);
    assert_eq!(project.documents().len(), 2);
    assert_eq!(fixture.store.read_count("alpha"), 1);
}

#[test]
fn concurrent_first_access_populates_once() {
    let fixture = Fixture::new();
    fixture
        .store
        .seed("alpha", description_with_documents(&["a.xml", "b.xml"]));
    let project = fixture.create_project("alpha");

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                assert_eq!(project.documents().len(), 2);
            });
        }
    });

    assert_eq!(fixture.store.read_count("alpha"), 1);
}

#[test]
fn unsaved_project_populates_empty() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");

    assert!(project.documents().is_empty());
    assert!(project.config_sets().is_empty());
    assert!(project.has_config_suffix("xml"));
}

#[test]
fn documents_without_backing_resource_are_pruned() {
    let fixture = Fixture::new();
    let mut description = description_with_documents(&["a.xml", "gone.xml"]);
    description.config_sets.push(ConfigSetDescription::new(
        "main",
        vec![ConfigId::new("a.xml"), ConfigId::new("gone.xml")],
    ));
    fixture.store.seed("alpha", description);
    fixture.provider.seed_missing("alpha", "gone.xml");

    let project = fixture.create_project("alpha");

    assert_eq!(project.document_ids(), vec![ConfigId::new("a.xml")]);
    let set = project.config_set("main").unwrap();
    assert_eq!(set.members(), vec![ConfigId::new("a.xml")]);
}

#[test]
fn dangling_members_pruned_cross_project_members_kept() {
    let fixture = Fixture::new();
    fixture
        .store
        .seed("beta", description_with_documents(&["b.xml"]));
    fixture.create_project("beta");

    let mut description = description_with_documents(&["a.xml"]);
    description.config_sets.push(ConfigSetDescription::new(
        "main",
        vec![
            ConfigId::new("a.xml"),
            ConfigId::new("/beta/b.xml"),
            ConfigId::new("ghost.xml"),
        ],
    ));
    fixture.store.seed("alpha", description);

    let project = fixture.create_project("alpha");
    let set = project.config_set("main").unwrap();
    assert_eq!(
        set.members(),
        vec![ConfigId::new("a.xml"), ConfigId::new("/beta/b.xml")]
    );
    assert_eq!(set.documents().len(), 2);
}

#[test]
fn population_registers_project_listener() {
    let fixture = Fixture::new();
    fixture
        .store
        .seed("alpha", description_with_documents(&["a.xml"]));
    let project = fixture.create_project("alpha");
    project.documents();

    let document = fixture.provider.opened("alpha", "a.xml").unwrap();
    assert_eq!(document.listener_count(), 1);
}

/// Description store that queries the project back while its description
/// is being read, as the real reader collaborator does.
struct ReentrantStore {
    inner: Arc<FakeDescriptionStore>,
    project: Mutex<Option<Arc<Project>>>,
    called_back: AtomicBool,
}

impl DescriptionStore for ReentrantStore {
    fn read(&self, project: &str) -> Result<ProjectDescription, DescriptionError> {
        if let Some(project) = self.project.lock().as_ref() {
            // Population is in flight on this thread; the query must be
            // answered from the partial state, not deadlock.
            assert!(!project.has_document(&ConfigId::new("a.xml")));
            self.called_back.store(true, Ordering::SeqCst);
        }
        self.inner.read(project)
    }

    fn write(
        &self,
        project: &str,
        description: &ProjectDescription,
    ) -> Result<(), DescriptionError> {
        self.inner.write(project, description)
    }
}

#[test]
fn description_reader_may_reenter_the_project() {
    let fixture = Fixture::new();
    fixture
        .store
        .seed("alpha", description_with_documents(&["a.xml"]));
    let store = Arc::new(ReentrantStore {
        inner: fixture.store.clone(),
        project: Mutex::new(None),
        called_back: AtomicBool::new(false),
    });
    let project = fixture.model.create_project(
        "alpha",
        fixture.provider.clone(),
        store.clone(),
        fixture.markers.clone(),
    );
    *store.project.lock() = Some(project.clone());

    assert_eq!(project.documents().len(), 1);
    assert!(store.called_back.load(Ordering::SeqCst));
}

/// Locator that inspects the project it is scanning, after the explicit
/// documents have been installed.
struct ReentrantLocator {
    saw_explicit: AtomicBool,
}

impl DocumentLocator for ReentrantLocator {
    fn id(&self) -> &str {
        "reentrant"
    }

    fn supports(&self, _project: &Project) -> bool {
        true
    }

    fn locate(&self, project: &Project) -> Result<Vec<ResourcePath>, LocateError> {
        self.saw_explicit.store(
            project.has_document(&ConfigId::new("a.xml")),
            Ordering::SeqCst,
        );
        Ok(Vec::new())
    }
}

#[test]
fn locator_sees_partially_populated_state() {
    let fixture = Fixture::new();
    fixture
        .store
        .seed("alpha", description_with_documents(&["a.xml"]));
    let locator = Arc::new(ReentrantLocator {
        saw_explicit: AtomicBool::new(false),
    });
    fixture.model.register_locator(locator.clone());

    let project = fixture.create_project("alpha");
    assert_eq!(project.documents().len(), 1);
    assert!(locator.saw_explicit.load(Ordering::SeqCst));
}

#[test]
fn reset_discards_state_and_rearms_population() {
    let fixture = Fixture::new();
    fixture
        .store
        .seed("alpha", description_with_documents(&["a.xml"]));
    let project = fixture.create_project("alpha");

    assert_eq!(project.documents().len(), 1);
    project.add_config_suffix("props");
    assert_eq!(fixture.store.read_count("alpha"), 1);

    project.reset();
    let document = fixture.provider.opened("alpha", "a.xml").unwrap();
    assert_eq!(document.listener_count(), 0);

    assert_eq!(project.documents().len(), 1);
    assert_eq!(fixture.store.read_count("alpha"), 2);
    assert!(!project.has_config_suffix("props"));
}

#[test]
fn save_description_round_trips_explicit_state() {
    let fixture = Fixture::new();
    let project = fixture.create_project("alpha");

    project.add_document(&ConfigId::new("a.xml"), beandex_document::Origin::Explicit);
    project.add_config_suffix("props");
    let set = project.new_config_set("main", vec![ConfigId::new("a.xml")]);
    set.set_allow_override(false);
    project.add_config_set(set);
    project.set_imports_enabled(false);

    project.save_description().unwrap();

    let written = fixture.store.written("alpha").unwrap();
    assert_eq!(written.documents, vec![ConfigId::new("a.xml")]);
    assert!(written.suffixes.contains("props"));
    assert!(!written.imports_enabled);
    assert_eq!(written.config_sets.len(), 1);
    assert_eq!(written.config_sets[0].name, "main");
    assert!(!written.config_sets[0].allow_override);
    assert_eq!(written.config_sets[0].members, vec![ConfigId::new("a.xml")]);
}
