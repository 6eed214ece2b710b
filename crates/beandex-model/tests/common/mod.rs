//! Shared setup for model integration tests

use beandex_model::{DocumentModel, Project};
use beandex_test_utils::{FakeDescriptionStore, FakeProvider, RecordingMarkerSink};
use std::sync::Arc;

pub struct Fixture {
    pub model: Arc<DocumentModel>,
    pub provider: Arc<FakeProvider>,
    pub store: Arc<FakeDescriptionStore>,
    pub markers: Arc<RecordingMarkerSink>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            model: DocumentModel::new(),
            provider: FakeProvider::new(),
            store: FakeDescriptionStore::new(),
            markers: RecordingMarkerSink::new(),
        }
    }

    pub fn create_project(&self, name: &str) -> Arc<Project> {
        self.model.create_project(
            name,
            self.provider.clone(),
            self.store.clone(),
            self.markers.clone(),
        )
    }
}
