//! Shared fakes for beandex tests
//!
//! In-memory stand-ins for every collaborator the model talks to: documents
//! and their provider, the description store, the marker sink, member
//! resolution, and discovery locators. All fakes are thread-safe and record
//! enough of what happened for tests to assert on.

#![allow(missing_docs)]

use beandex_document::{
    Bean, ConfigId, Document, DocumentListener, DocumentProvider, ImportRef, Origin, ProcessorId,
    ResourcePath,
};
use beandex_model::{
    DescriptionError, DescriptionStore, DocumentLocator, LocateError, MarkerSink, Project,
    ProjectDescription,
};
pub use beandex_model::MemberResolver;
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory document with settable beans, imports, and a triggerable
/// listener list.
pub struct FakeDocument {
    id: ConfigId,
    origin: RwLock<Origin>,
    resource: Option<ResourcePath>,
    exists: AtomicBool,
    beans: RwLock<Vec<Bean>>,
    imports: RwLock<Vec<ImportRef>>,
    listeners: RwLock<Vec<Arc<dyn DocumentListener>>>,
    external_processors: RwLock<Vec<(ProcessorId, ConfigId)>>,
}

impl FakeDocument {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: ConfigId::new(id),
            origin: RwLock::new(Origin::Explicit),
            resource: None,
            exists: AtomicBool::new(true),
            beans: RwLock::new(Vec::new()),
            imports: RwLock::new(Vec::new()),
            listeners: RwLock::new(Vec::new()),
            external_processors: RwLock::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_bean(self, bean: Bean) -> Self {
        self.beans.write().push(bean);
        self
    }

    #[must_use]
    pub fn with_origin(self, origin: Origin) -> Self {
        *self.origin.write() = origin;
        self
    }

    #[must_use]
    pub fn with_resource(mut self, project: &str, path: &str) -> Self {
        self.resource = Some(ResourcePath::new(project, path));
        self
    }

    pub fn set_origin(&self, origin: Origin) {
        *self.origin.write() = origin;
    }

    pub fn set_beans(&self, beans: Vec<Bean>) {
        *self.beans.write() = beans;
    }

    pub fn set_exists(&self, exists: bool) {
        self.exists.store(exists, Ordering::Relaxed);
    }

    /// Add an import pulling in the given documents
    pub fn add_import(&self, imported: Vec<Arc<dyn Document>>) {
        self.imports.write().push(ImportRef::new(imported));
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    #[must_use]
    pub fn external_processors(&self) -> Vec<(ProcessorId, ConfigId)> {
        self.external_processors.read().clone()
    }

    /// Fire a reset event at every registered listener
    pub fn trigger_reset(self: &Arc<Self>) {
        let document: Arc<dyn Document> = self.clone();
        for listener in self.listeners.read().iter() {
            listener.on_reset(&document);
        }
    }

    /// Fire a processor-detected event at every registered listener
    pub fn trigger_processor_detected(self: &Arc<Self>, processor: &ProcessorId) {
        let document: Arc<dyn Document> = self.clone();
        for listener in self.listeners.read().iter() {
            listener.on_processor_detected(&document, processor);
        }
    }

    /// Fire a processor-removed event at every registered listener
    pub fn trigger_processor_removed(self: &Arc<Self>, processor: &ProcessorId) {
        let document: Arc<dyn Document> = self.clone();
        for listener in self.listeners.read().iter() {
            listener.on_processor_removed(&document, processor);
        }
    }
}

impl Document for FakeDocument {
    fn id(&self) -> &ConfigId {
        &self.id
    }

    fn origin(&self) -> Origin {
        *self.origin.read()
    }

    fn beans(&self) -> Vec<Bean> {
        self.beans.read().clone()
    }

    fn imports(&self) -> Vec<ImportRef> {
        self.imports.read().clone()
    }

    fn resource(&self) -> Option<ResourcePath> {
        self.resource.clone()
    }

    fn resource_exists(&self) -> bool {
        self.exists.load(Ordering::Relaxed)
    }

    fn register_listener(&self, listener: Arc<dyn DocumentListener>) {
        self.listeners.write().push(listener);
    }

    fn unregister_listener(&self, listener: &Arc<dyn DocumentListener>) {
        self.listeners
            .write()
            .retain(|existing| !Arc::ptr_eq(existing, listener));
    }

    fn attach_external_processor(&self, processor: &ProcessorId, origin: &ConfigId) {
        self.external_processors
            .write()
            .push((processor.clone(), origin.clone()));
    }

    fn detach_external_processor(&self, processor: &ProcessorId, origin: &ConfigId) {
        self.external_processors
            .write()
            .retain(|(existing, from)| existing != processor || from != origin);
    }
}

impl std::fmt::Debug for FakeDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeDocument")
            .field("id", &self.id)
            .field("resource", &self.resource)
            .finish()
    }
}

/// Member resolver over a flat identifier-to-document map
#[derive(Default)]
pub struct FakeResolver {
    documents: RwLock<IndexMap<ConfigId, Arc<FakeDocument>>>,
}

impl FakeResolver {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert (or replace) the document under its own identifier
    pub fn insert(&self, document: FakeDocument) -> Arc<FakeDocument> {
        let document = Arc::new(document);
        self.documents
            .write()
            .insert(document.id().clone(), document.clone());
        document
    }
}

impl MemberResolver for FakeResolver {
    fn resolve_member(&self, id: &ConfigId) -> Option<Arc<dyn Document>> {
        self.documents
            .read()
            .get(id)
            .map(|document| document.clone() as Arc<dyn Document>)
    }
}

/// Document provider handing out [`FakeDocument`]s, one instance per
/// (project, identifier) pair so tests keep a handle with listener state.
///
/// Unseeded identifiers open as existing, empty documents backed by a
/// resource named after the identifier.
#[derive(Default)]
pub struct FakeProvider {
    opened: RwLock<IndexMap<(String, ConfigId), Arc<FakeDocument>>>,
    seeded_beans: RwLock<IndexMap<(String, ConfigId), Vec<Bean>>>,
    missing: RwLock<Vec<(String, ConfigId)>>,
}

impl FakeProvider {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Beans the document will carry when opened
    pub fn seed_beans(&self, project: &str, id: &str, beans: Vec<Bean>) {
        self.seeded_beans
            .write()
            .insert((project.to_string(), ConfigId::new(id)), beans);
    }

    /// Mark a resource as missing; its document opens with
    /// `resource_exists() == false`
    pub fn seed_missing(&self, project: &str, id: &str) {
        self.missing
            .write()
            .push((project.to_string(), ConfigId::new(id)));
    }

    /// The handle previously given out for this identifier, if any
    #[must_use]
    pub fn opened(&self, project: &str, id: &str) -> Option<Arc<FakeDocument>> {
        self.opened
            .read()
            .get(&(project.to_string(), ConfigId::new(id)))
            .cloned()
    }
}

impl DocumentProvider for FakeProvider {
    fn open(&self, project: &str, id: &ConfigId, origin: Origin) -> Arc<dyn Document> {
        let key = (project.to_string(), id.clone());
        if let Some(existing) = self.opened.read().get(&key) {
            existing.set_origin(origin);
            return existing.clone();
        }

        let document = FakeDocument::new(id.as_str()).with_resource(project, id.as_str());
        document.set_origin(origin);
        if let Some(beans) = self.seeded_beans.read().get(&key) {
            document.set_beans(beans.clone());
        }
        if self.missing.read().contains(&key) {
            document.set_exists(false);
        }
        let document = Arc::new(document);
        self.opened.write().insert(key, document.clone());
        document
    }
}

/// Description store over an in-memory map, counting reads per project
#[derive(Default)]
pub struct FakeDescriptionStore {
    descriptions: RwLock<IndexMap<String, ProjectDescription>>,
    written: RwLock<IndexMap<String, ProjectDescription>>,
    reads: Mutex<IndexMap<String, usize>>,
}

impl FakeDescriptionStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, project: &str, description: ProjectDescription) {
        self.descriptions
            .write()
            .insert(project.to_string(), description);
    }

    /// How many times the description for `project` was read
    #[must_use]
    pub fn read_count(&self, project: &str) -> usize {
        self.reads.lock().get(project).copied().unwrap_or(0)
    }

    /// The last description written for `project`, if any
    #[must_use]
    pub fn written(&self, project: &str) -> Option<ProjectDescription> {
        self.written.read().get(project).cloned()
    }
}

impl DescriptionStore for FakeDescriptionStore {
    fn read(&self, project: &str) -> Result<ProjectDescription, DescriptionError> {
        *self.reads.lock().entry(project.to_string()).or_insert(0) += 1;
        self.descriptions
            .read()
            .get(project)
            .cloned()
            .ok_or_else(|| DescriptionError::NotFound(project.to_string()))
    }

    fn write(
        &self,
        project: &str,
        description: &ProjectDescription,
    ) -> Result<(), DescriptionError> {
        self.written
            .write()
            .insert(project.to_string(), description.clone());
        Ok(())
    }
}

/// Marker sink recording every deletion request
#[derive(Default)]
pub struct RecordingMarkerSink {
    deleted: RwLock<Vec<ResourcePath>>,
    deleted_all: RwLock<Vec<ResourcePath>>,
}

impl RecordingMarkerSink {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn deleted(&self) -> Vec<ResourcePath> {
        self.deleted.read().clone()
    }

    #[must_use]
    pub fn deleted_all(&self) -> Vec<ResourcePath> {
        self.deleted_all.read().clone()
    }
}

impl MarkerSink for RecordingMarkerSink {
    fn delete_markers(&self, resource: &ResourcePath) {
        self.deleted.write().push(resource.clone());
    }

    fn delete_all_markers(&self, resource: &ResourcePath) {
        self.deleted_all.write().push(resource.clone());
    }
}

/// Locator contributing a fixed (but settable) list of resources
pub struct StaticLocator {
    id: String,
    resources: RwLock<Vec<ResourcePath>>,
    set_name: Option<String>,
    enabled: AtomicBool,
}

impl StaticLocator {
    #[must_use]
    pub fn new(id: &str, resources: Vec<ResourcePath>) -> Self {
        Self {
            id: id.to_string(),
            resources: RwLock::new(resources),
            set_name: None,
            enabled: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn with_set_name(mut self, name: &str) -> Self {
        self.set_name = Some(name.to_string());
        self
    }

    pub fn set_resources(&self, resources: Vec<ResourcePath>) {
        *self.resources.write() = resources;
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

impl DocumentLocator for StaticLocator {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_enabled(&self, _project: &Project) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn supports(&self, _project: &Project) -> bool {
        true
    }

    fn locate(&self, _project: &Project) -> Result<Vec<ResourcePath>, LocateError> {
        Ok(self.resources.read().clone())
    }

    fn config_set_name(&self, _resources: &[ResourcePath]) -> Option<String> {
        self.set_name.clone()
    }
}

/// Locator whose scan always fails
pub struct FailingLocator {
    id: String,
}

impl FailingLocator {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl DocumentLocator for FailingLocator {
    fn id(&self) -> &str {
        &self.id
    }

    fn supports(&self, _project: &Project) -> bool {
        true
    }

    fn locate(&self, _project: &Project) -> Result<Vec<ResourcePath>, LocateError> {
        Err(LocateError::new(format!("{} scan failed", self.id)))
    }
}
