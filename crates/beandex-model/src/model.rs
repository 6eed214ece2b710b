//! The global document model
//!
//! [`DocumentModel`] is the root object: it owns the projects, the locator
//! registry, and the single event router every project's documents report
//! to. It is created per composition, never as a process-global singleton;
//! collaborators receive the instance they should talk to.

use crate::events::ModelEventRouter;
use crate::locator::{DocumentLocator, LocatorRegistry};
use crate::markers::MarkerSink;
use crate::project::Project;
use crate::DescriptionStore;
use beandex_document::{ConfigId, Document, DocumentListener, DocumentProvider};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Root registry of projects plus the shared locator registry and event
/// router
pub struct DocumentModel {
    projects: RwLock<IndexMap<String, Arc<Project>>>,
    locators: RwLock<LocatorRegistry>,
    router: Arc<ModelEventRouter>,
}

impl DocumentModel {
    /// Create an empty model.
    ///
    /// The router holds a weak reference back to the model, so dropping the
    /// returned `Arc` tears the whole graph down.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            projects: RwLock::new(IndexMap::new()),
            locators: RwLock::new(LocatorRegistry::new()),
            router: Arc::new(ModelEventRouter::new(weak.clone())),
        })
    }

    /// Register a discovery locator; takes effect on each project's next
    /// detection run
    pub fn register_locator(&self, locator: Arc<dyn DocumentLocator>) {
        self.locators.write().register(locator);
    }

    /// Snapshot of the locator registry
    #[must_use]
    pub fn locators(&self) -> LocatorRegistry {
        self.locators.read().clone()
    }

    /// Create a project and register it under its name.
    ///
    /// A same-named project is replaced; callers holding the old handle
    /// keep a detached project. The new project is unpopulated until first
    /// access.
    pub fn create_project(
        self: &Arc<Self>,
        name: impl Into<String>,
        provider: Arc<dyn DocumentProvider>,
        descriptions: Arc<dyn DescriptionStore>,
        markers: Arc<dyn MarkerSink>,
    ) -> Arc<Project> {
        let project = Project::new(
            Arc::downgrade(self),
            name,
            provider,
            descriptions,
            markers,
            self.router.clone() as Arc<dyn DocumentListener>,
        );
        debug!(project = project.name(), "registering project");
        self.projects
            .write()
            .insert(project.name().to_string(), project.clone());
        project
    }

    /// Look up a project by name
    #[must_use]
    pub fn project(&self, name: &str) -> Option<Arc<Project>> {
        self.projects.read().get(name).cloned()
    }

    /// All projects, in registration order (snapshot)
    #[must_use]
    pub fn projects(&self) -> Vec<Arc<Project>> {
        self.projects.read().values().cloned().collect()
    }

    /// Detach a project from the model; its handle stays usable but it no
    /// longer receives cross-project events
    pub fn remove_project(&self, name: &str) -> Option<Arc<Project>> {
        self.projects.write().shift_remove(name)
    }

    /// Resolve an absolute identifier (`/{project}/{path}`) to a document.
    ///
    /// Relative identifiers and absolute identifiers of unknown projects
    /// resolve to `None`.
    #[must_use]
    pub fn document(&self, id: &ConfigId) -> Option<Arc<dyn Document>> {
        let (project_name, path) = id.split_absolute()?;
        let project = self.project(project_name)?;
        project.document(&ConfigId::new(path))
    }
}

impl std::fmt::Debug for DocumentModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentModel")
            .field("projects", &self.projects.read().keys().collect::<Vec<_>>())
            .field("locators", &self.locators.read())
            .finish()
    }
}
