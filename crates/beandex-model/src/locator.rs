//! Pluggable document discovery
//!
//! A [`DocumentLocator`] scans a project for candidate configuration
//! documents. Locators are registered explicitly on the model at startup
//! through [`LocatorRegistry`]; there is no runtime plugin scan. A failing
//! locator never aborts detection for the others.

use crate::error::LocateError;
use crate::project::Project;
use crate::ConfigSet;
use beandex_document::ResourcePath;
use std::sync::Arc;

/// One discovery mechanism contributing auto-detected documents.
///
/// Per detection run a locator may contribute any number of documents but
/// at most one config set, and only when it located more than one document.
pub trait DocumentLocator: Send + Sync {
    /// Stable identifier used for provenance bookkeeping
    fn id(&self) -> &str;

    /// Whether the locator is currently enabled for the project
    fn is_enabled(&self, _project: &Project) -> bool {
        true
    }

    /// Whether the locator understands this kind of project at all
    fn supports(&self, project: &Project) -> bool;

    /// Scan the project for candidate document resources
    ///
    /// # Errors
    /// A [`LocateError`] is logged by the caller and the locator's
    /// contribution is skipped for this run.
    fn locate(&self, project: &Project) -> Result<Vec<ResourcePath>, LocateError>;

    /// Name for the config set grouping the located documents.
    ///
    /// Only consulted when more than one document was located; `None`
    /// contributes no set.
    fn config_set_name(&self, _resources: &[ResourcePath]) -> Option<String> {
        None
    }

    /// Hook to further configure the config set created from this
    /// locator's contribution
    fn configure_config_set(&self, _config_set: &ConfigSet) {}
}

/// Registry of discovery locators, populated by an explicit configuration
/// step at startup
#[derive(Default, Clone)]
pub struct LocatorRegistry {
    locators: Vec<Arc<dyn DocumentLocator>>,
}

impl LocatorRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a locator; later registrations run later in detection
    pub fn register(&mut self, locator: Arc<dyn DocumentLocator>) {
        self.locators.push(locator);
    }

    /// Look up a locator by identifier
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn DocumentLocator>> {
        self.locators.iter().find(|locator| locator.id() == id)
    }

    /// Iterate locators in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DocumentLocator>> {
        self.locators.iter()
    }

    /// Number of registered locators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    /// Check if no locators are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}

impl std::fmt::Debug for LocatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.locators.iter().map(|locator| locator.id()))
            .finish()
    }
}
