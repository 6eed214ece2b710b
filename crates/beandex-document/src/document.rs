//! Document collaborator boundary
//!
//! The model never parses configuration sources itself; it talks to the
//! document layer through the traits defined here. [`Document`] is one
//! configuration source, [`DocumentProvider`] opens documents for a project,
//! and [`DocumentListener`] receives content-change events raised by the
//! document layer.

use crate::bean::Bean;
use crate::id::{ConfigId, ResourcePath};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// How an entry entered the model: registered by a caller or contributed by
/// a discovery locator. Explicit entries always supersede auto-detected
/// entries of the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Origin {
    /// Registered explicitly by a caller
    #[default]
    Explicit,

    /// Contributed by a discovery locator
    AutoDetected,
}

/// Identifier of an externally discovered bean post-processor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessorId(String);

impl ProcessorId {
    /// Create processor identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identifier string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProcessorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One import declaration of a document, already resolved by the document
/// layer to the documents it pulls in.
#[derive(Clone, Default)]
pub struct ImportRef {
    imported: Vec<Arc<dyn Document>>,
}

impl ImportRef {
    /// Create import reference over resolved imported documents
    #[inline]
    #[must_use]
    pub fn new(imported: Vec<Arc<dyn Document>>) -> Self {
        Self { imported }
    }

    /// Documents this import pulls in
    #[inline]
    #[must_use]
    pub fn imported_documents(&self) -> &[Arc<dyn Document>] {
        &self.imported
    }
}

impl fmt::Debug for ImportRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.imported.iter().map(|d| d.id().clone()))
            .finish()
    }
}

/// A configuration document owned by the document layer.
///
/// Bean and import accessors return owned snapshots; the document may
/// reparse between calls. Class-index accessors have default
/// implementations over [`Document::beans`] covering each bean and one
/// level of inner beans, keyed by [`Bean::outer_class_name`].
pub trait Document: Send + Sync {
    /// Identifier within the owning project
    fn id(&self) -> &ConfigId;

    /// Whether the document was registered explicitly or auto-detected
    fn origin(&self) -> Origin;

    /// Declared bean definitions, in declaration order
    fn beans(&self) -> Vec<Bean>;

    /// Declared imports of other documents
    fn imports(&self) -> Vec<ImportRef> {
        Vec::new()
    }

    /// Backing workspace resource, if any
    fn resource(&self) -> Option<ResourcePath>;

    /// Whether the backing resource currently exists
    fn resource_exists(&self) -> bool;

    /// Register listener for content-change events
    fn register_listener(&self, listener: Arc<dyn DocumentListener>);

    /// Unregister a previously registered listener (matched by identity)
    fn unregister_listener(&self, listener: &Arc<dyn DocumentListener>);

    /// Record a post-processor discovered in another member of a shared
    /// config set (`origin` names the document that declared it)
    fn attach_external_processor(&self, processor: &ProcessorId, origin: &ConfigId);

    /// Remove a previously attached external post-processor
    fn detach_external_processor(&self, processor: &ProcessorId, origin: &ConfigId);

    /// Check if any bean (or inner bean) uses the given outer class name
    fn is_bean_class(&self, class_name: &str) -> bool {
        self.beans().iter().any(|bean| {
            bean.outer_class_name() == Some(class_name)
                || bean
                    .inner_beans()
                    .iter()
                    .any(|inner| inner.outer_class_name() == Some(class_name))
        })
    }

    /// All outer class names used by this document's beans
    fn bean_classes(&self) -> IndexSet<String> {
        let mut classes = IndexSet::new();
        for bean in self.beans() {
            if let Some(class_name) = bean.outer_class_name() {
                classes.insert(class_name.to_string());
            }
            for inner in bean.inner_beans() {
                if let Some(class_name) = inner.outer_class_name() {
                    classes.insert(class_name.to_string());
                }
            }
        }
        classes
    }

    /// All beans (and inner beans) using the given outer class name
    fn beans_for_class(&self, class_name: &str) -> Vec<Bean> {
        let mut matching = Vec::new();
        for bean in self.beans() {
            if bean.outer_class_name() == Some(class_name) {
                matching.push(bean.clone());
            }
            for inner in bean.inner_beans() {
                if inner.outer_class_name() == Some(class_name) {
                    matching.push(inner.clone());
                }
            }
        }
        matching
    }
}

/// Listener for document content-change events.
///
/// All methods default to no-ops so implementors handle only the events
/// they care about.
pub trait DocumentListener: Send + Sync {
    /// The document's own derived state was invalidated
    fn on_reset(&self, _document: &Arc<dyn Document>) {}

    /// A bean post-processor was detected in the document
    fn on_processor_detected(&self, _document: &Arc<dyn Document>, _processor: &ProcessorId) {}

    /// A previously detected bean post-processor disappeared
    fn on_processor_removed(&self, _document: &Arc<dyn Document>, _processor: &ProcessorId) {}
}

/// Opens document handles for a project.
///
/// Opening never fails; a document whose backing resource is missing
/// reports `resource_exists() == false` and is pruned at population time.
pub trait DocumentProvider: Send + Sync {
    /// Open (or create) the document handle for `id` within `project`
    fn open(&self, project: &str, id: &ConfigId, origin: Origin) -> Arc<dyn Document>;
}

/// Capability of dropping derived caches, consumed polymorphically by the
/// event fan-out instead of downcasting to a concrete type.
pub trait Invalidatable: Send + Sync {
    /// Drop all derived caches; the next read rebuilds from current state
    fn invalidate(&self);
}
