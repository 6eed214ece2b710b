//! Cross-project event fan-out
//!
//! Every document registered with any project reports its lifecycle events
//! to one [`ModelEventRouter`]. The router fans each event out to the
//! config sets containing the document, across *all* projects of the model,
//! so a reset in project A invalidates a set in project B that references
//! the document by absolute identifier.

use crate::config_set::ConfigSet;
use crate::model::DocumentModel;
use beandex_document::{Document, DocumentListener, Invalidatable, ProcessorId};
use std::sync::{Arc, Weak};
use tracing::trace;

/// The model-wide document listener.
///
/// Holds only a weak reference to the model; events arriving during model
/// teardown are dropped.
pub struct ModelEventRouter {
    model: Weak<DocumentModel>,
}

impl ModelEventRouter {
    pub(crate) fn new(model: Weak<DocumentModel>) -> Self {
        Self { model }
    }

    /// Every config set of every project that contains the document,
    /// matched by backing resource. Documents without a resource never fan
    /// out.
    fn sets_containing(&self, document: &Arc<dyn Document>) -> Vec<Arc<ConfigSet>> {
        let Some(model) = self.model.upgrade() else {
            return Vec::new();
        };
        let Some(resource) = document.resource() else {
            return Vec::new();
        };
        let mut containing = Vec::new();
        for project in model.projects() {
            for set in project.config_sets() {
                if set.has_member_resource(&resource) {
                    containing.push(set);
                }
            }
        }
        containing
    }
}

impl DocumentListener for ModelEventRouter {
    fn on_reset(&self, document: &Arc<dyn Document>) {
        for set in self.sets_containing(document) {
            trace!(set = set.name(), project = set.project(), "invalidating on reset");
            set.invalidate();
        }
    }

    fn on_processor_detected(&self, document: &Arc<dyn Document>, processor: &ProcessorId) {
        for set in self.sets_containing(document) {
            for sibling in set.documents() {
                if !same_document(&sibling, document) {
                    sibling.attach_external_processor(processor, document.id());
                }
            }
        }
    }

    fn on_processor_removed(&self, document: &Arc<dyn Document>, processor: &ProcessorId) {
        for set in self.sets_containing(document) {
            for sibling in set.documents() {
                if !same_document(&sibling, document) {
                    sibling.detach_external_processor(processor, document.id());
                }
            }
        }
    }
}

/// Two handles denote the same document if their resources match, falling
/// back to identifier comparison for resource-less documents
fn same_document(a: &Arc<dyn Document>, b: &Arc<dyn Document>) -> bool {
    match (a.resource(), b.resource()) {
        (Some(left), Some(right)) => left == right,
        _ => a.id() == b.id(),
    }
}
