//! Problem-marker collaborator boundary
//!
//! The model schedules marker deletion when documents leave it, but the
//! markers themselves live outside this layer. Deletion is always invoked
//! with no project lock held; the sink may call back into the model.

use beandex_document::ResourcePath;

/// Sink for problem-marker deletions on document resources
pub trait MarkerSink: Send + Sync {
    /// Delete this layer's markers from the resource
    fn delete_markers(&self, resource: &ResourcePath);

    /// Delete all markers from the resource, whatever layer created them
    fn delete_all_markers(&self, resource: &ResourcePath);
}

/// Marker sink that drops every request
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMarkerSink;

impl MarkerSink for NullMarkerSink {
    fn delete_markers(&self, _resource: &ResourcePath) {}

    fn delete_all_markers(&self, _resource: &ResourcePath) {}
}
