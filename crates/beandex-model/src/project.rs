//! Projects: the unit of document population
//!
//! A [`Project`] holds two parallel populations of documents and config
//! sets (explicitly registered vs auto-detected), reconciles them with
//! explicit-always-wins semantics, and lazily populates itself from the
//! description store and the registered locators on first access.
//!
//! Mutation is serialized through one reader-writer lock. External side
//! effects with re-entrancy risk (marker deletion, description persistence,
//! locator invocation, config-set membership edits) always run with that
//! lock released.

use crate::config_set::{ConfigSet, MemberResolver};
use crate::description::{ConfigSetDescription, DescriptionStore, ProjectDescription};
use crate::error::DescriptionError;
use crate::markers::MarkerSink;
use crate::model::DocumentModel;
use beandex_document::{
    Bean, ConfigId, Document, DocumentListener, DocumentProvider, Origin, ResourcePath,
};
use indexmap::{IndexMap, IndexSet};
use parking_lot::{Condvar, Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};
use tracing::{debug, warn};

/// Population progress for one epoch.
///
/// Population runs exactly once per epoch; concurrent first accesses block
/// until it finishes. A re-entrant call from the populating thread itself
/// (a collaborator querying the project mid-population) proceeds against
/// the partially populated state instead of deadlocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopulationState {
    Unpopulated,
    Populating(ThreadId),
    Populated,
}

#[derive(Debug)]
struct PopulationGate {
    state: Mutex<PopulationState>,
    done: Condvar,
}

impl Default for PopulationGate {
    fn default() -> Self {
        Self {
            state: Mutex::new(PopulationState::Unpopulated),
            done: Condvar::new(),
        }
    }
}

/// Everything guarded by the project's reader-writer lock
#[derive(Default)]
struct ProjectState {
    suffixes: IndexSet<String>,
    documents: IndexMap<ConfigId, Arc<dyn Document>>,
    auto_documents: IndexMap<ConfigId, Arc<dyn Document>>,
    config_sets: IndexMap<String, Arc<ConfigSet>>,
    auto_config_sets: IndexMap<String, Arc<ConfigSet>>,
    /// locator id -> document identifiers it contributed
    documents_by_locator: IndexMap<String, IndexSet<ConfigId>>,
    /// document identifier -> locator id that contributed it
    locator_by_document: IndexMap<ConfigId, String>,
    /// locator id -> name of the single config set it contributed
    set_by_locator: IndexMap<String, String>,
}

/// One project's population of documents and config sets.
///
/// Created through [`DocumentModel::create_project`]; never shared between
/// models. All aggregate reads return fresh snapshots.
pub struct Project {
    name: String,
    model: Weak<DocumentModel>,
    provider: Arc<dyn DocumentProvider>,
    descriptions: Arc<dyn DescriptionStore>,
    markers: Arc<dyn MarkerSink>,
    listener: Arc<dyn DocumentListener>,
    weak: Weak<Project>,
    imports_enabled: AtomicBool,
    population: PopulationGate,
    state: RwLock<ProjectState>,
}

impl Project {
    pub(crate) fn new(
        model: Weak<DocumentModel>,
        name: impl Into<String>,
        provider: Arc<dyn DocumentProvider>,
        descriptions: Arc<dyn DescriptionStore>,
        markers: Arc<dyn MarkerSink>,
        listener: Arc<dyn DocumentListener>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            name: name.into(),
            model,
            provider,
            descriptions,
            markers,
            listener,
            weak: weak.clone(),
            imports_enabled: AtomicBool::new(true),
            population: PopulationGate::default(),
            state: RwLock::new(ProjectState::default()),
        })
    }

    /// Project name, unique within the owning model
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether import traversal is consulted by
    /// [`Project::documents_for_resource`]
    #[inline]
    #[must_use]
    pub fn imports_enabled(&self) -> bool {
        self.imports_enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable import traversal
    #[inline]
    pub fn set_imports_enabled(&self, enabled: bool) {
        self.imports_enabled.store(enabled, Ordering::Relaxed);
    }

    // ------------------------------------------------------------------
    // Suffixes

    /// Recognized document-name suffixes (snapshot)
    #[must_use]
    pub fn config_suffixes(&self) -> IndexSet<String> {
        self.ensure_populated();
        self.state.read().suffixes.clone()
    }

    /// Replace the recognized suffix set
    pub fn set_config_suffixes(&self, suffixes: IndexSet<String>) {
        self.ensure_populated();
        self.state.write().suffixes = suffixes;
    }

    /// Add one recognized suffix; empty or duplicate suffixes are rejected
    pub fn add_config_suffix(&self, suffix: &str) -> bool {
        if suffix.is_empty() {
            return false;
        }
        self.ensure_populated();
        self.state.write().suffixes.insert(suffix.to_string())
    }

    /// Check if a suffix is recognized
    #[must_use]
    pub fn has_config_suffix(&self, suffix: &str) -> bool {
        self.ensure_populated();
        self.state.read().suffixes.contains(suffix)
    }

    // ------------------------------------------------------------------
    // Documents

    /// Replace the explicit document set.
    ///
    /// Documents absent from `ids` are removed (including from every config
    /// set) and their problem markers are deleted after the write lock is
    /// released. Documents already present are kept as-is; only missing
    /// ones are constructed.
    pub fn set_documents(&self, ids: &IndexSet<ConfigId>) {
        self.ensure_populated();
        let (removed, added) = {
            let mut state = self.state.write();
            let current: Vec<ConfigId> = state.documents.keys().cloned().collect();
            let mut removed = Vec::new();
            for id in current {
                if !ids.contains(&id) {
                    if let Some(document) = state.documents.shift_remove(&id) {
                        removed.push((id, document));
                    }
                }
            }
            let mut added = Vec::new();
            for id in ids {
                if id.is_empty() || state.documents.contains_key(id) {
                    continue;
                }
                let document = self.provider.open(&self.name, id, Origin::Explicit);
                state.documents.insert(id.clone(), document.clone());
                added.push(document);
            }
            (removed, added)
        };

        for document in &added {
            document.register_listener(self.listener.clone());
        }

        // Marker deletion and set pruning run lock-free; the marker sink
        // may call back into this project.
        let sets = self.config_sets_snapshot();
        for (id, document) in &removed {
            document.unregister_listener(&self.listener);
            for set in &sets {
                if set.has_member(id) {
                    set.remove_member(id);
                }
            }
            if let Some(resource) = document.resource() {
                self.markers.delete_markers(&resource);
            }
        }
    }

    /// Register a document by identifier.
    ///
    /// Empty identifiers and duplicates are rejected (returns `false`).
    /// An explicit registration demotes any auto-detected entry of the same
    /// identifier. An auto-detected registration triggers a full
    /// re-detection run rather than inserting a single entry.
    pub fn add_document(&self, id: &ConfigId, origin: Origin) -> bool {
        if id.is_empty() {
            return false;
        }
        self.ensure_populated();
        match origin {
            Origin::Explicit => {
                let (document, demoted) = {
                    let mut state = self.state.write();
                    if state.documents.contains_key(id) {
                        return false;
                    }
                    let document = self.provider.open(&self.name, id, Origin::Explicit);
                    state.documents.insert(id.clone(), document.clone());

                    // Explicit always wins over auto-detected.
                    let demoted = state.auto_documents.shift_remove(id);
                    if demoted.is_some() {
                        if let Some(locator_id) = state.locator_by_document.shift_remove(id) {
                            if let Some(contributed) =
                                state.documents_by_locator.get_mut(&locator_id)
                            {
                                contributed.shift_remove(id);
                            }
                        }
                    }
                    (document, demoted)
                };
                // The demoted handle loses its registration before the
                // explicit one gains its own; the provider may hand back
                // the same handle for both.
                if let Some(demoted) = demoted {
                    demoted.unregister_listener(&self.listener);
                }
                document.register_listener(self.listener.clone());
                true
            }
            Origin::AutoDetected => {
                {
                    let state = self.state.read();
                    if state.documents.contains_key(id) || state.auto_documents.contains_key(id) {
                        return false;
                    }
                }
                // Auto-detection is all-or-nothing per population cycle.
                self.detect_documents();
                true
            }
        }
    }

    /// Register a document by backing resource
    pub fn add_document_for_resource(&self, resource: &ResourcePath, origin: Origin) -> bool {
        self.add_document(&ConfigId::for_resource(&self.name, resource), origin)
    }

    /// Remove a document from whichever population holds it, unregister the
    /// project's listener, clear provenance, and strip the identifier from
    /// every config set. Returns whether anything was removed.
    pub fn remove_document(&self, id: &ConfigId) -> bool {
        self.ensure_populated();
        let removed = {
            let mut state = self.state.write();
            let explicit = state.documents.shift_remove(id);
            let auto = state.auto_documents.shift_remove(id);
            if let Some(locator_id) = state.locator_by_document.shift_remove(id) {
                if let Some(contributed) = state.documents_by_locator.get_mut(&locator_id) {
                    contributed.shift_remove(id);
                }
            }
            explicit.or(auto)
        };
        let Some(document) = removed else {
            return false;
        };
        document.unregister_listener(&self.listener);
        for set in self.config_sets_snapshot() {
            if set.has_member(id) {
                set.remove_member(id);
            }
        }
        true
    }

    /// Remove a document by backing resource.
    ///
    /// Resources of other projects are never registered locally; they are
    /// only removed from config sets referencing their absolute key.
    pub fn remove_document_for_resource(&self, resource: &ResourcePath) -> bool {
        if resource.project() == self.name {
            return self.remove_document(&ConfigId::new(resource.path()));
        }
        self.ensure_populated();
        let id = ConfigId::new(resource.full_path());
        let mut removed = false;
        for set in self.config_sets_snapshot() {
            if set.has_member(&id) {
                set.remove_member(&id);
                removed = true;
            }
        }
        removed
    }

    /// Check if either population holds the identifier
    #[must_use]
    pub fn has_document(&self, id: &ConfigId) -> bool {
        self.ensure_populated();
        self.has_document_internal(id)
    }

    /// Look up a document, explicit entries winning over auto-detected.
    ///
    /// Absolute identifiers delegate to the owning model without touching
    /// local state or the local lock.
    #[must_use]
    pub fn document(&self, id: &ConfigId) -> Option<Arc<dyn Document>> {
        if id.is_absolute() {
            return self.model.upgrade()?.document(id);
        }
        self.ensure_populated();
        let state = self.state.read();
        state
            .documents
            .get(id)
            .or_else(|| state.auto_documents.get(id))
            .cloned()
    }

    /// Look up the document backed by the given resource, falling back to a
    /// scan over explicit documents when the naming rule finds nothing
    #[must_use]
    pub fn document_for_resource(&self, resource: &ResourcePath) -> Option<Arc<dyn Document>> {
        let direct = self.document(&ConfigId::for_resource(&self.name, resource));
        if direct.is_some() {
            return direct;
        }
        self.ensure_populated();
        let state = self.state.read();
        state
            .documents
            .values()
            .find(|document| document.resource().as_ref() == Some(resource))
            .cloned()
    }

    /// All documents whose resolved resource equals `resource`.
    ///
    /// With `include_imported` (and import traversal enabled) every
    /// registered document's import graph is walked too; a visited set
    /// guards against cyclic import graphs.
    #[must_use]
    pub fn documents_for_resource(
        &self,
        resource: &ResourcePath,
        include_imported: bool,
    ) -> Vec<Arc<dyn Document>> {
        let mut found = Vec::new();
        if let Some(document) = self.document_for_resource(resource) {
            found.push(document);
        }
        if include_imported && self.imports_enabled() {
            let mut visited = IndexSet::new();
            for document in self.documents() {
                collect_imported_matches(&document, resource, &mut visited, &mut found);
            }
        }
        let mut seen = IndexSet::new();
        found.retain(|document| seen.insert(document.id().clone()));
        found
    }

    /// All documents, explicit then auto-detected, in insertion order
    /// (snapshot)
    #[must_use]
    pub fn documents(&self) -> Vec<Arc<dyn Document>> {
        self.ensure_populated();
        let state = self.state.read();
        state
            .documents
            .values()
            .chain(state.auto_documents.values())
            .cloned()
            .collect()
    }

    /// All document identifiers, explicit then auto-detected
    #[must_use]
    pub fn document_ids(&self) -> Vec<ConfigId> {
        self.ensure_populated();
        let state = self.state.read();
        state
            .documents
            .keys()
            .chain(state.auto_documents.keys())
            .cloned()
            .collect()
    }

    /// Explicitly registered document identifiers only
    #[must_use]
    pub fn explicit_document_ids(&self) -> Vec<ConfigId> {
        self.ensure_populated();
        self.state.read().documents.keys().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Config sets

    /// Create (but do not register) an explicit config set resolving its
    /// members through this project
    #[must_use]
    pub fn new_config_set(&self, name: impl Into<String>, members: Vec<ConfigId>) -> Arc<ConfigSet> {
        ConfigSet::with_members(
            self.name.clone(),
            name,
            Origin::Explicit,
            self.resolver_weak(),
            members,
        )
    }

    /// Replace all explicitly registered config sets
    pub fn set_config_sets(&self, sets: Vec<Arc<ConfigSet>>) {
        self.ensure_populated();
        let mut state = self.state.write();
        state.config_sets.clear();
        for set in sets {
            state.config_sets.insert(set.name().to_string(), set);
        }
    }

    /// Register a config set; re-adding the same instance is a no-op.
    /// A same-named auto-detected set is demoted along with its provenance.
    pub fn add_config_set(&self, set: Arc<ConfigSet>) -> bool {
        self.ensure_populated();
        let mut state = self.state.write();
        if state
            .config_sets
            .get(set.name())
            .is_some_and(|existing| Arc::ptr_eq(existing, &set))
        {
            return false;
        }
        let name = set.name().to_string();
        state.config_sets.insert(name.clone(), set);
        if state.auto_config_sets.shift_remove(&name).is_some() {
            state.set_by_locator.retain(|_, contributed| contributed != &name);
        }
        true
    }

    /// Remove an explicitly registered config set
    pub fn remove_config_set(&self, name: &str) -> bool {
        self.ensure_populated();
        self.state.write().config_sets.shift_remove(name).is_some()
    }

    /// Check for an explicitly registered config set
    #[must_use]
    pub fn has_config_set(&self, name: &str) -> bool {
        self.ensure_populated();
        self.state.read().config_sets.contains_key(name)
    }

    /// Look up a config set, explicit entries winning over auto-detected
    #[must_use]
    pub fn config_set(&self, name: &str) -> Option<Arc<ConfigSet>> {
        self.ensure_populated();
        let state = self.state.read();
        state
            .config_sets
            .get(name)
            .or_else(|| state.auto_config_sets.get(name))
            .cloned()
    }

    /// All config sets, explicit then auto-detected (snapshot)
    #[must_use]
    pub fn config_sets(&self) -> Vec<Arc<ConfigSet>> {
        self.ensure_populated();
        self.config_sets_snapshot()
    }

    /// Names of explicitly registered config sets only
    #[must_use]
    pub fn explicit_config_set_names(&self) -> Vec<String> {
        self.ensure_populated();
        self.state.read().config_sets.keys().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Aggregate bean queries

    /// Check if any document uses the given outer class name
    #[must_use]
    pub fn is_bean_class(&self, class_name: &str) -> bool {
        self.documents()
            .iter()
            .any(|document| document.is_bean_class(class_name))
    }

    /// All outer class names used across all documents
    #[must_use]
    pub fn bean_classes(&self) -> IndexSet<String> {
        let mut classes = IndexSet::new();
        for document in self.documents() {
            classes.extend(document.bean_classes());
        }
        classes
    }

    /// All beans using the given outer class name, across all documents
    #[must_use]
    pub fn beans_for_class(&self, class_name: &str) -> Vec<Bean> {
        let mut beans = Vec::new();
        for document in self.documents() {
            beans.extend(document.beans_for_class(class_name));
        }
        beans
    }

    // ------------------------------------------------------------------
    // Persistence and lifecycle

    /// Snapshot of the explicit state in its persisted shape
    #[must_use]
    pub fn description(&self) -> ProjectDescription {
        self.ensure_populated();
        let (suffixes, documents, sets) = {
            let state = self.state.read();
            (
                state.suffixes.clone(),
                state.documents.keys().cloned().collect::<Vec<_>>(),
                state.config_sets.values().cloned().collect::<Vec<_>>(),
            )
        };
        // Set fields are read with the project lock released.
        let config_sets = sets
            .iter()
            .map(|set| ConfigSetDescription {
                name: set.name().to_string(),
                allow_override: set.allow_override(),
                incomplete: set.incomplete(),
                members: set.members(),
            })
            .collect();
        ProjectDescription {
            suffixes,
            imports_enabled: self.imports_enabled(),
            documents,
            config_sets,
            ..ProjectDescription::default()
        }
    }

    /// Persist the explicit state through the description store.
    ///
    /// Runs entirely without the write lock; the store may call back into
    /// this project.
    ///
    /// # Errors
    /// Propagates storage failures from the description store.
    pub fn save_description(&self) -> Result<(), DescriptionError> {
        let description = self.description();
        self.descriptions.write(&self.name, &description)
    }

    /// Discard all populated state, including suffixes and every piece of
    /// provenance bookkeeping, and rearm lazy population for the next
    /// access
    pub fn reset(&self) {
        debug!(project = %self.name, "resetting project");
        let documents: Vec<Arc<dyn Document>> = {
            let mut state = self.state.write();
            let documents = state
                .documents
                .values()
                .chain(state.auto_documents.values())
                .cloned()
                .collect();
            *state = ProjectState::default();
            documents
        };
        for document in &documents {
            document.unregister_listener(&self.listener);
        }
        *self.population.state.lock() = PopulationState::Unpopulated;
    }

    /// Retract everything one locator contributed: its documents (markers
    /// deleted after the lock is released), their provenance entries, and
    /// the single config set it may have contributed
    pub fn remove_auto_detected_documents(&self, locator_id: &str) {
        let removed = {
            let mut state = self.state.write();
            let mut removed = Vec::new();
            if let Some(contributed) = state.documents_by_locator.shift_remove(locator_id) {
                for id in &contributed {
                    if let Some(document) = state.auto_documents.shift_remove(id) {
                        removed.push(document);
                    }
                    state.locator_by_document.shift_remove(id);
                }
            }
            if let Some(set_name) = state.set_by_locator.shift_remove(locator_id) {
                state.auto_config_sets.shift_remove(&set_name);
            }
            removed
        };
        for document in &removed {
            document.unregister_listener(&self.listener);
            if let Some(resource) = document.resource() {
                self.markers.delete_all_markers(&resource);
            }
        }
    }

    // ------------------------------------------------------------------
    // Population

    /// Run population exactly once per epoch; see [`PopulationState`]
    fn ensure_populated(&self) {
        let mut gate = self.population.state.lock();
        loop {
            match *gate {
                PopulationState::Populated => return,
                PopulationState::Populating(owner) if owner == thread::current().id() => return,
                PopulationState::Populating(_) => self.population.done.wait(&mut gate),
                PopulationState::Unpopulated => {
                    *gate = PopulationState::Populating(thread::current().id());
                    break;
                }
            }
        }
        drop(gate);

        self.populate();

        *self.population.state.lock() = PopulationState::Populated;
        self.population.done.notify_all();
    }

    /// Load explicit state from the description store, prune stale entries,
    /// run auto-detection, and wire the event listener
    fn populate(&self) {
        debug!(project = %self.name, "populating project");
        let description = match self.descriptions.read(&self.name) {
            Ok(description) => description,
            Err(DescriptionError::NotFound(_)) => ProjectDescription::default(),
            Err(err) => {
                warn!(project = %self.name, error = %err, "unreadable project description");
                ProjectDescription::default()
            }
        };
        self.imports_enabled
            .store(description.imports_enabled, Ordering::Relaxed);

        let pruned = {
            let mut state = self.state.write();
            state.suffixes = description.suffixes.clone();
            for id in &description.documents {
                if id.is_empty() || state.documents.contains_key(id) {
                    continue;
                }
                let document = self.provider.open(&self.name, id, Origin::Explicit);
                state.documents.insert(id.clone(), document);
            }
            for set_description in &description.config_sets {
                let set = ConfigSet::with_members(
                    self.name.clone(),
                    set_description.name.clone(),
                    Origin::Explicit,
                    self.resolver_weak(),
                    set_description.members.clone(),
                );
                set.set_allow_override(set_description.allow_override);
                set.set_incomplete(set_description.incomplete);
                state.config_sets.insert(set.name().to_string(), set);
            }

            // Explicit documents without a backing resource are stale.
            let pruned: Vec<ConfigId> = state
                .documents
                .iter()
                .filter(|(_, document)| {
                    document.resource().is_none() || !document.resource_exists()
                })
                .map(|(id, _)| id.clone())
                .collect();
            for id in &pruned {
                state.documents.shift_remove(id);
            }
            pruned
        };
        if !pruned.is_empty() {
            debug!(project = %self.name, count = pruned.len(), "pruned documents without backing resources");
            let sets = self.config_sets_snapshot();
            for id in &pruned {
                for set in &sets {
                    if set.has_member(id) {
                        set.remove_member(id);
                    }
                }
            }
        }

        self.detect_documents();

        // Config set members resolvable neither locally nor through the
        // model are permanently dangling.
        let model = self.model.upgrade();
        for set in self.config_sets_snapshot() {
            for member in set.members() {
                if self.has_document_internal(&member) {
                    continue;
                }
                let resolved_globally = model
                    .as_ref()
                    .and_then(|model| model.document(&member))
                    .is_some();
                if !resolved_globally {
                    set.remove_member(&member);
                }
            }
        }

        let documents: Vec<Arc<dyn Document>> =
            self.state.read().documents.values().cloned().collect();
        for document in &documents {
            document.register_listener(self.listener.clone());
        }
    }

    /// Re-run every registered locator and rebuild the auto-detected
    /// population from scratch.
    ///
    /// Locators run with no lock held; a failing locator is logged and
    /// skipped without disturbing the others' contributions.
    fn detect_documents(&self) {
        {
            let mut state = self.state.write();
            let previous: Vec<Arc<dyn Document>> =
                state.auto_documents.values().cloned().collect();
            for document in &previous {
                document.unregister_listener(&self.listener);
            }
            state.auto_documents.clear();
            state.documents_by_locator.clear();
            state.locator_by_document.clear();
            state.auto_config_sets.clear();
            state.set_by_locator.clear();
        }

        let Some(model) = self.model.upgrade() else {
            return;
        };
        for locator in model.locators().iter() {
            if !locator.is_enabled(self) || !locator.supports(self) {
                continue;
            }
            let resources = match locator.locate(self) {
                Ok(resources) => resources,
                Err(err) => {
                    warn!(project = %self.name, locator = locator.id(), error = %err, "locator failed");
                    continue;
                }
            };

            let mut staged: Vec<(ConfigId, Arc<dyn Document>)> = Vec::new();
            for resource in &resources {
                let id = ConfigId::for_resource(&self.name, resource);
                if self.has_document_internal(&id)
                    || staged.iter().any(|(staged_id, _)| staged_id == &id)
                {
                    continue;
                }
                let document = self.provider.open(&self.name, &id, Origin::AutoDetected);
                staged.push((id, document));
            }
            let set_name = if resources.len() > 1 {
                locator
                    .config_set_name(&resources)
                    .filter(|name| !name.is_empty())
            } else {
                None
            };
            if staged.is_empty() {
                continue;
            }
            debug!(
                project = %self.name,
                locator = locator.id(),
                count = staged.len(),
                "registering auto-detected documents"
            );

            {
                let mut state = self.state.write();
                for (id, document) in &staged {
                    state.auto_documents.insert(id.clone(), document.clone());
                    state
                        .locator_by_document
                        .insert(id.clone(), locator.id().to_string());
                    state
                        .documents_by_locator
                        .entry(locator.id().to_string())
                        .or_default()
                        .insert(id.clone());
                }
            }
            for (_, document) in &staged {
                document.register_listener(self.listener.clone());
            }

            if let Some(name) = set_name {
                let members = staged.iter().map(|(id, _)| id.clone()).collect();
                let set = ConfigSet::with_members(
                    self.name.clone(),
                    name.clone(),
                    Origin::AutoDetected,
                    self.resolver_weak(),
                    members,
                );
                locator.configure_config_set(&set);
                let mut state = self.state.write();
                state.auto_config_sets.insert(name.clone(), set);
                state.set_by_locator.insert(locator.id().to_string(), name);
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals

    fn has_document_internal(&self, id: &ConfigId) -> bool {
        let state = self.state.read();
        state.documents.contains_key(id) || state.auto_documents.contains_key(id)
    }

    fn config_sets_snapshot(&self) -> Vec<Arc<ConfigSet>> {
        let state = self.state.read();
        state
            .config_sets
            .values()
            .chain(state.auto_config_sets.values())
            .cloned()
            .collect()
    }

    fn resolver_weak(&self) -> Weak<dyn MemberResolver> {
        self.weak.clone()
    }
}

impl MemberResolver for Project {
    fn resolve_member(&self, id: &ConfigId) -> Option<Arc<dyn Document>> {
        self.document(id)
    }
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("suffixes", &state.suffixes)
            .field("documents", &state.documents.keys().collect::<Vec<_>>())
            .field(
                "auto_documents",
                &state.auto_documents.keys().collect::<Vec<_>>(),
            )
            .field(
                "config_sets",
                &state.config_sets.keys().collect::<Vec<_>>(),
            )
            .field(
                "auto_config_sets",
                &state.auto_config_sets.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Walk one document's import graph collecting every document whose
/// resource matches; `visited` terminates cyclic graphs
fn collect_imported_matches(
    document: &Arc<dyn Document>,
    resource: &ResourcePath,
    visited: &mut IndexSet<ConfigId>,
    found: &mut Vec<Arc<dyn Document>>,
) {
    if !visited.insert(document.id().clone()) {
        return;
    }
    if document.resource().as_ref() == Some(resource) {
        found.push(document.clone());
    }
    for import in document.imports() {
        for imported in import.imported_documents() {
            collect_imported_matches(imported, resource, visited, found);
        }
    }
}
