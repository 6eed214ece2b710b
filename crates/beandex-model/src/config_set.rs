//! Config sets: ordered document groups with a unified bean index
//!
//! A [`ConfigSet`] aggregates documents by identifier and exposes a lazily
//! computed view of every bean and bean class across its members. The view
//! is built on first query and dropped on any mutation; the override policy
//! decides which declaration of a colliding bean name survives.

use beandex_document::{Bean, ConfigId, Document, Invalidatable, Origin, ResourcePath};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Resolves member identifiers to documents for a config set.
///
/// Implemented by the owning project; standalone sets (tests) may supply
/// any resolver. Unresolvable members are skipped, never errors.
pub trait MemberResolver: Send + Sync {
    /// Resolve one member identifier, if it denotes a known document
    fn resolve_member(&self, id: &ConfigId) -> Option<Arc<dyn Document>>;
}

/// An ordered aggregation of configuration documents with a unified,
/// override-policy-governed bean and bean-class index.
///
/// The set carries its own small lock; the owning project never holds its
/// write lock while editing a set's membership.
pub struct ConfigSet {
    project: String,
    name: String,
    origin: Origin,
    resolver: Weak<dyn MemberResolver>,
    inner: RwLock<SetState>,
}

struct SetState {
    members: Vec<ConfigId>,
    allow_override: bool,
    incomplete: bool,
    /// Bumped on every mutation; a rebuild is only installed if the epoch
    /// it was computed against is still current.
    epoch: u64,
    indexes: Option<SetIndexes>,
}

/// The two derived maps, always computed and dropped together
struct SetIndexes {
    beans_by_name: IndexMap<String, Bean>,
    beans_by_class: IndexMap<String, Vec<Bean>>,
}

impl ConfigSet {
    /// Create empty config set
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        name: impl Into<String>,
        origin: Origin,
        resolver: Weak<dyn MemberResolver>,
    ) -> Arc<Self> {
        Self::with_members(project, name, origin, resolver, Vec::new())
    }

    /// Create config set over an initial member list
    #[must_use]
    pub fn with_members(
        project: impl Into<String>,
        name: impl Into<String>,
        origin: Origin,
        resolver: Weak<dyn MemberResolver>,
        members: Vec<ConfigId>,
    ) -> Arc<Self> {
        Arc::new(Self {
            project: project.into(),
            name: name.into(),
            origin,
            resolver,
            inner: RwLock::new(SetState {
                members,
                allow_override: true,
                incomplete: false,
                epoch: 0,
                indexes: None,
            }),
        })
    }

    /// Set name, unique within the owning project
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning project
    #[inline]
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Whether the set was registered explicitly or auto-detected
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Current name-collision policy
    #[inline]
    #[must_use]
    pub fn allow_override(&self) -> bool {
        self.inner.read().allow_override
    }

    /// Set the name-collision policy; always drops the derived view, even
    /// when the value is unchanged
    pub fn set_allow_override(&self, allow_override: bool) {
        let mut state = self.inner.write();
        state.allow_override = allow_override;
        state.touch();
    }

    /// Caller-set completeness flag; stored only, no internal semantics
    #[inline]
    #[must_use]
    pub fn incomplete(&self) -> bool {
        self.inner.read().incomplete
    }

    /// Update the completeness flag
    pub fn set_incomplete(&self, incomplete: bool) {
        self.inner.write().incomplete = incomplete;
    }

    /// Member identifiers, in insertion order (snapshot)
    #[must_use]
    pub fn members(&self) -> Vec<ConfigId> {
        self.inner.read().members.clone()
    }

    /// Append a member identifier.
    ///
    /// Empty and duplicate identifiers are rejected silently; repeated adds
    /// are idempotent by design.
    pub fn add_member(&self, id: &ConfigId) {
        if id.is_empty() {
            return;
        }
        let mut state = self.inner.write();
        if state.members.contains(id) {
            return;
        }
        state.members.push(id.clone());
        state.touch();
    }

    /// Remove a member identifier; absent members are a no-op but the
    /// derived view is dropped either way
    pub fn remove_member(&self, id: &ConfigId) {
        let mut state = self.inner.write();
        state.members.retain(|member| member != id);
        state.touch();
    }

    /// Swap one member identifier for another, keeping insertion order of
    /// the remaining members
    pub fn replace_member(&self, old: &ConfigId, new: &ConfigId) {
        self.remove_member(old);
        self.add_member(new);
    }

    /// Membership test by identifier
    #[must_use]
    pub fn has_member(&self, id: &ConfigId) -> bool {
        self.inner.read().members.contains(id)
    }

    /// Membership test by backing resource, normalized to the identifier
    /// form used by the owning project
    #[must_use]
    pub fn has_member_resource(&self, resource: &ResourcePath) -> bool {
        self.has_member(&ConfigId::for_resource(&self.project, resource))
    }

    /// Resolve all members to documents, skipping unresolvable identifiers
    #[must_use]
    pub fn documents(&self) -> Vec<Arc<dyn Document>> {
        let Some(resolver) = self.resolver.upgrade() else {
            return Vec::new();
        };
        self.members()
            .iter()
            .filter_map(|member| resolver.resolve_member(member))
            .collect()
    }

    /// Check if a bean with this name is visible in the effective view
    #[must_use]
    pub fn has_bean(&self, name: &str) -> bool {
        self.with_indexes(|indexes| indexes.beans_by_name.contains_key(name))
    }

    /// The effective bean registered under `name`, honoring the override
    /// policy
    #[must_use]
    pub fn bean(&self, name: &str) -> Option<Bean> {
        self.with_indexes(|indexes| indexes.beans_by_name.get(name).cloned())
    }

    /// All effective beans, in member order
    #[must_use]
    pub fn beans(&self) -> Vec<Bean> {
        self.with_indexes(|indexes| indexes.beans_by_name.values().cloned().collect())
    }

    /// Check if any effective bean uses the given outer class name
    #[must_use]
    pub fn is_bean_class(&self, class_name: &str) -> bool {
        self.with_indexes(|indexes| indexes.beans_by_class.contains_key(class_name))
    }

    /// All outer class names used by effective beans
    #[must_use]
    pub fn bean_classes(&self) -> Vec<String> {
        self.with_indexes(|indexes| indexes.beans_by_class.keys().cloned().collect())
    }

    /// Effective beans using the given outer class name; unknown classes
    /// yield an empty list
    #[must_use]
    pub fn beans_for_class(&self, class_name: &str) -> Vec<Bean> {
        self.with_indexes(|indexes| {
            indexes
                .beans_by_class
                .get(class_name)
                .cloned()
                .unwrap_or_default()
        })
    }

    /// Run `f` against the derived indexes, building them first if absent.
    ///
    /// Members are resolved without holding the set's write lock; the
    /// rebuild is installed only if no mutation happened in between,
    /// otherwise the build is retried against the new state.
    fn with_indexes<R>(&self, f: impl Fn(&SetIndexes) -> R) -> R {
        loop {
            {
                let state = self.inner.read();
                if let Some(indexes) = state.indexes.as_ref() {
                    return f(indexes);
                }
            }

            let (members, allow_override, epoch) = {
                let state = self.inner.read();
                (state.members.clone(), state.allow_override, state.epoch)
            };
            let built = self.build_indexes(&members, allow_override);

            let mut state = self.inner.write();
            if state.epoch == epoch {
                return f(state.indexes.insert(built));
            }
            // Membership or policy changed mid-build; try again.
        }
    }

    /// Build both derived maps from the given membership snapshot.
    ///
    /// Pass one resolves members in order and applies the override policy
    /// per bean name. Pass two indexes classes over the *effective* beans
    /// only (plus their inner beans), so an overridden bean's class never
    /// appears in the class index.
    fn build_indexes(&self, members: &[ConfigId], allow_override: bool) -> SetIndexes {
        let mut beans_by_name: IndexMap<String, Bean> = IndexMap::new();
        if let Some(resolver) = self.resolver.upgrade() {
            for member in members {
                let Some(document) = resolver.resolve_member(member) else {
                    continue;
                };
                for bean in document.beans() {
                    if allow_override || !beans_by_name.contains_key(bean.name()) {
                        beans_by_name.insert(bean.name().to_string(), bean);
                    }
                }
            }
        }

        let mut beans_by_class: IndexMap<String, Vec<Bean>> = IndexMap::new();
        for bean in beans_by_name.values() {
            index_bean_class(&mut beans_by_class, bean);
            for inner in bean.inner_beans() {
                index_bean_class(&mut beans_by_class, inner);
            }
        }

        SetIndexes {
            beans_by_name,
            beans_by_class,
        }
    }
}

impl Invalidatable for ConfigSet {
    fn invalidate(&self) {
        self.inner.write().touch();
    }
}

impl std::fmt::Debug for ConfigSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read();
        f.debug_struct("ConfigSet")
            .field("project", &self.project)
            .field("name", &self.name)
            .field("origin", &self.origin)
            .field("members", &state.members)
            .field("allow_override", &state.allow_override)
            .field("incomplete", &state.incomplete)
            .finish()
    }
}

impl SetState {
    /// Drop both derived maps and advance the epoch so an in-flight
    /// rebuild cannot install a stale view
    fn touch(&mut self) {
        self.indexes = None;
        self.epoch += 1;
    }
}

fn index_bean_class(beans_by_class: &mut IndexMap<String, Vec<Bean>>, bean: &Bean) {
    if let Some(class_name) = bean.outer_class_name() {
        beans_by_class
            .entry(class_name.to_string())
            .or_default()
            .push(bean.clone());
    }
}
