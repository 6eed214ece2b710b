//! In-memory queryable model over bean-declaring configuration documents
//!
//! The model aggregates configuration documents (parsed elsewhere, owned by
//! the document layer) into [`Project`]s and [`ConfigSet`]s and answers
//! name- and class-based bean queries over them:
//!
//! - [`DocumentModel`] is the root: it owns projects, the discovery
//!   [`LocatorRegistry`], and the event router that fans document events out
//!   across all projects.
//! - [`Project`] tracks explicitly registered vs auto-detected documents and
//!   config sets, populates itself lazily from a [`DescriptionStore`], and
//!   keeps explicit registrations authoritative over auto-detected ones.
//! - [`ConfigSet`] groups documents and serves a lazily built, override-
//!   policy-governed view of their beans.
//!
//! Collaborators (document provider, description store, marker sink,
//! locators) are injected per model instance; nothing here is a process
//! global.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config_set;
mod description;
mod error;
mod events;
mod locator;
mod markers;
mod model;
mod project;

pub use config_set::{ConfigSet, MemberResolver};
pub use description::{
    ConfigSetDescription, DescriptionStore, ProjectDescription, DEFAULT_CONFIG_SUFFIX,
    DESCRIPTION_VERSION,
};
pub use error::{DescriptionError, LocateError};
pub use events::ModelEventRouter;
pub use locator::{DocumentLocator, LocatorRegistry};
pub use markers::{MarkerSink, NullMarkerSink};
pub use model::DocumentModel;
pub use project::Project;
