//! Beandex document layer
//!
//! Vocabulary types and collaborator traits shared between the beandex
//! model and the external document layer:
//! - identifiers ([`ConfigId`], [`ResourcePath`])
//! - component definitions ([`Bean`])
//! - the document boundary ([`Document`], [`DocumentProvider`],
//!   [`DocumentListener`], [`ImportRef`])
//!
//! Parsing configuration sources into beans is the document layer's job;
//! this crate only fixes the interface the model consumes.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod bean;
pub mod document;
pub mod id;

pub use bean::{Bean, NESTED_CLASS_SEPARATOR};
pub use document::{
    Document, DocumentListener, DocumentProvider, ImportRef, Invalidatable, Origin, ProcessorId,
};
pub use id::{ConfigId, IdError, ResourcePath, ABSOLUTE_MARKER};
