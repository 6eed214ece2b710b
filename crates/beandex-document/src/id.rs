//! Document identifiers and resource identities
//!
//! Provides [`ConfigId`] for naming configuration documents and
//! [`ResourcePath`] for the workspace resource backing a document.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Separator introducing the absolute identifier form.
pub const ABSOLUTE_MARKER: char = '/';

/// Identifier of a configuration document.
///
/// Two forms exist:
/// - project-relative path (`conf/app.xml`) for documents owned by the
///   project the identifier is used in;
/// - absolute key with a leading `/` (`/other/conf/app.xml`) for documents
///   owned by another project, resolved against the global model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigId(String);

impl ConfigId {
    /// Create identifier from a raw string key
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for a resource as seen from `owner_project`.
    ///
    /// Resources inside the owning project get the project-relative form,
    /// everything else the absolute form.
    #[must_use]
    pub fn for_resource(owner_project: &str, resource: &ResourcePath) -> Self {
        if resource.project() == owner_project {
            Self(resource.path().to_string())
        } else {
            Self(resource.full_path())
        }
    }

    /// Raw string key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the identifier is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check for the absolute (leading `/`) form
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with(ABSOLUTE_MARKER)
    }

    /// Split an absolute identifier into `(project, relative path)`.
    ///
    /// Returns `None` for relative identifiers and for absolute keys with no
    /// path component; such keys are unresolvable, not errors.
    #[must_use]
    pub fn split_absolute(&self) -> Option<(&str, &str)> {
        self.0
            .strip_prefix(ABSOLUTE_MARKER)
            .and_then(|rest| rest.split_once(ABSOLUTE_MARKER))
            .filter(|(project, path)| !project.is_empty() && !path.is_empty())
    }
}

impl Display for ConfigId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConfigId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ConfigId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identity of the workspace resource backing a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePath {
    project: String,
    path: String,
}

impl ResourcePath {
    /// Create resource identity from owning project and project-relative path
    #[inline]
    #[must_use]
    pub fn new(project: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            path: path.into(),
        }
    }

    /// Parse the absolute key form `/{project}/{path}`
    ///
    /// # Errors
    /// Returns [`IdError`] if the key has no leading marker or no path
    /// component.
    pub fn from_full_path(key: &str) -> Result<Self, IdError> {
        let rest = key
            .strip_prefix(ABSOLUTE_MARKER)
            .ok_or_else(|| IdError::NotAbsolute(key.to_string()))?;
        let (project, path) = rest
            .split_once(ABSOLUTE_MARKER)
            .filter(|(project, path)| !project.is_empty() && !path.is_empty())
            .ok_or_else(|| IdError::MissingPath(key.to_string()))?;
        Ok(Self::new(project, path))
    }

    /// Owning project name
    #[inline]
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Project-relative path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute key form `/{project}/{path}`
    #[inline]
    #[must_use]
    pub fn full_path(&self) -> String {
        format!("{ABSOLUTE_MARKER}{}{ABSOLUTE_MARKER}{}", self.project, self.path)
    }
}

impl Display for ResourcePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// Errors related to document identifiers
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Key lacks the leading absolute marker
    #[error("identifier '{0}' is not in absolute form")]
    NotAbsolute(String),

    /// Absolute key has a project but no path component
    #[error("identifier '{0}' has no path component")]
    MissingPath(String),
}
