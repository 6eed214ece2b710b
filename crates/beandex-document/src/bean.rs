//! Bean component definitions
//!
//! Provides [`Bean`], the named component definition declared by a
//! configuration document.

use serde::{Deserialize, Serialize};

/// Character separating an outer class name from a nested class suffix.
pub const NESTED_CLASS_SEPARATOR: char = '$';

/// A named component definition with an optional implementation class and
/// nested (inner) definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bean {
    name: String,
    class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    inner_beans: Vec<Bean>,
}

impl Bean {
    /// Create bean with no implementation class
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: None,
            inner_beans: Vec::new(),
        }
    }

    /// Set the implementation class name
    #[inline]
    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Append a nested bean definition
    #[inline]
    #[must_use]
    pub fn with_inner_bean(mut self, inner: Bean) -> Self {
        self.inner_beans.push(inner);
        self
    }

    /// Bean name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full implementation class name, if declared
    #[inline]
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Nested bean definitions
    #[inline]
    #[must_use]
    pub fn inner_beans(&self) -> &[Bean] {
        &self.inner_beans
    }

    /// Implementation class name with any nested-class suffix stripped.
    ///
    /// A separator at the first position is kept as-is; only a separator
    /// after at least one character starts a nested suffix.
    #[must_use]
    pub fn outer_class_name(&self) -> Option<&str> {
        let class_name = self.class_name.as_deref()?;
        match class_name.find(NESTED_CLASS_SEPARATOR) {
            Some(pos) if pos > 0 => Some(&class_name[..pos]),
            _ => Some(class_name),
        }
    }
}
