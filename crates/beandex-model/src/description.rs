//! Project description persistence boundary
//!
//! [`ProjectDescription`] is the serialized shape of a project's explicit
//! state; [`DescriptionStore`] reads it during population and writes it on
//! [`crate::Project::save_description`]. Storage format and location are the
//! collaborator's concern.

use crate::error::DescriptionError;
use beandex_document::ConfigId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Format version written into fresh descriptions.
pub const DESCRIPTION_VERSION: &str = "1.0";

/// Document-name suffix recognized when a project declares none.
pub const DEFAULT_CONFIG_SUFFIX: &str = "xml";

/// Serialized explicit state of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescription {
    /// Description format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Recognized document-name suffixes
    #[serde(default = "default_suffixes")]
    pub suffixes: IndexSet<String>,

    /// Whether import traversal is enabled for the project
    #[serde(default = "default_true")]
    pub imports_enabled: bool,

    /// Explicitly registered document identifiers, in registration order
    #[serde(default)]
    pub documents: Vec<ConfigId>,

    /// Explicitly registered config sets, in registration order
    #[serde(default)]
    pub config_sets: Vec<ConfigSetDescription>,
}

impl Default for ProjectDescription {
    fn default() -> Self {
        Self {
            version: default_version(),
            suffixes: default_suffixes(),
            imports_enabled: true,
            documents: Vec::new(),
            config_sets: Vec::new(),
        }
    }
}

/// Serialized shape of one config set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSetDescription {
    /// Set name, unique within the project
    pub name: String,

    /// Name-collision policy across members
    #[serde(default = "default_true")]
    pub allow_override: bool,

    /// Caller-set completeness flag, stored verbatim
    #[serde(default)]
    pub incomplete: bool,

    /// Member document identifiers, in order
    #[serde(default)]
    pub members: Vec<ConfigId>,
}

impl ConfigSetDescription {
    /// Create description with defaults and the given members
    #[must_use]
    pub fn new(name: impl Into<String>, members: Vec<ConfigId>) -> Self {
        Self {
            name: name.into(),
            allow_override: true,
            incomplete: false,
            members,
        }
    }
}

fn default_version() -> String {
    DESCRIPTION_VERSION.to_string()
}

fn default_suffixes() -> IndexSet<String> {
    IndexSet::from([DEFAULT_CONFIG_SUFFIX.to_string()])
}

fn default_true() -> bool {
    true
}

/// Reads and writes project descriptions.
///
/// `read` runs during population with no project lock held; the store may
/// query the project being populated. `write` is likewise invoked lock-free.
pub trait DescriptionStore: Send + Sync {
    /// Load the description for `project`
    ///
    /// # Errors
    /// [`DescriptionError::NotFound`] if the project was never saved; other
    /// variants for storage/decoding failures. Population tolerates all of
    /// them by starting from an empty description.
    fn read(&self, project: &str) -> Result<ProjectDescription, DescriptionError>;

    /// Persist the description for `project`
    ///
    /// # Errors
    /// Storage failures surface to the caller of
    /// [`crate::Project::save_description`].
    fn write(&self, project: &str, description: &ProjectDescription)
        -> Result<(), DescriptionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_defaults() {
        let description = ProjectDescription::default();
        assert_eq!(description.version, DESCRIPTION_VERSION);
        assert!(description.suffixes.contains(DEFAULT_CONFIG_SUFFIX));
        assert!(description.imports_enabled);
        assert!(description.documents.is_empty());
    }

    #[test]
    fn description_serde_round_trip() {
        let description = ProjectDescription {
            documents: vec![ConfigId::new("a.xml"), ConfigId::new("b.xml")],
            config_sets: vec![ConfigSetDescription::new(
                "main",
                vec![ConfigId::new("a.xml")],
            )],
            ..ProjectDescription::default()
        };

        let json = serde_json::to_string(&description).unwrap();
        let back: ProjectDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(back, description);
    }

    #[test]
    fn description_fills_missing_fields() {
        let back: ProjectDescription = serde_json::from_str("{}").unwrap();
        assert_eq!(back, ProjectDescription::default());

        let set: ConfigSetDescription = serde_json::from_str("{\"name\":\"main\"}").unwrap();
        assert!(set.allow_override);
        assert!(!set.incomplete);
        assert!(set.members.is_empty());
    }
}
