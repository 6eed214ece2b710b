//! Error types for the beandex model
//!
//! Collaborator boundaries are the only places errors surface: discovery
//! locators may fail (contained, never propagated past the detection loop)
//! and description persistence may fail. Queries never error; absence is
//! `None` or an empty collection.

/// Failure of a discovery locator run.
///
/// A locator returning this does not abort detection; the failure is logged
/// and remaining locators still run.
#[derive(Debug, thiserror::Error)]
#[error("locator failed: {message}")]
pub struct LocateError {
    message: String,
}

impl LocateError {
    /// Create locate error with a message
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised by the description persistence collaborator
#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    /// No description exists for the project; population proceeds empty
    #[error("no description for project '{0}'")]
    NotFound(String),

    /// Description exists but could not be understood
    #[error("corrupt description for project '{project}': {reason}")]
    Corrupt {
        /// Project whose description failed to parse
        project: String,
        /// Parser/decoder detail
        reason: String,
    },

    /// Underlying storage failed
    #[error("description storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_error_display() {
        let err = LocateError::new("scan aborted");
        assert_eq!(err.to_string(), "locator failed: scan aborted");
    }

    #[test]
    fn description_error_display() {
        let err = DescriptionError::NotFound("alpha".to_string());
        assert!(err.to_string().contains("alpha"));

        let err = DescriptionError::Corrupt {
            project: "alpha".to_string(),
            reason: "bad field".to_string(),
        };
        assert!(err.to_string().contains("bad field"));
    }
}
