#![forbid(unsafe_code)]

//! Error types.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Write to read-only property | No writer bound | [`ModelError::Unsupported`] |
//! | Bad range curve | Ordering or breakpoint violated | [`ModelError::InvalidArgument`] |
//! | Unknown property name | Source cannot resolve it | [`ModelError::Binding`] at bind time |
//! | Value accessor fails | Source reader/writer error | [`ModelError::Binding`], propagated |
//! | Automatic accessor fails | Source reader/writer error | Logged, treated as "not automatic" |
//! | Read fails during change detection | Source reader error | Logged, treated as "no change" |

/// Failure reported by an external property accessor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AccessError {
    message: String,
}

impl AccessError {
    /// Create an error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors from model and adapter operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A value was written to a property that has no writer.
    #[error("property '{property}' is read-only")]
    Unsupported {
        /// Property name.
        property: String,
    },
    /// Construction parameters were malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A property could not be resolved, or its accessor failed.
    #[error("binding for property '{property}' failed: {reason}")]
    Binding {
        /// Property name.
        property: String,
        /// What went wrong.
        reason: String,
    },
    /// A unit outside the model's unit group was selected.
    #[error("unit '{unit}' is not part of unit group '{group}'")]
    UnitNotInGroup {
        /// Symbol of the rejected unit.
        unit: String,
        /// Name of the model's unit group.
        group: String,
    },
}

impl ModelError {
    pub(crate) fn access(property: &str, err: &AccessError) -> Self {
        Self::Binding {
            property: property.to_owned(),
            reason: err.to_string(),
        }
    }
}

/// Result alias for model operations.
pub type Result<T, E = ModelError> = std::result::Result<T, E>;
