//! Mapping configuration errors.

/// Errors raised while building a tokenizer or a role assignment.
///
/// Applying a mapping never fails; these only surface when the user-supplied
/// configuration itself is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("Separator cannot be an empty string")]
    EmptySeparator,

    #[error("Filename mode needs at least one separator")]
    NoSeparators,

    #[error("Invalid role '{spec}': {reason}")]
    InvalidRoleSpec { spec: String, reason: String },
}

impl MappingError {
    pub(crate) fn invalid_spec(spec: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRoleSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}
