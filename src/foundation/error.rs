/// Convenience result type used across canopy.
pub type CanopyResult<T> = Result<T, CanopyError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum CanopyError {
    /// Invalid user-provided or stored data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while sampling a variation.
    #[error("animation error: {0}")]
    Animation(String),

    /// A variation was evaluated with a non-positive (or non-finite) duration.
    #[error("invalid duration: variation duration must be > 0, got {0}")]
    InvalidDuration(f64),

    /// A stored block references a pattern that is not in the catalog.
    #[error("unknown pattern \"{0}\"")]
    UnknownPattern(String),

    /// A stored variation carries a kind tag this build does not know.
    #[error("unknown variation kind \"{0}\"")]
    UnknownVariationKind(String),

    /// A uniform name that the block's pattern does not declare.
    #[error("pattern \"{pattern}\" has no parameter \"{uniform}\"")]
    UnknownParameter {
        /// Pattern name.
        pattern: String,
        /// Requested uniform name.
        uniform: String,
    },

    /// A variation's output cannot be written into the parameter's value.
    #[error("parameter \"{uniform}\" holds a {expected} value, variation produces {found}")]
    ValueKindMismatch {
        /// Uniform name.
        uniform: String,
        /// Kind of the parameter's value.
        expected: &'static str,
        /// Kind produced by the variation.
        found: &'static str,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanopyError {
    /// Build a [`CanopyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CanopyError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`CanopyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`CanopyError::UnknownParameter`] value.
    pub fn unknown_parameter(pattern: impl Into<String>, uniform: impl Into<String>) -> Self {
        Self::UnknownParameter {
            pattern: pattern.into(),
            uniform: uniform.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
