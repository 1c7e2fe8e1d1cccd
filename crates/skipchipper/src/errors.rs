//! # Error Types

/// Errors from skipchipper operations.
#[derive(Debug, thiserror::Error)]
pub enum SkipchipperError {
    /// The vocabulary builder observed no tokens.
    #[error("empty input: no tokens to build a vocabulary from")]
    EmptyInput,

    /// A configuration value is out of range.
    #[error("invalid config: {name} {reason}")]
    InvalidConfig {
        /// The name of the offending parameter.
        name: &'static str,

        /// Why the value was rejected.
        reason: String,
    },

    /// The center of a context window could not be found in its own window.
    ///
    /// This is an internal invariant violation, not a recoverable condition.
    #[error("missing center: index {index} not found in its window (chunk len {len})")]
    MissingCenter {
        /// The center index.
        index: usize,

        /// The length of the chunk.
        len: usize,
    },

    /// A token was not present in the vocabulary.
    #[error("unknown token: {0:?}")]
    UnknownToken(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SkipchipperError {
    /// Build an [`SkipchipperError::InvalidConfig`].
    pub fn invalid_config<S: Into<String>>(
        name: &'static str,
        reason: S,
    ) -> Self {
        Self::InvalidConfig {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for skipchipper operations.
pub type SCResult<T> = core::result::Result<T, SkipchipperError>;
