//! Error types for layercfg-core

/// Result type for layercfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while declaring, storing or reading configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A descriptor could not be built
    #[error("Invalid descriptor: {reason}")]
    InvalidDescriptor { reason: String },

    /// A mutating call was made after `freeze()`
    #[error("This configuration has been frozen and is now immutable")]
    Frozen,

    /// A resolved value could not be parsed as the requested type
    #[error("Value '{raw_value}' for '{key}' is not a valid {target_type}")]
    Format {
        key: String,
        raw_value: String,
        target_type: &'static str,
    },

    /// Nothing resolved for a key and there was no default to fall back to
    #[error("No value configured for '{key}'")]
    MissingValue { key: String },

    /// The backing file source failed while listing its structure
    #[error("Backing store error while {context}: {source}")]
    BackingStore {
        context: String,
        #[source]
        source: layercfg_fs::Error,
    },

    /// A constructor was given an unusable argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Error loading the backing file
    #[error(transparent)]
    Fs(#[from] layercfg_fs::Error),
}

impl Error {
    pub(crate) fn invalid_descriptor(reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
