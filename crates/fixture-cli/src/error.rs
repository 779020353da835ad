//! Error types for fixture-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from fixture-core
    #[error(transparent)]
    Core(#[from] fixture_core::Error),

    /// Error from fixture-fs
    #[error(transparent)]
    Fs(#[from] fixture_fs::Error),

    /// Error from fixture-git
    #[error(transparent)]
    Git(#[from] fixture_git::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
