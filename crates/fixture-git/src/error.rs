//! Error types for fixture-git

use std::path::PathBuf;

/// Result type for fixture-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fixture-git operations
///
/// Each engine operation maps to its own variant so a failed build reports
/// which step of the repository lifecycle broke.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to initialize repository at {path}: {source}")]
    Init {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to open repository at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to rename branch '{from}' to '{to}': {source}")]
    RenameBranch {
        from: String,
        to: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to read working tree status: {source}")]
    Status {
        #[source]
        source: git2::Error,
    },

    #[error("Failed to stage '{path}': {source}")]
    Staging {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to create commit on '{branch}': {source}")]
    Commit {
        branch: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to check out branch '{branch}': {source}")]
    Checkout {
        branch: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to resolve HEAD: {source}")]
    HeadLookup {
        #[source]
        source: git2::Error,
    },

    #[error("Invalid signature for {name} <{email}>: {source}")]
    Signature {
        name: String,
        email: String,
        #[source]
        source: git2::Error,
    },

    #[error("Signature time {when} for {name} <{email}> is not a whole second")]
    FractionalTime {
        name: String,
        email: String,
        when: String,
    },

    #[error("Branch '{name}' not found")]
    BranchNotFound { name: String },

    #[error("Invalid branch name: {name}")]
    InvalidBranchName { name: String },

    #[error("Nothing to commit on '{branch}': working tree matches the branch tip")]
    NothingToCommit { branch: String },

    #[error("Repository at {path} has no working directory")]
    Bare { path: PathBuf },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] fixture_fs::Error),
}
