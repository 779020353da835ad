//! Error types for fixture-core

use std::path::PathBuf;

/// Result type for fixture-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of a build failure, independent of where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Filesystem,
    Initialization,
    Status,
    Staging,
    Commit,
    Checkout,
    HeadLookup,
}

/// Errors that can occur while building a fixture
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A script step failed; `index` is 1-based
    #[error("Step {index} on branch '{branch}' failed: {source}")]
    StepFailed {
        index: usize,
        branch: String,
        #[source]
        source: Box<Error>,
    },

    /// Refusing to wipe a path that cannot be a fixture directory
    #[error("Refusing to use {path} as a fixture target: {reason}")]
    UnsafeTarget { path: PathBuf, reason: String },

    /// Filesystem error from fixture-fs
    #[error(transparent)]
    Fs(#[from] fixture_fs::Error),

    /// Git error from fixture-git
    #[error(transparent)]
    Git(#[from] fixture_git::Error),
}

impl Error {
    /// Classify this error, looking through step wrappers.
    pub fn kind(&self) -> FailureKind {
        use fixture_git::Error as GitError;

        match self {
            Self::StepFailed { source, .. } => source.kind(),
            Self::UnsafeTarget { .. } | Self::Fs(_) => FailureKind::Filesystem,
            Self::Git(git) => match git {
                GitError::Init { .. }
                | GitError::Open { .. }
                | GitError::RenameBranch { .. }
                | GitError::Bare { .. } => FailureKind::Initialization,
                GitError::Status { .. } => FailureKind::Status,
                GitError::Staging { .. } => FailureKind::Staging,
                GitError::Commit { .. }
                | GitError::Signature { .. }
                | GitError::FractionalTime { .. }
                | GitError::NothingToCommit { .. } => FailureKind::Commit,
                GitError::Checkout { .. }
                | GitError::BranchNotFound { .. }
                | GitError::InvalidBranchName { .. } => FailureKind::Checkout,
                GitError::HeadLookup { .. } | GitError::Git(_) => FailureKind::HeadLookup,
                GitError::Fs(_) => FailureKind::Filesystem,
            },
        }
    }

    /// 1-based index of the failed step, if the failure happened inside one.
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::StepFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}
