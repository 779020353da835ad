//! Git capability for the fixture builder
//!
//! Wraps `git2` behind the narrow [`GitEngine`] surface the history engine
//! needs: status, staging, commit, HEAD lookup, checkout and branch rename.
//! Repository creation and opening live on [`GitRepository`].

pub mod commits;
pub mod engine;
pub mod error;
pub mod repository;
pub mod signature;

pub use commits::{BranchTip, CommitInfo};
pub use engine::{ChangeKind, CheckoutOutcome, GitEngine, HeadInfo, StagedBlob, StatusEntry};
pub use error::{Error, Result};
pub use git2::Oid;
pub use repository::GitRepository;
pub use signature::Signature;
