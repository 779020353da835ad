//! Deterministic commit-graph construction
//!
//! Replays a [`HistoryScript`] against a freshly initialized repository so
//! that the resulting branches, parent links, trees and signatures are exactly
//! the ones the script describes.
//!
//! # Architecture
//!
//! ```text
//!                  HistoryBuilder
//!                        |
//!     +-----------+------+------+-------------+
//!     |           |             |             |
//! initializer   branch      worktree       commit
//!     |           |             |             |
//!     +-----------+-- fixture-git / fixture-fs +
//! ```
//!
//! # Example
//!
//! ```no_run
//! use fixture_core::{BuildConfig, HistoryBuilder, HistoryScript};
//!
//! fn example() -> fixture_core::Result<()> {
//!     let config = BuildConfig::new("/tmp/fixture");
//!     let report = HistoryBuilder::new(config).build(&HistoryScript::builtin())?;
//!     println!("{} commits", report.commits.len());
//!     Ok(())
//! }
//! ```

pub mod branch;
pub mod builder;
pub mod commit;
pub mod config;
pub mod error;
pub mod initializer;
pub mod script;
pub mod worktree;

pub use builder::{BuildReport, HistoryBuilder, apply_step, replay};
pub use commit::{CommitRecord, stage_and_commit};
pub use config::{BuildConfig, EmptyCommitPolicy};
pub use error::{Error, FailureKind, Result};
pub use script::{CommitStep, FileWrite, HistoryScript, Step};
