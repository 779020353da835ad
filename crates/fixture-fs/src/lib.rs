//! Filesystem capability for the fixture builder
//!
//! Provides directory wipe/create, atomic file writes, normalized paths and
//! format-agnostic loading of history scripts.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::{NormalizedPath, validate_worktree_path};
