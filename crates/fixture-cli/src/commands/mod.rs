//! Command implementations for the git-fixture CLI

mod build;
mod log;
mod script;

pub use build::run_build;
pub use log::run_log;
pub use script::run_script;
