//! Shared test utilities for the fixture builder workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] - read-only inspection of built repositories
//! - [`target`] - [`TestTarget`] temporary build directories

pub mod git;
pub mod target;

pub use target::TestTarget;
