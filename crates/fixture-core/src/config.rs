//! Build configuration

use std::path::PathBuf;

use fixture_fs::RobustnessConfig;
use serde::{Deserialize, Serialize};

/// Branch name the built-in script expects the fresh repository to start on.
pub const DEFAULT_INITIAL_BRANCH: &str = "master";

/// What to do when a commit step finds nothing to stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCommitPolicy {
    /// Fail the step with a commit error
    #[default]
    Reject,
    /// Create a commit whose tree equals its parent's
    Allow,
}

impl EmptyCommitPolicy {
    pub fn allows_empty(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Inputs for one fixture build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory to wipe and rebuild; relative paths resolve against the cwd
    pub target: PathBuf,

    /// Name given to the unborn default branch right after `git init`
    #[serde(default = "default_initial_branch")]
    pub initial_branch: String,

    #[serde(default)]
    pub empty_commits: EmptyCommitPolicy,

    #[serde(skip)]
    pub robustness: RobustnessConfig,
}

fn default_initial_branch() -> String {
    DEFAULT_INITIAL_BRANCH.to_string()
}

impl BuildConfig {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            initial_branch: default_initial_branch(),
            empty_commits: EmptyCommitPolicy::default(),
            robustness: RobustnessConfig::default(),
        }
    }

    pub fn with_initial_branch(mut self, branch: impl Into<String>) -> Self {
        self.initial_branch = branch.into();
        self
    }

    pub fn with_empty_commits(mut self, policy: EmptyCommitPolicy) -> Self {
        self.empty_commits = policy;
        self
    }

    pub fn with_robustness(mut self, robustness: RobustnessConfig) -> Self {
        self.robustness = robustness;
        self
    }
}
