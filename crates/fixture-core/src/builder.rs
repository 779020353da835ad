//! Script replay against a fresh repository

use fixture_fs::NormalizedPath;
use fixture_git::GitEngine;

use crate::{
    BuildConfig, CommitRecord, EmptyCommitPolicy, Error, Result, branch, commit, initializer,
    script::{HistoryScript, Step},
    worktree,
};

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Resolved root of the fixture repository
    pub root: NormalizedPath,

    /// One record per script step, in script order
    pub commits: Vec<CommitRecord>,
}

/// Builds a fixture repository from a [`HistoryScript`].
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    config: BuildConfig,
}

impl HistoryBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Wipe the target, initialize a repository and replay `script`.
    ///
    /// Stops at the first failing step and returns its error; the target is
    /// left as the failure found it.
    pub fn build(&self, script: &HistoryScript) -> Result<BuildReport> {
        let engine = initializer::initialize(&self.config)?;
        let commits = replay(&engine, script, self.config.empty_commits)?;

        tracing::info!(
            path = %engine.workdir(),
            steps = script.steps.len(),
            branches = ?script.branches(),
            "Fixture complete"
        );

        Ok(BuildReport {
            root: engine.workdir().clone(),
            commits,
        })
    }
}

/// Apply every step of `script` in order, halting on the first failure.
///
/// The returned error wraps the cause in [`Error::StepFailed`] with the
/// 1-based step index.
pub fn replay<E: GitEngine>(
    engine: &E,
    script: &HistoryScript,
    empty_commits: EmptyCommitPolicy,
) -> Result<Vec<CommitRecord>> {
    let mut records = Vec::with_capacity(script.steps.len());

    for (offset, step) in script.steps.iter().enumerate() {
        let index = offset + 1;
        tracing::debug!(step = index, branch = %step.branch(), "Applying step");

        let record = apply_step(engine, step, empty_commits).map_err(|source| {
            tracing::error!(step = index, branch = %step.branch(), error = %source, "Step failed");
            Error::StepFailed {
                index,
                branch: step.branch().to_string(),
                source: Box::new(source),
            }
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Checkout, write, then stage and commit for one step.
pub fn apply_step<E: GitEngine>(
    engine: &E,
    step: &Step,
    empty_commits: EmptyCommitPolicy,
) -> Result<CommitRecord> {
    match step {
        Step::Commit(step) => {
            branch::switch_branch(engine, &step.branch, step.create_branch)?;
            for file in &step.files {
                worktree::write_file(engine.workdir(), &file.path, file.content.as_bytes())?;
            }
            commit::stage_and_commit(
                engine,
                &step.message,
                &step.author,
                step.committer(),
                empty_commits,
            )
        }
    }
}
