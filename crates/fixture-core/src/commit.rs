//! Staging every pending change and committing it

use fixture_git::{GitEngine, Oid, Signature, StagedBlob};

use crate::{EmptyCommitPolicy, Result};

/// A commit created by [`stage_and_commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: Oid,
    pub branch: String,

    /// Previous branch tip, `None` for a root commit
    pub parent: Option<Oid>,

    /// Paths staged for this commit, with their blob ids
    pub staged: Vec<StagedBlob>,
}

/// Stage every changed path, commit on the current branch and advance it.
///
/// A failure to stage any single path aborts before the commit is written.
pub fn stage_and_commit<E: GitEngine>(
    engine: &E,
    message: &str,
    author: &Signature,
    committer: &Signature,
    empty_commits: EmptyCommitPolicy,
) -> Result<CommitRecord> {
    let changes = engine.status()?;
    let head = engine.head()?;
    let branch = head.branch().to_string();
    let parent = head.target;

    if changes.is_empty() && !empty_commits.allows_empty() {
        return Err(fixture_git::Error::NothingToCommit { branch }.into());
    }

    let mut staged = Vec::with_capacity(changes.len());
    for change in &changes {
        let blob = engine.add(&change.path)?;
        tracing::debug!(
            path = %engine.workdir().join(&blob.path),
            kind = ?change.kind,
            blob = ?blob.id,
            "Staged path"
        );
        staged.push(blob);
    }

    let id = engine.commit(message, author, committer, empty_commits.allows_empty())?;

    let head = engine.head()?;
    tracing::debug!(head = %head.reference, hash = ?head.target, "HEAD after commit");
    tracing::info!(branch = %branch, commit = %format!("{id:.7}"), files = staged.len(), "Created commit");

    Ok(CommitRecord {
        id,
        branch,
        parent,
        staged,
    })
}
