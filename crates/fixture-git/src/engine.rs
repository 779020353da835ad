//! Engine trait for the repository operations the history builder drives

use git2::Oid;

use crate::{Result, Signature};
use fixture_fs::NormalizedPath;

/// How a path differs from the last commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Present in the working tree but unknown to the index
    Untracked,
    /// Newly added to the index
    Added,
    Modified,
    Deleted,
    /// File type changed (e.g. file replaced by symlink)
    TypeChange,
}

/// One changed path reported by [`GitEngine::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Path relative to the working tree root, forward slashes
    pub path: String,
    pub kind: ChangeKind,
}

/// Result of staging a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedBlob {
    pub path: String,

    /// Blob id now recorded in the index, `None` when the path was removed
    pub id: Option<Oid>,
}

/// Where HEAD points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadInfo {
    /// Full reference name, e.g. `refs/heads/trunk`
    pub reference: String,

    /// Tip commit, `None` while the branch is unborn
    pub target: Option<Oid>,
}

impl HeadInfo {
    /// Branch name without the `refs/heads/` prefix.
    pub fn branch(&self) -> &str {
        self.reference
            .strip_prefix("refs/heads/")
            .unwrap_or(&self.reference)
    }

    pub fn is_unborn(&self) -> bool {
        self.target.is_none()
    }
}

/// What a checkout did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// HEAD already pointed at the branch; nothing was touched
    AlreadyCurrent,

    /// Switched to an existing branch
    Switched { tip: Oid },

    /// Created a new branch at the previous HEAD commit (`None` if HEAD was unborn)
    Created { fork_point: Option<Oid> },
}

/// Repository operations consumed by the history builder.
///
/// Implementations are bound to one repository and one working tree.
/// Every method blocks until the underlying store has been updated.
pub trait GitEngine {
    /// Root of the working tree
    fn workdir(&self) -> &NormalizedPath;

    /// Rename branch `from` to `to`, following HEAD if it pointed at `from`.
    ///
    /// Works on unborn branches, where only HEAD's symbolic target changes.
    fn rename_branch(&self, from: &str, to: &str) -> Result<()>;

    /// Paths that differ from the last commit, sorted by path.
    fn status(&self) -> Result<Vec<StatusEntry>>;

    /// Stage one path (or its removal) into the index.
    fn add(&self, path: &str) -> Result<StagedBlob>;

    /// Commit the index onto the current branch and advance it.
    ///
    /// The current tip becomes the sole parent; an unborn branch produces a
    /// root commit. When `allow_empty` is false a commit whose tree equals
    /// its parent's is refused with [`Error::NothingToCommit`](crate::Error::NothingToCommit).
    fn commit(
        &self,
        message: &str,
        author: &Signature,
        committer: &Signature,
        allow_empty: bool,
    ) -> Result<Oid>;

    fn head(&self) -> Result<HeadInfo>;

    /// Make `branch` the current HEAD.
    ///
    /// Asking for the branch HEAD already names (born or unborn) is a no-op.
    /// An existing branch is checked out, aligning tracked files with its tip
    /// and leaving untracked files alone. A missing branch is created at the
    /// current HEAD commit when `create` is set, otherwise it is an error.
    fn checkout(&self, branch: &str, create: bool) -> Result<CheckoutOutcome>;
}
