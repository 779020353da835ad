//! Commit history inspection for built fixtures.

use std::collections::BTreeMap;

use git2::{BranchType, ObjectType, Oid, Repository, TreeWalkMode, TreeWalkResult};

use crate::{Error, Result, Signature};

/// Information about a single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: Oid,

    /// Short commit hash (7 characters)
    pub short_id: String,

    /// First line of the commit message
    pub summary: String,

    pub author: Signature,
    pub committer: Signature,

    /// Parent ids in order; empty for a root commit
    pub parents: Vec<Oid>,
}

impl CommitInfo {
    fn from_commit(commit: &git2::Commit<'_>) -> Self {
        let summary = commit
            .message()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        Self {
            id: commit.id(),
            short_id: format!("{:.7}", commit.id()),
            summary,
            author: Signature::from_git2(&commit.author()),
            committer: Signature::from_git2(&commit.committer()),
            parents: commit.parent_ids().collect(),
        }
    }
}

/// A local branch and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTip {
    pub name: String,
    pub target: Oid,
}

/// List local branches sorted by name.
///
/// Unborn branches have no reference yet and are therefore not listed.
pub fn list_branches(repo: &Repository) -> Result<Vec<BranchTip>> {
    let mut tips = Vec::new();
    for item in repo.branches(Some(BranchType::Local))? {
        let (branch, _) = item?;
        let Some(name) = branch.name()? else {
            continue;
        };
        let Some(target) = branch.get().target() else {
            continue;
        };
        tips.push(BranchTip {
            name: name.to_string(),
            target,
        });
    }
    tips.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tips)
}

/// Walk first parents from the tip of `branch`, newest first.
///
/// Order follows the parent chain rather than timestamps, since fixture
/// dates are allowed to run backwards.
pub fn branch_history(repo: &Repository, branch: &str) -> Result<Vec<CommitInfo>> {
    let tip = repo
        .find_branch(branch, BranchType::Local)
        .map_err(|_| Error::BranchNotFound {
            name: branch.to_string(),
        })?
        .get()
        .peel_to_commit()?;

    let mut history = Vec::new();
    let mut current = Some(tip);
    while let Some(commit) = current {
        history.push(CommitInfo::from_commit(&commit));
        current = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?),
        };
    }
    Ok(history)
}

/// Every blob in the commit's tree, keyed by slash-separated path.
pub fn tree_files(repo: &Repository, id: Oid) -> Result<BTreeMap<String, Vec<u8>>> {
    let tree = repo.find_commit(id)?.tree()?;
    let mut entries = Vec::new();

    tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
        if entry.kind() == Some(ObjectType::Blob)
            && let Some(name) = entry.name()
        {
            entries.push((format!("{dir}{name}"), entry.id()));
        }
        TreeWalkResult::Ok
    })?;

    let mut files = BTreeMap::new();
    for (path, blob_id) in entries {
        let blob = repo.find_blob(blob_id)?;
        files.insert(path, blob.content().to_vec());
    }
    Ok(files)
}
