//! Read-only helpers for asserting on the shape of a built repository.
//!
//! These deliberately go straight to `git2` rather than through the crates
//! under test, so a bug in the engine cannot hide itself.

use std::collections::BTreeMap;
use std::path::Path;

use git2::{BranchType, Oid, Repository};

/// Open the repository at `path`.
///
/// # Panics
/// Panics if `path` is not a git repository.
pub fn open(path: &Path) -> Repository {
    Repository::open(path)
        .unwrap_or_else(|e| panic!("open: no repository at {}: {e}", path.display()))
}

/// Tip commit of local branch `name`.
///
/// # Panics
/// Panics if the branch does not exist or is unborn.
pub fn branch_tip(repo: &Repository, name: &str) -> Oid {
    repo.find_branch(name, BranchType::Local)
        .unwrap_or_else(|e| panic!("branch_tip: branch '{name}' missing: {e}"))
        .get()
        .target()
        .unwrap_or_else(|| panic!("branch_tip: branch '{name}' is symbolic"))
}

/// Sorted names of all local branches.
pub fn branch_names(repo: &Repository) -> Vec<String> {
    let mut names: Vec<String> = repo
        .branches(Some(BranchType::Local))
        .expect("branch_names: cannot list branches")
        .map(|item| {
            let (branch, _) = item.expect("branch_names: bad branch entry");
            branch
                .name()
                .expect("branch_names: bad branch name")
                .unwrap_or_default()
                .to_string()
        })
        .collect();
    names.sort();
    names
}

/// Commit ids from `tip` back to the root following every parent link.
///
/// # Panics
/// Panics if a cycle is found or an object is missing.
pub fn ancestry(repo: &Repository, tip: Oid) -> Vec<Oid> {
    let mut seen = Vec::new();
    let mut pending = vec![tip];

    while let Some(id) = pending.pop() {
        if seen.contains(&id) {
            continue;
        }
        let commit = repo
            .find_commit(id)
            .unwrap_or_else(|e| panic!("ancestry: missing commit {id}: {e}"));
        seen.push(id);
        pending.extend(commit.parent_ids());
        assert!(
            seen.len() <= 10_000,
            "ancestry: walked too many commits from {tip}, history is cyclic?"
        );
    }

    seen
}

/// Every file in the commit's tree with its content as UTF-8.
pub fn tree_contents(repo: &Repository, id: Oid) -> BTreeMap<String, String> {
    let tree = repo
        .find_commit(id)
        .and_then(|c| c.tree())
        .unwrap_or_else(|e| panic!("tree_contents: cannot read tree of {id}: {e}"));

    let mut files = BTreeMap::new();
    tree.walk(git2::TreeWalkMode::PreOrder, |dir, entry| {
        if entry.kind() == Some(git2::ObjectType::Blob) {
            let blob = repo.find_blob(entry.id()).expect("tree_contents: missing blob");
            let name = entry.name().unwrap_or_default();
            files.insert(
                format!("{dir}{name}"),
                String::from_utf8_lossy(blob.content()).into_owned(),
            );
        }
        git2::TreeWalkResult::Ok
    })
    .expect("tree_contents: tree walk failed");
    files
}

/// Build a `(path, content)` map for comparison with [`tree_contents`].
pub fn files(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(path, content)| (path.to_string(), content.to_string()))
        .collect()
}
