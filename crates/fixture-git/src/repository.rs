//! `git2`-backed implementation of [`GitEngine`]

use std::path::Path;

use git2::{
    BranchType, Commit, ErrorCode, ObjectType, Oid, Repository, StatusOptions,
    build::CheckoutBuilder,
};

use crate::{
    ChangeKind, CheckoutOutcome, Error, GitEngine, HeadInfo, Result, Signature, StagedBlob,
    StatusEntry,
};
use fixture_fs::NormalizedPath;

/// A non-bare repository together with its working tree.
pub struct GitRepository {
    repo: Repository,
    workdir: NormalizedPath,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("workdir", &self.workdir)
            .finish_non_exhaustive()
    }
}

impl GitRepository {
    /// Initialize an empty repository at `path` and name its unborn default branch.
    ///
    /// `path` must already exist. Whatever default branch name the local git
    /// configuration picks is renamed to `initial_branch`.
    pub fn init(path: &NormalizedPath, initial_branch: &str) -> Result<Self> {
        let repo = Repository::init(path.to_native()).map_err(|source| Error::Init {
            path: path.to_native(),
            source,
        })?;
        let engine = Self::from_repository(repo, path)?;

        let default_branch = engine.head()?.branch().to_string();
        if default_branch != initial_branch {
            engine.rename_branch(&default_branch, initial_branch)?;
        }

        tracing::info!(path = %engine.workdir, branch = %initial_branch, "Initialized repository");
        Ok(engine)
    }

    /// Open an existing repository rooted at `path`.
    pub fn open(path: &NormalizedPath) -> Result<Self> {
        let repo = Repository::open(path.to_native()).map_err(|source| Error::Open {
            path: path.to_native(),
            source,
        })?;
        Self::from_repository(repo, path)
    }

    fn from_repository(repo: Repository, path: &NormalizedPath) -> Result<Self> {
        let workdir = repo
            .workdir()
            .map(|dir| NormalizedPath::new(dir.to_string_lossy().trim_end_matches(['/', '\\'])))
            .ok_or_else(|| Error::Bare {
                path: path.to_native(),
            })?;
        Ok(Self { repo, workdir })
    }

    /// The underlying `git2` repository, for read-only inspection.
    pub fn inner(&self) -> &Repository {
        &self.repo
    }

    /// Commit at HEAD, or `None` while the current branch is unborn.
    pub fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.head()?.target {
            Some(oid) => {
                let commit = self
                    .repo
                    .find_commit(oid)
                    .map_err(|source| Error::HeadLookup { source })?;
                Ok(Some(commit))
            }
            None => Ok(None),
        }
    }

    /// Store a commit object by hand and advance HEAD's branch to it.
    ///
    /// libgit2 serializes signature times as unsigned integers, so a pre-1970
    /// date would come back decades in the future. Here the identity lines
    /// carry the signed seconds, as git itself reads them.
    fn write_signed_commit(
        &self,
        head: &HeadInfo,
        tree: Oid,
        parent: Option<Oid>,
        message: &str,
        author: &Signature,
        committer: &Signature,
    ) -> Result<Oid> {
        let commit_err = |source: git2::Error| Error::Commit {
            branch: head.branch().to_string(),
            source,
        };

        let mut headers = vec![format!("tree {tree}")];
        headers.extend(parent.map(|id| format!("parent {id}")));
        headers.push(format!("author {}", author.to_ident()?));
        headers.push(format!("committer {}", committer.to_ident()?));
        let raw = format!("{}\n\n{message}", headers.join("\n"));

        let oid = self
            .repo
            .odb()
            .and_then(|odb| odb.write(ObjectType::Commit, raw.as_bytes()))
            .map_err(commit_err)?;

        let summary = message.lines().next().unwrap_or_default();
        let reflog = match parent {
            Some(_) => format!("commit: {summary}"),
            None => format!("commit (initial): {summary}"),
        };
        self.repo
            .reference(&head.reference, oid, true, &reflog)
            .map_err(commit_err)?;

        tracing::debug!(commit = %oid, "Wrote commit object with pre-epoch signature");
        Ok(oid)
    }

    fn validate_branch_name(name: &str) -> Result<()> {
        if git2::Branch::name_is_valid(name)? {
            Ok(())
        } else {
            Err(Error::InvalidBranchName {
                name: name.to_string(),
            })
        }
    }
}

impl GitEngine for GitRepository {
    fn workdir(&self) -> &NormalizedPath {
        &self.workdir
    }

    fn rename_branch(&self, from: &str, to: &str) -> Result<()> {
        Self::validate_branch_name(to)?;
        let rename_err = |source: git2::Error| Error::RenameBranch {
            from: from.to_string(),
            to: to.to_string(),
            source,
        };

        match self.repo.find_branch(from, BranchType::Local) {
            Ok(mut branch) => {
                // git_branch_move also repoints HEAD when it targets the branch
                branch.rename(to, false).map_err(rename_err)?;
            }
            Err(e) if e.code() == ErrorCode::NotFound => {
                let head = self.head()?;
                if !(head.is_unborn() && head.branch() == from) {
                    return Err(Error::BranchNotFound {
                        name: from.to_string(),
                    });
                }
                self.repo
                    .set_head(&format!("refs/heads/{to}"))
                    .map_err(rename_err)?;
            }
            Err(e) => return Err(rename_err(e)),
        }

        tracing::debug!(from = %from, to = %to, "Renamed branch");
        Ok(())
    }

    fn status(&self) -> Result<Vec<StatusEntry>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .include_unmodified(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|source| Error::Status { source })?;

        let mut entries = Vec::with_capacity(statuses.len());
        for entry in statuses.iter() {
            let status = entry.status();
            let Some(path) = entry.path() else {
                tracing::warn!("Skipping status entry with a non UTF-8 path");
                continue;
            };

            let kind = if status.is_wt_deleted() || status.is_index_deleted() {
                ChangeKind::Deleted
            } else if status.is_wt_typechange() || status.is_index_typechange() {
                ChangeKind::TypeChange
            } else if status.is_index_new() {
                ChangeKind::Added
            } else if status.is_wt_new() {
                ChangeKind::Untracked
            } else if status.is_wt_modified()
                || status.is_index_modified()
                || status.is_wt_renamed()
                || status.is_index_renamed()
                || status.is_conflicted()
            {
                ChangeKind::Modified
            } else {
                continue;
            };

            entries.push(StatusEntry {
                path: path.to_string(),
                kind,
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn add(&self, path: &str) -> Result<StagedBlob> {
        let staging_err = |source: git2::Error| Error::Staging {
            path: path.to_string(),
            source,
        };

        let mut index = self.repo.index().map_err(staging_err)?;
        let rel = Path::new(path);

        let id = if self.workdir.join(path).exists() {
            index.add_path(rel).map_err(staging_err)?;
            let entry = index.get_path(rel, 0).ok_or_else(|| {
                staging_err(git2::Error::from_str("path missing from index after add"))
            })?;
            Some(entry.id)
        } else {
            index.remove_path(rel).map_err(staging_err)?;
            None
        };

        index.write().map_err(staging_err)?;

        Ok(StagedBlob {
            path: path.to_string(),
            id,
        })
    }

    fn commit(
        &self,
        message: &str,
        author: &Signature,
        committer: &Signature,
        allow_empty: bool,
    ) -> Result<Oid> {
        let head = self.head()?;
        let branch = head.branch().to_string();
        let commit_err = |source: git2::Error| Error::Commit {
            branch: branch.clone(),
            source,
        };

        let mut index = self.repo.index().map_err(commit_err)?;
        let tree_id = index.write_tree().map_err(commit_err)?;
        let tree = self.repo.find_tree(tree_id).map_err(commit_err)?;
        let parent = self.head_commit()?;

        if !allow_empty {
            let unchanged = match &parent {
                Some(parent) => parent.tree_id() == tree_id,
                None => tree.is_empty(),
            };
            if unchanged {
                return Err(Error::NothingToCommit {
                    branch: branch.clone(),
                });
            }
        }

        if author.is_pre_epoch() || committer.is_pre_epoch() {
            let parent = parent.as_ref().map(|c| c.id());
            return self.write_signed_commit(&head, tree_id, parent, message, author, committer);
        }

        let author = author.to_git2()?;
        let committer = committer.to_git2()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &author, &committer, message, &tree, &parents)
            .map_err(commit_err)?;

        Ok(oid)
    }

    fn head(&self) -> Result<HeadInfo> {
        match self.repo.head() {
            Ok(reference) => Ok(HeadInfo {
                reference: reference.name().unwrap_or("HEAD").to_string(),
                target: reference.target(),
            }),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self
                    .repo
                    .find_reference("HEAD")
                    .map_err(|source| Error::HeadLookup { source })?;
                Ok(HeadInfo {
                    reference: head.symbolic_target().unwrap_or("HEAD").to_string(),
                    target: None,
                })
            }
            Err(source) => Err(Error::HeadLookup { source }),
        }
    }

    fn checkout(&self, branch: &str, create: bool) -> Result<CheckoutOutcome> {
        Self::validate_branch_name(branch)?;
        let refname = format!("refs/heads/{branch}");
        if self.head()?.reference == refname {
            return Ok(CheckoutOutcome::AlreadyCurrent);
        }

        let checkout_err = |source: git2::Error| Error::Checkout {
            branch: branch.to_string(),
            source,
        };

        match self.repo.find_branch(branch, BranchType::Local) {
            Ok(existing) => {
                let tip = existing.get().peel_to_commit().map_err(checkout_err)?;

                // Safe mode refuses to clobber local modifications
                let mut opts = CheckoutBuilder::new();
                opts.safe();
                self.repo
                    .checkout_tree(tip.as_object(), Some(&mut opts))
                    .map_err(checkout_err)?;
                self.repo.set_head(&refname).map_err(checkout_err)?;

                tracing::debug!(branch = %branch, tip = %tip.id(), "Switched to existing branch");
                Ok(CheckoutOutcome::Switched { tip: tip.id() })
            }
            Err(e) if e.code() == ErrorCode::NotFound => {
                if !create {
                    return Err(Error::BranchNotFound {
                        name: branch.to_string(),
                    });
                }

                let fork_point = self.head_commit()?;
                if let Some(commit) = &fork_point {
                    self.repo
                        .branch(branch, commit, false)
                        .map_err(checkout_err)?;
                }
                self.repo.set_head(&refname).map_err(checkout_err)?;

                let fork_point = fork_point.map(|c| c.id());
                tracing::debug!(branch = %branch, fork_point = ?fork_point, "Created branch");
                Ok(CheckoutOutcome::Created { fork_point })
            }
            Err(e) => Err(checkout_err(e)),
        }
    }
}
