//! Replay semantics checked against a scripted in-memory engine

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use chrono::{TimeZone, Utc};
use fixture_core::{
    CommitStep, EmptyCommitPolicy, FailureKind, HistoryScript, Step, replay,
};
use fixture_fs::NormalizedPath;
use fixture_git::{
    ChangeKind, CheckoutOutcome, Error as GitError, GitEngine, HeadInfo, Oid, Signature,
    StagedBlob, StatusEntry,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Checkout,
    Add,
    Commit,
}

#[derive(Default)]
struct State {
    head: String,
    branches: HashMap<String, Oid>,
    committed: BTreeMap<String, Vec<u8>>,
    staged: BTreeMap<String, Vec<u8>>,
    calls: Vec<String>,
    commits: usize,
}

/// Engine that keeps refs in memory and reads file content from a real
/// directory, failing the `nth` call of a chosen operation on request.
struct FakeEngine {
    workdir: NormalizedPath,
    fail: Option<(Op, usize)>,
    state: RefCell<State>,
    counters: RefCell<HashMap<&'static str, usize>>,
}

impl FakeEngine {
    fn new(temp: &TempDir) -> Self {
        Self {
            workdir: NormalizedPath::new(temp.path()),
            fail: None,
            state: RefCell::new(State {
                head: "master".into(),
                ..State::default()
            }),
            counters: RefCell::new(HashMap::new()),
        }
    }

    fn failing(mut self, op: Op, nth: usize) -> Self {
        self.fail = Some((op, nth));
        self
    }

    fn should_fail(&self, op: Op) -> bool {
        let key = match op {
            Op::Checkout => "checkout",
            Op::Add => "add",
            Op::Commit => "commit",
        };
        let mut counters = self.counters.borrow_mut();
        let count = counters.entry(key).or_insert(0);
        *count += 1;
        self.fail == Some((op, *count))
    }

    fn working_files(&self) -> BTreeMap<String, Vec<u8>> {
        std::fs::read_dir(self.workdir.to_native())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| {
                (
                    e.file_name().to_string_lossy().into_owned(),
                    std::fs::read(e.path()).unwrap(),
                )
            })
            .collect()
    }

    fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn injected() -> git2::Error {
        git2::Error::from_str("injected failure")
    }
}

impl GitEngine for FakeEngine {
    fn workdir(&self) -> &NormalizedPath {
        &self.workdir
    }

    fn rename_branch(&self, from: &str, to: &str) -> fixture_git::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.head == from {
            state.head = to.to_string();
        }
        Ok(())
    }

    fn status(&self) -> fixture_git::Result<Vec<StatusEntry>> {
        let state = self.state.borrow();
        Ok(self
            .working_files()
            .into_iter()
            .filter(|(path, content)| {
                let known = state.staged.get(path).or_else(|| state.committed.get(path));
                known != Some(content)
            })
            .map(|(path, _)| StatusEntry {
                path,
                kind: ChangeKind::Untracked,
            })
            .collect())
    }

    fn add(&self, path: &str) -> fixture_git::Result<StagedBlob> {
        if self.should_fail(Op::Add) {
            return Err(GitError::Staging {
                path: path.to_string(),
                source: Self::injected(),
            });
        }
        let content = std::fs::read(self.workdir.join(path).to_native()).unwrap();
        let id = Oid::hash_object(git2::ObjectType::Blob, &content).unwrap();
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("add {path}"));
        state.staged.insert(path.to_string(), content);
        Ok(StagedBlob {
            path: path.to_string(),
            id: Some(id),
        })
    }

    fn commit(
        &self,
        message: &str,
        _author: &Signature,
        _committer: &Signature,
        allow_empty: bool,
    ) -> fixture_git::Result<Oid> {
        let mut state = self.state.borrow_mut();
        if self.should_fail(Op::Commit) {
            return Err(GitError::Commit {
                branch: state.head.clone(),
                source: Self::injected(),
            });
        }
        if state.staged.is_empty() && !allow_empty {
            return Err(GitError::NothingToCommit {
                branch: state.head.clone(),
            });
        }
        state.commits += 1;
        let id = Oid::hash_object(
            git2::ObjectType::Commit,
            format!("{message}{}", state.commits).as_bytes(),
        )
        .unwrap();
        let staged = std::mem::take(&mut state.staged);
        state.committed.extend(staged);
        let head = state.head.clone();
        state.branches.insert(head, id);
        state.calls.push(format!("commit {message}"));
        Ok(id)
    }

    fn head(&self) -> fixture_git::Result<HeadInfo> {
        let state = self.state.borrow();
        Ok(HeadInfo {
            reference: format!("refs/heads/{}", state.head),
            target: state.branches.get(&state.head).copied(),
        })
    }

    fn checkout(&self, branch: &str, create: bool) -> fixture_git::Result<CheckoutOutcome> {
        if self.should_fail(Op::Checkout) {
            return Err(GitError::Checkout {
                branch: branch.to_string(),
                source: Self::injected(),
            });
        }
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("checkout {branch}"));
        if state.head == branch {
            return Ok(CheckoutOutcome::AlreadyCurrent);
        }
        let outcome = match state.branches.get(branch) {
            Some(tip) => CheckoutOutcome::Switched { tip: *tip },
            None if create => {
                let fork_point = state.branches.get(&state.head).copied();
                if let Some(tip) = fork_point {
                    state.branches.insert(branch.to_string(), tip);
                }
                CheckoutOutcome::Created { fork_point }
            }
            None => {
                return Err(GitError::BranchNotFound {
                    name: branch.to_string(),
                });
            }
        };
        state.head = branch.to_string();
        Ok(outcome)
    }
}

fn sig() -> Signature {
    Signature::new("Aleks", "af@ncr.com", Utc.with_ymd_and_hms(1978, 1, 1, 0, 0, 0).unwrap())
}

fn three_step_script() -> HistoryScript {
    HistoryScript::new([
        Step::Commit(CommitStep::new("master", "one", sig()).write("a.txt", "a")),
        Step::Commit(CommitStep::new("trunk", "two", sig()).write("b.txt", "b")),
        Step::Commit(CommitStep::new("trunk", "three", sig()).write("c.txt", "c")),
    ])
}

#[test]
fn test_replay_runs_steps_in_order() {
    let temp = TempDir::new().unwrap();
    let engine = FakeEngine::new(&temp);

    let records = replay(&engine, &three_step_script(), EmptyCommitPolicy::Reject).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(
        engine.calls(),
        vec![
            "checkout master",
            "add a.txt",
            "commit one",
            "checkout trunk",
            "add b.txt",
            "commit two",
            "checkout trunk",
            "add c.txt",
            "commit three",
        ]
    );
    assert_eq!(records[1].parent, Some(records[0].id));
    assert_eq!(records[2].parent, Some(records[1].id));
}

#[rstest]
#[case(Op::Add, 2, 2, FailureKind::Staging)]
#[case(Op::Commit, 1, 1, FailureKind::Commit)]
#[case(Op::Checkout, 3, 3, FailureKind::Checkout)]
fn test_replay_halts_on_first_failure(
    #[case] op: Op,
    #[case] nth: usize,
    #[case] failed_step: usize,
    #[case] kind: FailureKind,
) {
    let temp = TempDir::new().unwrap();
    let engine = FakeEngine::new(&temp).failing(op, nth);

    let err = replay(&engine, &three_step_script(), EmptyCommitPolicy::Reject).unwrap_err();

    assert_eq!(err.step(), Some(failed_step));
    assert_eq!(err.kind(), kind);
    assert!(err.to_string().contains(&format!("Step {failed_step}")));

    let commits = engine
        .calls()
        .iter()
        .filter(|c| c.starts_with("commit"))
        .count();
    assert_eq!(commits, failed_step - 1, "no commit after the failing step");
}

#[test]
fn test_staging_failure_never_commits_partial_step() {
    let temp = TempDir::new().unwrap();
    let engine = FakeEngine::new(&temp).failing(Op::Add, 2);
    let script = HistoryScript::new([Step::Commit(
        CommitStep::new("master", "two files", sig())
            .write("a.txt", "a")
            .write("b.txt", "b"),
    )]);

    let err = replay(&engine, &script, EmptyCommitPolicy::Reject).unwrap_err();

    assert_eq!(err.kind(), FailureKind::Staging);
    assert!(engine.head().unwrap().is_unborn());
}

#[test]
fn test_empty_step_rejected_by_default() {
    let temp = TempDir::new().unwrap();
    let engine = FakeEngine::new(&temp);
    let script = HistoryScript::new([
        Step::Commit(CommitStep::new("master", "one", sig()).write("a.txt", "a")),
        Step::Commit(CommitStep::new("master", "nothing", sig())),
    ]);

    let err = replay(&engine, &script, EmptyCommitPolicy::Reject).unwrap_err();

    assert_eq!(err.step(), Some(2));
    assert_eq!(err.kind(), FailureKind::Commit);
}

#[test]
fn test_empty_step_allowed_by_policy() {
    let temp = TempDir::new().unwrap();
    let engine = FakeEngine::new(&temp);
    let script = HistoryScript::new([
        Step::Commit(CommitStep::new("master", "one", sig()).write("a.txt", "a")),
        Step::Commit(CommitStep::new("master", "nothing", sig())),
    ]);

    let records = replay(&engine, &script, EmptyCommitPolicy::Allow).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records[1].staged.is_empty());
}

#[test]
fn test_missing_branch_without_create_fails_checkout() {
    let temp = TempDir::new().unwrap();
    let engine = FakeEngine::new(&temp);
    let mut step = CommitStep::new("elsewhere", "one", sig()).write("a.txt", "a");
    step.create_branch = false;

    let err = replay(&engine, &HistoryScript::new([Step::Commit(step)]), EmptyCommitPolicy::Reject)
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Checkout);
    assert_eq!(engine.calls(), vec!["checkout elsewhere"]);
}
