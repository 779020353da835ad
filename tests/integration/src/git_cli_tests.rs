//! Cross-checks built fixtures with the stock `git` binary.
//!
//! The engine only ever talks to libgit2; these tests make sure the result
//! is also what command-line git, the consumer of most fixtures, sees.

use chrono::Datelike;
use fixture_core::{BuildConfig, HistoryBuilder, HistoryScript, Step};
use fixture_test_utils::TestTarget;
use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::Command;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run `git` in `dir` and return trimmed stdout.
fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    assert!(
        output.status.success(),
        "`git {args:?}` failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn build(script: &HistoryScript) -> TestTarget {
    let target = TestTarget::new();
    HistoryBuilder::new(BuildConfig::new(target.path()))
        .build(script)
        .expect("script should build");
    target
}

fn build_builtin() -> TestTarget {
    build(&HistoryScript::builtin())
}

/// The built-in script moved a century forward.
///
/// Command-line git rejects negative timestamps as overflowing dates, so the
/// 1926 commit of the built-in script can never pass `git fsck`.
fn post_epoch_builtin() -> HistoryScript {
    let mut script = HistoryScript::builtin();
    for step in &mut script.steps {
        let Step::Commit(step) = step;
        let year = step.author.when.year();
        step.author.when = step.author.when.with_year(year + 100).unwrap();
    }
    script
}

#[test]
fn test_fsck_accepts_fixture_objects() {
    if !git_available() {
        eprintln!("Skipping test: git binary not found");
        return;
    }
    let target = build(&post_epoch_builtin());

    git(target.path(), &["fsck", "--strict", "--no-dangling"]);
}

#[test]
fn test_git_log_matches_script() {
    if !git_available() {
        eprintln!("Skipping test: git binary not found");
        return;
    }
    let target = build_builtin();

    let log = git(target.path(), &["log", "--format=%an <%ae> %s", "trunk"]);
    assert_eq!(
        log.lines().collect::<Vec<_>>(),
        vec![
            "Aleks <af@ncr.com> This is commit on trunk 2",
            "Aleks <af@ncr.com> This is commit on Trunk",
            "Aleks <af@ncr.com> This is commit on master",
        ]
    );

    let release = git(target.path(), &["log", "--format=%at", "-1", "v1.7.0"]);
    assert_eq!(release, "189302400");
}

#[test]
fn test_git_reads_pre_epoch_commit_time() {
    if !git_available() {
        eprintln!("Skipping test: git binary not found");
        return;
    }
    let target = build_builtin();

    let raw = git(target.path(), &["cat-file", "-p", "trunk"]);
    assert!(
        raw.contains("\nauthor Aleks <af@ncr.com> -1388534400 +0000\n"),
        "unexpected commit object:\n{raw}"
    );
    assert!(
        raw.contains("\ncommitter Aleks <af@ncr.com> -1388534400 +0000\n"),
        "unexpected commit object:\n{raw}"
    );
    assert!(raw.ends_with("This is commit on trunk 2"));
}

#[test]
fn test_git_sees_fork_points() {
    if !git_available() {
        eprintln!("Skipping test: git binary not found");
        return;
    }
    let target = build_builtin();
    let dir = target.path();

    let trunk_root = git(dir, &["rev-parse", "trunk~1"]);
    assert_eq!(git(dir, &["merge-base", "trunk", "v1.7.0"]), trunk_root);
    assert_eq!(git(dir, &["rev-parse", "v1.7.0^"]), trunk_root);
    assert_eq!(git(dir, &["rev-parse", "trunk~2"]), git(dir, &["rev-parse", "master"]));
    assert_eq!(git(dir, &["rev-list", "--count", "v1.7.0"]), "3");
}

#[test]
fn test_git_status_is_clean_on_trunk() {
    if !git_available() {
        eprintln!("Skipping test: git binary not found");
        return;
    }
    let target = build_builtin();

    assert_eq!(git(target.path(), &["symbolic-ref", "--short", "HEAD"]), "trunk");
    assert_eq!(git(target.path(), &["status", "--porcelain"]), "");
}
