//! Declarative history scripts

use chrono::{DateTime, NaiveDate, Utc};
use fixture_git::Signature;
use serde::{Deserialize, Serialize};

/// One file to create or overwrite before committing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWrite {
    /// Path relative to the working tree root
    pub path: String,
    pub content: String,
}

impl FileWrite {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Check out a branch, write files, then commit everything pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStep {
    pub branch: String,

    /// Create the branch at the current HEAD when it does not exist yet
    #[serde(default = "default_create_branch")]
    pub create_branch: bool,

    #[serde(default)]
    pub files: Vec<FileWrite>,

    pub message: String,
    pub author: Signature,

    /// Defaults to the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committer: Option<Signature>,
}

fn default_create_branch() -> bool {
    true
}

impl CommitStep {
    pub fn new(branch: impl Into<String>, message: impl Into<String>, author: Signature) -> Self {
        Self {
            branch: branch.into(),
            create_branch: true,
            files: Vec::new(),
            message: message.into(),
            author,
            committer: None,
        }
    }

    pub fn write(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push(FileWrite::new(path, content));
        self
    }

    pub fn committer(&self) -> &Signature {
        self.committer.as_ref().unwrap_or(&self.author)
    }
}

/// A single entry of a history script.
///
/// Serialized with a `kind` tag, e.g. `kind = "commit"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Commit(CommitStep),
}

impl Step {
    /// Branch the step operates on.
    pub fn branch(&self) -> &str {
        match self {
            Self::Commit(step) => &step.branch,
        }
    }
}

impl From<CommitStep> for Step {
    fn from(step: CommitStep) -> Self {
        Self::Commit(step)
    }
}

/// Ordered list of steps replayed verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryScript {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl HistoryScript {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Branch names in order of first appearance.
    pub fn branches(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for step in &self.steps {
            if !names.contains(&step.branch()) {
                names.push(step.branch());
            }
        }
        names
    }

    /// The release-branch fixture: a root commit on `master`, `trunk` forked
    /// from it, `v1.7.0` forked from trunk's first commit, then a second trunk
    /// commit. Dates deliberately run backwards.
    pub fn builtin() -> Self {
        let author = |year| Signature::new("Aleks", "af@ncr.com", new_year(year));

        Self::new([
            Step::Commit(
                CommitStep::new("master", "This is commit on master", author(1978))
                    .write("master.txt", "On branch master"),
            ),
            Step::Commit(
                CommitStep::new("trunk", "This is commit on Trunk", author(1976))
                    .write("trunk.txt", "On branch trunk"),
            ),
            Step::Commit(
                CommitStep::new("v1.7.0", "This is commit on 1.7.0", author(1976))
                    .write("file-1.7.0.txt", "On branch 1.7.0"),
            ),
            Step::Commit(
                CommitStep::new("trunk", "This is commit on trunk 2", author(1926))
                    .write("trunk2.txt", "On branch trunk"),
            ),
        ])
    }
}

/// Midnight UTC on January 1st of `year`.
fn new_year(year: i32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builtin_branch_order() {
        assert_eq!(
            HistoryScript::builtin().branches(),
            vec!["master", "trunk", "v1.7.0"]
        );
    }

    #[test]
    fn test_builtin_dates() {
        let years: Vec<_> = HistoryScript::builtin()
            .steps
            .iter()
            .map(|Step::Commit(step)| step.author.when)
            .collect();
        let expected: Vec<_> = [1978, 1976, 1976, 1926]
            .into_iter()
            .map(|y| Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).unwrap())
            .collect();
        assert_eq!(years, expected);
    }

    #[test]
    fn test_committer_defaults_to_author() {
        let author = Signature::new("A", "a@example.com", new_year(2000));
        let step = CommitStep::new("master", "m", author.clone());
        assert_eq!(step.committer(), &author);
    }
}
