//! Build command implementation

use std::path::Path;

use colored::Colorize;

use fixture_core::{BuildConfig, EmptyCommitPolicy, HistoryBuilder, HistoryScript};
use fixture_fs::{ConfigStore, NormalizedPath};

use crate::error::Result;

/// Load the script at `path`, or the built-in one.
fn load_script(path: Option<&Path>) -> Result<HistoryScript> {
    match path {
        Some(path) => {
            let script = ConfigStore::new().load(&NormalizedPath::new(path))?;
            Ok(script)
        }
        None => Ok(HistoryScript::builtin()),
    }
}

/// Run the build command.
///
/// Wipes `target`, replays the script and prints one line per commit.
pub fn run_build(
    target: &Path,
    script: Option<&Path>,
    initial_branch: &str,
    allow_empty: bool,
) -> Result<()> {
    let script = load_script(script)?;
    let policy = if allow_empty {
        EmptyCommitPolicy::Allow
    } else {
        EmptyCommitPolicy::Reject
    };
    let config = BuildConfig::new(target)
        .with_initial_branch(initial_branch)
        .with_empty_commits(policy);

    println!(
        "{} Building fixture at {} ({} steps)",
        "=>".blue().bold(),
        target.display().to_string().cyan(),
        script.steps.len()
    );

    let report = HistoryBuilder::new(config).build(&script)?;

    for (index, record) in report.commits.iter().enumerate() {
        println!(
            "   {:>2}. {} {} ({} file{})",
            index + 1,
            format!("{:.7}", record.id).yellow(),
            record.branch.cyan(),
            record.staged.len(),
            if record.staged.len() == 1 { "" } else { "s" }
        );
    }

    println!(
        "{} Fixture ready at {}",
        "OK".green().bold(),
        report.root.as_str().yellow()
    );

    Ok(())
}
