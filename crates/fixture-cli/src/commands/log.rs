//! Log command implementation

use std::path::Path;

use colored::Colorize;

use fixture_fs::NormalizedPath;
use fixture_git::{GitEngine, GitRepository, commits};

use crate::error::{CliError, Result};

/// Print each branch's first-parent history, newest first.
pub fn run_log(target: &Path, branch: Option<&str>) -> Result<()> {
    let repo = GitRepository::open(&NormalizedPath::new(target))?;
    let head = repo.head()?;

    let names: Vec<String> = match branch {
        Some(name) => vec![name.to_string()],
        None => commits::list_branches(repo.inner())?
            .into_iter()
            .map(|tip| tip.name)
            .collect(),
    };

    if names.is_empty() {
        return Err(CliError::user(format!(
            "No commits found in {}",
            target.display()
        )));
    }

    for name in names {
        let marker = if name == head.branch() { "*" } else { " " };
        println!("{} {}", marker.green().bold(), name.cyan().bold());

        for commit in commits::branch_history(repo.inner(), &name)? {
            println!(
                "    {} {} {} {}",
                commit.short_id.yellow(),
                commit.author.when.format("%Y-%m-%d"),
                format!("<{}>", commit.author.email).dimmed(),
                commit.summary
            );
        }
    }

    Ok(())
}
