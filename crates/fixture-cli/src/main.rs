//! git-fixture CLI
//!
//! Builds git repositories with a fixed, reproducible commit graph for
//! testing history-consuming tools.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = execute_command(cli.command) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Build {
            target,
            script,
            initial_branch,
            allow_empty,
        } => commands::run_build(&target, script.as_deref(), &initial_branch, allow_empty),
        Commands::Script { format } => commands::run_script(format.into()),
        Commands::Log { target, branch } => commands::run_log(&target, branch.as_deref()),
    }
}
