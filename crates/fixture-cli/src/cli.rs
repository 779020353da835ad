//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// git-fixture - Build git repositories with a known, reproducible history
#[derive(Parser, Debug)]
#[command(name = "git-fixture")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Wipe TARGET and rebuild the fixture history in it
    ///
    /// Everything already stored at TARGET is deleted first.
    ///
    /// Examples:
    ///   git-fixture build /tmp/ccm2
    ///   git-fixture build ./fixture --script history.toml
    Build {
        /// Directory to (re)create
        target: PathBuf,

        /// History script (.toml, .json, .yaml); the built-in script when omitted
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Name for the default branch right after init
        #[arg(long, default_value = "master")]
        initial_branch: String,

        /// Permit steps that commit without any change
        #[arg(long)]
        allow_empty: bool,
    },

    /// Print the built-in history script
    Script {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ScriptFormat::Toml)]
        format: ScriptFormat,
    },

    /// Show the first-parent history of each branch in a built fixture
    Log {
        /// Fixture repository
        target: PathBuf,

        /// Only show this branch
        branch: Option<String>,
    },
}

/// Serialization formats for `script`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Toml,
    Json,
    Yaml,
}

impl From<ScriptFormat> for fixture_fs::Format {
    fn from(format: ScriptFormat) -> Self {
        match format {
            ScriptFormat::Toml => Self::Toml,
            ScriptFormat::Json => Self::Json,
            ScriptFormat::Yaml => Self::Yaml,
        }
    }
}
