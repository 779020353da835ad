//! Fresh repository creation

use fixture_fs::{NormalizedPath, io};
use fixture_git::GitRepository;

use crate::{BuildConfig, Error, Result};

/// Wipe `config.target`, recreate it and initialize an empty repository.
///
/// Destroys anything previously stored at the target. The unborn default
/// branch is renamed to `config.initial_branch`. Nothing is initialized if
/// the wipe fails.
pub fn initialize(config: &BuildConfig) -> Result<GitRepository> {
    let target = NormalizedPath::new(&config.target).absolute()?;
    ensure_safe_target(&target)?;

    let root = io::recreate_dir(&target, config.robustness)?;
    tracing::info!(path = %root, "Created fixture directory");

    let engine = GitRepository::init(&root, &config.initial_branch)?;
    Ok(engine)
}

/// Reject targets whose removal would take unrelated data with it.
fn ensure_safe_target(target: &NormalizedPath) -> Result<()> {
    let unsafe_target = |reason: &str| Error::UnsafeTarget {
        path: target.to_native(),
        reason: reason.to_string(),
    };

    if target.to_native().parent().is_none() {
        return Err(unsafe_target("filesystem root"));
    }
    if target.is_file() {
        return Err(unsafe_target("path is a regular file"));
    }
    if let Ok(cwd) = std::env::current_dir()
        && cwd.starts_with(target.to_native())
    {
        return Err(unsafe_target("path contains the current directory"));
    }

    Ok(())
}
