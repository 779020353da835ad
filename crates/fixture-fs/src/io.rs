//! Directory lifecycle and atomic file writes

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Retry settings for recursive directory removal.
///
/// The default makes a single attempt. [`RobustnessConfig::retrying`] retries
/// transient failures with exponential backoff, for hosts where indexers or
/// antivirus scanners briefly hold handles inside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RobustnessConfig {
    pub initial_interval: Duration,

    /// Zero disables retries
    pub max_elapsed: Duration,
}

impl RobustnessConfig {
    pub fn retrying() -> Self {
        Self {
            initial_interval: Duration::from_millis(20),
            max_elapsed: Duration::from_millis(500),
        }
    }

    pub fn retries(&self) -> bool {
        !self.max_elapsed.is_zero()
    }
}

/// Recursively delete the directory at `path` if present.
///
/// A missing directory is not an error. Permission failures are reported
/// immediately; other failures are retried until `robustness.max_elapsed`.
pub fn wipe_dir(path: &NormalizedPath, robustness: RobustnessConfig) -> Result<()> {
    let native_path = path.to_native();

    let mut attempt = || match fs::remove_dir_all(&native_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(backoff::Error::permanent(e)),
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "Directory removal failed");
            Err(backoff::Error::transient(e))
        }
    };

    let result = if robustness.retries() {
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(robustness.initial_interval)
            .with_max_elapsed_time(Some(robustness.max_elapsed))
            .build();
        backoff::retry(policy, attempt)
    } else {
        attempt()
    };

    result.map_err(|e| {
        let source = match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        };
        Error::Wipe {
            path: native_path.clone(),
            source,
        }
    })?;

    tracing::debug!(path = %path, "Removed directory tree");
    Ok(())
}

/// Create `path` and any missing parents, returning its resolved form.
pub fn ensure_dir(path: &NormalizedPath) -> Result<NormalizedPath> {
    let native_path = path.to_native();
    fs::create_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))?;
    let resolved = dunce::canonicalize(&native_path).map_err(|e| Error::io(&native_path, e))?;
    Ok(NormalizedPath::new(resolved))
}

/// Wipe `path` and recreate it empty.
pub fn recreate_dir(path: &NormalizedPath, robustness: RobustnessConfig) -> Result<NormalizedPath> {
    wipe_dir(path, robustness)?;
    ensure_dir(path)
}

/// Write content atomically to a file with locking.
///
/// Truncate-creates a sibling temp file, writes and syncs it, then renames it
/// over the target. Readers never observe a partially written file.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
