//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Script entries name files with forward slashes regardless of platform;
/// conversion to a native path happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Resolve a relative path against the current directory.
    ///
    /// The path does not need to exist.
    pub fn absolute(&self) -> Result<Self> {
        let native = self.to_native();
        if native.is_absolute() {
            return Ok(self.clone());
        }
        let cwd = std::env::current_dir().map_err(|e| Error::io(&native, e))?;
        Ok(Self::new(cwd.join(native)))
    }
}

/// Check that `rel` names a file strictly inside a working tree.
///
/// Rejects empty paths, absolute paths, `.` / `..` components and anything
/// under the `.git` metadata directory.
pub fn validate_worktree_path(rel: &str) -> Result<()> {
    let normalized = rel.replace('\\', "/");
    let invalid = |reason: &str| Error::InvalidPath {
        path: rel.to_string(),
        reason: reason.to_string(),
    };

    if normalized.is_empty() {
        return Err(invalid("path is empty"));
    }
    if normalized.starts_with('/') || Path::new(rel).is_absolute() {
        return Err(invalid("path must be relative"));
    }

    let mut components = normalized.split('/');
    if components.clone().next() == Some(".git") {
        return Err(invalid("path points into repository metadata"));
    }
    if components.any(|c| c.is_empty() || c == "." || c == "..") {
        return Err(invalid("path contains empty, '.' or '..' components"));
    }

    Ok(())
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
