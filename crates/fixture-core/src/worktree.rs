//! Working tree mutation

use fixture_fs::{NormalizedPath, io, validate_worktree_path};

use crate::Result;

/// Create or overwrite `rel` under `workdir` with `content`.
///
/// Nothing is staged; the change only shows up in the next status.
pub fn write_file(workdir: &NormalizedPath, rel: &str, content: &[u8]) -> Result<()> {
    validate_worktree_path(rel)?;
    let path = workdir.join(rel);
    io::write_atomic(&path, content)?;
    tracing::debug!(path = %path, bytes = content.len(), "Wrote working tree file");
    Ok(())
}
