//! [`TestTarget`] temporary build directories.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory with a not-yet-existing fixture target inside it.
///
/// Building into a child of the temp dir exercises the wipe-and-create path
/// the same way a real run does.
///
/// # Example
///
/// ```rust,no_run
/// use fixture_test_utils::TestTarget;
///
/// let target = TestTarget::new();
/// assert!(!target.path().exists());
/// ```
pub struct TestTarget {
    temp_dir: TempDir,
    target: PathBuf,
}

impl Default for TestTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTarget {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("TestTarget::new: failed to create temp dir");
        let target = temp_dir.path().join("fixture");
        Self { temp_dir, target }
    }

    /// Path the fixture should be built at.
    pub fn path(&self) -> &Path {
        &self.target
    }

    /// The enclosing temporary directory.
    pub fn parent(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Assert that `rel` exists inside the target.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.target.join(rel);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does **not** exist inside the target.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full_path = self.target.join(rel);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
