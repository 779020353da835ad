use fixture_fs::{NormalizedPath, validate_worktree_path};
use proptest::prelude::*;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("/tmp/fixture");
    assert_eq!(base.join("docs\\a.txt").as_str(), "/tmp/fixture/docs/a.txt");
}

#[test]
fn test_extension_of_dotfile_is_none() {
    assert_eq!(NormalizedPath::new("dir/.gitignore").extension(), None);
    assert_eq!(NormalizedPath::new("script.yaml").extension(), Some("yaml"));
}

#[test]
fn test_absolute_keeps_absolute_paths() {
    let path = NormalizedPath::new("/var/fixtures/ccm2");
    assert_eq!(path.absolute().unwrap(), path);
}

#[test]
fn test_absolute_resolves_relative_paths() {
    let path = NormalizedPath::new("relative/target");
    let resolved = path.absolute().unwrap();
    assert!(resolved.to_native().is_absolute());
    assert!(resolved.as_str().ends_with("relative/target"));
}

#[test]
fn test_validate_rejects_absolute_and_empty() {
    assert!(validate_worktree_path("").is_err());
    assert!(validate_worktree_path("/etc/passwd").is_err());
    assert!(validate_worktree_path("a//b").is_err());
}

proptest! {
    #[test]
    fn test_validated_paths_never_escape(s in "[a-z./]{1,20}") {
        if validate_worktree_path(&s).is_ok() {
            prop_assert!(!s.starts_with('/'));
            prop_assert!(!s.split('/').any(|c| c == ".."));
        }
    }

    #[test]
    fn test_normalized_has_no_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));
    }
}
