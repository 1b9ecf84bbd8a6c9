use std::path::Path;

use super::*;
use crate::scanner::ExtensionFilter;
use tempfile::TempDir;

struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    fn should_include(&self, _path: &Path) -> bool {
        true
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

#[test]
fn scanner_finds_files_in_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/pkg/main.py", "print(1)");

    let scanner = DirectoryScanner::new(AcceptAllFilter);
    let files = scanner.scan(temp_dir.path()).unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("src/pkg/main.py"));
}

#[test]
fn scanner_prunes_git_metadata() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), ".git/hooks/pre-commit.py", "x      = 1");
    write(temp_dir.path(), ".git/config", "");
    write(temp_dir.path(), "app.py", "");

    let scanner = DirectoryScanner::new(AcceptAllFilter);
    let files = scanner.scan(temp_dir.path()).unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("app.py"));
}

#[test]
fn scanner_keeps_git_prefixed_names() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), ".github/scripts/release.py", "");
    write(temp_dir.path(), ".gitignore", "");

    let scanner = DirectoryScanner::new(AcceptAllFilter);
    let files = scanner.scan(temp_dir.path()).unwrap();

    assert_eq!(files.len(), 2);
}

#[test]
fn scanner_respects_extension_filter() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.py", "");
    write(temp_dir.path(), "b.js", "");
    write(temp_dir.path(), "README.md", "");
    write(temp_dir.path(), "docs/c.py", "");

    let scanner = DirectoryScanner::new(ExtensionFilter::new(&[".py"]).unwrap());
    let mut files = scanner.scan(temp_dir.path()).unwrap();
    files.sort();

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("a.py"));
    assert!(files[1].ends_with("docs/c.py"));
}

#[test]
fn scanner_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let scanner = DirectoryScanner::new(AcceptAllFilter);
    assert!(scanner.scan(temp_dir.path()).unwrap().is_empty());
}

#[test]
fn scanner_rejects_missing_root() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("gone");

    let scanner = DirectoryScanner::new(AcceptAllFilter);
    assert!(scanner.scan(&missing).is_err());
}

#[test]
fn directories_matching_filter_are_not_returned() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir_all(temp_dir.path().join("weird.py")).unwrap();

    let scanner = DirectoryScanner::new(ExtensionFilter::new(&[".py"]).unwrap());
    assert!(scanner.scan(temp_dir.path()).unwrap().is_empty());
}
