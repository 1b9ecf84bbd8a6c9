use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use super::*;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run git");
    assert!(output.status.success(), "git {args:?} failed: {output:?}");
}

/// Create a source repository with two commits and return its file:// URL.
fn create_source_repo(temp_dir: &TempDir) -> String {
    let repo = temp_dir.path().join("source");
    std::fs::create_dir_all(repo.join("src")).unwrap();

    git(&["init", "-q"], &repo);
    git(&["config", "user.name", "Test User"], &repo);
    git(&["config", "user.email", "test@example.com"], &repo);

    std::fs::write(repo.join("app.py"), "old = 1\n").unwrap();
    git(&["add", "."], &repo);
    git(&["commit", "-q", "-m", "first"], &repo);

    std::fs::write(repo.join("app.py"), "x      = 1\n").unwrap();
    std::fs::write(repo.join("README.md"), "# readme\n").unwrap();
    std::fs::write(repo.join("src/lib.py"), "def f():\n    pass\n").unwrap();
    git(&["add", "."], &repo);
    git(&["commit", "-q", "-m", "second"], &repo);

    format!("file://{}", repo.display())
}

fn commit_count(root: &Path) -> usize {
    let output = Command::new("git")
        .args(["rev-list", "--count", "HEAD"])
        .current_dir(root)
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().parse().unwrap()
}

#[test]
fn working_copy_is_removed_on_drop() {
    let copy = WorkingCopy::create().unwrap();
    let location = copy.location().to_path_buf();
    std::fs::create_dir_all(copy.root()).unwrap();
    std::fs::write(copy.root().join("file.py"), "x").unwrap();

    assert!(location.exists());
    assert!(copy.root().starts_with(&location));
    drop(copy);
    assert!(!location.exists());
}

#[test]
fn working_copy_is_removed_on_unwind() {
    let mut location = None;
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let copy = WorkingCopy::create().unwrap();
        location = Some(copy.location().to_path_buf());
        panic!("scan blew up");
    }));

    assert!(result.is_err());
    assert!(!location.unwrap().exists());
}

#[test]
fn working_copies_are_distinct() {
    let a = WorkingCopy::create().unwrap();
    let b = WorkingCopy::create().unwrap();
    assert_ne!(a.location(), b.location());
    assert_eq!(a.narrowing(), &NarrowingOutcome::NotRequested);
}

#[test]
fn narrowing_outcome_display() {
    assert_eq!(NarrowingOutcome::Applied.to_string(), "applied");
    assert_eq!(
        NarrowingOutcome::Failed("old git".into()).to_string(),
        "failed: old git"
    );
}

#[test]
fn git_cli_shallow_clone_checks_out_latest_revision() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let url = create_source_repo(&temp_dir);

    let copy = GitCliMaterializer::new().materialize(&url, None).unwrap();

    let content = std::fs::read_to_string(copy.root().join("app.py")).unwrap();
    assert_eq!(content, "x      = 1\n");
    assert!(copy.root().join("README.md").exists());
    assert_eq!(commit_count(copy.root()), 1);
    assert_eq!(copy.narrowing(), &NarrowingOutcome::NotRequested);
}

#[test]
fn git_cli_narrowing_keeps_matching_files() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let url = create_source_repo(&temp_dir);
    let narrowing = Narrowing::new(vec!["*.py".to_string()]);

    let copy = GitCliMaterializer::new()
        .materialize(&url, Some(&narrowing))
        .unwrap();

    assert_eq!(copy.narrowing(), &NarrowingOutcome::Applied);
    assert!(copy.root().join("app.py").exists());
    assert!(copy.root().join("src/lib.py").exists());
    assert!(!copy.root().join("README.md").exists());
}

#[test]
fn git_cli_clone_failure_is_an_error_and_cleans_up() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let missing = format!("file://{}", temp_dir.path().join("nope").display());

    let err = GitCliMaterializer::new().materialize(&missing, None).unwrap_err();
    assert_eq!(err.error_type(), "Clone");
}

#[test]
fn git_cli_missing_binary_is_a_clone_error() {
    let materializer = GitCliMaterializer::with_program("ws-audit-no-such-git-binary");
    let err = materializer
        .materialize("https://example.com/a/b.git", None)
        .unwrap_err();
    assert!(err.to_string().contains("failed to run"));
}

#[test]
fn gix_shallow_clone_checks_out_latest_revision() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let url = create_source_repo(&temp_dir);

    let copy = GixMaterializer::new().materialize(&url, None).unwrap();

    let content = std::fs::read_to_string(copy.root().join("app.py")).unwrap();
    assert_eq!(content, "x      = 1\n");
    assert!(copy.root().join("src/lib.py").exists());
    assert_eq!(commit_count(copy.root()), 1);
    assert_eq!(copy.narrowing(), &NarrowingOutcome::NotRequested);
}

#[test]
fn gix_narrowing_is_unsupported_and_keeps_full_tree() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let url = create_source_repo(&temp_dir);
    let narrowing = Narrowing::new(vec!["*.py".to_string()]);

    let copy = GixMaterializer::new()
        .materialize(&url, Some(&narrowing))
        .unwrap();

    assert_eq!(copy.narrowing(), &NarrowingOutcome::Unsupported);
    assert!(copy.root().join("app.py").exists());
    assert!(copy.root().join("src/lib.py").exists());
    assert!(copy.root().join("README.md").exists());
}

#[test]
fn gix_working_copy_is_removed_on_drop() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let url = create_source_repo(&temp_dir);

    let copy = GixMaterializer::new().materialize(&url, None).unwrap();
    let location = copy.location().to_path_buf();
    assert!(location.exists());

    drop(copy);
    assert!(!location.exists());
}

#[test]
fn gix_clone_failure_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist");

    let result = GixMaterializer::new().materialize(&missing.display().to_string(), None);
    assert!(matches!(result, Err(crate::WsAuditError::Clone { .. })));
}

#[test]
fn backend_selects_materializer() {
    let backend: Backend = serde_json::from_str("\"git\"").unwrap();
    assert_eq!(backend, Backend::Git);
    assert_eq!(Backend::default(), Backend::Gix);
    // Boxed materializers are usable wherever a Materializer is expected.
    let boxed = Backend::Git.materializer();
    let _: &dyn Materializer = &boxed;
}
