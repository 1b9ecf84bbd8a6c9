#![allow(dead_code)]

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the ws-audit binary with a clean
/// environment.
#[macro_export]
macro_rules! ws_audit {
    () => {{
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("ws-audit"));
        cmd.env_remove("GITHUB_TOKEN").env_remove("RUST_LOG");
        cmd
    }};
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Writes `.ws-audit.toml` in the fixture root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".ws-audit.toml", content);
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn detected_dir(&self) -> PathBuf {
        self.dir.path().join("Detected")
    }

    /// Sorted evidence record file names.
    pub fn records(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.detected_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Creates a committed git repository under `name` and returns its
    /// file:// URL.
    pub fn create_git_repo(&self, name: &str, files: &[(&str, &str)]) -> String {
        let repo = self.dir.path().join(name);
        fs::create_dir_all(&repo).unwrap();
        git(&["init", "-q"], &repo);
        git(&["config", "user.name", "Test User"], &repo);
        git(&["config", "user.email", "test@example.com"], &repo);
        for (path, content) in files {
            let full = repo.join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
        git(&["add", "."], &repo);
        git(&["commit", "-q", "-m", "initial"], &repo);
        format!("file://{}", repo.display())
    }
}

pub fn git_available() -> bool {
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

/// Minimal search service: page 1 lists `repos` as (owner, name, `clone_url`),
/// every other page is empty. Returns the endpoint URL.
pub fn spawn_search_stub(repos: Vec<(String, String, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind search stub");
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            // Drain headers.
            let mut header = String::new();
            while reader.read_line(&mut header).is_ok_and(|n| n > 2) {
                header.clear();
            }

            let body = if request_line.contains("&page=1 ") || request_line.contains("&page=1&") {
                let items: Vec<String> = repos
                    .iter()
                    .map(|(owner, name, url)| {
                        format!(
                            r#"{{"name":"{name}","owner":{{"login":"{owner}"}},"clone_url":"{url}"}}"#
                        )
                    })
                    .collect();
                format!(r#"{{"total_count":{},"items":[{}]}}"#, repos.len(), items.join(","))
            } else {
                r#"{"total_count":0,"items":[]}"#.to_string()
            };

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{addr}/search/repositories")
}
