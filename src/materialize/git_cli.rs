use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use super::{Materializer, Narrowing, NarrowingOutcome, WorkingCopy};
use crate::error::{Result, WsAuditError};

/// Clones through the system `git` binary.
///
/// Narrowing uses a no-cone sparse checkout: the clone is taken without a
/// checkout, sparse patterns are installed, then the tree is read in. If the
/// sparse step is rejected (old git, unsupported server) the full tree is
/// checked out instead.
#[derive(Debug, Clone)]
pub struct GitCliMaterializer {
    program: String,
}

impl GitCliMaterializer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("git")
    }

    #[must_use]
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn run<I, S>(&self, args: I, cwd: Option<&Path>) -> std::result::Result<Output, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .env("GIT_TERMINAL_PROMPT", "0");
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .map_err(|e| format!("failed to run {}: {e}", self.program))?;
        if output.status.success() {
            Ok(output)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(format!("{} ({})", stderr.trim(), output.status))
        }
    }

    fn clone_repo(&self, clone_url: &str, dest: &Path, checkout: bool) -> Result<()> {
        let mut args: Vec<&OsStr> = ["clone", "--quiet", "--depth", "1"]
            .into_iter()
            .map(OsStr::new)
            .collect();
        if !checkout {
            args.push(OsStr::new("--no-checkout"));
        }
        args.push(OsStr::new(clone_url));
        args.push(dest.as_os_str());

        self.run(args, None)
            .map(drop)
            .map_err(|e| WsAuditError::clone_failed(clone_url, e))
    }

    fn apply_sparse(&self, root: &Path, narrowing: &Narrowing) -> NarrowingOutcome {
        let mut args = vec!["sparse-checkout", "set", "--no-cone"];
        args.extend(narrowing.patterns().iter().map(String::as_str));

        match self.run(args, Some(root)) {
            Ok(_) => NarrowingOutcome::Applied,
            Err(reason) => NarrowingOutcome::Failed(reason),
        }
    }
}

impl Default for GitCliMaterializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Materializer for GitCliMaterializer {
    fn materialize(&self, clone_url: &str, narrowing: Option<&Narrowing>) -> Result<WorkingCopy> {
        let mut copy = WorkingCopy::create()?;
        log::info!("Shallow cloning repository: {clone_url}");

        let Some(narrowing) = narrowing else {
            self.clone_repo(clone_url, copy.root(), true)?;
            log::info!("Repository shallow cloned to {}", copy.root().display());
            return Ok(copy);
        };

        self.clone_repo(clone_url, copy.root(), false)?;
        let outcome = self.apply_sparse(copy.root(), narrowing);
        if let NarrowingOutcome::Failed(reason) = &outcome {
            log::warn!("Sparse checkout unavailable for {clone_url}, using full tree: {reason}");
        }

        self.run(["read-tree", "-mu", "HEAD"], Some(copy.root()))
            .map_err(|e| WsAuditError::clone_failed(clone_url, e))?;
        copy.set_narrowing(outcome);

        log::info!(
            "Repository shallow cloned to {} (narrowing {})",
            copy.root().display(),
            copy.narrowing()
        );
        Ok(copy)
    }
}
