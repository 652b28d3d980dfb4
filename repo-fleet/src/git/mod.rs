//! Local version-control operations.
//!
//! [`VersionControl`] is the slice of git the rollout needs. [`GitCli`]
//! shells out to the `git` executable, so credentials come from the user's
//! own git configuration.

mod error;

pub use error::GitError;

use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Git operations used to publish a branch.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Clones `url` into `destination`.
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<(), GitError>;

    /// Creates `branch` from the current HEAD and checks it out.
    async fn checkout_new_branch(&self, repository: &Path, branch: &str) -> Result<(), GitError>;

    /// Stages everything under `pathspec` (relative to the repository).
    async fn add(&self, repository: &Path, pathspec: &Path) -> Result<(), GitError>;

    /// Commits the index with `message`.
    async fn commit(&self, repository: &Path, message: &str) -> Result<(), GitError>;

    /// Pushes `branch` to `remote`.
    async fn push(&self, repository: &Path, remote: &str, branch: &str) -> Result<(), GitError>;
}

/// [`VersionControl`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// Uses `git` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Uses a specific git executable.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs git with `args` inside `directory`.
    async fn run(&self, directory: &Path, args: &[&OsStr]) -> Result<(), GitError> {
        let command = args
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(dir = %directory.display(), command = %command, "Running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(directory)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| GitError::Spawn {
                command: command.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::Failed {
                command,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<(), GitError> {
        self.run(
            Path::new("."),
            &[OsStr::new("clone"), OsStr::new(url), destination.as_os_str()],
        )
        .await
    }

    async fn checkout_new_branch(&self, repository: &Path, branch: &str) -> Result<(), GitError> {
        self.run(
            repository,
            &[OsStr::new("checkout"), OsStr::new("-b"), OsStr::new(branch)],
        )
        .await
    }

    async fn add(&self, repository: &Path, pathspec: &Path) -> Result<(), GitError> {
        self.run(repository, &[OsStr::new("add"), pathspec.as_os_str()])
            .await
    }

    async fn commit(&self, repository: &Path, message: &str) -> Result<(), GitError> {
        self.run(
            repository,
            &[OsStr::new("commit"), OsStr::new("-m"), OsStr::new(message)],
        )
        .await
    }

    async fn push(&self, repository: &Path, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run(
            repository,
            &[OsStr::new("push"), OsStr::new(remote), OsStr::new(branch)],
        )
        .await
    }
}
