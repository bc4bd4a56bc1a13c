// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```
//!
//! Renames go through the CLI so the index records them the same way a
//! developer's `git mv` would.

use crate::error::{GitError, ReorgResult};
use std::path::{Path, PathBuf};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
///
/// Both staging primitives are safe to call on paths that are already
/// staged.
pub trait GitMutation {
    /// Rename a tracked file or directory, recording the rename in the index.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git refuses the rename (untracked source,
    /// existing destination, paths outside the work tree).
    fn mv(repo_path: &Path, source: &Path, destination: &Path) -> ReorgResult<()>;

    /// Stage a file for commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the path cannot be added to the index.
    fn add(repo_path: &Path, file: &Path) -> ReorgResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok_and(|repo| repo.workdir().is_some())
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> ReorgResult<String> {
        use std::process::Command;

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Check that a `git` executable can be found on PATH.
    ///
    /// # Errors
    ///
    /// Returns `GitError::GitNotFound` otherwise.
    pub fn ensure_available() -> ReorgResult<PathBuf> {
        which::which("git").map_err(|_| GitError::GitNotFound.into())
    }
}

fn path_arg<'a>(command: &str, path: &'a Path) -> ReorgResult<&'a str> {
    path.to_str().ok_or_else(|| {
        GitError::CommandFailed {
            command: format!("git {command}"),
            message: format!("path is not valid UTF-8: {}", path.display()),
        }
        .into()
    })
}

impl GitMutation for ShellBackend {
    fn mv(repo_path: &Path, source: &Path, destination: &Path) -> ReorgResult<()> {
        let source = path_arg("mv", source)?;
        let destination = path_arg("mv", destination)?;
        Self::git_command(&["mv", "--", source, destination], repo_path)?;
        Ok(())
    }

    fn add(repo_path: &Path, file: &Path) -> ReorgResult<()> {
        let file = path_arg("add", file)?;
        Self::git_command(&["add", "--", file], repo_path)?;
        Ok(())
    }
}
