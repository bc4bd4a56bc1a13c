// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (mv, add)
//! ```

use crate::error::ReorgResult;
use std::path::{Path, PathBuf};

use super::backend::{GitMutation, ShellBackend};

/// Rename a tracked path inside the work tree at `repo_path`.
///
/// # Errors
///
/// Returns a `GitError` if git refuses the rename.
pub fn move_tracked(repo_path: &Path, source: &Path, destination: &Path) -> ReorgResult<()> {
    ShellBackend::mv(repo_path, source, destination)
}

/// Stage `file` for commit.
///
/// # Errors
///
/// Returns a `GitError` if the path cannot be added to the index.
pub fn stage(repo_path: &Path, file: &Path) -> ReorgResult<()> {
    ShellBackend::add(repo_path, file)
}

/// Locate the `git` executable.
///
/// # Errors
///
/// Returns `GitError::GitNotFound` if `git` is not on PATH.
pub fn git_executable() -> ReorgResult<PathBuf> {
    ShellBackend::ensure_available()
}
