// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Move gateway over the project's version control.
//!
//! ```text
//! move_path(ctx, op)
//!   Simulate ----------------------------> WouldMove
//!   source missing ----------------------> SourceMissing (warn)
//!   mkdir parent -> git mv | fs::rename -> Moved | Failed (warn)
//! ```
//!
//! Moves never fail a run. Anything that prevents a move is reported as a
//! warning outcome so a partially applied reorganization can be re-run.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{FsError, ReorgResult};
use crate::git::{cmd, query};

use super::ReorgContext;
use super::plan::MoveOperation;

/// How moves and writes are registered with version control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsBackend {
    /// Renames go through `git mv`, written files through `git add`.
    Git,
    /// No work tree: plain renames, no staging.
    Plain,
}

impl VcsBackend {
    /// Picks the backend for a project root.
    ///
    /// # Errors
    ///
    /// Returns `GitError::GitNotFound` if `root` is inside a git work tree
    /// but `git` is not on PATH.
    pub fn detect(root: &Path) -> ReorgResult<Self> {
        if query::is_git_repo(root) {
            let git = cmd::git_executable()?;
            debug!(
                git = %git.display(),
                root = %root.display(),
                "using git for moves and staging"
            );
            Ok(Self::Git)
        } else {
            info!(
                root = %root.display(),
                "not inside a git work tree, moves fall back to plain renames"
            );
            Ok(Self::Plain)
        }
    }
}

/// Result of a single move. Only `Moved` and `WouldMove` are clean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved,
    WouldMove,
    SourceMissing,
    Failed(String),
}

impl MoveOutcome {
    /// Returns whether this outcome should be counted as a warning.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::SourceMissing | Self::Failed(_))
    }
}

/// Relocates one file or directory.
///
/// Under `Simulate` nothing is checked or touched, not even the existence
/// of the source.
pub fn move_path(ctx: &ReorgContext, op: &MoveOperation) -> MoveOutcome {
    if ctx.is_simulate() {
        info!(
            src = %op.source_path,
            dst = %op.destination_path,
            "[DRY-RUN] would move"
        );
        return MoveOutcome::WouldMove;
    }

    let source = ctx.source_path(&op.source_path);
    let destination = ctx.source_path(&op.destination_path);

    if fs::symlink_metadata(&source).is_err() {
        warn!(src = %op.source_path, "move source does not exist, skipping");
        return MoveOutcome::SourceMissing;
    }

    if let Some(parent) = destination.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        let error = FsError::CreateDirFailed {
            path: parent.display().to_string(),
            source: e,
        };
        warn!(src = %op.source_path, error = %error, "move skipped");
        return MoveOutcome::Failed(error.to_string());
    }

    let result = match ctx.vcs() {
        VcsBackend::Git => cmd::move_tracked(
            ctx.root(),
            &ctx.repo_path(&op.source_path),
            &ctx.repo_path(&op.destination_path),
        ),
        VcsBackend::Plain => plain_rename(&source, &destination),
    };

    match result {
        Ok(()) => {
            info!(src = %op.source_path, dst = %op.destination_path, "moved");
            MoveOutcome::Moved
        }
        Err(e) => {
            warn!(
                src = %op.source_path,
                dst = %op.destination_path,
                error = %e,
                "move failed, continuing"
            );
            MoveOutcome::Failed(e.to_string())
        }
    }
}

// Refuses to replace an existing destination, like `git mv` without -f.
fn plain_rename(source: &Path, destination: &Path) -> ReorgResult<()> {
    if fs::symlink_metadata(destination).is_ok() {
        return Err(FsError::RenameFailed {
            path: destination.display().to_string(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "destination exists"),
        }
        .into());
    }
    fs::rename(source, destination).map_err(|e| {
        FsError::RenameFailed {
            path: source.display().to_string(),
            source: e,
        }
        .into()
    })
}

/// Registers a written file with the VCS staging area.
///
/// `relative` is relative to the source root. A no-op for [`VcsBackend::Plain`].
///
/// # Errors
///
/// Returns a `GitError` if `git add` fails.
pub fn stage(ctx: &ReorgContext, relative: &Path) -> ReorgResult<()> {
    match ctx.vcs() {
        VcsBackend::Git => {
            debug!(path = %relative.display(), "staging");
            cmd::stage(ctx.root(), &ctx.repo_path(relative))
        }
        VcsBackend::Plain => Ok(()),
    }
}
