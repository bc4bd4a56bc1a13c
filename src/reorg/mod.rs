// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Phased reorganization engine.
//!
//! # Architecture
//!
//! ```text
//! ReorganizationEngine (engine)
//!      |            \
//!      v             v
//!   PhasePlan      ReorgContext (root, layout, mode, vcs)
//!   (plan, table)       |
//!      |                v
//!      |   per phase: dirs -> moves -> manifest -> rewrites
//!      |                |        |          |          |
//!      v                v        v          v          v
//!   Phase          writer    vcs     manifest+writer  rewrite
//!                              \                       /
//!                               git CLI        utility::fs::walk
//! ```
//!
//! The engine knows nothing about particular phases: everything it moves,
//! declares, or rewrites comes from a [`plan::PhasePlan`].
//!
//! # Paths
//!
//! Every path stored in a plan is relative to the source root
//! (`<root>/<layout.source_dir>`). [`ReorgContext`] resolves them to absolute
//! paths for filesystem access and to project-relative paths for git.

pub mod engine;
pub mod manifest;
pub mod plan;
pub mod rewrite;
pub mod vcs;
pub mod writer;


use std::path::{Path, PathBuf};

use crate::config::types::LayoutConfig;
use crate::error::ReorgResult;

use vcs::VcsBackend;

/// Whether mutating steps touch the tree or only report what they would do.
///
/// Fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Perform every move, write and rewrite.
    #[default]
    Live,
    /// Log `[DRY-RUN] would ...` for every step and mutate nothing.
    Simulate,
}

impl ExecutionMode {
    /// Mode for a run where `dry` requests simulation.
    #[must_use]
    pub const fn from_dry(dry: bool) -> Self {
        if dry { Self::Simulate } else { Self::Live }
    }
}

/// Execution context shared by every step of a run.
#[derive(Debug, Clone)]
pub struct ReorgContext {
    root: PathBuf,
    layout: LayoutConfig,
    mode: ExecutionMode,
    vcs: VcsBackend,
}

impl ReorgContext {
    /// Creates a context for the project at `root`, probing it for git.
    ///
    /// # Errors
    ///
    /// Returns `GitError::GitNotFound` if `root` is inside a git work tree
    /// but no `git` executable is available.
    pub fn new(
        root: impl Into<PathBuf>,
        layout: LayoutConfig,
        mode: ExecutionMode,
    ) -> ReorgResult<Self> {
        let root = root.into();
        let vcs = VcsBackend::detect(&root)?;
        Ok(Self::with_vcs(root, layout, mode, vcs))
    }

    /// Creates a context with an explicit VCS backend.
    #[must_use]
    pub fn with_vcs(
        root: impl Into<PathBuf>,
        layout: LayoutConfig,
        mode: ExecutionMode,
        vcs: VcsBackend,
    ) -> Self {
        Self {
            root: root.into(),
            layout,
            mode,
            vcs,
        }
    }

    /// Project root; git commands run here.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    #[must_use]
    pub const fn vcs(&self) -> VcsBackend {
        self.vcs
    }

    /// Returns whether this run only simulates.
    #[must_use]
    pub const fn is_simulate(&self) -> bool {
        matches!(self.mode, ExecutionMode::Simulate)
    }

    /// Absolute source root.
    #[must_use]
    pub fn src_root(&self) -> PathBuf {
        self.root.join(&self.layout.source_dir)
    }

    /// Absolute path of a source-root-relative entry.
    #[must_use]
    pub fn source_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.src_root().join(relative)
    }

    /// Project-root-relative path of a source-root-relative entry.
    #[must_use]
    pub fn repo_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.layout.source_dir.join(relative)
    }

    /// Source-root-relative path of the manifest for `directory`.
    #[must_use]
    pub fn manifest_path(&self, directory: &str) -> PathBuf {
        Path::new(directory).join(&self.layout.manifest_file)
    }

    /// Source-root-relative path of the top-level manifest.
    #[must_use]
    pub fn root_manifest_path(&self) -> PathBuf {
        PathBuf::from(&self.layout.root_manifest)
    }
}
