// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          ReorgError (16 bytes)
//!                  |
//!   +------+------+------+------+
//!   |      |      |      |      |
//!   v      v      v      v      v
//!  Git    Cfg     Fs    Plan    Io
//!  Box    Box    Box    Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git     CommandFailed, GitNotFound
//!   Config  InvalidValue, InvalidOverride
//!   Fs      CreateDirFailed, WriteFailed, ReadFailed, RenameFailed
//!   Plan    UnknownSelector, PhaseNotDefined, DuplicatePhase, InvalidRule
//!
//! All variants boxed => ReorgError stays two words wide.
//! ```
//!
//! Severity is two-tiered: moves never produce an error (they degrade to
//! [`crate::reorg::vcs::MoveOutcome`] warnings), everything that reaches
//! this module is fatal for the current run.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ReorgError`].
pub type ReorgResult<T> = std::result::Result<T, ReorgError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum ReorgError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Phase plan or selection error.
    #[error("plan error: {0}")]
    Plan(#[from] Box<PlanError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ReorgError {
                fn from(err: $error) -> Self {
                    ReorgError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    FsError => Fs,
    PlanError => Plan,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// The project is a git work tree but no `git` executable is on PATH.
    #[error("git executable not found in PATH")]
    GitNotFound,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `--set` override that is not of the form `section.key=value`.
    #[error("invalid override '{0}', expected section.key=value")]
    InvalidOverride(String),
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Directory could not be created.
    #[error("failed to create directory '{path}': {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File could not be written.
    #[error("failed to write '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File could not be read.
    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Plain (untracked) rename failed.
    #[error("failed to rename '{path}': {source}")]
    RenameFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Plan Errors ---

/// Phase plan and selection errors.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Phase selector is not one of `1`..`7`, `all`, `dry-run`.
    #[error("unknown phase selector '{0}' (expected 1-7, all, or dry-run)")]
    UnknownSelector(String),

    /// The selected phase has no entry in the plan.
    #[error("phase {0} is not defined in the plan")]
    PhaseNotDefined(u8),

    /// Two phases in one plan share an identifier.
    #[error("phase {0} is defined more than once")]
    DuplicatePhase(u8),

    /// A rewrite rule cannot be compiled into its anchored patterns.
    #[error("invalid rewrite rule '{old}' -> '{new}': {message}")]
    InvalidRule {
        old: String,
        new: String,
        message: String,
    },
}
