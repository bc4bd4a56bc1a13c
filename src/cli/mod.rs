// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for reorg using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! reorg [global options] [--json] [PHASE]
//!
//! PHASE   1..7      run that phase only
//!         all       run every phase, then regenerate the top-level manifest
//!         dry-run   same as `all` under simulation
//! ```

pub mod global;


use std::fmt;
use std::str::FromStr;

use clap::Parser;

use crate::cli::global::GlobalOptions;
use crate::error::PlanError;
use crate::reorg::engine::PhaseSelection;
use crate::reorg::plan::PhaseId;

/// Phased Source-Tree Reorganizer
///
/// Moves source files into a new module layout, regenerates module
/// manifests, and rewrites `crate::` paths to match.
#[derive(Debug, Parser)]
#[command(
    name = "reorg",
    author,
    version,
    about = "Phased source-tree reorganizer",
    long_about = "reorg Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Moves source files into a new module layout, regenerates module\n\
                  manifests, and rewrites `crate::` paths to match.\n\n\
                  Invoking `reorg` runs every phase. `reorg 3` runs phase 3 only,\n\
                  `reorg dry-run` (or `--dry`) logs what would happen without\n\
                  touching the tree.",
    after_help = "CONFIGURATION:\n\n\
                  reorg reads `reorg.toml` from the project root if present, then\n\
                  every --ini file in order, then REORG_* environment variables\n\
                  (e.g. REORG_LAYOUT__SOURCE_DIR=lib), then --set overrides."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Phase to run: 1-7, all, or dry-run.
    #[arg(value_name = "PHASE", default_value = "all")]
    pub phase: PhaseSelector,

    /// Prints the run report as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

/// Positional phase argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSelector {
    Phase(PhaseId),
    All,
    DryRun,
}

impl PhaseSelector {
    /// Phases the engine should run.
    #[must_use]
    pub const fn selection(self) -> PhaseSelection {
        match self {
            Self::Phase(id) => PhaseSelection::Single(id),
            Self::All | Self::DryRun => PhaseSelection::All,
        }
    }

    /// Returns whether the selector itself requests simulation.
    #[must_use]
    pub const fn forces_simulate(self) -> bool {
        matches!(self, Self::DryRun)
    }
}

impl FromStr for PhaseSelector {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let phase = match s.as_bytes() {
            b"all" => return Ok(Self::All),
            b"dry-run" => return Ok(Self::DryRun),
            // Exactly one digit: no sign, no leading zeros
            [digit @ b'1'..=b'7'] => PhaseId::from_number(digit - b'0'),
            _ => None,
        };
        phase
            .map(Self::Phase)
            .ok_or_else(|| PlanError::UnknownSelector(s.to_string()))
    }
}

impl fmt::Display for PhaseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phase(id) => write!(f, "{}", id.number()),
            Self::All => f.write_str("all"),
            Self::DryRun => f.write_str("dry-run"),
        }
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
