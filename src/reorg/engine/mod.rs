// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Phase executor.
//!
//! # State Machine
//!
//! ```text
//! Idle -> SelectingPhase
//!           |
//!           v
//!   +-> CreatingDirectories -> MovingFiles -> WritingManifest -> RewritingImports
//!   |                                              |                    |
//!   |                                          (write error)            v
//!   |                                              v              PhaseComplete
//!   |                                           Aborted                 |
//!   +------------------------- next phase <-----------------------------+
//!                                                                       |
//!                                          All: finalize manifest -> Done
//! ```
//!
//! Only a failed manifest write stops a run. Directory, move, and rewrite
//! problems are logged as warnings and counted in the [`PhaseReport`].
//! Nothing is rolled back: re-running a phase is the recovery path.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::error::Result;

use super::manifest::{self, ManifestSpec};
use super::plan::{Phase, PhaseId, PhasePlan, RewriteRule};
use super::rewrite::{self, RewriteCount};
use super::vcs::{self, MoveOutcome};
use super::writer;
use super::{ExecutionMode, ReorgContext};

/// Which phases a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSelection {
    /// Every phase in ascending order, then the finalize manifest.
    All,
    /// One phase, never followed by finalize.
    Single(PhaseId),
}

/// Sub-step of a phase, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CreatingDirectories,
    MovingFiles,
    WritingManifest,
    RewritingImports,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreatingDirectories => "creating directories",
            Self::MovingFiles => "moving files",
            Self::WritingManifest => "writing manifest",
            Self::RewritingImports => "rewriting imports",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub source: String,
    pub destination: String,
    #[serde(flatten)]
    pub outcome: MoveOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    pub rule: RewriteRule,
    #[serde(flatten)]
    pub count: RewriteCount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What one phase did (or would do).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub phase: PhaseId,
    pub directories: Vec<String>,
    pub moves: Vec<MoveReport>,
    /// Source-root-relative path of the written manifest.
    pub manifest: Option<PathBuf>,
    pub rewrites: Vec<RuleReport>,
    pub warnings: usize,
}

impl PhaseReport {
    const fn new(phase: PhaseId) -> Self {
        Self {
            phase,
            directories: Vec::new(),
            moves: Vec::new(),
            manifest: None,
            rewrites: Vec::new(),
            warnings: 0,
        }
    }

    /// Moves that completed or would complete.
    #[must_use]
    pub fn moved(&self) -> usize {
        self.moves.iter().filter(|m| !m.outcome.is_warning()).count()
    }

    /// Total replacements and changed files across all rules.
    #[must_use]
    pub fn rewritten(&self) -> RewriteCount {
        self.rewrites
            .iter()
            .fold(RewriteCount::default(), |acc, r| RewriteCount {
                files: acc.files + r.count.files,
                replacements: acc.replacements + r.count.replacements,
                skipped: acc.skipped + r.count.skipped,
            })
    }
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rewritten = self.rewritten();
        write!(
            f,
            "{}: {}/{} moved, {} rules, {} replacements in {} files",
            self.phase,
            self.moved(),
            self.moves.len(),
            self.rewrites.len(),
            rewritten.replacements,
            rewritten.files,
        )?;
        if let Some(manifest) = &self.manifest {
            write!(f, ", manifest {}", manifest.display())?;
        }
        if self.warnings > 0 {
            write!(f, ", {} warnings", self.warnings)?;
        }
        Ok(())
    }
}

/// What a whole run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub mode: ExecutionMode,
    pub phases: Vec<PhaseReport>,
    /// Top-level manifest written by the finalize step.
    pub finalized: Option<PathBuf>,
    /// Rule pairs in the executed phases whose result depends on order.
    pub order_dependent_rules: usize,
}

impl RunReport {
    /// Warnings across all phases.
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.phases.iter().map(|p| p.warnings).sum()
    }
}

/// Generic executor for a [`PhasePlan`].
#[derive(Debug)]
pub struct ReorganizationEngine {
    ctx: ReorgContext,
    plan: PhasePlan,
}

impl ReorganizationEngine {
    #[must_use]
    pub const fn new(ctx: ReorgContext, plan: PhasePlan) -> Self {
        Self { ctx, plan }
    }

    #[must_use]
    pub const fn context(&self) -> &ReorgContext {
        &self.ctx
    }

    #[must_use]
    pub const fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    /// Executes the selected phases strictly in order.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::PhaseNotDefined` before any mutation if a single
    /// selected phase is not in the plan, or the manifest write error that
    /// aborted the run.
    pub fn run(&self, selection: PhaseSelection) -> Result<RunReport> {
        let phases: Vec<&Phase> = match selection {
            PhaseSelection::All => self.plan.phases().iter().collect(),
            PhaseSelection::Single(id) => vec![self.plan.phase(id)?],
        };

        let order_dependent_rules = self.flag_order_dependencies(&phases);

        info!(
            mode = ?self.ctx.mode(),
            vcs = ?self.ctx.vcs(),
            phases = phases.len(),
            root = %self.ctx.src_root().display(),
            "starting reorganization"
        );

        let mut report = RunReport {
            mode: self.ctx.mode(),
            phases: Vec::with_capacity(phases.len()),
            finalized: None,
            order_dependent_rules,
        };

        for phase in phases {
            report.phases.push(self.run_phase(phase)?);
        }

        if selection == PhaseSelection::All
            && let Some(spec) = self.plan.finalize()
        {
            report.finalized = Some(self.finalize(spec)?);
        }

        info!(warnings = report.warnings(), "reorganization complete");
        Ok(report)
    }

    /// Executes one phase: directories, moves, manifest, rewrites.
    ///
    /// # Errors
    ///
    /// Returns an error only if the manifest cannot be written.
    pub fn run_phase(&self, phase: &Phase) -> Result<PhaseReport> {
        let span = info_span!("phase", id = phase.id.number(), name = phase.id.name());
        let _enter = span.enter();

        let mut report = PhaseReport::new(phase.id);
        info!("starting {}", phase.id);

        debug!(step = %Step::CreatingDirectories, "entering step");
        for dir in phase.directories() {
            if let Err(e) = writer::ensure_dir(&self.ctx, Path::new(&dir)) {
                warn!(path = %dir, error = %e, "cannot create directory");
                report.warnings += 1;
            }
            report.directories.push(dir);
        }

        debug!(step = %Step::MovingFiles, "entering step");
        for op in &phase.moves {
            let outcome = vcs::move_path(&self.ctx, op);
            if outcome.is_warning() {
                report.warnings += 1;
            }
            report.moves.push(MoveReport {
                source: op.source_path.clone(),
                destination: op.destination_path.clone(),
                outcome,
            });
        }

        if let Some(spec) = &phase.manifest {
            debug!(step = %Step::WritingManifest, "entering step");
            let path = self.ctx.manifest_path(&spec.directory);
            self.write_manifest(&path, spec).with_context(|| {
                format!("{} aborted while {}", phase.id, Step::WritingManifest)
            })?;
            report.manifest = Some(path);
        }

        debug!(step = %Step::RewritingImports, "entering step");
        for rule in &phase.rewrites {
            if rule.rewrites_own_output() {
                warn!(rule = %rule, "rule rewrites its own output when run again");
            }
            let rule_report = match rewrite::rewrite_all(&self.ctx, rule) {
                Ok(count) => {
                    report.warnings += count.skipped;
                    RuleReport {
                        rule: rule.clone(),
                        count,
                        error: None,
                    }
                }
                Err(e) => {
                    let message = format!("{e:#}");
                    warn!(rule = %rule, error = %message, "rewrite failed, continuing");
                    report.warnings += 1;
                    RuleReport {
                        rule: rule.clone(),
                        count: RewriteCount::default(),
                        error: Some(message),
                    }
                }
            };
            report.rewrites.push(rule_report);
        }

        info!(warnings = report.warnings, "finished {}", phase.id);
        Ok(report)
    }

    fn finalize(&self, spec: &ManifestSpec) -> Result<PathBuf> {
        let _enter = info_span!("finalize").entered();
        let path = self.ctx.root_manifest_path();
        self.write_manifest(&path, spec)
            .context("finalize aborted while writing the top-level manifest")?;
        Ok(path)
    }

    fn write_manifest(&self, path: &Path, spec: &ManifestSpec) -> Result<()> {
        writer::write_file(&self.ctx, path, &manifest::generate(spec))?;
        Ok(())
    }

    fn flag_order_dependencies(&self, phases: &[&Phase]) -> usize {
        let mut count = 0;
        for dependency in self.plan.order_dependent_rules() {
            if phases.iter().any(|phase| phase.id == dependency.phase) {
                warn!(
                    phase = dependency.phase.number(),
                    earlier = %dependency.earlier,
                    later = %dependency.later,
                    "order-dependent rewrite rules"
                );
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests;
