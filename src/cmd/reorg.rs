// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reorganize command implementation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::cli::PhaseSelector;
use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::Result;
use crate::reorg::engine::{ReorganizationEngine, RunReport};
use crate::reorg::plan::PhasePlan;
use crate::reorg::{ExecutionMode, ReorgContext};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "REORG";

/// Project root from `--root`, or the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_root(global: &GlobalOptions) -> Result<PathBuf> {
    match &global.root {
        Some(root) => Ok(root.clone()),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}

/// Assembles the configuration sources for a project root.
#[must_use]
pub fn build_config_loader(global: &GlobalOptions, root: &Path) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional(root.join(CONFIG_FILE_NAME));
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

/// Loads the layered configuration, CLI flags taking precedence.
///
/// # Errors
///
/// Returns an error if a configuration source is missing or invalid, or
/// an override is malformed.
pub fn load_config(global: &GlobalOptions, root: &Path) -> Result<Config> {
    build_config_loader(global, root)
        .apply_overrides(&global.to_config_overrides())?
        .build()
}

/// Runs the selected phases with the built-in plan.
///
/// # Errors
///
/// Returns an error if the context cannot be set up or a manifest write
/// aborts the run. Warnings never produce an error.
pub fn run_reorg_command(phase: PhaseSelector, root: &Path, config: &Config) -> Result<RunReport> {
    run_with_plan(PhasePlan::standard(), phase, root, config)
}

/// Runs the selected phases of `plan`.
///
/// # Errors
///
/// See [`run_reorg_command`].
pub fn run_with_plan(
    plan: PhasePlan,
    phase: PhaseSelector,
    root: &Path,
    config: &Config,
) -> Result<RunReport> {
    let mode = ExecutionMode::from_dry(config.global.dry || phase.forces_simulate());
    let ctx = ReorgContext::new(root, config.layout.clone(), mode)
        .with_context(|| format!("failed to prepare {}", root.display()))?;

    info!(selector = %phase, "running reorganization");
    ReorganizationEngine::new(ctx, plan).run(phase.selection())
}

/// Renders a run report for the terminal.
#[must_use]
pub fn format_report(report: &RunReport) -> Vec<String> {
    let mut lines: Vec<String> = report.phases.iter().map(ToString::to_string).collect();
    if let Some(path) = &report.finalized {
        lines.push(format!("finalize: manifest {}", path.display()));
    }
    if report.order_dependent_rules > 0 {
        lines.push(format!(
            "{} order-dependent rule pairs, review the log",
            report.order_dependent_rules
        ));
    }
    let prefix = if report.mode == ExecutionMode::Simulate {
        "[DRY-RUN] "
    } else {
        ""
    };
    lines.push(format!("{prefix}done with {} warnings", report.warnings()));
    lines
}

/// Prints a run report, as JSON when `json` is set.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for line in format_report(report) {
            println!("{line}");
        }
    }
    Ok(())
}
