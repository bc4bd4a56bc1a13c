// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for git-backed reorganization.
//!
//! Tests the engine against real temporary repositories.

use reorg::cli::PhaseSelector;
use reorg::cmd::reorg::run_with_plan;
use reorg::config::Config;
use reorg::git::query::is_git_repo;
use reorg::reorg::manifest::ManifestSpec;
use reorg::reorg::plan::{Phase, PhaseId, PhasePlan};
use reorg::reorg::vcs::{MoveOutcome, VcsBackend};
use reorg::reorg::{ExecutionMode, ReorgContext};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory
fn run_git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("failed to run git");
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Repository with `src/foo.rs` importing `src/bar.rs`, committed.
fn init_scenario_repo(dir: &Path) {
    run_git(&["init", "--quiet"], dir);
    run_git(&["config", "user.email", "test@test.com"], dir);
    run_git(&["config", "user.name", "Test"], dir);
    fs::create_dir(dir.join("src")).unwrap();
    fs::write(dir.join("src/foo.rs"), "use crate::bar;\n").unwrap();
    fs::write(dir.join("src/bar.rs"), "pub fn run() {}\n").unwrap();
    run_git(&["add", "."], dir);
    run_git(&["commit", "-q", "-m", "Initial commit"], dir);
}

fn group_plan() -> PhasePlan {
    PhasePlan::new(
        vec![
            Phase::new(PhaseId::Primitives)
                .with_move("bar.rs", "group/bar.rs")
                .with_manifest(ManifestSpec::new("group").declare(["bar"]))
                .with_rewrite("bar", "group::bar"),
        ],
        None,
    )
    .unwrap()
}

fn status(dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = run_git(&["status", "--porcelain"], dir)
        .lines()
        .map(str::to_string)
        .collect();
    lines.sort();
    lines
}

// =============================================================================
// Detection
// =============================================================================

#[test]
fn git_is_git_repo_subdirectory() {
    let temp = temp_dir();
    init_scenario_repo(temp.path());

    let src = temp.path().join("src");
    assert!(is_git_repo(&src));
    assert!(!is_git_repo(temp_dir().path()));
}

#[test]
fn git_context_detects_backend() {
    let temp = temp_dir();
    let plain = ReorgContext::new(temp.path(), Config::default().layout, ExecutionMode::Live)
        .unwrap();
    assert_eq!(plain.vcs(), VcsBackend::Plain);

    init_scenario_repo(temp.path());
    let git = ReorgContext::new(temp.path(), Config::default().layout, ExecutionMode::Live)
        .unwrap();
    assert_eq!(git.vcs(), VcsBackend::Git);
}

// =============================================================================
// Engine
// =============================================================================

#[test]
fn git_moves_are_recorded_as_renames() {
    let temp = temp_dir();
    init_scenario_repo(temp.path());

    let report = run_with_plan(
        group_plan(),
        PhaseSelector::Phase(PhaseId::Primitives),
        temp.path(),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(report.phases[0].moves[0].outcome, MoveOutcome::Moved);
    assert_eq!(
        status(temp.path()),
        [
            " M src/foo.rs",
            "A  src/group/mod.rs",
            "R  src/bar.rs -> src/group/bar.rs",
        ]
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("src/foo.rs")).unwrap(),
        "use crate::group::bar;\n"
    );
}

#[test]
fn git_dry_run_leaves_index_untouched() {
    let temp = temp_dir();
    init_scenario_repo(temp.path());

    let report = run_with_plan(
        group_plan(),
        PhaseSelector::DryRun,
        temp.path(),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(report.mode, ExecutionMode::Simulate);
    assert!(status(temp.path()).is_empty());
}

#[test]
fn git_untracked_source_is_a_warning() {
    let temp = temp_dir();
    init_scenario_repo(temp.path());
    run_git(&["rm", "-q", "--cached", "src/bar.rs"], temp.path());
    run_git(&["commit", "-q", "-m", "Untrack bar"], temp.path());

    let report = run_with_plan(
        group_plan(),
        PhaseSelector::All,
        temp.path(),
        &Config::default(),
    )
    .unwrap();

    let phase = &report.phases[0];
    assert!(matches!(phase.moves[0].outcome, MoveOutcome::Failed(_)));
    assert_eq!(phase.warnings, 1);
    assert!(temp.path().join("src/bar.rs").exists());
    assert!(temp.path().join("src/group/mod.rs").exists());
}
