// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{PhaseSelection, ReorganizationEngine, Step};
use crate::config::types::LayoutConfig;
use crate::reorg::manifest::ManifestSpec;
use crate::reorg::plan::{Phase, PhaseId, PhasePlan};
use crate::reorg::vcs::{MoveOutcome, VcsBackend};
use crate::reorg::{ExecutionMode, ReorgContext};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::create_dir(temp.path().join("src")).unwrap();
    for (path, content) in files {
        let path = temp.path().join("src").join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    temp
}

fn engine(root: &Path, mode: ExecutionMode, plan: PhasePlan) -> ReorganizationEngine {
    let ctx = ReorgContext::with_vcs(root, LayoutConfig::default(), mode, VcsBackend::Plain);
    ReorganizationEngine::new(ctx, plan)
}

/// Every file under `root` with its content, keyed by relative path.
fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn visit(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                out.insert(path.strip_prefix(root).unwrap().to_path_buf(), Vec::new());
                visit(root, &path, out);
            } else {
                let content = std::fs::read(&path).unwrap();
                out.insert(path.strip_prefix(root).unwrap().to_path_buf(), content);
            }
        }
    }
    let mut out = BTreeMap::new();
    visit(root, root, &mut out);
    out
}

fn read(temp: &TempDir, path: &str) -> String {
    std::fs::read_to_string(temp.path().join("src").join(path)).unwrap()
}

fn group_plan() -> PhasePlan {
    PhasePlan::new(
        vec![
            Phase::new(PhaseId::Primitives)
                .with_move("bar.rs", "group/bar.rs")
                .with_manifest(ManifestSpec::new("group").declare(["bar"]))
                .with_rewrite("bar", "group::bar"),
        ],
        Some(ManifestSpec::new("").with_doc("Crate root.").declare(["group"])),
    )
    .unwrap()
}

fn scenario() -> TempDir {
    project(&[
        ("foo.rs", "use crate::bar;\n"),
        ("bar.rs", "pub fn run() {}\n"),
    ])
}

#[test]
fn test_single_phase_moves_declares_and_rewrites() {
    let temp = scenario();
    let engine = engine(temp.path(), ExecutionMode::Live, group_plan());

    let report = engine.run(PhaseSelection::Single(PhaseId::Primitives)).unwrap();

    assert!(temp.path().join("src/group/bar.rs").exists());
    assert!(!temp.path().join("src/bar.rs").exists());
    assert_eq!(read(&temp, "foo.rs"), "use crate::group::bar;\n");
    assert_eq!(read(&temp, "group/mod.rs"), "//! `group` module.\n\npub mod bar;\n");

    assert!(report.finalized.is_none());
    assert!(!temp.path().join("src/lib.rs").exists());
    assert_eq!(report.warnings(), 0);
    insta::assert_snapshot!(
        report.phases[0].to_string(),
        @"phase 1 (primitives): 1/1 moved, 1 rules, 1 replacements in 1 files, manifest group/mod.rs"
    );
}

#[test]
fn test_all_runs_finalize() {
    let temp = scenario();
    let engine = engine(temp.path(), ExecutionMode::Live, group_plan());

    let report = engine.run(PhaseSelection::All).unwrap();

    assert_eq!(report.finalized.as_deref(), Some(Path::new("lib.rs")));
    assert_eq!(read(&temp, "lib.rs"), "//! Crate root.\n\npub mod group;\n");
}

#[test]
fn test_missing_source_only_warns() {
    let temp = project(&[("foo.rs", "use crate::bar;\n")]);
    let engine = engine(temp.path(), ExecutionMode::Live, group_plan());

    let report = engine.run(PhaseSelection::Single(PhaseId::Primitives)).unwrap();

    let phase = &report.phases[0];
    assert_eq!(phase.moves[0].outcome, MoveOutcome::SourceMissing);
    assert_eq!(phase.warnings, 1);
    assert!(temp.path().join("src/group/mod.rs").exists());
    assert_eq!(read(&temp, "foo.rs"), "use crate::group::bar;\n");
}

#[test]
fn test_rerun_is_idempotent() {
    let temp = scenario();
    let engine = engine(temp.path(), ExecutionMode::Live, group_plan());

    engine.run(PhaseSelection::All).unwrap();
    let after_first = snapshot_tree(temp.path());
    let second = engine.run(PhaseSelection::All).unwrap();

    assert_eq!(snapshot_tree(temp.path()), after_first);
    assert_eq!(second.warnings(), 1);
    assert_eq!(second.phases[0].rewritten().replacements, 0);
}

#[test]
fn test_simulate_leaves_tree_unchanged() {
    let temp = scenario();
    let before = snapshot_tree(temp.path());
    let engine = engine(temp.path(), ExecutionMode::Simulate, group_plan());

    let report = engine.run(PhaseSelection::All).unwrap();

    assert_eq!(snapshot_tree(temp.path()), before);
    assert_eq!(report.phases[0].moves[0].outcome, MoveOutcome::WouldMove);
    assert_eq!(report.phases[0].manifest.as_deref(), Some(Path::new("group/mod.rs")));
    assert_eq!(report.finalized.as_deref(), Some(Path::new("lib.rs")));
}

#[test]
fn test_manifest_write_failure_aborts() {
    let temp = scenario();
    std::fs::write(temp.path().join("src/group"), "not a directory").unwrap();
    let engine = engine(temp.path(), ExecutionMode::Live, group_plan());

    let err = engine.run(PhaseSelection::All).unwrap_err();

    let message = format!("{err:#}");
    assert!(
        message.starts_with("phase 1 (primitives) aborted while writing manifest"),
        "unexpected error: {message}"
    );
    assert_eq!(read(&temp, "foo.rs"), "use crate::bar;\n");
    assert!(temp.path().join("src/bar.rs").exists());
    assert!(!temp.path().join("src/lib.rs").exists());
}

#[test]
fn test_undefined_phase_is_rejected_before_mutation() {
    let temp = scenario();
    let before = snapshot_tree(temp.path());
    let engine = engine(temp.path(), ExecutionMode::Live, group_plan());

    let err = engine.run(PhaseSelection::Single(PhaseId::App)).unwrap_err();

    assert_eq!(err.to_string(), "plan error: phase 6 is not defined in the plan");
    assert_eq!(snapshot_tree(temp.path()), before);
}

#[test]
fn test_later_phase_sees_earlier_moves() {
    let temp = project(&[
        ("main.rs", "use crate::prompt::Prompt;\n"),
        ("prompt.rs", "use crate::commands::Suggestion;\n"),
        ("commands.rs", "pub struct Suggestion;\n"),
    ]);
    let plan = PhasePlan::new(
        vec![
            Phase::new(PhaseId::View)
                .with_move("prompt.rs", "view/prompt.rs")
                .with_rewrite("prompt", "view::prompt"),
            Phase::new(PhaseId::Input)
                .with_move("commands.rs", "input/commands.rs")
                .with_rewrite("commands", "input::commands"),
        ],
        None,
    )
    .unwrap();

    let report = engine(temp.path(), ExecutionMode::Live, plan)
        .run(PhaseSelection::All)
        .unwrap();

    assert_eq!(report.phases.len(), 2);
    assert!(report.finalized.is_none());
    assert_eq!(read(&temp, "main.rs"), "use crate::view::prompt::Prompt;\n");
    assert_eq!(
        read(&temp, "view/prompt.rs"),
        "use crate::input::commands::Suggestion;\n"
    );
}

#[test]
fn test_order_dependent_rules_are_counted() {
    let temp = project(&[("editor.rs", "use crate::render::legacy::Painter;\n")]);
    let plan = PhasePlan::new(
        vec![
            Phase::new(PhaseId::ViewStream)
                .with_rewrite("render", "view::stream")
                .with_rewrite("view::stream::legacy", "view::stream"),
        ],
        None,
    )
    .unwrap();

    let report = engine(temp.path(), ExecutionMode::Live, plan)
        .run(PhaseSelection::All)
        .unwrap();

    assert_eq!(report.order_dependent_rules, 1);
    assert_eq!(read(&temp, "editor.rs"), "use crate::view::stream::Painter;\n");
}

#[test]
fn test_step_display() {
    let steps = [
        Step::CreatingDirectories,
        Step::MovingFiles,
        Step::WritingManifest,
        Step::RewritingImports,
    ]
    .map(|step| step.to_string());
    insta::assert_yaml_snapshot!(steps, @r"
    - creating directories
    - moving files
    - writing manifest
    - rewriting imports
    ");
}

#[test]
fn test_report_serializes_outcomes() {
    let temp = project(&[("foo.rs", "use crate::bar;\n")]);
    let report = engine(temp.path(), ExecutionMode::Live, group_plan())
        .run(PhaseSelection::Single(PhaseId::Primitives))
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "live");
    assert_eq!(json["phases"][0]["phase"], "primitives");
    assert_eq!(
        json["phases"][0]["moves"][0],
        serde_json::json!({
            "source": "bar.rs",
            "destination": "group/bar.rs",
            "outcome": "source_missing"
        })
    );
    assert_eq!(json["phases"][0]["rewrites"][0]["replacements"], 1);
}
