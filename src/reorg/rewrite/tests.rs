// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ImportRewriter, RewriteCount, rewrite_all};
use crate::config::types::LayoutConfig;
use crate::reorg::plan::RewriteRule;
use crate::reorg::vcs::VcsBackend;
use crate::reorg::{ExecutionMode, ReorgContext};
use std::borrow::Cow;
use std::path::Path;
use tempfile::TempDir;

fn rewriter(old: &str, new: &str) -> ImportRewriter {
    ImportRewriter::new("crate", &RewriteRule::new(old, new)).unwrap()
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    for (path, content) in files {
        let path = temp.path().join("src").join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    temp
}

fn context(root: &Path, mode: ExecutionMode) -> ReorgContext {
    ReorgContext::with_vcs(root, LayoutConfig::default(), mode, VcsBackend::Plain)
}

fn read(temp: &TempDir, path: &str) -> String {
    std::fs::read_to_string(temp.path().join("src").join(path)).unwrap()
}

#[test]
fn test_rewrite_qualified_access() {
    let (text, count) =
        rewriter("old", "new").rewrite_str("let t = crate::old::Thing::default();\n");
    assert_eq!(text, "let t = crate::new::Thing::default();\n");
    assert_eq!(count, 1);
}

#[test]
fn test_rewrite_bare_import_terminated() {
    let (text, count) =
        rewriter("bar", "group::bar").rewrite_str("use crate::bar;\npub use crate::bar;\n");
    assert_eq!(text, "use crate::group::bar;\npub use crate::group::bar;\n");
    assert_eq!(count, 2);
}

#[test]
fn test_rewrite_import_with_qualifier_list() {
    let (text, _) = rewriter("old", "new").rewrite_str("use crate::old {A, B};\n");
    assert_eq!(text, "use crate::new {A, B};\n");
}

#[test]
fn test_rewrite_braced_import_uses_qualified_form() {
    let (text, count) =
        rewriter("commands", "input::commands").rewrite_str("use crate::commands::{Command, Suggestion};\n");
    assert_eq!(text, "use crate::input::commands::{Command, Suggestion};\n");
    assert_eq!(count, 1);
}

#[test]
fn test_no_collateral_rewrite_of_longer_name() {
    let source = "use crate::oldish::Thing;\nuse crate::oldish;\nlet x = crate::older;\n";
    let (text, count) = rewriter("old", "new").rewrite_str(source);
    assert!(matches!(text, Cow::Borrowed(_)));
    assert_eq!(text, source);
    assert_eq!(count, 0);
}

#[test]
fn test_rewrite_is_lexical_inside_comments() {
    let (text, count) = rewriter("prompt", "view::prompt").rewrite_str("// see crate::prompt::Prompt\n");
    assert_eq!(text, "// see crate::view::prompt::Prompt\n");
    assert_eq!(count, 1);
}

#[test]
fn test_rewrite_replacement_is_literal() {
    let (text, _) = rewriter("a", "b").rewrite_str("crate::a::x");
    assert_eq!(text, "crate::b::x");

    let rule = RewriteRule::new("x", "y");
    let (text, _) = ImportRewriter::new("$0", &rule).unwrap().rewrite_str("$0::x::z");
    assert_eq!(text, "$0::y::z");
}

#[test]
fn test_later_rule_sees_earlier_output() {
    let source = "use crate::render::legacy::Painter;\n";
    let (step, _) = rewriter("render", "view::stream").rewrite_str(source);
    let (text, _) = rewriter("view::stream::legacy", "view::stream").rewrite_str(&step);
    assert_eq!(text, "use crate::view::stream::Painter;\n");
}

#[test]
fn test_rewrite_all_updates_tree() {
    let temp = project(&[
        ("foo.rs", "use crate::bar;\n\nfn f() { crate::bar::run(); }\n"),
        ("group/bar.rs", "pub fn run() {}\n"),
        ("untouched.rs", "use crate::barista;\n"),
        ("notes.txt", "use crate::bar;\n"),
    ]);
    let ctx = context(temp.path(), ExecutionMode::Live);

    let count = rewrite_all(&ctx, &RewriteRule::new("bar", "group::bar")).unwrap();

    assert_eq!(
        count,
        RewriteCount {
            files: 1,
            replacements: 2,
            skipped: 0
        }
    );
    assert_eq!(
        read(&temp, "foo.rs"),
        "use crate::group::bar;\n\nfn f() { crate::group::bar::run(); }\n"
    );
    assert_eq!(read(&temp, "untouched.rs"), "use crate::barista;\n");
    assert_eq!(read(&temp, "notes.txt"), "use crate::bar;\n");
}

#[test]
fn test_rewrite_all_is_idempotent() {
    let temp = project(&[("foo.rs", "use crate::bar;\n")]);
    let ctx = context(temp.path(), ExecutionMode::Live);
    let rule = RewriteRule::new("bar", "group::bar");

    rewrite_all(&ctx, &rule).unwrap();
    let second = rewrite_all(&ctx, &rule).unwrap();

    assert_eq!(second, RewriteCount::default());
    assert_eq!(read(&temp, "foo.rs"), "use crate::group::bar;\n");
}

#[test]
fn test_rewrite_all_skips_non_utf8() {
    let temp = project(&[("foo.rs", "use crate::bar;\n")]);
    std::fs::write(temp.path().join("src/blob.rs"), [0xff, 0xfe, b'c']).unwrap();
    let ctx = context(temp.path(), ExecutionMode::Live);

    let count = rewrite_all(&ctx, &RewriteRule::new("bar", "group::bar")).unwrap();

    assert_eq!(count.files, 1);
    assert_eq!(count.skipped, 1);
    assert_eq!(
        std::fs::read(temp.path().join("src/blob.rs")).unwrap(),
        [0xff, 0xfe, b'c']
    );
}

#[test]
fn test_rewrite_all_simulate_does_not_write() {
    let temp = project(&[("foo.rs", "use crate::bar;\n")]);
    let ctx = context(temp.path(), ExecutionMode::Simulate);

    let count = rewrite_all(&ctx, &RewriteRule::new("bar", "group::bar")).unwrap();

    assert_eq!(count, RewriteCount::default());
    assert_eq!(read(&temp, "foo.rs"), "use crate::bar;\n");
}

#[test]
fn test_rewrite_all_noop_rule() {
    let temp = project(&[("foo.rs", "use crate::bar;\n")]);
    let ctx = context(temp.path(), ExecutionMode::Live);

    let count = rewrite_all(&ctx, &RewriteRule::new("bar", "bar")).unwrap();
    assert_eq!(count, RewriteCount::default());
}

#[test]
fn test_rewrite_all_missing_source_root() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(temp.path(), ExecutionMode::Live);
    assert!(rewrite_all(&ctx, &RewriteRule::new("bar", "group::bar")).is_err());
}
