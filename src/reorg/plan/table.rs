// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Built-in phase table.
//!
//! ```text
//! 1 primitives   highlighter line_wrapping text_property word_navigation
//! 2 model        buffer cursor event marker piece_tree
//! 3 view         overlay popup prompt split viewport
//! 4 input        actions commands keybindings multi_cursor
//! 5 services     clipboard fs/ lsp lsp_manager plugin_api
//! 6 app          config editor state ui/
//! 7 view-stream  render -> view::stream
//! finalize       lib.rs declaring the six groups
//! ```
//!
//! Each unit moves into its group directory and every `crate::<unit>`
//! reference becomes `crate::<group>::<unit>`.

use super::{Phase, PhaseId, PhasePlan};
use crate::reorg::manifest::ManifestSpec;

type Reexports<'a> = &'a [(&'a str, &'a [&'a str])];

/// Builds the built-in plan.
#[must_use]
pub fn standard() -> PhasePlan {
    let phases = vec![
        group(
            PhaseId::Primitives,
            "primitives",
            &[
                "highlighter.rs",
                "line_wrapping.rs",
                "text_property.rs",
                "word_navigation.rs",
            ],
            &[("highlighter", &["Highlighter"])],
        ),
        group(
            PhaseId::Model,
            "model",
            &[
                "buffer.rs",
                "cursor.rs",
                "event.rs",
                "marker.rs",
                "piece_tree.rs",
            ],
            &[
                ("buffer", &["Buffer"]),
                ("cursor", &["Cursor", "Cursors"]),
                ("event", &["Event", "EventLog"]),
            ],
        ),
        group(PhaseId::View, "view", VIEW_UNITS, VIEW_REEXPORTS),
        group(
            PhaseId::Input,
            "input",
            &[
                "actions.rs",
                "commands.rs",
                "keybindings.rs",
                "multi_cursor.rs",
            ],
            &[
                ("commands", &["Command", "Suggestion"]),
                ("keybindings", &["Action", "KeybindingResolver"]),
            ],
        ),
        group(
            PhaseId::Services,
            "services",
            &["clipboard.rs", "fs", "lsp.rs", "lsp_manager.rs", "plugin_api.rs"],
            &[("clipboard", &["Clipboard"]), ("lsp_manager", &["LspManager"])],
        ),
        group(
            PhaseId::App,
            "app",
            &["config.rs", "editor.rs", "state.rs", "ui"],
            &[
                ("config", &["Config"]),
                ("editor", &["Editor"]),
                ("state", &["EditorState"]),
            ],
        ),
        view_stream(),
    ];

    let finalize = ManifestSpec::new("")
        .with_doc("Editor library.")
        .declare(["app", "input", "model", "primitives", "services", "view"])
        .reexport("app", ["Editor"]);

    PhasePlan {
        phases,
        finalize: Some(finalize),
    }
}

const VIEW_UNITS: &[&str] = &[
    "overlay.rs",
    "popup.rs",
    "prompt.rs",
    "split.rs",
    "viewport.rs",
];

const VIEW_REEXPORTS: Reexports<'static> = &[
    (
        "overlay",
        &["Overlay", "OverlayFace", "OverlayManager", "UnderlineStyle"],
    ),
    ("popup", &["Popup", "PopupManager"]),
    ("prompt", &["Prompt", "PromptType"]),
    ("viewport", &["Viewport"]),
];

/// Moves `units` into `dir`, declares them, and rewrites `unit` to
/// `dir::unit`. Units without an `.rs` suffix are directories.
fn group(id: PhaseId, dir: &str, units: &[&str], reexports: Reexports<'_>) -> Phase {
    let mut phase = Phase::new(id).with_manifest(manifest(dir, units, reexports));
    for unit in units {
        phase = phase.with_move(*unit, format!("{dir}/{unit}"));
    }
    for unit in units.iter().copied().map(unit_name) {
        phase = phase.with_rewrite(unit, format!("{dir}::{unit}"));
    }
    phase
}

fn manifest(dir: &str, units: &[&str], reexports: Reexports<'_>) -> ManifestSpec {
    let mut spec = ManifestSpec::new(dir).declare(units.iter().copied().map(unit_name));
    for (child, symbols) in reexports {
        spec = spec.reexport(*child, symbols.iter().copied());
    }
    spec
}

fn unit_name(path: &str) -> &str {
    path.strip_suffix(".rs").unwrap_or(path)
}

/// `render` becomes `view::stream`, and the view manifest is regenerated
/// to declare it.
fn view_stream() -> Phase {
    let mut units = VIEW_UNITS.to_vec();
    units.push("stream.rs");
    let view = manifest("view", &units, VIEW_REEXPORTS).reexport("stream", ["RenderedLine"]);

    // Order matters: the second rule folds `render::legacy` paths, which the
    // first rule has already turned into `view::stream::legacy`.
    Phase::new(PhaseId::ViewStream)
        .with_move("render.rs", "view/stream.rs")
        .with_manifest(view)
        .with_rewrite("render", "view::stream")
        .with_rewrite("view::stream::legacy", "view::stream")
}
