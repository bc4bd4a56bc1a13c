// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lexical import rewriting.
//!
//! For a rule `old -> new` and path root `crate`, three literal forms are
//! replaced, in this order:
//!
//! ```text
//! 1. crate::old::     -> crate::new::      qualified access, use crate::old::{..}
//! 2. use crate::old;  -> use crate::new;   bare import
//! 3. use crate::old   -> use crate::new    bare import followed by a space
//! ```
//!
//! Matching is purely textual. Comments and string literals containing one
//! of the forms are rewritten as well, while `crate::oldish::` is not.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use anyhow::Context;
use regex::{NoExpand, Regex};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{FsError, PlanError, ReorgResult, Result};
use crate::utility::fs::walk::{WalkOptions, find_files};

use super::ReorgContext;
use super::plan::RewriteRule;
use super::writer::replace_contents;

/// Outcome of applying one rule across the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteCount {
    /// Files whose content changed.
    pub files: usize,
    /// Total replacements across those files.
    pub replacements: usize,
    /// Files that could not be read, decoded, or written.
    pub skipped: usize,
}

/// The three anchored substitutions for one rule.
#[derive(Debug)]
pub struct ImportRewriter {
    forms: [(Regex, String); 3],
}

impl ImportRewriter {
    /// Compiles the forms for `rule` under `path_root`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidRule` if a pattern cannot be compiled.
    pub fn new(path_root: &str, rule: &RewriteRule) -> ReorgResult<Self> {
        let old = format!("{path_root}::{}", rule.old_symbol);
        let new = format!("{path_root}::{}", rule.new_symbol);

        let compile = |pattern: String, replacement: String| -> ReorgResult<(Regex, String)> {
            let regex = Regex::new(&regex::escape(&pattern)).map_err(|e| PlanError::InvalidRule {
                old: rule.old_symbol.clone(),
                new: rule.new_symbol.clone(),
                message: e.to_string(),
            })?;
            Ok((regex, replacement))
        };

        Ok(Self {
            forms: [
                compile(format!("{old}::"), format!("{new}::"))?,
                compile(format!("use {old};"), format!("use {new};"))?,
                compile(format!("use {old} "), format!("use {new} "))?,
            ],
        })
    }

    /// Applies all three forms to `text`, returning the result and the
    /// number of replacements. Borrowed when nothing matched.
    #[must_use]
    pub fn rewrite_str<'a>(&self, text: &'a str) -> (Cow<'a, str>, usize) {
        let mut current = Cow::Borrowed(text);
        let mut total = 0;

        for (regex, replacement) in &self.forms {
            let count = regex.find_iter(&current).count();
            if count == 0 {
                continue;
            }
            total += count;
            current = Cow::Owned(
                regex
                    .replace_all(&current, NoExpand(replacement))
                    .into_owned(),
            );
        }

        (current, total)
    }

    /// Rewrites every file under `root` matching `pattern`.
    ///
    /// Files without a match are left untouched. Unreadable, non-UTF-8, and
    /// unwritable files are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be walked.
    pub fn rewrite_tree(&self, root: &Path, pattern: &str) -> Result<RewriteCount> {
        let found = find_files(root, pattern, &WalkOptions::for_source_tree())
            .with_context(|| format!("failed to scan {}", root.display()))?;

        let mut count = RewriteCount {
            skipped: found.error_count(),
            ..RewriteCount::default()
        };

        for path in found.files() {
            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(source) => {
                    let e = FsError::ReadFailed {
                        path: path.display().to_string(),
                        source,
                    };
                    warn!(error = %e, "skipping");
                    count.skipped += 1;
                    continue;
                }
            };
            let Ok(text) = std::str::from_utf8(&bytes) else {
                warn!(path = %path.display(), "not valid UTF-8, skipping");
                count.skipped += 1;
                continue;
            };

            let (rewritten, replacements) = self.rewrite_str(text);
            if replacements == 0 {
                continue;
            }

            if let Err(e) = replace_contents(path, rewritten.as_bytes()) {
                warn!(path = %path.display(), error = %e, "cannot write, skipping");
                count.skipped += 1;
                continue;
            }
            debug!(path = %path.display(), replacements, "rewrote");
            count.files += 1;
            count.replacements += replacements;
        }

        Ok(count)
    }
}

/// Applies `rule` to every source file under the context's source root.
///
/// # Errors
///
/// Returns an error if the rule cannot be compiled or the source root
/// cannot be walked.
pub fn rewrite_all(ctx: &ReorgContext, rule: &RewriteRule) -> Result<RewriteCount> {
    if rule.is_noop() {
        debug!(rule = %rule, "rule maps a path to itself, nothing to rewrite");
        return Ok(RewriteCount::default());
    }

    if ctx.is_simulate() {
        info!(rule = %rule, "[DRY-RUN] would rewrite imports");
        return Ok(RewriteCount::default());
    }

    let rewriter = ImportRewriter::new(&ctx.layout().path_root, rule)?;
    let count = rewriter.rewrite_tree(&ctx.src_root(), &ctx.layout().source_glob())?;
    info!(
        rule = %rule,
        files = count.files,
        replacements = count.replacements,
        "rewrote imports"
    );
    Ok(count)
}

#[cfg(test)]
mod tests;
