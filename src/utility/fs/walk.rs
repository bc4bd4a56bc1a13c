// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Options for directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Options for scanning a source tree before rewriting it.
    ///
    /// - Ignores hidden files
    /// - Respects .gitignore
    /// - Skips build output and VCS metadata directories
    #[must_use]
    pub fn for_source_tree() -> Self {
        Self::builder()
            .with_skip_dirs(
                ["target", ".git", ".hg", ".svn", "node_modules"]
                    .map(String::from)
                    .to_vec(),
            )
            .build()
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.follow_links(false);
    builder.hidden(true);

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());

    // filter_entry is evaluated before descending, so skipped trees are never read
    if !options.skip_dirs().is_empty() {
        let skip_dirs = options.skip_dirs().to_vec();
        builder.filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Files matched by [`find_files`], in sorted order.
#[derive(Debug)]
pub struct FoundFiles {
    files: Vec<PathBuf>,
    error_count: usize,
}

impl FoundFiles {
    /// Returns the matching files, sorted by path.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Returns the number of entries that could not be read during traversal.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Finds files matching a glob pattern.
///
/// The walk runs on the calling thread; results are sorted before they are
/// returned so callers observe a stable order.
///
/// # Arguments
/// * `root` - The root directory to search from
/// * `pattern` - Glob pattern relative to `root` (e.g., "**/*.rs")
/// * `options` - Traversal options
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use reorg::utility::fs::walk::{find_files, WalkOptions};
///
/// let found = find_files("/path/to/project/src", "**/*.rs", &WalkOptions::for_source_tree())?;
/// for file in found.files() {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<FoundFiles> {
    use wax::{Glob, Program};

    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    let mut files = Vec::new();
    let mut error_count = 0;

    for entry_result in build_walker(root, options).build() {
        match entry_result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && let Ok(rel_path) = entry.path().strip_prefix(root)
                    && glob.is_match(rel_path)
                {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!(error = %e, "walk error");
                error_count += 1;
            }
        }
    }
    files.sort();

    Ok(FoundFiles { files, error_count })
}
