// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module manifest generation.
//!
//! ```text
//! //! `view` module.             <- doc header
//!
//! pub mod overlay;               <- one per declared child
//! pub mod prompt;
//!
//! pub use overlay::Overlay;      <- one per re-exported child
//! pub use prompt::{Prompt, PromptType};
//! ```
//!
//! Output depends only on the [`ManifestSpec`], so regenerating a manifest
//! is byte-for-byte idempotent.

use std::fmt;

use serde::Serialize;

/// Description of one aggregator file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSpec {
    /// Directory the manifest aggregates, relative to the source root.
    /// Empty for the top-level manifest.
    pub directory: String,
    /// Header text; defaults to ``"`<directory>` module."``.
    pub doc: Option<String>,
    /// Children declared in order.
    pub declared_children: Vec<String>,
    /// `(child, symbols)` re-exports in order.
    pub reexported_symbols: Vec<(String, Vec<String>)>,
}

impl ManifestSpec {
    #[must_use]
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            doc: None,
            declared_children: Vec::new(),
            reexported_symbols: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Appends declared children.
    #[must_use]
    pub fn declare<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_children
            .extend(children.into_iter().map(Into::into));
        self
    }

    /// Appends a re-export line for `child`.
    #[must_use]
    pub fn reexport<I, S>(mut self, child: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reexported_symbols
            .push((child.into(), symbols.into_iter().map(Into::into).collect()));
        self
    }
}

/// Renders the manifest text for `spec`.
#[must_use]
pub fn generate(spec: &ManifestSpec) -> String {
    Manifest(spec).to_string()
}

struct Manifest<'a>(&'a ManifestSpec);

impl fmt::Display for Manifest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.0;

        match &spec.doc {
            Some(doc) => {
                for line in doc.lines() {
                    if line.is_empty() {
                        writeln!(f, "//!")?;
                    } else {
                        writeln!(f, "//! {line}")?;
                    }
                }
            }
            None => writeln!(f, "//! `{}` module.", spec.directory)?,
        }

        if !spec.declared_children.is_empty() {
            writeln!(f)?;
            for child in &spec.declared_children {
                writeln!(f, "pub mod {child};")?;
            }
        }

        let mut reexports = spec
            .reexported_symbols
            .iter()
            .filter(|(_, symbols)| !symbols.is_empty())
            .peekable();
        if reexports.peek().is_some() {
            writeln!(f)?;
        }
        for (child, symbols) in reexports {
            match symbols.as_slice() {
                [symbol] => writeln!(f, "pub use {child}::{symbol};")?,
                _ => writeln!(f, "pub use {child}::{{{}}};", symbols.join(", "))?,
            }
        }

        Ok(())
    }
}
