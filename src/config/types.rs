// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for reorg.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, LayoutConfig
//!
//! [layout]            project root/
//! source_dir  ------>   src/
//! root_manifest ---->     lib.rs
//! manifest_file ---->     view/mod.rs
//! extension  ------->     view/*.rs  (rewrite scan)
//! path_root  ------->   crate::view::... (rewrite anchor)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Simulate every mutating step instead of performing it.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file (no file logging when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the log file as JSON lines.
    pub log_json: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            log_json: false,
        }
    }
}

/// Source layout of the project being reorganized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Source root, relative to the project root.
    pub source_dir: PathBuf,
    /// Extension of source files scanned by the import rewriter (no dot).
    pub extension: String,
    /// File name of a per-directory manifest.
    pub manifest_file: String,
    /// File name of the top-level manifest regenerated by the finalize step.
    pub root_manifest: String,
    /// Leading segment anchoring every rewritten symbolic path.
    pub path_root: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src"),
            extension: "rs".to_string(),
            manifest_file: "mod.rs".to_string(),
            root_manifest: "lib.rs".to_string(),
            path_root: "crate".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Glob matching every source file under the source root.
    #[must_use]
    pub fn source_glob(&self) -> String {
        format!("**/*.{}", self.extension)
    }

    /// Check that the layout can be used to address files and symbols.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            section: "layout".to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.source_dir.is_absolute() {
            return Err(invalid("source_dir", "must be relative to the project root"));
        }
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(invalid("extension", "must be a bare extension such as 'rs'"));
        }
        for (key, name) in [
            ("manifest_file", &self.manifest_file),
            ("root_manifest", &self.root_manifest),
        ] {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(invalid(key, "must be a plain file name"));
            }
        }
        if self.path_root.is_empty() || self.path_root.contains("::") {
            return Err(invalid("path_root", "must be a single path segment"));
        }
        Ok(())
    }
}
