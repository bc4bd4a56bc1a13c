// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for reorg.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. <root>/reorg.toml (optional)
//! 3. --ini FILE (repeatable)
//! 4. REORG_* env vars
//! 5. --set section.key=value
//! 6. CLI flags (--dry, --log-level)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REORG_GLOBAL__DRY=true          → global.dry = true
//! REORG_LAYOUT__SOURCE_DIR=lib    → layout.source_dir = "lib"
//! ```
//!
//! The phase plan itself is not configuration: it is compiled in
//! (see [`crate::reorg::plan::table`]). Only the project layout the plan is
//! applied to can be changed here.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};

use crate::error::Result;

use types::{GlobalConfig, LayoutConfig};

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "reorg.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Project source layout.
    pub layout: LayoutConfig,
}

impl Config {
    /// Validate values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the layout section is unusable.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        Ok(())
    }
}
