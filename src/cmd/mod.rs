// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::reorg::run_reorg_command --> ReorganizationEngine
//! ```

pub mod reorg;
