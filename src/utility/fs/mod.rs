// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! walk:  find_files()   ignore::Walk + wax glob, sorted output
//!        WalkOptions    gitignore, skip_dirs
//! ```

pub mod walk;
