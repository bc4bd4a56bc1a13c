// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory creation and whole-file writes.
//!
//! Files are written through a temporary sibling and renamed into place,
//! so a reader never observes a half-written manifest. Both operations are
//! dry-run aware.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{FsError, ReorgResult};

use super::{ReorgContext, vcs};

/// Ensures a source-root-relative directory exists.
///
/// # Errors
///
/// Returns `FsError::CreateDirFailed` if the directory cannot be created.
pub fn ensure_dir(ctx: &ReorgContext, relative: &Path) -> ReorgResult<()> {
    let path = ctx.source_path(relative);
    if path.is_dir() {
        return Ok(());
    }

    if ctx.is_simulate() {
        info!(path = %relative.display(), "[DRY-RUN] would create directory");
        return Ok(());
    }

    fs::create_dir_all(&path).map_err(|e| FsError::CreateDirFailed {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!(path = %relative.display(), "created directory");
    Ok(())
}

/// Replaces the content of a source-root-relative file and stages it.
///
/// A staging failure after a successful write is logged and does not fail
/// the write.
///
/// # Errors
///
/// Returns `FsError::WriteFailed` if the file cannot be written.
pub fn write_file(ctx: &ReorgContext, relative: &Path, content: &str) -> ReorgResult<()> {
    if ctx.is_simulate() {
        info!(
            path = %relative.display(),
            bytes = content.len(),
            "[DRY-RUN] would write"
        );
        return Ok(());
    }

    replace_contents(&ctx.source_path(relative), content.as_bytes())?;
    info!(path = %relative.display(), "wrote");
    if let Err(e) = vcs::stage(ctx, relative) {
        warn!(path = %relative.display(), error = %e, "written but not staged");
    }
    Ok(())
}

/// Writes `content` to `path` via a temporary file in the same directory.
///
/// An existing file keeps its permissions. Nothing is staged.
///
/// # Errors
///
/// Returns `FsError::WriteFailed` on any I/O failure.
pub fn replace_contents(path: &Path, content: &[u8]) -> ReorgResult<()> {
    let failed = |source| FsError::WriteFailed {
        path: path.display().to_string(),
        source,
    };

    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(parent).map_err(failed)?;
    temp.write_all(content).map_err(failed)?;

    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(permissions) = permissions {
        temp.as_file().set_permissions(permissions).map_err(failed)?;
    }

    temp.persist(path).map_err(|e| failed(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
const fn default_permissions() -> Option<fs::Permissions> {
    None
}
