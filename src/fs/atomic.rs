//! Whole-file replacement for report output.
//!
//! Content is written to a temporary file beside the target, synced, and then
//! renamed over the target. Readers see either the previous file or the
//! complete new one, never a truncated report.
//!
//! Source and destination must be on the same filesystem for the rename to
//! be atomic; placing the temporary file in the target's own directory
//! guarantees that. On a crash a `.{name}.{pid}.tmp` file may remain.

use crate::error::{Result, SmartcodeError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Replace the file at `path` with `content`, creating it if needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path)?;

    if let Err(e) = write_and_sync(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_failure(path, e));
    }

    // std::fs::rename replaces an existing destination on every platform.
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_failure(path, e));
    }

    sync_parent(path);
    Ok(())
}

/// Temporary file path in the same directory as the target.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let file_name = target
        .file_name()
        .ok_or_else(|| write_failure(target, "path has no file name"))?;

    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(format!(".{}.tmp", std::process::id()));

    Ok(target.with_file_name(temp_name))
}

fn write_and_sync(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

#[cfg(unix)]
fn sync_parent(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) {}

fn write_failure(path: &Path, reason: impl ToString) -> SmartcodeError {
    SmartcodeError::WriteFailure {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
