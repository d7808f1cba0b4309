//! Loading the source file that gets embedded in a prompt.

use crate::error::{Result, SmartcodeError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a source file as UTF-8 text.
///
/// A missing file is reported as [`SmartcodeError::FileNotFound`]; anything
/// else that prevents reading it as text (a directory, a permission error,
/// bytes that are not UTF-8) is [`SmartcodeError::Unreadable`].
pub fn read_source(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SmartcodeError::FileNotFound(path.to_path_buf()),
        _ => unreadable(path, e.to_string()),
    })?;

    if !metadata.is_file() {
        return Err(unreadable(path, "not a regular file".to_string()));
    }

    let bytes = fs::read(path).map_err(|e| unreadable(path, e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| {
        unreadable(
            path,
            format!("file is not valid UTF-8 text ({})", e.utf8_error()),
        )
    })
}

fn unreadable(path: &Path, reason: String) -> SmartcodeError {
    SmartcodeError::Unreadable {
        path: path.to_path_buf(),
        reason,
    }
}
