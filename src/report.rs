//! Report output.
//!
//! A report is stored beside its source file as `<stem>_<suffix>.txt`, so
//! `src/foo.py` analyzed by the debug task becomes `src/foo_debug.txt`. The
//! name depends only on the source path and the task; running a task again
//! replaces the previous report.

use crate::error::Result;
use crate::fs::atomic_write;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Path of the report for `source_path` with the given task suffix.
///
/// The stem is everything before the last extension; a file without an
/// extension keeps its whole name.
pub fn report_path(source_path: &Path, suffix: &str) -> PathBuf {
    let mut name = source_path
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push("_");
    name.push(suffix);
    name.push(".txt");
    source_path.with_file_name(name)
}

/// Write `text` as the report for `source_path` and return where it went.
///
/// Any existing report at that path is replaced in full.
pub fn write_report(source_path: &Path, suffix: &str, text: &str) -> Result<PathBuf> {
    let path = report_path(source_path, suffix);
    atomic_write(&path, text.as_bytes())?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmartcodeError;
    use tempfile::TempDir;

    #[test]
    fn report_name_appends_suffix_and_forces_txt() {
        assert_eq!(
            report_path(Path::new("foo.py"), "debug"),
            PathBuf::from("foo_debug.txt")
        );
        assert_eq!(
            report_path(Path::new("src/lib.rs"), "optimized"),
            PathBuf::from("src/lib_optimized.txt")
        );
    }

    #[test]
    fn report_is_sibling_of_source() {
        let source = Path::new("/work/project/app/main.go");
        let report = report_path(source, "explanation");
        assert_eq!(report.parent(), source.parent());
        assert_eq!(report.file_name().unwrap(), "main_explanation.txt");
    }

    #[test]
    fn only_last_extension_is_dropped() {
        assert_eq!(
            report_path(Path::new("archive.test.js"), "tests"),
            PathBuf::from("archive.test_tests.txt")
        );
    }

    #[test]
    fn file_without_extension_keeps_name() {
        assert_eq!(
            report_path(Path::new("scripts/Makefile"), "debug"),
            PathBuf::from("scripts/Makefile_debug.txt")
        );
        assert_eq!(
            report_path(Path::new(".bashrc"), "explanation"),
            PathBuf::from(".bashrc_explanation.txt")
        );
    }

    #[test]
    fn txt_source_gets_distinct_report() {
        assert_eq!(
            report_path(Path::new("notes.txt"), "debug"),
            PathBuf::from("notes_debug.txt")
        );
    }

    #[test]
    fn write_report_creates_file_with_exact_text() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("foo.py");
        let text = "=== ERRORS FOUND ===\nZeroDivisionError\n\u{FFFD}\n";

        let path = write_report(&source, "debug", text).unwrap();

        assert_eq!(path, temp_dir.path().join("foo_debug.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn write_report_overwrites_previous_run() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("foo.py");

        write_report(&source, "debug", "first run, quite a bit longer").unwrap();
        let path = write_report(&source, "debug", "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn write_report_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("gone").join("foo.py");

        let err = write_report(&source, "debug", "text").unwrap_err();
        assert!(matches!(err, SmartcodeError::WriteFailure { .. }));
    }
}
