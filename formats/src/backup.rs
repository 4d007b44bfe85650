//! Backup-on-overwrite for CSV destinations.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{FormatError, Result};

/// Returns `path` with `suffix` appended to its file name.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tabconv_formats::backup_path;
///
/// assert_eq!(backup_path(Path::new("out/data.csv"), "~"), Path::new("out/data.csv~"));
/// ```
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Renames an existing file at `path` to its backup name before it is
/// overwritten.
///
/// Returns the backup location when a file was moved, or `None` when nothing
/// existed at `path`. An earlier backup with the same name is replaced.
///
/// # Errors
///
/// Returns [`FormatError::BackupFailed`] if the rename fails; callers must
/// not write to `path` in that case.
pub fn backup_existing(path: &Path, suffix: &str) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup = backup_path(path, suffix);
    fs::rename(path, &backup).map_err(|source| FormatError::BackupFailed {
        path: path.to_path_buf(),
        source,
    })?;
    warn!(
        path = %path.display(),
        backup = %backup.display(),
        "existing file moved aside"
    );
    Ok(Some(backup))
}
