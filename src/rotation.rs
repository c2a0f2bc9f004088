//! Daily rotation: retire the previous day's log file to a dated
//! backup name before the next write.
//!
//! A file is due for rotation when it was last modified on a calendar
//! day before today, in local time. Rotating renames the file to its
//! original path with a dot and the Unix timestamp of that day's local
//! midnight appended, so `app.log` last written on 2023-01-01 becomes
//! `app.log.1672531200` in a UTC deployment. The rename is a single
//! filesystem call with no cross-process locking; two processes
//! rotating the same file can race, which is a documented limitation.

use crate::error::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use std::fs;
use std::path::{Path, PathBuf};

/// Last-modified time of a file in local time, or `None` when the file
/// is missing or its metadata is unreadable.
fn modified_at(path: &Path) -> Option<DateTime<Local>> {
    let metadata = fs::metadata(path).ok()?;
    let modified = metadata.modified().ok()?;
    Some(DateTime::<Local>::from(modified))
}

/// True when the file exists and was last written on a calendar day
/// before `today`. Missing or unreadable files are never due.
pub fn rotation_due(path: &Path, today: NaiveDate) -> bool {
    match modified_at(path) {
        Some(modified) => modified.date_naive() < today,
        None => false,
    }
}

/// Backup name for a file last modified at `modified`: the original
/// path with a dot and the Unix timestamp of that date's local
/// midnight appended.
pub fn backup_path(path: &Path, modified: DateTime<Local>) -> PathBuf {
    let midnight = modified.date_naive().and_time(NaiveTime::MIN);
    let suffix = match midnight.and_local_timezone(Local).earliest() {
        Some(stamp) => stamp.timestamp(),
        // midnight can be skipped by a DST transition
        None => modified.timestamp(),
    };
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{}", suffix));
    PathBuf::from(name)
}

/// Renames the file to its dated backup name and returns the new path.
pub fn rotate(path: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(path)?;
    let modified = DateTime::<Local>::from(metadata.modified()?);
    let backup = backup_path(path, modified);
    fs::rename(path, &backup)?;
    Ok(backup)
}
