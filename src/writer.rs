//! Append-only file writes with directory auto-creation, plus the
//! console mirror used in interactive sessions.

use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Sentinel left behind by `truncate` so cleared logs stay non-empty.
pub const CLEARED: &str = "\n";

/// Appends a rendered line to the file, creating missing parent
/// directories and the file itself on first write.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// Creates the file and its parent directories without writing to it.
/// Existing files are left untouched.
pub fn ensure_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().append(true).create(true).open(path)?;
    Ok(())
}

/// Rewrites the file as the cleared sentinel.
pub fn truncate(path: &Path) -> Result<()> {
    fs::write(path, CLEARED)?;
    Ok(())
}

/// Mirrors a line to stdout. Failures are ignored; the console copy is
/// cosmetic and must never fail the file write that preceded it.
pub fn echo(line: &str) {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(line.as_bytes());
    let _ = stdout.flush();
}
