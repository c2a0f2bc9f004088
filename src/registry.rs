//! Named log targets and the active-target selection.
//!
//! The registry maps logical log names to file paths and tracks which
//! name receives writes when no explicit target is given. Names are
//! unique, targets are never removed in-process, and the active name
//! always refers to a registered target.

use crate::error::{LogbookError, Result};
use crate::writer;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct LogRegistry {
    targets: BTreeMap<String, PathBuf>,
    active: String,
    active_path: PathBuf,
}

impl LogRegistry {
    /// Creates a registry with one target, which becomes active. The
    /// target file and its parent directories are created if missing.
    pub fn new(name: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        validate(name, &path)?;
        writer::ensure_file(&path)?;

        let mut targets = BTreeMap::new();
        targets.insert(name.to_string(), path.clone());
        Ok(Self {
            targets,
            active: name.to_string(),
            active_path: path,
        })
    }

    /// Registers a target and makes it active, creating the file and
    /// its parent directories if missing. Re-adding an existing name
    /// is a no-op: the registered path and the active target are both
    /// left untouched.
    pub fn add(&mut self, name: &str, path: impl Into<PathBuf>) -> Result<()> {
        if self.targets.contains_key(name) {
            return Ok(());
        }
        let path = path.into();
        validate(name, &path)?;
        writer::ensure_file(&path)?;

        self.targets.insert(name.to_string(), path.clone());
        self.active = name.to_string();
        self.active_path = path;
        Ok(())
    }

    /// Makes a registered target the destination for unaddressed
    /// writes.
    pub fn set_active(&mut self, name: &str) -> Result<()> {
        let path = match self.targets.get(name) {
            Some(path) => path.clone(),
            None => return Err(LogbookError::TargetNotFound(name.to_string())),
        };
        self.active = name.to_string();
        self.active_path = path;
        Ok(())
    }

    /// Name of the active target.
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Path of the named target. Falls back to the active target when
    /// no name is given or the name is unknown, so the hot logging
    /// path never fails on a target typo.
    pub fn resolve(&self, name: Option<&str>) -> &Path {
        match name.and_then(|name| self.targets.get(name)) {
            Some(path) => path,
            None => &self.active_path,
        }
    }

    /// Copy of the full name-to-path mapping.
    pub fn snapshot(&self) -> BTreeMap<String, PathBuf> {
        self.targets.clone()
    }

    /// Truncates the named target to the newline sentinel. Defaults to
    /// the active target; unknown names clear nothing.
    pub fn clear(&self, name: Option<&str>) -> Result<()> {
        let name = name.unwrap_or(self.active.as_str());
        if let Some(path) = self.targets.get(name) {
            writer::truncate(path)?;
        }
        Ok(())
    }
}

fn validate(name: &str, path: &Path) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LogbookError::InvalidArgument(
            "log target name is empty".to_string(),
        ));
    }
    if path.as_os_str().is_empty() {
        return Err(LogbookError::InvalidArgument(format!(
            "log target '{}' has an empty path",
            name
        )));
    }
    Ok(())
}
