//! Snapshot of the host environment consulted by the logger.
//!
//! The logger reads its surroundings once at construction instead of
//! probing process globals on every call: request variables feed IP
//! detection, the root directory anchors derived log paths, and the
//! interactive flag decides whether lines are mirrored to the console.
//! Tests build synthetic snapshots with `bare` and the builder methods.

use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
    root_override: Option<PathBuf>,
    interactive: bool,
}

impl Environment {
    /// Captures the live process environment: all environment
    /// variables, and whether stdin is attached to a terminal.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
            root_override: None,
            interactive: std::io::stdin().is_terminal(),
        }
    }

    /// An empty, non-interactive environment.
    pub fn bare() -> Self {
        Self::default()
    }

    /// Adds or replaces a request variable.
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Pins the root directory, overriding any derived value.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_override = Some(root.into());
        self
    }

    /// Marks the environment as interactive or not.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Returns a request variable trimmed of surrounding whitespace.
    /// Unset and blank values both read as absent.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Root directory for derived log paths. An explicit override wins,
    /// then the parent of the `DOCUMENT_ROOT` variable, then the
    /// working directory.
    pub fn root(&self) -> PathBuf {
        if let Some(root) = &self.root_override {
            return root.clone();
        }
        if let Some(doc_root) = self.var("DOCUMENT_ROOT") {
            let parent = Path::new(doc_root)
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty());
            if let Some(parent) = parent {
                return parent.to_path_buf();
            }
        }
        PathBuf::from(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_is_empty_and_non_interactive() {
        let env = Environment::bare();
        assert!(!env.is_interactive());
        assert_eq!(env.var("REMOTE_ADDR"), None);
        assert_eq!(env.root(), PathBuf::from("."));
    }

    #[test]
    fn test_var_trims_and_skips_blank_values() {
        let env = Environment::bare()
            .with_var("REMOTE_ADDR", "  10.0.0.8  ")
            .with_var("HTTP_FORWARDED", "   ");
        assert_eq!(env.var("REMOTE_ADDR"), Some("10.0.0.8"));
        assert_eq!(env.var("HTTP_FORWARDED"), None);
    }

    #[test]
    fn test_root_prefers_explicit_override() {
        let env = Environment::bare()
            .with_root("/srv/app")
            .with_var("DOCUMENT_ROOT", "/var/www/html");
        assert_eq!(env.root(), PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_root_derives_from_document_root() {
        let env = Environment::bare().with_var("DOCUMENT_ROOT", "/var/www/html");
        assert_eq!(env.root(), PathBuf::from("/var/www"));
    }

    // A bare single-component document root has no usable parent.
    #[test]
    fn test_root_falls_back_to_working_directory() {
        let env = Environment::bare().with_var("DOCUMENT_ROOT", "html");
        assert_eq!(env.root(), PathBuf::from("."));
    }

    #[test]
    fn test_interactive_flag() {
        let env = Environment::bare().with_interactive(true);
        assert!(env.is_interactive());
    }
}
