//! Integration tests for the complete logging pipeline.
//!
//! These tests exercise the full pipeline from the public `Logbook`
//! surface through target routing, threshold filtering, line assembly,
//! rotation, and configuration-store persistence.

use crate::config::{ConfigStore, JsonFileStore, MemoryStore, LEVEL_KEY, NAMESPACE};
use crate::env::Environment;
use crate::level::Level;
use crate::logger::Logbook;
use chrono::{Duration, Local};
use filetime::{set_file_mtime, FileTime};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;

    /// Test a multi-target logbook driven end-to-end.
    ///
    /// This test verifies:
    /// - Targets registered at construction are all routable
    /// - The threshold set through `configure` filters writes
    /// - The client address segment appears once IP logging is on
    /// - `clear` truncates only the active target
    #[test]
    fn test_full_pipeline_multi_target() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let app_path = temp_dir.path().join("app.log");
        let audit_path = temp_dir.path().join("audit.log");

        let env = Environment::bare()
            .with_root(temp_dir.path())
            .with_var("REMOTE_ADDR", "203.0.113.9");
        let logbook = Logbook::with_env(
            [("app", app_path.clone()), ("audit", audit_path.clone())],
            env,
        )?;

        let store = Arc::new(MemoryStore::new());
        logbook.attach_store(store.clone());
        logbook.configure("ip", true)?.configure("level", 3)?;
        assert_eq!(logbook.threshold(), Level::Success);

        logbook.success("deployment complete")?;
        logbook.debug("verbose detail")?;
        logbook.log_to("audit", "permission denied", Level::Warning)?;

        let app_content = std::fs::read_to_string(&app_path)?;
        assert_eq!(app_content.lines().count(), 1, "debug should be filtered");
        assert!(app_content.contains("[203.0.113.9]"));
        assert!(app_content.contains(" [SUCCESS] "));
        assert!(app_content.ends_with("deployment complete\n"));

        let audit_content = std::fs::read_to_string(&audit_path)?;
        assert_eq!(audit_content.lines().count(), 1);
        assert!(audit_content.contains(" [WARNING] "));

        // The rank set through configure was pushed into the store.
        assert_eq!(store.get(NAMESPACE, LEVEL_KEY), Some(Value::from(3)));

        // Clearing hits the active target and leaves the other alone.
        logbook.clear()?;
        assert_eq!(std::fs::read_to_string(&app_path)?, "\n");
        assert_eq!(std::fs::read_to_string(&audit_path)?, audit_content);

        Ok(())
    }

    /// Test daily rotation over a simulated multi-day lifetime.
    ///
    /// This test verifies:
    /// - A file last written on an earlier day is renamed before the
    ///   next write, with the midnight epoch of that day as suffix
    /// - The rotated file keeps the old lines, the live file starts over
    /// - Same-day writes never rotate twice
    #[test]
    fn test_rotation_preserves_history_across_days() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let log_path = temp_dir.path().join("app.log");

        let logbook = Logbook::with_env([("app", log_path.clone())], Environment::bare())?;
        logbook.set_rotation(true);
        logbook.info("written two days ago")?;

        // Backdate the file so the next write sees a stale day.
        let two_days_ago = Local::now() - Duration::days(2);
        set_file_mtime(&log_path, FileTime::from_unix_time(two_days_ago.timestamp(), 0))?;

        logbook.info("written today")?;
        logbook.info("also written today")?;

        let backups: Vec<_> = std::fs::read_dir(temp_dir.path())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("app.log."))
            .collect();
        assert_eq!(backups.len(), 1, "expected one rotated file: {:?}", backups);

        let suffix = backups[0].trim_start_matches("app.log.");
        assert!(
            suffix.parse::<i64>().is_ok(),
            "suffix should be an epoch: {}",
            suffix
        );

        let rotated = std::fs::read_to_string(temp_dir.path().join(&backups[0]))?;
        assert!(rotated.contains("written two days ago"));

        let live = std::fs::read_to_string(&log_path)?;
        assert_eq!(live.lines().count(), 2);
        assert!(!live.contains("written two days ago"));

        Ok(())
    }

    /// Test that the verbosity threshold survives a process restart
    /// through a file-backed configuration store.
    ///
    /// This test verifies:
    /// - `set_threshold` persists the rank to disk
    /// - A fresh logbook attaching the same store adopts the rank
    /// - The adopted threshold filters writes immediately
    #[test]
    fn test_threshold_survives_new_instance_via_store(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let settings_path = temp_dir.path().join("config").join("settings.json");
        let log_path = temp_dir.path().join("app.log");

        {
            let logbook = Logbook::with_env([("app", log_path.clone())], Environment::bare())?;
            logbook.attach_store(Arc::new(JsonFileStore::new(&settings_path)));
            logbook.set_threshold(Level::Warning)?;
        }

        let logbook = Logbook::with_env([("app", log_path.clone())], Environment::bare())?;
        logbook.attach_store(Arc::new(JsonFileStore::new(&settings_path)));
        assert_eq!(logbook.threshold(), Level::Warning);

        logbook.debug("should be filtered")?;
        logbook.error("should be written")?;

        let content = std::fs::read_to_string(&log_path)?;
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains(" [ERROR] "));

        Ok(())
    }

    /// Test structured payloads flowing through the pipeline.
    ///
    /// This test verifies:
    /// - A JSON value is marked and pretty-printed in the file
    /// - Plain text entries written after it stay line-oriented
    #[test]
    fn test_structured_payload_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let log_path = temp_dir.path().join("app.log");

        let logbook = Logbook::with_env([("app", log_path.clone())], Environment::bare())?;
        logbook.log(json!({"attempt": 3, "path": "/var/data"}), Level::Info)?;
        logbook.info("retry scheduled")?;

        let content = std::fs::read_to_string(&log_path)?;
        let first_line = content.lines().next().unwrap_or_default();
        assert!(first_line.ends_with("[JSON]"), "got: {}", first_line);
        assert!(content.contains("  \"attempt\": 3,\n"));
        assert!(content.contains("  \"path\": \"/var/data\"\n"));
        assert!(content.ends_with("retry scheduled\n"));

        Ok(())
    }
}
