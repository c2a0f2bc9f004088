//! The logbook core: target management, configuration, and the
//! write pipeline.
//!
//! `Logbook` owns everything a log call needs: the target registry,
//! the verbosity threshold, the rotation and IP flags, the captured
//! environment, and the configuration store binding. A call runs the
//! pipeline in order: threshold filter, target resolution, line
//! assembly, rotation check, append-write, and console echo when the
//! session is interactive.

use crate::config::{ConfigStore, NoopStore, LEVEL_KEY, NAMESPACE};
use crate::env::Environment;
use crate::error::{LogbookError, Result};
use crate::format::{CallSite, LogEntry, Message};
use crate::ip;
use crate::level::Level;
use crate::registry::LogRegistry;
use crate::rotation;
use crate::writer;
use chrono::Local;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Name registered by the path-less constructors.
pub const DEFAULT_TARGET: &str = "default";

/// Shared state protected by a mutex for thread-safe access.
struct LogbookState {
    registry: LogRegistry,
    threshold: Level,
    rotation: bool,
    ip_logging: bool,
    env: Environment,
    store: Arc<dyn ConfigStore>,
}

/// File-backed, multi-target logger.
///
/// Cloneable to share across threads - each clone references the same
/// underlying registry and settings, and in-process writes are
/// serialized by one internal mutex. Rotation and IP enrichment are
/// off until enabled through `configure` or the typed setters; the
/// verbosity threshold starts at `Debug`, which admits everything.
///
/// # Example
/// ```no_run
/// use logbook::{Level, Logbook};
///
/// # fn main() -> logbook::Result<()> {
/// let logbook = Logbook::with_path("app.log")?;
/// logbook.configure("rotation", true)?;
/// logbook.info("service started")?;
/// logbook.log(serde_json::json!({"port": 8080}), Level::Debug)?;
/// # Ok(())
/// # }
/// ```
pub struct Logbook {
    state: Arc<Mutex<LogbookState>>,
}

impl Logbook {
    /// Creates a logbook with a `default` target at `default.log`
    /// under the environment root.
    pub fn new() -> Result<Self> {
        let env = Environment::from_process();
        let path = env.root().join(format!("{}.log", DEFAULT_TARGET));
        Self::from_parts(vec![(DEFAULT_TARGET.to_string(), path)], env)
    }

    /// Creates a logbook with a `default` target at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_parts(
            vec![(DEFAULT_TARGET.to_string(), path.into())],
            Environment::from_process(),
        )
    }

    /// Creates a logbook from name/path pairs, registering them in
    /// order and activating the first. Fails with `InvalidArgument`
    /// when no pair is given.
    pub fn with_targets<I, N, P>(targets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<PathBuf>,
    {
        Self::with_env(targets, Environment::from_process())
    }

    /// Creates a logbook with an injected environment snapshot instead
    /// of the live process environment. The target list follows
    /// `with_targets` semantics.
    pub fn with_env<I, N, P>(targets: I, env: Environment) -> Result<Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<PathBuf>,
    {
        let targets: Vec<(String, PathBuf)> = targets
            .into_iter()
            .map(|(name, path)| (name.into(), path.into()))
            .collect();
        Self::from_parts(targets, env)
    }

    fn from_parts(targets: Vec<(String, PathBuf)>, env: Environment) -> Result<Self> {
        let mut entries = targets.into_iter();
        let (first_name, first_path) = entries.next().ok_or_else(|| {
            LogbookError::InvalidArgument("at least one log target is required".to_string())
        })?;

        let mut registry = LogRegistry::new(&first_name, first_path)?;
        for (name, path) in entries {
            registry.add(&name, path)?;
        }
        // Adding activates each target in turn; the first one wins.
        registry.set_active(&first_name)?;

        Ok(Self {
            state: Arc::new(Mutex::new(LogbookState {
                registry,
                threshold: Level::default(),
                rotation: false,
                ip_logging: false,
                env,
                store: Arc::new(NoopStore),
            })),
        })
    }

    /// Poisoned locks are recovered so the logbook stays usable after
    /// a panicking writer thread.
    fn lock(&self) -> MutexGuard<'_, LogbookState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ----- target management -----

    /// Registers a target at the derived location
    /// `<root>/log/<name>.log` and makes it active.
    pub fn add(&self, name: &str) -> Result<()> {
        let path = {
            let state = self.lock();
            state.env.root().join("log").join(format!("{}.log", name))
        };
        self.add_path(name, path)
    }

    /// Registers a target at an explicit path and makes it active.
    /// Re-adding a known name is a no-op.
    pub fn add_path(&self, name: &str, path: impl Into<PathBuf>) -> Result<()> {
        self.lock().registry.add(name, path)
    }

    /// Selects the active target, the one unaddressed writes go to.
    pub fn set(&self, name: &str) -> Result<()> {
        self.lock().registry.set_active(name)
    }

    /// Name of the active target.
    pub fn get(&self) -> String {
        self.lock().registry.active().to_string()
    }

    /// Snapshot of all registered targets.
    pub fn list(&self) -> BTreeMap<String, PathBuf> {
        self.lock().registry.snapshot()
    }

    /// Truncates the active target to the newline sentinel.
    pub fn clear(&self) -> Result<()> {
        self.lock().registry.clear(None)
    }

    /// Truncates a named target; unknown names are left untouched.
    pub fn clear_target(&self, name: &str) -> Result<()> {
        self.lock().registry.clear(Some(name))
    }

    // ----- configuration -----

    /// Sets one configuration option by name.
    ///
    /// # Arguments
    /// * `option` - `"rotation"` (boolean), `"ip"` (boolean), or
    ///   `"level"` (integer rank from 1 to 5)
    /// * `value` - the new value; the type must match the option
    ///
    /// # Returns
    /// `&Self` for chaining, or `Configuration` when the option is
    /// unknown, the value type does not match, or the rank is out of
    /// range. Setting `"level"` also persists the rank through the
    /// bound configuration store.
    pub fn configure(&self, option: &str, value: impl Into<Value>) -> Result<&Self> {
        let value = value.into();
        match option {
            "rotation" => {
                let flag = value.as_bool().ok_or_else(|| {
                    LogbookError::Configuration(format!(
                        "rotation expects a boolean, got {}",
                        value
                    ))
                })?;
                self.lock().rotation = flag;
            }
            "ip" => {
                let flag = value.as_bool().ok_or_else(|| {
                    LogbookError::Configuration(format!("ip expects a boolean, got {}", value))
                })?;
                self.lock().ip_logging = flag;
            }
            "level" => {
                let level = value
                    .as_u64()
                    .and_then(|rank| u8::try_from(rank).ok())
                    .and_then(Level::from_rank)
                    .ok_or_else(|| {
                        LogbookError::Configuration(format!(
                            "level expects a rank from 1 to 5, got {}",
                            value
                        ))
                    })?;
                self.set_threshold(level)?;
            }
            other => {
                return Err(LogbookError::Configuration(format!(
                    "unknown option '{}'",
                    other
                )))
            }
        }
        Ok(self)
    }

    /// Enables or disables daily rotation.
    pub fn set_rotation(&self, enabled: bool) {
        self.lock().rotation = enabled;
    }

    /// Enables or disables the client address segment in log lines.
    pub fn set_ip_logging(&self, enabled: bool) {
        self.lock().ip_logging = enabled;
    }

    /// Sets the verbosity threshold and persists its rank through the
    /// bound configuration store.
    pub fn set_threshold(&self, level: Level) -> Result<()> {
        let store = {
            let mut state = self.lock();
            state.threshold = level;
            Arc::clone(&state.store)
        };
        // Persist outside the lock; the store may touch the filesystem.
        store.set(NAMESPACE, LEVEL_KEY, Value::from(level.rank()))
    }

    pub fn threshold(&self) -> Level {
        self.lock().threshold
    }

    pub fn rotation(&self) -> bool {
        self.lock().rotation
    }

    pub fn ip_logging(&self) -> bool {
        self.lock().ip_logging
    }

    /// Binds a configuration store and adopts a previously persisted
    /// threshold when the store holds a valid rank. Values that are
    /// missing, non-numeric, or out of range leave the threshold
    /// unchanged.
    pub fn attach_store(&self, store: Arc<dyn ConfigStore>) {
        let persisted = store
            .get(NAMESPACE, LEVEL_KEY)
            .and_then(|value| value.as_u64())
            .and_then(|rank| u8::try_from(rank).ok())
            .and_then(Level::from_rank);

        let mut state = self.lock();
        if let Some(level) = persisted {
            state.threshold = level;
        }
        state.store = store;
    }

    // ----- logging -----

    /// Logs a message at the given level to the active target.
    ///
    /// # Arguments
    /// * `message` - text, a `serde_json::Value`, or anything
    ///   convertible to `Message`
    /// * `level` - a `Level`, or a label string where unknown labels
    ///   coerce to `Debug`
    #[track_caller]
    pub fn log(&self, message: impl Into<Message>, level: impl Into<Level>) -> Result<()> {
        self.write(None, message.into(), level.into(), Some(CallSite::here()))
    }

    /// Logs a message to a named target. Unknown names fall back to
    /// the active target rather than failing the write.
    #[track_caller]
    pub fn log_to(
        &self,
        target: &str,
        message: impl Into<Message>,
        level: impl Into<Level>,
    ) -> Result<()> {
        self.write(
            Some(target),
            message.into(),
            level.into(),
            Some(CallSite::here()),
        )
    }

    /// Fully-explicit entry point behind the convenience methods.
    /// `None` for `site` drops the source location from the line;
    /// a site built with `CallSite::with_scope` adds a scope label.
    pub fn log_with(
        &self,
        target: Option<&str>,
        message: impl Into<Message>,
        level: impl Into<Level>,
        site: Option<CallSite>,
    ) -> Result<()> {
        self.write(target, message.into(), level.into(), site)
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<Message>) -> Result<()> {
        self.log(message, Level::Debug)
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<Message>) -> Result<()> {
        self.log(message, Level::Info)
    }

    #[track_caller]
    pub fn success(&self, message: impl Into<Message>) -> Result<()> {
        self.log(message, Level::Success)
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<Message>) -> Result<()> {
        self.log(message, Level::Warning)
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<Message>) -> Result<()> {
        self.log(message, Level::Error)
    }

    fn write(
        &self,
        target: Option<&str>,
        message: Message,
        level: Level,
        site: Option<CallSite>,
    ) -> Result<()> {
        let state = self.lock();
        if !level.passes(state.threshold) {
            return Ok(());
        }

        let now = Local::now();
        let ip = if state.ip_logging {
            Some(ip::resolve(&state.env))
        } else {
            None
        };
        let line = LogEntry {
            timestamp: now,
            ip,
            level,
            site,
            message,
        }
        .to_line();

        // The guard stays held across the file operations, so writes
        // from clones are serialized and rotation cannot race.
        let path = state.registry.resolve(target);
        if state.rotation && rotation::rotation_due(path, now.date_naive()) {
            rotation::rotate(path)?;
        }
        writer::append_line(path, &line)?;

        if state.env.is_interactive() {
            writer::echo(&line);
        }
        Ok(())
    }
}

impl Clone for Logbook {
    /// Clones the Arc reference to share the same registry and
    /// settings across threads.
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
