//! Top-level logging exports and a small global facade.
//!
//! This module re-exports the core logging surface and exposes a
//! process-wide facade for programs that prefer free functions over
//! passing a `Logbook` around.
//!
//! - `Logbook`: the file-backed, multi-target logger
//! - `DEFAULT_TARGET`: name registered by the path-less constructors
//!
//! The facade holds an optional global instance behind a lock, so it
//! can be installed late and replaced at any time. The free functions
//! are fire-and-forget: they no-op while no instance is installed and
//! discard write errors. Use a `Logbook` directly where errors matter.
//!
//! ```rust,no_run
//! use logbook::logger::{self, Logbook};
//!
//! # fn main() -> logbook::Result<()> {
//! logger::init(Logbook::new()?);
//! logger::info("app started");
//! # Ok(())
//! # }
//! ```

pub mod core;

pub use self::core::{Logbook, DEFAULT_TARGET};

use crate::format::Message;
use crate::level::Level;
use std::sync::{PoisonError, RwLock};

/// Process-wide logbook used by the convenience functions below.
static GLOBAL: RwLock<Option<Logbook>> = RwLock::new(None);

/// Installs a logbook as the process-wide instance, replacing any
/// previously installed one. Clones of the installed logbook keep
/// working; they share its state.
pub fn init(logbook: Logbook) {
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    *global = Some(logbook);
}

/// Logs through the global logbook if one is installed, otherwise
/// does nothing.
#[track_caller]
pub fn log(message: impl Into<Message>, level: impl Into<Level>) {
    let global = GLOBAL.read().unwrap_or_else(PoisonError::into_inner);
    if let Some(logbook) = global.as_ref() {
        let _ = logbook.log(message, level);
    }
}

#[track_caller]
pub fn debug(message: impl Into<Message>) {
    log(message, Level::Debug);
}

#[track_caller]
pub fn info(message: impl Into<Message>) {
    log(message, Level::Info);
}

#[track_caller]
pub fn success(message: impl Into<Message>) {
    log(message, Level::Success);
}

#[track_caller]
pub fn warning(message: impl Into<Message>) {
    log(message, Level::Warning);
}

#[track_caller]
pub fn error(message: impl Into<Message>) {
    log(message, Level::Error);
}

#[cfg(test)]
pub mod tests;
