//! Severity levels and the numeric verbosity scale.
//!
//! Levels carry a fixed numeric rank with lower ranks being more severe:
//! ERROR(1), WARNING(2), SUCCESS(3), INFO(4), DEBUG(5). A message is
//! written only when its rank does not exceed the configured threshold
//! rank, so raising the threshold admits progressively noisier levels
//! and `Debug` admits everything.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message severity. The derived ordering follows the rank scale, so a
/// more severe level compares as less than a noisier one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Error = 1,
    Warning = 2,
    Success = 3,
    Info = 4,
    Debug = 5,
}

impl Level {
    /// Numeric rank of this level; lower means more severe.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Returns the display label used in rendered log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Success => "SUCCESS",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    /// Interprets a level label, falling back to `Debug` for anything
    /// unrecognized so call sites never fail on a label typo. Labels
    /// are matched exactly against the canonical uppercase forms.
    ///
    /// # Example
    /// ```
    /// use logbook::Level;
    ///
    /// assert_eq!(Level::coerce("WARNING"), Level::Warning);
    /// assert_eq!(Level::coerce("trace"), Level::Debug);
    /// ```
    pub fn coerce(label: &str) -> Level {
        match label {
            "ERROR" => Level::Error,
            "WARNING" => Level::Warning,
            "SUCCESS" => Level::Success,
            "INFO" => Level::Info,
            _ => Level::Debug,
        }
    }

    /// Returns the level with the given numeric rank, or `None` when
    /// the rank is outside the 1..=5 scale. Unlike `coerce`, this is
    /// strict: it guards the configuration path, where a bad value is
    /// an error rather than a degraded log line.
    pub fn from_rank(rank: u8) -> Option<Level> {
        match rank {
            1 => Some(Level::Error),
            2 => Some(Level::Warning),
            3 => Some(Level::Success),
            4 => Some(Level::Info),
            5 => Some(Level::Debug),
            _ => None,
        }
    }

    /// True when a message at this level passes the given threshold.
    pub fn passes(&self, threshold: Level) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Debug
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels convert through `coerce`, so any string is a valid level.
impl From<&str> for Level {
    fn from(label: &str) -> Self {
        Level::coerce(label)
    }
}
