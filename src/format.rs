//! Log line assembly: message payloads, caller capture, and rendering.
//!
//! A rendered line carries a local timestamp, an optional client
//! address, the level label, an optional caller scope, the source
//! location of the logging call, and the message itself:
//!
//! `[2024-05-01 13:45:10] [LOCALHOST] [ERROR] [Worker::run] (src/worker.rs:88) boom`
//!
//! Absent optional segments are omitted entirely rather than rendered
//! empty. Structured payloads are tagged with a marker line and
//! pretty-printed, so a line may span several physical lines in the
//! file while still counting as one entry.

use crate::error::Result;
use crate::level::Level;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

/// Marker preceding pretty-printed JSON payloads in rendered lines.
pub const JSON_MARKER: &str = "[JSON]";

/// A log message payload: plain text or a structured JSON value.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Text(String),
    Json(Value),
}

impl Message {
    /// Encodes any serializable payload as a structured message.
    pub fn json<T: Serialize>(payload: &T) -> Result<Message> {
        Ok(Message::Json(serde_json::to_value(payload)?))
    }

    /// Renders the payload portion of a log line. Structured values
    /// are tagged with the JSON marker and pretty-printed on the
    /// following lines.
    pub fn render(&self) -> String {
        match self {
            Message::Text(text) => text.clone(),
            Message::Json(value) => {
                let pretty = serde_json::to_string_pretty(value)
                    .unwrap_or_else(|_| value.to_string());
                format!("{}\n{}", JSON_MARKER, pretty)
            }
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Message::Json(value)
    }
}

/// Where a log call originated. File and line are captured from the
/// calling frame; the scope label (for example `Worker::run`) is only
/// present when a caller supplies one.
#[derive(Clone, Debug, PartialEq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
    pub scope: Option<String>,
}

impl CallSite {
    /// Captures the file and line of the calling frame.
    #[track_caller]
    pub fn here() -> Self {
        let location = std::panic::Location::caller();
        Self {
            file: location.file().to_string(),
            line: location.line(),
            scope: None,
        }
    }

    /// Attaches a scope label such as a type or function name.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// A fully-resolved log record, ready to render.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub ip: Option<String>,
    pub level: Level,
    pub site: Option<CallSite>,
    pub message: Message,
}

impl LogEntry {
    /// Renders the entry as a single newline-terminated log line,
    /// joining the present segments with single spaces.
    pub fn to_line(&self) -> String {
        let mut segments: Vec<String> = Vec::new();
        segments.push(format!("[{}]", self.timestamp.format("%Y-%m-%d %H:%M:%S")));
        if let Some(ip) = &self.ip {
            segments.push(format!("[{}]", ip));
        }
        segments.push(format!("[{}]", self.level.as_str()));
        if let Some(site) = &self.site {
            if let Some(scope) = &site.scope {
                segments.push(format!("[{}]", scope));
            }
            segments.push(format!("({}:{})", site.file, site.line));
        }
        let message = self.message.render();
        if !message.is_empty() {
            segments.push(message);
        }
        let mut line = segments.join(" ");
        line.push('\n');
        line
    }
}
