//! Leveled, file-backed logging with named targets, daily rotation,
//! and an optional process-wide facade.

pub mod config;
pub mod env;
pub mod error;
pub mod format;
pub mod ip;
pub mod level;
pub mod logger;
pub mod registry;
pub mod rotation;
pub mod writer;

pub use error::{LogbookError, Result};
pub use level::Level;
pub use logger::Logbook;

#[cfg(test)]
mod tests;
