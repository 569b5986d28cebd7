//! Logging utilities for the application

use chrono::Local;

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Normal execution, no verbose flag
    Normal = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

/// Render a message for `level`, or `None` if `verbosity` is too low to show it
fn format_line(msg: &str, verbosity: u8, level: LogLevel) -> Option<String> {
    if verbosity < level as u8 {
        return None;
    }
    Some(match level {
        LogLevel::Normal => msg.to_string(),
        LogLevel::Info => format!("info: {msg}"),
        LogLevel::Debug => format!("dbg [{}]: {msg}", Local::now().format("%H:%M:%S%.3f")),
    })
}

/// Logger for application messages
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    verbosity: u8,
}

impl Logger {
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    /// Log a message if the current verbosity level is at least the specified level
    pub fn log(&self, msg: &str, level: LogLevel) {
        log(msg, self.verbosity, level);
    }

    /// Always displayed
    pub fn normal(&self, msg: &str) {
        self.log(msg, LogLevel::Normal);
    }

    /// Displayed with -v
    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }

    /// Displayed with -v -v
    pub fn debug(&self, msg: &str) {
        self.log(msg, LogLevel::Debug);
    }
}

// Module-level functions for callers that only carry a verbosity level, such as the storage client

/// Log a message if the verbosity level is at least the specified level
///
/// # Arguments
///
/// * `msg` - The message to log
/// * `verbosity` - The current verbosity level (0 = normal, 1 = info, 2+ = debug)
/// * `level` - The minimum level required for this message to be logged
pub fn log(msg: &str, verbosity: u8, level: LogLevel) {
    if let Some(line) = format_line(msg, verbosity, level) {
        println!("{line}");
    }
}

/// Log at debug level (verbose >= 2)
pub fn debug(msg: &str, verbosity: u8) {
    log(msg, verbosity, LogLevel::Debug)
}
