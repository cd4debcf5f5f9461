//! Append-only attempt log for one worker run.
//!
//! Every entry is mirrored as a tracing event and, when echo is on, printed to
//! stdout as `[timestamp] [LEVEL] message`. The entries are written verbatim to
//! the results file at the end of the run.

use chrono::Local;
use serde::Serialize;
use std::fmt;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<LogEntry>,
    echo: bool,
}

impl RunLog {
    /// Log that only records entries (and tracing events).
    pub fn new() -> Self {
        Self::default()
    }

    /// Log that also prints each entry to stdout.
    pub fn echoing() -> Self {
        Self {
            entries: Vec::new(),
            echo: true,
        }
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        match level {
            LogLevel::Error => tracing::error!(target: "jetour::run", "{}", message),
            LogLevel::Success => tracing::info!(target: "jetour::run", success = true, "{}", message),
            LogLevel::Info => tracing::info!(target: "jetour::run", "{}", message),
        }
        if self.echo {
            println!("[{}] [{}] {}", timestamp, level, message);
        }
        self.entries.push(LogEntry {
            timestamp,
            level,
            message,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }
}
