//! Append-only telemetry log with wall-clock timestamps

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::utils::Clock;

/// Category of a telemetry message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Text weight used when a severity is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Regular,
    Bold,
    Heavy,
}

/// Presentation attributes of a severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    pub label: &'static str,
    pub prefix: &'static str,
    pub emphasis: Emphasis,
    pub uppercase: bool,
    /// SGR color parameter for terminals
    pub ansi_color: &'static str,
}

impl Severity {
    pub fn style(self) -> SeverityStyle {
        match self {
            Severity::Info => SeverityStyle {
                label: "INFO",
                prefix: "",
                emphasis: Emphasis::Regular,
                uppercase: false,
                ansi_color: "37",
            },
            Severity::Success => SeverityStyle {
                label: "SUCCESS",
                prefix: "",
                emphasis: Emphasis::Bold,
                uppercase: false,
                ansi_color: "32",
            },
            Severity::Warning => SeverityStyle {
                label: "WARNING",
                prefix: "",
                emphasis: Emphasis::Bold,
                uppercase: false,
                ansi_color: "33",
            },
            Severity::Error => SeverityStyle {
                label: "ERROR",
                prefix: ">> ERR: ",
                emphasis: Emphasis::Heavy,
                uppercase: true,
                ansi_color: "31",
            },
        }
    }

    /// Message text with the severity's prefix and casing applied
    pub fn decorate(self, message: &str) -> String {
        let style = self.style();
        let body = if style.uppercase {
            message.to_uppercase()
        } else {
            message.to_string()
        };
        format!("{}{}", style.prefix, body)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.style().label)
    }
}

/// One immutable telemetry message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
    pub severity: Severity,
}

/// Ordered record of run events
pub struct TelemetryLog {
    entries: Vec<LogEntry>,
    clock: Arc<dyn Clock>,
    last_instant: Option<DateTime<FixedOffset>>,
}

impl TelemetryLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Vec::new(),
            clock,
            last_instant: None,
        }
    }

    /// Appends a message stamped with the current time
    ///
    /// A clock reading earlier than the previous entry is clamped to the previous
    /// instant so timestamps never go backwards.
    pub fn append(&mut self, message: impl Into<String>, severity: Severity) -> LogEntry {
        let now = self.clock.now();
        let instant = match self.last_instant {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_instant = Some(instant);

        let entry = LogEntry {
            timestamp: instant.format("%H:%M:%S").to_string(),
            message: message.into(),
            severity,
        };

        match severity {
            Severity::Info | Severity::Success => info!(severity = %severity, "{}", entry.message),
            Severity::Warning => warn!("{}", entry.message),
            Severity::Error => error!("{}", entry.message),
        }

        self.entries.push(entry.clone());
        entry
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_instant = None;
    }

    /// Full ordered snapshot
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }
}

impl fmt::Debug for TelemetryLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryLog")
            .field("entries", &self.entries)
            .field("last_instant", &self.last_instant)
            .finish()
    }
}
