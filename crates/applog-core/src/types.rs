//! Core types for applog-core.
//!
//! This module defines the data shared by every layer: the stored
//! [`LogEntry`], the caller-built [`NewEntry`] that the store turns into one,
//! the [`LogLevel`] scale, and the opaque [`LogArg`] payload.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseLevelError;

/// An opaque auxiliary value attached to a log call.
///
/// Arguments are shared, never copied or serialised; the only thing the
/// logging path ever does with one is print its `Debug` form.
pub type LogArg = Arc<dyn fmt::Debug + Send + Sync>;

/// Wrap any debuggable value as a [`LogArg`].
pub fn arg<T>(value: T) -> LogArg
where
    T: fmt::Debug + Send + Sync + 'static,
{
    Arc::new(value)
}

/// Build a `Vec<LogArg>` from a list of values.
///
/// ```rust
/// use applog_core::log_args;
/// let args = log_args![42, "ready", vec![1, 2]];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! log_args {
    () => { ::std::vec::Vec::<$crate::LogArg>::new() };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::arg($value)),+]
    };
}

/// Log severity, totally ordered `Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Every level, lowest first.
    pub const ALL: [LogLevel; 4] = [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    /// The lowercase name used in persisted settings.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    /// Accepts the four level names, ignoring ASCII case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError {
                input: s.to_string(),
            })
    }
}

/// A log entry as held by the store. Immutable once created.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Store-assigned sequence number, strictly increasing and never reused.
    pub id: u64,
    /// Creation time, truncated to millisecond precision.
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// Name of the emitting module ("App", "Service", ...). Not validated.
    pub module: String,
    pub message: String,
    /// Auxiliary values in call order.
    pub args: Vec<LogArg>,
}

/// A log entry before the store has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub module: String,
    pub message: String,
    pub args: Vec<LogArg>,
}

impl NewEntry {
    /// Create an entry stamped with the current time.
    pub fn new(level: LogLevel, module: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().trunc_subsecs(3),
            level,
            module: module.into(),
            message: message.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<LogArg>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp.trunc_subsecs(3);
        self
    }

    pub(crate) fn into_entry(self, id: u64) -> LogEntry {
        LogEntry {
            id,
            timestamp: self.timestamp,
            level: self.level,
            module: self.module,
            message: self.message,
            args: self.args,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
