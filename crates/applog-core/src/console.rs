//! Host text-output channel.
//!
//! Every log call that passes the level gate produces one [`ConsoleLine`]:
//! a local `HH:MM:SS.mmm` timestamp, the `[module]` tag, the message, and the
//! `Debug` form of each argument. Lines carry their styling as segments so
//! that channels decide whether to emit ANSI escapes.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use crossterm::style::{ContentStyle, StyledContent};

use crate::theme::Theme;
use crate::types::{LogLevel, NewEntry};

/// Default `chrono` format for console timestamps.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

// ---------------------------------------------------------------------------
// ConsoleLine
// ---------------------------------------------------------------------------

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: ContentStyle,
}

/// One formatted line for the output channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    /// `None` for operator notices that are not log entries.
    pub level: Option<LogLevel>,
    pub segments: Vec<Segment>,
}

impl ConsoleLine {
    /// The line without styling.
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// The line with ANSI escape sequences.
    pub fn ansi(&self) -> String {
        self.segments
            .iter()
            .map(|s| StyledContent::new(s.style, s.text.as_str()).to_string())
            .collect()
    }

    /// Whether this line belongs on the error stream.
    pub fn is_emphasised(&self) -> bool {
        matches!(self.level, Some(LogLevel::Warn | LogLevel::Error))
    }
}

// ---------------------------------------------------------------------------
// Output channels
// ---------------------------------------------------------------------------

/// Destination for formatted console lines.
///
/// Implementations must not fail visibly; a write error is dropped.
pub trait OutputChannel: Send + Sync {
    fn write_line(&self, line: &ConsoleLine);
}

/// Writes `warn`/`error` lines to stderr and everything else to stdout.
#[derive(Debug, Clone, Copy)]
pub struct TerminalChannel {
    ansi: bool,
}

impl TerminalChannel {
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }
}

impl OutputChannel for TerminalChannel {
    fn write_line(&self, line: &ConsoleLine) {
        let text = if self.ansi { line.ansi() } else { line.plain() };
        let _ = if line.is_emphasised() {
            writeln!(io::stderr().lock(), "{text}")
        } else {
            writeln!(io::stdout().lock(), "{text}")
        };
    }
}

/// Keeps every line in memory. Used by tests and by embedders that forward
/// lines elsewhere.
#[derive(Debug, Default)]
pub struct CaptureChannel {
    lines: Mutex<Vec<ConsoleLine>>,
}

impl CaptureChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<ConsoleLine> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Captured lines without styling.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines().iter().map(ConsoleLine::plain).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OutputChannel for CaptureChannel {
    fn write_line(&self, line: &ConsoleLine) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.clone());
    }
}

/// Whether chrono can render `format` without error items.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

// ---------------------------------------------------------------------------
// Console: formatter + channel
// ---------------------------------------------------------------------------

/// Formats entries with a [`Theme`] and hands them to an [`OutputChannel`].
pub struct Console {
    channel: std::sync::Arc<dyn OutputChannel>,
    theme: Theme,
    timestamp_format: String,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("timestamp_format", &self.timestamp_format)
            .finish_non_exhaustive()
    }
}

impl Console {
    pub fn new(channel: std::sync::Arc<dyn OutputChannel>) -> Self {
        Self {
            channel,
            theme: Theme::load_default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Use `format` for timestamps. A format chrono cannot render is replaced
    /// by [`DEFAULT_TIMESTAMP_FORMAT`].
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        let format = format.into();
        if is_valid_timestamp_format(&format) {
            self.timestamp_format = format;
        } else {
            tracing::warn!(
                format = %format,
                fallback = DEFAULT_TIMESTAMP_FORMAT,
                "invalid timestamp format; using default"
            );
            self.timestamp_format = DEFAULT_TIMESTAMP_FORMAT.to_string();
        }
        self
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Build the display line for an entry.
    pub fn format_entry(&self, entry: &NewEntry) -> ConsoleLine {
        let time = entry
            .timestamp
            .with_timezone(&Local)
            .format(&self.timestamp_format)
            .to_string();

        let mut segments = vec![
            Segment {
                text: time,
                style: self.theme.timestamp,
            },
            Segment {
                text: " ".to_string(),
                style: ContentStyle::new(),
            },
            Segment {
                text: format!("[{}]", entry.module),
                style: self.theme.module_style(&entry.module),
            },
            Segment {
                text: " ".to_string(),
                style: ContentStyle::new(),
            },
            Segment {
                text: entry.message.clone(),
                style: self.theme.level_style(entry.level),
            },
        ];
        segments.extend(entry.args.iter().map(|arg| Segment {
            text: format!(" {arg:?}"),
            style: ContentStyle::new(),
        }));

        ConsoleLine {
            level: Some(entry.level),
            segments,
        }
    }

    /// Format and write an entry.
    pub fn write_entry(&self, entry: &NewEntry) {
        self.channel.write_line(&self.format_entry(entry));
    }

    /// Write an operator notice in the notice style.
    pub fn notice(&self, text: impl Into<String>) {
        self.channel.write_line(&ConsoleLine {
            level: None,
            segments: vec![Segment {
                text: text.into(),
                style: self.theme.notice,
            }],
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
