//! Display filters for the log view.

use applog_core::{LogEntry, LogLevel};

/// Which entries the view shows. All criteria must match; an empty filter
/// shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Hide entries below this level.
    pub min_level: Option<LogLevel>,
    /// Exact module name.
    pub module: Option<String>,
    /// Case-insensitive substring of the message or any argument's `Debug`
    /// form. Stored lowercased.
    text: Option<String>,
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Set the search text; blank input clears it.
    pub fn set_text(&mut self, text: &str) {
        let text = text.trim();
        self.text = (!text.is_empty()).then(|| text.to_lowercase());
    }

    pub fn text_query(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.min_level.is_none() && self.module.is_none() && self.text.is_none()
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        if self.min_level.is_some_and(|min| entry.level < min) {
            return false;
        }
        if self.module.as_deref().is_some_and(|m| m != entry.module) {
            return false;
        }
        match &self.text {
            None => true,
            Some(needle) => {
                entry.message.to_lowercase().contains(needle.as_str())
                    || entry
                        .args
                        .iter()
                        .any(|a| format!("{a:?}").to_lowercase().contains(needle.as_str()))
            }
        }
    }
}
