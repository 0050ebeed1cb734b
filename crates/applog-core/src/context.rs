//! Wiring of store, level policy and console into one injectable context.
//!
//! Everything that needs to log receives a [`LogContext`] (or a
//! [`ModuleLogger`] built from one). Tests build isolated contexts; the
//! process-wide instance in [`crate::global`] is just one of these.

use std::sync::Arc;

use crate::config::Config;
use crate::console::{Console, OutputChannel, TerminalChannel};
use crate::error::ParseLevelError;
use crate::level::{FileStore, KeyValueStore, LevelPolicy, MemoryStore, LEVEL_KEY};
use crate::logger::ModuleLogger;
use crate::store::{LogStore, DEFAULT_CAPACITY};
use crate::theme::Theme;
use crate::types::LogLevel;

/// Shared handles for one logging domain.
#[derive(Clone, Debug)]
pub struct LogContext {
    store: Arc<LogStore>,
    policy: LevelPolicy,
    console: Option<Arc<Console>>,
}

impl Default for LogContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogContext {
    pub fn builder() -> LogContextBuilder {
        LogContextBuilder::default()
    }

    /// Build the context described by `config`: file-backed level settings
    /// and, if enabled, a terminal console.
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::builder()
            .capacity(config.store.capacity)
            .level_key(config.level.key.clone())
            .level_backend(Arc::new(FileStore::new(config.settings_path())));

        if config.console.enabled {
            let mut theme = Theme::load_default();
            theme.set_module_colors(&config.modules);
            builder = builder
                .output(Arc::new(TerminalChannel::new(config.console.ansi)))
                .theme(theme)
                .timestamp_format(config.console.timestamp_format.clone());
        }
        builder.build()
    }

    pub fn store(&self) -> &Arc<LogStore> {
        &self.store
    }

    pub fn policy(&self) -> &LevelPolicy {
        &self.policy
    }

    pub fn console(&self) -> Option<&Arc<Console>> {
        self.console.as_ref()
    }

    /// A logger bound to `module`.
    pub fn logger(&self, module: &str) -> ModuleLogger {
        let logger = ModuleLogger::new(module, self.store.clone(), self.policy.clone());
        match &self.console {
            Some(console) => logger.with_console(console.clone()),
            None => logger,
        }
    }

    pub fn current_level(&self) -> LogLevel {
        self.policy.current_level()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.policy.set_level(level);
    }

    pub fn set_level_str(&self, input: &str) -> Result<LogLevel, ParseLevelError> {
        self.policy.set_level_str(input)
    }

    /// Print the operator banner explaining how to change verbosity.
    pub fn announce(&self) {
        if let Some(console) = &self.console {
            console.notice("🦞 applog logging enabled");
            console.notice("use `applog set-level debug|info|warn|error` to change verbosity");
        }
    }
}

/// Builder for [`LogContext`].
///
/// Defaults: capacity [`DEFAULT_CAPACITY`], an in-memory level backend, no
/// console.
pub struct LogContextBuilder {
    capacity: usize,
    backend: Option<Arc<dyn KeyValueStore>>,
    level_key: String,
    output: Option<Arc<dyn OutputChannel>>,
    theme: Option<Theme>,
    timestamp_format: Option<String>,
}

impl Default for LogContextBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            backend: Some(Arc::new(MemoryStore::new())),
            level_key: LEVEL_KEY.to_string(),
            output: None,
            theme: None,
            timestamp_format: None,
        }
    }
}

impl LogContextBuilder {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn level_backend(mut self, backend: Arc<dyn KeyValueStore>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Run without any persistence layer; the level is pinned to the default.
    pub fn without_level_backend(mut self) -> Self {
        self.backend = None;
        self
    }

    pub fn level_key(mut self, key: impl Into<String>) -> Self {
        self.level_key = key.into();
        self
    }

    pub fn output(mut self, channel: Arc<dyn OutputChannel>) -> Self {
        self.output = Some(channel);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    pub fn build(self) -> LogContext {
        let console = self.output.map(|channel| {
            let mut console = Console::new(channel);
            if let Some(theme) = self.theme {
                console = console.with_theme(theme);
            }
            if let Some(format) = self.timestamp_format {
                console = console.with_timestamp_format(format);
            }
            Arc::new(console)
        });

        let mut policy = LevelPolicy::new(self.backend).with_key(self.level_key);
        if let Some(console) = &console {
            policy = policy.with_console(console.clone());
        }

        LogContext {
            store: Arc::new(LogStore::new(self.capacity)),
            policy,
            console,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
