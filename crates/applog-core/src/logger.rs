//! Per-module logging façade.
//!
//! A [`ModuleLogger`] binds one module name to the shared [`LogStore`], the
//! [`LevelPolicy`] and (optionally) a [`Console`]. Each call is gated by the
//! policy first; a filtered call does no formatting and touches neither sink.

use std::sync::Arc;

use crate::console::Console;
use crate::level::LevelPolicy;
use crate::store::LogStore;
use crate::types::{arg, LogArg, LogLevel, NewEntry};

/// Names of the application's well-known modules.
pub mod modules {
    pub const APP: &str = "App";
    pub const SERVICE: &str = "Service";
    pub const CONFIG: &str = "Config";
    pub const AI: &str = "AI";
    pub const CHANNEL: &str = "Channel";
    pub const SETUP: &str = "Setup";
    pub const DASHBOARD: &str = "Dashboard";
    pub const TESTING: &str = "Testing";
    pub const API: &str = "API";

    pub const ALL: [&str; 9] = [APP, SERVICE, CONFIG, AI, CHANNEL, SETUP, DASHBOARD, TESTING, API];
}

/// Message prefixes used by the convenience methods.
pub mod markers {
    pub const API_CALL: &str = "📡 API call: ";
    pub const API_RESPONSE: &str = "✅ API response: ";
    pub const API_ERROR: &str = "❌ API error: ";
    pub const ACTION: &str = "👆 User action: ";
    pub const STATE: &str = "📊 State change: ";
}

/// Level-gated logger for a single module.
///
/// Cheap to clone; clones share the store, policy and console.
#[derive(Clone)]
pub struct ModuleLogger {
    module: Arc<str>,
    store: Arc<LogStore>,
    policy: LevelPolicy,
    console: Option<Arc<Console>>,
}

impl std::fmt::Debug for ModuleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleLogger")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

impl ModuleLogger {
    pub fn new(module: impl Into<Arc<str>>, store: Arc<LogStore>, policy: LevelPolicy) -> Self {
        Self {
            module: module.into(),
            store,
            policy,
            console: None,
        }
    }

    pub fn with_console(mut self, console: Arc<Console>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Whether a call at `level` would currently be recorded.
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.policy.enabled(level)
    }

    /// Record `message` at `level` if the policy allows it.
    pub fn log(&self, level: LogLevel, message: impl Into<String>, args: &[LogArg]) {
        self.emit(level, || message.into(), || args.to_vec());
    }

    pub fn debug(&self, message: impl Into<String>, args: &[LogArg]) {
        self.log(LogLevel::Debug, message, args);
    }

    pub fn info(&self, message: impl Into<String>, args: &[LogArg]) {
        self.log(LogLevel::Info, message, args);
    }

    pub fn warn(&self, message: impl Into<String>, args: &[LogArg]) {
        self.log(LogLevel::Warn, message, args);
    }

    pub fn error(&self, message: impl Into<String>, args: &[LogArg]) {
        self.log(LogLevel::Error, message, args);
    }

    /// Outbound API call, at debug.
    pub fn api_call(&self, method: &str, args: &[LogArg]) {
        self.emit(
            LogLevel::Debug,
            || format!("{}{method}", markers::API_CALL),
            || args.to_vec(),
        );
    }

    /// Successful API response, at debug. `result` becomes the only argument.
    pub fn api_response<T>(&self, method: &str, result: T)
    where
        T: std::fmt::Debug + Send + Sync + 'static,
    {
        self.emit(
            LogLevel::Debug,
            || format!("{}{method}", markers::API_RESPONSE),
            || vec![arg(result)],
        );
    }

    /// Failed API call, at error. `error` becomes the only argument.
    pub fn api_error<E>(&self, method: &str, error: E)
    where
        E: std::fmt::Debug + Send + Sync + 'static,
    {
        self.emit(
            LogLevel::Error,
            || format!("{}{method}", markers::API_ERROR),
            || vec![arg(error)],
        );
    }

    /// User-initiated action, at info.
    pub fn action(&self, action: &str, args: &[LogArg]) {
        self.emit(
            LogLevel::Info,
            || format!("{}{action}", markers::ACTION),
            || args.to_vec(),
        );
    }

    /// State transition, at debug. `state` becomes the only argument.
    pub fn state<S>(&self, description: &str, state: S)
    where
        S: std::fmt::Debug + Send + Sync + 'static,
    {
        self.emit(
            LogLevel::Debug,
            || format!("{}{description}", markers::STATE),
            || vec![arg(state)],
        );
    }

    fn emit(
        &self,
        level: LogLevel,
        message: impl FnOnce() -> String,
        args: impl FnOnce() -> Vec<LogArg>,
    ) {
        if !self.policy.enabled(level) {
            return;
        }
        let entry = NewEntry::new(level, &*self.module, message()).with_args(args());
        if let Some(console) = &self.console {
            console.write_entry(&entry);
        }
        self.store.append(entry);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::MemoryStore;
    use crate::log_args;

    fn logger(module: &str) -> (ModuleLogger, Arc<LogStore>, LevelPolicy) {
        let store = Arc::new(LogStore::new(16));
        let policy = LevelPolicy::new(Some(Arc::new(MemoryStore::new())));
        (ModuleLogger::new(module, store.clone(), policy.clone()), store, policy)
    }

    #[test]
    fn entries_carry_module_and_args() {
        let (log, store, _) = logger("Channel");
        log.info("connected", &log_args!["telegram", 3]);
        let entries = store.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].module, "Channel");
        assert_eq!(entries[0].message, "connected");
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[0].args.len(), 2);
    }

    #[test]
    fn filtered_convenience_calls_never_build_arguments() {
        let (log, store, policy) = logger("API");
        policy.set_level(LogLevel::Error);
        log.state("expensive", vec![0u8; 1024]);
        log.api_response("get_status", "ok");
        assert!(store.is_empty());
    }

    #[test]
    fn module_constants_are_distinct() {
        let unique: std::collections::HashSet<_> = modules::ALL.iter().collect();
        assert_eq!(unique.len(), modules::ALL.len());
    }
}
