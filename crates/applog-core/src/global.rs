//! Process-wide control surface.
//!
//! One [`LogContext`] per process, reachable from anywhere so an operator or
//! a debugging console can inspect history and change verbosity without
//! touching calling code. Library code should still prefer an injected
//! context; this is the handle of last resort.
//!
//! If nothing is installed, the first access lazily creates a context with a
//! terminal console and an in-memory level backend.

use std::sync::{Arc, OnceLock};

use crate::console::TerminalChannel;
use crate::context::LogContext;
use crate::error::{InstallError, ParseLevelError};
use crate::logger::ModuleLogger;
use crate::store::LogStore;
use crate::types::LogLevel;

static CONTEXT: OnceLock<LogContext> = OnceLock::new();

/// Install `context` as the process-wide instance.
///
/// Fails if a context was already installed or lazily created.
pub fn install(context: LogContext) -> Result<&'static LogContext, InstallError> {
    let mut fresh = Some(context);
    let installed = CONTEXT.get_or_init(|| fresh.take().unwrap_or_default());
    if fresh.is_some() {
        return Err(InstallError);
    }
    tracing::debug!(capacity = installed.store().capacity(), "installed process-wide log context");
    Ok(installed)
}

/// The process-wide context, created on first use if none was installed.
pub fn context() -> &'static LogContext {
    CONTEXT.get_or_init(|| {
        LogContext::builder()
            .output(Arc::new(TerminalChannel::new(true)))
            .build()
    })
}

pub fn is_installed() -> bool {
    CONTEXT.get().is_some()
}

/// The shared store, for inspecting history.
pub fn log_store() -> Arc<LogStore> {
    context().store().clone()
}

pub fn logger(module: &str) -> ModuleLogger {
    context().logger(module)
}

pub fn set_log_level(level: LogLevel) {
    context().set_level(level);
}

pub fn set_log_level_str(input: &str) -> Result<LogLevel, ParseLevelError> {
    context().set_level_str(input)
}
