//! Static fixtures used across harnesses.

use applog::LogLevel;

/// Module names seen in a typical session, including one outside the
/// well-known set.
pub const SESSION_MODULES: &[&str] = &["App", "Service", "AI", "Channel", "Updater"];

/// `(level, module, message)` triples in the order a startup session emits them.
pub const STARTUP_SESSION: &[(LogLevel, &str, &str)] = &[
    (LogLevel::Info, "App", "App mounted"),
    (LogLevel::Info, "App", "checking system environment..."),
    (LogLevel::Debug, "Service", "polling service status"),
    (LogLevel::Warn, "Channel", "channel token missing"),
    (LogLevel::Debug, "AI", "loading provider list"),
    (LogLevel::Error, "AI", "connection test failed"),
    (LogLevel::Info, "Updater", "update available"),
];
