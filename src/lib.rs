//! applog: bounded, subscribable in-process log store.
//!
//! Every functional module of the application logs through its own
//! [`ModuleLogger`]; all of them feed one shared [`LogStore`], and any number
//! of viewers subscribe to it instead of polling. This crate re-exports the
//! workspace crates so integration tests and the binary import one path.
//!
//! # Architecture
//!
//! ```text
//! ModuleLogger ──► LogStore ──► LogView
//!      │
//!      └──► Console
//! ```

pub mod demo;

pub use applog_core::{
    arg, config, global, log_args, modules, CaptureChannel, Console, ConsoleLine, FileStore,
    InstallError, KeyValueStore, LevelPolicy, LogArg, LogContext, LogContextBuilder, LogEntry,
    LogLevel, LogStore, MemoryStore, ModuleLogger, NewEntry, OutputChannel, ParseLevelError,
    PersistError, Subscription, TerminalChannel,
};
pub use applog_view::{LevelCounts, LogFilter, LogView};
