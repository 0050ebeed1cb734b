//! applog-core: bounded, subscribable in-process log store.
//!
//! This crate exposes the logging pipeline as public modules, plus the shared
//! types used across all of them.
//!
//! # Architecture
//!
//! ```text
//! ModuleLogger ──► LevelPolicy (gate) ──► Console (display line)
//!       │
//!       └──────────────────────────────► LogStore ──► subscribers
//! ```
//!
//! Everything runs synchronously on the caller's thread. Subscriber callbacks
//! fire after each `append`/`clear` has been committed.

pub mod config;
pub mod console;
pub mod context;
pub mod error;
pub mod global;
pub mod level;
pub mod logger;
pub mod store;
pub mod theme;
pub mod types;

pub use console::{CaptureChannel, Console, ConsoleLine, OutputChannel, TerminalChannel};
pub use context::{LogContext, LogContextBuilder};
pub use error::{InstallError, ParseLevelError, PersistError};
pub use level::{FileStore, KeyValueStore, LevelPolicy, MemoryStore};
pub use logger::{modules, ModuleLogger};
pub use store::{LogStore, Subscription};
pub use types::{arg, LogArg, LogEntry, LogLevel, NewEntry};
