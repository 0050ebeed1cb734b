//! Error types for the edges of the logging subsystem.
//!
//! None of these ever reach a caller of a [`ModuleLogger`](crate::ModuleLogger)
//! method; the logging path degrades silently instead.

use std::io;
use std::path::PathBuf;

/// A level name outside `debug | info | warn | error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level {input:?}; expected one of debug, info, warn, error")]
pub struct ParseLevelError {
    pub input: String,
}

/// Failure of a [`KeyValueStore`](crate::level::KeyValueStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write settings file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings file {} is not a JSON object of strings: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Returned by [`global::install`](crate::global::install) once a process-wide
/// context exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a process-wide log context is already installed")]
pub struct InstallError;
