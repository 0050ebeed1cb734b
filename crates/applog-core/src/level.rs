//! Level policy: resolves the active minimum severity from a persisted
//! key-value setting.
//!
//! The setting is read on every call; nothing is cached, so a level written by
//! [`LevelPolicy::set_level`] (or by another process sharing a [`FileStore`])
//! applies to already-constructed loggers on their next call.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::console::Console;
use crate::error::{ParseLevelError, PersistError};
use crate::types::LogLevel;

/// Settings key holding the level name.
pub const LEVEL_KEY: &str = "LOG_LEVEL";

/// Level used when nothing valid is persisted: show everything.
pub const DEFAULT_LEVEL: LogLevel = LogLevel::Debug;

// ---------------------------------------------------------------------------
// Key-value persistence
// ---------------------------------------------------------------------------

/// A string-to-string persistence layer.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// Process-local settings, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Settings persisted as a flat JSON object of strings.
///
/// A missing file reads as empty. Writes rewrite the whole file and create
/// parent directories as needed.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PersistError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PersistError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| PersistError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        let write_err = |source| PersistError::Write {
            path: self.path.clone(),
            source,
        };
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent,
            None => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(write_err)?;
        let body = serde_json::to_string_pretty(&values).map_err(|source| PersistError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        // Readers see either the old file or the new one, never a partial write.
        let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
        staged.write_all(body.as_bytes()).map_err(write_err)?;
        staged.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LevelPolicy
// ---------------------------------------------------------------------------

/// Resolves and updates the active minimum level.
///
/// Every gate check calls the backend, filtered calls included. With a
/// [`FileStore`] that is a file read and a JSON parse per log call; hot paths
/// should use a [`MemoryStore`].
#[derive(Clone)]
pub struct LevelPolicy {
    backend: Option<Arc<dyn KeyValueStore>>,
    key: String,
    console: Option<Arc<Console>>,
}

impl std::fmt::Debug for LevelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelPolicy")
            .field("backed", &self.backend.is_some())
            .field("key", &self.key)
            .finish()
    }
}

impl LevelPolicy {
    /// A policy over `backend`. `None` models a host without persistence: the
    /// level is always [`DEFAULT_LEVEL`] and `set_level` has no effect.
    pub fn new(backend: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self {
            backend,
            key: LEVEL_KEY.to_string(),
            console: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Console used for the `set_level` confirmation line.
    pub fn with_console(mut self, console: Arc<Console>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The persisted level, or [`DEFAULT_LEVEL`] if the backend is missing,
    /// unreadable, empty, or holds an unknown name.
    pub fn current_level(&self) -> LogLevel {
        let Some(backend) = &self.backend else {
            return DEFAULT_LEVEL;
        };
        match backend.get(&self.key) {
            Ok(Some(value)) => value.parse().unwrap_or(DEFAULT_LEVEL),
            Ok(None) => DEFAULT_LEVEL,
            Err(e) => {
                tracing::trace!(error = %e, "level backend unreadable; using default");
                DEFAULT_LEVEL
            }
        }
    }

    /// Whether a call at `level` passes the gate.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.current_level()
    }

    /// Persist `level` and print a confirmation. Backend failures are logged
    /// through `tracing` and otherwise ignored.
    pub fn set_level(&self, level: LogLevel) {
        let Some(backend) = &self.backend else {
            tracing::debug!(%level, "no level backend; set_level ignored");
            return;
        };
        if let Err(e) = backend.set(&self.key, level.as_str()) {
            tracing::warn!(error = %e, %level, "failed to persist log level");
            return;
        }
        if let Some(console) = &self.console {
            console.notice(format!("Log level set to: {}", level.as_str()));
        }
    }

    /// Parse `input` and persist it. Unknown names are rejected and nothing is
    /// written.
    pub fn set_level_str(&self, input: &str) -> Result<LogLevel, ParseLevelError> {
        let level: LogLevel = input.parse()?;
        self.set_level(level);
        Ok(level)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
