//! Test builders: ergonomic constructors for entries, stores and contexts.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use applog::{
    CaptureChannel, LogArg, LogContext, LogLevel, LogStore, MemoryStore, NewEntry, Subscription,
};

// ---------------------------------------------------------------------------
// NewEntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`NewEntry`] fixtures.
///
/// # Example
///
/// ```rust
/// let entry = NewEntryBuilder::new("service started")
///     .level(LogLevel::Info)
///     .module("Service")
///     .arg(8080)
///     .build();
/// ```
pub struct NewEntryBuilder {
    level: LogLevel,
    module: String,
    message: String,
    args: Vec<LogArg>,
}

impl NewEntryBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Info,
            module: "Testing".to_string(),
            message: message.into(),
            args: Vec::new(),
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn arg<T>(mut self, value: T) -> Self
    where
        T: std::fmt::Debug + Send + Sync + 'static,
    {
        self.args.push(applog::arg(value));
        self
    }

    pub fn build(self) -> NewEntry {
        NewEntry::new(self.level, self.module, self.message).with_args(self.args)
    }
}

/// Build an INFO entry.
pub fn info_entry(message: &str) -> NewEntry {
    NewEntryBuilder::new(message).build()
}

/// Append `n` numbered INFO entries ("line 0", "line 1", ...).
pub fn fill(store: &LogStore, n: usize) {
    for i in 0..n {
        store.append(info_entry(&format!("line {i}")));
    }
}

// ---------------------------------------------------------------------------
// Harness context
// ---------------------------------------------------------------------------

/// An isolated context with an in-memory level backend and a capturing
/// console, plus handles to both.
pub struct Harness {
    pub ctx: LogContext,
    pub console: Arc<CaptureChannel>,
    pub settings: Arc<MemoryStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_capacity(applog_core::store::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let console = Arc::new(CaptureChannel::new());
        let settings = Arc::new(MemoryStore::new());
        let ctx = LogContext::builder()
            .capacity(capacity)
            .level_backend(settings.clone())
            .output(console.clone())
            .build();
        Self {
            ctx,
            console,
            settings,
        }
    }

    pub fn store(&self) -> &Arc<LogStore> {
        self.ctx.store()
    }
}

// ---------------------------------------------------------------------------
// Notification counting
// ---------------------------------------------------------------------------

/// Subscribe a callback that counts notifications.
pub fn counting_subscriber(store: &LogStore) -> (Arc<AtomicUsize>, Subscription) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let sub = store.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (hits, sub)
}

pub fn hits(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
