//! Live log view: the state behind a log-viewer page.
//!
//! # Refresh semantics
//!
//! The view subscribes to the store once. The callback only flips a dirty
//! flag; [`LogView::refresh`] re-reads the snapshot when the flag is set, so
//! the owner decides when to do the copying (typically once per frame).
//!
//! While paused, `refresh` leaves the visible entries alone and counts how
//! many newer entries are waiting in `buffered_new`. Resuming pulls them in.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use applog_core::{LogEntry, LogLevel, LogStore, Subscription};

use crate::filter::LogFilter;

/// Per-level totals over the entries currently held by the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub debug: usize,
    pub info: usize,
    pub warn: usize,
    pub error: usize,
}

impl LevelCounts {
    pub fn total(&self) -> usize {
        self.debug + self.info + self.warn + self.error
    }

    pub fn get(&self, level: LogLevel) -> usize {
        match level {
            LogLevel::Debug => self.debug,
            LogLevel::Info => self.info,
            LogLevel::Warn => self.warn,
            LogLevel::Error => self.error,
        }
    }

    fn add(&mut self, level: LogLevel) {
        match level {
            LogLevel::Debug => self.debug += 1,
            LogLevel::Info => self.info += 1,
            LogLevel::Warn => self.warn += 1,
            LogLevel::Error => self.error += 1,
        }
    }
}

pub struct LogView {
    store: Arc<LogStore>,
    subscription: Subscription,
    dirty: Arc<AtomicBool>,
    entries: Vec<LogEntry>,
    pub filter: LogFilter,
    paused: bool,
    /// Entries that arrived while paused and are not yet visible.
    buffered_new: usize,
}

impl std::fmt::Debug for LogView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogView")
            .field("entries", &self.entries.len())
            .field("filter", &self.filter)
            .field("paused", &self.paused)
            .field("buffered_new", &self.buffered_new)
            .finish()
    }
}

impl LogView {
    /// Subscribe to `store` and load its current contents.
    pub fn attach(store: Arc<LogStore>) -> Self {
        let dirty = Arc::new(AtomicBool::new(false));
        let flag = dirty.clone();
        let subscription = store.subscribe(move || flag.store(true, Ordering::Release));
        let entries = store.snapshot();
        tracing::debug!(entries = entries.len(), "log view attached");
        Self {
            store,
            subscription,
            dirty,
            entries,
            filter: LogFilter::default(),
            paused: false,
            buffered_new: 0,
        }
    }

    /// Whether the store changed since the last refresh.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Re-read the store if it changed. Returns `true` if the visible
    /// entries were replaced.
    pub fn refresh(&mut self) -> bool {
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return false;
        }
        if self.paused {
            let newest = self.entries.last().map_or(0, |e| e.id);
            self.buffered_new = self.store.since(newest).len();
            return false;
        }
        self.entries = self.store.snapshot();
        true
    }

    /// Every entry held by the view, oldest first, ignoring the filter.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries passing the current filter, oldest first.
    pub fn visible(&self) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| self.filter.matches(e)).collect()
    }

    pub fn counts(&self) -> LevelCounts {
        let mut counts = LevelCounts::default();
        for entry in &self.entries {
            counts.add(entry.level);
        }
        counts
    }

    /// Distinct module names, sorted.
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self.entries.iter().map(|e| e.module.as_str()).collect();
        modules.sort_unstable();
        modules.dedup();
        modules
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume live tail and pull in anything that arrived while paused.
    pub fn resume(&mut self) {
        self.paused = false;
        self.buffered_new = 0;
        self.dirty.store(true, Ordering::Release);
        self.refresh();
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn buffered_new(&self) -> usize {
        self.buffered_new
    }

    /// The "clear logs" action: empties the shared store, then this view.
    pub fn clear_logs(&mut self) {
        self.store.clear();
        self.buffered_new = 0;
        self.dirty.store(true, Ordering::Release);
        let paused = std::mem::replace(&mut self.paused, false);
        self.refresh();
        self.paused = paused;
    }

    /// Unsubscribe and drop the view.
    pub fn detach(self) {}
}

impl Drop for LogView {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
        tracing::debug!("log view detached");
    }
}
