//! Store: in-memory ring buffer of [`LogEntry`] values with synchronous change
//! notification.
//!
//! The store is the single source of truth; viewers read from it, never from
//! the loggers. Every mutation (`append`, `clear`) commits under the state
//! lock, releases it, and only then calls each subscriber with no arguments.
//! Subscribers are expected to call [`LogStore::snapshot`] if they need data,
//! which is why callbacks must never run while the lock is held.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::types::{LogEntry, NewEntry};

/// Number of entries kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 500;

type Callback = Arc<dyn Fn() + Send + Sync>;

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Ring {
    entries: VecDeque<LogEntry>,
    /// Last id handed out. Survives eviction and `clear`.
    last_id: u64,
}

#[derive(Default)]
struct Registry {
    next_key: u64,
    callbacks: BTreeMap<u64, Callback>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking subscriber never holds either lock, so poisoned state is
    // still consistent.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// LogStore
// ---------------------------------------------------------------------------

/// Bounded, ordered, observable record of log entries.
///
/// Holds at most [`capacity`](LogStore::capacity) entries; appending past that
/// evicts from the head (oldest first). Ids are assigned here and are strictly
/// increasing for the lifetime of the store.
pub struct LogStore {
    capacity: usize,
    ring: Mutex<Ring>,
    registry: Arc<Mutex<Registry>>,
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for LogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ring = lock(&self.ring);
        f.debug_struct("LogStore")
            .field("capacity", &self.capacity)
            .field("len", &ring.entries.len())
            .field("last_id", &ring.last_id)
            .field("subscribers", &lock(&self.registry).callbacks.len())
            .finish()
    }
}

impl LogStore {
    /// Create an empty store. A capacity of zero is allowed: ids are still
    /// issued and subscribers still notified, but nothing is retained.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ring: Mutex::new(Ring {
                entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
                last_id: 0,
            }),
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        lock(&self.ring).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recently issued id, or 0 if nothing has been appended yet.
    pub fn last_id(&self) -> u64 {
        lock(&self.ring).last_id
    }

    /// Assign the next id, push to the tail, evict down to capacity, then
    /// notify subscribers. Returns the assigned id.
    pub fn append(&self, entry: NewEntry) -> u64 {
        let id = {
            let mut ring = lock(&self.ring);
            ring.last_id += 1;
            let id = ring.last_id;
            ring.entries.push_back(entry.into_entry(id));
            while ring.entries.len() > self.capacity {
                ring.entries.pop_front();
            }
            id
        };
        self.notify();
        id
    }

    /// Independent copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        lock(&self.ring).entries.iter().cloned().collect()
    }

    /// The newest `n` entries, oldest first.
    pub fn latest(&self, n: usize) -> Vec<LogEntry> {
        let ring = lock(&self.ring);
        let skip = ring.entries.len().saturating_sub(n);
        ring.entries.iter().skip(skip).cloned().collect()
    }

    /// Entries with an id strictly greater than `id`, oldest first.
    pub fn since(&self, id: u64) -> Vec<LogEntry> {
        let ring = lock(&self.ring);
        // Ids are sorted, so everything newer sits in a contiguous tail.
        let start = ring.entries.partition_point(|entry| entry.id <= id);
        ring.entries.range(start..).cloned().collect()
    }

    /// Drop every entry and notify subscribers. The id counter is untouched.
    pub fn clear(&self) {
        lock(&self.ring).entries.clear();
        self.notify();
    }

    /// Register `callback` for every future `append` and `clear`.
    ///
    /// The returned [`Subscription`] does not unsubscribe on drop; call
    /// [`Subscription::unsubscribe`] explicitly.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let key = registry.next_key;
        registry.next_key += 1;
        registry.callbacks.insert(key, Arc::new(callback));
        Subscription {
            registry: Arc::downgrade(&self.registry),
            key,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).callbacks.len()
    }

    fn notify(&self) {
        let callbacks: Vec<Callback> = lock(&self.registry).callbacks.values().cloned().collect();
        for callback in callbacks {
            callback();
        }
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Handle returned by [`LogStore::subscribe`].
#[derive(Debug, Clone)]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    key: u64,
}

impl Subscription {
    /// Remove this callback from the store. Calling it again, or after the
    /// store is gone, does nothing.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).callbacks.remove(&self.key);
        }
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| lock(&registry).callbacks.contains_key(&self.key))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(message: &str) -> NewEntry {
        NewEntry::new(LogLevel::Info, "Test", message)
    }

    #[test]
    fn ids_start_at_one() {
        let store = LogStore::new(4);
        assert_eq!(store.last_id(), 0);
        assert_eq!(store.append(entry("a")), 1);
        assert_eq!(store.append(entry("b")), 2);
    }

    #[test]
    fn latest_returns_tail_in_order() {
        let store = LogStore::new(10);
        for i in 0..5 {
            store.append(entry(&format!("m{i}")));
        }
        let ids: Vec<u64> = store.latest(2).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 5]);
        assert_eq!(store.latest(100).len(), 5);
    }

    #[test]
    fn since_skips_seen_entries() {
        let store = LogStore::new(3);
        for i in 0..5 {
            store.append(entry(&format!("m{i}")));
        }
        let ids: Vec<u64> = store.since(3).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 5]);
        // Ids older than the retained window return everything retained.
        assert_eq!(store.since(0).len(), 3);
        assert!(store.since(5).is_empty());
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let store = LogStore::new(0);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(store.append(entry("gone")), 1);
        assert!(store.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscription_outliving_store_is_inert() {
        let store = LogStore::new(2);
        let sub = store.subscribe(|| {});
        assert!(sub.is_active());
        drop(store);
        assert!(!sub.is_active());
        sub.unsubscribe();
    }
}
