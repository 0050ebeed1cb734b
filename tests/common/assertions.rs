//! Domain-specific assertion macros for applog harnesses.
//!
//! These add context-rich failure messages that make it clear *which* store
//! invariant was violated.

use applog::LogEntry;

/// Assert that entry ids are strictly increasing.
///
/// ```rust
/// assert_ids_increasing!(store.snapshot());
/// ```
#[macro_export]
macro_rules! assert_ids_increasing {
    ($entries:expr) => {{
        let entries: &[applog::LogEntry] = &$entries;
        for pair in entries.windows(2) {
            if pair[0].id >= pair[1].id {
                panic!(
                    "assert_ids_increasing! failed: id {} followed by id {}\n  messages: {:?} then {:?}",
                    pair[0].id, pair[1].id, pair[0].message, pair[1].message
                );
            }
        }
    }};
}

/// Assert that an entry has a specific level.
#[macro_export]
macro_rules! assert_level {
    ($entry:expr, $level:expr) => {{
        let entry: &applog::LogEntry = &$entry;
        let expected: applog::LogLevel = $level;
        if entry.level != expected {
            panic!(
                "assert_level! failed:\n  expected: {:?}\n  actual:   {:?}\n  message: {:?}",
                expected, entry.level, entry.message
            );
        }
    }};
}

/// Ids of `entries`, in order.
pub fn ids(entries: &[LogEntry]) -> Vec<u64> {
    entries.iter().map(|e| e.id).collect()
}

/// Messages of `entries`, in order.
pub fn messages(entries: &[LogEntry]) -> Vec<String> {
    entries.iter().map(|e| e.message.clone()).collect()
}

/// `Debug` renderings of an entry's args, in order.
pub fn rendered_args(entry: &LogEntry) -> Vec<String> {
    entry.args.iter().map(|a| format!("{a:?}")).collect()
}
