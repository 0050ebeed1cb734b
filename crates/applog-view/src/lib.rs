//! applog-view: state for a live log-viewer page.
//!
//! A [`LogView`] subscribes to a [`LogStore`](applog_core::LogStore) once,
//! re-reads the snapshot whenever it is notified, and unsubscribes when
//! dropped. Rendering is left to the host.

pub mod filter;
pub mod view;

pub use filter::LogFilter;
pub use view::{LevelCounts, LogView};
