//! Change detection.
//!
//! Raw filesystem events flow through three stages:
//!
//! ```text
//! SourceWatcher ──► EventBatch ──► filter_events ──► translate_events ──► classify_events
//!                     (timing)       (dedupe, ignore,   (one event per      (identity per
//!                                     non-files)         path)               event, flags)
//! ```
//!
//! Every stage is pure apart from the existence check in the filter.

mod batch;
mod classify;
mod filter;
mod roots;
mod translate;
mod types;
mod watcher;


pub use batch::{DEBOUNCE_MS, EventBatch, REBUILD_COOLDOWN_MS};
pub use classify::{ChangeSet, classify_events};
pub use filter::{SourceFilter, SourceSpec, filter_events, is_temp_file, nfc_path};
pub use roots::SourceRoots;
pub use translate::translate_events;
pub use types::{ChangeEvent, Op};
pub use watcher::SourceWatcher;

/// Filter then translate.
pub fn normalize_events(events: Vec<ChangeEvent>, filter: &impl SourceFilter) -> Vec<ChangeEvent> {
    translate_events(filter_events(events, filter))
}
