//! Blocking source watcher: `notify` events in, released batches out.

use std::path::PathBuf;

use crossbeam::channel::{self, Receiver, RecvTimeoutError};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use super::{ChangeEvent, EventBatch};

type NotifyResult = notify::Result<notify::Event>;

/// Watches source directories and hands out debounced raw batches.
///
/// The watcher starts in [`SourceWatcher::new`], so events that arrive
/// during the initial build are buffered, not lost.
pub struct SourceWatcher {
    rx: Receiver<NotifyResult>,
    batch: EventBatch,
    _watcher: Option<RecommendedWatcher>,
}

impl SourceWatcher {
    /// Watch every existing directory in `dirs` recursively.
    pub fn new(dirs: &[PathBuf], batch: EventBatch) -> notify::Result<Self> {
        let (tx, rx) = channel::unbounded();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;

        for dir in dirs {
            if dir.exists() {
                watcher.watch(dir, RecursiveMode::Recursive)?;
                crate::debug!("watch"; "watching {}", dir.display());
            }
        }

        Ok(Self {
            rx,
            batch,
            _watcher: Some(watcher),
        })
    }

    /// Feed from an existing channel instead of a filesystem watcher.
    pub fn from_receiver(rx: Receiver<NotifyResult>, batch: EventBatch) -> Self {
        Self {
            rx,
            batch,
            _watcher: None,
        }
    }

    /// Block until a batch is released.
    ///
    /// Returns `None` once the event source is gone and nothing is pending.
    pub fn next_batch(&mut self) -> Option<Vec<ChangeEvent>> {
        loop {
            if let Some(events) = self.batch.take_if_ready() {
                return Some(events);
            }
            match self.rx.recv_timeout(self.batch.sleep_duration()) {
                Ok(Ok(event)) => self.batch.push_notify(&event),
                Ok(Err(e)) => crate::warn!("watch"; "notify error: {e}"),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    if self.batch.is_empty() {
                        return None;
                    }
                    std::thread::sleep(self.batch.sleep_duration());
                }
            }
        }
    }
}
