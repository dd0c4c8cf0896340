use std::time::{Duration, Instant};

use super::ChangeEvent;

pub const DEBOUNCE_MS: u64 = 300;
pub const REBUILD_COOLDOWN_MS: u64 = 800;

/// Pure timing accumulator for raw events.
///
/// Events are kept verbatim (duplicates included); filtering and
/// collapsing happen in [`super::filter_events`] and
/// [`super::translate_events`] once the batch is released.
pub struct EventBatch {
    events: Vec<ChangeEvent>,
    last_event: Option<Instant>,
    last_release: Option<Instant>,
    quiet: Duration,
    cooldown: Duration,
}

impl Default for EventBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBatch {
    pub fn new() -> Self {
        Self::with_timing(
            Duration::from_millis(DEBOUNCE_MS),
            Duration::from_millis(REBUILD_COOLDOWN_MS),
        )
    }

    pub fn with_timing(quiet: Duration, cooldown: Duration) -> Self {
        Self {
            events: Vec::new(),
            last_event: None,
            last_release: None,
            quiet,
            cooldown,
        }
    }

    pub fn push(&mut self, event: ChangeEvent) {
        crate::debug!("watch"; "event {}", event);
        self.events.push(event);
        self.last_event = Some(Instant::now());
    }

    /// Add a raw `notify` event.
    pub fn push_notify(&mut self, event: &notify::Event) {
        crate::debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);
        for change in ChangeEvent::from_notify(event) {
            self.push(change);
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Quiet period and cooldown both elapsed, and something is pending.
    pub fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };
        if last_event.elapsed() < self.quiet {
            return false;
        }
        if let Some(last_release) = self.last_release
            && last_release.elapsed() < self.cooldown
        {
            return false;
        }
        !self.events.is_empty()
    }

    /// Take the pending events if the batch is ready.
    pub fn take_if_ready(&mut self) -> Option<Vec<ChangeEvent>> {
        if !self.is_ready() {
            return None;
        }
        self.last_event = None;
        self.last_release = Some(Instant::now());
        Some(std::mem::take(&mut self.events))
    }

    /// Precise sleep duration until next possible ready time.
    pub fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        let quiet_remaining = self.quiet.saturating_sub(last_event.elapsed());
        let cooldown_remaining = self
            .last_release
            .map(|t| self.cooldown.saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO);

        quiet_remaining
            .max(cooldown_remaining)
            .max(Duration::from_millis(1))
    }
}
