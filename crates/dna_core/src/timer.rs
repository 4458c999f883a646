use std::time::Duration;

use crate::input::{GameEvent, TimerId};

struct Entry {
    id: TimerId,
    remaining: Duration,
    period: Duration,
    repeat: bool,
}

/// Frame-driven timers that fire `GameEvent::Timer` events.
#[derive(Default)]
pub struct Timers {
    entries: Vec<Entry>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `id` to fire after `delay`. Rescheduling an id replaces the
    /// pending entry.
    pub fn schedule(&mut self, id: TimerId, delay: Duration, repeat: bool) {
        self.cancel(id);
        self.entries.push(Entry {
            id,
            remaining: delay,
            period: delay,
            repeat,
        });
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Advance all timers by `dt` and return the events that fired, in
    /// scheduling order. A repeating timer fires at most once per call.
    pub fn advance(&mut self, dt: Duration) -> Vec<GameEvent> {
        let mut fired = Vec::new();
        self.entries.retain_mut(|entry| {
            if entry.remaining > dt {
                entry.remaining -= dt;
                return true;
            }
            fired.push(GameEvent::Timer(entry.id));
            if entry.repeat && !entry.period.is_zero() {
                entry.remaining = entry.period;
                true
            } else {
                false
            }
        });
        fired
    }
}
