//! Scheduler collaborator boundary.
//!
//! The engine only computes *when* things should fire; waking up near
//! that moment and re-offering candidates to the orchestrator is the
//! host's job. This trait replaces the source's global timer maps with
//! an explicit, injectable collaborator whose lifecycle the host owns.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// A host-provided timer facility keyed by opaque strings.
pub trait Scheduler {
    /// Arrange a wake-up at `at` for `key`, replacing any previous
    /// schedule for the same key.
    fn schedule(&mut self, key: &str, at: DateTime<Utc>);

    /// Drop any pending wake-up for `key`.
    fn cancel(&mut self, key: &str);
}

/// Map-backed scheduler for tests and simple single-process hosts.
/// Records what was asked of it; the host drains due entries on its
/// own tick.
#[derive(Debug, Default)]
pub struct InMemoryScheduler {
    pending: HashMap<String, DateTime<Utc>>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `key` is scheduled to fire, if at all.
    pub fn scheduled_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.pending.get(key).copied()
    }

    /// Remove and return all keys due at or before `now`.
    pub fn drain_due(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let due: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, &at)| at <= now)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &due {
            self.pending.remove(key);
        }
        let mut due = due;
        due.sort();
        due
    }

    /// Number of pending wake-ups.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Scheduler for InMemoryScheduler {
    fn schedule(&mut self, key: &str, at: DateTime<Utc>) {
        self.pending.insert(key.to_string(), at);
    }

    fn cancel(&mut self, key: &str) {
        self.pending.remove(key);
    }
}
