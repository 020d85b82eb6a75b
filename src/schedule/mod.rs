//! Deferred callbacks on a virtual clock.
//!
//! The engine is single-threaded. Instead of sleeping, it schedules tagged
//! entries in a `Scheduler` and the host advances time. Each entry carries
//! the `SessionId` that scheduled it, so replacing a session can revoke
//! everything the old session left behind.
//!
//! ## Ordering
//!
//! Entries fire in due-time order. Entries due at the same instant fire in
//! the order they were scheduled.
//!
//! ```
//! use std::time::Duration;
//! use memory_match::core::CardIndex;
//! use memory_match::engine::SessionId;
//! use memory_match::schedule::{ScheduledTask, Scheduler};
//!
//! let mut scheduler = Scheduler::new();
//! let session = SessionId::new(1);
//! scheduler.schedule(session, Duration::from_millis(1000), ScheduledTask::AnnounceWin);
//! scheduler.schedule(
//!     session,
//!     Duration::from_millis(500),
//!     ScheduledTask::ResolveMatch { first: CardIndex::new(0), second: CardIndex::new(1) },
//! );
//!
//! let first = scheduler.pop_due(Duration::from_millis(2000)).unwrap();
//! assert!(matches!(first.task, ScheduledTask::ResolveMatch { .. }));
//! assert_eq!(scheduler.now(), Duration::from_millis(500));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Duration;
use tracing::trace;

use crate::core::CardIndex;
use crate::engine::SessionId;

/// Handle to a scheduled entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl TimerId {
    /// Create a new timer ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Work deferred until a delay elapses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledTask {
    /// Lock in a matching pair.
    ResolveMatch { first: CardIndex, second: CardIndex },

    /// Turn a mismatched pair face down.
    ResolveMismatch { first: CardIndex, second: CardIndex },

    /// Announce the win.
    AnnounceWin,
}

/// A scheduled entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    /// Handle identifying the entry.
    pub id: TimerId,

    /// Session that scheduled this entry.
    pub session: SessionId,

    /// Absolute virtual time at which the entry fires.
    pub due: Duration,

    /// What to do.
    pub task: ScheduledTask,
}

/// Queue of deferred entries on a virtual clock.
///
/// At most a couple of entries are ever outstanding (one resolution, then
/// possibly a win announcement), hence the inline storage.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    /// Sorted by (due, id).
    entries: SmallVec<[ScheduledEntry; 2]>,

    /// Current virtual time.
    now: Duration,

    /// Next timer ID.
    next_id: u64,
}

impl Scheduler {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of outstanding entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is scheduled.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// Outstanding entries in firing order.
    #[must_use]
    pub fn entries(&self) -> &[ScheduledEntry] {
        &self.entries
    }

    /// Schedule `task` to fire `delay` after the current time.
    pub fn schedule(&mut self, session: SessionId, delay: Duration, task: ScheduledTask) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;

        let due = self.now.saturating_add(delay);
        trace!(%id, %session, ?due, ?task, "scheduled");

        let entry = ScheduledEntry {
            id,
            session,
            due,
            task,
        };
        // IDs grow monotonically, so inserting after every entry with
        // due <= this one keeps (due, id) order.
        let pos = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(pos, entry);
        id
    }

    /// Cancel every entry scheduled by `session`. Returns how many were removed.
    pub fn cancel_session(&mut self, session: SessionId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.session != session);
        let removed = before - self.entries.len();
        if removed > 0 {
            trace!(%session, removed, "cancelled session timers");
        }
        removed
    }

    /// Absolute time of the next entry.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.due)
    }

    /// Time remaining until the next entry fires.
    ///
    /// A real-time host can sleep this long before advancing.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline().map(|due| due.saturating_sub(self.now))
    }

    /// Remove the earliest entry due at or before `until`.
    ///
    /// The clock moves to the entry's due time, so work scheduled while
    /// handling it is measured from the moment it fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledEntry> {
        match self.entries.first() {
            Some(entry) if entry.due <= until => {}
            _ => return None,
        }
        let entry = self.entries.remove(0);
        if entry.due > self.now {
            self.now = entry.due;
        }
        trace!(id = %entry.id, session = %entry.session, "fired");
        Some(entry)
    }

    /// Move the clock forward to `to`. Never moves backwards.
    pub fn advance_clock(&mut self, to: Duration) {
        if to > self.now {
            self.now = to;
        }
    }
}
