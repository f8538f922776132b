//! Repeating timers for the single-threaded event loop.
//!
//! Every timer is an entry in a shared [`TimerTable`] that lives exactly as long as
//! the [`TimerHandle`] returned by [`TimerTable::every`]. Components keep their handles
//! next to the state they mutate, so dropping a component cancels its ticks.
//!
//! Firing is pull-based: the owner asks its handle how many periods elapsed since the
//! last poll. Nothing runs behind the owner's back.

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

new_key_type! { struct TimerId; }

/// Upper bound on the periods reported by one [`TimerHandle::fired`] call.
///
/// After a long stall (suspended process, slow terminal) the timer re-anchors on the
/// poll instant instead of replaying every missed tick.
pub const MAX_CATCH_UP: u32 = 256;

const MIN_PERIOD: Duration = Duration::from_millis(1);

type Entries = RefCell<SlotMap<TimerId, TimerEntry>>;

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    period: Duration,
    next_due: Instant,
}

#[derive(Clone, Default)]
pub struct TimerTable {
    entries: Rc<Entries>,
}

impl TimerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a repeating timer whose first tick is due one `period` after `now`.
    pub fn every(&self, period: Duration, now: Instant) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        let id = self.entries.borrow_mut().insert(TimerEntry {
            period,
            next_due: now + period,
        });
        tracing::trace!(?id, ?period, "timer started");
        TimerHandle {
            id,
            period,
            table: Rc::downgrade(&self.entries),
        }
    }

    /// Earliest pending deadline across all live timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.borrow().values().map(|e| e.next_due).min()
    }

    pub fn active(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active() == 0
    }
}

/// Owning token for one repeating timer. Dropping it cancels the timer.
pub struct TimerHandle {
    id: TimerId,
    period: Duration,
    table: Weak<Entries>,
}

impl TimerHandle {
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks due at `now`; advances the deadline past `now`.
    pub fn fired(&self, now: Instant) -> u32 {
        let Some(entries) = self.table.upgrade() else {
            return 0;
        };
        let mut entries = entries.borrow_mut();
        let Some(entry) = entries.get_mut(self.id) else {
            return 0;
        };
        if now < entry.next_due {
            return 0;
        }

        let behind = now.duration_since(entry.next_due).as_nanos();
        let count = (behind / entry.period.as_nanos()).saturating_add(1);
        if count > u128::from(MAX_CATCH_UP) {
            entry.next_due = now + entry.period;
            return MAX_CATCH_UP;
        }

        let count = count as u32;
        entry.next_due += entry.period * count;
        count
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(entries) = self.table.upgrade() {
            entries.borrow_mut().remove(self.id);
            tracing::trace!(id = ?self.id, "timer cancelled");
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("id", &self.id)
            .field("period", &self.period)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timer.rs"]
mod tests;
