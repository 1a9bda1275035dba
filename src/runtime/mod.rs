//! # Runtime
//!
//! A single-threaded event-loop model driven by a virtual clock. Widgets
//! never sleep or spawn; they arm repeating timers here and receive ticks
//! when the host advances time.
//!
//! Delivery order is deterministic: ticks fire in due-time order, and
//! timers due at the same instant fire in the order they were armed. A
//! repeating timer that is due several times within one `advance` fires
//! once per period, each tick reported separately.

use std::collections::BTreeMap;

/// Handle to an armed timer. Never reused within one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Identifies who receives a timer's ticks. For a live page this is the
/// section's index in the rendered stream.
pub type Owner = usize;

/// One delivered tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub timer: TimerId,
    pub owner: Owner,
    /// Virtual time of the tick, in ms.
    pub at: u64,
}

#[derive(Debug, Clone)]
struct Timer {
    owner: Owner,
    interval: u64,
    next_due: u64,
}

/// Repeating timers over a virtual millisecond clock.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: u64,
    next_id: u64,
    // Keyed by id, so iteration order is arm order.
    timers: BTreeMap<TimerId, Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in ms.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Arm a repeating timer whose first tick is one interval from now.
    pub fn arm_interval(&mut self, owner: Owner, interval_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let interval = interval_ms.max(1);
        self.timers.insert(
            id,
            Timer {
                owner,
                interval,
                next_due: self.now + interval,
            },
        );
        log::debug!("timer {:?} armed for owner {} every {}ms", id, owner, interval);
        id
    }

    /// Cancel a timer. Returns false if it was already gone.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(&id).is_some();
        if removed {
            log::debug!("timer {:?} cancelled", id);
        }
        removed
    }

    /// Number of armed timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Cancel every timer belonging to `owner`.
    pub fn cancel_owner(&mut self, owner: Owner) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, t| t.owner != owner);
        before - self.timers.len()
    }

    /// Pop the earliest tick due at or before `deadline`, advancing the
    /// clock to it. Returns `None` (and moves the clock to `deadline`) when
    /// nothing else is due.
    pub fn next_due(&mut self, deadline: u64) -> Option<Fired> {
        let earliest = self
            .timers
            .iter()
            .filter(|(_, t)| t.next_due <= deadline)
            .min_by_key(|(id, t)| (t.next_due, **id))
            .map(|(id, _)| *id);

        let Some(id) = earliest else {
            self.now = self.now.max(deadline);
            return None;
        };
        let timer = self.timers.get_mut(&id)?;
        let due = timer.next_due;
        timer.next_due += timer.interval;
        self.now = due;
        Some(Fired {
            timer: id,
            owner: timer.owner,
            at: due,
        })
    }
}
