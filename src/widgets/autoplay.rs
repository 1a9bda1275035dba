//! # Autoplay
//!
//! The timed index cycler behind every carousel.
//!
//! The cycler is either **running** (one repeating timer armed, each tick
//! advancing `index = (index + 1) mod len`) or **idle**. Whenever one of
//! its inputs changes (length, interval, disabled flag, or the index
//! itself) it re-evaluates: any armed timer is cancelled and a new one is
//! armed if `!disabled && len > 1 && !paused`.
//!
//! Pausing only records intent. It is read at the next re-evaluation, so a
//! pause requested mid-interval lets the in-flight tick land; that tick
//! changes the index, the re-evaluation sees the pause, and the cycler
//! goes idle. Un-pausing does not re-arm by itself either; the next input
//! change does.

use crate::runtime::{Owner, TimerId, TimerQueue};

#[derive(Debug, Clone, PartialEq)]
pub struct Autoplay {
    len: usize,
    interval_ms: u64,
    disabled: bool,
    index: usize,
    paused: bool,
    timer: Option<TimerId>,
    owner: Owner,
    disposed: bool,
}

impl Autoplay {
    /// Create and immediately evaluate (arming a timer when eligible).
    pub fn start(
        owner: Owner,
        len: usize,
        interval_ms: u64,
        disabled: bool,
        timers: &mut TimerQueue,
    ) -> Self {
        let mut a = Self::idle(owner, len, interval_ms, disabled);
        a.reevaluate(timers);
        a
    }

    /// Create without touching any timer queue. Used for one-shot renders.
    pub fn idle(owner: Owner, len: usize, interval_ms: u64, disabled: bool) -> Self {
        Self {
            len,
            interval_ms,
            disabled,
            index: 0,
            paused: false,
            timer: None,
            owner,
            disposed: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Handle one tick of this instance's timer.
    pub fn on_tick(&mut self, timers: &mut TimerQueue) {
        if self.disposed || self.len == 0 {
            return;
        }
        self.set_index_inner((self.index + 1) % self.len, timers);
    }

    /// Explicit navigation. Out-of-range indices are ignored.
    pub fn set_index(&mut self, index: usize, timers: &mut TimerQueue) {
        if index < self.len {
            self.set_index_inner(index, timers);
        }
    }

    /// Step by `delta` with wrap-around (arrow buttons).
    pub fn step(&mut self, delta: isize, timers: &mut TimerQueue) {
        if self.len == 0 {
            return;
        }
        let len = self.len as isize;
        let next = (self.index as isize + delta).rem_euclid(len) as usize;
        self.set_index_inner(next, timers);
    }

    fn set_index_inner(&mut self, index: usize, timers: &mut TimerQueue) {
        if index == self.index {
            return;
        }
        self.index = index;
        self.reevaluate(timers);
    }

    /// Record pause intent. Does not touch the armed timer.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn set_disabled(&mut self, disabled: bool, timers: &mut TimerQueue) {
        if disabled != self.disabled {
            self.disabled = disabled;
            self.reevaluate(timers);
        }
    }

    /// New item count. An index past the end snaps back to 0.
    pub fn set_len(&mut self, len: usize, timers: &mut TimerQueue) {
        if len != self.len {
            self.len = len;
            if self.index >= len {
                self.index = 0;
            }
            self.reevaluate(timers);
        }
    }

    pub fn set_interval(&mut self, interval_ms: u64, timers: &mut TimerQueue) {
        if interval_ms != self.interval_ms {
            self.interval_ms = interval_ms;
            self.reevaluate(timers);
        }
    }

    /// Cancel the timer for good. Later calls are no-ops.
    pub fn dispose(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
        self.disposed = true;
    }

    fn reevaluate(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
        if self.disposed || self.disabled || self.len <= 1 || self.paused {
            return;
        }
        self.timer = Some(timers.arm_interval(self.owner, self.interval_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Drain ticks through the cycler the way a live page does.
    fn run(a: &mut Autoplay, q: &mut TimerQueue, ms: u64) -> usize {
        let deadline = q.now() + ms;
        let mut ticks = 0;
        while let Some(f) = q.next_due(deadline) {
            if Some(f.timer) == a.timer() {
                a.on_tick(q);
                ticks += 1;
            }
        }
        ticks
    }

    #[test]
    fn test_cycles_and_wraps() {
        let mut q = TimerQueue::new();
        let mut a = Autoplay::start(0, 3, 1000, false, &mut q);
        assert!(a.is_running());
        run(&mut a, &mut q, 2000);
        assert_eq!(a.index(), 2);
        run(&mut a, &mut q, 1000);
        assert_eq!(a.index(), 0);
        assert_eq!(q.active_count(), 1);
    }

    #[test]
    fn test_single_item_never_runs() {
        let mut q = TimerQueue::new();
        let mut a = Autoplay::start(0, 1, 1000, false, &mut q);
        assert!(!a.is_running());
        assert_eq!(run(&mut a, &mut q, 10_000), 0);
        assert_eq!(a.index(), 0);
    }

    #[test]
    fn test_disable_stops_and_enable_restarts() {
        let mut q = TimerQueue::new();
        let mut a = Autoplay::start(0, 4, 500, false, &mut q);
        a.set_disabled(true, &mut q);
        assert_eq!(q.active_count(), 0);
        assert_eq!(run(&mut a, &mut q, 5000), 0);
        a.set_disabled(false, &mut q);
        run(&mut a, &mut q, 500);
        assert_eq!(a.index(), 1);
    }

    #[test]
    fn test_pause_lets_inflight_tick_land_then_idles() {
        let mut q = TimerQueue::new();
        let mut a = Autoplay::start(0, 3, 1000, false, &mut q);
        run(&mut a, &mut q, 400);
        a.set_paused(true);
        // Still armed: pausing does not cancel the running timer.
        assert!(a.is_running());
        run(&mut a, &mut q, 600);
        assert_eq!(a.index(), 1);
        // The tick re-evaluated with the pause set, so nothing is armed now.
        assert!(!a.is_running());
        assert_eq!(run(&mut a, &mut q, 5000), 0);
    }

    #[test]
    fn test_unpause_waits_for_next_change() {
        let mut q = TimerQueue::new();
        let mut a = Autoplay::start(0, 3, 1000, false, &mut q);
        a.set_paused(true);
        run(&mut a, &mut q, 1000);
        a.set_paused(false);
        assert!(!a.is_running());
        a.set_index(0, &mut q);
        assert!(a.is_running());
    }

    #[test]
    fn test_explicit_navigation_restarts_interval() {
        let mut q = TimerQueue::new();
        let mut a = Autoplay::start(0, 5, 1000, false, &mut q);
        run(&mut a, &mut q, 900);
        a.set_index(3, &mut q);
        // The old timer was due at 1000; the new one is due at 1900.
        assert_eq!(run(&mut a, &mut q, 500), 0);
        run(&mut a, &mut q, 500);
        assert_eq!(a.index(), 4);
        a.set_index(9, &mut q);
        assert_eq!(a.index(), 4);
        a.step(-5, &mut q);
        assert_eq!(a.index(), 4);
        a.step(1, &mut q);
        assert_eq!(a.index(), 0);
    }

    #[test]
    fn test_dispose_leaves_no_timer() {
        let mut q = TimerQueue::new();
        let mut a = Autoplay::start(0, 3, 1000, false, &mut q);
        a.dispose(&mut q);
        a.dispose(&mut q);
        assert_eq!(q.active_count(), 0);
        a.set_index(2, &mut q);
        assert_eq!(q.active_count(), 0);
    }

    #[test]
    fn test_shrinking_len_keeps_index_in_range() {
        let mut q = TimerQueue::new();
        let mut a = Autoplay::start(0, 5, 1000, false, &mut q);
        a.set_index(4, &mut q);
        a.set_len(2, &mut q);
        assert_eq!(a.index(), 0);
        a.set_len(1, &mut q);
        assert!(!a.is_running());
    }

    proptest! {
        #[test]
        fn prop_index_is_ticks_mod_len(len in 0usize..12, ticks in 0u64..40) {
            let mut q = TimerQueue::new();
            let mut a = Autoplay::start(0, len, 250, false, &mut q);
            let fired = run(&mut a, &mut q, ticks * 250);
            if len <= 1 {
                prop_assert_eq!(fired, 0);
                prop_assert_eq!(a.index(), 0);
            } else {
                prop_assert_eq!(fired as u64, ticks);
                prop_assert_eq!(a.index(), (ticks as usize) % len);
            }
        }
    }
}
