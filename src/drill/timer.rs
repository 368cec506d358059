//! Cancellable scheduled ticks.
//!
//! Countdowns are driven by the host: the engine asks a [`Scheduler`] for a
//! callback after a delay and receives a [`TickHandle`]. When the callback
//! fires the host passes the handle back to
//! [`DrillEngine::on_timer`](super::DrillEngine::on_timer). A session only
//! acts on the handle it is currently waiting for, and cancels every pending
//! handle before it is torn down.

use serde::Serialize;
use std::collections::BTreeMap;

/// Identifies one scheduled callback. Never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TickHandle(pub u64);

/// Something that can call back after a delay.
pub trait Scheduler {
    /// Request a callback `delay_ms` from now.
    fn schedule(&mut self, delay_ms: u64) -> TickHandle;

    /// Drop a pending callback. Cancelling an unknown, fired or already
    /// cancelled handle does nothing.
    fn cancel(&mut self, handle: TickHandle);
}

/// Deterministic scheduler driven by an explicit clock.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<TickHandle, u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_pending(&self, handle: TickHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock to `now_ms` and return every handle that came due,
    /// earliest first. Returned handles are no longer pending.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<TickHandle> {
        self.now_ms = self.now_ms.max(now_ms);
        let mut due: Vec<(u64, TickHandle)> = self
            .pending
            .iter()
            .filter(|(_, at)| **at <= self.now_ms)
            .map(|(&handle, &at)| (at, handle))
            .collect();
        due.sort();
        for (_, handle) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(_, handle)| handle).collect()
    }

    /// The earliest pending handle and when it is due.
    pub fn next_due(&self) -> Option<(TickHandle, u64)> {
        self.pending
            .iter()
            .min_by_key(|(handle, at)| (**at, **handle))
            .map(|(&handle, &at)| (handle, at))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u64) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.pending.insert(handle, self.now_ms + delay_ms);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_fire_in_due_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.schedule(300);
        let early = scheduler.schedule(100);
        assert_eq!(scheduler.next_due(), Some((early, 100)));
        assert_eq!(scheduler.advance_to(50), vec![]);
        assert_eq!(scheduler.advance_to(400), vec![early, late]);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(100);
        scheduler.cancel(handle);
        scheduler.cancel(handle);
        assert!(!scheduler.is_pending(handle));
        assert_eq!(scheduler.advance_to(1_000), vec![]);
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.schedule(10);
        scheduler.cancel(a);
        let b = scheduler.schedule(10);
        assert_ne!(a, b);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut scheduler = ManualScheduler::new();
        scheduler.advance_to(500);
        scheduler.advance_to(100);
        assert_eq!(scheduler.now_ms(), 500);
        let handle = scheduler.schedule(10);
        assert_eq!(scheduler.next_due(), Some((handle, 510)));
    }
}
