//! Cooperative one-shot timers on the engine clock.
//!
//! Nothing here waits. The host advances the clock and pulls due timers one
//! at a time with [`TimerQueue::pop_due`], so a callback that cancels other
//! timers is honoured before those timers are looked at.

use std::collections::BTreeMap;

use crate::state::Tick;

/// Cancellation token for one armed timer.
///
/// Handles are unique for the lifetime of a queue. Cancelling a handle whose
/// timer already fired or was cancelled is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerHandle {
    due: Tick,
    seq: u64,
}

impl TimerHandle {
    pub const fn due(&self) -> Tick {
        self.due
    }
}

/// Ordered set of pending timers carrying a payload each.
///
/// Timers fire in due order; timers with the same due tick fire in the order
/// they were armed.
#[derive(Clone, Debug)]
pub struct TimerQueue<P> {
    pending: BTreeMap<TimerHandle, P>,
    next_seq: u64,
}

impl<P> TimerQueue<P> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Arms a timer that becomes due at `due`.
    pub fn arm(&mut self, due: Tick, payload: P) -> TimerHandle {
        let handle = TimerHandle {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(handle, payload);
        handle
    }

    /// Disarms a pending timer and hands back its payload.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<P> {
        self.pending.remove(&handle)
    }

    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Due tick of the earliest pending timer.
    pub fn next_due(&self) -> Option<Tick> {
        self.pending.keys().next().map(TimerHandle::due)
    }

    /// Removes and returns the earliest timer if it is due at `now`.
    pub fn pop_due(&mut self, now: Tick) -> Option<(TimerHandle, P)> {
        match self.pending.first_key_value() {
            Some((handle, _)) if handle.due <= now => self.pending.pop_first(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending timer without firing it.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

impl<P> Default for TimerQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, now: Tick) -> Vec<&'static str> {
        std::iter::from_fn(|| queue.pop_due(now).map(|(_, p)| p)).collect()
    }

    #[test]
    fn fires_in_due_then_arming_order() {
        let mut queue = TimerQueue::new();
        queue.arm(Tick(300), "late");
        queue.arm(Tick(100), "first");
        queue.arm(Tick(100), "second");

        assert_eq!(drain(&mut queue, Tick(99)), Vec::<&str>::new());
        assert_eq!(drain(&mut queue, Tick(100)), vec!["first", "second"]);
        assert_eq!(queue.next_due(), Some(Tick(300)));
        assert_eq!(drain(&mut queue, Tick(1_000)), vec!["late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let stale = queue.arm(Tick(50), "stale");
        queue.arm(Tick(80), "fresh");

        assert_eq!(queue.cancel(stale), Some("stale"));
        assert_eq!(queue.cancel(stale), None);
        assert!(!queue.is_armed(stale));
        assert_eq!(drain(&mut queue, Tick(100)), vec!["fresh"]);
    }

    #[test]
    fn cancel_after_fire_is_noop() {
        let mut queue = TimerQueue::new();
        let handle = queue.arm(Tick(10), "once");
        assert_eq!(queue.pop_due(Tick(10)).map(|(h, _)| h), Some(handle));
        assert_eq!(queue.cancel(handle), None);
    }

    #[test]
    fn zero_delay_timer_is_due_immediately() {
        let mut queue = TimerQueue::new();
        queue.arm(Tick(500), "now");
        assert_eq!(drain(&mut queue, Tick(500)), vec!["now"]);
    }

    #[test]
    fn clear_drops_everything() {
        let mut queue = TimerQueue::new();
        queue.arm(Tick(1), "a");
        queue.arm(Tick(2), "b");
        assert_eq!(queue.clear(), 2);
        assert_eq!(queue.pop_due(Tick(10)), None);
    }
}
