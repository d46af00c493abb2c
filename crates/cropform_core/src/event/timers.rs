//! Virtual-clock timer queue.
//!
//! The host advances the clock; due tasks are returned in due order, ties in
//! scheduling order. Pending tasks are never cancelled.

use crate::dom::NodeId;
use std::collections::BTreeMap;

/// Deferred page work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Auto-expire a notification banner if it is still attached.
    RemoveNotification(NodeId),
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    pending: BTreeMap<(u64, u64), TimerTask>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since the page was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Schedules `task` to become due `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: TimerTask) {
        let due = self.now_ms.saturating_add(delay_ms);
        self.pending.insert((due, self.next_seq), task);
        self.next_seq += 1;
    }

    /// Moves the clock forward and drains every task that became due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TimerTask> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let later = self.pending.split_off(&(self.now_ms.saturating_add(1), 0));
        let due = std::mem::replace(&mut self.pending, later);
        due.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{TimerQueue, TimerTask};
    use crate::dom::NodeId;

    #[test]
    fn tasks_fire_exactly_at_their_due_time() {
        let mut timers = TimerQueue::new();
        let task = TimerTask::RemoveNotification(NodeId::from_raw(1));
        timers.schedule(5_000, task);

        assert!(timers.advance(4_999).is_empty());
        assert_eq!(timers.advance(1), vec![task]);
        assert_eq!(timers.pending_len(), 0);
        assert_eq!(timers.now_ms(), 5_000);
    }

    #[test]
    fn due_tasks_drain_in_due_then_scheduling_order() {
        let mut timers = TimerQueue::new();
        let early = TimerTask::RemoveNotification(NodeId::from_raw(1));
        let late_first = TimerTask::RemoveNotification(NodeId::from_raw(2));
        let late_second = TimerTask::RemoveNotification(NodeId::from_raw(3));
        timers.schedule(200, late_first);
        timers.schedule(100, early);
        timers.schedule(200, late_second);

        assert_eq!(timers.advance(1_000), vec![early, late_first, late_second]);
    }
}
