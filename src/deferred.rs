//! Cancellable deferred tasks
//!
//! Due times are on the host page's millisecond clock. At most one task of
//! each kind is pending; scheduling again replaces the earlier one.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Deferred {
    /// Move keyboard focus to the first navigation link of an open panel
    FocusFirstLink,
    /// Close the panel once a navigation click has had time to start
    CloseAfterNavigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pending {
    pub task: Deferred,
    pub due_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    pending: Vec<Pending>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run `delay_ms` after `now_ms`
    pub fn schedule(&mut self, task: Deferred, now_ms: f64, delay_ms: u32) {
        self.cancel(task);
        self.pending.push(Pending {
            task,
            due_ms: now_ms + f64::from(delay_ms),
        });
    }

    /// Drop a pending task. Returns true if one was pending.
    pub fn cancel(&mut self, task: Deferred) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.task != task);
        self.pending.len() != before
    }

    pub fn is_pending(&self, task: Deferred) -> bool {
        self.pending.iter().any(|p| p.task == task)
    }

    pub fn pending(&self) -> &[Pending] {
        &self.pending
    }

    /// Earliest due time, if anything is pending
    pub fn next_due(&self) -> Option<f64> {
        self.pending.iter().map(|p| p.due_ms).reduce(f64::min)
    }

    /// Remove and return every task due at `now_ms`, earliest first
    pub fn take_due(&mut self, now_ms: f64) -> Vec<Deferred> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now_ms {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|p| p.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reschedule_replaces() {
        let mut queue = DeferredQueue::new();
        queue.schedule(Deferred::FocusFirstLink, 0.0, 300);
        queue.schedule(Deferred::FocusFirstLink, 100.0, 300);
        assert_eq!(queue.pending().len(), 1);
        assert_eq!(queue.next_due(), Some(400.0));
    }

    #[test]
    fn test_take_due_in_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(Deferred::FocusFirstLink, 0.0, 300);
        queue.schedule(Deferred::CloseAfterNavigation, 0.0, 100);

        assert!(queue.take_due(99.0).is_empty());
        assert_eq!(
            queue.take_due(500.0),
            vec![Deferred::CloseAfterNavigation, Deferred::FocusFirstLink]
        );
        assert_eq!(queue.next_due(), None);
    }

    #[test]
    fn test_cancel() {
        let mut queue = DeferredQueue::new();
        queue.schedule(Deferred::CloseAfterNavigation, 10.0, 100);
        assert!(queue.cancel(Deferred::CloseAfterNavigation));
        assert!(!queue.cancel(Deferred::CloseAfterNavigation));
        assert!(!queue.is_pending(Deferred::CloseAfterNavigation));
    }
}
