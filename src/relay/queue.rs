//! Delivery queue
//!
//! FIFO of raw lines awaiting forwarding when a rate limit is configured.
//! The session loop drains one line per timer tick. Unbounded on purpose:
//! if production outruns the configured rate the queue grows without limit,
//! a documented trade-off of the no-drop policy.

use std::collections::VecDeque;

/// Ordered, unbounded queue of pending raw lines
#[derive(Debug, Default)]
pub struct DeliveryQueue {
    lines: VecDeque<String>,
}

impl DeliveryQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at the tail
    pub fn push(&mut self, line: String) {
        self.lines.push_back(line);
    }

    /// Pop the oldest line, if any
    pub fn pop(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    /// Number of lines waiting
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = DeliveryQueue::new();
        queue.push("a".into());
        queue.push("b".into());
        queue.push("c".into());

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().as_deref(), Some("a"));
        assert_eq!(queue.pop().as_deref(), Some("b"));
        assert_eq!(queue.pop().as_deref(), Some("c"));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_on_empty_is_noop() {
        let mut queue = DeliveryQueue::new();
        assert_eq!(queue.pop(), None);

        queue.push("x".into());
        queue.pop();
        assert_eq!(queue.pop(), None);
    }
}
