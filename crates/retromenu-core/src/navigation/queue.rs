//! Debouncing event queue
//!
//! Events are measured against the timestamp of the last *dequeued* event,
//! so a burst that lands before the consumer runs still collapses to one.

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::event::NavigationEvent;
use crate::config::DEFAULT_DEBOUNCE_WINDOW_MS;

/// Snapshot of queue internals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub queue_size: usize,
    pub last_processed_timestamp: i64,
    pub debounce_window_ms: i64,
}

#[derive(Debug, Default)]
struct QueueInner {
    events: VecDeque<NavigationEvent>,
    /// 0 means no history: the next event is always accepted
    last_processed_timestamp: i64,
}

/// Thread-safe FIFO with a debounce window
#[derive(Debug)]
pub struct EventQueue {
    inner: Mutex<QueueInner>,
    debounce_window_ms: i64,
    navigate_window_ms: Option<i64>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW_MS)
    }
}

impl EventQueue {
    pub fn new(debounce_window_ms: i64) -> Self {
        Self {
            inner: Mutex::new(QueueInner::default()),
            debounce_window_ms,
            navigate_window_ms: None,
        }
    }

    /// Use a separate (usually shorter) window for `Navigate` events
    pub fn with_navigate_window(mut self, window_ms: Option<i64>) -> Self {
        self.navigate_window_ms = window_ms;
        self
    }

    /// Add an event unless it falls inside the debounce window
    pub fn enqueue(&self, event: NavigationEvent) -> bool {
        let mut inner = self.inner.lock();
        let last = inner.last_processed_timestamp;
        if last != 0 {
            let delta = event.timestamp() - last;
            let window = self.window_for(&event);
            if delta < window {
                tracing::debug!(
                    kind = ?event.kind(),
                    source = ?event.source(),
                    delta_ms = delta,
                    "Debounced event"
                );
                return false;
            }
        }
        inner.events.push_back(event);
        tracing::trace!(
            kind = ?event.kind(),
            queue_size = inner.events.len(),
            "Enqueued event"
        );
        true
    }

    /// Oldest accepted event; its timestamp becomes the debounce reference
    pub fn dequeue(&self) -> Option<NavigationEvent> {
        let mut inner = self.inner.lock();
        let event = inner.events.pop_front()?;
        inner.last_processed_timestamp = event.timestamp();
        Some(event)
    }

    pub fn peek(&self) -> Option<NavigationEvent> {
        self.inner.lock().events.front().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().events.is_empty()
    }

    pub fn size(&self) -> usize {
        self.inner.lock().events.len()
    }

    /// Drop everything pending
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let dropped = inner.events.len();
        inner.events.clear();
        if dropped > 0 {
            tracing::debug!("Cleared {} pending events", dropped);
        }
    }

    /// Accept the next event regardless of timing
    pub fn reset_debounce_window(&self) {
        self.inner.lock().last_processed_timestamp = 0;
    }

    pub fn stats(&self) -> QueueStats {
        let inner = self.inner.lock();
        QueueStats {
            queue_size: inner.events.len(),
            last_processed_timestamp: inner.last_processed_timestamp,
            debounce_window_ms: self.debounce_window_ms,
        }
    }

    fn window_for(&self, event: &NavigationEvent) -> i64 {
        match self.navigate_window_ms {
            Some(window) if event.is_navigate() => window,
            _ => self.debounce_window_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::event::{Direction, InputSource};

    fn nav(ts: i64) -> NavigationEvent {
        NavigationEvent::navigate(Direction::Down, InputSource::Keyboard, ts)
    }

    fn activate(ts: i64) -> NavigationEvent {
        NavigationEvent::activate(None, InputSource::Touch, ts)
    }

    #[test]
    fn test_first_event_always_accepted() {
        let queue = EventQueue::default();
        assert!(queue.enqueue(nav(5)));
        assert_eq!(queue.size(), 1);
    }

    #[test]
    fn test_event_inside_window_rejected_after_dequeue() {
        let queue = EventQueue::default();
        assert!(queue.enqueue(nav(1_000)));
        queue.dequeue().expect("queued");

        assert!(!queue.enqueue(activate(1_199)));
        assert!(queue.is_empty());

        assert!(queue.enqueue(activate(1_200)));
        assert_eq!(queue.size(), 1);
    }

    #[test]
    fn test_reference_point_is_dequeue_not_enqueue() {
        let queue = EventQueue::default();
        queue.enqueue(nav(1_000));
        // Nothing processed yet, so the second event is still accepted
        assert!(queue.enqueue(nav(1_050)));
        assert_eq!(queue.size(), 2);

        queue.dequeue();
        assert_eq!(queue.stats().last_processed_timestamp, 1_000);
        queue.dequeue();
        assert_eq!(queue.stats().last_processed_timestamp, 1_050);
    }

    #[test]
    fn test_second_event_within_window_keeps_count_at_one() {
        let queue = EventQueue::default();
        assert!(queue.enqueue(nav(10_000)));
        assert_eq!(queue.dequeue(), Some(nav(10_000)));

        assert!(!queue.enqueue(nav(10_100)));
        assert_eq!(queue.size(), 0);

        // Exactly one window after the processed event is accepted
        assert!(queue.enqueue(nav(10_200)));
        assert_eq!(queue.size(), 1);
    }

    #[test]
    fn test_fifo_order() {
        let queue = EventQueue::default();
        queue.enqueue(nav(1));
        queue.enqueue(activate(2));
        assert_eq!(queue.peek(), Some(nav(1)));
        assert_eq!(queue.dequeue(), Some(nav(1)));
        assert_eq!(queue.dequeue(), Some(activate(2)));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_reset_debounce_window_accepts_next() {
        let queue = EventQueue::default();
        queue.enqueue(nav(5_000));
        queue.dequeue();
        assert!(!queue.enqueue(nav(5_010)));

        queue.reset_debounce_window();
        assert!(queue.enqueue(nav(5_010)));
        assert_eq!(queue.stats().last_processed_timestamp, 0);
    }

    #[test]
    fn test_clear_drops_pending() {
        let queue = EventQueue::default();
        queue.enqueue(nav(1));
        queue.enqueue(nav(2));
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.stats().queue_size, 0);
    }

    #[test]
    fn test_navigate_window_override() {
        let queue = EventQueue::new(200).with_navigate_window(Some(30));
        queue.enqueue(nav(1_000));
        queue.dequeue();
        assert!(queue.enqueue(nav(1_040)));
        queue.dequeue();
        assert!(!queue.enqueue(activate(1_100)));
        assert_eq!(queue.stats().debounce_window_ms, 200);
    }
}
