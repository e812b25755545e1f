//! Two-phase touch: highlight now, activate shortly after.
//!
//! Touch-down selects the item at once for visual feedback, then activation
//! fires after a short delay unless the pointer slid off the item first.
//! Hosts drive the delay by calling [`TouchInputAdapter::tick`].

use std::sync::Arc;

use parking_lot::Mutex;

use super::NavigationSink;
use crate::clock::SharedClock;
use crate::config::MenuConfig;
use crate::navigation::{InputSource, NavigationEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingActivation {
    index: usize,
    due_at: i64,
}

pub struct TouchInputAdapter {
    sink: Arc<dyn NavigationSink>,
    clock: SharedClock,
    activation_delay_ms: i64,
    pending: Mutex<Option<PendingActivation>>,
}

impl TouchInputAdapter {
    pub fn new(sink: Arc<dyn NavigationSink>, clock: SharedClock, config: &MenuConfig) -> Self {
        Self {
            sink,
            clock,
            activation_delay_ms: config.touch_activation_delay_ms,
            pending: Mutex::new(None),
        }
    }

    /// Finger down on item `index`; returns whether the touch was accepted.
    ///
    /// Activation is scheduled only when the selection was accepted.
    pub fn on_touch_down(&self, index: usize) -> bool {
        let now = self.clock.now_millis();
        let accepted = self
            .sink
            .handle_navigation_event(NavigationEvent::select_item(index, InputSource::Touch, now));
        if !accepted {
            if let Some(previous) = self.pending.lock().take() {
                tracing::debug!(
                    "Touch on {} debounced, dropped activation of {}",
                    index,
                    previous.index
                );
            } else {
                tracing::debug!("Touch on {} debounced", index);
            }
            return false;
        }

        let pending = PendingActivation {
            index,
            due_at: now + self.activation_delay_ms,
        };
        if let Some(previous) = self.pending.lock().replace(pending) {
            tracing::debug!("Touch on {} replaced pending activation of {}", index, previous.index);
        }
        true
    }

    /// Pointer moved; `None` means it is over no item
    pub fn on_pointer_move(&self, index_under_pointer: Option<usize>) {
        let mut pending = self.pending.lock();
        if let Some(p) = *pending {
            if index_under_pointer != Some(p.index) {
                tracing::debug!("Pointer left item {}, activation cancelled", p.index);
                *pending = None;
            }
        }
    }

    pub fn on_touch_cancel(&self) {
        if self.pending.lock().take().is_some() {
            tracing::debug!("Touch cancelled");
        }
    }

    pub fn has_pending_activation(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Fire the deferred activation once due; true when it fired
    pub fn tick(&self) -> bool {
        let now = self.clock.now_millis();
        let due = {
            let mut pending = self.pending.lock();
            match *pending {
                Some(p) if now >= p.due_at => pending.take(),
                _ => None,
            }
        };
        let Some(p) = due else {
            return false;
        };
        tracing::debug!("Touch activation for item {}", p.index);
        // Second phase of a gesture the queue already accepted
        self.sink
            .dispatch_immediate(NavigationEvent::activate(None, InputSource::Touch, now));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::input::testing::RecordingSink;
    use crate::navigation::EventKind;

    fn touch() -> (TouchInputAdapter, Arc<RecordingSink>, ManualClock) {
        let sink = Arc::new(RecordingSink::with_menu_active(true));
        let clock = ManualClock::new(1_000);
        let adapter =
            TouchInputAdapter::new(sink.clone(), Arc::new(clock.clone()), &MenuConfig::default());
        (adapter, sink, clock)
    }

    #[test]
    fn test_select_then_activate_after_delay() {
        let (touch, sink, clock) = touch();
        touch.on_touch_down(3);
        assert_eq!(sink.kinds(), vec![EventKind::SelectItem(3)]);

        clock.advance(99);
        assert!(!touch.tick());
        clock.advance(1);
        assert!(touch.tick());
        assert_eq!(sink.immediate_kinds(), vec![EventKind::ActivateSelected(None)]);
        assert!(!touch.tick());
    }

    #[test]
    fn test_debounced_touch_schedules_nothing() {
        let (touch, sink, clock) = touch();
        sink.reject.store(true, std::sync::atomic::Ordering::SeqCst);
        assert!(!touch.on_touch_down(4));
        assert!(!touch.has_pending_activation());

        clock.advance(200);
        assert!(!touch.tick());
        assert!(sink.immediate_kinds().is_empty());
    }

    #[test]
    fn test_drag_off_item_cancels_activation() {
        let (touch, sink, clock) = touch();
        touch.on_touch_down(1);
        touch.on_pointer_move(Some(1));
        assert!(touch.has_pending_activation());

        touch.on_pointer_move(Some(2));
        clock.advance(200);
        assert!(!touch.tick());
        assert!(sink.immediate_kinds().is_empty());
    }

    #[test]
    fn test_cancel_and_off_surface_cancel() {
        let (touch, _sink, clock) = touch();
        touch.on_touch_down(0);
        touch.on_touch_cancel();
        assert!(!touch.has_pending_activation());

        touch.on_touch_down(0);
        touch.on_pointer_move(None);
        clock.advance(150);
        assert!(!touch.tick());
    }
}
