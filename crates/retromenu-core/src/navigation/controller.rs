//! Navigation facade
//!
//! Single entry point for every input adapter. Owns the queue, the processor
//! (and through it the state manager and UI adapter) and the request outbox
//! fragments use to ask for navigation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::adapter::FragmentNavigationAdapter;
use super::bundle::Bundle;
use super::event::{EventKind, MenuType, NavigationEvent};
use super::processor::{MenuClosedCallback, MenuOpenedCallback, NavigationEventProcessor};
use super::queue::{EventQueue, QueueStats};
use crate::config::MenuConfig;
use crate::input::NavigationSink;
use crate::menu::{MenuRequest, MenuRequests, SharedFragment};

/// Reentrancy flags for confirm and back.
///
/// A later conflicting call is dropped instead of waiting for the first.
#[derive(Debug, Default)]
struct InFlight {
    confirm: AtomicBool,
    back: AtomicBool,
}

impl InFlight {
    fn flag_for(&self, kind: &EventKind) -> Option<(&AtomicBool, &'static str)> {
        match kind {
            EventKind::ActivateSelected(_) => Some((&self.confirm, "confirm")),
            EventKind::NavigateBack(_) => Some((&self.back, "back")),
            _ => None,
        }
    }
}

pub struct NavigationController {
    queue: Arc<EventQueue>,
    core: Mutex<NavigationEventProcessor>,
    in_flight: InFlight,
    requests: MenuRequests,
}

impl NavigationController {
    pub fn new(
        adapter: Box<dyn FragmentNavigationAdapter>,
        config: &MenuConfig,
        requests: MenuRequests,
    ) -> Self {
        let queue = Arc::new(
            EventQueue::new(config.debounce_window_ms)
                .with_navigate_window(config.navigate_debounce_ms),
        );
        let core = NavigationEventProcessor::new(adapter, queue.clone());
        Self {
            queue,
            core: Mutex::new(core),
            in_flight: InFlight::default(),
            requests,
        }
    }

    /// Install open/close hooks; they must not call back into the controller
    pub fn set_callbacks(&self, opened: MenuOpenedCallback, closed: MenuClosedCallback) {
        self.core.lock().set_callbacks(opened, closed);
    }

    /// Debounce, then process the next queued event; false when debounced
    pub fn handle_navigation_event(&self, event: NavigationEvent) -> bool {
        if !self.queue.enqueue(event) {
            return false;
        }
        self.process_next_event();
        true
    }

    fn process_next_event(&self) {
        let Some(event) = self.queue.dequeue() else {
            return;
        };
        self.process(event);
    }

    fn process(&self, event: NavigationEvent) {
        let kind = event.kind();
        let flag = self.in_flight.flag_for(&kind);
        if let Some((flag, name)) = flag {
            if flag
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                tracing::info!(?kind, "Dropping event: {} already in flight", name);
                return;
            }
        }
        let _release = scopeguard::guard(flag, |flag| {
            if let Some((flag, _)) = flag {
                flag.store(false, Ordering::Release);
            }
        });

        {
            let mut core = self.core.lock();
            core.process_event(event);
        }

        if kind == EventKind::OpenMenu {
            // The opening gesture must not swallow the first navigation
            self.queue.reset_debounce_window();
        }

        self.apply_requests();
    }

    /// Run work fragments queued while the last event was processed
    fn apply_requests(&self) {
        loop {
            let pending = self.requests.drain();
            if pending.is_empty() {
                break;
            }
            let mut core = self.core.lock();
            for request in pending {
                tracing::debug!(?request, "Applying menu request");
                match request {
                    MenuRequest::OpenSubmenu(target) => core.navigate_to_submenu(target, true),
                    MenuRequest::NavigateBack => {
                        core.navigate_back();
                    }
                    MenuRequest::CloseMenu(button) => core.close_menu_external(button),
                }
            }
        }
    }

    /// Enter a submenu outside the event stream
    pub fn navigate_to_submenu(&self, target: MenuType, save_current_state: bool) {
        self.core
            .lock()
            .navigate_to_submenu(target, save_current_state);
        self.apply_requests();
    }

    pub fn close_menu_external(&self, closing_button: Option<i32>) {
        self.core.lock().close_menu_external(closing_button);
    }

    pub fn register_fragment(&self, fragment: SharedFragment, item_count: usize) {
        self.core.lock().register_fragment(fragment, item_count);
    }

    pub fn unregister_fragment(&self) {
        self.core.lock().unregister_fragment();
    }

    pub fn is_menu_active(&self) -> bool {
        self.core.lock().state().is_menu_active()
    }

    pub fn current_menu(&self) -> MenuType {
        self.core.lock().state().current_menu()
    }

    pub fn selected_index(&self) -> usize {
        self.core.lock().state().selected_index()
    }

    pub fn stack_size(&self) -> usize {
        self.core.lock().state().stack_size()
    }

    pub fn current_fragment(&self) -> Option<SharedFragment> {
        self.core.lock().current_fragment()
    }

    /// Read-only access to the processor for hosts and tests
    pub fn with_processor<R>(&self, f: impl FnOnce(&NavigationEventProcessor) -> R) -> R {
        f(&self.core.lock())
    }

    pub fn save_state(&self, out: &mut Bundle) {
        self.core.lock().state().save_state(out);
    }

    pub fn restore_state(&self, saved: Option<&Bundle>) {
        self.core.lock().state_mut().restore_state(saved);
    }

    /// Re-show the restored menu stack through the adapter
    pub fn restore_ui(&self) {
        self.core.lock().restore_ui();
    }

    pub fn clear_pending_events(&self) {
        self.queue.clear();
    }

    pub fn queue_stats(&self) -> QueueStats {
        self.queue.stats()
    }

    pub fn requests(&self) -> &MenuRequests {
        &self.requests
    }
}

impl NavigationSink for NavigationController {
    fn handle_navigation_event(&self, event: NavigationEvent) -> bool {
        NavigationController::handle_navigation_event(self, event)
    }

    fn dispatch_immediate(&self, event: NavigationEvent) {
        tracing::trace!(kind = ?event.kind(), "Immediate dispatch");
        self.process(event);
    }

    fn is_menu_active(&self) -> bool {
        NavigationController::is_menu_active(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    use super::*;
    use crate::navigation::adapter::testing::{RecordingAdapter, UiOp};
    use crate::navigation::event::{Direction, InputSource, MenuState};

    fn controller() -> (Arc<NavigationController>, RecordingAdapter, Arc<Mutex<Vec<Option<i32>>>>) {
        let ui = RecordingAdapter::new();
        let controller = Arc::new(NavigationController::new(
            Box::new(ui.clone()),
            &MenuConfig::default(),
            MenuRequests::new(),
        ));
        let closed = Arc::new(Mutex::new(Vec::new()));
        let c = closed.clone();
        controller.set_callbacks(Box::new(|| {}), Box::new(move |b| c.lock().push(b)));
        (controller, ui, closed)
    }

    fn at(kind: EventKind, ts: i64) -> NavigationEvent {
        NavigationEvent::new(kind, InputSource::Keyboard, ts)
    }

    #[test]
    fn test_scenario_enter_progress_then_back() {
        let (nav, _ui, _) = controller();
        nav.handle_navigation_event(at(EventKind::OpenMenu, 1_000));
        nav.handle_navigation_event(at(EventKind::Navigate(Direction::Down), 1_010));
        nav.handle_navigation_event(at(EventKind::Navigate(Direction::Down), 1_300));
        nav.handle_navigation_event(at(EventKind::ActivateSelected(None), 1_600));

        assert_eq!(nav.current_menu(), MenuType::Progress);
        assert_eq!(nav.stack_size(), 1);
        nav.with_processor(|p| {
            assert_eq!(p.state().peek_state(), Some(&MenuState::new(MenuType::Main, 2)));
        });

        nav.handle_navigation_event(at(EventKind::NavigateBack(None), 1_900));
        assert_eq!(nav.current_menu(), MenuType::Main);
        assert_eq!(nav.selected_index(), 2);
        assert_eq!(nav.stack_size(), 0);
    }

    #[test]
    fn test_restore_ui_rebuilds_screens_after_recreate() {
        let (nav, _ui, _) = controller();
        nav.handle_navigation_event(at(EventKind::OpenMenu, 1_000));
        nav.handle_navigation_event(at(EventKind::Navigate(Direction::Down), 1_010));
        nav.handle_navigation_event(at(EventKind::Navigate(Direction::Down), 1_300));
        nav.handle_navigation_event(at(EventKind::ActivateSelected(None), 1_600));
        nav.handle_navigation_event(at(EventKind::Navigate(Direction::Down), 1_900));
        let mut saved = Bundle::new();
        nav.save_state(&mut saved);

        let (recreated, ui, _) = controller();
        recreated.restore_state(Some(&saved));
        assert!(!recreated.is_menu_active());
        recreated.restore_ui();

        assert_eq!(
            ui.ops(),
            vec![UiOp::Hide, UiOp::Show(MenuType::Main), UiOp::Show(MenuType::Progress)]
        );
        assert_eq!(ui.depth(), 2);
        assert!(recreated.is_menu_active());
        assert_eq!(recreated.current_menu(), MenuType::Progress);
        assert_eq!(recreated.selected_index(), 1);
        assert_eq!(ui.top().map(|f| f.lock().selected), Some(1));

        recreated.handle_navigation_event(at(EventKind::NavigateBack(None), 10_000));
        assert_eq!(recreated.current_menu(), MenuType::Main);
        assert_eq!(recreated.selected_index(), 2);
        assert_eq!(ui.depth(), 1);
    }

    #[test]
    fn test_scenario_continue_closes_once() {
        let (nav, _ui, closed) = controller();
        nav.handle_navigation_event(at(EventKind::OpenMenu, 5_000));
        nav.handle_navigation_event(at(EventKind::ActivateSelected(None), 5_001));

        assert_eq!(*closed.lock(), vec![None]);
        assert!(!nav.is_menu_active());
    }

    #[test]
    fn test_debounced_event_is_not_processed() {
        let (nav, _ui, _) = controller();
        nav.handle_navigation_event(at(EventKind::OpenMenu, 1_000));
        nav.handle_navigation_event(at(EventKind::Navigate(Direction::Down), 1_050));
        nav.handle_navigation_event(at(EventKind::Navigate(Direction::Down), 1_100));
        assert_eq!(nav.selected_index(), 1);
    }

    #[test]
    fn test_close_all_twice_is_safe() {
        let (nav, _ui, closed) = controller();
        nav.handle_navigation_event(at(EventKind::CloseAllMenus(Some(111)), 1_000));
        nav.handle_navigation_event(at(EventKind::CloseAllMenus(Some(111)), 2_000));
        assert_eq!(closed.lock().len(), 2);
        assert_eq!(nav.queue_stats().queue_size, 0);
        assert_eq!(nav.current_menu(), MenuType::Main);
    }

    #[test]
    fn test_requests_are_applied_after_event() {
        let (nav, _ui, closed) = controller();
        nav.handle_navigation_event(at(EventKind::OpenMenu, 1_000));
        nav.requests().push(MenuRequest::OpenSubmenu(MenuType::Exit));
        nav.handle_navigation_event(at(EventKind::Navigate(Direction::Up), 1_001));
        assert_eq!(nav.current_menu(), MenuType::Exit);
        assert_eq!(nav.stack_size(), 1);

        nav.requests().push(MenuRequest::NavigateBack);
        nav.requests().push(MenuRequest::CloseMenu(Some(96)));
        nav.handle_navigation_event(at(EventKind::Navigate(Direction::Up), 1_300));
        assert_eq!(*closed.lock(), vec![Some(96)]);
        assert!(!nav.is_menu_active());
    }

    #[test]
    fn test_dispatch_immediate_bypasses_debounce() {
        let (nav, _ui, closed) = controller();
        nav.handle_navigation_event(at(EventKind::OpenMenu, 1_000));
        nav.handle_navigation_event(at(EventKind::SelectItem(0), 1_001));
        nav.dispatch_immediate(at(EventKind::ActivateSelected(None), 1_101));
        assert_eq!(closed.lock().len(), 1);
    }

    #[test]
    fn test_confirm_in_flight_drops_second_confirm() {
        let (nav, _ui, _) = controller();
        nav.in_flight.confirm.store(true, Ordering::SeqCst);
        nav.handle_navigation_event(at(EventKind::OpenMenu, 1_000));
        nav.handle_navigation_event(at(EventKind::ActivateSelected(None), 1_001));
        // Dropped: menu still open at MAIN
        assert!(nav.is_menu_active());

        nav.in_flight.confirm.store(false, Ordering::SeqCst);
        nav.dispatch_immediate(at(EventKind::ActivateSelected(None), 1_002));
        assert!(!nav.is_menu_active());
    }

    #[test]
    fn test_concurrent_callers_keep_state_consistent() {
        let (nav, _ui, _) = controller();
        nav.handle_navigation_event(at(EventKind::OpenMenu, 1));
        let processed = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let nav = nav.clone();
                let processed = processed.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let ts = 1_000 + (t * 25 + i) as i64 * 1_000;
                        nav.dispatch_immediate(at(EventKind::Navigate(Direction::Down), ts));
                        processed.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread");
        }

        assert_eq!(processed.load(Ordering::SeqCst), 100);
        // 100 circular steps over six items
        assert_eq!(nav.selected_index(), 100 % 6);
    }
}
