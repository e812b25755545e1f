//! The menu state machine
//!
//! Consumes dequeued events, mutates [`NavigationStateManager`], drives the
//! [`FragmentNavigationAdapter`] and fires the open/close lifecycle hooks.
//! A missing or detached fragment is logged and skipped, never fatal.

use std::sync::Arc;

use super::adapter::FragmentNavigationAdapter;
use super::event::{Direction, EventKind, MenuType, NavigationEvent};
use super::queue::EventQueue;
use super::state::NavigationStateManager;
use crate::menu::main_menu;
use crate::menu::SharedFragment;

/// Fired before any state changes when the main menu opens
pub type MenuOpenedCallback = Box<dyn Fn() + Send + Sync>;

/// Fired when the whole menu system closes, with the button that closed it
pub type MenuClosedCallback = Box<dyn Fn(Option<i32>) + Send + Sync>;

pub struct NavigationEventProcessor {
    state: NavigationStateManager,
    adapter: Box<dyn FragmentNavigationAdapter>,
    queue: Arc<EventQueue>,
    on_menu_opened: MenuOpenedCallback,
    on_menu_closed: MenuClosedCallback,
    /// Button behind the last activate/back/close, handed to the close hook
    last_action_button: Option<i32>,
}

impl NavigationEventProcessor {
    pub fn new(adapter: Box<dyn FragmentNavigationAdapter>, queue: Arc<EventQueue>) -> Self {
        Self {
            state: NavigationStateManager::new(),
            adapter,
            queue,
            on_menu_opened: Box::new(|| {}),
            on_menu_closed: Box::new(|_| {}),
            last_action_button: None,
        }
    }

    /// Install the lifecycle hooks.
    ///
    /// Both run while the controller is locked: they must not call back into it.
    pub fn set_callbacks(&mut self, opened: MenuOpenedCallback, closed: MenuClosedCallback) {
        self.on_menu_opened = opened;
        self.on_menu_closed = closed;
    }

    pub fn state(&self) -> &NavigationStateManager {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut NavigationStateManager {
        &mut self.state
    }

    pub fn last_action_button(&self) -> Option<i32> {
        self.last_action_button
    }

    pub fn process_event(&mut self, event: NavigationEvent) {
        tracing::debug!(
            kind = ?event.kind(),
            source = ?event.source(),
            menu = %self.state.current_menu(),
            back_stack = self.adapter.back_stack_count(),
            "Processing navigation event"
        );
        match event.kind() {
            EventKind::Navigate(direction) => self.navigate(direction),
            EventKind::SelectItem(index) => self.select_item(index),
            EventKind::ActivateSelected(key) => {
                self.last_action_button = key;
                self.activate_item();
            }
            EventKind::NavigateBack(key) => {
                self.last_action_button = key;
                self.navigate_back();
            }
            EventKind::OpenMenu => self.open_main_menu(),
            EventKind::CloseAllMenus(key) => {
                self.last_action_button = key;
                self.close_all_menus();
            }
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let Some(fragment) = self.state.current_fragment().cloned() else {
            tracing::warn!(?direction, "Navigate with no registered fragment");
            // Vertical moves still sync to the fallback index
            if matches!(direction, Direction::Up | Direction::Down) {
                self.state.set_selected_index(0);
            }
            return;
        };

        let (handled, index) = {
            let mut f = fragment.lock();
            let handled = match direction {
                Direction::Up => f.on_navigate_up(),
                Direction::Down => f.on_navigate_down(),
                Direction::Left => f.on_navigate_left(),
                Direction::Right => f.on_navigate_right(),
            };
            (handled, f.current_selected_index())
        };

        // The fragment owns the cursor. Sideways moves only sync when handled.
        match direction {
            Direction::Up | Direction::Down => self.state.set_selected_index(index),
            Direction::Left | Direction::Right if handled => {
                self.state.set_selected_index(index)
            }
            _ => {}
        }
        tracing::trace!(?direction, index = self.state.selected_index(), "Navigated");
    }

    /// Direct selection, bounds-checked against the registered item count
    pub fn select_item(&mut self, index: usize) {
        if index >= self.state.item_count() {
            tracing::warn!(
                "Invalid item index: {} (count: {})",
                index,
                self.state.item_count()
            );
            return;
        }
        self.state.set_selected_index(index);
        self.update_selection_visual();
    }

    pub fn activate_item(&mut self) {
        let menu = self.state.current_menu();
        let index = self.state.selected_index();
        tracing::debug!(%menu, index, "Activate item");

        if menu != MenuType::Main {
            self.confirm_on_fragment();
            return;
        }

        let target = match index {
            main_menu::CONTINUE => {
                tracing::info!("Continue selected, closing menu");
                self.adapter.hide_menu();
                self.state.unregister_fragment();
                self.queue.clear();
                (self.on_menu_closed)(self.last_action_button);
                self.last_action_button = None;
                return;
            }
            main_menu::RESET => {
                self.confirm_on_fragment();
                return;
            }
            main_menu::PROGRESS => MenuType::Progress,
            main_menu::SETTINGS => MenuType::Settings,
            main_menu::ABOUT => MenuType::About,
            main_menu::EXIT => MenuType::Exit,
            other => {
                tracing::warn!("Unknown main menu index: {}", other);
                return;
            }
        };

        self.state.push_current_state();
        self.state.update_current_menu(target);
        self.state.set_selected_index(0);
        self.adapter.show_menu(target);
        self.sync_fragment_from_adapter();
        tracing::debug!(%target, stack_size = self.state.stack_size(), "Entered submenu");
    }

    fn confirm_on_fragment(&mut self) {
        let Some(fragment) = self.state.current_fragment().cloned() else {
            tracing::warn!("Confirm with no registered fragment");
            return;
        };
        let handled = fragment.lock().on_confirm();
        if !handled {
            tracing::warn!(menu = %self.state.current_menu(), "Item activation not handled");
        }
    }

    /// One level back; closes everything from an empty MAIN.
    ///
    /// Returns whether anything moved.
    pub fn navigate_back(&mut self) -> bool {
        if let Some(fragment) = self.state.current_fragment().cloned() {
            if fragment.lock().on_back() {
                tracing::debug!("Back consumed by fragment");
                return true;
            }
        }

        if self.state.current_menu() == MenuType::Main && self.state.is_stack_empty() {
            tracing::info!("Back at main menu, closing menu");
            (self.on_menu_closed)(self.last_action_button);
            self.adapter.hide_menu();
            self.state.unregister_fragment();
            self.queue.clear();
            return true;
        }

        match self.state.pop_state() {
            Some(previous) => {
                self.state.update_current_menu(previous.menu_type);
                self.state.set_selected_index(previous.selected_index);
                if previous.menu_type == MenuType::Main && self.state.is_stack_empty() {
                    self.last_action_button = None;
                }
            }
            None => {
                tracing::debug!("Stack empty on back, falling back to main");
                self.state.update_current_menu(MenuType::Main);
                self.state.set_selected_index(0);
            }
        }

        let moved = self.adapter.navigate_back();
        if !moved {
            tracing::warn!("UI back stack had nothing to pop");
        }
        self.sync_fragment_from_adapter();
        tracing::debug!(
            menu = %self.state.current_menu(),
            index = self.state.selected_index(),
            "Restored previous menu"
        );
        moved
    }

    fn open_main_menu(&mut self) {
        tracing::info!("Opening main menu");
        (self.on_menu_opened)();

        self.state.reset();
        self.adapter.show_menu(MenuType::Main);
        self.sync_fragment_from_adapter();
    }

    fn close_all_menus(&mut self) {
        tracing::info!(button = ?self.last_action_button, "Closing all menus");
        (self.on_menu_closed)(self.last_action_button);

        self.state.reset();
        self.adapter.hide_menu();
        self.state.unregister_fragment();
        self.queue.clear();
        self.last_action_button = None;
    }

    /// Push the fragment's view of the selection to match the state manager
    pub fn update_selection_visual(&mut self) {
        let Some(fragment) = self.state.current_fragment().cloned() else {
            tracing::warn!("update_selection_visual: no fragment registered");
            return;
        };
        let mut f = fragment.lock();
        if !f.is_attached() {
            drop(f);
            tracing::warn!("update_selection_visual: fragment detached, clearing reference");
            self.state.unregister_fragment();
            return;
        }
        f.set_selected_index(self.state.selected_index());
    }

    /// Enter `target`, optionally keeping the current menu on the history
    pub fn navigate_to_submenu(&mut self, target: MenuType, save_current_state: bool) {
        tracing::debug!(
            from = %self.state.current_menu(),
            %target,
            save_current_state,
            "Navigating to submenu"
        );
        if save_current_state {
            self.state.push_current_state();
        }
        self.state.update_current_menu(target);
        self.state.set_selected_index(0);
        self.adapter.show_menu(target);
        self.sync_fragment_from_adapter();
    }

    /// Rebuild the visible screens after [`restore_state`](NavigationStateManager::restore_state).
    ///
    /// Shows MAIN as the root, then every stacked menu bottom to top, then the
    /// current menu, and reapplies the restored selection to its fragment.
    pub fn restore_ui(&mut self) {
        let mut screens: Vec<MenuType> =
            self.state.stack().iter().map(|s| s.menu_type).collect();
        screens.push(self.state.current_menu());
        if screens.first() != Some(&MenuType::Main) {
            screens.insert(0, MenuType::Main);
        }
        let current = self.state.current_menu();
        let index = self.state.selected_index();
        tracing::debug!(%current, index, depth = screens.len(), "Restoring menu screens");

        self.adapter.hide_menu();
        for menu in screens {
            self.adapter.show_menu(menu);
        }
        self.sync_fragment_from_adapter();
    }

    /// Close from outside the event stream (load finished, reset confirmed)
    pub fn close_menu_external(&mut self, closing_button: Option<i32>) {
        tracing::info!(button = ?closing_button, "Closing menu externally");
        self.adapter.hide_menu();
        self.state.unregister_fragment();
        self.state.reset();
        self.queue.clear();
        (self.on_menu_closed)(closing_button);
        self.last_action_button = None;
    }

    /// Register a fragment that just became visible.
    ///
    /// An empty UI back stack means the root screen, which is always MAIN.
    pub fn register_fragment(&mut self, fragment: SharedFragment, item_count: usize) {
        self.state.register_fragment(fragment, item_count);
        let back_stack = self.adapter.back_stack_count();
        if back_stack == 0 {
            self.state.update_current_menu(MenuType::Main);
        }
        tracing::debug!(
            menu = %self.state.current_menu(),
            item_count,
            back_stack,
            "Registered fragment"
        );
        self.update_selection_visual();
    }

    pub fn unregister_fragment(&mut self) {
        self.state.unregister_fragment();
    }

    fn sync_fragment_from_adapter(&mut self) {
        match self.adapter.current_fragment() {
            Some(fragment) => {
                let count = fragment.lock().item_count();
                self.register_fragment(fragment, count);
            }
            None => self.state.unregister_fragment(),
        }
    }

    pub fn current_fragment(&self) -> Option<SharedFragment> {
        self.state.current_fragment().cloned()
    }
}
