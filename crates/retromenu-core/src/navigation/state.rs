//! Navigation state: current menu, selection, history and active fragment

use super::bundle::Bundle;
use super::event::{MenuState, MenuType};
use super::stack::NavigationStack;
use crate::error::{MenuError, Result};
use crate::menu::SharedFragment;

const KEY_CURRENT_MENU: &str = "nav_current_menu";
const KEY_SELECTED_INDEX: &str = "nav_selected_index";
const KEY_NAV_STACK: &str = "nav_stack";

/// Owns everything the processor mutates.
///
/// Fully closed is `{MAIN, 0}` with an empty stack and no fragment.
pub struct NavigationStateManager {
    current_menu: MenuType,
    selected_index: usize,
    item_count: usize,
    stack: NavigationStack,
    fragment: Option<SharedFragment>,
}

impl Default for NavigationStateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NavigationStateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationStateManager")
            .field("current_menu", &self.current_menu)
            .field("selected_index", &self.selected_index)
            .field("item_count", &self.item_count)
            .field("stack", &self.stack)
            .field("has_fragment", &self.fragment.is_some())
            .finish()
    }
}

impl NavigationStateManager {
    pub fn new() -> Self {
        Self {
            current_menu: MenuType::Main,
            selected_index: 0,
            item_count: 0,
            stack: NavigationStack::new(),
            fragment: None,
        }
    }

    pub fn current_menu(&self) -> MenuType {
        self.current_menu
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn current_fragment(&self) -> Option<&SharedFragment> {
        self.fragment.as_ref()
    }

    /// Set the selection; negative indices are rejected
    pub fn update_selected_index(&mut self, index: i32) -> Result<()> {
        if index < 0 {
            tracing::error!("Selected index cannot be negative: {}", index);
            return Err(MenuError::NegativeIndex(index));
        }
        self.selected_index = index as usize;
        Ok(())
    }

    /// Infallible form for indices that are already unsigned
    pub(crate) fn set_selected_index(&mut self, index: usize) {
        self.selected_index = index;
    }

    pub fn update_current_menu(&mut self, menu: MenuType) {
        self.current_menu = menu;
    }

    /// Snapshot `{current_menu, selected_index}` onto the history
    pub fn push_current_state(&mut self) {
        self.stack
            .push(MenuState::new(self.current_menu, self.selected_index));
    }

    pub fn pop_state(&mut self) -> Option<MenuState> {
        self.stack.pop()
    }

    pub fn peek_state(&self) -> Option<&MenuState> {
        self.stack.peek()
    }

    pub fn clear_stack(&mut self) {
        self.stack.clear();
    }

    pub fn is_stack_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn stack_size(&self) -> usize {
        self.stack.size()
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn register_fragment(&mut self, fragment: SharedFragment, item_count: usize) {
        self.fragment = Some(fragment);
        self.item_count = item_count;
    }

    pub fn unregister_fragment(&mut self) {
        self.fragment = None;
        self.item_count = 0;
    }

    /// A fragment is registered and still attached to the UI
    pub fn is_menu_active(&self) -> bool {
        self.fragment
            .as_ref()
            .map(|f| f.lock().is_attached())
            .unwrap_or(false)
    }

    /// Collapse to the fully closed representation (fragment untouched)
    pub fn reset(&mut self) {
        self.current_menu = MenuType::Main;
        self.selected_index = 0;
        self.stack.clear();
    }

    /// Write `{current_menu, selected_index, stack}` for a teardown/recreate cycle
    pub fn save_state(&self, out: &mut Bundle) {
        out.put_string(KEY_CURRENT_MENU, self.current_menu.as_str());
        out.put_int(KEY_SELECTED_INDEX, self.selected_index as i64);
        out.put_bundle(KEY_NAV_STACK, self.stack.to_bundle());
        tracing::debug!(
            menu = %self.current_menu,
            index = self.selected_index,
            stack_size = self.stack.size(),
            "Saved navigation state"
        );
    }

    /// Restore from [`save_state`](Self::save_state); unknown menus leave state unchanged
    pub fn restore_state(&mut self, saved: Option<&Bundle>) {
        let Some(saved) = saved else {
            tracing::debug!("No saved navigation state to restore");
            return;
        };
        let Some(menu_name) = saved.get_string(KEY_CURRENT_MENU) else {
            return;
        };
        match menu_name.parse::<MenuType>() {
            Ok(menu) => {
                self.current_menu = menu;
                self.selected_index = saved.get_int(KEY_SELECTED_INDEX, 0).max(0) as usize;
                self.stack.restore_from_bundle(saved.get_bundle(KEY_NAV_STACK));
                tracing::debug!(
                    menu = %self.current_menu,
                    index = self.selected_index,
                    stack_size = self.stack.size(),
                    "Restored navigation state"
                );
            }
            Err(_) => {
                tracing::warn!("Invalid menu type in saved state: {}", menu_name);
            }
        }
    }
}
