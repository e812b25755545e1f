//! Test doubles for menu fragments

use std::sync::Arc;

use parking_lot::Mutex;

use super::{MenuAction, MenuFragment, MenuItem, MenuView, SharedFragment};
use crate::navigation::MenuType;

/// Circular list fragment that records what the processor asked of it
#[derive(Debug)]
pub struct StubFragment {
    pub menu_type: MenuType,
    pub count: usize,
    pub selected: usize,
    pub attached: bool,
    pub confirms: usize,
    pub backs: usize,
    pub consume_back: bool,
    pub visual_updates: Vec<usize>,
}

impl StubFragment {
    pub fn new(menu_type: MenuType, count: usize) -> Self {
        Self {
            menu_type,
            count,
            selected: 0,
            attached: true,
            confirms: 0,
            backs: 0,
            consume_back: false,
            visual_updates: Vec::new(),
        }
    }

    /// Main-menu stub plus a typed handle for assertions
    pub fn shared(count: usize) -> (SharedFragment, Arc<Mutex<StubFragment>>) {
        Self::shared_for(MenuType::Main, count)
    }

    pub fn shared_for(
        menu_type: MenuType,
        count: usize,
    ) -> (SharedFragment, Arc<Mutex<StubFragment>>) {
        let handle = Arc::new(Mutex::new(StubFragment::new(menu_type, count)));
        let shared: SharedFragment = handle.clone();
        (shared, handle)
    }
}

impl MenuFragment for StubFragment {
    fn menu_type(&self) -> MenuType {
        self.menu_type
    }

    fn get_menu_items(&self) -> Vec<MenuItem> {
        (0..self.count)
            .map(|i| MenuItem::new(format!("item_{i}"), format!("Item {i}"), MenuAction::None))
            .collect()
    }

    fn on_navigate_up(&mut self) -> bool {
        self.selected = (self.selected + self.count - 1) % self.count;
        true
    }

    fn on_navigate_down(&mut self) -> bool {
        self.selected = (self.selected + 1) % self.count;
        true
    }

    fn on_confirm(&mut self) -> bool {
        self.confirms += 1;
        true
    }

    fn on_back(&mut self) -> bool {
        self.backs += 1;
        self.consume_back
    }

    fn current_selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected = index;
        self.visual_updates.push(index);
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    fn item_count(&self) -> usize {
        self.count
    }

    fn view(&self) -> MenuView {
        MenuView::list(self.menu_type, self.get_menu_items(), self.selected)
    }
}
