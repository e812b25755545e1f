//! Flat, circular list screens
//!
//! [`ListMenu`] supplies the cursor and the [`MenuFragment`] plumbing; each
//! screen only says which items it has and what its own actions do.

use super::view::ListView;
use super::{MenuAction, MenuFragment, MenuItem, MenuRequest, MenuServices, MenuView};
use crate::navigation::MenuType;

/// Circular cursor that steps over disabled items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSelection {
    index: usize,
}

impl ListSelection {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn move_up(&mut self, items: &[MenuItem]) -> bool {
        self.step(items, false)
    }

    pub fn move_down(&mut self, items: &[MenuItem]) -> bool {
        self.step(items, true)
    }

    fn step(&mut self, items: &[MenuItem], forward: bool) -> bool {
        let len = items.len();
        if len == 0 {
            return false;
        }
        let mut next = self.index.min(len - 1);
        for _ in 0..len {
            next = if forward {
                (next + 1) % len
            } else {
                (next + len - 1) % len
            };
            if items[next].is_enabled {
                self.index = next;
                return true;
            }
        }
        false
    }

    /// Direct selection; out-of-range indices are ignored
    pub fn select(&mut self, index: usize, items: &[MenuItem]) -> bool {
        if index < items.len() {
            self.index = index;
            true
        } else {
            tracing::warn!("Invalid index {}, valid range: 0..{}", index, items.len());
            false
        }
    }
}

/// What makes one flat screen different from another
pub trait ListScreen: Send {
    fn menu_type(&self) -> MenuType;

    fn items(&self, services: &MenuServices) -> Vec<MenuItem>;

    /// Screen-specific actions; `Back` and `Navigate` never reach here
    fn activate(&mut self, item: &MenuItem, services: &MenuServices) -> bool;

    /// Read-only lines shown above the items
    fn info(&self, _services: &MenuServices) -> Vec<String> {
        Vec::new()
    }
}

/// Fragment for any [`ListScreen`]
pub struct ListMenu<S: ListScreen> {
    screen: S,
    services: MenuServices,
    selection: ListSelection,
    attached: bool,
}

impl<S: ListScreen> ListMenu<S> {
    pub fn new(screen: S, services: MenuServices) -> Self {
        Self {
            screen,
            services,
            selection: ListSelection::default(),
            attached: true,
        }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    fn items(&self) -> Vec<MenuItem> {
        self.screen.items(&self.services)
    }
}

impl<S: ListScreen> MenuFragment for ListMenu<S> {
    fn menu_type(&self) -> MenuType {
        self.screen.menu_type()
    }

    fn get_menu_items(&self) -> Vec<MenuItem> {
        self.items()
    }

    fn on_navigate_up(&mut self) -> bool {
        let items = self.items();
        self.selection.move_up(&items)
    }

    fn on_navigate_down(&mut self) -> bool {
        let items = self.items();
        self.selection.move_down(&items)
    }

    fn on_confirm(&mut self) -> bool {
        let items = self.items();
        let Some(item) = items.get(self.selection.index()) else {
            return false;
        };
        if !item.is_enabled {
            tracing::debug!(id = %item.id, "Confirm on disabled item ignored");
            return false;
        }
        tracing::debug!(menu = %self.menu_type(), id = %item.id, "Item confirmed");
        match item.action {
            MenuAction::Back => {
                self.services.requests.push(MenuRequest::NavigateBack);
                true
            }
            MenuAction::Navigate(target) => {
                self.services.requests.push(MenuRequest::OpenSubmenu(target));
                true
            }
            _ => self.screen.activate(item, &self.services),
        }
    }

    fn on_back(&mut self) -> bool {
        false
    }

    fn current_selected_index(&self) -> usize {
        self.selection.index()
    }

    fn set_selected_index(&mut self, index: usize) {
        let items = self.items();
        self.selection.select(index, &items);
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    fn view(&self) -> MenuView {
        let menu_type = self.menu_type();
        MenuView::List(ListView {
            menu_type,
            title: menu_type.title().to_string(),
            items: self.items(),
            selected: self.selection.index(),
            info: self.screen.info(&self.services),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(enabled: &[bool]) -> Vec<MenuItem> {
        enabled
            .iter()
            .enumerate()
            .map(|(i, e)| MenuItem::new(i.to_string(), i.to_string(), MenuAction::None).enabled(*e))
            .collect()
    }

    #[test]
    fn test_wraps_both_ways() {
        let list = items(&[true, true, true]);
        let mut sel = ListSelection::default();
        assert!(sel.move_up(&list));
        assert_eq!(sel.index(), 2);
        assert!(sel.move_down(&list));
        assert_eq!(sel.index(), 0);
    }

    #[test]
    fn test_skips_disabled_items() {
        let list = items(&[true, false, true, true]);
        let mut sel = ListSelection::default();
        sel.move_down(&list);
        assert_eq!(sel.index(), 2);
        sel.move_up(&list);
        assert_eq!(sel.index(), 0);
    }

    #[test]
    fn test_all_disabled_stays_put() {
        let list = items(&[false, false]);
        let mut sel = ListSelection::default();
        assert!(!sel.move_down(&list));
        assert_eq!(sel.index(), 0);
        assert!(!sel.move_up(&[]));
    }

    #[test]
    fn test_select_bounds_checked() {
        let list = items(&[true, true]);
        let mut sel = ListSelection::default();
        assert!(sel.select(1, &list));
        assert!(!sel.select(2, &list));
        assert_eq!(sel.index(), 1);
    }
}
