//! Save / load / manage entry screen

use super::list::{ListMenu, ListScreen};
use super::{MenuAction, MenuItem, MenuServices};
use crate::navigation::MenuType;

pub const SAVE_STATE: usize = 0;
pub const LOAD_STATE: usize = 1;
pub const MANAGE_SAVES: usize = 2;
pub const BACK: usize = 3;

#[derive(Debug, Default)]
pub struct ProgressScreen;

pub type ProgressMenu = ListMenu<ProgressScreen>;

pub fn progress_menu(services: MenuServices) -> ProgressMenu {
    ListMenu::new(ProgressScreen, services)
}

impl ListScreen for ProgressScreen {
    fn menu_type(&self) -> MenuType {
        MenuType::Progress
    }

    fn items(&self, services: &MenuServices) -> Vec<MenuItem> {
        let has_save = services.store.has_any_save();
        vec![
            MenuItem::new(
                "save_state",
                "Save State",
                MenuAction::Navigate(MenuType::SaveSlots),
            ),
            MenuItem::new(
                "load_state",
                "Load State",
                MenuAction::Navigate(MenuType::LoadSlots),
            )
            .enabled(has_save),
            MenuItem::new(
                "manage_saves",
                "Manage Saves",
                MenuAction::Navigate(MenuType::ManageSaves),
            ),
            MenuItem::new("back", "Back", MenuAction::Back),
        ]
    }

    fn activate(&mut self, item: &MenuItem, _services: &MenuServices) -> bool {
        tracing::warn!(action = ?item.action, "Unhandled progress action");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::host::testing::TestServices;
    use crate::menu::{MenuFragment, MenuRequest};
    use crate::storage::testing::MemoryStore;

    #[test]
    fn test_load_skipped_without_saves() {
        let t = TestServices::empty();
        let mut menu = progress_menu(t.services.clone());
        assert!(!menu.get_menu_items()[LOAD_STATE].is_enabled);

        menu.on_navigate_down();
        assert_eq!(menu.current_selected_index(), MANAGE_SAVES);
        menu.on_navigate_up();
        assert_eq!(menu.current_selected_index(), SAVE_STATE);
    }

    #[test]
    fn test_disabled_load_cannot_be_confirmed_by_touch() {
        let t = TestServices::empty();
        let mut menu = progress_menu(t.services.clone());
        menu.set_selected_index(LOAD_STATE);
        assert!(!menu.on_confirm());
        assert!(t.services.requests.is_empty());
    }

    #[test]
    fn test_load_available_with_a_save() {
        let t = TestServices::new(MemoryStore::with_slots(&[(4, "x")]));
        let mut menu = progress_menu(t.services.clone());
        menu.on_navigate_down();
        assert_eq!(menu.current_selected_index(), LOAD_STATE);
        assert!(menu.on_confirm());
        assert_eq!(
            t.services.requests.drain(),
            vec![MenuRequest::OpenSubmenu(MenuType::LoadSlots)]
        );
    }
}
