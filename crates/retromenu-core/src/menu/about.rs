//! Game and core information

use super::list::{ListMenu, ListScreen};
use super::{MenuAction, MenuItem, MenuServices};
use crate::navigation::MenuType;

#[derive(Debug, Default)]
pub struct AboutScreen;

pub type AboutMenu = ListMenu<AboutScreen>;

pub fn about_menu(services: MenuServices) -> AboutMenu {
    ListMenu::new(AboutScreen, services)
}

impl ListScreen for AboutScreen {
    fn menu_type(&self) -> MenuType {
        MenuType::About
    }

    fn items(&self, _services: &MenuServices) -> Vec<MenuItem> {
        vec![MenuItem::new("back", "Back", MenuAction::Back)]
    }

    fn activate(&mut self, _item: &MenuItem, _services: &MenuServices) -> bool {
        false
    }

    fn info(&self, services: &MenuServices) -> Vec<String> {
        vec![
            format!("ROM: {}", services.host.rom_name()),
            format!("Core: {}", services.host.core_name()),
            format!("Version: {}", env!("CARGO_PKG_VERSION")),
        ]
    }
}
