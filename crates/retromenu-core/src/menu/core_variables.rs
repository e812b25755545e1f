//! Read-only dump of the running core's options

use super::list::{ListMenu, ListScreen};
use super::{MenuAction, MenuItem, MenuServices};
use crate::navigation::MenuType;

#[derive(Debug, Default)]
pub struct CoreVariablesScreen;

pub type CoreVariablesMenu = ListMenu<CoreVariablesScreen>;

pub fn core_variables_menu(services: MenuServices) -> CoreVariablesMenu {
    ListMenu::new(CoreVariablesScreen, services)
}

impl ListScreen for CoreVariablesScreen {
    fn menu_type(&self) -> MenuType {
        MenuType::CoreVariables
    }

    fn items(&self, _services: &MenuServices) -> Vec<MenuItem> {
        vec![MenuItem::new("back", "Back", MenuAction::Back)]
    }

    fn activate(&mut self, _item: &MenuItem, _services: &MenuServices) -> bool {
        false
    }

    fn info(&self, services: &MenuServices) -> Vec<String> {
        let vars = services.host.core_variables();
        if vars.is_empty() {
            vec!["No core variables".to_string()]
        } else {
            vars
        }
    }
}
