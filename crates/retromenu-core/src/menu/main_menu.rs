//! Root screen

use super::list::{ListMenu, ListScreen};
use super::{MenuAction, MenuItem, MenuRequest, MenuServices};
use crate::navigation::MenuType;

pub const CONTINUE: usize = 0;
pub const RESET: usize = 1;
pub const PROGRESS: usize = 2;
pub const SETTINGS: usize = 3;
pub const ABOUT: usize = 4;
pub const EXIT: usize = 5;
pub const TOTAL_ITEMS: usize = 6;

#[derive(Debug, Default)]
pub struct MainScreen;

pub type MainMenu = ListMenu<MainScreen>;

pub fn main_menu(services: MenuServices) -> MainMenu {
    ListMenu::new(MainScreen, services)
}

impl ListScreen for MainScreen {
    fn menu_type(&self) -> MenuType {
        MenuType::Main
    }

    fn items(&self, _services: &MenuServices) -> Vec<MenuItem> {
        vec![
            MenuItem::new("continue", "Continue", MenuAction::Continue),
            MenuItem::new("reset", "Reset", MenuAction::Reset),
            MenuItem::new("progress", "Progress", MenuAction::Navigate(MenuType::Progress)),
            MenuItem::new("settings", "Settings", MenuAction::Navigate(MenuType::Settings)),
            MenuItem::new("about", "About", MenuAction::Navigate(MenuType::About)),
            MenuItem::new("exit", "Exit Menu", MenuAction::Navigate(MenuType::Exit)),
        ]
    }

    fn activate(&mut self, item: &MenuItem, services: &MenuServices) -> bool {
        match item.action {
            MenuAction::Continue => {
                services.requests.push(MenuRequest::CloseMenu(None));
                true
            }
            MenuAction::Reset => {
                tracing::info!("Resetting game from menu");
                services.host.set_fast_forward(false);
                services.engine.reset();
                services.requests.push(MenuRequest::CloseMenu(None));
                true
            }
            other => {
                tracing::warn!(?other, "Unhandled main menu action");
                false
            }
        }
    }
}
