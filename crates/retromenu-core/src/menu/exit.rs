//! Leave the game, with or without saving

use super::list::{ListMenu, ListScreen};
use super::{MenuAction, MenuItem, MenuRequest, MenuServices};
use crate::navigation::MenuType;

#[derive(Debug, Default)]
pub struct ExitScreen;

pub type ExitMenu = ListMenu<ExitScreen>;

pub fn exit_menu(services: MenuServices) -> ExitMenu {
    ListMenu::new(ExitScreen, services)
}

impl ExitScreen {
    /// Quick save into the slot this session last used, else pick one
    fn save_and_exit(services: &MenuServices) -> bool {
        let Some(slot) = services.session.last_used_slot() else {
            tracing::info!("No slot context, choosing a slot before exit");
            services
                .requests
                .push(MenuRequest::OpenSubmenu(MenuType::ExitSaveSlots));
            return true;
        };

        let name = services.store.get_slot(slot).name;
        if !services.save_to_slot(slot, Some(&name)) {
            services.host.show_toast("Save failed");
            return true;
        }
        if let Err(e) = services.session.record_save(slot) {
            tracing::warn!("Session tracking failed: {}", e);
        }
        tracing::info!("Saved to slot {} before exit", slot);
        services.host.exit_game();
        true
    }
}

impl ListScreen for ExitScreen {
    fn menu_type(&self) -> MenuType {
        MenuType::Exit
    }

    fn items(&self, services: &MenuServices) -> Vec<MenuItem> {
        let save = MenuItem::new("save_and_exit", "Save & Exit", MenuAction::SaveAndExit);
        let save = match services.session.last_used_slot() {
            Some(slot) => save.with_subtitle(format!("Slot {slot}")),
            None => save,
        };
        vec![
            save,
            MenuItem::new("exit_without_save", "Exit without saving", MenuAction::Exit),
            MenuItem::new("back", "Back", MenuAction::Back),
        ]
    }

    fn activate(&mut self, item: &MenuItem, services: &MenuServices) -> bool {
        match item.action {
            MenuAction::SaveAndExit => Self::save_and_exit(services),
            MenuAction::Exit => {
                tracing::info!("Exiting without saving");
                services.host.exit_game();
                true
            }
            other => {
                tracing::warn!(?other, "Unhandled exit action");
                false
            }
        }
    }
}
