//! In-process screen stack
//!
//! [`MenuStackAdapter`] is the host-neutral [`FragmentNavigationAdapter`]:
//! it builds screens through [`MenuFactory`] and keeps them on a plain
//! `Vec`, root first.

use super::grid::exit_save::exit_save_slots_menu;
use super::grid::load::load_slots_menu;
use super::grid::manage::manage_saves_menu;
use super::grid::save::save_slots_menu;
use super::{
    about::about_menu, core_variables::core_variables_menu, exit::exit_menu,
    main_menu::main_menu, progress::progress_menu, settings::settings_menu, share,
    MenuServices, SharedFragment,
};
use crate::navigation::{FragmentNavigationAdapter, MenuType};

/// Builds a fresh screen for a [`MenuType`]
#[derive(Clone)]
pub struct MenuFactory {
    services: MenuServices,
}

impl MenuFactory {
    pub fn new(services: MenuServices) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &MenuServices {
        &self.services
    }

    pub fn create(&self, menu: MenuType) -> SharedFragment {
        let services = self.services.clone();
        match menu {
            MenuType::Main => share(main_menu(services)),
            MenuType::Settings => share(settings_menu(services)),
            MenuType::Progress => share(progress_menu(services)),
            MenuType::Exit => share(exit_menu(services)),
            MenuType::About => share(about_menu(services)),
            MenuType::CoreVariables => share(core_variables_menu(services)),
            MenuType::SaveSlots => share(save_slots_menu(services)),
            MenuType::LoadSlots => share(load_slots_menu(services)),
            MenuType::ManageSaves => share(manage_saves_menu(services)),
            MenuType::ExitSaveSlots => share(exit_save_slots_menu(services)),
        }
    }
}

pub struct MenuStackAdapter {
    factory: MenuFactory,
    stack: Vec<(MenuType, SharedFragment)>,
}

impl MenuStackAdapter {
    pub fn new(factory: MenuFactory) -> Self {
        Self {
            factory,
            stack: Vec::new(),
        }
    }

    /// Menu types bottom to top
    pub fn visible(&self) -> Vec<MenuType> {
        self.stack.iter().map(|(menu, _)| *menu).collect()
    }

    fn detach_above(&mut self, depth: usize) {
        while self.stack.len() > depth {
            if let Some((menu, fragment)) = self.stack.pop() {
                fragment.lock().set_attached(false);
                tracing::trace!(%menu, "Detached screen");
            }
        }
    }
}

impl FragmentNavigationAdapter for MenuStackAdapter {
    fn show_menu(&mut self, menu: MenuType) {
        match menu {
            MenuType::Main => self.detach_above(0),
            // Progress always sits directly on MAIN
            MenuType::Progress => self.detach_above(1),
            _ => {}
        }
        let fragment = self.factory.create(menu);
        self.stack.push((menu, fragment));
        tracing::debug!(%menu, depth = self.stack.len(), "Showing menu");
    }

    fn hide_menu(&mut self) {
        if !self.stack.is_empty() {
            tracing::debug!(depth = self.stack.len(), "Hiding all menus");
        }
        self.detach_above(0);
    }

    fn navigate_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.detach_above(self.stack.len() - 1);
        true
    }

    fn back_stack_count(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    fn current_fragment(&self) -> Option<SharedFragment> {
        self.stack.last().map(|(_, fragment)| fragment.clone())
    }
}
