//! Audio, shader and speed toggles

use super::list::{ListMenu, ListScreen};
use super::{MenuAction, MenuItem, MenuRequest, MenuServices};
use crate::navigation::MenuType;

#[derive(Debug, Default)]
pub struct SettingsScreen;

pub type SettingsMenu = ListMenu<SettingsScreen>;

pub fn settings_menu(services: MenuServices) -> SettingsMenu {
    ListMenu::new(SettingsScreen, services)
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "On"
    } else {
        "Off"
    }
}

impl ListScreen for SettingsScreen {
    fn menu_type(&self) -> MenuType {
        MenuType::Settings
    }

    fn items(&self, services: &MenuServices) -> Vec<MenuItem> {
        let host = &services.host;
        vec![
            MenuItem::new(
                "audio",
                format!("Audio: {}", on_off(host.is_audio_enabled())),
                MenuAction::ToggleAudio,
            ),
            MenuItem::new(
                "shader",
                format!("Shader: {}", host.shader_name()),
                MenuAction::ToggleShader,
            ),
            MenuItem::new(
                "speed",
                format!("Fast Forward: {}", on_off(host.is_fast_forward())),
                MenuAction::ToggleSpeed,
            ),
            MenuItem::new(
                "core_variables",
                "Core Variables",
                MenuAction::Navigate(MenuType::CoreVariables),
            ),
            MenuItem::new("back", "Back", MenuAction::Back),
        ]
    }

    fn activate(&mut self, item: &MenuItem, services: &MenuServices) -> bool {
        let host = &services.host;
        match item.action {
            MenuAction::ToggleAudio => {
                let enabled = !host.is_audio_enabled();
                host.set_audio_enabled(enabled);
                tracing::info!(enabled, "Audio toggled");
                true
            }
            MenuAction::ToggleShader => {
                let shader = host.cycle_shader();
                tracing::info!(%shader, "Shader changed");
                host.show_toast(&format!("Shader: {shader}"));
                true
            }
            MenuAction::ToggleSpeed => {
                let fast = !host.is_fast_forward();
                host.set_fast_forward(fast);
                tracing::info!(fast, "Game speed toggled, closing menu");
                services.requests.push(MenuRequest::CloseMenu(None));
                true
            }
            other => {
                tracing::warn!(?other, "Unhandled settings action");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::menu::host::testing::TestServices;
    use crate::menu::MenuFragment;

    #[test]
    fn test_audio_toggle_stays_in_menu_and_relabels() {
        let t = TestServices::empty();
        let mut menu = settings_menu(t.services.clone());
        assert_eq!(menu.get_menu_items()[0].title, "Audio: Off");

        assert!(menu.on_confirm());
        assert!(t.host.audio.load(Ordering::SeqCst));
        assert_eq!(menu.get_menu_items()[0].title, "Audio: On");
        assert!(t.services.requests.is_empty());
    }

    #[test]
    fn test_shader_cycles_with_toast() {
        let t = TestServices::empty();
        let mut menu = settings_menu(t.services.clone());
        menu.set_selected_index(1);
        assert!(menu.on_confirm());
        assert_eq!(t.host.toasts(), vec!["Shader: Sharp".to_string()]);
        assert_eq!(menu.get_menu_items()[1].title, "Shader: Sharp");
    }

    #[test]
    fn test_speed_toggle_closes_menu() {
        let t = TestServices::empty();
        let mut menu = settings_menu(t.services.clone());
        menu.set_selected_index(2);
        assert!(menu.on_confirm());
        assert!(t.host.fast_forward.load(Ordering::SeqCst));
        assert_eq!(t.services.requests.drain(), vec![MenuRequest::CloseMenu(None)]);
    }

    #[test]
    fn test_core_variables_and_back_requests() {
        let t = TestServices::empty();
        let mut menu = settings_menu(t.services.clone());
        menu.set_selected_index(3);
        menu.on_confirm();
        menu.on_navigate_down();
        menu.on_confirm();
        assert_eq!(
            t.services.requests.drain(),
            vec![
                MenuRequest::OpenSubmenu(MenuType::CoreVariables),
                MenuRequest::NavigateBack
            ]
        );
    }
}
