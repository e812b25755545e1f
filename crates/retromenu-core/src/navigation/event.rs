//! Unified navigation events
//!
//! Every input modality (gamepad, touch, keyboard, system back) is reduced to
//! a [`NavigationEvent`] before it reaches the queue.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MenuError;

/// Cursor movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Where an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputSource {
    EmulatedGamepad,
    PhysicalGamepad,
    Touch,
    Keyboard,
    SystemBack,
}

/// What the event asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Move the cursor
    Navigate(Direction),
    /// Jump straight to an item (touch, quick-jump keys)
    SelectItem(usize),
    /// Confirm the current item; carries the key/button that did it
    ActivateSelected(Option<i32>),
    /// One level back
    NavigateBack(Option<i32>),
    /// Open the main menu
    OpenMenu,
    /// Collapse every menu at once
    CloseAllMenus(Option<i32>),
}

/// Immutable navigation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    kind: EventKind,
    timestamp: i64,
    source: InputSource,
}

impl NavigationEvent {
    pub fn new(kind: EventKind, source: InputSource, timestamp: i64) -> Self {
        Self {
            kind,
            timestamp,
            source,
        }
    }

    pub fn navigate(direction: Direction, source: InputSource, timestamp: i64) -> Self {
        Self::new(EventKind::Navigate(direction), source, timestamp)
    }

    pub fn select_item(index: usize, source: InputSource, timestamp: i64) -> Self {
        Self::new(EventKind::SelectItem(index), source, timestamp)
    }

    pub fn activate(key_code: Option<i32>, source: InputSource, timestamp: i64) -> Self {
        Self::new(EventKind::ActivateSelected(key_code), source, timestamp)
    }

    pub fn back(key_code: Option<i32>, source: InputSource, timestamp: i64) -> Self {
        Self::new(EventKind::NavigateBack(key_code), source, timestamp)
    }

    pub fn open_menu(source: InputSource, timestamp: i64) -> Self {
        Self::new(EventKind::OpenMenu, source, timestamp)
    }

    pub fn close_all(key_code: Option<i32>, source: InputSource, timestamp: i64) -> Self {
        Self::new(EventKind::CloseAllMenus(key_code), source, timestamp)
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Originating key or button, when the variant carries one
    pub fn key_code(&self) -> Option<i32> {
        match self.kind {
            EventKind::ActivateSelected(k)
            | EventKind::NavigateBack(k)
            | EventKind::CloseAllMenus(k) => k,
            _ => None,
        }
    }

    pub fn is_navigate(&self) -> bool {
        matches!(self.kind, EventKind::Navigate(_))
    }
}

/// Every navigable screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuType {
    Main,
    Settings,
    Progress,
    Exit,
    About,
    CoreVariables,
    SaveSlots,
    LoadSlots,
    ManageSaves,
    ExitSaveSlots,
}

impl MenuType {
    pub const ALL: [MenuType; 10] = [
        MenuType::Main,
        MenuType::Settings,
        MenuType::Progress,
        MenuType::Exit,
        MenuType::About,
        MenuType::CoreVariables,
        MenuType::SaveSlots,
        MenuType::LoadSlots,
        MenuType::ManageSaves,
        MenuType::ExitSaveSlots,
    ];

    /// Stable name used in persisted bundles
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuType::Main => "MAIN",
            MenuType::Settings => "SETTINGS",
            MenuType::Progress => "PROGRESS",
            MenuType::Exit => "EXIT",
            MenuType::About => "ABOUT",
            MenuType::CoreVariables => "CORE_VARIABLES",
            MenuType::SaveSlots => "SAVE_SLOTS",
            MenuType::LoadSlots => "LOAD_SLOTS",
            MenuType::ManageSaves => "MANAGE_SAVES",
            MenuType::ExitSaveSlots => "EXIT_SAVE_SLOTS",
        }
    }

    /// Title shown by hosts
    pub fn title(&self) -> &'static str {
        match self {
            MenuType::Main => "Menu",
            MenuType::Settings => "Settings",
            MenuType::Progress => "Progress",
            MenuType::Exit => "Exit",
            MenuType::About => "About",
            MenuType::CoreVariables => "Core Variables",
            MenuType::SaveSlots => "Save State",
            MenuType::LoadSlots => "Load State",
            MenuType::ManageSaves => "Manage Saves",
            MenuType::ExitSaveSlots => "Save Before Exit",
        }
    }

    /// Screens backed by the 3x3 slot grid
    pub fn is_slot_grid(&self) -> bool {
        matches!(
            self,
            MenuType::SaveSlots
                | MenuType::LoadSlots
                | MenuType::ManageSaves
                | MenuType::ExitSaveSlots
        )
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuType {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuType::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| MenuError::UnknownMenuType(s.to_string()))
    }
}

/// Navigation stack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
    pub menu_type: MenuType,
    pub selected_index: usize,
}

impl MenuState {
    pub fn new(menu_type: MenuType, selected_index: usize) -> Self {
        Self {
            menu_type,
            selected_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_type_names_parse_back() {
        for menu in MenuType::ALL {
            assert_eq!(menu.as_str().parse::<MenuType>().expect("known"), menu);
        }
        assert!("SUBMENU_X".parse::<MenuType>().is_err());
    }

    #[test]
    fn test_key_code_only_on_action_variants() {
        let ev = NavigationEvent::close_all(Some(111), InputSource::Keyboard, 10);
        assert_eq!(ev.key_code(), Some(111));
        assert_eq!(ev.timestamp(), 10);

        let nav = NavigationEvent::navigate(Direction::Up, InputSource::Touch, 5);
        assert_eq!(nav.key_code(), None);
        assert!(nav.is_navigate());
    }
}
