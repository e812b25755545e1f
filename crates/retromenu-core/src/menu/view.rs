//! Render models
//!
//! Fragments describe what to draw; hosts decide how. Only the selection
//! state needs to be exact.

use super::MenuItem;
use crate::navigation::MenuType;

/// Snapshot of one screen
#[derive(Debug, Clone, PartialEq)]
pub enum MenuView {
    List(ListView),
    Grid(GridView),
}

impl MenuView {
    pub fn list(menu_type: MenuType, items: Vec<MenuItem>, selected: usize) -> Self {
        MenuView::List(ListView {
            menu_type,
            title: menu_type.title().to_string(),
            items,
            selected,
            info: Vec::new(),
        })
    }

    pub fn menu_type(&self) -> MenuType {
        match self {
            MenuView::List(list) => list.menu_type,
            MenuView::Grid(grid) => grid.menu_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub menu_type: MenuType,
    pub title: String,
    pub items: Vec<MenuItem>,
    pub selected: usize,
    /// Read-only lines shown above the items
    pub info: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub slot_number: u8,
    pub label: String,
    pub timestamp: Option<String>,
    pub is_empty: bool,
    /// Source of a pending move/copy
    pub is_marked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub menu_type: MenuType,
    pub title: String,
    /// Row-major, always nine entries
    pub slots: Vec<SlotView>,
    /// `row * 3 + col`, or 9 for the back button
    pub selected: usize,
    pub back_label: String,
    pub back_enabled: bool,
    pub hint: Option<String>,
    pub dialog: Option<DialogView>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogView {
    Confirm {
        message: String,
        options: [String; 2],
        selected: usize,
    },
    Picker {
        title: String,
        options: Vec<String>,
        selected: usize,
    },
    Keyboard {
        prompt: String,
        text: String,
        rows: Vec<Vec<String>>,
        row: usize,
        col: usize,
    },
}
