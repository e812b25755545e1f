//! Menu controllers
//!
//! Each screen implements [`MenuFragment`], the capability interface the
//! navigation processor drives. Flat lists share [`list::ListSelection`],
//! save-slot screens share [`grid::SlotGridMenu`].

pub mod about;
pub mod core_variables;
pub mod exit;
pub mod grid;
pub mod host;
pub mod list;
pub mod main_menu;
pub mod progress;
pub mod settings;
pub mod stack_adapter;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::navigation::MenuType;

pub use host::{MenuHost, MenuServices};
pub use stack_adapter::{MenuFactory, MenuStackAdapter};
pub use view::MenuView;

/// What an item does when confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Continue,
    Reset,
    SaveState,
    LoadState,
    ToggleAudio,
    ToggleSpeed,
    ToggleShader,
    SaveAndExit,
    Exit,
    SaveLog,
    Back,
    Navigate(MenuType),
    None,
}

/// Declarative menu entry, rebuilt on every render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub is_enabled: bool,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, action: MenuAction) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            is_enabled: true,
            action,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }
}

/// Navigation delegate implemented by every screen.
///
/// The fragment owns its cursor; the processor reads it back after each move.
pub trait MenuFragment: Send {
    fn menu_type(&self) -> MenuType;

    fn get_menu_items(&self) -> Vec<MenuItem>;

    fn on_navigate_up(&mut self) -> bool;

    fn on_navigate_down(&mut self) -> bool;

    /// Only 2-D screens move sideways
    fn on_navigate_left(&mut self) -> bool {
        false
    }

    fn on_navigate_right(&mut self) -> bool {
        false
    }

    /// Activate the current item; false when nothing happened
    fn on_confirm(&mut self) -> bool;

    /// True when the fragment consumed back itself (closed a dialog)
    fn on_back(&mut self) -> bool;

    fn current_selected_index(&self) -> usize;

    fn set_selected_index(&mut self, index: usize);

    fn is_attached(&self) -> bool;

    fn set_attached(&mut self, attached: bool);

    /// Bound used for direct selection
    fn item_count(&self) -> usize {
        self.get_menu_items().len()
    }

    /// Render model for hosts
    fn view(&self) -> MenuView;
}

/// Fragment handle shared between the UI stack and the state manager
pub type SharedFragment = Arc<Mutex<dyn MenuFragment>>;

pub fn share<F: MenuFragment + 'static>(fragment: F) -> SharedFragment {
    Arc::new(Mutex::new(fragment))
}

/// Work a fragment asks the controller to do once the current event finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRequest {
    OpenSubmenu(MenuType),
    NavigateBack,
    CloseMenu(Option<i32>),
}

/// Outbox shared by all fragments; drained by the controller
#[derive(Debug, Clone, Default)]
pub struct MenuRequests {
    inner: Arc<Mutex<VecDeque<MenuRequest>>>,
}

impl MenuRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, request: MenuRequest) {
        tracing::debug!(?request, "Menu request queued");
        self.inner.lock().push_back(request);
    }

    pub fn drain(&self) -> Vec<MenuRequest> {
        self.inner.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
