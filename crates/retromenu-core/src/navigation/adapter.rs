//! UI transaction seam
//!
//! The processor speaks in [`MenuType`]s; implementations own whatever the
//! host uses for screens.

use super::event::MenuType;
use crate::menu::SharedFragment;

/// Show/hide/back operations on the visible menu stack
pub trait FragmentNavigationAdapter: Send {
    /// Make `menu` the visible screen
    fn show_menu(&mut self, menu: MenuType);

    /// Remove every menu screen
    fn hide_menu(&mut self);

    /// Pop one screen; false when there was nothing to pop
    fn navigate_back(&mut self) -> bool;

    /// Screens above the root one
    fn back_stack_count(&self) -> usize;

    /// Topmost visible fragment
    fn current_fragment(&self) -> Option<SharedFragment>;
}
