//! Mouse as touch
//!
//! Left press on an item is a touch-down; dragging off the item cancels the
//! pending activation. Activation itself fires from the app tick.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::App;

impl App {
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if !self.menu.is_menu_active() {
            return;
        }
        let touch = self.menu.touch();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.hits.hit(mouse.column, mouse.row) {
                    tracing::debug!(index, "Touch down");
                    touch.on_touch_down(index);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                if touch.has_pending_activation() {
                    touch.on_pointer_move(self.hits.hit(mouse.column, mouse.row));
                }
            }
            MouseEventKind::Down(MouseButton::Right) => touch.on_touch_cancel(),
            _ => {}
        }
    }
}
