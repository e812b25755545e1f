//! Drawable pieces of the terminal host

pub mod game_view;
pub mod menu_panel;
pub mod status_bar;
pub mod toast;

pub use game_view::render_game;
pub use menu_panel::render_menu;
pub use status_bar::{render_status_bar, StatusInfo};
pub use toast::{render_toasts, Toast, ToastQueue};
