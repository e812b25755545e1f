//! Input handlers for the App
//!
//! Raw terminal and gamepad events are turned into core key events here;
//! the core decides what the menu does with them and what reaches the game.

pub mod keyboard;
pub mod mouse;

pub use hit_test::HitMap;
