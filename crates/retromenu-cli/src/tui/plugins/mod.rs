//! Things the menu runs on top of: the demo game and the gamepad

pub mod demo;
#[cfg(unix)]
pub mod gamepad;

pub use demo::{DemoEngine, TerminalHost};
