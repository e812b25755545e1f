//! RetroMenu Core - in-game menu navigation for emulator frontends
//!
//! This crate provides everything between raw input and the game:
//! - Keyboard, gamepad and touch adapters with press-cycle tracking
//! - Debounced event queue and the menu state machine
//! - Menu screens, save-slot grids and their dialogs
//! - File-backed save-slot storage
//! - Pause/resume lifecycle with post-close key interception

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod keycodes;
pub mod lifecycle;
pub mod menu;
pub mod navigation;
pub mod runtime;
pub mod storage;

// Re-exports for convenience
pub use clock::{system_clock, Clock, ManualClock, SharedClock, SystemClock};
pub use config::MenuConfig;
pub use engine::{Engine, Screenshot};
pub use error::{MenuError, Result};
pub use keycodes::KeyInput;
pub use menu::{MenuHost, MenuView};
pub use navigation::{MenuType, NavigationController, NavigationEvent};
pub use runtime::RetroMenu;
pub use storage::{FileSaveStateStore, SaveSlotData, SaveStateStore, SessionSlotTracker};
