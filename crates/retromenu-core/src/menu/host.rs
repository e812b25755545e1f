//! Host-side effects the menus trigger

use std::sync::Arc;

use parking_lot::Mutex;

use super::MenuRequests;
use crate::engine::{Engine, Screenshot};
use crate::storage::{SaveStateStore, SessionSlotTracker};

/// Everything outside the engine and storage that a menu may poke
pub trait MenuHost: Send + Sync {
    fn is_audio_enabled(&self) -> bool;

    fn set_audio_enabled(&self, enabled: bool);

    /// Name of the active shader
    fn shader_name(&self) -> String;

    /// Advance to the next shader, returning its name
    fn cycle_shader(&self) -> String;

    fn is_fast_forward(&self) -> bool;

    fn set_fast_forward(&self, enabled: bool);

    /// Speed multiplier to resume at
    fn game_speed(&self) -> u32 {
        if self.is_fast_forward() {
            2
        } else {
            1
        }
    }

    /// Short transient notification
    fn show_toast(&self, message: &str);

    /// Leave the game entirely
    fn exit_game(&self);

    fn rom_name(&self) -> String;

    fn core_name(&self) -> String;

    /// `key = value` lines describing the running core's options
    fn core_variables(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Collaborators handed to every menu screen
#[derive(Clone)]
pub struct MenuServices {
    pub engine: Arc<dyn Engine>,
    pub store: Arc<dyn SaveStateStore>,
    pub host: Arc<dyn MenuHost>,
    pub session: Arc<SessionSlotTracker>,
    pub requests: MenuRequests,
    /// Frame captured when the menu opened
    pub screenshot: Arc<Mutex<Option<Screenshot>>>,
}

impl MenuServices {
    pub fn new(
        engine: Arc<dyn Engine>,
        store: Arc<dyn SaveStateStore>,
        host: Arc<dyn MenuHost>,
        requests: MenuRequests,
    ) -> Self {
        Self {
            engine,
            store,
            host,
            session: Arc::new(SessionSlotTracker::new()),
            requests,
            screenshot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn cached_screenshot(&self) -> Option<Screenshot> {
        self.screenshot.lock().clone()
    }

    /// Serialize the engine into `slot_number`; false on any failure
    pub fn save_to_slot(&self, slot_number: u8, name: Option<&str>) -> bool {
        let state = self.engine.serialize_state();
        if state.is_empty() {
            tracing::warn!("Engine produced an empty state, not saving");
            return false;
        }
        let screenshot = self.cached_screenshot();
        let rom = self.host.rom_name();
        self.store
            .save_to_slot(slot_number, &state, screenshot.as_ref(), name, &rom)
    }
}
