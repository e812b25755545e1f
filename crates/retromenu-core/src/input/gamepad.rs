//! Gamepad adapter (physical pads and the on-screen emulated pad)

use std::sync::Arc;

use super::NavigationSink;
use crate::clock::SharedClock;
use crate::keycodes::*;
use crate::navigation::{Direction, InputSource, NavigationEvent};

pub struct GamepadInputAdapter {
    sink: Arc<dyn NavigationSink>,
    clock: SharedClock,
}

impl GamepadInputAdapter {
    pub fn new(sink: Arc<dyn NavigationSink>, clock: SharedClock) -> Self {
        Self { sink, clock }
    }

    /// Translate a button event without delivering it.
    ///
    /// Only initial DOWNs map; UPs and repeats yield `None`.
    pub fn translate(&self, key: &KeyInput, physical: bool) -> Option<NavigationEvent> {
        if !key.is_down() || key.repeat_count > 0 {
            return None;
        }
        let source = if physical {
            InputSource::PhysicalGamepad
        } else {
            InputSource::EmulatedGamepad
        };
        let now = self.clock.now_millis();
        let code = key.key_code;

        let event = match code {
            KEYCODE_DPAD_UP => NavigationEvent::navigate(Direction::Up, source, now),
            KEYCODE_DPAD_DOWN => NavigationEvent::navigate(Direction::Down, source, now),
            KEYCODE_DPAD_LEFT => NavigationEvent::navigate(Direction::Left, source, now),
            KEYCODE_DPAD_RIGHT => NavigationEvent::navigate(Direction::Right, source, now),
            KEYCODE_BUTTON_A | KEYCODE_ENTER | KEYCODE_DPAD_CENTER => {
                NavigationEvent::activate(Some(code), source, now)
            }
            KEYCODE_BUTTON_B | KEYCODE_BACK => NavigationEvent::back(Some(code), source, now),
            KEYCODE_BUTTON_START => {
                if self.sink.is_menu_active() {
                    NavigationEvent::close_all(Some(code), source, now)
                } else {
                    NavigationEvent::open_menu(source, now)
                }
            }
            _ => return None,
        };
        Some(event)
    }

    /// Deliver a button event; true when it was mapped.
    ///
    /// UPs of mapped buttons are consumed while a menu is up so the game
    /// never sees half a press.
    pub fn on_key(&self, key: &KeyInput, physical: bool) -> bool {
        match self.translate(key, physical) {
            Some(event) => {
                tracing::debug!(
                    "Gamepad {} -> {:?}",
                    key_name(key.key_code),
                    event.kind()
                );
                self.sink.handle_navigation_event(event);
                true
            }
            None => {
                let mapped = Self::is_mapped(key.key_code);
                if key.is_down() {
                    mapped && key.repeat_count > 0
                } else {
                    mapped && self.sink.is_menu_active()
                }
            }
        }
    }

    pub fn is_mapped(key_code: i32) -> bool {
        matches!(
            key_code,
            KEYCODE_DPAD_UP
                | KEYCODE_DPAD_DOWN
                | KEYCODE_DPAD_LEFT
                | KEYCODE_DPAD_RIGHT
                | KEYCODE_BUTTON_A
                | KEYCODE_ENTER
                | KEYCODE_DPAD_CENTER
                | KEYCODE_BUTTON_B
                | KEYCODE_BACK
                | KEYCODE_BUTTON_START
        )
    }
}
