//! Physical gamepad input
//!
//! Polls gilrs and turns button and D-pad changes into key events carrying
//! the gamepad key codes the menu understands. Supports hotplugging.

use std::collections::HashSet;

use gilrs::{Axis, Button, Event, EventType, Gilrs};

use retromenu_core::keycodes::*;

/// Stick deflection treated as a D-pad press
const AXIS_THRESHOLD: f32 = 0.5;

/// A button edge: key code and whether it went down
pub type ButtonEdge = (i32, bool);

pub struct GamepadHandler {
    gilrs: Option<Gilrs>,
    /// Key codes currently held, so axis moves produce clean edges
    held: HashSet<i32>,
    pub connected: bool,
    pub controller_name: Option<String>,
}

impl Default for GamepadHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl GamepadHandler {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                tracing::info!("Gamepad handler initialized");
                Some(g)
            }
            Err(e) => {
                tracing::warn!("Failed to initialize gamepad support: {}", e);
                None
            }
        };

        let mut handler = Self {
            gilrs,
            held: HashSet::new(),
            connected: false,
            controller_name: None,
        };
        handler.check_connected();
        handler
    }

    fn check_connected(&mut self) {
        if let Some(ref gilrs) = self.gilrs {
            for (_id, gamepad) in gilrs.gamepads() {
                if gamepad.is_connected() {
                    self.connected = true;
                    self.controller_name = Some(gamepad.name().to_string());
                    tracing::info!("Controller connected: {}", gamepad.name());
                    return;
                }
            }
        }
        self.connected = false;
        self.controller_name = None;
    }

    /// Drain pending gilrs events into button edges
    pub fn poll(&mut self) -> Vec<ButtonEdge> {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return Vec::new();
        };

        let mut edges = Vec::new();
        let mut need_reconnect_check = false;

        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(code) = map_button(button) {
                        if self.held.insert(code) {
                            edges.push((code, true));
                        }
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(code) = map_button(button) {
                        if self.held.remove(&code) {
                            edges.push((code, false));
                        }
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    axis_edges(axis, value, &mut self.held, &mut edges);
                }
                EventType::Connected => {
                    let gamepad = gilrs.gamepad(id);
                    self.connected = true;
                    self.controller_name = Some(gamepad.name().to_string());
                    tracing::info!("Controller connected: {}", gamepad.name());
                }
                EventType::Disconnected => {
                    tracing::info!("Controller disconnected");
                    need_reconnect_check = true;
                }
                _ => {}
            }
        }

        if need_reconnect_check {
            // Release whatever the lost pad was holding
            edges.extend(self.held.drain().map(|code| (code, false)));
            self.check_connected();
        }
        edges
    }
}

/// Face-button layout follows the position, not the label
fn map_button(button: Button) -> Option<i32> {
    match button {
        Button::South => Some(KEYCODE_BUTTON_A),
        Button::East => Some(KEYCODE_BUTTON_B),
        Button::West => Some(KEYCODE_BUTTON_X),
        Button::North => Some(KEYCODE_BUTTON_Y),
        Button::DPadUp => Some(KEYCODE_DPAD_UP),
        Button::DPadDown => Some(KEYCODE_DPAD_DOWN),
        Button::DPadLeft => Some(KEYCODE_DPAD_LEFT),
        Button::DPadRight => Some(KEYCODE_DPAD_RIGHT),
        Button::LeftTrigger => Some(KEYCODE_BUTTON_L1),
        Button::RightTrigger => Some(KEYCODE_BUTTON_R1),
        Button::Start => Some(KEYCODE_BUTTON_START),
        Button::Select => Some(KEYCODE_BUTTON_SELECT),
        _ => None,
    }
}

/// Left stick and D-pad axes as D-pad presses
fn axis_edges(axis: Axis, value: f32, held: &mut HashSet<i32>, edges: &mut Vec<ButtonEdge>) {
    let (negative, positive) = match axis {
        Axis::LeftStickX | Axis::DPadX => (KEYCODE_DPAD_LEFT, KEYCODE_DPAD_RIGHT),
        // Y axis is typically inverted (up = negative)
        Axis::LeftStickY | Axis::DPadY => (KEYCODE_DPAD_UP, KEYCODE_DPAD_DOWN),
        _ => return,
    };
    let wanted = if value < -AXIS_THRESHOLD {
        Some(negative)
    } else if value > AXIS_THRESHOLD {
        Some(positive)
    } else {
        None
    };
    for code in [negative, positive] {
        let pressed = wanted == Some(code);
        if pressed && held.insert(code) {
            edges.push((code, true));
        } else if !pressed && held.remove(&code) {
            edges.push((code, false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_produces_single_edges() {
        let mut held = HashSet::new();
        let mut edges = Vec::new();
        axis_edges(Axis::LeftStickY, -0.9, &mut held, &mut edges);
        axis_edges(Axis::LeftStickY, -0.8, &mut held, &mut edges);
        assert_eq!(edges, vec![(KEYCODE_DPAD_UP, true)]);

        axis_edges(Axis::LeftStickY, 0.9, &mut held, &mut edges);
        assert_eq!(
            edges[1..],
            [(KEYCODE_DPAD_UP, false), (KEYCODE_DPAD_DOWN, true)]
        );

        axis_edges(Axis::LeftStickY, 0.1, &mut held, &mut edges);
        assert_eq!(edges.last(), Some(&(KEYCODE_DPAD_DOWN, false)));
        assert!(held.is_empty());
    }

    #[test]
    fn test_face_buttons_map_by_position() {
        assert_eq!(map_button(Button::South), Some(KEYCODE_BUTTON_A));
        assert_eq!(map_button(Button::East), Some(KEYCODE_BUTTON_B));
        assert_eq!(map_button(Button::Start), Some(KEYCODE_BUTTON_START));
        assert_eq!(map_button(Button::Mode), None);
    }
}
