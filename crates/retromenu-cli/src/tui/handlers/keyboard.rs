//! Keyboard event handling
//!
//! Terminal keys become Android-style key codes for the core. Terminals
//! without release reporting get a synthetic UP right after each DOWN.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use retromenu_core::keycodes::*;
use retromenu_core::navigation::Direction;
use retromenu_core::{Clock, KeyInput};

use crate::tui::app::App;

/// Terminal key to core key code
pub fn key_code(code: KeyCode) -> Option<i32> {
    let mapped = match code {
        KeyCode::Up => KEYCODE_DPAD_UP,
        KeyCode::Down => KEYCODE_DPAD_DOWN,
        KeyCode::Left => KEYCODE_DPAD_LEFT,
        KeyCode::Right => KEYCODE_DPAD_RIGHT,
        KeyCode::Enter => KEYCODE_ENTER,
        KeyCode::Esc => KEYCODE_ESCAPE,
        KeyCode::Backspace | KeyCode::Delete => KEYCODE_DEL,
        KeyCode::F(12) => KEYCODE_F12,
        KeyCode::Char(' ') => KEYCODE_SPACE,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => KEYCODE_W,
            'a' => KEYCODE_A,
            's' => KEYCODE_S,
            'd' => KEYCODE_D,
            digit @ '0'..='9' => KEYCODE_0 + (digit as i32 - '0' as i32),
            _ => return None,
        },
        _ => return None,
    };
    Some(mapped)
}

/// Direction a key steers the game in
pub fn game_direction(key_code: i32) -> Option<Direction> {
    match key_code {
        KEYCODE_DPAD_UP | KEYCODE_W => Some(Direction::Up),
        KEYCODE_DPAD_DOWN | KEYCODE_S => Some(Direction::Down),
        KEYCODE_DPAD_LEFT | KEYCODE_A => Some(Direction::Left),
        KEYCODE_DPAD_RIGHT | KEYCODE_D => Some(Direction::Right),
        _ => None,
    }
}

/// Core key events for one terminal key event
pub fn key_inputs(code: i32, kind: KeyEventKind, now: i64, reports_release: bool) -> Vec<KeyInput> {
    match kind {
        KeyEventKind::Press if reports_release => vec![KeyInput::down(code, now)],
        KeyEventKind::Press => vec![KeyInput::down(code, now), KeyInput::up(code, now + 1)],
        KeyEventKind::Repeat => vec![KeyInput::down(code, now).with_repeat(1)],
        KeyEventKind::Release => vec![KeyInput::up(code, now)],
    }
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Release {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                self.should_quit = true;
                return;
            }
            if key.code == KeyCode::Char('q') && !self.menu.is_menu_active() {
                self.should_quit = true;
                return;
            }
        }

        let Some(code) = key_code(key.code) else {
            return;
        };
        let now = self.clock.now_millis();
        for input in key_inputs(code, key.kind, now, self.reports_release) {
            let consumed = self.menu.on_keyboard_key(&input);
            if !consumed {
                self.game_input(&input);
            }
        }
    }

    /// Input the menu let through
    pub(crate) fn game_input(&mut self, input: &KeyInput) {
        if !input.is_down() || self.menu.is_menu_active() {
            return;
        }
        if let Some(direction) = game_direction(input.key_code) {
            self.engine.steer(direction);
        }
    }
}
