//! Platform key codes and the raw key-event model
//!
//! Codes follow Android `KeyEvent` numbering so hosts can pass device codes
//! through untouched. Terminal and gamepad hosts map into this space.

pub const KEYCODE_BACK: i32 = 4;
pub const KEYCODE_0: i32 = 7;
pub const KEYCODE_1: i32 = 8;
pub const KEYCODE_9: i32 = 16;
pub const KEYCODE_DPAD_UP: i32 = 19;
pub const KEYCODE_DPAD_DOWN: i32 = 20;
pub const KEYCODE_DPAD_LEFT: i32 = 21;
pub const KEYCODE_DPAD_RIGHT: i32 = 22;
pub const KEYCODE_DPAD_CENTER: i32 = 23;
pub const KEYCODE_A: i32 = 29;
pub const KEYCODE_D: i32 = 32;
pub const KEYCODE_S: i32 = 47;
pub const KEYCODE_W: i32 = 51;
pub const KEYCODE_SPACE: i32 = 62;
pub const KEYCODE_ENTER: i32 = 66;
pub const KEYCODE_DEL: i32 = 67;
pub const KEYCODE_BUTTON_A: i32 = 96;
pub const KEYCODE_BUTTON_B: i32 = 97;
pub const KEYCODE_BUTTON_X: i32 = 99;
pub const KEYCODE_BUTTON_Y: i32 = 100;
pub const KEYCODE_BUTTON_L1: i32 = 102;
pub const KEYCODE_BUTTON_R1: i32 = 103;
pub const KEYCODE_BUTTON_START: i32 = 108;
pub const KEYCODE_BUTTON_SELECT: i32 = 109;
pub const KEYCODE_ESCAPE: i32 = 111;
pub const KEYCODE_F12: i32 = 142;

/// Key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

/// A single key event as delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key_code: i32,
    pub action: KeyAction,
    /// Auto-repeat counter; 0 for the initial DOWN
    pub repeat_count: u32,
    /// Hardware event time (used for duplicate detection)
    pub event_time: i64,
    /// Time of the DOWN that started this press
    pub down_time: i64,
}

impl KeyInput {
    pub fn down(key_code: i32, event_time: i64) -> Self {
        Self {
            key_code,
            action: KeyAction::Down,
            repeat_count: 0,
            event_time,
            down_time: event_time,
        }
    }

    pub fn up(key_code: i32, event_time: i64) -> Self {
        Self {
            key_code,
            action: KeyAction::Up,
            repeat_count: 0,
            event_time,
            down_time: event_time,
        }
    }

    /// Same event marked as an auto-repeat
    pub fn with_repeat(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    pub fn is_down(&self) -> bool {
        self.action == KeyAction::Down
    }
}

/// Digit key (1-9) to zero-based item index
pub fn quick_jump_index(key_code: i32) -> Option<usize> {
    if (KEYCODE_1..=KEYCODE_9).contains(&key_code) {
        Some((key_code - KEYCODE_1) as usize)
    } else {
        None
    }
}

/// Readable name for logs
pub fn key_name(key_code: i32) -> &'static str {
    match key_code {
        KEYCODE_BACK => "BACK",
        KEYCODE_DPAD_UP => "DPAD_UP",
        KEYCODE_DPAD_DOWN => "DPAD_DOWN",
        KEYCODE_DPAD_LEFT => "DPAD_LEFT",
        KEYCODE_DPAD_RIGHT => "DPAD_RIGHT",
        KEYCODE_DPAD_CENTER => "DPAD_CENTER",
        KEYCODE_A => "A",
        KEYCODE_D => "D",
        KEYCODE_S => "S",
        KEYCODE_W => "W",
        KEYCODE_SPACE => "SPACE",
        KEYCODE_ENTER => "ENTER",
        KEYCODE_DEL => "DEL",
        KEYCODE_BUTTON_A => "BUTTON_A",
        KEYCODE_BUTTON_B => "BUTTON_B",
        KEYCODE_BUTTON_X => "BUTTON_X",
        KEYCODE_BUTTON_Y => "BUTTON_Y",
        KEYCODE_BUTTON_L1 => "BUTTON_L1",
        KEYCODE_BUTTON_R1 => "BUTTON_R1",
        KEYCODE_BUTTON_START => "BUTTON_START",
        KEYCODE_BUTTON_SELECT => "BUTTON_SELECT",
        KEYCODE_ESCAPE => "ESCAPE",
        KEYCODE_F12 => "F12",
        KEYCODE_0..=KEYCODE_9 => "DIGIT",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_jump_index() {
        assert_eq!(quick_jump_index(KEYCODE_1), Some(0));
        assert_eq!(quick_jump_index(KEYCODE_9), Some(8));
        assert_eq!(quick_jump_index(KEYCODE_0), None);
        assert_eq!(quick_jump_index(KEYCODE_ENTER), None);
    }
}
