//! Post-close input filtering
//!
//! Two leaks are plugged here. The button that closed the menu keeps being
//! intercepted for a short grace window, so its trailing UP never reaches the
//! game. Keys held while the menu opened have their UP swallowed once after
//! close, so the core never sees an UP without a DOWN.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::clock::SharedClock;
use crate::config::MenuConfig;
use crate::keycodes::key_name;

#[derive(Debug, Default)]
struct InterceptState {
    /// Keys currently down, as seen by the host
    held: HashSet<i32>,
    /// UPs to swallow after close
    blocked: HashSet<i32>,
    /// When the blocked set is dropped
    blocked_clear_at: Option<i64>,
    /// Button that closed the menu and the end of its grace window
    grace: Option<(i32, i64)>,
}

/// Decides whether a key event should be kept away from the game
pub struct KeyInterceptor {
    clock: SharedClock,
    grace_period_ms: i64,
    blocked_keys_clear_ms: i64,
    state: Mutex<InterceptState>,
}

impl KeyInterceptor {
    pub fn new(clock: SharedClock, config: &MenuConfig) -> Self {
        Self {
            clock,
            grace_period_ms: config.grace_period_ms,
            blocked_keys_clear_ms: config.blocked_keys_clear_ms,
            state: Mutex::new(InterceptState::default()),
        }
    }

    /// Track raw key state (call for every key event the host sees)
    pub fn note_key(&self, key_code: i32, is_down: bool) {
        let mut state = self.state.lock();
        if is_down {
            state.held.insert(key_code);
        } else {
            state.held.remove(&key_code);
        }
    }

    /// Menu opened: whatever is held now gets its UP blocked later
    pub fn capture_held_keys(&self) {
        let mut state = self.state.lock();
        state.blocked = state.held.clone();
        state.blocked_clear_at = None;
        if !state.blocked.is_empty() {
            tracing::debug!(keys = ?state.blocked, "Captured held keys on menu open");
        }
    }

    /// Menu closed by `button`: open the grace window and schedule the blocked-key purge
    pub fn on_menu_closed(&self, button: Option<i32>) {
        let now = self.clock.now_millis();
        let mut state = self.state.lock();
        state.grace = button.map(|b| (b, now + self.grace_period_ms));
        state.blocked_clear_at = Some(now + self.blocked_keys_clear_ms);
        if let Some(b) = button {
            tracing::debug!(
                "Grace period started for {} ({}ms)",
                key_name(b),
                self.grace_period_ms
            );
        }
    }

    pub fn is_in_grace_period(&self, key_code: i32) -> bool {
        let now = self.clock.now_millis();
        matches!(self.state.lock().grace, Some((b, until)) if b == key_code && now < until)
    }

    /// True when the event must not reach the game
    pub fn should_intercept(&self, key_code: i32, is_up: bool) -> bool {
        let now = self.clock.now_millis();
        let mut state = self.state.lock();
        Self::expire(&mut state, now);

        if let Some((button, until)) = state.grace {
            if button == key_code && now < until {
                tracing::trace!("Intercepting {} inside grace period", key_name(key_code));
                if is_up {
                    state.held.remove(&key_code);
                }
                return true;
            }
        }

        if is_up && state.blocked.remove(&key_code) {
            state.held.remove(&key_code);
            tracing::debug!("Blocking UP for {} held at menu open", key_name(key_code));
            return true;
        }
        false
    }

    /// Drop expired windows; hosts call this from their tick
    pub fn tick(&self) {
        let now = self.clock.now_millis();
        Self::expire(&mut self.state.lock(), now);
    }

    fn expire(state: &mut InterceptState, now: i64) {
        if matches!(state.grace, Some((_, until)) if now >= until) {
            state.grace = None;
        }
        if matches!(state.blocked_clear_at, Some(at) if now >= at) {
            if !state.blocked.is_empty() {
                tracing::debug!(keys = ?state.blocked, "Clearing blocked keys");
            }
            state.blocked.clear();
            state.blocked_clear_at = None;
        }
    }

    pub fn blocked_count(&self) -> usize {
        self.state.lock().blocked.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::keycodes::{KEYCODE_BUTTON_A, KEYCODE_BUTTON_B, KEYCODE_DPAD_LEFT, KEYCODE_F12};

    fn interceptor() -> (KeyInterceptor, ManualClock) {
        let clock = ManualClock::new(10_000);
        let interceptor = KeyInterceptor::new(Arc::new(clock.clone()), &MenuConfig::default());
        (interceptor, clock)
    }

    #[test]
    fn test_closing_button_intercepted_for_grace_window() {
        let (keys, clock) = interceptor();
        keys.on_menu_closed(Some(KEYCODE_BUTTON_A));

        clock.advance(150);
        assert!(keys.should_intercept(KEYCODE_BUTTON_A, true));
        assert!(!keys.should_intercept(KEYCODE_BUTTON_B, true));

        clock.advance(50);
        assert!(!keys.should_intercept(KEYCODE_BUTTON_A, true));
        assert!(!keys.is_in_grace_period(KEYCODE_BUTTON_A));
    }

    #[test]
    fn test_touch_close_has_no_grace_button() {
        let (keys, _clock) = interceptor();
        keys.on_menu_closed(None);
        assert!(!keys.should_intercept(KEYCODE_BUTTON_A, true));
    }

    #[test]
    fn test_key_held_at_open_loses_one_up() {
        let (keys, clock) = interceptor();
        keys.note_key(KEYCODE_F12, true);
        keys.note_key(KEYCODE_DPAD_LEFT, true);
        keys.capture_held_keys();
        assert_eq!(keys.blocked_count(), 2);

        keys.on_menu_closed(None);
        clock.advance(100);
        assert!(keys.should_intercept(KEYCODE_DPAD_LEFT, true));
        assert!(!keys.should_intercept(KEYCODE_DPAD_LEFT, true));
        // DOWNs are never blocked
        assert!(!keys.should_intercept(KEYCODE_F12, false));
    }

    #[test]
    fn test_blocked_keys_cleared_after_delay() {
        let (keys, clock) = interceptor();
        keys.note_key(KEYCODE_F12, true);
        keys.capture_held_keys();
        keys.on_menu_closed(None);

        clock.advance(500);
        keys.tick();
        assert_eq!(keys.blocked_count(), 0);
        assert!(!keys.should_intercept(KEYCODE_F12, true));
    }
}
