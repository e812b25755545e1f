//! Physical keyboard adapter with press-cycle tracking
//!
//! Holding a key makes the platform fire DOWNs (sometimes duplicated with the
//! same hardware time) far faster than anyone can tap. A press cycle runs
//! from a key's first DOWN until its UP, or until 500ms pass between DOWNs;
//! at most one navigation escapes per cycle.
//!
//! Key handling may be entered from several threads for the same press, so
//! every decide-and-mutate sequence runs under one process-wide lock.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::NavigationSink;
use crate::clock::SharedClock;
use crate::config::MenuConfig;
use crate::keycodes::*;
use crate::navigation::{Direction, InputSource, NavigationEvent};

/// Per-key cycle bookkeeping
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PressCycleState {
    pub last_down_timestamp: i64,
    pub last_up_timestamp: i64,
    pub has_navigated_in_cycle: bool,
    /// Hardware time of the last handled DOWN, for duplicate detection
    pub last_down_event_time: i64,
    /// Hardware time of the last handled UP; kept apart so an UP stamped
    /// with its DOWN's time still closes the cycle
    pub last_up_event_time: i64,
}

#[derive(Debug, Default)]
struct PressCycleTable {
    states: HashMap<i32, PressCycleState>,
    /// Action keys whose DOWN arrived since their last UP
    observed_downs: HashSet<i32>,
}

/// Shared press-cycle table; every adapter built with
/// [`KeyboardInputAdapter::new`] uses the same one
#[derive(Debug, Default)]
pub struct PressCycleTracker {
    table: Mutex<PressCycleTable>,
}

static GLOBAL_PRESS_CYCLES: Lazy<Arc<PressCycleTracker>> =
    Lazy::new(|| Arc::new(PressCycleTracker::default()));

impl PressCycleTracker {
    /// The process-wide tracker
    pub fn global() -> Arc<PressCycleTracker> {
        GLOBAL_PRESS_CYCLES.clone()
    }

    /// Decide whether a navigation DOWN may emit
    pub fn on_down(&self, key_code: i32, event_time: i64, now: i64, timeout_ms: i64) -> bool {
        let mut table = self.table.lock();
        let state = table.states.entry(key_code).or_default();

        if event_time == state.last_down_event_time {
            tracing::trace!("Duplicate DOWN for {} at {}", key_name(key_code), event_time);
            return false;
        }
        state.last_down_event_time = event_time;

        let since_last_down = now - state.last_down_timestamp;
        if since_last_down > timeout_ms {
            state.has_navigated_in_cycle = false;
        }
        state.last_down_timestamp = now;

        if state.has_navigated_in_cycle {
            tracing::trace!(
                "Suppressed {} inside cycle ({}ms since last DOWN)",
                key_name(key_code),
                since_last_down
            );
            return false;
        }
        state.has_navigated_in_cycle = true;
        true
    }

    /// UP inside the timeout reopens the cycle
    pub fn on_up(&self, key_code: i32, event_time: i64, now: i64, timeout_ms: i64) {
        let mut table = self.table.lock();
        let state = table.states.entry(key_code).or_default();

        if event_time == state.last_up_event_time {
            tracing::trace!("Duplicate UP for {} at {}", key_name(key_code), event_time);
            return;
        }
        state.last_up_event_time = event_time;

        if now - state.last_down_timestamp < timeout_ms {
            state.has_navigated_in_cycle = false;
        }
        state.last_up_timestamp = now;
    }

    fn mark_down_observed(&self, key_code: i32) {
        self.table.lock().observed_downs.insert(key_code);
    }

    /// True when the DOWN for this UP was never seen
    fn take_missed_down(&self, key_code: i32) -> bool {
        !self.table.lock().observed_downs.remove(&key_code)
    }

    pub fn state(&self, key_code: i32) -> Option<PressCycleState> {
        self.table.lock().states.get(&key_code).copied()
    }
}

fn direction_for(key_code: i32) -> Option<Direction> {
    match key_code {
        KEYCODE_DPAD_UP | KEYCODE_W => Some(Direction::Up),
        KEYCODE_DPAD_DOWN | KEYCODE_S => Some(Direction::Down),
        KEYCODE_DPAD_LEFT | KEYCODE_A => Some(Direction::Left),
        KEYCODE_DPAD_RIGHT | KEYCODE_D => Some(Direction::Right),
        _ => None,
    }
}

pub struct KeyboardInputAdapter {
    sink: Arc<dyn NavigationSink>,
    clock: SharedClock,
    tracker: Arc<PressCycleTracker>,
    press_cycle_timeout_ms: i64,
    quick_jump_keys: bool,
}

impl KeyboardInputAdapter {
    pub fn new(sink: Arc<dyn NavigationSink>, clock: SharedClock, config: &MenuConfig) -> Self {
        Self::with_tracker(sink, clock, config, PressCycleTracker::global())
    }

    /// Use a private tracker (tests, isolated hosts)
    pub fn with_tracker(
        sink: Arc<dyn NavigationSink>,
        clock: SharedClock,
        config: &MenuConfig,
        tracker: Arc<PressCycleTracker>,
    ) -> Self {
        Self {
            sink,
            clock,
            tracker,
            press_cycle_timeout_ms: config.press_cycle_timeout_ms,
            quick_jump_keys: config.quick_jump_keys,
        }
    }

    /// Keys this adapter may consume
    pub fn is_navigation_key(key_code: i32) -> bool {
        direction_for(key_code).is_some()
            || matches!(
                key_code,
                KEYCODE_ENTER
                    | KEYCODE_DPAD_CENTER
                    | KEYCODE_SPACE
                    | KEYCODE_ESCAPE
                    | KEYCODE_BACK
                    | KEYCODE_DEL
                    | KEYCODE_F12
            )
    }

    /// Route a DOWN or UP
    pub fn on_key(&self, key: &KeyInput) -> bool {
        if key.is_down() {
            self.on_key_down(key)
        } else {
            self.on_key_up(key)
        }
    }

    /// Returns whether the key was consumed
    pub fn on_key_down(&self, key: &KeyInput) -> bool {
        let now = self.clock.now_millis();
        let key_code = key.key_code;

        if let Some(direction) = direction_for(key_code) {
            if key.repeat_count > 0 {
                return true;
            }
            let allow = self.tracker.on_down(
                key_code,
                key.event_time,
                now,
                self.press_cycle_timeout_ms,
            );
            if allow {
                tracing::debug!("{} -> Navigate({:?})", key_name(key_code), direction);
                self.sink.handle_navigation_event(NavigationEvent::navigate(
                    direction,
                    InputSource::Keyboard,
                    now,
                ));
            }
            return true;
        }

        if key.repeat_count > 0 {
            return Self::is_navigation_key(key_code);
        }

        if key_code == KEYCODE_F12 {
            let event = if self.sink.is_menu_active() {
                NavigationEvent::close_all(Some(key_code), InputSource::Keyboard, now)
            } else {
                NavigationEvent::open_menu(InputSource::Keyboard, now)
            };
            self.sink.handle_navigation_event(event);
            return true;
        }

        if let Some(index) = quick_jump_index(key_code) {
            if self.quick_jump_keys && self.sink.is_menu_active() {
                self.sink.handle_navigation_event(NavigationEvent::select_item(
                    index,
                    InputSource::Keyboard,
                    now,
                ));
                return true;
            }
            return false;
        }

        let event = match key_code {
            KEYCODE_ENTER | KEYCODE_DPAD_CENTER | KEYCODE_SPACE => {
                NavigationEvent::activate(Some(key_code), InputSource::Keyboard, now)
            }
            KEYCODE_ESCAPE => NavigationEvent::close_all(Some(key_code), InputSource::Keyboard, now),
            KEYCODE_BACK => NavigationEvent::back(Some(key_code), InputSource::Keyboard, now),
            KEYCODE_DEL => {
                // Backspace belongs to the game while no menu is up
                if !self.sink.is_menu_active() {
                    return false;
                }
                NavigationEvent::back(Some(key_code), InputSource::Keyboard, now)
            }
            _ => return false,
        };
        self.tracker.mark_down_observed(key_code);
        tracing::debug!("{} -> {:?}", key_name(key_code), event.kind());
        self.sink.handle_navigation_event(event);
        true
    }

    /// Returns whether the key was consumed
    pub fn on_key_up(&self, key: &KeyInput) -> bool {
        let now = self.clock.now_millis();
        let key_code = key.key_code;

        if direction_for(key_code).is_some() {
            self.tracker
                .on_up(key_code, key.event_time, now, self.press_cycle_timeout_ms);
            return true;
        }

        if !matches!(key_code, KEYCODE_DEL | KEYCODE_BACK | KEYCODE_ESCAPE) {
            return false;
        }
        if !self.tracker.take_missed_down(key_code) {
            // DOWN already handled this press
            return true;
        }
        if key_code == KEYCODE_DEL && !self.sink.is_menu_active() {
            return false;
        }

        tracing::debug!("UP fallback for {}: DOWN was never seen", key_name(key_code));
        let event = if key_code == KEYCODE_ESCAPE {
            NavigationEvent::close_all(Some(key_code), InputSource::Keyboard, now)
        } else {
            NavigationEvent::back(Some(key_code), InputSource::Keyboard, now)
        };
        self.sink.handle_navigation_event(event);
        true
    }
}
