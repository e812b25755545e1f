//! Input adapters
//!
//! Translate platform primitives (key events, gamepad buttons, touches)
//! into [`NavigationEvent`]s and hand them to a [`NavigationSink`].

pub mod gamepad;
pub mod keyboard;
pub mod touch;

use crate::navigation::NavigationEvent;

pub use gamepad::GamepadInputAdapter;
pub use keyboard::{KeyboardInputAdapter, PressCycleTracker};
pub use touch::TouchInputAdapter;

/// Where adapters deliver events
pub trait NavigationSink: Send + Sync {
    /// Debounced path; false when the event was debounced away
    fn handle_navigation_event(&self, event: NavigationEvent) -> bool;

    /// Skip the debounce window (second phase of an accepted gesture)
    fn dispatch_immediate(&self, event: NavigationEvent);

    fn is_menu_active(&self) -> bool;
}
