//! Open/close hooks between the navigation core and the running game

use std::sync::Arc;

use crate::menu::MenuServices;
use crate::navigation::{
    KeyInterceptor, MenuClosedCallback, MenuOpenedCallback, NavigationController,
};

/// Pauses the game under the menu and hands control back afterwards
#[derive(Clone)]
pub struct MenuLifecycle {
    services: MenuServices,
    interceptor: Arc<KeyInterceptor>,
}

impl MenuLifecycle {
    pub fn new(services: MenuServices, interceptor: Arc<KeyInterceptor>) -> Self {
        Self {
            services,
            interceptor,
        }
    }

    /// Frame first, then pause, so the saved thumbnail shows the game
    pub fn on_menu_opened(&self) {
        let shot = self.services.engine.capture_screenshot();
        if shot.is_none() {
            tracing::debug!("Engine returned no screenshot");
        }
        *self.services.screenshot.lock() = shot;
        self.services.engine.pause();
        self.interceptor.capture_held_keys();
        tracing::info!("Game paused for menu");
    }

    pub fn on_menu_closed(&self, button: Option<i32>) {
        let speed = self.services.host.game_speed();
        self.services.engine.resume(speed);
        self.interceptor.on_menu_closed(button);
        tracing::info!(speed, ?button, "Game resumed");
    }

    pub fn callbacks(&self) -> (MenuOpenedCallback, MenuClosedCallback) {
        let opened = self.clone();
        let closed = self.clone();
        (
            Box::new(move || opened.on_menu_opened()),
            Box::new(move |button| closed.on_menu_closed(button)),
        )
    }

    pub fn install(&self, controller: &NavigationController) {
        let (opened, closed) = self.callbacks();
        controller.set_callbacks(opened, closed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::clock::ManualClock;
    use crate::config::MenuConfig;
    use crate::engine::testing::EngineCall;
    use crate::keycodes::{KEYCODE_BUTTON_START, KEYCODE_DPAD_LEFT};
    use crate::menu::host::testing::TestServices;

    fn lifecycle(t: &TestServices) -> (MenuLifecycle, Arc<KeyInterceptor>, ManualClock) {
        let clock = ManualClock::new(1_000);
        let interceptor = Arc::new(KeyInterceptor::new(
            Arc::new(clock.clone()),
            &MenuConfig::default(),
        ));
        (
            MenuLifecycle::new(t.services.clone(), interceptor.clone()),
            interceptor,
            clock,
        )
    }

    #[test]
    fn test_open_captures_before_pause() {
        let t = TestServices::empty();
        let (lifecycle, interceptor, _) = lifecycle(&t);
        interceptor.note_key(KEYCODE_DPAD_LEFT, true);

        lifecycle.on_menu_opened();

        assert_eq!(
            t.engine.calls(),
            vec![EngineCall::Capture, EngineCall::Pause]
        );
        assert!(t.services.cached_screenshot().is_some());
        assert_eq!(interceptor.blocked_count(), 1);
    }

    #[test]
    fn test_close_resumes_at_host_speed_and_starts_grace() {
        let t = TestServices::empty();
        t.host.fast_forward.store(true, Ordering::SeqCst);
        let (lifecycle, interceptor, clock) = lifecycle(&t);

        lifecycle.on_menu_closed(Some(KEYCODE_BUTTON_START));

        assert_eq!(t.engine.calls(), vec![EngineCall::Resume(2)]);
        assert!(interceptor.should_intercept(KEYCODE_BUTTON_START, true));
        clock.advance(250);
        assert!(!interceptor.should_intercept(KEYCODE_BUTTON_START, true));
    }
}
