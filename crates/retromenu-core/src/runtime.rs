//! One-stop wiring for hosts
//!
//! [`RetroMenu`] owns the controller, the three input adapters, the key
//! interceptor and the lifecycle hooks. A host forwards raw input and calls
//! [`RetroMenu::tick`] every frame; everything else happens inside.

use std::sync::Arc;

use crate::clock::SharedClock;
use crate::config::MenuConfig;
use crate::engine::Engine;
use crate::input::{
    GamepadInputAdapter, KeyboardInputAdapter, NavigationSink, TouchInputAdapter,
};
use crate::keycodes::{KeyInput, KEYCODE_BUTTON_START, KEYCODE_F12};
use crate::lifecycle::MenuLifecycle;
use crate::menu::{
    MenuFactory, MenuHost, MenuRequests, MenuServices, MenuStackAdapter, MenuView,
};
use crate::navigation::{KeyInterceptor, MenuType, NavigationController};
use crate::storage::SaveStateStore;

pub struct RetroMenu {
    controller: Arc<NavigationController>,
    services: MenuServices,
    interceptor: Arc<KeyInterceptor>,
    keyboard: KeyboardInputAdapter,
    gamepad: GamepadInputAdapter,
    touch: TouchInputAdapter,
}

impl RetroMenu {
    pub fn new(
        engine: Arc<dyn Engine>,
        store: Arc<dyn SaveStateStore>,
        host: Arc<dyn MenuHost>,
        config: &MenuConfig,
        clock: SharedClock,
    ) -> Self {
        let requests = MenuRequests::new();
        let services = MenuServices::new(engine, store, host, requests.clone());
        let adapter = MenuStackAdapter::new(MenuFactory::new(services.clone()));
        let controller = Arc::new(NavigationController::new(
            Box::new(adapter),
            config,
            requests,
        ));

        let interceptor = Arc::new(KeyInterceptor::new(clock.clone(), config));
        MenuLifecycle::new(services.clone(), interceptor.clone()).install(&controller);

        let sink: Arc<dyn NavigationSink> = controller.clone();
        Self {
            keyboard: KeyboardInputAdapter::new(sink.clone(), clock.clone(), config),
            gamepad: GamepadInputAdapter::new(sink.clone(), clock.clone()),
            touch: TouchInputAdapter::new(sink, clock, config),
            controller,
            services,
            interceptor,
        }
    }

    pub fn controller(&self) -> &Arc<NavigationController> {
        &self.controller
    }

    pub fn services(&self) -> &MenuServices {
        &self.services
    }

    pub fn touch(&self) -> &TouchInputAdapter {
        &self.touch
    }

    pub fn is_menu_active(&self) -> bool {
        self.controller.is_menu_active()
    }

    pub fn current_menu(&self) -> Option<MenuType> {
        self.is_menu_active().then(|| self.controller.current_menu())
    }

    /// Keyboard event from the host; true when the game must not see it
    pub fn on_keyboard_key(&self, key: &KeyInput) -> bool {
        if self.intercepted(key) {
            return true;
        }
        if !self.is_menu_active() && !self.is_menu_toggle(key) {
            return false;
        }
        self.keyboard.on_key(key)
    }

    /// Gamepad button from the host; true when the game must not see it
    pub fn on_gamepad_key(&self, key: &KeyInput, physical: bool) -> bool {
        if self.intercepted(key) {
            return true;
        }
        if !self.is_menu_active() && !self.is_menu_toggle(key) {
            return false;
        }
        self.gamepad.on_key(key, physical)
    }

    /// Drive timers: touch activation and the blocked-key purge
    pub fn tick(&self) {
        self.touch.tick();
        self.interceptor.tick();
    }

    /// Render model of the top screen
    pub fn view(&self) -> Option<MenuView> {
        if !self.is_menu_active() {
            return None;
        }
        self.controller
            .current_fragment()
            .map(|fragment| fragment.lock().view())
    }

    fn intercepted(&self, key: &KeyInput) -> bool {
        self.interceptor.note_key(key.key_code, key.is_down());
        self.interceptor.should_intercept(key.key_code, !key.is_down())
    }

    fn is_menu_toggle(&self, key: &KeyInput) -> bool {
        matches!(key.key_code, KEYCODE_F12 | KEYCODE_BUTTON_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::engine::testing::{EngineCall, MemoryEngine};
    use crate::keycodes::*;
    use crate::menu::host::testing::RecordingHost;
    use crate::storage::testing::MemoryStore;

    struct Fixture {
        menu: RetroMenu,
        engine: Arc<MemoryEngine>,
        clock: ManualClock,
    }

    fn fixture() -> Fixture {
        let clock = ManualClock::new(50_000);
        let engine = Arc::new(MemoryEngine::with_state(b"live"));
        let menu = RetroMenu::new(
            engine.clone(),
            Arc::new(MemoryStore::default()),
            Arc::new(RecordingHost::default()),
            &MenuConfig::default(),
            Arc::new(clock.clone()),
        );
        Fixture {
            menu,
            engine,
            clock,
        }
    }

    fn press(f: &Fixture, code: i32) -> bool {
        let now = f.clock.advance(300);
        let down = f.menu.on_keyboard_key(&KeyInput::down(code, now));
        f.menu.on_keyboard_key(&KeyInput::up(code, now + 20));
        down
    }

    #[test]
    fn test_game_keys_pass_through_while_closed() {
        let f = fixture();
        assert!(!press(&f, KEYCODE_DPAD_DOWN));
        assert!(!press(&f, KEYCODE_DEL));
        assert!(f.menu.view().is_none());
    }

    #[test]
    fn test_f12_opens_pauses_and_renders_main() {
        let f = fixture();
        assert!(press(&f, KEYCODE_F12));
        assert_eq!(f.menu.current_menu(), Some(MenuType::Main));
        assert!(f.engine.calls().contains(&EngineCall::Pause));
        match f.menu.view() {
            Some(MenuView::List(list)) => assert_eq!(list.items.len(), 6),
            other => panic!("expected main list, got {other:?}"),
        }
    }

    #[test]
    fn test_closing_button_up_is_swallowed() {
        let f = fixture();
        press(&f, KEYCODE_F12);
        let now = f.clock.advance(300);
        assert!(f.menu.on_gamepad_key(&KeyInput::down(KEYCODE_BUTTON_A, now), true));
        assert!(!f.menu.is_menu_active());
        assert!(f.engine.calls().contains(&EngineCall::Resume(1)));

        f.clock.advance(100);
        assert!(f
            .menu
            .on_gamepad_key(&KeyInput::up(KEYCODE_BUTTON_A, now + 100), true));
        f.clock.advance(200);
        assert!(!f
            .menu
            .on_gamepad_key(&KeyInput::down(KEYCODE_BUTTON_A, now + 300), true));
    }

    #[test]
    fn test_touch_selects_then_activates_on_tick() {
        let f = fixture();
        press(&f, KEYCODE_F12);
        f.clock.advance(300);
        f.menu.touch().on_touch_down(2);
        assert_eq!(f.menu.controller().selected_index(), 2);
        f.clock.advance(150);
        f.menu.tick();
        assert_eq!(f.menu.current_menu(), Some(MenuType::Progress));
    }

    #[test]
    fn test_debounced_touch_does_not_activate_previous_selection() {
        let f = fixture();
        press(&f, KEYCODE_F12);
        press(&f, KEYCODE_DPAD_DOWN);
        assert_eq!(f.menu.controller().selected_index(), 1);

        f.clock.advance(100);
        assert!(!f.menu.touch().on_touch_down(4));
        assert_eq!(f.menu.controller().selected_index(), 1);
        f.clock.advance(150);
        f.menu.tick();
        assert_eq!(f.menu.current_menu(), Some(MenuType::Main));
        assert!(!f.engine.calls().contains(&EngineCall::Reset));

        f.clock.advance(300);
        assert!(f.menu.touch().on_touch_down(4));
        f.clock.advance(150);
        f.menu.tick();
        assert_eq!(f.menu.current_menu(), Some(MenuType::About));
    }
}
