//! Terminal host application
//!
//! Runs the demo game in the alternate screen. All input goes through
//! [`RetroMenu`] first; whatever it lets through steers the game.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout},
    Frame, Terminal,
};

use retromenu_core::{
    system_clock, Clock, FileSaveStateStore, KeyInput, MenuConfig, MenuHost, RetroMenu,
    SharedClock,
};

#[cfg(unix)]
use crate::tui::plugins::gamepad::GamepadHandler;
use crate::tui::{
    components::{
        render_game, render_menu, render_status_bar, render_toasts, StatusInfo, Toast,
        ToastQueue,
    },
    handlers::HitMap,
    plugins::{DemoEngine, TerminalHost},
    theme::Theme,
};

/// Frame pacing for the demo game and menu timers
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    pub(crate) menu: RetroMenu,
    pub(crate) engine: Arc<DemoEngine>,
    pub(crate) host: Arc<TerminalHost>,
    pub(crate) clock: SharedClock,
    pub(crate) theme: Theme,
    pub(crate) toasts: ToastQueue,
    pub(crate) hits: HitMap,
    #[cfg(unix)]
    pub(crate) gamepad: GamepadHandler,
    /// Terminal reports key releases (kitty protocol)
    pub(crate) reports_release: bool,
    pub(crate) needs_redraw: bool,
    pub(crate) should_quit: bool,
}

impl App {
    pub fn new(config: MenuConfig, store: FileSaveStateStore, rom_name: String) -> Self {
        let clock = system_clock();
        let engine = Arc::new(DemoEngine::new());
        let host =
            Arc::new(TerminalHost::new(rom_name).with_base_speed(config.default_game_speed));
        let menu = RetroMenu::new(
            engine.clone(),
            Arc::new(store),
            host.clone(),
            &config,
            clock.clone(),
        );

        Self {
            menu,
            engine,
            host,
            clock,
            theme: Theme::default(),
            toasts: ToastQueue::new(),
            hits: HitMap::default(),
            #[cfg(unix)]
            gamepad: GamepadHandler::new(),
            reports_release: false,
            needs_redraw: true,
            should_quit: false,
        }
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        self.reports_release = supports_keyboard_enhancement().unwrap_or(false);
        if self.reports_release {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        } else {
            tracing::info!("Terminal has no key release events, synthesizing them");
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        disable_raw_mode()?;
        if self.reports_release {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        loop {
            if self.needs_redraw {
                terminal.draw(|f| self.ui(f))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => self.handle_key(key),
                        Some(Ok(Event::Mouse(mouse))) => self.handle_mouse_event(mouse),
                        Some(Ok(_)) => {}
                        Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                        None => self.should_quit = true,
                    }
                    self.needs_redraw = true;
                }
                _ = tokio::time::sleep(FRAME_INTERVAL) => {
                    self.tick();
                }
            }

            if self.should_quit {
                tracing::info!("Leaving game");
                break;
            }
        }
        Ok(())
    }

    /// Advance one frame
    fn tick(&mut self) {
        self.menu.tick();
        self.engine.run_frame();

        #[cfg(unix)]
        for (code, is_down) in self.gamepad.poll() {
            let now = self.clock.now_millis();
            let input = if is_down {
                KeyInput::down(code, now)
            } else {
                KeyInput::up(code, now)
            };
            if !self.menu.on_gamepad_key(&input, true) {
                self.game_input(&input);
            }
        }

        for message in self.host.take_toasts() {
            self.toasts.push(Toast::from_menu(message));
        }
        self.toasts.tick();

        if self.host.exit_requested() {
            self.should_quit = true;
        }
        self.needs_redraw = true;
    }

    fn status(&self) -> StatusInfo {
        let snapshot = self.engine.snapshot();
        StatusInfo {
            rom_name: self.host.rom_name(),
            frame: snapshot.frame,
            speed: self.engine.speed(),
            paused: self.engine.is_paused(),
            audio: self.host.is_audio_enabled(),
            shader: self.host.shader_name(),
            #[cfg(unix)]
            controller: self.gamepad.controller_name.clone(),
            #[cfg(not(unix))]
            controller: None,
        }
    }

    fn ui(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(f.area());

        render_game(
            f,
            chunks[0],
            &self.theme,
            &self.engine.snapshot(),
            self.host.shader_index(),
        );

        match self.menu.view() {
            Some(view) => render_menu(f, chunks[0], &view, &self.theme, &mut self.hits),
            None => self.hits.clear(),
        }

        let info = self.status();
        render_status_bar(f, chunks[1], &self.theme, &info);

        if !self.toasts.is_empty() {
            let area = chunks[0];
            render_toasts(f.buffer_mut(), area, &self.toasts, &self.theme);
        }
    }
}
