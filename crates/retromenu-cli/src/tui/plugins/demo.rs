//! Demo game and host
//!
//! A bouncing dot the player can steer. It stands in for an emulator core:
//! it can be paused, sped up, reset and snapshotted.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use retromenu_core::navigation::Direction;
use retromenu_core::{Engine, MenuHost, Screenshot};

pub const FIELD_WIDTH: i32 = 48;
pub const FIELD_HEIGHT: i32 = 16;

/// Pixels per field cell in screenshots
const SHOT_SCALE: u32 = 4;

pub const SHADERS: [&str; 4] = ["None", "Scanlines", "CRT", "LCD Grid"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoState {
    pub frame: u64,
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    pub bounces: u32,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            frame: 0,
            x: FIELD_WIDTH / 2,
            y: FIELD_HEIGHT / 2,
            dx: 1,
            dy: 1,
            bounces: 0,
        }
    }
}

impl DemoState {
    fn step(&mut self) {
        self.frame += 1;
        // Move every fourth frame so the dot is followable at 60fps
        if self.frame % 4 != 0 {
            return;
        }
        let (nx, ny) = (self.x + self.dx, self.y + self.dy);
        if !(0..FIELD_WIDTH).contains(&nx) {
            self.dx = -self.dx;
            self.bounces += 1;
        }
        if !(0..FIELD_HEIGHT).contains(&ny) {
            self.dy = -self.dy;
            self.bounces += 1;
        }
        self.x = (self.x + self.dx).clamp(0, FIELD_WIDTH - 1);
        self.y = (self.y + self.dy).clamp(0, FIELD_HEIGHT - 1);
    }

    fn steer(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.dy = -1,
            Direction::Down => self.dy = 1,
            Direction::Left => self.dx = -1,
            Direction::Right => self.dx = 1,
        }
    }
}

pub struct DemoEngine {
    state: Mutex<DemoState>,
    paused: AtomicBool,
    speed: AtomicU32,
}

impl Default for DemoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoEngine {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DemoState::default()),
            paused: AtomicBool::new(false),
            speed: AtomicU32::new(1),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn speed(&self) -> u32 {
        self.speed.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> DemoState {
        self.state.lock().clone()
    }

    /// Advance one host frame (`speed` game frames)
    pub fn run_frame(&self) {
        if self.is_paused() {
            return;
        }
        let mut state = self.state.lock();
        for _ in 0..self.speed() {
            state.step();
        }
    }

    /// Player input while no menu is open
    pub fn steer(&self, direction: Direction) {
        if !self.is_paused() {
            self.state.lock().steer(direction);
        }
    }
}

impl Engine for DemoEngine {
    fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    fn resume(&self, speed: u32) {
        self.speed.store(speed.max(1), Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
    }

    fn reset(&self) {
        tracing::info!("Demo game reset");
        *self.state.lock() = DemoState::default();
    }

    fn serialize_state(&self) -> Vec<u8> {
        match serde_json::to_vec(&*self.state.lock()) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to serialize demo state: {}", e);
                Vec::new()
            }
        }
    }

    fn unserialize_state(&self, state: &[u8]) -> bool {
        match serde_json::from_slice::<DemoState>(state) {
            Ok(loaded) => {
                *self.state.lock() = loaded;
                true
            }
            Err(e) => {
                tracing::warn!("Rejected demo state: {}", e);
                false
            }
        }
    }

    fn capture_screenshot(&self) -> Option<Screenshot> {
        let state = self.snapshot();
        let width = FIELD_WIDTH as u32 * SHOT_SCALE;
        let height = FIELD_HEIGHT as u32 * SHOT_SCALE;
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for py in 0..height {
            for px in 0..width {
                let cell = ((px / SHOT_SCALE) as i32, (py / SHOT_SCALE) as i32);
                let pixel = if cell == (state.x, state.y) {
                    [255, 196, 0, 255]
                } else {
                    [18, 18, 28, 255]
                };
                rgba.extend_from_slice(&pixel);
            }
        }
        Some(Screenshot::new(width, height, rgba))
    }
}

/// Host-side toggles; toasts are queued for the render loop to pick up
pub struct TerminalHost {
    rom_name: String,
    /// Speed resumed at when fast-forward is off
    base_speed: u32,
    audio: AtomicBool,
    shader: AtomicUsize,
    fast_forward: AtomicBool,
    exit_requested: AtomicBool,
    toasts: Mutex<Vec<String>>,
}

impl TerminalHost {
    pub fn new(rom_name: impl Into<String>) -> Self {
        Self {
            rom_name: rom_name.into(),
            base_speed: 1,
            audio: AtomicBool::new(true),
            shader: AtomicUsize::new(0),
            fast_forward: AtomicBool::new(false),
            exit_requested: AtomicBool::new(false),
            toasts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_base_speed(mut self, speed: u32) -> Self {
        self.base_speed = speed.max(1);
        self
    }

    pub fn shader_index(&self) -> usize {
        self.shader.load(Ordering::SeqCst) % SHADERS.len()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::SeqCst)
    }

    pub fn take_toasts(&self) -> Vec<String> {
        std::mem::take(&mut *self.toasts.lock())
    }
}

impl MenuHost for TerminalHost {
    fn is_audio_enabled(&self) -> bool {
        self.audio.load(Ordering::SeqCst)
    }

    fn set_audio_enabled(&self, enabled: bool) {
        self.audio.store(enabled, Ordering::SeqCst);
    }

    fn shader_name(&self) -> String {
        SHADERS[self.shader_index()].to_string()
    }

    fn cycle_shader(&self) -> String {
        self.shader.fetch_add(1, Ordering::SeqCst);
        self.shader_name()
    }

    fn is_fast_forward(&self) -> bool {
        self.fast_forward.load(Ordering::SeqCst)
    }

    fn game_speed(&self) -> u32 {
        if self.is_fast_forward() {
            2
        } else {
            self.base_speed
        }
    }

    fn set_fast_forward(&self, enabled: bool) {
        self.fast_forward.store(enabled, Ordering::SeqCst);
    }

    fn show_toast(&self, message: &str) {
        self.toasts.lock().push(message.to_string());
    }

    fn exit_game(&self) {
        tracing::info!("Exit requested from menu");
        self.exit_requested.store(true, Ordering::SeqCst);
    }

    fn rom_name(&self) -> String {
        self.rom_name.clone()
    }

    fn core_name(&self) -> String {
        "bounce (demo core)".to_string()
    }

    fn core_variables(&self) -> Vec<String> {
        vec![
            format!("bounce_field = {}x{}", FIELD_WIDTH, FIELD_HEIGHT),
            format!("bounce_shader = {}", self.shader_name()),
        ]
    }
}
