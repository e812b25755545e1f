//! Terminal host for RetroMenu

pub mod app;
pub mod components;
pub mod handlers;
pub mod plugins;
pub mod theme;
pub mod utils;

// Re-exports
pub use app::App;
