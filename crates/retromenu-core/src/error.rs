//! Error types for the menu core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum MenuError {
    /// Selected index below zero
    #[error("selected index must be >= 0, got {0}")]
    NegativeIndex(i32),

    /// Slot number outside 1..=9
    #[error("slot number must be between 1 and 9, got {0}")]
    InvalidSlot(u8),

    /// Copy/move onto the source slot
    #[error("source and target slots must be different (slot {0})")]
    SameSlot(u8),

    /// Slot has no state file
    #[error("slot {0} is empty")]
    EmptySlot(u8),

    /// Menu type name not recognised
    #[error("unknown menu type: {0}")]
    UnknownMenuType(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata (de)serialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written
    #[error("config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Screenshot encoding error
    #[error("image error: {0}")]
    Image(String),
}

impl From<image::ImageError> for MenuError {
    fn from(e: image::ImageError) -> Self {
        MenuError::Image(e.to_string())
    }
}

/// Result alias used across the core
pub type Result<T> = std::result::Result<T, MenuError>;
