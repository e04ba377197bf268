//! Error types for startup and settings
//!
//! Steady-state animation never fails; these only cover the one-time
//! canvas acquisition and settings parsing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No browser window available")]
    NoWindow,

    #[error("No document available")]
    NoDocument,

    #[error("Canvas element not found: #{0}")]
    CanvasNotFound(String),

    #[error("Element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("2D rendering context unavailable")]
    ContextUnavailable,

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("Invalid setting: {field} must be positive, got {value}")]
    InvalidSetting { field: &'static str, value: f64 },

    #[error("Invalid setting: {field} must be at most {max}, got {value}")]
    SettingTooLarge {
        field: &'static str,
        max: usize,
        value: usize,
    },

    #[error("Invalid setting: {field} must be finite, got {value}")]
    NonFiniteSetting { field: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
