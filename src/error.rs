use thiserror::Error;

use crate::glyph::GlyphId;

/// Unified error type for morphclock
#[derive(Error, Debug)]
pub enum MorphError {
    #[error("Invalid digit: {0} (expected 0-9)")]
    InvalidDigit(i64),

    #[error("Unknown glyph: {0}")]
    UnknownGlyph(GlyphId),

    #[error("Invalid scale: {0} (must be positive and finite)")]
    InvalidScale(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Saved state error: {0}")]
    State(#[from] serde_json::Error),
}

pub type MorphResult<T> = Result<T, MorphError>;
