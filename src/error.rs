//! Errors raised at the crate's edges (map files, tuning files).
//!
//! The simulation itself never fails; see `sim` for the fallbacks it uses.

use thiserror::Error;

/// Failure while loading maps or tuning data.
#[derive(Debug, Error)]
pub enum PixelPuttError {
    /// Reading a file from disk failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A tuning or palette file was not valid JSON for its type.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// An ASCII map contained a character with no terrain meaning.
    #[error("unknown map glyph {glyph:?} at line {line}, column {column}")]
    UnknownGlyph {
        glyph: char,
        line: usize,
        column: usize,
    },
    /// Rows of an ASCII map differ in width.
    #[error("map row {line} is {found} wide, expected {expected}")]
    RaggedMap {
        line: usize,
        found: usize,
        expected: usize,
    },
    /// A colour-index buffer does not match the declared dimensions.
    #[error("mask buffer holds {found} pixels, expected {width}x{height}")]
    MaskSize {
        width: u32,
        height: u32,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, PixelPuttError>;
