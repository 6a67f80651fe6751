//! Error types shared by the font, glyph and display layers

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A glyph whose cell count does not equal width * height
    InvalidGlyphDimensions {
        label: String,
        width: usize,
        height: usize,
        cells: usize,
    },

    /// Font data that could not be turned into a glyph table
    InvalidFont(String),

    /// A character the font table has no glyph for
    UnsupportedGlyph(char),

    /// A failure reported by the device collaborator
    Device(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidGlyphDimensions {
                label,
                width,
                height,
                cells,
            } => write!(
                f,
                "Glyph '{}' has {} cells but is declared as {}x{} ({} expected)",
                label,
                cells,
                width,
                height,
                width * height
            ),
            EngineError::InvalidFont(reason) => write!(f, "Invalid font data: {}", reason),
            EngineError::UnsupportedGlyph(c) => {
                write!(f, "No glyph available for character {:?}", c)
            }
            EngineError::Device(reason) => write!(f, "Display device error: {}", reason),
        }
    }
}

impl std::error::Error for EngineError {}
