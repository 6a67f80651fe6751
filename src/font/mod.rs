//! Bitmap font table: character -> canonical glyph
//!
//! The reference font is compiled in from `assets/font.json` and parsed once
//! per process. Alternative fonts can be loaded from a file with the same
//! schema.

mod banner;

pub use banner::{BannerBuilder, GapTable, UnknownGlyphPolicy};

use crate::error::EngineError;
use crate::models::glyph::{Color, Glyph};
use log::debug;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const BUILTIN_FONT: &str = include_str!("../../assets/font.json");

static BUILTIN: Lazy<Result<Arc<FontTable>, EngineError>> =
    Lazy::new(|| FontTable::from_json(BUILTIN_FONT).map(Arc::new));

/// How a glyph takes part in banner layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphClass {
    /// Fixed width, never trimmed so numbers line up
    Digit,
    /// Trimmed to its natural width before use
    Letter,
    /// Fixed width, joined without a gap by default
    Punctuation,
}

#[derive(Clone, Debug)]
pub struct FontGlyph {
    pub class: GlyphClass,
    pub glyph: Glyph,
}

#[derive(Clone, Debug)]
pub struct FontTable {
    height: usize,
    glyphs: HashMap<char, FontGlyph>,
}

// On-disk layout of a font file
#[derive(Deserialize)]
struct FontFile {
    height: usize,
    #[serde(default)]
    colors: ClassColors,
    glyphs: Vec<GlyphEntry>,
}

#[derive(Deserialize)]
struct ClassColors {
    digit: Color,
    letter: Color,
    punctuation: Color,
}

impl Default for ClassColors {
    fn default() -> Self {
        Self {
            digit: [100, 0, 0],
            letter: [100, 100, 100],
            punctuation: [100, 100, 100],
        }
    }
}

#[derive(Deserialize)]
struct GlyphEntry {
    #[serde(rename = "char")]
    character: char,
    class: GlyphClass,
    width: usize,
    height: usize,
    rows: Vec<String>,
}

impl FontTable {
    /// The compiled-in reference font, shared for the life of the process
    pub fn builtin() -> Result<Arc<FontTable>, EngineError> {
        BUILTIN.clone()
    }

    /// Load a font file with the same schema as the built-in font
    pub fn from_file(path: &Path) -> Result<FontTable, EngineError> {
        debug!("Loading font from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EngineError::InvalidFont(format!("could not read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate font data
    pub fn from_json(json: &str) -> Result<FontTable, EngineError> {
        let file: FontFile =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidFont(e.to_string()))?;

        let mut glyphs = HashMap::with_capacity(file.glyphs.len());
        for entry in file.glyphs {
            let label = entry.character.to_string();

            if entry.height != file.height {
                return Err(EngineError::InvalidFont(format!(
                    "glyph '{}' is {} rows tall but the font height is {}",
                    label, entry.height, file.height
                )));
            }

            let mut cells = Vec::with_capacity(entry.width * entry.height);
            for c in entry.rows.iter().flat_map(|row| row.chars()) {
                match c {
                    '0' => cells.push(false),
                    '1' => cells.push(true),
                    other => {
                        return Err(EngineError::InvalidFont(format!(
                            "glyph '{}' contains {:?}; rows may only hold '0' and '1'",
                            label, other
                        )))
                    }
                }
            }

            let color = match entry.class {
                GlyphClass::Digit => file.colors.digit,
                GlyphClass::Letter => file.colors.letter,
                GlyphClass::Punctuation => file.colors.punctuation,
            };
            let glyph = Glyph::new(&label, entry.width, entry.height, color, cells)?;

            let previous = glyphs.insert(
                entry.character,
                FontGlyph {
                    class: entry.class,
                    glyph,
                },
            );
            if previous.is_some() {
                return Err(EngineError::InvalidFont(format!(
                    "glyph '{}' is defined more than once",
                    label
                )));
            }
        }

        debug!("Font table ready with {} glyphs", glyphs.len());
        Ok(FontTable {
            height: file.height,
            glyphs,
        })
    }

    /// Height shared by every glyph in the table
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, c: char) -> Option<&FontGlyph> {
        self.glyphs.get(&c)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_font_loads() {
        let font = FontTable::builtin().unwrap();
        assert_eq!(font.height(), 5);
        // 10 digits, 26 letters, 6 punctuation marks
        assert_eq!(font.len(), 42);
    }

    #[test]
    fn test_builtin_classes_and_sizes() {
        let font = FontTable::builtin().unwrap();

        for c in '0'..='9' {
            let entry = font.get(c).unwrap();
            assert_eq!(entry.class, GlyphClass::Digit);
            assert_eq!((entry.glyph.width(), entry.glyph.height()), (3, 5));
        }
        for c in 'A'..='Z' {
            let entry = font.get(c).unwrap();
            assert_eq!(entry.class, GlyphClass::Letter);
            assert_eq!((entry.glyph.width(), entry.glyph.height()), (5, 5));
        }
        for c in [' ', '!', '.', ':', '#', '?'] {
            assert_eq!(font.get(c).unwrap().class, GlyphClass::Punctuation);
        }
        assert!(font.get('a').is_none());
    }

    #[test]
    fn test_cell_count_mismatch_is_rejected() {
        let json = r#"{
            "height": 2,
            "glyphs": [{"char": "X", "class": "letter", "width": 2, "height": 2, "rows": ["10", "1"]}]
        }"#;
        let err = FontTable::from_json(json).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidGlyphDimensions {
                label: "X".to_string(),
                width: 2,
                height: 2,
                cells: 3,
            }
        );
    }

    #[test]
    fn test_bad_cell_character_is_rejected() {
        let json = r#"{
            "height": 1,
            "glyphs": [{"char": "X", "class": "letter", "width": 2, "height": 1, "rows": ["1#"]}]
        }"#;
        assert!(matches!(
            FontTable::from_json(json),
            Err(EngineError::InvalidFont(_))
        ));
    }

    #[test]
    fn test_mixed_heights_are_rejected() {
        let json = r#"{
            "height": 2,
            "glyphs": [{"char": "X", "class": "digit", "width": 1, "height": 1, "rows": ["1"]}]
        }"#;
        assert!(matches!(
            FontTable::from_json(json),
            Err(EngineError::InvalidFont(_))
        ));
    }

    #[test]
    fn test_duplicate_glyphs_are_rejected() {
        let json = r#"{
            "height": 1,
            "glyphs": [
                {"char": "X", "class": "digit", "width": 1, "height": 1, "rows": ["1"]},
                {"char": "X", "class": "digit", "width": 1, "height": 1, "rows": ["0"]}
            ]
        }"#;
        assert!(matches!(
            FontTable::from_json(json),
            Err(EngineError::InvalidFont(_))
        ));
    }

    #[test]
    fn test_class_colors_default_when_missing() {
        let json = r#"{
            "height": 1,
            "glyphs": [{"char": "1", "class": "digit", "width": 1, "height": 1, "rows": ["1"]}]
        }"#;
        let font = FontTable::from_json(json).unwrap();
        assert_eq!(font.get('1').unwrap().glyph.color, [100, 0, 0]);
    }
}
