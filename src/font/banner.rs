use super::{FontTable, GlyphClass};
use crate::error::EngineError;
use crate::models::glyph::{Glyph, BLACK};
use log::warn;
use std::sync::Arc;

/// Blank columns inserted before a glyph, chosen by the glyph's class
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GapTable {
    /// Gap before letters and digits
    pub letter: usize,
    /// Gap before punctuation marks, including the space glyph
    pub punctuation: usize,
}

impl Default for GapTable {
    fn default() -> Self {
        Self {
            letter: 1,
            punctuation: 0,
        }
    }
}

impl GapTable {
    fn gap_for(&self, class: GlyphClass) -> usize {
        match class {
            GlyphClass::Digit | GlyphClass::Letter => self.letter,
            GlyphClass::Punctuation => self.punctuation,
        }
    }
}

/// What to do with a character the font cannot draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UnknownGlyphPolicy {
    /// Leave the character out and log a warning
    #[default]
    Skip,
    /// Fail the whole banner with `UnsupportedGlyph`
    Reject,
}

/// Turns text into a single composite glyph using a font table
#[derive(Clone, Debug)]
pub struct BannerBuilder {
    font: Arc<FontTable>,
    gaps: GapTable,
    policy: UnknownGlyphPolicy,
}

impl BannerBuilder {
    pub fn new(font: Arc<FontTable>, gaps: GapTable, policy: UnknownGlyphPolicy) -> Self {
        Self { font, gaps, policy }
    }

    /// Build the banner glyph for `message`.
    ///
    /// The message is upper-cased first. Letters are trimmed to their natural
    /// width, digits and punctuation keep their cell width. No gap is put in
    /// front of the first glyph. The result keeps the font's placeholder color;
    /// callers tint it before drawing.
    pub fn build(&self, message: &str) -> Result<Glyph, EngineError> {
        let mut banner = Glyph::empty(self.font.height(), BLACK);

        for c in message.chars().map(|c| c.to_ascii_uppercase()) {
            let entry = match self.font.get(c) {
                Some(entry) => entry,
                None => match self.policy {
                    UnknownGlyphPolicy::Reject => return Err(EngineError::UnsupportedGlyph(c)),
                    UnknownGlyphPolicy::Skip => {
                        warn!("Skipping unsupported character {:?} in banner", c);
                        continue;
                    }
                },
            };

            let gap = if banner.width() == 0 {
                0
            } else {
                self.gaps.gap_for(entry.class)
            };

            banner = match entry.class {
                GlyphClass::Letter => banner.join(&entry.glyph.trimmed(), gap),
                GlyphClass::Digit | GlyphClass::Punctuation => banner.join(&entry.glyph, gap),
            };
        }

        Ok(banner)
    }
}
