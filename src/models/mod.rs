pub mod actor;
pub mod glyph;
