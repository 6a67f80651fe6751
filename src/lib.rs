//! Sprite and text-scrolling engine for small RGB LED matrices.
//!
//! Banners are built from a bitmap font into [`models::glyph::Glyph`]s and
//! animated by a [`display::scroll::ScrollEngine`] over a mirrored
//! [`display::canvas::CanvasAdapter`]. The `led_banner` binary is a thin
//! command-line front end over these modules.

pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod models;
pub mod utils;
