mod embedded_graphics_support;

pub use embedded_graphics_support::EmbeddedGraphicsCanvas;
