use crate::display::canvas::CanvasAdapter;
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Size,
    pixelcolor::{Rgb888, RgbColor},
    prelude::OriginDimensions,
    Pixel,
};

/// Lets embedded-graphics primitives draw into the canvas frame buffer.
///
/// Points are logical canvas coordinates, so mirroring and clipping behave
/// exactly as they do for sprites. Nothing is shown until the canvas is
/// committed.
pub struct EmbeddedGraphicsCanvas<'a> {
    canvas: &'a mut CanvasAdapter,
}

impl<'a> EmbeddedGraphicsCanvas<'a> {
    pub fn new(canvas: &'a mut CanvasAdapter) -> Self {
        Self { canvas }
    }

    pub fn inner_mut(&mut self) -> &mut CanvasAdapter {
        self.canvas
    }
}

impl DrawTarget for EmbeddedGraphicsCanvas<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels.into_iter() {
            self.canvas
                .set_pixel(point.x, point.y, [color.r(), color.g(), color.b()]);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.canvas.fill([color.r(), color.g(), color.b()]);
        Ok(())
    }
}

impl OriginDimensions for EmbeddedGraphicsCanvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as u32, self.canvas.height() as u32)
    }
}
