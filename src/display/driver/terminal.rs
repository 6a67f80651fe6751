use super::LedDevice;
use crate::models::glyph::{Color, BLACK};
use colored::Colorize;
use std::io::Write;

/// Simulates the matrix in a true-color terminal, two characters per LED
#[derive(Debug)]
pub struct TerminalDevice {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    screen_cleared: bool,
}

impl TerminalDevice {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; (width.max(0) * height.max(0)) as usize],
            screen_cleared: false,
        }
    }

    fn render_frame(&self) -> String {
        let mut out = String::new();
        for row in self.pixels.chunks(self.width.max(1) as usize) {
            for &[r, g, b] in row {
                if [r, g, b] == BLACK {
                    out.push_str(&"\u{b7} ".truecolor(60, 60, 60).to_string());
                } else {
                    out.push_str(&"\u{2588}\u{2588}".truecolor(r, g, b).to_string());
                }
            }
            out.push('\n');
        }
        out
    }
}

impl LedDevice for TerminalDevice {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn write_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8) {
        if x < self.width as usize && y < self.height as usize {
            self.pixels[y * self.width as usize + x] = [r, g, b];
        }
    }

    fn show(&mut self) -> Result<(), String> {
        let frame = self.render_frame();
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        // Clear once, then redraw in place from the top-left corner
        if !self.screen_cleared {
            write!(out, "\x1b[2J").map_err(|e| format!("Failed to write to terminal: {}", e))?;
            self.screen_cleared = true;
        }
        write!(out, "\x1b[H{}", frame)
            .and_then(|_| out.flush())
            .map_err(|e| format!("Failed to write to terminal: {}", e))
    }

    fn shutdown(&mut self) {
        self.pixels.fill(BLACK);
        let _ = self.show();
    }
}
