use super::LedDevice;
use crate::models::glyph::{Color, BLACK};
use std::sync::{Arc, Mutex};

/// Every frame passed to `show`, in physical row-major order
#[derive(Clone, Debug, Default)]
pub struct FrameLog {
    frames: Arc<Mutex<Vec<Vec<Color>>>>,
}

impl FrameLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, frame: Vec<Color>) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(frame);
        }
    }

    pub fn frames(&self) -> Vec<Vec<Color>> {
        self.frames
            .lock()
            .map(|frames| frames.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().map(|frames| frames.len()).unwrap_or(0)
    }

    pub fn last(&self) -> Option<Vec<Color>> {
        self.frames.lock().ok().and_then(|frames| frames.last().cloned())
    }
}

/// A device that keeps its pixels in memory.
///
/// Used as the headless driver, and with a [`FrameLog`] attached as a
/// recording stand-in for real hardware.
#[derive(Debug)]
pub struct MemoryDevice {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    shown: u64,
    log: Option<FrameLog>,
}

impl MemoryDevice {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; (width.max(0) * height.max(0)) as usize],
            shown: 0,
            log: None,
        }
    }

    /// A device that records every shown frame into `log`
    pub fn recording(width: i32, height: i32, log: FrameLog) -> Self {
        Self {
            log: Some(log),
            ..Self::new(width, height)
        }
    }
}

impl LedDevice for MemoryDevice {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn write_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8) {
        if x < self.width as usize && y < self.height as usize {
            self.pixels[y * self.width as usize + x] = [r, g, b];
        }
    }

    fn show(&mut self) -> Result<(), String> {
        self.shown += 1;
        if let Some(log) = &self.log {
            log.push(self.pixels.clone());
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.pixels.fill(BLACK);
        log::debug!("Headless device shut down after {} frames", self.shown);
    }
}
