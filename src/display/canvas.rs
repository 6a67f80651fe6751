use crate::display::driver::LedDevice;
use crate::error::EngineError;
use crate::models::glyph::{Color, BLACK};
use log::debug;

/// Logical pixel surface in front of the device.
///
/// Writes land in a frame buffer and reach the device only on [`commit`].
/// The panel is wired mirrored, so logical column `x` is physical column
/// `width - 1 - x`; this is the only place that transform is applied.
/// Coordinates outside the canvas are ignored.
///
/// The adapter assumes a single writer. Sharing one between threads while a
/// scroll is running gives torn frames; callers must serialise access.
///
/// [`commit`]: CanvasAdapter::commit
#[derive(Debug)]
pub struct CanvasAdapter {
    device: Box<dyn LedDevice>,
    width: i32,
    height: i32,
    brightness: u8,
    // Indexed by physical position
    cells: Vec<Color>,
}

impl CanvasAdapter {
    pub fn new(device: Box<dyn LedDevice>, brightness: u8) -> Self {
        let (width, height) = device.size();
        let (width, height) = (width.max(0), height.max(0));
        debug!("Canvas ready: {}x{} at {}% brightness", width, height, brightness);

        Self {
            device,
            width,
            height,
            brightness: brightness.min(100),
            cells: vec![BLACK; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Takes effect on the next commit
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness.min(100);
    }

    // Mirror transform plus bounds check
    fn physical_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let physical_x = self.width - 1 - x;
        Some((y * self.width + physical_x) as usize)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.physical_index(x, y) {
            self.cells[i] = color;
        }
    }

    /// Current frame-buffer color at a logical position
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.physical_index(x, y).map(|i| self.cells[i])
    }

    pub fn fill(&mut self, color: Color) {
        self.cells.fill(color);
    }

    /// Blank the frame buffer without committing
    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Push the whole frame buffer to the device and show it
    pub fn commit(&mut self) -> Result<(), EngineError> {
        let width = self.width as usize;
        for (i, &color) in self.cells.iter().enumerate() {
            let [r, g, b] = apply_brightness(color, self.brightness);
            self.device.write_pixel(i % width, i / width, r, g, b);
        }
        self.device.show().map_err(EngineError::Device)
    }

    /// Blank the panel and release the device
    pub fn shutdown(&mut self) {
        self.clear();
        if let Err(e) = self.commit() {
            debug!("Could not blank display during shutdown: {}", e);
        }
        self.device.shutdown();
    }
}

/// Scale a color by a 0-100 brightness percentage
pub fn apply_brightness(color: Color, brightness: u8) -> Color {
    let brightness_scale = brightness as f32 / 100.0;
    [
        (color[0] as f32 * brightness_scale) as u8,
        (color[1] as f32 * brightness_scale) as u8,
        (color[2] as f32 * brightness_scale) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::driver::{FrameLog, MemoryDevice};

    const RED: Color = [255, 0, 0];

    fn canvas(width: i32, height: i32) -> (CanvasAdapter, FrameLog) {
        let log = FrameLog::new();
        let device = MemoryDevice::recording(width, height, log.clone());
        (CanvasAdapter::new(Box::new(device), 100), log)
    }

    #[test]
    fn test_logical_column_is_mirrored_on_commit() {
        let (mut canvas, log) = canvas(16, 16);
        canvas.set_pixel(3, 2, RED);
        canvas.commit().unwrap();

        let frame = log.last().unwrap();
        assert_eq!(frame[2 * 16 + 12], RED);
        let lit: Vec<usize> = (0..frame.len()).filter(|&i| frame[i] != BLACK).collect();
        assert_eq!(lit, vec![2 * 16 + 12]);
    }

    #[test]
    fn test_every_column_maps_to_its_mirror() {
        let (mut canvas, log) = canvas(5, 1);
        for x in 0..5 {
            canvas.set_pixel(x, 0, [x as u8 + 1, 0, 0]);
        }
        canvas.commit().unwrap();

        let frame = log.last().unwrap();
        for x in 0..5usize {
            assert_eq!(frame[4 - x], [x as u8 + 1, 0, 0]);
        }
    }

    #[test]
    fn test_get_pixel_reads_back_logical_position() {
        let (mut canvas, _) = canvas(16, 16);
        canvas.set_pixel(0, 15, RED);
        assert_eq!(canvas.get_pixel(0, 15), Some(RED));
        assert_eq!(canvas.get_pixel(15, 15), Some(BLACK));
        assert_eq!(canvas.get_pixel(16, 0), None);
        assert_eq!(canvas.get_pixel(-1, 0), None);
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let (mut canvas, log) = canvas(4, 4);
        canvas.fill([1, 1, 1]);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX), (100, 100)] {
            canvas.set_pixel(x, y, RED);
        }
        canvas.commit().unwrap();

        assert!(log.last().unwrap().iter().all(|&c| c == [1, 1, 1]));
    }

    #[test]
    fn test_writes_are_batched_until_commit() {
        let (mut canvas, log) = canvas(4, 4);
        canvas.set_pixel(1, 1, RED);
        canvas.set_pixel(2, 2, RED);
        assert_eq!(log.len(), 0);

        canvas.commit().unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_clear_does_not_commit() {
        let (mut canvas, log) = canvas(2, 2);
        canvas.fill(RED);
        canvas.commit().unwrap();
        canvas.clear();

        assert_eq!(log.len(), 1);
        assert_eq!(canvas.get_pixel(0, 0), Some(BLACK));
        assert!(log.last().unwrap().iter().all(|&c| c == RED));
    }

    #[test]
    fn test_brightness_scales_committed_colors() {
        let (mut canvas, log) = canvas(1, 1);
        canvas.set_brightness(50);
        canvas.set_pixel(0, 0, [200, 100, 0]);
        canvas.commit().unwrap();

        assert_eq!(log.last().unwrap()[0], [100, 50, 0]);
        // The frame buffer keeps the unscaled color
        assert_eq!(canvas.get_pixel(0, 0), Some([200, 100, 0]));
    }

    #[test]
    fn test_shutdown_blanks_the_panel() {
        let (mut canvas, log) = canvas(2, 2);
        canvas.fill(RED);
        canvas.commit().unwrap();
        canvas.shutdown();

        assert!(log.last().unwrap().iter().all(|&c| c == BLACK));
    }
}
