use log::{debug, warn};
use rpi_led_panel::{Canvas, HardwareMapping, LedSequence, RGBMatrix, RGBMatrixConfig};
use std::fmt::Debug;

use super::options::MatrixOptions;
use super::LedDevice;
use crate::config::DisplayConfig;

// Driver implementation for rpi-led-panel
pub struct RpiLedPanelDriver {
    matrix: RGBMatrix,
    canvas: Option<Box<Canvas>>,
    width: i32,
    height: i32,
}

// Manual Debug impl since RGBMatrix doesn't implement Debug
impl Debug for RpiLedPanelDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpiLedPanelDriver")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_canvas", &self.canvas.is_some())
            .finish()
    }
}

// Explicitly implement Send for thread safety
unsafe impl Send for RpiLedPanelDriver {}

impl RpiLedPanelDriver {
    pub fn initialize(config: &DisplayConfig) -> Result<Self, String> {
        let options = MatrixOptions::from_config(config);
        let matrix_config = Self::create_matrix_config(&options);

        debug!("Initializing rpi-led-panel with options: {:?}", options);

        match RGBMatrix::new(matrix_config, 0) {
            Ok((matrix, canvas)) => Ok(Self {
                matrix,
                canvas: Some(canvas),
                width: (options.cols * options.chain_length) as i32,
                height: (options.rows * options.parallel) as i32,
            }),
            Err(e) => Err(format!("Failed to initialize rpi-led-panel: {}", e)),
        }
    }

    // Helper method to create native driver config
    fn create_matrix_config(options: &MatrixOptions) -> RGBMatrixConfig {
        let mut config = RGBMatrixConfig::default();

        config.rows = options.rows;
        config.cols = options.cols;
        config.chain_length = options.chain_length;
        config.parallel = options.parallel;
        config.led_brightness = options.brightness;
        config.refresh_rate = options.refresh_rate;
        config.pwm_bits = options.pwm_bits as usize;
        config.slowdown = options.gpio_slowdown;

        config.hardware_mapping = match options.hardware_mapping.to_lowercase().as_str() {
            "regular" => HardwareMapping::regular(),
            "adafruit-hat" | "adafruithat" => HardwareMapping::adafruit_hat(),
            "adafruit-hat-pwm" | "adafruithatpwm" => HardwareMapping::adafruit_hat_pwm(),
            "regular-pi1" => HardwareMapping::regular_pi1(),
            "classic" => HardwareMapping::classic(),
            "classic-pi1" => HardwareMapping::classic_pi1(),
            mapping => {
                warn!("Unsupported hardware mapping '{}', defaulting to 'regular'", mapping);
                HardwareMapping::regular()
            }
        };

        config.led_sequence = match options.led_sequence.to_uppercase().as_str() {
            "RGB" => LedSequence::Rgb,
            "RBG" => LedSequence::Rbg,
            "GRB" => LedSequence::Grb,
            "GBR" => LedSequence::Gbr,
            "BRG" => LedSequence::Brg,
            "BGR" => LedSequence::Bgr,
            seq => {
                warn!("Unsupported LED sequence '{}', defaulting to 'RGB'", seq);
                LedSequence::Rgb
            }
        };

        config
    }
}

impl LedDevice for RpiLedPanelDriver {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn write_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8) {
        if let Some(canvas) = &mut self.canvas {
            canvas.set_pixel(x, y, r, g, b);
        }
    }

    fn show(&mut self) -> Result<(), String> {
        let canvas = self
            .canvas
            .take()
            .ok_or_else(|| "Panel canvas was lost during a previous update".to_string())?;

        // Swap buffers on the next vsync and keep the returned back buffer
        self.canvas = Some(self.matrix.update_on_vsync(canvas));
        Ok(())
    }

    fn shutdown(&mut self) {
        // Push one black frame before releasing the panel
        if let Some(mut canvas) = self.canvas.take() {
            canvas.fill(0, 0, 0);
            let _ = self.matrix.update_on_vsync(canvas);
        }
    }
}
