use crate::config::DisplayConfig;
use std::fmt::Debug;
use std::str::FromStr;

mod memory;
#[cfg(feature = "native")]
mod options;
#[cfg(feature = "native")]
mod rpi_led_panel_driver;
mod terminal;

pub use memory::{FrameLog, MemoryDevice};
#[cfg(feature = "native")]
pub use rpi_led_panel_driver::RpiLedPanelDriver;
pub use terminal::TerminalDevice;

/// The device collaborator behind the canvas.
///
/// Coordinates are physical: any mirroring has already been applied by the
/// caller. Pixel writes are buffered by the device until `show`.
pub trait LedDevice: Debug + Send {
    fn size(&self) -> (i32, i32); // (width, height)
    fn write_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8);
    fn show(&mut self) -> Result<(), String>;
    fn shutdown(&mut self);
}

// Enumeration of supported drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverType {
    #[default]
    Terminal, // True-color terminal simulator
    Headless,    // In-memory frames only
    RpiLedPanel, // Native Rust panel driver
}

impl FromStr for DriverType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "terminal" => Ok(DriverType::Terminal),
            "headless" | "memory" => Ok(DriverType::Headless),
            "native" => Ok(DriverType::RpiLedPanel),
            _ => Err("must be 'terminal', 'headless' or 'native'".to_string()),
        }
    }
}

// Factory function to create the appropriate driver
pub fn create_driver(config: &DisplayConfig) -> Result<Box<dyn LedDevice>, String> {
    let width = config.display_width();
    let height = config.display_height();

    match config.driver_type {
        DriverType::Terminal => {
            log::debug!("Creating terminal driver ({}x{})", width, height);
            Ok(Box::new(TerminalDevice::new(width, height)))
        }
        DriverType::Headless => {
            log::debug!("Creating headless driver ({}x{})", width, height);
            Ok(Box::new(MemoryDevice::new(width, height)))
        }
        DriverType::RpiLedPanel => create_native_driver(config),
    }
}

#[cfg(feature = "native")]
fn create_native_driver(config: &DisplayConfig) -> Result<Box<dyn LedDevice>, String> {
    log::debug!("Creating rpi-led-panel driver");
    Ok(Box::new(RpiLedPanelDriver::initialize(config)?))
}

#[cfg(not(feature = "native"))]
fn create_native_driver(_config: &DisplayConfig) -> Result<Box<dyn LedDevice>, String> {
    Err("The native driver is not available: rebuild with `--features native`".to_string())
}
