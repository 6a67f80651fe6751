use crate::config::DisplayConfig;

// Panel options shared by the native driver
#[derive(Debug, Clone)]
pub struct MatrixOptions {
    // Basic display options
    pub rows: usize,
    pub cols: usize,
    pub chain_length: usize,
    pub parallel: usize,
    pub brightness: u8,

    // Additional options
    pub hardware_mapping: String,
    pub pwm_bits: u8,
    pub gpio_slowdown: Option<u32>,
    pub led_sequence: String,
    pub refresh_rate: usize,
}

impl MatrixOptions {
    // Create from DisplayConfig
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            chain_length: config.chain_length,
            parallel: config.parallel,
            // Brightness is applied by the canvas, the panel runs at full power
            brightness: 100,
            hardware_mapping: config.hardware_mapping.clone(),
            pwm_bits: config.pwm_bits,
            gpio_slowdown: config.gpio_slowdown,
            led_sequence: config.led_sequence.clone(),
            refresh_rate: config.refresh_rate,
        }
    }
}
