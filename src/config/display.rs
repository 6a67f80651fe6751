//! Display configuration structure and methods

use super::{CliArgs, EnvVars};
use crate::display::driver::DriverType;
use crate::display::scroll::{Direction, DrawMode};
use crate::display::update_loop::Effect;
use crate::font::{GapTable, UnknownGlyphPolicy};
use crate::models::glyph::Color;
use log::info;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

// Largest width or height, in pixels, the canvas may be given
pub const MAX_EXTENT: usize = 1024;

/// Configuration structure that stores all display and banner settings
#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub rows: usize,
    pub cols: usize,
    pub brightness: u8,
    pub driver_type: DriverType,

    // Banner rendering
    pub color: Color,
    pub frame_delay_secs: f32,
    pub direction: Direction,
    pub effect: Effect,
    pub draw_mode: DrawMode,
    pub repeat: u32,
    pub read_stdin: bool,
    pub unknown_glyphs: UnknownGlyphPolicy,
    pub gaps: GapTable,
    pub font_path: Option<PathBuf>,
    pub pause_secs: f32,
    pub lane: Option<i32>,
    pub messages: Vec<String>,

    // Native panel options
    pub chain_length: usize,
    pub parallel: usize,
    pub hardware_mapping: String,
    pub gpio_slowdown: Option<u32>,
    pub pwm_bits: u8,
    pub led_sequence: String,
    pub refresh_rate: usize,

    // Values that could not be parsed, reported by validate()
    problems: Vec<String>,
}

impl DisplayConfig {
    /// Create a new configuration by combining CLI arguments and environment variables
    pub fn new(cli_args: CliArgs, env_vars: EnvVars) -> Self {
        let mut problems = Vec::new();

        let driver_arg = env_vars
            .driver
            .or(cli_args.driver)
            .unwrap_or_else(|| "terminal".to_string());
        let driver_type = parse_or_report(&driver_arg, "driver", &mut problems);
        info!("Selected driver: {:?}", driver_type);

        // Apply settings from CLI args, then override with environment variables if present
        let rows = env_vars.rows.unwrap_or(cli_args.rows);
        let cols = env_vars.cols.unwrap_or(cli_args.cols);
        let brightness = env_vars.brightness.unwrap_or(cli_args.brightness);

        let color_arg = env_vars.color.unwrap_or(cli_args.color);
        let color = match parse_color(&color_arg) {
            Ok(color) => color,
            Err(e) => {
                problems.push(e);
                [255, 255, 255]
            }
        };

        let direction_arg = env_vars.direction.unwrap_or(cli_args.direction);
        let direction = parse_or_report(&direction_arg, "direction", &mut problems);
        let effect_arg = env_vars.effect.unwrap_or(cli_args.effect);
        let effect = parse_or_report(&effect_arg, "effect", &mut problems);
        let draw_mode_arg = env_vars.draw_mode.unwrap_or(cli_args.draw_mode);
        let draw_mode = parse_or_report(&draw_mode_arg, "draw mode", &mut problems);

        let unknown_glyphs = if env_vars.strict.unwrap_or(cli_args.strict) {
            UnknownGlyphPolicy::Reject
        } else {
            UnknownGlyphPolicy::Skip
        };

        let gaps = GapTable {
            letter: env_vars.letter_gap.unwrap_or(cli_args.letter_gap),
            punctuation: env_vars.punctuation_gap.unwrap_or(cli_args.punctuation_gap),
        };

        let hardware_mapping = env_vars
            .hardware_mapping
            .unwrap_or_else(|| cli_args.hardware_mapping.unwrap_or_else(|| "regular".to_string()));

        Self {
            rows,
            cols,
            brightness,
            driver_type,

            color,
            frame_delay_secs: env_vars.frame_delay.unwrap_or(cli_args.delay),
            direction,
            effect,
            draw_mode,
            repeat: env_vars.repeat.unwrap_or(cli_args.repeat),
            read_stdin: cli_args.stdin,
            unknown_glyphs,
            gaps,
            font_path: env_vars.font.or(cli_args.font).map(PathBuf::from),
            pause_secs: env_vars.pause.unwrap_or(cli_args.pause),
            lane: env_vars.lane.or(cli_args.lane),
            messages: cli_args.messages,

            chain_length: env_vars.chain_length.unwrap_or(cli_args.chain_length),
            parallel: env_vars.parallel.unwrap_or(cli_args.parallel),
            hardware_mapping,
            gpio_slowdown: env_vars.gpio_slowdown.or(cli_args.gpio_slowdown),
            pwm_bits: env_vars.pwm_bits.unwrap_or(cli_args.pwm_bits),
            led_sequence: env_vars.led_sequence.unwrap_or(cli_args.led_sequence),
            refresh_rate: env_vars.refresh_rate.unwrap_or(cli_args.refresh_rate),

            problems,
        }
    }

    /// Calculate the total display width in pixels
    pub fn display_width(&self) -> i32 {
        match self.driver_type {
            DriverType::RpiLedPanel => (self.cols * self.chain_length) as i32,
            _ => self.cols as i32,
        }
    }

    /// Calculate the total display height in pixels
    pub fn display_height(&self) -> i32 {
        match self.driver_type {
            DriverType::RpiLedPanel => (self.rows * self.parallel) as i32,
            _ => self.rows as i32,
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.frame_delay_secs).unwrap_or_default()
    }

    pub fn pause(&self) -> Duration {
        Duration::try_from_secs_f32(self.pause_secs).unwrap_or_default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = self.problems.clone();

        if self.rows == 0 {
            errors.push("Rows must be greater than 0".to_string());
        }

        if self.cols == 0 {
            errors.push("Columns must be greater than 0".to_string());
        }

        if self.rows > MAX_EXTENT {
            errors.push(format!("Rows must be at most {}", MAX_EXTENT));
        }

        if self.cols > MAX_EXTENT {
            errors.push(format!("Columns must be at most {}", MAX_EXTENT));
        }

        if self.brightness > 100 {
            errors.push("Brightness must be between 0 and 100".to_string());
        }

        if !self.frame_delay_secs.is_finite() || self.frame_delay_secs < 0.0 {
            errors.push(format!(
                "Frame delay must be a non-negative number of seconds, got {}",
                self.frame_delay_secs
            ));
        }

        if !self.pause_secs.is_finite() || self.pause_secs < 0.0 {
            errors.push(format!(
                "Pause must be a non-negative number of seconds, got {}",
                self.pause_secs
            ));
        }

        if self.messages.is_empty() && !self.read_stdin {
            errors.push("Nothing to show: pass at least one message or --stdin".to_string());
        }

        if self.driver_type == DriverType::RpiLedPanel {
            if self.chain_length == 0 {
                errors.push("Chain length must be greater than 0".to_string());
            }

            if self.parallel == 0 || self.parallel > 3 {
                errors.push("Parallel chains must be between 1 and 3".to_string());
            }

            if self.cols.saturating_mul(self.chain_length) > MAX_EXTENT {
                errors.push(format!(
                    "Chained width of {} panels x {} columns exceeds {} pixels",
                    self.chain_length, self.cols, MAX_EXTENT
                ));
            }

            if self.rows.saturating_mul(self.parallel) > MAX_EXTENT {
                errors.push(format!(
                    "Parallel height of {} chains x {} rows exceeds {} pixels",
                    self.parallel, self.rows, MAX_EXTENT
                ));
            }

            if self.pwm_bits < 1 || self.pwm_bits > 11 {
                errors.push("PWM bits must be between 1 and 11".to_string());
            }

            if let Some(slowdown) = self.gpio_slowdown {
                if slowdown > 4 {
                    errors.push("GPIO slowdown must be between 0 and 4".to_string());
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_or_report<T>(value: &str, what: &str, problems: &mut Vec<String>) -> T
where
    T: FromStr<Err = String> + Default,
{
    value.parse().unwrap_or_else(|e| {
        problems.push(format!("Invalid {} '{}': {}", what, value, e));
        T::default()
    })
}

/// Parse a color written as `r,g,b` or `#rrggbb`
pub fn parse_color(value: &str) -> Result<Color, String> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid color '{}': expected #rrggbb", value));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("Invalid color '{}': {}", value, e))
        };
        return Ok([channel(0)?, channel(2)?, channel(4)?]);
    }

    let channels: Vec<&str> = value.split(',').map(str::trim).collect();
    if channels.len() != 3 {
        return Err(format!("Invalid color '{}': expected r,g,b", value));
    }

    let mut color = [0u8; 3];
    for (slot, channel) in color.iter_mut().zip(channels) {
        *slot = channel
            .parse()
            .map_err(|_| format!("Invalid color '{}': channels must be 0-255", value))?;
    }
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn cli(args: &[&str]) -> CliArgs {
        CliArgs::from_args(&["led_banner"], args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::new(cli(&["HELLO"]), EnvVars::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.driver_type, DriverType::Terminal);
        assert_eq!((config.display_width(), config.display_height()), (16, 16));
        assert_eq!(config.color, [0, 200, 0]);
        assert_eq!(config.direction, Direction::Left);
        assert_eq!(config.effect, Effect::Scroll);
        assert_eq!(config.draw_mode, DrawMode::Opaque);
        assert_eq!(config.unknown_glyphs, UnknownGlyphPolicy::Skip);
        assert_eq!(config.gaps, GapTable::default());
        assert!((config.frame_delay().as_secs_f64() - 0.05).abs() < 1e-6);
        assert_eq!(config.messages, vec!["HELLO".to_string()]);
    }

    #[test]
    fn test_environment_overrides_cli() {
        let env = EnvVars {
            rows: Some(8),
            color: Some("#ff8000".to_string()),
            direction: Some("right".to_string()),
            strict: Some(true),
            ..EnvVars::default()
        };
        let config = DisplayConfig::new(cli(&["-r", "32", "--direction", "up", "HI"]), env);
        assert_eq!(config.rows, 8);
        assert_eq!(config.color, [255, 128, 0]);
        assert_eq!(config.direction, Direction::Right);
        assert_eq!(config.unknown_glyphs, UnknownGlyphPolicy::Reject);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let env = EnvVars {
            frame_delay: Some(-1.0),
            ..EnvVars::default()
        };
        let config = DisplayConfig::new(cli(&["--driver", "plasma", "--color", "1,2", "HI"]), env);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("driver"));
        assert!(errors[1].contains("color"));
        assert!(errors[2].contains("Frame delay"));
    }

    #[test]
    fn test_oversized_panel_is_rejected() {
        let config = DisplayConfig::new(cli(&["-c", "5000", "HI"]), EnvVars::default());
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Columns"));

        let config = DisplayConfig::new(cli(&["-r", "1024", "-c", "1024", "HI"]), EnvVars::default());
        assert!(config.validate().is_ok());

        // Each panel fits, the chain does not
        let config = DisplayConfig::new(
            cli(&["--driver", "native", "-c", "64", "-n", "4096", "HI"]),
            EnvVars::default(),
        );
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Chained width")));
    }

    #[test]
    fn test_no_messages_without_stdin() {
        let config = DisplayConfig::new(cli(&[]), EnvVars::default());
        assert!(config.validate().is_err());

        let config = DisplayConfig::new(cli(&["--stdin"]), EnvVars::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("1, 2, 3"), Ok([1, 2, 3]));
        assert_eq!(parse_color("#0A0b0C"), Ok([10, 11, 12]));
        assert!(parse_color("256,0,0").is_err());
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("red").is_err());
    }
}
