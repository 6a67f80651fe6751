//! Environment variable handling

use std::str::FromStr;

/// Environment variables overriding the command line
#[derive(Debug, Default, Clone)]
pub struct EnvVars {
    pub driver: Option<String>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub brightness: Option<u8>,
    pub color: Option<String>,
    pub frame_delay: Option<f32>,
    pub direction: Option<String>,
    pub effect: Option<String>,
    pub draw_mode: Option<String>,
    pub repeat: Option<u32>,
    pub strict: Option<bool>,
    pub letter_gap: Option<usize>,
    pub punctuation_gap: Option<usize>,
    pub font: Option<String>,
    pub pause: Option<f32>,
    pub lane: Option<i32>,
    pub chain_length: Option<usize>,
    pub parallel: Option<usize>,
    pub hardware_mapping: Option<String>,
    pub gpio_slowdown: Option<u32>,
    pub pwm_bits: Option<u8>,
    pub led_sequence: Option<String>,
    pub refresh_rate: Option<usize>,
}

/// Load configuration from the process environment
pub fn load_env_vars() -> EnvVars {
    load_from(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary lookup, so tests need not touch
/// the real environment
pub fn load_from<F>(lookup: F) -> EnvVars
where
    F: Fn(&str) -> Option<String>,
{
    EnvVars {
        driver: lookup("LED_DRIVER"),
        rows: parsed(&lookup, "LED_ROWS"),
        cols: parsed(&lookup, "LED_COLS"),
        brightness: lookup("LED_BRIGHTNESS")
            .and_then(|value| value.trim().parse::<u8>().ok())
            .map(|brightness| brightness.min(100)),
        color: lookup("LED_COLOR"),
        frame_delay: parsed(&lookup, "LED_FRAME_DELAY"),
        direction: lookup("LED_DIRECTION"),
        effect: lookup("LED_EFFECT"),
        draw_mode: lookup("LED_DRAW_MODE"),
        repeat: parsed(&lookup, "LED_REPEAT"),
        strict: lookup("LED_STRICT").and_then(|value| parse_flag(&value)),
        letter_gap: parsed(&lookup, "LED_LETTER_GAP"),
        punctuation_gap: parsed(&lookup, "LED_PUNCTUATION_GAP"),
        font: lookup("LED_FONT"),
        pause: parsed(&lookup, "LED_PAUSE"),
        lane: parsed(&lookup, "LED_LANE"),
        chain_length: parsed(&lookup, "LED_CHAIN_LENGTH"),
        parallel: parsed(&lookup, "LED_PARALLEL"),
        hardware_mapping: lookup("LED_HARDWARE_MAPPING"),
        gpio_slowdown: parsed(&lookup, "LED_GPIO_SLOWDOWN"),
        pwm_bits: parsed(&lookup, "LED_PWM_BITS"),
        led_sequence: lookup("LED_SEQUENCE"),
        refresh_rate: parsed(&lookup, "LED_REFRESH_RATE"),
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|value| value.trim().parse().ok())
}

// Accept "true"/"false" as well as numeric 0/1
fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if let Ok(enabled) = value.parse::<bool>() {
        Some(enabled)
    } else if let Ok(enabled) = value.parse::<u8>() {
        Some(enabled != 0)
    } else {
        None
    }
}
