//! Command-line argument parsing

/// Command-line arguments for the LED banner scroller
#[derive(argh::FromArgs, Debug, Clone)]
/// LED Banner Scroller
///
/// Scrolls text banners across a small RGB LED matrix.
pub struct CliArgs {
    #[argh(positional)]
    /// messages to show, one banner each
    pub messages: Vec<String>,

    #[argh(option, short = 'd')]
    /// display driver: "terminal", "headless" or "native".
    /// Default: "terminal"
    ///
    /// terminal: draws frames in the terminal using true-color blocks
    /// headless: keeps frames in memory only
    /// native: Pure Rust panel library (https://github.com/EmbersArc/rpi_led_panel),
    /// requires building with the "native" feature
    pub driver: Option<String>,

    #[argh(option, short = 'r', default = "16")]
    /// number of rows. Default: 16
    pub rows: usize,

    #[argh(option, short = 'c', default = "16")]
    /// number of columns. Default: 16
    pub cols: usize,

    #[argh(option, short = 'b', default = "100")]
    /// brightness in percent (0-100). Default: 100
    pub brightness: u8,

    #[argh(option, default = "String::from(\"0,200,0\")")]
    /// banner color as "r,g,b" or "#rrggbb". Default: "0,200,0"
    pub color: String,

    #[argh(option, default = "0.05")]
    /// delay between animation frames in seconds. Default: 0.05
    pub delay: f32,

    #[argh(option, default = "String::from(\"left\")")]
    /// scroll direction: "left", "right", "up" or "down". Default: "left"
    pub direction: String,

    #[argh(option, default = "String::from(\"scroll\")")]
    /// banner effect: "scroll" across the screen or "drop" in from the top.
    /// Default: "scroll"
    pub effect: String,

    #[argh(option, default = "String::from(\"opaque\")")]
    /// how scroll frames are drawn: "opaque" (self-erasing) or "overlay"
    /// (clear, then draw lit cells). Default: "opaque"
    pub draw_mode: String,

    #[argh(option, default = "1")]
    /// how many times to show the messages (0 = forever). Default: 1
    pub repeat: u32,

    #[argh(switch)]
    /// also read messages from standard input, one per line
    pub stdin: bool,

    #[argh(switch)]
    /// refuse messages containing characters the font cannot draw
    /// instead of skipping them
    pub strict: bool,

    #[argh(option, default = "1")]
    /// blank columns before letters and digits. Default: 1
    pub letter_gap: usize,

    #[argh(option, default = "0")]
    /// blank columns before punctuation. Default: 0
    pub punctuation_gap: usize,

    #[argh(option)]
    /// path to a JSON font file. Default: built-in font
    pub font: Option<String>,

    #[argh(option, default = "2.0")]
    /// seconds the "drop" effect holds the banner still. Default: 2
    pub pause: f32,

    #[argh(option)]
    /// cross-axis position of the banner (row for horizontal scrolling,
    /// column for vertical). Default: centered
    pub lane: Option<i32>,

    #[argh(option, short = 'n', default = "1")]
    /// number of daisy-chained panels. Default: 1 [native]
    pub chain_length: usize,

    #[argh(option, short = 'p', default = "1")]
    /// how many chains to run in parallel (1-3). Default: 1 [native]
    pub parallel: usize,

    #[argh(option)]
    /// the display wiring e.g. "regular", "adafruit-hat", or "adafruit-hat-pwm".
    /// Default: "regular" [native]
    pub hardware_mapping: Option<String>,

    #[argh(option)]
    /// GPIO slowdown factor (0-4). Default: automatic based on Pi model [native]
    pub gpio_slowdown: Option<u32>,

    #[argh(option, default = "11")]
    /// PWM bits for color depth control (1-11). Default: 11 [native]
    pub pwm_bits: u8,

    #[argh(option, default = "String::from(\"RGB\")")]
    /// the LED color sequence, Default: "RGB" [native]
    pub led_sequence: String,

    #[argh(option, default = "120")]
    /// the display refresh rate. Default: 120 [native]
    pub refresh_rate: usize,
}

impl CliArgs {
    /// Parse CLI arguments
    pub fn parse() -> Self {
        // Use argh to parse args from environment
        argh::from_env()
    }
}
