use crate::display::canvas::CanvasAdapter;
use crate::error::EngineError;
use crate::font::BannerBuilder;
use crate::models::glyph::{Color, Glyph, BLACK};
use crate::utils::cancel::CancelToken;
use log::debug;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Offset applied to the sprite position once per frame
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err("must be 'left', 'right', 'up' or 'down'".to_string()),
        }
    }
}

/// How `scroll` draws each frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Paint lit and unlit cells; the sprite erases its own previous position
    #[default]
    Opaque,
    /// Clear the whole canvas, then paint only lit cells
    Overlay,
}

impl FromStr for DrawMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "opaque" => Ok(DrawMode::Opaque),
            "overlay" => Ok(DrawMode::Overlay),
            _ => Err("must be 'opaque' or 'overlay'".to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollState {
    Idle,
    Animating,
    Done,
    Cancelled,
}

/// Outcome of one animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollReport {
    /// Frames drawn and committed
    pub frames: u32,
    pub state: ScrollState,
}

// Rectangle a sprite covers at some offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Footprint {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Footprint {
    fn of(glyph: &Glyph, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width: glyph.width() as i32,
            height: glyph.height() as i32,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Draws sprites onto a canvas and animates them across it.
///
/// Every call blocks the calling thread until it is finished; frame delays
/// are plain sleeps. Run one engine per display and feed it from a single
/// worker if animations are requested concurrently.
#[derive(Debug)]
pub struct ScrollEngine {
    canvas: CanvasAdapter,
    mode: DrawMode,
    state: ScrollState,
}

impl ScrollEngine {
    pub fn new(canvas: CanvasAdapter, mode: DrawMode) -> Self {
        Self {
            canvas,
            mode,
            state: ScrollState::Idle,
        }
    }

    pub fn canvas(&self) -> &CanvasAdapter {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasAdapter {
        &mut self.canvas
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Paint the lit cells of `glyph` at `(x, y)`; unlit cells keep whatever
    /// is underneath. Does not commit.
    pub fn draw_sprite(&mut self, glyph: &Glyph, x: i32, y: i32) {
        for (cx, cy, on) in glyph.iter_cells() {
            if on {
                self.canvas
                    .set_pixel(x + cx as i32, y + cy as i32, glyph.color);
            }
        }
    }

    /// Paint lit cells in the glyph color and unlit cells black, then commit.
    ///
    /// Only the glyph's own rectangle is written, so sprites drawn side by
    /// side all survive.
    pub fn draw_sprite_opaque(&mut self, glyph: &Glyph, x: i32, y: i32) -> Result<(), EngineError> {
        self.composite_to_buffer(glyph, x, y);
        self.canvas.commit()
    }

    /// Opaque draw of a sprite that was last drawn at `from`.
    ///
    /// The part of the old rectangle the new one does not cover is blanked
    /// first, so a moving sprite leaves no trail for any offset change.
    pub fn move_sprite_opaque(
        &mut self,
        glyph: &Glyph,
        from: Option<(i32, i32)>,
        x: i32,
        y: i32,
    ) -> Result<(), EngineError> {
        if let Some((from_x, from_y)) = from {
            self.blank_uncovered(
                Footprint::of(glyph, from_x, from_y),
                Footprint::of(glyph, x, y),
            );
        }
        self.draw_sprite_opaque(glyph, x, y)
    }

    /// Paint black over the lit cells of `glyph` at `(x, y)`, leaving the
    /// rest of the canvas alone, then commit.
    pub fn erase(&mut self, glyph: &Glyph, x: i32, y: i32) -> Result<(), EngineError> {
        for (cx, cy, on) in glyph.iter_cells() {
            if on {
                self.canvas.set_pixel(x + cx as i32, y + cy as i32, BLACK);
            }
        }
        self.canvas.commit()
    }

    /// Same cell writes as an opaque draw, without committing, so several
    /// sprites can be assembled into one frame
    pub fn composite_to_buffer(&mut self, glyph: &Glyph, x: i32, y: i32) {
        for (cx, cy, on) in glyph.iter_cells() {
            let color = if on { glyph.color } else { BLACK };
            self.canvas.set_pixel(x + cx as i32, y + cy as i32, color);
        }
    }

    fn blank_uncovered(&mut self, previous: Footprint, next: Footprint) {
        for y in previous.y..previous.y + previous.height {
            for x in previous.x..previous.x + previous.width {
                if !next.contains(x, y) {
                    self.canvas.set_pixel(x, y, BLACK);
                }
            }
        }
    }

    /// Move `glyph` one step per frame for `frames` frames, starting at `origin`.
    ///
    /// Each frame is drawn, committed, held for `frame_delay`, then the
    /// position advances. The token is checked before every frame, so a
    /// cancelled scroll stops on a frame boundary.
    pub fn scroll(
        &mut self,
        glyph: &Glyph,
        origin: (i32, i32),
        direction: Direction,
        frames: u32,
        frame_delay: Duration,
        cancel: Option<&CancelToken>,
    ) -> Result<ScrollReport, EngineError> {
        let (dx, dy) = direction.step();
        let (mut x, mut y) = origin;

        debug!(
            "Scrolling {}x{} sprite {:?} from ({}, {}) over {} frames",
            glyph.width(),
            glyph.height(),
            direction,
            x,
            y,
            frames
        );
        self.state = ScrollState::Animating;
        let mut previous = None;

        for frame in 0..frames {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                debug!("Scroll cancelled after {} of {} frames", frame, frames);
                self.state = ScrollState::Cancelled;
                return Ok(ScrollReport {
                    frames: frame,
                    state: self.state,
                });
            }

            if let Err(e) = self.draw_frame(glyph, previous, x, y) {
                self.state = ScrollState::Idle;
                return Err(e);
            }
            previous = Some((x, y));

            if !frame_delay.is_zero() {
                std::thread::sleep(frame_delay);
            }

            x += dx;
            y += dy;
        }

        self.state = ScrollState::Done;
        Ok(ScrollReport {
            frames,
            state: self.state,
        })
    }

    fn draw_frame(
        &mut self,
        glyph: &Glyph,
        previous: Option<(i32, i32)>,
        x: i32,
        y: i32,
    ) -> Result<(), EngineError> {
        match self.mode {
            DrawMode::Opaque => self.move_sprite_opaque(glyph, previous, x, y),
            DrawMode::Overlay => {
                self.canvas.clear();
                self.draw_sprite(glyph, x, y);
                self.canvas.commit()
            }
        }
    }

    /// Scroll `glyph` from fully off one edge to past the opposite edge.
    ///
    /// `lane` is the fixed coordinate on the other axis: the row for
    /// horizontal scrolls, the column for vertical ones.
    pub fn scroll_across_screen(
        &mut self,
        glyph: &Glyph,
        lane: i32,
        direction: Direction,
        frame_delay: Duration,
        cancel: Option<&CancelToken>,
    ) -> Result<ScrollReport, EngineError> {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        let (glyph_width, glyph_height) = (glyph.width() as i32, glyph.height() as i32);

        let (origin, frames) = match direction {
            Direction::Left => ((width - 1, lane), width + glyph_width),
            Direction::Right => ((-glyph_width, lane), width + glyph_width),
            Direction::Up => ((lane, height - 1), height + glyph_height),
            Direction::Down => ((lane, -glyph_height), height + glyph_height),
        };

        self.scroll(
            glyph,
            origin,
            direction,
            frames.max(0) as u32,
            frame_delay,
            cancel,
        )
    }

    /// Build a banner for `message`, tint it and scroll it right to left
    /// through the vertical middle of the canvas
    pub fn show_scrolling_banner(
        &mut self,
        builder: &BannerBuilder,
        message: &str,
        color: Color,
        frame_delay: Duration,
        cancel: Option<&CancelToken>,
    ) -> Result<ScrollReport, EngineError> {
        let banner = builder.build(message)?.tinted(color);
        let lane = centered_lane(self.canvas.height(), banner.height());
        self.scroll_across_screen(&banner, lane, Direction::Left, frame_delay, cancel)
    }

    /// Blank the display and release the device
    pub fn shutdown(&mut self) {
        self.canvas.shutdown();
    }
}

/// Offset that centres a span of `size` cells inside `extent`
pub fn centered_lane(extent: i32, size: usize) -> i32 {
    (extent - size as i32) / 2
}
