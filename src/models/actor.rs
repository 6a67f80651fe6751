use crate::display::scroll::{Direction, ScrollEngine, ScrollReport, ScrollState};
use crate::error::EngineError;
use crate::models::glyph::Glyph;
use crate::utils::cancel::CancelToken;
use log::debug;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Paused,
    Leaving,
    Exited,
}

/// Everything a banner actor needs to know up front
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorConfig {
    pub start: (i32, i32),
    pub direction: Direction,
    /// Where to hold still; `None` moves straight through
    pub pause_at: Option<(i32, i32)>,
    pub pause: Duration,
    /// Position at which the actor is done
    pub end: (i32, i32),
    pub step_delay: Duration,
}

impl ActorConfig {
    /// Drop a sprite in from above a `width` x `height` canvas, centred
    /// horizontally, hold it at row `lane`, then let it fall out the bottom
    pub fn drop_in(
        glyph: &Glyph,
        width: i32,
        height: i32,
        lane: i32,
        pause: Duration,
        step_delay: Duration,
    ) -> Self {
        let x = (width - glyph.width() as i32) / 2;
        Self {
            start: (x, -(glyph.height() as i32)),
            direction: Direction::Down,
            pause_at: Some((x, lane)),
            pause,
            end: (x, height),
            step_delay,
        }
    }
}

/// A banner sprite with its own motion state.
///
/// The actor owns its glyph and moves it one cell per tick along a single
/// direction, optionally holding at a pause point on the way. Ticks are
/// driven by [`step`](BannerActor::step), which takes the current time so
/// the motion can be replayed without a clock.
#[derive(Clone, Debug)]
pub struct BannerActor {
    glyph: Glyph,
    config: ActorConfig,
    position: (i32, i32),
    phase: Phase,
    enabled: bool,
    next_due: Option<Instant>,
}

impl BannerActor {
    pub fn new(glyph: Glyph, config: ActorConfig) -> Self {
        Self {
            glyph,
            position: config.start,
            phase: Phase::Entering,
            enabled: true,
            next_due: None,
            config,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// A disabled actor ignores ticks until enabled again
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // At or beyond `target` along the direction of travel
    fn reached(&self, target: (i32, i32)) -> bool {
        let (dx, dy) = self.config.direction.step();
        (self.position.0 - target.0) * dx + (self.position.1 - target.1) * dy >= 0
    }

    fn advance(&mut self) {
        let (dx, dy) = self.config.direction.step();
        self.position = (self.position.0 + dx, self.position.1 + dy);
    }

    /// Advance one tick if one is due at `now`.
    ///
    /// Returns the new position when the actor moved, `None` when it is not
    /// yet due, disabled, paused, or already exited.
    pub fn step(&mut self, now: Instant) -> Option<(i32, i32)> {
        if !self.enabled || self.phase == Phase::Exited {
            return None;
        }
        if self.next_due.is_some_and(|due| now < due) {
            return None;
        }

        match self.phase {
            Phase::Entering => {
                self.advance();
                match self.config.pause_at {
                    Some(target) if self.reached(target) => {
                        self.phase = Phase::Paused;
                        self.next_due = Some(now + self.config.pause);
                        return Some(self.position);
                    }
                    _ => {}
                }
            }
            Phase::Paused => {
                self.phase = Phase::Leaving;
                self.advance();
            }
            Phase::Leaving => self.advance(),
            Phase::Exited => return None,
        }

        if self.reached(self.config.end) {
            self.phase = Phase::Exited;
        }
        self.next_due = Some(now + self.config.step_delay);
        Some(self.position)
    }

    /// Drive the actor until it exits, drawing every position opaquely.
    ///
    /// Blocks the calling thread; the token is checked before each tick.
    pub fn run(
        &mut self,
        engine: &mut ScrollEngine,
        cancel: Option<&CancelToken>,
    ) -> Result<ScrollReport, EngineError> {
        if !self.enabled {
            return Ok(ScrollReport {
                frames: 0,
                state: ScrollState::Idle,
            });
        }

        debug!(
            "Running {}x{} actor from {:?} to {:?}",
            self.glyph.width(),
            self.glyph.height(),
            self.config.start,
            self.config.end
        );

        let mut frames = 0;
        if self.phase != Phase::Exited {
            let (x, y) = self.position;
            engine.move_sprite_opaque(&self.glyph, None, x, y)?;
            frames += 1;
            self.next_due = Some(Instant::now() + self.config.step_delay);
        }

        while self.phase != Phase::Exited {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                return Ok(ScrollReport {
                    frames,
                    state: ScrollState::Cancelled,
                });
            }

            if let Some(due) = self.next_due {
                let now = Instant::now();
                if due > now {
                    std::thread::sleep(due - now);
                }
            }

            let from = self.position;
            if let Some((x, y)) = self.step(Instant::now()) {
                engine.move_sprite_opaque(&self.glyph, Some(from), x, y)?;
                frames += 1;
            }
        }

        Ok(ScrollReport {
            frames,
            state: ScrollState::Done,
        })
    }
}
