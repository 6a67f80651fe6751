use crate::config::DisplayConfig;
use crate::display::scroll::{centered_lane, Direction, ScrollEngine, ScrollReport, ScrollState};
use crate::error::EngineError;
use crate::font::BannerBuilder;
use crate::models::actor::{ActorConfig, BannerActor};
use crate::models::glyph::Color;
use crate::utils::cancel::CancelToken;
use log::{error, info, warn};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::Receiver;

/// How a banner is brought onto the display
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Effect {
    /// Scroll across the whole canvas
    #[default]
    Scroll,
    /// Fall in from the top, hold, then fall out the bottom
    Drop,
}

impl FromStr for Effect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scroll" => Ok(Effect::Scroll),
            "drop" => Ok(Effect::Drop),
            _ => Err("must be 'scroll' or 'drop'".to_string()),
        }
    }
}

/// One message waiting to be shown
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerRequest {
    pub text: String,
    pub color: Color,
}

/// Animation settings shared by every request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopSettings {
    pub effect: Effect,
    pub direction: Direction,
    pub lane: Option<i32>,
    pub frame_delay: Duration,
    pub pause: Duration,
}

impl LoopSettings {
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            effect: config.effect,
            direction: config.direction,
            lane: config.lane,
            frame_delay: config.frame_delay(),
            pause: config.pause(),
        }
    }
}

/// Build and animate a single request, blocking until it is finished
pub fn show_request(
    engine: &mut ScrollEngine,
    builder: &BannerBuilder,
    request: &BannerRequest,
    settings: &LoopSettings,
    cancel: Option<&CancelToken>,
) -> Result<ScrollReport, EngineError> {
    let banner = builder.build(&request.text)?.tinted(request.color);
    let (width, height) = (engine.canvas().width(), engine.canvas().height());

    match settings.effect {
        Effect::Scroll => {
            let lane = settings.lane.unwrap_or_else(|| {
                if settings.direction.is_horizontal() {
                    centered_lane(height, banner.height())
                } else {
                    centered_lane(width, banner.width())
                }
            });
            engine.scroll_across_screen(
                &banner,
                lane,
                settings.direction,
                settings.frame_delay,
                cancel,
            )
        }
        Effect::Drop => {
            let lane = settings
                .lane
                .unwrap_or_else(|| centered_lane(height, banner.height()));
            let config = ActorConfig::drop_in(
                &banner,
                width,
                height,
                lane,
                settings.pause,
                settings.frame_delay,
            );
            BannerActor::new(banner, config).run(engine, cancel)
        }
    }
}

/// Drain banner requests until the channel closes or `cancel` fires.
///
/// Runs on a blocking thread; every animation happens here, one at a time.
/// Hands the engine back so the caller can shut the display down.
pub fn banner_loop(
    mut engine: ScrollEngine,
    builder: BannerBuilder,
    mut requests: Receiver<BannerRequest>,
    cancel: CancelToken,
    settings: LoopSettings,
) -> ScrollEngine {
    info!("Starting banner loop");
    let mut shown = 0u32;

    while let Some(request) = requests.blocking_recv() {
        if cancel.is_cancelled() {
            break;
        }

        let started = Instant::now();
        match show_request(&mut engine, &builder, &request, &settings, Some(&cancel)) {
            Ok(report) if report.state == ScrollState::Cancelled => {
                info!("Banner \"{}\" cancelled after {} frames", request.text, report.frames);
                break;
            }
            Ok(report) => {
                shown += 1;
                let elapsed = started.elapsed().as_secs_f32();
                let fps = if elapsed > 0.0 {
                    report.frames as f32 / elapsed
                } else {
                    0.0
                };
                info!(
                    "Showed banner \"{}\": {} frames, {:.1} FPS",
                    request.text, report.frames, fps
                );
            }
            Err(EngineError::Device(e)) => {
                error!("Display device failed: {}", e);
                break;
            }
            Err(e) => warn!("Skipping banner \"{}\": {}", request.text, e),
        }
    }

    info!("Banner loop finished after {} banners", shown);
    engine
}
