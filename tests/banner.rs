use led_banner::display::canvas::CanvasAdapter;
use led_banner::display::driver::{FrameLog, MemoryDevice};
use led_banner::display::scroll::{Direction, DrawMode, ScrollEngine, ScrollState};
use led_banner::display::update_loop::{show_request, BannerRequest, Effect, LoopSettings};
use led_banner::font::{BannerBuilder, FontTable, GapTable, UnknownGlyphPolicy};
use led_banner::models::glyph::BLACK;
use std::time::Duration;

fn new_engine(width: i32, height: i32) -> (ScrollEngine, FrameLog) {
    let log = FrameLog::new();
    let device = MemoryDevice::recording(width, height, log.clone());
    let canvas = CanvasAdapter::new(Box::new(device), 100);
    (ScrollEngine::new(canvas, DrawMode::Opaque), log)
}

#[test]
fn test_banner_scrolls_through_library_api() {
    let (mut engine, log) = new_engine(16, 16);
    let builder = BannerBuilder::new(
        FontTable::builtin().unwrap(),
        GapTable::default(),
        UnknownGlyphPolicy::Skip,
    );
    let request = BannerRequest {
        text: "1".to_string(),
        color: [0, 0, 255],
    };
    let settings = LoopSettings {
        effect: Effect::Scroll,
        direction: Direction::Left,
        lane: None,
        frame_delay: Duration::ZERO,
        pause: Duration::ZERO,
    };

    let report = show_request(&mut engine, &builder, &request, &settings, None).unwrap();
    // "1" is three columns wide
    assert_eq!(report.frames, 19);
    assert_eq!(report.state, ScrollState::Done);
    assert_eq!(log.len(), 19);

    let frames = log.frames();
    assert!(frames[8].iter().any(|&c| c == [0, 0, 255]));
    assert!(frames.last().unwrap().iter().all(|&c| c == BLACK));
}
