use led_banner::config::{init_config, DisplayConfig};
use led_banner::display::canvas::CanvasAdapter;
use led_banner::display::driver::{create_driver, DriverType};
use led_banner::display::scroll::ScrollEngine;
use led_banner::display::update_loop::{banner_loop, BannerRequest, LoopSettings};
use led_banner::font::{BannerBuilder, FontTable};
use led_banner::utils::cancel::CancelToken;
use anyhow::Context;
use chrono::Local;
use colored::*;
use env_logger::Builder;
use log::{debug, error, info, LevelFilter};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, Sender};

// Banners waiting for the display worker
const QUEUE_DEPTH: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger with a custom format that includes timestamps and colors
    Builder::new()
        .format(|buf, record| {
            // Color based on log level
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red().bold(),
                log::Level::Warn => record.level().to_string().yellow().bold(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().purple(),
            };

            let message = match record.level() {
                log::Level::Error => record.args().to_string().red(),
                log::Level::Warn => record.args().to_string().yellow(),
                log::Level::Info => record.args().to_string().normal(),
                log::Level::Debug => record.args().to_string().blue(),
                log::Level::Trace => record.args().to_string().purple(),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                level,
                message
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    info!("Starting LED banner");

    let display_config = init_config();

    if let Err(errors) = display_config.validate() {
        for error in errors {
            error!("{}", error);
        }
        std::process::exit(1);
    }

    let font = match &display_config.font_path {
        Some(path) => Arc::new(
            FontTable::from_file(path)
                .with_context(|| format!("failed to load font {}", path.display()))?,
        ),
        None => FontTable::builtin().context("built-in font is corrupt")?,
    };
    info!("Loaded font with {} glyphs", font.len());
    let builder = BannerBuilder::new(font, display_config.gaps, display_config.unknown_glyphs);

    if display_config.driver_type == DriverType::RpiLedPanel {
        raise_priority();
    }

    let driver = match create_driver(&display_config) {
        Ok(driver) => driver,
        Err(e) => {
            error!("Failed to initialize LED matrix driver: {}", e);
            std::process::exit(1);
        }
    };

    let canvas = CanvasAdapter::new(driver, display_config.brightness);
    info!(
        "Display ready: {}x{} at {}% brightness",
        canvas.width(),
        canvas.height(),
        canvas.brightness()
    );
    let engine = ScrollEngine::new(canvas, display_config.draw_mode);

    // Ctrl-C stops the current animation on a frame boundary; cleanup happens below
    let cancel = CancelToken::new();
    if let Err(e) = ctrlc::set_handler({
        let cancel = cancel.clone();
        move || {
            info!("Received termination signal, shutting down...");
            cancel.cancel();
        }
    }) {
        error!("Error setting Ctrl-C handler: {}", e);
    }

    let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
    let worker = tokio::task::spawn_blocking({
        let cancel = cancel.clone();
        let settings = LoopSettings::from_config(&display_config);
        move || banner_loop(engine, builder, rx, cancel, settings)
    });

    let fed = feed_messages(&display_config, tx, cancel.clone()).await;

    let mut engine = worker.await.context("banner worker stopped unexpectedly")?;
    info!("Application exiting, cleaning up display...");
    engine.shutdown();

    if cancel.is_cancelled() {
        // A pending stdin read would otherwise hold the runtime open
        std::process::exit(0);
    }
    fed
}

/// Queue the configured messages, then stdin lines, until done or cancelled.
///
/// Dropping the sender at the end lets the worker finish what is queued.
async fn feed_messages(
    config: &DisplayConfig,
    tx: Sender<BannerRequest>,
    cancel: CancelToken,
) -> anyhow::Result<()> {
    let request = |text: &str| BannerRequest {
        text: text.to_string(),
        color: config.color,
    };

    if !config.messages.is_empty() {
        let mut round = 0;
        while config.repeat == 0 || round < config.repeat {
            for text in &config.messages {
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(()),
                    sent = tx.send(request(text)) => {
                        if sent.is_err() {
                            debug!("Banner worker is gone, no longer queueing");
                            return Ok(());
                        }
                    }
                }
            }
            round += 1;
        }
    }

    if config.read_stdin {
        info!("Reading banners from stdin, one per line");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = tokio::select! {
                _ = cancel.cancelled() => break,
                line = lines.next_line() => line.context("failed to read stdin")?,
            };
            let Some(line) = line else {
                break;
            };

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if tx.send(request(text)).await.is_err() {
                debug!("Banner worker is gone, no longer reading stdin");
                break;
            }
        }
    }

    Ok(())
}

// Panel refresh is timing sensitive; ask the scheduler for more CPU
fn raise_priority() {
    #[cfg(target_os = "linux")]
    unsafe {
        if libc::nice(-20) == -1 {
            let err = std::io::Error::last_os_error();
            log::warn!("Failed to raise process priority: {}", err);
        } else {
            debug!("Set process priority to -20");
        }
    }
}
