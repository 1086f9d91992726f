use anyhow::Context;
use gldoom_core::{Dispatch, EngineEvent, EventHandler, KeyInput, VideoConfig};
use gldoom_host_winit::GlVideo;
use tracing_subscriber::EnvFilter;

/// Stands in for the game: logs keys and stops on a posted quit.
#[derive(Debug, Default)]
struct StubEngine {
    quit: bool,
    keys_down: usize,
}

impl EventHandler for StubEngine {
    fn key(&mut self, input: KeyInput) {
        if input.pressed {
            self.keys_down += 1;
        }
        tracing::debug!(scancode = input.scancode, pressed = input.pressed, "key");
    }

    fn post(&mut self, event: EngineEvent) {
        if event == EngineEvent::Quit {
            self.quit = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional first argument: path to a JSON video config.
    let config = match std::env::args_os().nth(1) {
        Some(path) => VideoConfig::load(&path)
            .with_context(|| format!("loading video config {}", path.to_string_lossy()))?,
        None => VideoConfig::default(),
    };

    let mut video = GlVideo::init_graphics(&config).context("initialising graphics")?;
    let mut engine = StubEngine::default();

    while !engine.quit {
        if video.start_tic(&mut engine) == Dispatch::Terminate {
            std::process::exit(0);
        }
        video.start_frame();
        video.finish_update().context("presenting frame")?;
    }

    let mut saved = config.clone();
    saved.absorb_placement(&video.state().placement);
    tracing::info!(
        keys = engine.keys_down,
        display = saved.video_display,
        "quit requested"
    );

    video.shutdown_graphics();
    Ok(())
}
