use anyhow::Context;
use tracing::info;

use flappy_tui::audio::{CueSink, Muted, Speaker};
use flappy_tui::config::GameConfig;
use flappy_tui::game::Game;
use flappy_tui::logger;
use flappy_tui::render::Projection;
use flappy_tui::runtime;
use flappy_tui::terminal::{self, TerminalEvents, TerminalGuard, TerminalScreen};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = GameConfig::from_env();
    logger::init(config.log_file.as_deref()).context("failed to initialize logging")?;
    info!(?config, "starting");

    // Audio comes up before the terminal so a missing device is reported on
    // a normal screen.
    let mut cues: Box<dyn CueSink> = if config.muted {
        Box::new(Muted)
    } else {
        Box::new(Speaker::open()?)
    };

    let proj = Projection {
        units_per_pixel: config.units_per_pixel,
    };
    let (width, height) = terminal::world_size(&proj)?;
    let target_fps = config.target_fps;
    let mut game = Game::new(config, width, height);

    let _guard = TerminalGuard::enter()?;
    runtime::run(
        &mut game,
        &mut TerminalEvents::new(proj),
        &mut TerminalScreen::new(proj),
        &mut cues,
        target_fps,
    )
}
