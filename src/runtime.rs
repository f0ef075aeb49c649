use std::time::{Duration, Instant};

use tracing::info;

use crate::audio::CueSink;
use crate::game::{Flow, Game};
use crate::input::EventSource;

/// Something that can show the current frame.
pub trait Screen {
    fn present(&mut self, game: &Game) -> anyhow::Result<()>;
}

/// Measures per-iteration elapsed time and paces iterations to a target rate.
pub struct FrameClock {
    frame_dur: Duration,
    last: Instant,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            frame_dur: Duration::from_secs(1) / target_fps.max(1),
            last: now,
            frame_start: now,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_dur
    }

    /// Seconds since the previous call; also marks the start of a frame.
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.frame_start = now;
        dt
    }

    /// Sleeps off whatever is left of the current frame's budget.
    pub fn throttle(&self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_dur {
            std::thread::sleep(self.frame_dur - elapsed);
        }
    }
}

/// Drives the game until a quit event arrives.
///
/// Every iteration: measure `dt`, drain events, advance, draw, throttle.
/// Drawing happens even while paused.
pub fn run(
    game: &mut Game,
    events: &mut impl EventSource,
    screen: &mut impl Screen,
    cues: &mut impl CueSink,
    target_fps: u32,
) -> anyhow::Result<()> {
    let mut clock = FrameClock::new(target_fps);
    info!(fps = target_fps, "game loop started");

    loop {
        let dt = clock.delta();
        let pending = events.drain()?;
        if game.frame(dt, pending, cues) == Flow::Quit {
            info!(score = game.score(), "quit requested");
            return Ok(());
        }
        screen.present(game)?;
        clock.throttle();
    }
}
