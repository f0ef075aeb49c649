use std::{env, path::PathBuf};

// Gameplay tuning, in reference units (600x768 design resolution).

pub const REFERENCE_WIDTH: f32 = 600.0;
pub const REFERENCE_HEIGHT: f32 = 768.0;
pub const GROUND_THICKNESS: f32 = 200.0;

/// Tuning and runtime knobs for one game process.
///
/// Tuning values default to the classic feel; runtime values can be
/// overridden from the environment with [`GameConfig::from_env`].
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Horizontal speed of obstacles and ground, units per second.
    pub move_speed: f32,
    /// Running ticks between two spawns.
    pub spawn_interval: u32,
    /// Per-tick velocity gain per second of elapsed time.
    pub gravity: f32,
    /// Upward impulse, scaled by `dt` when applied.
    pub flap_speed: f32,
    pub target_fps: u32,
    /// World units covered by one terminal pixel (half a cell vertically).
    pub units_per_pixel: f32,
    pub seed: Option<u64>,
    pub muted: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_speed: 250.0,
            spawn_interval: 70,
            gravity: 10.0,
            flap_speed: 250.0,
            target_fps: 60,
            units_per_pixel: 6.0,
            seed: None,
            muted: false,
            log_file: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            target_fps: env::var("FLAPPY_FPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|fps| *fps > 0)
                .unwrap_or(defaults.target_fps),
            units_per_pixel: env::var("FLAPPY_UNITS_PER_PIXEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|upp: &f32| *upp > 0.0)
                .unwrap_or(defaults.units_per_pixel),
            seed: env::var("FLAPPY_SEED").ok().and_then(|v| v.parse().ok()),
            muted: env::var("FLAPPY_MUTE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            log_file: env::var_os("FLAPPY_LOG").map(PathBuf::from),
            ..defaults
        }
    }
}
