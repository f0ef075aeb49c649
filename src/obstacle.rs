use std::collections::VecDeque;

use rand::Rng;
use tracing::trace;

use crate::geometry::Rect;
use crate::viewport::Viewport;

pub const BARRIER_WIDTH: f32 = 52.0;
pub const BARRIER_LENGTH: f32 = 320.0;
pub const GAP_HEIGHT: f32 = 200.0;
/// Range for the lower barrier's top, measured up from the ground line.
const LOWER_TOP_ABOVE_GROUND: std::ops::RangeInclusive<u32> = 48..=318;

/// A pair of barriers with a passable gap between them.
///
/// Both barriers share one horizontal position; only `x` ever changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    x: f32,
    width: f32,
    speed: f32,
    upper_top: f32,
    gap_top: f32,
    gap_bottom: f32,
    lower_len: f32,
}

impl Obstacle {
    /// `gap_top` is the bottom edge of the upper barrier. The upper barrier
    /// always extends past the top of the screen.
    pub fn new(scale: f32, speed: f32, x: f32, gap_top: f32) -> Self {
        let len = BARRIER_LENGTH * scale;
        Self {
            x,
            width: BARRIER_WIDTH * scale,
            speed,
            upper_top: (gap_top - len).min(0.0),
            gap_top,
            gap_bottom: gap_top + GAP_HEIGHT * scale,
            lower_len: len,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.x -= self.speed * dt;
    }

    pub fn upper(&self) -> Rect {
        Rect::new(self.x, self.upper_top, self.width, self.gap_top - self.upper_top)
    }

    pub fn lower(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom, self.width, self.lower_len)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Live obstacles in spawn order plus the spawn cadence counter.
///
/// Obstacles all move at the same speed, so spawn order is also distance
/// order: the head is always the nearest one not yet retired.
#[derive(Clone, Debug)]
pub struct ObstacleQueue {
    obstacles: VecDeque<Obstacle>,
    counter: u32,
    interval: u32,
}

impl ObstacleQueue {
    pub fn new(interval: u32) -> Self {
        Self {
            obstacles: VecDeque::new(),
            counter: first_spawn_counter(interval),
            interval,
        }
    }

    pub fn head(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn spawn_counter(&self) -> u32 {
        self.counter
    }

    /// One running tick: maybe spawn, advance everything, retire the head
    /// once it has left the screen.
    pub fn tick(&mut self, dt: f32, speed: f32, viewport: &Viewport, rng: &mut impl Rng) {
        if self.counter > self.interval {
            let obstacle = spawn(viewport, speed, rng);
            trace!(x = obstacle.left(), live = self.obstacles.len() + 1, "obstacle spawned");
            self.obstacles.push_back(obstacle);
            self.counter = 0;
        }
        self.counter += 1;

        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }

        if self.head().is_some_and(|head| head.right() < 0.0) {
            self.obstacles.pop_front();
            trace!(live = self.obstacles.len(), "obstacle retired");
        }
    }

    /// Empties the queue and rewinds the cadence so the next tick spawns.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.counter = first_spawn_counter(self.interval);
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push_back(obstacle);
    }
}

// Any value above the interval makes the next tick spawn.
fn first_spawn_counter(interval: u32) -> u32 {
    interval + 1
}

fn spawn(viewport: &Viewport, speed: f32, rng: &mut impl Rng) -> Obstacle {
    let scale = viewport.scale();
    let lower_top =
        viewport.ground_line() - rng.gen_range(LOWER_TOP_ABOVE_GROUND) as f32 * scale;
    let gap_top = lower_top - GAP_HEIGHT * scale;
    Obstacle::new(scale, speed, viewport.width(), gap_top)
}
