use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::audio::{Cue, CueSink};
use crate::bird::Bird;
use crate::collision::{CollisionMonitor, Hit};
use crate::config::GameConfig;
use crate::ground::Ground;
use crate::input::{InputEvent, Key};
use crate::obstacle::ObstacleQueue;
use crate::scoring::ScoreMonitor;
use crate::session::{Session, SessionState};
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything one play session owns, advanced one frame at a time.
///
/// `frame` is the whole per-iteration contract minus timing and drawing:
/// events are applied in arrival order, then, if the session is running,
/// obstacles, character, scoring and collisions are advanced in that order.
pub struct Game {
    config: GameConfig,
    viewport: Viewport,
    session: Session,
    bird: Bird,
    obstacles: ObstacleQueue,
    scoring: ScoreMonitor,
    collisions: CollisionMonitor,
    ground: Ground,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig, width: f32, height: f32) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, width, height, rng)
    }

    pub fn with_rng(config: GameConfig, width: f32, height: f32, rng: StdRng) -> Self {
        let viewport = Viewport::new(width, height);
        Self {
            bird: Bird::new(viewport.scale(), config.gravity, config.flap_speed),
            obstacles: ObstacleQueue::new(config.spawn_interval),
            ground: Ground::new(&viewport),
            session: Session::default(),
            scoring: ScoreMonitor::default(),
            collisions: CollisionMonitor::default(),
            viewport,
            config,
            rng,
        }
    }

    pub fn frame(
        &mut self,
        dt: f32,
        events: impl IntoIterator<Item = InputEvent>,
        cues: &mut impl CueSink,
    ) -> Flow {
        for event in events {
            if self.handle(event, dt, cues) == Flow::Quit {
                return Flow::Quit;
            }
        }
        if self.session.is_running() {
            self.update(dt, cues);
        }
        Flow::Continue
    }

    pub fn handle(&mut self, event: InputEvent, dt: f32, cues: &mut impl CueSink) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::Key(Key::PauseToggle) => self.session.toggle_pause(),
            InputEvent::Key(Key::Confirm) => {
                if self.session.confirm() {
                    self.bird.set_active(true);
                }
            }
            InputEvent::Key(Key::Impulse) => {
                if self.session.accepts_impulse() {
                    self.bird.flap(dt);
                    cues.play(Cue::Flap);
                }
            }
            InputEvent::PointerDown { x, y } => {
                if self.restart_visible() && self.viewport.restart_control().contains(x, y) {
                    self.restart();
                }
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
        Flow::Continue
    }

    /// One running tick. Both collision checks always run; the second one
    /// is a no-op transition if the first already ended the session.
    fn update(&mut self, dt: f32, cues: &mut impl CueSink) {
        let speed = self.config.move_speed;
        self.ground.scroll(speed * dt);
        self.obstacles.tick(dt, speed, &self.viewport, &mut self.rng);
        self.bird.update(dt);

        let character = self.bird.rect();
        if self.scoring.check(&character, self.obstacles.head()) {
            info!(score = self.scoring.score(), "scored");
            cues.play(Cue::Score);
        }

        let ground = self
            .collisions
            .check_ground(&character, self.viewport.ground_line());
        let obstacle = self
            .collisions
            .check_obstacle(&character, self.obstacles.head());
        for hit in [ground, obstacle].into_iter().flatten() {
            self.on_hit(hit, cues);
        }
    }

    fn on_hit(&mut self, hit: Hit, cues: &mut impl CueSink) {
        self.bird.set_active(false);
        self.session.end();
        if hit.first {
            info!(impact = ?hit.impact, score = self.scoring.score(), "hit");
            cues.play(Cue::Hit);
        }
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.scoring.reset();
        self.obstacles.reset();
        self.collisions.reset();
        self.bird.set_active(false);
        self.bird.reset_position();
        debug!("game restarted");
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.bird.scale(self.viewport.scale());
        self.ground.reset(&self.viewport);
        debug!(width, height, scale = self.viewport.scale(), "viewport resized");
    }

    pub fn restart_visible(&self) -> bool {
        self.session.is_ended()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn is_monitoring(&self) -> bool {
        self.scoring.is_monitoring()
    }

    pub fn hit_fired(&self) -> bool {
        self.collisions.hit_fired()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn obstacles(&self) -> &ObstacleQueue {
        &self.obstacles
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    #[cfg(test)]
    pub(crate) fn obstacles_mut(&mut self) -> &mut ObstacleQueue {
        &mut self.obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::Obstacle;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Default)]
    struct Recorder(Vec<Cue>);

    impl CueSink for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.push(cue);
        }
    }

    impl Recorder {
        fn count(&self, cue: Cue) -> usize {
            self.0.iter().filter(|c| **c == cue).count()
        }
    }

    fn game() -> Game {
        Game::with_rng(
            GameConfig::default(),
            600.0,
            768.0,
            StdRng::seed_from_u64(42),
        )
    }

    fn key(k: Key) -> Vec<InputEvent> {
        vec![InputEvent::Key(k)]
    }

    #[test]
    fn nothing_moves_before_confirm() {
        let mut g = game();
        let mut cues = Recorder::default();
        let start = g.bird().rect();
        for _ in 0..10 {
            g.frame(DT, key(Key::Impulse), &mut cues);
        }
        assert_eq!(g.state(), SessionState::NotStarted);
        assert!(g.obstacles().is_empty());
        assert_eq!(g.bird().rect(), start);
        assert!(cues.0.is_empty());
    }

    #[test]
    fn confirm_arms_character_and_spawns_first_obstacle() {
        let mut g = game();
        let mut cues = Recorder::default();
        g.frame(DT, key(Key::Confirm), &mut cues);
        assert_eq!(g.state(), SessionState::Running);
        assert!(g.bird().is_active());
        assert_eq!(g.obstacles().len(), 1);

        g.frame(DT, key(Key::Impulse), &mut cues);
        assert_eq!(cues.0, vec![Cue::Flap]);
    }

    #[test]
    fn pause_freezes_simulation_but_keeps_events_flowing() {
        let mut g = game();
        let mut cues = Recorder::default();
        g.frame(DT, key(Key::Confirm), &mut cues);
        g.frame(DT, key(Key::PauseToggle), &mut cues);
        let frozen = g.bird().rect();
        let head_x = g.obstacles().head().map(Obstacle::left);
        for _ in 0..20 {
            g.frame(DT, key(Key::Impulse), &mut cues);
        }
        assert_eq!(g.state(), SessionState::Paused);
        assert_eq!(g.bird().rect(), frozen);
        assert_eq!(g.obstacles().head().map(Obstacle::left), head_x);
        assert!(cues.0.is_empty());

        g.frame(DT, key(Key::PauseToggle), &mut cues);
        assert_eq!(g.state(), SessionState::Running);
        assert_ne!(g.bird().rect(), frozen);
    }

    #[test]
    fn falling_to_the_ground_ends_with_one_hit_cue() {
        let mut g = game();
        let mut cues = Recorder::default();
        g.frame(DT, key(Key::Confirm), &mut cues);
        for _ in 0..600 {
            g.frame(DT, [], &mut cues);
        }
        assert_eq!(g.state(), SessionState::Ended);
        assert!(!g.bird().is_active());
        assert!(g.hit_fired());
        assert_eq!(cues.count(Cue::Hit), 1);
    }

    #[test]
    fn flying_through_gap_scores_once() {
        let mut g = game();
        let mut cues = Recorder::default();
        g.frame(0.0, key(Key::Confirm), &mut cues);

        // Replace the spawned obstacle with one whose gap is centered on the
        // character, right in front of it.
        let bird = g.bird().rect();
        let (_, cy) = bird.center();
        g.obstacles_mut().reset();
        g.obstacles_mut()
            .push(Obstacle::new(1.0, 250.0, bird.right() + 1.0, cy - 100.0));

        // Each zero-dt impulse zeroes the velocity, so the character only
        // sinks a fraction of a unit per frame while the obstacle passes.
        for _ in 0..40 {
            g.frame(DT, [], &mut cues);
            g.frame(0.0, key(Key::Impulse), &mut cues);
        }
        assert_eq!(g.score(), 1, "state: {:?}", g.state());
        assert_eq!(cues.count(Cue::Score), 1);
        assert_eq!(cues.count(Cue::Hit), 0);
    }

    #[test]
    fn obstacle_hit_ends_session_with_one_hit_cue() {
        let mut g = game();
        let mut cues = Recorder::default();
        g.frame(0.0, key(Key::Confirm), &mut cues);

        // Lower barrier spans y 50..370, straight through the character.
        let bird = g.bird().rect();
        g.obstacles_mut().reset();
        g.obstacles_mut()
            .push(Obstacle::new(1.0, 0.0, bird.left(), -150.0));
        assert!(bird.bottom() < g.viewport().ground_line());

        for _ in 0..5 {
            g.frame(DT, [], &mut cues);
        }
        assert_eq!(g.state(), SessionState::Ended);
        assert!(!g.bird().is_active());
        assert!(g.hit_fired());
        assert_eq!(cues.0, vec![Cue::Hit]);
    }

    #[test]
    fn pointer_restart_only_while_ended_and_inside_control() {
        let mut g = game();
        let mut cues = Recorder::default();
        let (cx, cy) = g.viewport().restart_control().center();

        g.frame(DT, key(Key::Confirm), &mut cues);
        g.frame(DT, [InputEvent::PointerDown { x: cx, y: cy }], &mut cues);
        assert_eq!(g.state(), SessionState::Running);

        for _ in 0..600 {
            g.frame(DT, [], &mut cues);
        }
        assert_eq!(g.state(), SessionState::Ended);

        g.frame(DT, [InputEvent::PointerDown { x: 1.0, y: 1.0 }], &mut cues);
        assert_eq!(g.state(), SessionState::Ended);

        g.frame(DT, [InputEvent::PointerDown { x: cx, y: cy }], &mut cues);
        assert_eq!(g.state(), SessionState::NotStarted);
        assert_eq!(g.score(), 0);
        assert!(g.obstacles().is_empty());
        assert_eq!(g.obstacles().spawn_counter(), 71);
        assert!(!g.hit_fired());
        assert_eq!(g.bird().rect(), game().bird().rect());
    }

    #[test]
    fn quit_stops_processing_remaining_events() {
        let mut g = game();
        let mut cues = Recorder::default();
        let flow = g.frame(
            DT,
            [InputEvent::Quit, InputEvent::Key(Key::Confirm)],
            &mut cues,
        );
        assert_eq!(flow, Flow::Quit);
        assert_eq!(g.state(), SessionState::NotStarted);
    }

    #[test]
    fn resize_rescales_character_and_ground() {
        let mut g = game();
        let mut cues = Recorder::default();
        g.frame(
            DT,
            [InputEvent::Resize { width: 300.0, height: 384.0 }],
            &mut cues,
        );
        assert_eq!(g.viewport().scale(), 0.5);
        assert_eq!(g.bird().rect().w, 17.0);
        assert_eq!(g.ground().strips()[0].y, 284.0);
    }
}
