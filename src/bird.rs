use crate::geometry::Rect;

const BASE_SIZE: (f32, f32) = (34.0, 24.0);
const START_CENTER: (f32, f32) = (100.0, 100.0);
const WING_FRAMES: u32 = 3;
const TICKS_PER_WING_FRAME: u32 = 5;

/// The player-controlled character.
///
/// Velocity is a per-tick displacement: `update` adds `gravity * dt` to it
/// and then moves by it, `flap` overwrites it with `-flap_speed * dt`.
/// Both constants are multiplied by the current scale so motion stays
/// proportional to the viewport.
#[derive(Clone, Debug)]
pub struct Bird {
    cx: f32,
    cy: f32,
    scale: f32,
    velocity: f32,
    gravity: f32,
    flap_speed: f32,
    active: bool,
    // Set while pinned against the top edge; flapping is ignored until the
    // bird drops back below it.
    ceiling_locked: bool,
    anim_ticks: u32,
}

impl Bird {
    pub fn new(scale: f32, gravity: f32, flap_speed: f32) -> Self {
        let mut bird = Self {
            cx: 0.0,
            cy: 0.0,
            scale,
            velocity: 0.0,
            gravity,
            flap_speed,
            active: false,
            ceiling_locked: false,
            anim_ticks: 0,
        };
        bird.reset_position();
        bird
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(
            self.cx,
            self.cy,
            BASE_SIZE.0 * self.scale,
            BASE_SIZE.1 * self.scale,
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Wing frame for the renderer, cycles while physics runs.
    pub fn wing_frame(&self) -> u32 {
        (self.anim_ticks / TICKS_PER_WING_FRAME) % WING_FRAMES
    }

    pub fn flap(&mut self, dt: f32) {
        if self.ceiling_locked {
            return;
        }
        self.velocity = -self.flap_speed * self.scale * dt;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.anim_ticks = self.anim_ticks.wrapping_add(1);
        self.velocity += self.gravity * self.scale * dt;
        self.cy += self.velocity;

        let top = self.rect().top();
        if top <= 0.0 && !self.ceiling_locked {
            self.cy -= top;
            self.velocity = 0.0;
            self.ceiling_locked = true;
        } else if top > 0.0 && self.ceiling_locked {
            self.ceiling_locked = false;
        }
    }

    pub fn reset_position(&mut self) {
        self.cx = START_CENTER.0 * self.scale;
        self.cy = START_CENTER.1 * self.scale;
        self.velocity = 0.0;
        self.ceiling_locked = false;
        self.anim_ticks = 0;
    }

    /// Rescales the size. `x` snaps to the scaled start column, `y` is kept.
    pub fn scale(&mut self, factor: f32) {
        self.cx = START_CENTER.0 * factor;
        self.scale = factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird() -> Bird {
        Bird::new(1.0, 10.0, 250.0)
    }

    #[test]
    fn inactive_bird_does_not_move() {
        let mut b = bird();
        let before = b.rect();
        b.update(1.0 / 60.0);
        assert_eq!(b.rect(), before);
    }

    #[test]
    fn gravity_pulls_down_and_flap_pushes_up() {
        let mut b = bird();
        b.set_active(true);
        let start = b.rect().top();
        for _ in 0..10 {
            b.update(1.0 / 60.0);
        }
        assert!(b.rect().top() > start);

        b.flap(1.0 / 60.0);
        assert!(b.velocity() < 0.0);
        let before = b.rect().top();
        b.update(1.0 / 60.0);
        assert!(b.rect().top() < before);
    }

    #[test]
    fn ceiling_pins_bird_and_blocks_flap() {
        let mut b = bird();
        b.set_active(true);
        b.flap(1.0);
        b.update(0.0);
        assert_eq!(b.rect().top(), 0.0);
        assert_eq!(b.velocity(), 0.0);

        b.flap(1.0);
        assert_eq!(b.velocity(), 0.0);

        b.update(1.0);
        assert!(b.rect().top() > 0.0);
        b.update(1.0);
        b.flap(1.0 / 60.0);
        assert!(b.velocity() < 0.0);
    }

    #[test]
    fn reset_restores_start_pose() {
        let mut b = bird();
        b.set_active(true);
        for _ in 0..30 {
            b.update(1.0 / 60.0);
        }
        b.reset_position();
        assert_eq!(b.rect(), bird().rect());
        assert_eq!(b.velocity(), 0.0);
    }

    #[test]
    fn scale_resizes_around_center() {
        let mut b = bird();
        b.scale(0.5);
        let r = b.rect();
        assert_eq!((r.w, r.h), (17.0, 12.0));
        assert_eq!(r.center(), (50.0, 100.0));
        b.reset_position();
        assert_eq!(b.rect().center(), (50.0, 50.0));
    }
}
