use crate::config::{GROUND_THICKNESS, REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::geometry::Rect;

const SCORE_ANCHOR: (f32, f32) = (100.0, 30.0);
const RESTART_SIZE: (f32, f32) = (140.0, 40.0);
const RESTART_BOTTOM_OFFSET: f32 = 100.0;

/// Current drawable area and everything derived from it.
///
/// All anchors are pure functions of `(width, height)`, so two viewports
/// resized to the same dimensions are indistinguishable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let mut viewport = Self {
            width,
            height,
            scale: 1.0,
        };
        viewport.resize(width, height);
        viewport
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.scale = (width / REFERENCE_WIDTH).min(height / REFERENCE_HEIGHT);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn ground_height(&self) -> f32 {
        GROUND_THICKNESS * self.scale
    }

    /// The character touches the ground once its bottom passes this line.
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_height()
    }

    /// Two strips laid side by side; the second starts where the first ends.
    pub fn ground_strips(&self) -> [Rect; 2] {
        let y = self.ground_line();
        let h = self.ground_height();
        [
            Rect::new(0.0, y, self.width, h),
            Rect::new(self.width, y, self.width, h),
        ]
    }

    pub fn background(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn score_anchor(&self) -> (f32, f32) {
        (SCORE_ANCHOR.0 * self.scale, SCORE_ANCHOR.1 * self.scale)
    }

    pub fn restart_control(&self) -> Rect {
        Rect::from_center(
            self.width / 2.0,
            self.height - RESTART_BOTTOM_OFFSET * self.scale,
            RESTART_SIZE.0 * self.scale,
            RESTART_SIZE.1 * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_resolution_has_unit_scale() {
        let v = Viewport::new(600.0, 768.0);
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.ground_line(), 568.0);
    }

    #[test]
    fn scale_is_min_of_both_axes() {
        let mut v = Viewport::new(600.0, 768.0);
        v.resize(1200.0, 768.0);
        assert_eq!(v.scale(), 1.0);
        v.resize(300.0, 768.0);
        assert_eq!(v.scale(), 0.5);
        v.resize(900.0, 384.0);
        assert_eq!(v.scale(), 0.5);
    }

    #[test]
    fn anchors_depend_only_on_dimensions() {
        let mut resized = Viewport::new(640.0, 480.0);
        resized.resize(300.0, 384.0);
        resized.resize(1024.0, 700.0);
        let fresh = Viewport::new(1024.0, 700.0);
        assert_eq!(resized, fresh);
        assert_eq!(resized.restart_control(), fresh.restart_control());
        assert_eq!(resized.score_anchor(), fresh.score_anchor());
        assert_eq!(resized.ground_strips(), fresh.ground_strips());
    }

    #[test]
    fn restart_control_sits_above_bottom_edge() {
        let v = Viewport::new(600.0, 768.0);
        let r = v.restart_control();
        assert_eq!(r.center(), (300.0, 668.0));
        assert_eq!((r.w, r.h), (140.0, 40.0));
    }
}
