use crate::geometry::Rect;
use crate::viewport::Viewport;

/// Two ground strips scrolling left in lockstep with the obstacles. A strip
/// that leaves the screen is moved behind the other one.
#[derive(Clone, Debug, PartialEq)]
pub struct Ground {
    strips: [Rect; 2],
}

impl Ground {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            strips: viewport.ground_strips(),
        }
    }

    pub fn strips(&self) -> &[Rect; 2] {
        &self.strips
    }

    pub fn scroll(&mut self, distance: f32) {
        for strip in &mut self.strips {
            strip.x -= distance;
        }
        if self.strips[0].right() < 0.0 {
            self.strips[0].x = self.strips[1].right();
        }
        if self.strips[1].right() < 0.0 {
            self.strips[1].x = self.strips[0].right();
        }
    }

    pub fn reset(&mut self, viewport: &Viewport) {
        self.strips = viewport.ground_strips();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_wrap_around() {
        let viewport = Viewport::new(600.0, 768.0);
        let mut ground = Ground::new(&viewport);
        ground.scroll(599.0);
        assert_eq!(ground.strips()[0].x, -599.0);
        assert_eq!(ground.strips()[1].x, 1.0);

        ground.scroll(2.0);
        assert_eq!(ground.strips()[1].x, -1.0);
        assert_eq!(ground.strips()[0].x, 599.0);
        assert_eq!(ground.strips()[0].y, viewport.ground_line());
    }
}
