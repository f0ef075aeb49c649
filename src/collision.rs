use crate::geometry::Rect;
use crate::obstacle::Obstacle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impact {
    Ground,
    Obstacle,
}

/// One detected collision. `first` is set only for the first hit of an
/// episode; that is the one that should be signalled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub impact: Impact,
    pub first: bool,
}

/// Ground and obstacle checks sharing one "already signalled" latch.
///
/// The latch is cleared only by [`CollisionMonitor::reset`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionMonitor {
    hit_fired: bool,
}

impl CollisionMonitor {
    pub fn hit_fired(&self) -> bool {
        self.hit_fired
    }

    pub fn check_ground(&mut self, character: &Rect, ground_line: f32) -> Option<Hit> {
        (character.bottom() > ground_line).then(|| self.latch(Impact::Ground))
    }

    pub fn check_obstacle(&mut self, character: &Rect, head: Option<&Obstacle>) -> Option<Hit> {
        let head = head?;
        (character.intersects(&head.upper()) || character.intersects(&head.lower()))
            .then(|| self.latch(Impact::Obstacle))
    }

    pub fn reset(&mut self) {
        self.hit_fired = false;
    }

    fn latch(&mut self, impact: Impact) -> Hit {
        let first = !self.hit_fired;
        self.hit_fired = true;
        Hit { impact, first }
    }
}
