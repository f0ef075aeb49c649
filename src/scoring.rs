use crate::geometry::Rect;
use crate::obstacle::Obstacle;

/// Credits one point per obstacle the character flies through.
///
/// Two edges: the character must first sit fully inside the obstacle's
/// horizontal span (arming `monitoring`), then its trailing edge must clear
/// the obstacle's trailing edge. Only the queue head is ever examined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreMonitor {
    score: u32,
    monitoring: bool,
}

impl ScoreMonitor {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Returns `true` on the tick a point is credited.
    pub fn check(&mut self, character: &Rect, head: Option<&Obstacle>) -> bool {
        let Some(head) = head else {
            return false;
        };

        if !self.monitoring && character.left() > head.left() && character.right() < head.right()
        {
            self.monitoring = true;
        }

        if self.monitoring && character.left() > head.right() {
            self.monitoring = false;
            self.score += 1;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Obstacle spanning [100, 150] horizontally at scale 1.
    fn obstacle() -> Obstacle {
        Obstacle::new(50.0 / 52.0, 0.0, 100.0, 200.0)
    }

    fn span(left: f32, right: f32) -> Rect {
        Rect::new(left, 300.0, right - left, 20.0)
    }

    #[test]
    fn empty_queue_is_a_no_op() {
        let mut monitor = ScoreMonitor::default();
        for left in [60.0, 110.0, 160.0] {
            assert!(!monitor.check(&span(left, left + 30.0), None));
        }
        assert_eq!(monitor, ScoreMonitor::default());
    }

    #[test]
    fn skipping_over_the_span_never_scores() {
        let o = obstacle();
        let mut monitor = ScoreMonitor::default();
        assert!(!monitor.check(&span(60.0, 90.0), Some(&o)));
        assert!(!monitor.check(&span(160.0, 190.0), Some(&o)));
        assert!(!monitor.is_monitoring());
        assert_eq!(monitor.score(), 0);
    }

    #[test]
    fn passing_through_scores_exactly_once() {
        let o = obstacle();
        let mut monitor = ScoreMonitor::default();
        assert!(!monitor.check(&span(110.0, 140.0), Some(&o)));
        assert!(monitor.is_monitoring());
        assert_eq!(monitor.score(), 0);

        assert!(monitor.check(&span(151.0, 181.0), Some(&o)));
        assert_eq!(monitor.score(), 1);
        assert!(!monitor.is_monitoring());

        for _ in 0..10 {
            assert!(!monitor.check(&span(170.0, 200.0), Some(&o)));
        }
        assert_eq!(monitor.score(), 1);
    }

    #[test]
    fn partial_overlap_does_not_arm() {
        let o = obstacle();
        let mut monitor = ScoreMonitor::default();
        monitor.check(&span(90.0, 120.0), Some(&o));
        monitor.check(&span(130.0, 160.0), Some(&o));
        assert!(!monitor.is_monitoring());
    }

    #[test]
    fn reset_clears_score_and_arming() {
        let o = obstacle();
        let mut monitor = ScoreMonitor::default();
        monitor.check(&span(110.0, 140.0), Some(&o));
        monitor.check(&span(151.0, 181.0), Some(&o));
        monitor.check(&span(110.0, 140.0), Some(&o));
        monitor.reset();
        assert_eq!(monitor, ScoreMonitor::default());
    }
}
