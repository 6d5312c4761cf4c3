//! Page spine constraint
//!
//! The spine is the page edge the fold may not cross. Its two border points
//! are ordered so that `(a - b)` rotated a quarter turn counter-clockwise
//! points from the page toward the spine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom::{Aabb, angle_between_deg, ray_line};

/// Which view edge is the fixed spine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderConstraint {
    /// Loose page, can be turned from any side
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

/// The spine edge of a view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderEdge {
    pub a: Vec2,
    pub b: Vec2,
}

impl BorderEdge {
    /// Unit direction a valid fold must travel in (toward the spine)
    pub fn expected_dir(&self) -> Vec2 {
        (self.a - self.b).normalize_or_zero().perp()
    }
}

/// Outcome of testing a fold line against the spine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderCheck {
    /// Fold line is clear of the spine
    Clear,
    /// Fold line crosses the spine segment
    Collision,
    /// Direction points away from the spine, or the page is fully turned
    Prohibited,
}

impl BorderConstraint {
    /// Spine border points for the given view, `None` for a loose page
    pub fn edge(&self, view: &Aabb) -> Option<BorderEdge> {
        let (l, r, b, t) = (view.left(), view.right(), view.bottom(), view.top());
        let (a, b) = match self {
            BorderConstraint::None => return None,
            BorderConstraint::Up => (Vec2::new(r, t), Vec2::new(l, t)),
            BorderConstraint::Down => (Vec2::new(l, b), Vec2::new(r, b)),
            BorderConstraint::Left => (Vec2::new(l, t), Vec2::new(l, b)),
            BorderConstraint::Right => (Vec2::new(r, b), Vec2::new(r, t)),
        };
        Some(BorderEdge { a, b })
    }

    /// Whether `fold` sits on or beyond the spine edge
    fn is_past_spine(&self, edge: &BorderEdge, fold: Vec2) -> bool {
        match self {
            BorderConstraint::None => false,
            BorderConstraint::Left => edge.a.x >= fold.x,
            BorderConstraint::Right => edge.a.x <= fold.x,
            BorderConstraint::Up => edge.a.y <= fold.y,
            BorderConstraint::Down => edge.a.y >= fold.y,
        }
    }

    /// Test a fold line through `fold`, moving along `dir`, against the spine
    ///
    /// `full_turn_deg` is the tolerance within which `dir` counts as parallel
    /// to the spine normal for the fully-turned test.
    pub fn check(&self, view: &Aabb, dir: Vec2, fold: Vec2, full_turn_deg: f32) -> BorderCheck {
        let Some(edge) = self.edge(view) else {
            return BorderCheck::Clear;
        };

        let expected = edge.expected_dir();
        if expected.dot(dir) < 0.0 {
            return BorderCheck::Prohibited;
        }

        if angle_between_deg(expected, dir) <= full_turn_deg && self.is_past_spine(&edge, fold) {
            return BorderCheck::Prohibited;
        }

        match ray_line(dir.perp(), fold, edge.a, edge.b) {
            Some(_) => BorderCheck::Collision,
            None => BorderCheck::Clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> Aabb {
        Aabb::new(Vec2::ZERO, Vec2::new(200.0, 200.0))
    }

    #[test]
    fn test_expected_dirs_point_at_spine() {
        let v = view();
        let dir = |c: BorderConstraint| c.edge(&v).unwrap().expected_dir();
        assert!((dir(BorderConstraint::Up) - Vec2::Y).length() < 1e-6);
        assert!((dir(BorderConstraint::Down) - Vec2::NEG_Y).length() < 1e-6);
        assert!((dir(BorderConstraint::Left) - Vec2::NEG_X).length() < 1e-6);
        assert!((dir(BorderConstraint::Right) - Vec2::X).length() < 1e-6);
        assert!(BorderConstraint::None.edge(&v).is_none());
    }

    #[test]
    fn test_moving_away_from_spine_is_prohibited() {
        let check = BorderConstraint::Right.check(&view(), Vec2::NEG_X, Vec2::ZERO, 1.0);
        assert_eq!(check, BorderCheck::Prohibited);
        let check = BorderConstraint::Up.check(&view(), Vec2::new(0.3, -1.0).normalize(), Vec2::ZERO, 1.0);
        assert_eq!(check, BorderCheck::Prohibited);
    }

    #[test]
    fn test_full_turn_is_prohibited() {
        let v = view();
        assert_eq!(BorderConstraint::Right.check(&v, Vec2::X, Vec2::new(99.0, 0.0), 1.0), BorderCheck::Clear);
        assert_eq!(BorderConstraint::Right.check(&v, Vec2::X, Vec2::new(100.0, 0.0), 1.0), BorderCheck::Prohibited);
        assert_eq!(BorderConstraint::Left.check(&v, Vec2::NEG_X, Vec2::new(-101.0, 0.0), 1.0), BorderCheck::Prohibited);
        assert_eq!(BorderConstraint::Down.check(&v, Vec2::NEG_Y, Vec2::new(0.0, -100.0), 1.0), BorderCheck::Prohibited);
    }

    #[test]
    fn test_tilted_fold_crossing_spine_collides() {
        let v = view();
        let dir = Vec2::new(1.0, 1.0).normalize();
        // Crease through (50, 0) perpendicular to dir meets x = 100 at y = -50
        assert_eq!(BorderConstraint::Right.check(&v, dir, Vec2::new(50.0, 0.0), 1.0), BorderCheck::Collision);
        // Far from the spine the crease misses it
        assert_eq!(BorderConstraint::Right.check(&v, dir, Vec2::new(-150.0, 0.0), 1.0), BorderCheck::Clear);
        assert_eq!(BorderConstraint::None.check(&v, dir, Vec2::new(50.0, 0.0), 1.0), BorderCheck::Clear);
    }
}
