//! Verlet page-bend chain
//!
//! The page's bottom edge is a chain of point masses. Index 0 sits on the
//! spine and never moves; the last point is driven along a fixed arc by the
//! turn angle θ. Everything in between is integrated with damped Verlet and
//! then pulled back to rest spacing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::VerletConfig;
use crate::error::{TurnPageError, TurnPageResult};

/// A Verlet point: velocity is implied by `current - previous`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointMass {
    pub current: Vec2,
    pub previous: Vec2,
}

impl PointMass {
    pub fn at(pos: Vec2) -> Self {
        Self {
            current: pos,
            previous: pos,
        }
    }
}

/// Page rectangle in node space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageEdges {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl PageEdges {
    /// Edges of a node with the given content size and anchor
    pub fn from_size_anchor(size: Vec2, anchor: Vec2) -> Self {
        let origin = -anchor * size;
        Self {
            left: origin.x,
            bottom: origin.y,
            right: origin.x + size.x,
            top: origin.y + size.y,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Chain of point masses along the page's bottom edge
#[derive(Debug, Clone)]
pub struct PageChain {
    points: Vec<PointMass>,
    edges: PageEdges,
    gravity: f32,
    damping: f32,
    iterations: u32,
    peak_height: f32,
}

impl PageChain {
    /// New flat front-facing chain with `rung_count` points
    pub fn new(edges: PageEdges, rung_count: usize, config: &VerletConfig) -> TurnPageResult<Self> {
        if rung_count < 2 {
            return Err(TurnPageError::InvalidConfiguration(format!(
                "page chain needs at least 2 points, got {rung_count}"
            )));
        }
        check_edges(&edges)?;

        let mut chain = Self {
            points: vec![PointMass::default(); rung_count],
            edges,
            gravity: config.gravity,
            damping: config.damping,
            iterations: config.iterations,
            peak_height: config.peak_height,
        };
        chain.rebuild(true);
        Ok(chain)
    }

    /// Lay the chain flat along the bottom edge
    ///
    /// A front chain extends right of the spine, a back chain (the page
    /// already turned over) extends left of it.
    pub fn rebuild(&mut self, front: bool) {
        let sign = if front { 1.0 } else { -1.0 };
        let spacing = self.rest_spacing() * sign;
        let (left, bottom) = (self.edges.left, self.edges.bottom);
        for (i, point) in self.points.iter_mut().enumerate() {
            *point = PointMass::at(Vec2::new(left + i as f32 * spacing, bottom));
        }
    }

    /// Adopt a new page rectangle and lay the chain flat on it
    pub fn resize(&mut self, edges: PageEdges, front: bool) -> TurnPageResult<()> {
        check_edges(&edges)?;
        self.edges = edges;
        self.rebuild(front);
        Ok(())
    }

    /// Distance between neighbouring points at rest
    pub fn rest_spacing(&self) -> f32 {
        self.edges.width() / (self.points.len() - 1) as f32
    }

    /// Where the leading edge sits for turn angle `theta` (degrees)
    pub fn end_target(&self, theta: f32) -> Vec2 {
        let width = self.edges.width();
        Vec2::new(
            self.edges.right - theta / 180.0 * 2.0 * width,
            self.edges.bottom + theta.to_radians().sin() * self.peak_height,
        )
    }

    /// Pin the leading edge to its target for `theta`
    pub fn drive_end(&mut self, theta: f32) {
        let target = self.end_target(theta);
        if let Some(end) = self.points.last_mut() {
            end.current = target;
        }
    }

    /// Damped Verlet step for the free interior points
    pub fn integrate(&mut self) {
        let count = self.points.len();
        if count < 3 {
            return;
        }
        let bottom = self.edges.bottom;
        for point in self.points[1..count - 1].iter_mut().rev() {
            let velocity = (point.current - point.previous) * self.damping;
            // Resting on the table
            let gravity = if point.current.y <= bottom { 0.0 } else { self.gravity };
            point.previous = point.current;
            point.current += velocity + Vec2::new(0.0, gravity);
        }
    }

    /// Restore rest spacing, walking from the leading edge to the spine
    pub fn relax(&mut self, theta: f32) {
        let rest = self.rest_spacing();
        for _ in 0..self.iterations {
            self.drive_end(theta);
            for j in (1..self.points.len()).rev() {
                let delta = self.points[j].current - self.points[j - 1].current;
                let length = delta.length();
                if length <= f32::EPSILON {
                    continue;
                }
                let correction = delta / length * (length - rest) * 0.5;
                if j == 1 {
                    // Spine is pinned, the neighbour takes the full correction
                    self.points[1].current -= correction * 2.0;
                } else {
                    self.points[j - 1].current += correction;
                    self.points[j].current -= correction;
                }
            }
        }
    }

    /// One frame at turn angle `theta`
    pub fn step(&mut self, theta: f32) {
        self.drive_end(theta);
        self.integrate();
        self.relax(theta);
    }

    /// Current positions, spine first
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.points.iter().map(|p| p.current)
    }

    /// Copy current positions into `out`, reusing its allocation
    pub fn write_positions(&self, out: &mut Vec<Vec2>) {
        out.clear();
        out.extend(self.positions());
    }

    pub fn points(&self) -> &[PointMass] {
        &self.points
    }

    pub fn edges(&self) -> &PageEdges {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn check_edges(edges: &PageEdges) -> TurnPageResult<()> {
    if edges.width() <= 0.0 || edges.height() <= 0.0 {
        return Err(TurnPageError::InvalidConfiguration(format!(
            "page size must be positive, got {}x{}",
            edges.width(),
            edges.height()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TurnPageConfig;
    use proptest::prelude::*;

    fn edges() -> PageEdges {
        PageEdges::from_size_anchor(Vec2::new(400.0, 300.0), Vec2::ZERO)
    }

    fn spacing_error(chain: &PageChain) -> f32 {
        let rest = chain.rest_spacing();
        chain
            .points()
            .windows(2)
            .map(|w| ((w[1].current - w[0].current).length() - rest).abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_rejects_degenerate_chains() {
        let config = VerletConfig::default();
        assert!(PageChain::new(edges(), 1, &config).is_err());
        let flat = PageEdges::from_size_anchor(Vec2::new(0.0, 300.0), Vec2::ZERO);
        assert!(PageChain::new(flat, 5, &config).is_err());
    }

    #[test]
    fn test_rebuild_front_and_back() {
        let mut chain = PageChain::new(edges(), 5, &VerletConfig::default()).unwrap();
        let xs: Vec<f32> = chain.positions().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 100.0, 200.0, 300.0, 400.0]);

        chain.rebuild(false);
        let xs: Vec<f32> = chain.positions().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, -100.0, -200.0, -300.0, -400.0]);
    }

    #[test]
    fn test_resize_rescales_spacing() {
        let mut chain = PageChain::new(edges(), 5, &VerletConfig::default()).unwrap();
        let narrow = PageEdges::from_size_anchor(Vec2::new(200.0, 300.0), Vec2::ZERO);
        chain.resize(narrow, false).unwrap();
        assert_eq!(chain.rest_spacing(), 50.0);
        assert_eq!(chain.positions().last(), Some(Vec2::new(-200.0, 0.0)));
        assert!((chain.end_target(180.0) - Vec2::new(-200.0, 0.0)).length() < 1e-3);

        let flat = PageEdges::from_size_anchor(Vec2::new(200.0, 0.0), Vec2::ZERO);
        assert!(chain.resize(flat, true).is_err());
        assert_eq!(chain.edges(), &narrow);
    }

    #[test]
    fn test_end_target_arc() {
        let chain = PageChain::new(edges(), 5, &VerletConfig::default()).unwrap();
        assert_eq!(chain.end_target(0.0), Vec2::new(400.0, 0.0));
        let mid = chain.end_target(90.0);
        assert!((mid - Vec2::new(0.0, 150.0)).length() < 1e-3);
        let end = chain.end_target(180.0);
        assert!((end - Vec2::new(-400.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_flat_chain_stays_flat() {
        let mut chain = PageChain::new(edges(), 9, &VerletConfig::default()).unwrap();
        let before: Vec<Vec2> = chain.positions().collect();
        chain.step(0.0);
        for (a, b) in before.iter().zip(chain.positions()) {
            assert!((*a - b).length() < 1e-3);
        }
    }

    #[test]
    fn test_full_turn_settles_at_rest_spacing() {
        // 5 masses, spine at the origin, driven 0 -> 180 over half a second
        let config = VerletConfig::default();
        let mut chain = PageChain::new(edges(), 5, &config).unwrap();
        let dt = 1.0 / 60.0;
        let mut t = 0.0;
        for _ in 0..90 {
            t += dt;
            let u = (t / config.turn_duration).min(1.0);
            chain.step(180.0 * u * (2.0 - u));
        }

        assert!(spacing_error(&chain) < 0.5, "spacing error {}", spacing_error(&chain));
        let end = chain.positions().last().unwrap();
        assert!((end - Vec2::new(-400.0, 0.0)).length() < 0.5, "end at {end:?}");
        assert_eq!(chain.points()[0].current, Vec2::ZERO);
    }

    #[test]
    fn test_default_resolution_settles_at_rest_spacing() {
        let config = TurnPageConfig::default();
        let mut chain = PageChain::new(edges(), config.rung_count(), &config.verlet).unwrap();
        assert_eq!(chain.len(), 31);
        let dt = 1.0 / 60.0;
        let mut t = 0.0;
        // Turn plus the settling hold
        for _ in 0..90 {
            t += dt;
            let u = (t / config.verlet.turn_duration).min(1.0);
            chain.step(180.0 * config.verlet.easing.apply(u));
        }

        assert!(spacing_error(&chain) < 0.5, "spacing error {}", spacing_error(&chain));
        let end = chain.positions().last().unwrap();
        assert!((end - Vec2::new(-400.0, 0.0)).length() < 0.5, "end at {end:?}");
    }

    #[test]
    fn test_lifted_points_fall() {
        let mut chain = PageChain::new(edges(), 5, &VerletConfig::default()).unwrap();
        chain.points[2] = PointMass::at(Vec2::new(200.0, 50.0));
        chain.integrate();
        assert!(chain.points()[2].current.y < 50.0);
        // Points on the table feel no gravity
        assert_eq!(chain.points()[1].current, Vec2::new(100.0, 0.0));
    }

    proptest! {
        #[test]
        fn spine_never_moves(angles in prop::collection::vec(0.0f32..=180.0, 1..20), front in any::<bool>()) {
            let mut chain = PageChain::new(edges(), 7, &VerletConfig::default()).unwrap();
            chain.rebuild(front);
            let spine = chain.points()[0].current;
            for theta in angles {
                chain.step(theta);
                prop_assert_eq!(chain.points()[0].current, spine);
                prop_assert!(chain.positions().all(|p| p.is_finite()));
            }
        }
    }
}
