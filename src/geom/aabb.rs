//! Axis-aligned rectangles described by center and size

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in node space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half_size().x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half_size().x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_size().y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_size().y
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }

    /// Top edge, left to right
    pub fn up_edge(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.top()),
        )
    }

    /// Bottom edge, left to right
    pub fn down_edge(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.left(), self.bottom()),
            Vec2::new(self.right(), self.bottom()),
        )
    }

    /// Left edge, top to bottom
    pub fn left_edge(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.left(), self.bottom()),
        )
    }

    /// Right edge, top to bottom
    pub fn right_edge(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.right(), self.bottom()),
        )
    }
}

/// Check whether a point lies inside a rectangle given by center and size
#[inline]
pub fn point_in_rect(point: Vec2, center: Vec2, width: f32, height: f32) -> bool {
    Aabb::new(center, Vec2::new(width, height)).contains(point)
}
