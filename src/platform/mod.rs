//! Platform abstraction layer
//!
//! The host engine owns input dispatch, node transforms and the frame clock.
//! This module describes what the page-turn core needs from it:
//! - Touch events in node-local coordinates
//! - Node transforms (local/world conversion, size, anchor)
//! - A frame-budgeted work queue for spreading work over frames

pub mod work_queue;

pub use work_queue::{FrameClock, FrameWorkQueue};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single-pointer touch event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Start { pos: Vec2 },
    Move { pos: Vec2, delta: Vec2 },
    End,
    Cancel,
}

impl TouchEvent {
    /// Same event with its position mapped through `f` (deltas are rotation-free)
    pub fn map_pos(self, f: impl Fn(Vec2) -> Vec2) -> Self {
        match self {
            TouchEvent::Start { pos } => TouchEvent::Start { pos: f(pos) },
            TouchEvent::Move { pos, delta } => TouchEvent::Move { pos: f(pos), delta },
            other => other,
        }
    }
}

/// Node transform queries supplied by the host engine
pub trait TransformProvider {
    /// Content size of the node
    fn size(&self) -> Vec2;
    /// Anchor point, (0,0) = bottom-left, (1,1) = top-right
    fn anchor(&self) -> Vec2;
    /// Translation part of the node's world matrix
    fn world_translation(&self) -> Vec2;
    /// World point to node space (relative to the anchor point)
    fn to_node_space(&self, world: Vec2) -> Vec2;
    /// Node-space point (relative to the anchor point) to world space
    fn to_world_space(&self, local: Vec2) -> Vec2;
}

/// Translation-only node transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    /// World position of the anchor point
    pub position: Vec2,
    pub size: Vec2,
    pub anchor: Vec2,
}

impl NodeTransform {
    pub fn new(position: Vec2, size: Vec2, anchor: Vec2) -> Self {
        Self {
            position,
            size,
            anchor,
        }
    }

    /// Node anchored at its center
    pub fn centered(position: Vec2, size: Vec2) -> Self {
        Self::new(position, size, Vec2::splat(0.5))
    }
}

impl TransformProvider for NodeTransform {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn anchor(&self) -> Vec2 {
        self.anchor
    }

    fn world_translation(&self) -> Vec2 {
        self.position
    }

    fn to_node_space(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    fn to_world_space(&self, local: Vec2) -> Vec2 {
        local + self.position
    }
}
