//! Front and back page masks
//!
//! A mask is a clipping node placed on the fold line. Its local x axis is the
//! crease and its local -y axis points along the fold direction. The page
//! image inside it (the "view") is counter-positioned so it stays put on
//! screen (front) or appears mirrored across the crease (back).

use glam::Vec2;

use crate::{normalize_degrees, rotate_degrees};

/// Which side of the turning page a mask shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskRole {
    /// The page still lying flat
    Front,
    /// The flipped-over part of the page
    Back,
}

impl MaskRole {
    /// View rotation for a mask rotated by `angle` degrees
    pub fn view_angle(&self, angle: f32) -> f32 {
        match self {
            MaskRole::Front => -angle,
            MaskRole::Back => 180.0 + angle,
        }
    }

    /// View position inside the mask given the view's mask-local position
    pub fn view_offset(&self, local: Vec2) -> Vec2 {
        match self {
            MaskRole::Front => local,
            // Mirror across the crease
            MaskRole::Back => Vec2::new(local.x, -local.y),
        }
    }
}

/// Transform state of one mask node and its view child
#[derive(Debug, Clone, PartialEq)]
pub struct PageMask {
    pub role: MaskRole,
    /// Mask origin in the controller's node space
    pub position: Vec2,
    /// Mask rotation in degrees, counter-clockwise
    pub angle: f32,
    /// View position in mask-local space
    pub view_offset: Vec2,
    /// View rotation in degrees relative to the mask
    pub view_angle: f32,
}

impl PageMask {
    pub fn new(role: MaskRole) -> Self {
        Self {
            role,
            position: Vec2::ZERO,
            angle: 0.0,
            view_offset: Vec2::ZERO,
            view_angle: role.view_angle(0.0),
        }
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.position = pos;
    }

    /// Rotate the mask; the stored angle is kept in [0, 360)
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_degrees(angle);
        self.view_angle = self.role.view_angle(angle);
    }

    /// Convert a node-space point into this mask's local space
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        rotate_degrees(point - self.position, -self.angle)
    }

    /// Re-place the view so the page image tracks `view_pos` (node space)
    pub fn update_view_pos(&mut self, view_pos: Vec2) {
        let local = self.to_local(view_pos);
        self.view_offset = self.role.view_offset(local);
    }

    /// Node-space position of the view (after mirroring for the back mask)
    pub fn view_world_pos(&self) -> Vec2 {
        self.position + rotate_degrees(self.view_offset, self.angle)
    }
}
