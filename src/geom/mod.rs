//! Plane geometry for fold lines
//!
//! Pure functions only: no state, no logging.

pub mod aabb;
pub mod angle;
pub mod intersect;

pub use aabb::{Aabb, point_in_rect};
pub use angle::{angle_between_deg, rotation_from_down, signed_angle};
pub use intersect::{ray_aabb, ray_line};
