//! Page Curl - page-turn simulation for a mobile mini-game
//!
//! Core modules:
//! - `geom`: Ray/segment and ray/box intersection, angle helpers
//! - `sim`: Verlet page-bend chain, θ tween, swipe-driven turn scene
//! - `turn`: Touch-driven fold-line controller with front/back masks
//! - `renderer`: Quad-strip page mesh, blend state, mesh sink seam
//! - `platform`: Touch events, node transforms, frame-budgeted work queue

pub mod config;
pub mod error;
pub mod geom;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod turn;

pub use config::{MaskTurnConfig, TurnPageConfig, VerletConfig};
pub use error::{TurnPageError, TurnPageResult};

use glam::Vec2;

/// Page-turn tuning constants
pub mod consts {
    /// Bottom-edge curve points per page (mesh has half as many quads)
    pub const CURVE_RESOLUTION: usize = 60;

    /// Verlet gravity, units per frame²
    pub const VERLET_GRAVITY: f32 = -0.6;
    /// Verlet velocity damping
    pub const VERLET_DAMPING: f32 = 0.5;
    /// Inextensibility passes per frame (dominant cost of the simulation)
    pub const RELAX_ITERATIONS: u32 = 100;
    /// Leading-edge lift at θ = 90°
    pub const PEAK_HEIGHT: f32 = 150.0;
    /// Horizontal swipe that triggers a Verlet turn
    pub const MIN_SWIPE: f32 = 20.0;
    /// θ tween duration (seconds)
    pub const TURN_DURATION: f32 = 0.5;
    /// Settling time after the tween (seconds)
    pub const HOLD_DELAY: f32 = 1.0;

    /// Touch travel before the fold direction freezes
    pub const DIRECTION_THRESHOLD: f32 = 3.0;
    /// Snap-to-border-normal angle (degrees)
    pub const VERTICAL_LOCK_DEG: f32 = 3.0;
    /// Full-turn detection angle (degrees)
    pub const FULL_TURN_DEG: f32 = 1.0;
    /// Border-correction interpolation step
    pub const CORRECTION_LERP: f32 = 0.01;
    /// Border-correction snap distance
    pub const CONVERGE_DISTANCE: f32 = 1.0;
    /// Border-correction iteration cap
    pub const MAX_CORRECTION_STEPS: u32 = 4096;
    /// Released pages past this ratio finish turning
    pub const AUTO_CONTINUE_RATIO: f32 = 0.3;
    /// Auto-turn fold travel per frame
    pub const AUTO_STEP: f32 = 20.0;
    /// Auto-turn frame cap
    pub const MAX_AUTO_STEPS: u32 = 512;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    if a >= 360.0 { 0.0 } else { a }
}

/// Rotate a vector counter-clockwise by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}
