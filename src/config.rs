//! Page-turn tuning
//!
//! Passed explicitly to every controller; can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{TurnPageError, TurnPageResult};
use crate::sim::tween::Easing;

/// Verlet chain and swipe-trigger parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerletConfig {
    /// Downward acceleration applied per frame (negative = down)
    pub gravity: f32,
    /// Velocity retained per frame (0..1)
    pub damping: f32,
    /// Constraint relaxation passes per frame
    pub iterations: u32,
    /// Height of the leading edge at θ = 90°
    pub peak_height: f32,
    /// Horizontal swipe distance that starts a turn
    pub min_swipe: f32,
    /// Duration of the θ tween (seconds)
    pub turn_duration: f32,
    /// Time the simulation keeps settling after the tween (seconds)
    pub hold_delay: f32,
    /// Easing curve for θ
    pub easing: Easing,
}

impl Default for VerletConfig {
    fn default() -> Self {
        Self {
            gravity: VERLET_GRAVITY,
            damping: VERLET_DAMPING,
            iterations: RELAX_ITERATIONS,
            peak_height: PEAK_HEIGHT,
            min_swipe: MIN_SWIPE,
            turn_duration: TURN_DURATION,
            hold_delay: HOLD_DELAY,
            easing: Easing::QuadOut,
        }
    }
}

/// Interactive mask-turn parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskTurnConfig {
    /// Touch travel before the direction is frozen
    pub direction_threshold: f32,
    /// Within this many degrees of the border normal the direction snaps to it
    pub vertical_lock_deg: f32,
    /// Angle tolerance for the "page fully turned" check
    pub full_turn_deg: f32,
    /// Interpolation step for direction and position correction
    pub lerp_step: f32,
    /// Distance at which the corrected position snaps to its target
    pub converge_distance: f32,
    /// Upper bound on correction iterations per move
    pub max_correction_steps: u32,
    /// Finish or undo a partial turn automatically on release
    pub auto_complete: bool,
    /// Turn ratio above which a released page continues instead of resuming
    pub auto_continue_ratio: f32,
    /// Fold travel per auto-turn frame
    pub auto_step: f32,
    /// Upper bound on auto-turn frames
    pub max_auto_steps: u32,
}

impl Default for MaskTurnConfig {
    fn default() -> Self {
        Self {
            direction_threshold: DIRECTION_THRESHOLD,
            vertical_lock_deg: VERTICAL_LOCK_DEG,
            full_turn_deg: FULL_TURN_DEG,
            lerp_step: CORRECTION_LERP,
            converge_distance: CONVERGE_DISTANCE,
            max_correction_steps: MAX_CORRECTION_STEPS,
            auto_complete: false,
            auto_continue_ratio: AUTO_CONTINUE_RATIO,
            auto_step: AUTO_STEP,
            max_auto_steps: MAX_AUTO_STEPS,
        }
    }
}

/// Complete page-turn configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnPageConfig {
    /// Number of bottom-edge curve points; the mesh has `curve_resolution / 2` quads
    pub curve_resolution: usize,
    pub verlet: VerletConfig,
    pub mask: MaskTurnConfig,
}

impl Default for TurnPageConfig {
    fn default() -> Self {
        Self {
            curve_resolution: CURVE_RESOLUTION,
            verlet: VerletConfig::default(),
            mask: MaskTurnConfig::default(),
        }
    }
}

impl TurnPageConfig {
    /// Coarse mesh and fewer relaxation passes for low-end devices
    pub fn low_power() -> Self {
        let mut config = Self::default();
        config.curve_resolution = 20;
        config.verlet.iterations = 40;
        config
    }

    /// Config with a specific curve resolution
    pub fn with_resolution(curve_resolution: usize) -> Self {
        Self {
            curve_resolution,
            ..Default::default()
        }
    }

    /// Quads in the page strip
    pub fn quad_count(&self) -> usize {
        self.curve_resolution / 2
    }

    /// Rungs (point masses) in the page strip
    pub fn rung_count(&self) -> usize {
        self.quad_count() + 1
    }

    /// Check that the values can drive a simulation
    pub fn validate(&self) -> TurnPageResult<()> {
        if self.curve_resolution < 2 || self.curve_resolution % 2 != 0 {
            return Err(TurnPageError::InvalidConfiguration(format!(
                "curve_resolution must be an even number >= 2, got {}",
                self.curve_resolution
            )));
        }
        if self.verlet.iterations == 0 {
            return Err(TurnPageError::InvalidConfiguration(
                "verlet.iterations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.verlet.damping) {
            return Err(TurnPageError::InvalidConfiguration(format!(
                "verlet.damping must be within 0..=1, got {}",
                self.verlet.damping
            )));
        }
        if self.verlet.turn_duration < 0.0 || self.verlet.hold_delay < 0.0 {
            return Err(TurnPageError::InvalidConfiguration(
                "verlet durations must not be negative".into(),
            ));
        }
        if self.mask.lerp_step <= 0.0 || self.mask.lerp_step > 1.0 {
            return Err(TurnPageError::InvalidConfiguration(format!(
                "mask.lerp_step must be within (0, 1], got {}",
                self.mask.lerp_step
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> TurnPageResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded page-turn config (resolution {}, {} relaxation passes)",
            config.curve_resolution,
            config.verlet.iterations
        );
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> TurnPageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
