//! Touch-driven page turn with a flat fold line
//!
//! The fold line is a straight crease computed from touch deltas and clipped
//! against the page view. Two masks (front and back) are positioned on it.

pub mod border;
pub mod controller;
pub mod mask;

pub use border::{BorderCheck, BorderConstraint, BorderEdge};
pub use controller::{
    AutoTurnMode, ControllerState, GesturePhase, MaskTurnController, MaskTurnData, TurnState,
};
pub use mask::{MaskRole, PageMask};
