//! Page-bend simulation
//!
//! Frame-stepped and free of rendering state apart from the mesh it feeds:
//! - Verlet chain along the page's bottom edge
//! - Eased turn-angle tween
//! - Swipe-driven scene tying both to a `PageRenderer`

pub mod scene;
pub mod tween;
pub mod verlet;

pub use scene::VerletTurnScene;
pub use tween::{Easing, Tween};
pub use verlet::{PageChain, PageEdges, PointMass};
