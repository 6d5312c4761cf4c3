//! Interactive fold-line controller
//!
//! Touch input drives a per-gesture state machine:
//! idle -> tracking (no direction yet) -> folding (direction frozen) ->
//! optionally prohibited, and back to idle on release.

use glam::Vec2;

use super::border::{BorderCheck, BorderConstraint};
use super::mask::{MaskRole, PageMask};
use crate::config::MaskTurnConfig;
use crate::error::TurnPageError;
use crate::geom::{Aabb, angle_between_deg, ray_aabb, rotation_from_down, signed_angle};
use crate::platform::{TouchEvent, TransformProvider};
use crate::renderer::TextureHandle;

/// Minimum number of page images a turn needs (front and back)
const MIN_PAGES: usize = 2;

/// Whether the controller reacts to touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Stopped,
    Active,
}

/// Where the current gesture is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No touch inside the view yet
    Idle,
    /// Start point recorded, direction not yet decided
    Tracking,
    /// Direction frozen, fold line following the finger
    Folding,
    /// Gesture locked until release
    Prohibited,
}

/// Per-gesture state, cleared on release
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnState {
    pub start_point: Option<Vec2>,
    pub current_point: Option<Vec2>,
    /// Unit fold direction, frozen once the touch has travelled far enough
    pub move_dir: Option<Vec2>,
    /// A point on the fold line
    pub fold_point: Option<Vec2>,
    pub prohibited: bool,
    /// Rough turn progress in 0..=1: near 0 while the fold trails the view
    /// center, 1 once it has passed it
    pub turn_ratio: f32,
}

impl TurnState {
    pub fn phase(&self) -> GesturePhase {
        if self.prohibited {
            GesturePhase::Prohibited
        } else if self.move_dir.is_some() {
            GesturePhase::Folding
        } else if self.start_point.is_some() {
            GesturePhase::Tracking
        } else {
            GesturePhase::Idle
        }
    }
}

/// Page images and spine for a turn
#[derive(Debug, Clone, PartialEq)]
pub struct MaskTurnData {
    pub pages: Vec<TextureHandle>,
    pub border: BorderConstraint,
}

impl MaskTurnData {
    pub fn new(pages: Vec<TextureHandle>, border: BorderConstraint) -> Self {
        Self { pages, border }
    }
}

/// Automatic finish of a released page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoTurnMode {
    /// Keep turning in the gesture's direction
    Continue,
    /// Fall back to where the gesture started
    Resume,
}

#[derive(Debug, Clone, Copy)]
struct AutoTurn {
    mode: AutoTurnMode,
    /// Resume travels against the direction frozen at release
    resume_dir: Vec2,
    steps: u32,
}

/// Touch-driven page turn with front/back masks
#[derive(Debug, Clone)]
pub struct MaskTurnController {
    config: MaskTurnConfig,
    /// Page view rectangle in node space
    view: Aabb,
    data: Option<MaskTurnData>,
    state: ControllerState,
    gesture: TurnState,
    front: PageMask,
    back: PageMask,
    auto_turn: Option<AutoTurn>,
}

impl MaskTurnController {
    pub fn new(view: Aabb, config: MaskTurnConfig) -> Self {
        Self {
            config,
            view,
            data: None,
            state: ControllerState::Stopped,
            gesture: TurnState::default(),
            front: PageMask::new(MaskRole::Front),
            back: PageMask::new(MaskRole::Back),
            auto_turn: None,
        }
    }

    pub fn init_data(&mut self, data: MaskTurnData) {
        self.data = Some(data);
    }

    /// Start listening for touches; refuses without at least two pages
    pub fn start_up(&mut self) -> bool {
        let provided = self.data.as_ref().map_or(0, |d| d.pages.len());
        if provided < MIN_PAGES {
            let err = TurnPageError::MissingPageData {
                required: MIN_PAGES,
                provided,
            };
            log::error!("Mask page turn not started: {err}");
            return false;
        }
        self.state = ControllerState::Active;
        log::debug!("Mask page turn started with {provided} pages");
        true
    }

    pub fn stop(&mut self) {
        self.state = ControllerState::Stopped;
        self.clear();
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ControllerState::Active
    }

    pub fn gesture(&self) -> &TurnState {
        &self.gesture
    }

    pub fn front_mask(&self) -> &PageMask {
        &self.front
    }

    pub fn back_mask(&self) -> &PageMask {
        &self.back
    }

    pub fn view(&self) -> &Aabb {
        &self.view
    }

    pub fn set_view(&mut self, view: Aabb) {
        self.view = view;
    }

    pub fn border(&self) -> BorderConstraint {
        self.data.as_ref().map_or(BorderConstraint::None, |d| d.border)
    }

    pub fn is_auto_turning(&self) -> bool {
        self.auto_turn.is_some()
    }

    /// Feed a touch event in node-local coordinates
    pub fn handle_touch(&mut self, event: TouchEvent) {
        if !self.is_active() {
            log::debug!("Touch {event:?} ignored: mask page turn is stopped");
            return;
        }
        if self.auto_turn.is_some() {
            log::debug!("Touch {event:?} ignored while auto turning");
            return;
        }

        match event {
            TouchEvent::Start { pos } => self.set_start_point(pos),
            TouchEvent::Move { pos, delta } => {
                if self.gesture.prohibited {
                    return;
                }
                self.gesture.current_point = Some(pos);
                self.set_start_point(pos);
                self.apply_move(delta);
            }
            TouchEvent::End | TouchEvent::Cancel => self.release(),
        }
    }

    /// Feed a touch event in world coordinates
    pub fn handle_world_touch(&mut self, event: TouchEvent, node: &impl TransformProvider) {
        self.handle_touch(event.map_pos(|p| node.to_node_space(p)));
    }

    /// Keep the page images anchored to the view (call once per frame)
    pub fn late_update(&mut self) {
        if !self.is_active() {
            log::debug!("Late update ignored: mask page turn is stopped");
            return;
        }
        let view_pos = self.view.center;
        self.front.update_view_pos(view_pos);
        self.back.update_view_pos(view_pos);
    }

    /// Advance an automatic finish by one frame
    pub fn update(&mut self, _dt: f32) {
        if !self.is_active() {
            log::debug!("Update ignored: mask page turn is stopped");
            return;
        }
        let Some(mut auto) = self.auto_turn.take() else {
            return;
        };
        let (Some(dir), Some(fold)) = (self.gesture.move_dir, self.gesture.fold_point) else {
            self.clear();
            return;
        };

        let travel = match auto.mode {
            AutoTurnMode::Continue => dir,
            AutoTurnMode::Resume => auto.resume_dir,
        };
        let crease_in_view = ray_aabb(travel.perp(), fold, &self.view).is_some();
        if !crease_in_view || self.gesture.prohibited || auto.steps >= self.config.max_auto_steps {
            log::debug!("Auto turn ({:?}) finished after {} steps", auto.mode, auto.steps);
            self.clear();
            return;
        }

        self.apply_move(travel * self.config.auto_step);
        auto.steps += 1;
        self.auto_turn = Some(auto);
    }

    fn release(&mut self) {
        let ratio = self.gesture.turn_ratio;
        if self.config.auto_complete && ratio > 0.0 && !self.gesture.prohibited {
            if let Some(dir) = self.gesture.move_dir {
                let mode = if ratio > self.config.auto_continue_ratio {
                    AutoTurnMode::Continue
                } else {
                    AutoTurnMode::Resume
                };
                log::debug!("Page released at ratio {ratio:.2}, auto turn {mode:?}");
                self.auto_turn = Some(AutoTurn {
                    mode,
                    resume_dir: -dir,
                    steps: 0,
                });
                return;
            }
        }
        self.clear();
    }

    fn clear(&mut self) {
        self.gesture = TurnState::default();
        self.auto_turn = None;
    }

    /// Record the gesture's start point once, if it lies inside the view
    fn set_start_point(&mut self, pos: Vec2) {
        if self.gesture.start_point.is_none() && self.view.contains(pos) {
            self.gesture.start_point = Some(pos);
        }
    }

    fn apply_move(&mut self, delta: Vec2) {
        let Some(start) = self.gesture.start_point else {
            return;
        };
        if self.gesture.prohibited {
            return;
        }

        if self.gesture.move_dir.is_none() && !self.try_commit_direction(start) {
            return;
        }
        let (Some(mut dir), Some(origin)) = (self.gesture.move_dir, self.gesture.fold_point) else {
            return;
        };

        let border = self.border();
        let mut fold = origin;
        let mut d_move = half_projection(dir, delta);

        if border == BorderConstraint::None {
            fold += d_move;
        } else {
            let Some(edge) = border.edge(&self.view) else {
                return;
            };
            let expected = edge.expected_dir();
            let step = self.config.lerp_step;
            let mut applied = Vec2::ZERO;
            let mut locked = false;

            for _ in 0..self.config.max_correction_steps {
                let check = border.check(&self.view, dir, fold, self.config.full_turn_deg);
                if check == BorderCheck::Prohibited {
                    log::debug!("Fold reached the spine, gesture locked");
                    self.gesture.prohibited = true;
                    fold = origin;
                    break;
                }
                let collided = check == BorderCheck::Collision;

                // Swing the crease toward the spine until it runs parallel
                if collided && !locked {
                    if angle_between_deg(dir, expected) < self.config.vertical_lock_deg {
                        dir = expected;
                        locked = true;
                    } else {
                        let turned = dir.lerp(expected, step).normalize_or_zero();
                        dir = if turned == Vec2::ZERO { expected } else { turned };
                    }
                    d_move = half_projection(dir, delta);
                    applied = Vec2::ZERO;
                }

                if locked && collided {
                    fold = origin;
                    break;
                }
                // Only stop on a position that passed the check
                if !collided && applied == d_move {
                    break;
                }

                // Ease toward the uncollided target
                if !collided {
                    if (applied - d_move).length() < self.config.converge_distance {
                        applied = d_move;
                    } else {
                        applied = applied.lerp(d_move, step);
                    }
                    fold = origin + applied;
                }
            }
        }

        self.gesture.move_dir = Some(dir);
        self.gesture.fold_point = Some(fold);
        self.place_masks(fold, dir);
        self.update_turn_ratio();
    }

    /// Freeze the fold direction once the touch has moved far enough
    ///
    /// Returns false while the direction is still undecided or when the
    /// gesture got locked.
    fn try_commit_direction(&mut self, start: Vec2) -> bool {
        let Some(current) = self.gesture.current_point else {
            return false;
        };
        let offset = current - start;
        if offset.length() < self.config.direction_threshold {
            return false;
        }

        let dir = offset.normalize();
        // Anchor the gesture on the grabbed edge, behind the finger
        let anchored = ray_aabb(-dir, start, &self.view).unwrap_or(start);
        self.gesture.start_point = Some(anchored);
        let fold = (anchored + current) * 0.5;

        let check = self
            .border()
            .check(&self.view, dir, fold, self.config.full_turn_deg);
        if check != BorderCheck::Clear {
            log::debug!("Gesture along {dir:?} rejected by spine ({check:?})");
            self.gesture.prohibited = true;
            return false;
        }

        self.gesture.move_dir = Some(dir);
        self.gesture.fold_point = Some(fold);
        true
    }

    fn place_masks(&mut self, fold: Vec2, dir: Vec2) {
        let rotation = rotation_from_down(dir);
        for mask in [&mut self.front, &mut self.back] {
            mask.set_pos(fold);
            mask.set_angle(rotation);
        }
    }

    fn update_turn_ratio(&mut self) {
        let (Some(dir), Some(fold)) = (self.gesture.move_dir, self.gesture.fold_point) else {
            return;
        };
        let to_center = self.view.center - fold;
        self.gesture.turn_ratio = signed_angle(dir, to_center).abs().to_degrees() / 180.0;
    }
}

/// Half the touch delta projected onto the fold direction
#[inline]
fn half_projection(dir: Vec2, delta: Vec2) -> Vec2 {
    dir * (dir.dot(delta) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> Aabb {
        Aabb::new(Vec2::ZERO, Vec2::new(200.0, 200.0))
    }

    fn controller(border: BorderConstraint) -> MaskTurnController {
        let mut c = MaskTurnController::new(view(), MaskTurnConfig::default());
        c.init_data(MaskTurnData::new(vec![TextureHandle(1), TextureHandle(2)], border));
        assert!(c.start_up());
        c
    }

    /// Drive a drag from `from` through `to` in `steps` equal moves
    fn drag(c: &mut MaskTurnController, from: Vec2, to: Vec2, steps: u32) {
        c.handle_touch(TouchEvent::Start { pos: from });
        let delta = (to - from) / steps as f32;
        let mut pos = from;
        for _ in 0..steps {
            pos += delta;
            c.handle_touch(TouchEvent::Move { pos, delta });
        }
    }

    #[test]
    fn test_start_up_requires_two_pages() {
        let mut c = MaskTurnController::new(view(), MaskTurnConfig::default());
        assert!(!c.start_up());
        assert_eq!(c.state(), ControllerState::Stopped);

        c.init_data(MaskTurnData::new(vec![TextureHandle(1)], BorderConstraint::None));
        assert!(!c.start_up());
        assert!(!c.is_active());

        // Touches are ignored while stopped
        c.handle_touch(TouchEvent::Start { pos: Vec2::ZERO });
        assert_eq!(c.gesture().phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_start_outside_view_is_ignored() {
        let mut c = controller(BorderConstraint::None);
        c.handle_touch(TouchEvent::Start {
            pos: Vec2::new(150.0, 0.0),
        });
        assert_eq!(c.gesture().phase(), GesturePhase::Idle);

        // A move that enters the view records the start there
        c.handle_touch(TouchEvent::Move {
            pos: Vec2::new(90.0, 0.0),
            delta: Vec2::new(-60.0, 0.0),
        });
        assert_eq!(c.gesture().start_point, Some(Vec2::new(90.0, 0.0)));
        assert_eq!(c.gesture().phase(), GesturePhase::Tracking);
    }

    #[test]
    fn test_direction_freezes_after_threshold() {
        let mut c = controller(BorderConstraint::None);
        c.handle_touch(TouchEvent::Start { pos: Vec2::ZERO });
        c.handle_touch(TouchEvent::Move {
            pos: Vec2::new(2.0, 0.0),
            delta: Vec2::new(2.0, 0.0),
        });
        assert_eq!(c.gesture().phase(), GesturePhase::Tracking);
        assert!(c.gesture().move_dir.is_none());

        c.handle_touch(TouchEvent::Move {
            pos: Vec2::new(5.0, 0.0),
            delta: Vec2::new(3.0, 0.0),
        });
        let g = c.gesture();
        assert_eq!(g.phase(), GesturePhase::Folding);
        assert_eq!(g.move_dir, Some(Vec2::X));
        // The crease ray still exits through the right edge
        assert_eq!(ray_aabb(Vec2::X, Vec2::ZERO, c.view()), Some(Vec2::new(100.0, 0.0)));
        // Start re-anchored on the grabbed (left) edge, crease halfway to the finger
        assert_eq!(g.start_point, Some(Vec2::new(-100.0, 0.0)));
        assert_eq!(g.fold_point, Some(Vec2::new(-46.0, 0.0)));
        assert_eq!(g.turn_ratio, 0.0);

        // Direction stays frozen even if the finger turns
        c.handle_touch(TouchEvent::Move {
            pos: Vec2::new(5.0, 30.0),
            delta: Vec2::new(0.0, 30.0),
        });
        assert_eq!(c.gesture().move_dir, Some(Vec2::X));
    }

    #[test]
    fn test_fold_moves_at_half_speed_along_direction() {
        let mut c = controller(BorderConstraint::None);
        drag(&mut c, Vec2::ZERO, Vec2::new(-10.0, 0.0), 2);
        let before = c.gesture().fold_point.unwrap();

        c.handle_touch(TouchEvent::Move {
            pos: Vec2::new(-30.0, 8.0),
            delta: Vec2::new(-20.0, 8.0),
        });
        let after = c.gesture().fold_point.unwrap();
        assert!(((after - before) - Vec2::new(-10.0, 0.0)).length() < 1e-4);

        // Masks follow the fold, rotated for a leftward fold
        assert_eq!(c.front_mask().position, after);
        assert_eq!(c.back_mask().position, after);
        assert!((c.front_mask().angle - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_release_clears_gesture() {
        let mut c = controller(BorderConstraint::None);
        drag(&mut c, Vec2::ZERO, Vec2::new(-40.0, 0.0), 4);
        assert_eq!(c.gesture().phase(), GesturePhase::Folding);

        c.handle_touch(TouchEvent::Cancel);
        assert_eq!(c.gesture(), &TurnState::default());

        drag(&mut c, Vec2::ZERO, Vec2::new(-40.0, 0.0), 4);
        c.handle_touch(TouchEvent::End);
        assert_eq!(c.gesture().phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_gesture_away_from_spine_is_prohibited() {
        let mut c = controller(BorderConstraint::Right);
        drag(&mut c, Vec2::ZERO, Vec2::new(-5.0, 0.0), 1);
        let g = c.gesture();
        assert!(g.prohibited);
        assert_eq!(g.phase(), GesturePhase::Prohibited);
        assert!(g.move_dir.is_none());
        assert!(g.fold_point.is_none());

        // Further moves change nothing
        c.handle_touch(TouchEvent::Move {
            pos: Vec2::new(40.0, 0.0),
            delta: Vec2::new(45.0, 0.0),
        });
        assert!(c.gesture().fold_point.is_none());
        assert!(c.gesture().prohibited);

        // Release unlocks the next gesture
        c.handle_touch(TouchEvent::End);
        assert!(!c.gesture().prohibited);
    }

    #[test]
    fn test_fold_stops_at_spine() {
        let mut c = controller(BorderConstraint::Right);
        drag(&mut c, Vec2::new(-90.0, 0.0), Vec2::new(-84.0, 0.0), 1);
        assert_eq!(c.gesture().move_dir, Some(Vec2::X));

        for _ in 0..40 {
            c.handle_touch(TouchEvent::Move {
                pos: Vec2::new(0.0, 0.0),
                delta: Vec2::new(20.0, 0.0),
            });
        }
        let g = c.gesture();
        assert!(g.prohibited);
        assert!(g.fold_point.unwrap().x <= 100.0);
    }

    #[test]
    fn test_tilted_fold_swings_toward_spine_normal() {
        let mut c = controller(BorderConstraint::Right);
        let dir = Vec2::from_angle(10f32.to_radians());
        c.handle_touch(TouchEvent::Start {
            pos: Vec2::new(-50.0, -10.0),
        });
        c.handle_touch(TouchEvent::Move {
            pos: Vec2::new(-50.0, -10.0) + dir * 6.0,
            delta: dir * 6.0,
        });
        assert!(c.gesture().move_dir.is_some());

        let mut min_angle = f32::MAX;
        for _ in 0..40 {
            if c.gesture().prohibited {
                break;
            }
            c.handle_touch(TouchEvent::Move {
                pos: Vec2::ZERO,
                delta: dir * 20.0,
            });
            if let Some(d) = c.gesture().move_dir {
                min_angle = min_angle.min(angle_between_deg(d, Vec2::X));
            }
        }
        assert!(min_angle < 9.0, "direction never swung toward the spine: {min_angle}");
        let fold = c.gesture().fold_point.unwrap();
        assert!(fold.x <= 100.0 + 1e-3);
    }

    #[test]
    fn test_turn_ratio_grows_as_fold_passes_center() {
        let mut c = controller(BorderConstraint::None);
        drag(&mut c, Vec2::new(90.0, 0.0), Vec2::new(80.0, 0.0), 2);
        // Crease starts between the grabbed right edge and the finger
        assert_eq!(c.gesture().start_point, Some(Vec2::new(100.0, 0.0)));
        assert_eq!(c.gesture().fold_point, Some(Vec2::new(87.5, 0.0)));
        assert_eq!(c.gesture().turn_ratio, 0.0);

        let mut last = 0.0;
        for _ in 0..20 {
            c.handle_touch(TouchEvent::Move {
                pos: Vec2::ZERO,
                delta: Vec2::new(-20.0, 0.0),
            });
            let g = c.gesture();
            assert!(g.turn_ratio >= last);
            if g.fold_point.unwrap().x > 0.0 {
                assert_eq!(g.turn_ratio, 0.0);
            }
            last = g.turn_ratio;
        }
        assert!((last - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_late_update_places_views() {
        let mut c = controller(BorderConstraint::None);
        drag(&mut c, Vec2::ZERO, Vec2::new(-10.0, 0.0), 2);
        c.late_update();
        assert!(c.front_mask().view_world_pos().length() < 1e-3);
        // Back view mirrored across the crease
        let fold_x = c.gesture().fold_point.unwrap().x;
        assert!((c.back_mask().view_world_pos().x - 2.0 * fold_x).abs() < 1e-3);
    }

    #[test]
    fn test_world_touch_is_converted() {
        let mut c = controller(BorderConstraint::None);
        let node = crate::platform::NodeTransform::centered(Vec2::new(500.0, 500.0), Vec2::new(200.0, 200.0));
        c.handle_world_touch(
            TouchEvent::Start {
                pos: Vec2::new(510.0, 490.0),
            },
            &node,
        );
        assert_eq!(c.gesture().start_point, Some(Vec2::new(10.0, -10.0)));
    }

    fn auto_controller(border: BorderConstraint) -> MaskTurnController {
        let config = MaskTurnConfig {
            auto_complete: true,
            ..Default::default()
        };
        let mut c = MaskTurnController::new(view(), config);
        c.init_data(MaskTurnData::new(vec![TextureHandle(1), TextureHandle(2)], border));
        assert!(c.start_up());
        c
    }

    fn finish_auto_turn(c: &mut MaskTurnController) {
        for _ in 0..100 {
            if !c.is_auto_turning() {
                break;
            }
            c.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_auto_complete_continues_past_half() {
        let mut c = auto_controller(BorderConstraint::None);
        drag(&mut c, Vec2::new(90.0, 0.0), Vec2::new(-150.0, 0.0), 12);
        assert!(c.gesture().turn_ratio > 0.3);
        c.handle_touch(TouchEvent::End);
        assert!(c.is_auto_turning());

        // Touches are ignored while the page finishes on its own
        let before = c.gesture().clone();
        c.handle_touch(TouchEvent::Start { pos: Vec2::ZERO });
        c.handle_touch(TouchEvent::End);
        c.handle_touch(TouchEvent::Cancel);
        assert!(c.is_auto_turning());
        assert_eq!(c.gesture(), &before);

        // The fold keeps travelling along the gesture
        c.update(1.0 / 60.0);
        let fold = c.gesture().fold_point.unwrap();
        assert!(fold.x < before.fold_point.unwrap().x);

        finish_auto_turn(&mut c);
        assert!(!c.is_auto_turning());
        assert_eq!(c.gesture().phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_short_drag_does_not_auto_turn() {
        let mut c = auto_controller(BorderConstraint::None);
        drag(&mut c, Vec2::new(-90.0, 0.0), Vec2::new(-84.0, 0.0), 1);
        let g = c.gesture();
        assert_eq!(g.start_point, Some(Vec2::new(-100.0, 0.0)));
        assert!(g.fold_point.unwrap().x < -80.0);
        assert_eq!(g.turn_ratio, 0.0);

        c.handle_touch(TouchEvent::End);
        assert!(!c.is_auto_turning());
        assert_eq!(c.gesture().phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_auto_complete_resumes_small_turn() {
        let mut c = auto_controller(BorderConstraint::None);
        // Off-center drag: the fold trails the center at a shallow angle
        drag(&mut c, Vec2::new(-90.0, -30.0), Vec2::new(-80.0, -30.0), 1);
        let ratio = c.gesture().turn_ratio;
        assert!(ratio > 0.0 && ratio <= 0.3, "ratio {ratio}");
        let fold = c.gesture().fold_point.unwrap();

        c.handle_touch(TouchEvent::End);
        assert!(c.is_auto_turning());

        // Resume walks the fold back toward the grabbed edge
        c.update(1.0 / 60.0);
        let resumed = c.gesture().fold_point.unwrap();
        assert!(resumed.x < fold.x);
        assert_eq!(c.gesture().move_dir, Some(Vec2::X));

        finish_auto_turn(&mut c);
        assert!(!c.is_auto_turning());
        assert_eq!(c.gesture().phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_auto_turn_stops_at_spine() {
        let mut c = auto_controller(BorderConstraint::Right);
        drag(&mut c, Vec2::new(-90.0, 0.0), Vec2::new(130.0, 0.0), 11);
        let g = c.gesture();
        assert!(!g.prohibited);
        assert!(g.turn_ratio > 0.3);
        c.handle_touch(TouchEvent::End);
        assert!(c.is_auto_turning());

        let mut latched = false;
        for _ in 0..100 {
            if !c.is_auto_turning() {
                break;
            }
            c.update(1.0 / 60.0);
            let g = c.gesture();
            latched |= g.prohibited;
            if let Some(fold) = g.fold_point {
                assert!(fold.x < 100.0);
            }
        }
        assert!(latched, "auto turn never reached the spine");
        assert!(!c.is_auto_turning());
        assert_eq!(c.gesture().phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_stop_clears_and_ignores() {
        let mut c = controller(BorderConstraint::None);
        drag(&mut c, Vec2::ZERO, Vec2::new(-10.0, 0.0), 2);
        c.stop();
        assert_eq!(c.gesture().phase(), GesturePhase::Idle);
        c.handle_touch(TouchEvent::Start { pos: Vec2::ZERO });
        assert_eq!(c.gesture().phase(), GesturePhase::Idle);

        // Frame hooks are no-ops while stopped
        let masks = (c.front_mask().clone(), c.back_mask().clone());
        c.update(1.0 / 60.0);
        c.late_update();
        assert_eq!((c.front_mask().clone(), c.back_mask().clone()), masks);
        assert!(!c.is_auto_turning());
    }
}
