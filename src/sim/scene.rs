//! Swipe-driven page turn
//!
//! A horizontal swipe picks the turn direction; the turn angle θ is then
//! tweened while the Verlet chain follows it and bends the page mesh.

use glam::Vec2;

use super::tween::Tween;
use super::verlet::{PageChain, PageEdges};
use crate::config::{TurnPageConfig, VerletConfig};
use crate::error::TurnPageResult;
use crate::platform::{TouchEvent, TransformProvider};
use crate::renderer::{MeshSink, PageRenderer, TextureHandle};

/// Angle of a page lying flat on the right of the spine
const FLAT_FRONT: f32 = 0.0;
/// Angle of a page turned over to the left of the spine
const FLAT_BACK: f32 = 180.0;

#[derive(Debug, Clone)]
pub struct VerletTurnScene {
    config: VerletConfig,
    chain: PageChain,
    renderer: PageRenderer,
    /// Current turn angle in degrees
    angle: f32,
    tween: Option<Tween>,
    stopped: bool,
    touch_start_x: Option<f32>,
    /// The current touch already triggered a turn
    swiped: bool,
    positions: Vec<Vec2>,
}

impl VerletTurnScene {
    pub fn new(
        node: &impl TransformProvider,
        config: &TurnPageConfig,
        front: TextureHandle,
        back: Option<TextureHandle>,
    ) -> TurnPageResult<Self> {
        config.validate()?;
        let edges = PageEdges::from_size_anchor(node.size(), node.anchor());
        let chain = PageChain::new(edges, config.rung_count(), &config.verlet)?;

        let mut renderer = PageRenderer::new(config.curve_resolution, front, back)?;
        renderer.set_geometry(node);
        renderer.update_render_data();

        log::debug!(
            "Verlet scene: {} points over a {}x{} page",
            chain.len(),
            edges.width(),
            edges.height()
        );

        Ok(Self {
            config: config.verlet.clone(),
            positions: Vec::with_capacity(chain.len()),
            chain,
            renderer,
            angle: FLAT_FRONT,
            tween: None,
            stopped: false,
            touch_start_x: None,
            swiped: false,
        })
    }

    pub fn handle_touch(&mut self, event: TouchEvent) {
        match event {
            TouchEvent::Start { pos } => self.on_touch_start(pos.x),
            TouchEvent::Move { pos, .. } => self.on_touch_move(pos.x),
            TouchEvent::End | TouchEvent::Cancel => self.on_touch_end(),
        }
    }

    pub fn on_touch_start(&mut self, x: f32) {
        self.touch_start_x = Some(x);
        self.swiped = false;
    }

    /// Trigger a turn once the touch has travelled `min_swipe` horizontally
    pub fn on_touch_move(&mut self, x: f32) {
        let Some(start) = self.touch_start_x else {
            return;
        };
        if self.swiped {
            return;
        }
        let dis = start - x;
        if dis.abs() >= self.config.min_swipe {
            self.swiped = true;
            self.turn_by_swipe(dis);
        }
    }

    pub fn on_touch_end(&mut self) {
        self.touch_start_x = None;
        self.swiped = false;
    }

    /// Start a turn; a leftward swipe (`dis > 0`) turns the front page over
    pub fn turn_by_swipe(&mut self, dis: f32) {
        if dis == 0.0 {
            log::debug!("Zero-length swipe ignored");
            return;
        }
        let front = dis > 0.0;
        let (from, to) = if front {
            (FLAT_FRONT, FLAT_BACK)
        } else {
            (FLAT_BACK, FLAT_FRONT)
        };

        if self.tween.is_some() {
            log::debug!("Turn restarted before the previous one finished");
        }
        self.stopped = false;
        self.angle = from;
        self.chain.rebuild(front);
        self.tween = Some(Tween::new(
            from,
            to,
            self.config.turn_duration,
            self.config.hold_delay,
            self.config.easing,
        ));
        log::debug!("Page turn {from} -> {to}");
    }

    pub fn turn_forward(&mut self) {
        self.turn_by_swipe(1.0);
    }

    pub fn turn_backward(&mut self) {
        self.turn_by_swipe(-1.0);
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32) {
        if self.stopped {
            return;
        }
        if let Some(tween) = self.tween.as_mut() {
            self.angle = tween.advance(dt);
        }

        self.chain.step(self.angle);
        self.chain.write_positions(&mut self.positions);
        self.renderer.update_page(&self.positions);

        let finished = self.tween.as_ref().is_none_or(Tween::is_finished);
        if finished {
            self.tween = None;
            self.stopped = true;
            log::debug!("Page settled at {}", self.angle);
        }
    }

    /// Follow a node move or resize
    ///
    /// A size or anchor change lays the chain flat on the side the page is
    /// currently on; the next `update` republishes the curve.
    pub fn set_geometry(&mut self, node: &impl TransformProvider) -> TurnPageResult<()> {
        let edges = PageEdges::from_size_anchor(node.size(), node.anchor());
        if edges != *self.chain.edges() {
            let front = self.angle < 90.0;
            self.chain.resize(edges, front)?;
            self.stopped = false;
            log::debug!("Page resized to {}x{}", edges.width(), edges.height());
        }
        self.renderer.set_geometry(node);
        Ok(())
    }

    pub fn flush(&self, sink: &mut impl MeshSink) {
        self.renderer.flush(sink);
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_turning(&self) -> bool {
        self.tween.is_some()
    }

    pub fn chain(&self) -> &PageChain {
        &self.chain
    }

    pub fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut PageRenderer {
        &mut self.renderer
    }
}
