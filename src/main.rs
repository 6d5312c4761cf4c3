//! Page Curl entry point
//!
//! Native: headless demo of both turn styles with log output.
//! Web: `PageCurl` bindings for a JS host that owns the canvas.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_api {
    use glam::Vec2;
    use js_sys::{Float32Array, Uint16Array};
    use wasm_bindgen::prelude::*;

    use page_curl::TurnPageConfig;
    use page_curl::platform::{NodeTransform, TouchEvent};
    use page_curl::renderer::{TextureHandle, VertexProvider};
    use page_curl::sim::VerletTurnScene;

    pub fn init_logging() {
        console_error_panic_hook::set_once();
        // Already initialised when the module is re-instantiated
        let _ = console_log::init_with_level(log::Level::Info);
    }

    /// Swipe-driven page turn exposed to JS
    #[wasm_bindgen]
    pub struct PageCurl {
        scene: VerletTurnScene,
        node: NodeTransform,
        last_touch: Option<Vec2>,
    }

    #[wasm_bindgen]
    impl PageCurl {
        /// Page of `width` x `height` anchored bottom-left at (`x`, `y`)
        ///
        /// `config_json` may be empty for defaults.
        #[wasm_bindgen(constructor)]
        pub fn new(x: f32, y: f32, width: f32, height: f32, front: u32, back: u32, config_json: &str) -> Result<PageCurl, JsValue> {
            let config = if config_json.trim().is_empty() {
                TurnPageConfig::default()
            } else {
                TurnPageConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
            };
            let node = NodeTransform::new(Vec2::new(x, y), Vec2::new(width, height), Vec2::ZERO);
            let scene = VerletTurnScene::new(&node, &config, TextureHandle(front), Some(TextureHandle(back)))
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            log::info!("PageCurl ready ({width}x{height})");
            Ok(Self {
                scene,
                node,
                last_touch: None,
            })
        }

        pub fn touch_start(&mut self, x: f32, y: f32) {
            let pos = Vec2::new(x, y) - self.node.position;
            self.last_touch = Some(pos);
            self.scene.handle_touch(TouchEvent::Start { pos });
        }

        pub fn touch_move(&mut self, x: f32, y: f32) {
            let pos = Vec2::new(x, y) - self.node.position;
            let delta = self.last_touch.map_or(Vec2::ZERO, |last| pos - last);
            self.last_touch = Some(pos);
            self.scene.handle_touch(TouchEvent::Move { pos, delta });
        }

        pub fn touch_end(&mut self) {
            self.last_touch = None;
            self.scene.handle_touch(TouchEvent::End);
        }

        pub fn turn_forward(&mut self) {
            self.scene.turn_forward();
        }

        pub fn turn_backward(&mut self) {
            self.scene.turn_backward();
        }

        pub fn update(&mut self, dt: f32) {
            self.scene.update(dt);
        }

        pub fn move_to(&mut self, x: f32, y: f32) {
            self.node.position = Vec2::new(x, y);
            if let Err(err) = self.scene.set_geometry(&self.node) {
                log::warn!("Move ignored: {err}");
            }
        }

        pub fn angle(&self) -> f32 {
            self.scene.angle()
        }

        pub fn is_stopped(&self) -> bool {
            self.scene.is_stopped()
        }

        /// Interleaved vertex data, six 32-bit slots per vertex
        pub fn vertices(&self) -> Float32Array {
            Float32Array::from(self.scene.renderer().vertex_floats())
        }

        pub fn indices(&self) -> Uint16Array {
            Uint16Array::from(self.scene.renderer().indices())
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_api::init_logging();
    log::info!("Page Curl loaded");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Page Curl (native) starting...");

    if let Err(err) = demo::run() {
        log::error!("Demo failed: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::Instant;

    use glam::Vec2;

    use page_curl::TurnPageResult;
    use page_curl::config::TurnPageConfig;
    use page_curl::geom::Aabb;
    use page_curl::platform::{FrameClock, FrameWorkQueue, NodeTransform, TouchEvent};
    use page_curl::renderer::{MeshSink, PageMesh, PageRenderer, TextureHandle};
    use page_curl::sim::VerletTurnScene;
    use page_curl::turn::{BorderConstraint, MaskTurnController, MaskTurnData};

    const DT: f32 = 1.0 / 60.0;

    struct WallClock(Instant);

    impl FrameClock for WallClock {
        fn now_ms(&self) -> f64 {
            self.0.elapsed().as_secs_f64() * 1000.0
        }
    }

    /// Counts what would be drawn
    #[derive(Default)]
    struct StatsSink {
        draws: usize,
        triangles: usize,
        back_vertices: usize,
    }

    impl MeshSink for StatsSink {
        fn submit(&mut self, mesh: &PageMesh<'_>) {
            self.draws += 1;
            self.triangles += mesh.indices.len() / 3;
            self.back_vertices += mesh.vertices.iter().filter(|v| !v.is_front()).count();
        }
    }

    pub fn run() -> TurnPageResult<()> {
        let config = TurnPageConfig::default();
        config.validate()?;

        preload_book(&config)?;
        swipe_turn(&config)?;
        mask_turn(&config);
        Ok(())
    }

    /// Build flat meshes for a small book a few pages per frame
    fn preload_book(config: &TurnPageConfig) -> TurnPageResult<()> {
        let node = NodeTransform::centered(Vec2::new(320.0, 480.0), Vec2::new(400.0, 600.0));
        let mut queue = FrameWorkQueue::new(2.0);
        queue.extend((0..12).map(TextureHandle));

        let clock = WallClock(Instant::now());
        let mut sink = StatsSink::default();
        let mut frames = 0;
        let mut failed = None;
        while !queue.is_done() {
            frames += 1;
            queue.run_frame(&clock, |&page| {
                match PageRenderer::new(config.curve_resolution, page, None) {
                    Ok(mut renderer) => {
                        renderer.set_geometry(&node);
                        renderer.update_render_data();
                        renderer.flush(&mut sink);
                    }
                    Err(err) => failed = Some(err),
                }
            });
        }
        if let Some(err) = failed {
            return Err(err);
        }
        log::info!(
            "Preloaded {} pages over {frames} frames ({} triangles)",
            sink.draws,
            sink.triangles
        );
        Ok(())
    }

    fn swipe_turn(config: &TurnPageConfig) -> TurnPageResult<()> {
        let node = NodeTransform::new(Vec2::new(200.0, 100.0), Vec2::new(400.0, 600.0), Vec2::ZERO);
        let mut scene = VerletTurnScene::new(&node, config, TextureHandle(1), Some(TextureHandle(2)))?;

        scene.handle_touch(TouchEvent::Start {
            pos: Vec2::new(300.0, 200.0),
        });
        scene.handle_touch(TouchEvent::Move {
            pos: Vec2::new(260.0, 200.0),
            delta: Vec2::new(-40.0, 0.0),
        });
        scene.handle_touch(TouchEvent::End);

        let mut frames = 0;
        while !scene.is_stopped() && frames < 600 {
            scene.update(DT);
            frames += 1;
            if frames % 15 == 0 {
                log::debug!("frame {frames}: angle {:.1}", scene.angle());
            }
        }

        let mut sink = StatsSink::default();
        scene.flush(&mut sink);
        let end = scene.chain().positions().last().unwrap_or_default();
        log::info!(
            "Swipe turn settled after {frames} frames at {:.1} deg, leading edge {end:?}, {} back-facing vertices",
            scene.angle(),
            sink.back_vertices
        );
        Ok(())
    }

    fn mask_turn(config: &TurnPageConfig) {
        let view = Aabb::new(Vec2::ZERO, Vec2::new(400.0, 600.0));
        let mut controller = MaskTurnController::new(view, config.mask.clone());
        controller.init_data(MaskTurnData::new(
            vec![TextureHandle(1), TextureHandle(2)],
            BorderConstraint::Left,
        ));
        if !controller.start_up() {
            return;
        }

        let mut pos = Vec2::new(180.0, -250.0);
        controller.handle_touch(TouchEvent::Start { pos });
        let delta = Vec2::new(-24.0, 6.0);
        for _ in 0..20 {
            pos += delta;
            controller.handle_touch(TouchEvent::Move { pos, delta });
            controller.late_update();
        }

        let gesture = controller.gesture();
        log::info!(
            "Mask turn: phase {:?}, direction {:?}, fold {:?}, ratio {:.2}",
            gesture.phase(),
            gesture.move_dir,
            gesture.fold_point,
            gesture.turn_ratio
        );
        log::info!(
            "Back page image at {:?}, rotated {:.1} deg",
            controller.back_mask().view_world_pos(),
            controller.back_mask().view_angle
        );
        controller.handle_touch(TouchEvent::End);
    }
}
