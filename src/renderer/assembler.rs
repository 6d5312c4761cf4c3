//! Quad-strip mesh for a page
//!
//! The page is `N` quads side by side. Each quad owns four vertices
//! (left-bottom, right-bottom, left-top, right-top) and two triangles.
//! Neighbouring quads duplicate their shared edge so that each quad can
//! carry its own texture side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vertex::{FACE_BACK, FACE_FRONT, PageVertex};
use crate::error::{TurnPageError, TurnPageResult};

const VERTS_PER_QUAD: usize = 4;
const INDICES_PER_QUAD: usize = 6;

/// Texture coordinates of a page image (v grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl UvRect {
    pub const FULL: UvRect = UvRect {
        left: 0.0,
        bottom: 1.0,
        right: 1.0,
        top: 0.0,
    };

    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Sub-rectangle of a texture in pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Full texture size in pixels
    pub texture_size: Vec2,
}

impl TextureRegion {
    /// Region covering the whole texture
    pub fn full(texture_size: Vec2) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: texture_size.x,
            height: texture_size.y,
            texture_size,
        }
    }

    pub fn uv_rect(&self) -> UvRect {
        if self.texture_size.x <= 0.0 || self.texture_size.y <= 0.0 {
            return UvRect::FULL;
        }
        let (tw, th) = (self.texture_size.x, self.texture_size.y);
        UvRect {
            left: self.x / tw,
            bottom: (self.y + self.height) / th,
            right: (self.x + self.width) / tw,
            top: self.y / th,
        }
    }
}

/// Builds the vertex and index buffers of a page strip
#[derive(Debug, Clone)]
pub struct PageAssembler {
    quad_count: usize,
    vertices: Vec<PageVertex>,
    indices: Vec<u16>,
    /// World translation added to every vertex
    origin: Vec2,
    uv: UvRect,
    page_height: f32,
}

impl PageAssembler {
    /// Strip for `curve_resolution` curve points (`curve_resolution / 2` quads)
    pub fn new(curve_resolution: usize) -> TurnPageResult<Self> {
        if curve_resolution < 2 || curve_resolution % 2 != 0 {
            return Err(TurnPageError::InvalidConfiguration(format!(
                "curve_resolution must be an even number >= 2, got {curve_resolution}"
            )));
        }
        let quad_count = curve_resolution / 2;
        let vertex_count = quad_count * VERTS_PER_QUAD;
        if vertex_count > usize::from(u16::MAX) + 1 {
            return Err(TurnPageError::InvalidConfiguration(format!(
                "{vertex_count} vertices exceed 16-bit indices"
            )));
        }

        let indices = (0..quad_count)
            .flat_map(|q| {
                let v = (q * VERTS_PER_QUAD) as u16;
                [v, v + 1, v + 2, v + 1, v + 3, v + 2]
            })
            .collect();

        Ok(Self {
            quad_count,
            vertices: vec![PageVertex::default(); vertex_count],
            indices,
            origin: Vec2::ZERO,
            uv: UvRect::FULL,
            page_height: 0.0,
        })
    }

    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    /// Points `update_page` expects
    pub fn point_count(&self) -> usize {
        self.quad_count + 1
    }

    pub fn update_tx_ty(&mut self, tx: f32, ty: f32) {
        self.origin = Vec2::new(tx, ty);
    }

    pub fn set_uv_rect(&mut self, uv: UvRect) {
        self.uv = uv;
    }

    pub fn set_page_height(&mut self, height: f32) {
        self.page_height = height;
    }

    /// Flat, front-facing strip covering the node
    pub fn update_normal(&mut self, size: Vec2, anchor: Vec2) {
        self.page_height = size.y;
        let start = -anchor * size;
        let step = size.x / self.quad_count as f32;
        let points: Vec<Vec2> = (0..=self.quad_count)
            .map(|i| Vec2::new(start.x + i as f32 * step, start.y))
            .collect();
        self.write_strip(&points);
    }

    /// Strip following the curve `points` (spine first)
    ///
    /// Requires exactly `quad_count + 1` points; on mismatch the buffers are
    /// left untouched.
    pub fn update_page(&mut self, points: &[Vec2]) -> TurnPageResult<()> {
        let expected = self.point_count();
        if points.len() != expected {
            return Err(TurnPageError::PointCountMismatch {
                expected,
                actual: points.len(),
            });
        }
        self.write_strip(points);
        Ok(())
    }

    fn write_strip(&mut self, points: &[Vec2]) {
        let uv = self.uv;
        let u_step = uv.width() / self.quad_count as f32;
        let lift = Vec2::new(0.0, self.page_height);

        for (i, pair) in points.windows(2).enumerate() {
            let (p1, p2) = (pair[0] + self.origin, pair[1] + self.origin);
            let front = pair[0].x < pair[1].x;
            let (u1, u2, face) = if front {
                (uv.left + i as f32 * u_step, uv.left + (i + 1) as f32 * u_step, FACE_FRONT)
            } else {
                (uv.right - i as f32 * u_step, uv.right - (i + 1) as f32 * u_step, FACE_BACK)
            };

            let base = i * VERTS_PER_QUAD;
            let quad = [
                PageVertex::new(p1.x, p1.y, u1, uv.bottom, face),
                PageVertex::new(p2.x, p2.y, u2, uv.bottom, face),
                PageVertex::new(p1.x, p1.y + lift.y, u1, uv.top, face),
                PageVertex::new(p2.x, p2.y + lift.y, u2, uv.top, face),
            ];
            self.vertices[base..base + VERTS_PER_QUAD].copy_from_slice(&quad);

            // Seam: left edge shares the previous quad's right edge positions
            if i > 0 {
                let prev = base - VERTS_PER_QUAD;
                self.vertices[base].position = self.vertices[prev + 1].position;
                self.vertices[base + 2].position = self.vertices[prev + 3].position;
            }
        }
    }

    pub fn vertices(&self) -> &[PageVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Vertex buffer as flat 32-bit slots
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_count(&self) -> usize {
        self.quad_count * INDICES_PER_QUAD
    }
}
