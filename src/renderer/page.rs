//! Renderable page component
//!
//! `PageRenderer` owns the strip assembler and the blend function and hands
//! finished buffers to whatever draws them through `MeshSink`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::assembler::{PageAssembler, TextureRegion, UvRect};
use super::blend::{BlendFunc, Blendable};
use super::vertex::PageVertex;
use crate::error::TurnPageResult;
use crate::platform::TransformProvider;

/// Host-side texture id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Source of vertex and index data
pub trait VertexProvider {
    fn vertices(&self) -> &[PageVertex];
    fn indices(&self) -> &[u16];
}

impl VertexProvider for PageAssembler {
    fn vertices(&self) -> &[PageVertex] {
        PageAssembler::vertices(self)
    }

    fn indices(&self) -> &[u16] {
        PageAssembler::indices(self)
    }
}

/// One draw's worth of page data
#[derive(Debug, Clone, Copy)]
pub struct PageMesh<'a> {
    pub vertices: &'a [PageVertex],
    pub indices: &'a [u16],
    pub front: TextureHandle,
    pub back: TextureHandle,
    pub blend: BlendFunc,
}

/// Receives meshes for drawing
pub trait MeshSink {
    fn submit(&mut self, mesh: &PageMesh<'_>);
}

/// Page mesh plus the render state to draw it with
#[derive(Debug, Clone)]
pub struct PageRenderer {
    assembler: PageAssembler,
    blend: BlendFunc,
    front: TextureHandle,
    back: Option<TextureHandle>,
    region: UvRect,
    size: Vec2,
    anchor: Vec2,
    /// Flat mesh needs regenerating
    verts_dirty: bool,
}

impl PageRenderer {
    pub fn new(curve_resolution: usize, front: TextureHandle, back: Option<TextureHandle>) -> TurnPageResult<Self> {
        Ok(Self {
            assembler: PageAssembler::new(curve_resolution)?,
            blend: BlendFunc::default(),
            front,
            back,
            region: UvRect::FULL,
            size: Vec2::ZERO,
            anchor: Vec2::ZERO,
            verts_dirty: true,
        })
    }

    /// Pick up the node's size, anchor and translation
    pub fn set_geometry(&mut self, node: &impl TransformProvider) {
        self.size = node.size();
        self.anchor = node.anchor();
        self.assembler.set_page_height(self.size.y);
        let t = node.world_translation();
        self.update_tx_ty(t.x, t.y);
        self.verts_dirty = true;
    }

    pub fn update_tx_ty(&mut self, tx: f32, ty: f32) {
        self.assembler.update_tx_ty(tx, ty);
    }

    pub fn set_texture_region(&mut self, region: &TextureRegion) {
        self.region = region.uv_rect();
        self.assembler.set_uv_rect(self.region);
        self.verts_dirty = true;
    }

    pub fn set_textures(&mut self, front: TextureHandle, back: Option<TextureHandle>) {
        self.front = front;
        self.back = back;
    }

    pub fn front_texture(&self) -> TextureHandle {
        self.front
    }

    /// Back texture, falling back to the front one
    pub fn back_texture(&self) -> TextureHandle {
        self.back.unwrap_or(self.front)
    }

    /// Bend the strip along `points`; returns false if they were rejected
    pub fn update_page(&mut self, points: &[Vec2]) -> bool {
        match self.assembler.update_page(points) {
            Ok(()) => {
                self.verts_dirty = false;
                true
            }
            Err(err) => {
                log::warn!("Page curve ignored: {err}");
                false
            }
        }
    }

    /// Regenerate the flat strip if geometry changed
    pub fn update_render_data(&mut self) {
        if self.verts_dirty {
            self.assembler.update_normal(self.size, self.anchor);
            self.verts_dirty = false;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.verts_dirty
    }

    pub fn assembler(&self) -> &PageAssembler {
        &self.assembler
    }

    pub fn vertex_floats(&self) -> &[f32] {
        self.assembler.vertex_floats()
    }

    /// Submit the current mesh
    pub fn flush(&self, sink: &mut impl MeshSink) {
        sink.submit(&PageMesh {
            vertices: self.assembler.vertices(),
            indices: self.assembler.indices(),
            front: self.front,
            back: self.back_texture(),
            blend: self.blend,
        });
    }
}

impl VertexProvider for PageRenderer {
    fn vertices(&self) -> &[PageVertex] {
        self.assembler.vertices()
    }

    fn indices(&self) -> &[u16] {
        self.assembler.indices()
    }
}

impl Blendable for PageRenderer {
    fn blend_func(&self) -> BlendFunc {
        self.blend
    }

    fn set_blend_func(&mut self, blend: BlendFunc) {
        self.blend = blend;
    }
}
