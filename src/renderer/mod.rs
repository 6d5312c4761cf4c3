//! Page mesh generation
//!
//! Produces GPU-ready buffers for a curved page strip. Drawing is left to
//! the host through `MeshSink`; this module only describes the vertex
//! layout and blend state.

pub mod assembler;
pub mod blend;
pub mod page;
pub mod vertex;

pub use assembler::{PageAssembler, TextureRegion, UvRect};
pub use blend::{BlendFactor, BlendFunc, Blendable};
pub use page::{MeshSink, PageMesh, PageRenderer, TextureHandle, VertexProvider};
pub use vertex::PageVertex;
