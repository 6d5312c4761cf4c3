//! Blend function carried by renderable page components

use serde::{Deserialize, Serialize};

/// Blend factors a page may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
}

impl From<BlendFactor> for wgpu::BlendFactor {
    fn from(factor: BlendFactor) -> Self {
        match factor {
            BlendFactor::Zero => wgpu::BlendFactor::Zero,
            BlendFactor::One => wgpu::BlendFactor::One,
            BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
            BlendFactor::DstAlpha => wgpu::BlendFactor::DstAlpha,
            BlendFactor::OneMinusDstAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
        }
    }
}

/// Source and destination color factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl Default for BlendFunc {
    fn default() -> Self {
        Self {
            src: BlendFactor::SrcAlpha,
            dst: BlendFactor::OneMinusSrcAlpha,
        }
    }
}

impl BlendFunc {
    /// For textures with premultiplied alpha
    pub fn premultiplied() -> Self {
        Self {
            src: BlendFactor::One,
            dst: BlendFactor::OneMinusSrcAlpha,
        }
    }

    pub fn to_blend_state(self) -> wgpu::BlendState {
        wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: self.src.into(),
                dst_factor: self.dst.into(),
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent::OVER,
        }
    }
}

/// Something drawn with a configurable blend function
pub trait Blendable {
    fn blend_func(&self) -> BlendFunc;
    fn set_blend_func(&mut self, blend: BlendFunc);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_alpha_blending() {
        assert_eq!(
            BlendFunc::default().to_blend_state(),
            wgpu::BlendState::ALPHA_BLENDING
        );
        assert_eq!(
            BlendFunc::premultiplied().to_blend_state(),
            wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING
        );
    }
}
