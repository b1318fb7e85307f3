//! GPU data layouts (must match marker_shader.wgsl)

use bytemuck::{Pod, Zeroable};

use crate::scene::{Marker, MarkerMaterial, MarkerShape};

pub const SHAPE_SPHERE: u32 = 0;
pub const SHAPE_DISC: u32 = 1;
/// Unlit wireframe-style outline marking the point light
pub const SHAPE_LIGHT_HELPER: u32 = 2;

/// Per-marker instance data. Each instance is drawn as one six-vertex quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub shape: u32,
    /// 0 = matte, 1 = glossy
    pub gloss: f32,
}

impl MarkerInstance {
    pub fn from_marker(marker: &Marker) -> Self {
        Self {
            position: marker.position.to_array(),
            radius: marker.style.radius,
            color: marker.style.color,
            shape: match marker.style.shape {
                MarkerShape::Sphere => SHAPE_SPHERE,
                MarkerShape::Disc => SHAPE_DISC,
            },
            gloss: match marker.style.material {
                MarkerMaterial::Matte => 0.0,
                MarkerMaterial::Glossy => 1.0,
            },
        }
    }

    /// Outline drawn around the point light
    pub fn light_helper(position: [f32; 3], radius: f32) -> Self {
        Self {
            position,
            radius,
            color: [1.0, 1.0, 1.0],
            shape: SHAPE_LIGHT_HELPER,
            gloss: 0.0,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32,
        2 => Float32x3,
        3 => Uint32,
        4 => Float32
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-frame uniforms
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = camera right (world), w unused
    pub camera_right: [f32; 4],
    /// xyz = camera up (world), w unused
    pub camera_up: [f32; 4],
    /// xyz = camera position, w unused
    pub camera_pos: [f32; 4],
    /// xyz = point light position, w = intensity
    pub light: [f32; 4],
}

/// Scene colors
pub mod colors {
    pub const BACKGROUND: wgpu::Color = wgpu::Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
}
