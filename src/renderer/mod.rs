//! WebGPU rendering module
//!
//! Markers are drawn as instanced impostor quads, shaded in the fragment shader.

pub mod marker_pipeline;
pub mod vertex;

pub use marker_pipeline::{MarkerRenderState, RenderInitError};
