//! wgpu render backend for the gallery.
//!
//! Renders a grid floor plus every scene entity, instanced per mesh handle,
//! with meshes uploaded from the asset store. View/projection comes from the
//! scene camera; the scene's directional and ambient lights feed the shader.
//!
//! # Invariants
//! - The renderer never mutates scene state.
//! - Draw is invoked once per frame, after the tick update.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
