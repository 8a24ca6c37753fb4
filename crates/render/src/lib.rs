//! Renderer-agnostic interface for the gallery scene.
//!
//! # Invariants
//! - Renderers read scene state; they never mutate it.
//! - Draw happens once per frame, after the tick update.

pub mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "firerange-render v0.1.0"
}
