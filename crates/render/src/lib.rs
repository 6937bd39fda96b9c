//! Rendering Adapter: renderer-agnostic camera frames.
//!
//! # Invariants
//! - Renderers read the world; they never mutate it.
//! - A frame is derived from a camera's visible list and the render index.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "tessera-render v0.1.0"
}
