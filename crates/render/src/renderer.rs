use std::fmt::Write;

use tessera_common::Aabb;
use tessera_kernel::{Camera, World};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer draws what one camera sees. It reads the camera's visible list
/// and the world's render index and never mutates the world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `camera` from the current world state.
    fn render(&self, world: &World, camera: &Camera) -> Self::Output;
}

/// Text renderer for CLI output, logs and tests.
///
/// Lists the camera's visible entities in ascending id order with their
/// render shapes.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn fmt_aabb(shape: &Aabb) -> String {
    format!(
        "({}, {})-({}, {})",
        shape.top_left.x, shape.top_left.y, shape.bottom_right.x, shape.bottom_right.y
    )
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World, camera: &Camera) -> String {
        let visible = camera.visible_objects();
        tracing::trace!(camera = camera.id().0, visible = visible.len(), "rendering frame");

        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Camera {} (tick={}) ===",
            camera.id().0,
            world.tick_count()
        );
        let _ = writeln!(
            out,
            "Viewport: {} {}",
            fmt_aabb(&camera.viewport()),
            if camera.is_active() { "active" } else { "inactive" }
        );
        let _ = writeln!(out, "Visible: {}", visible.len());

        for &id in visible {
            match world.render_index().shape(id) {
                Some(shape) => {
                    let _ = writeln!(out, "  [{id}] shape={}", fmt_aabb(&shape));
                }
                // Evicted since the camera phase last ran.
                None => {
                    let _ = writeln!(out, "  [{id}] gone");
                }
            }
        }

        out
    }
}
