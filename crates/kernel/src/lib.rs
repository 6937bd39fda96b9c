//! World Kernel: entity ownership, capability registries and the tick orchestrator.
//!
//! # Invariants
//! - The store exclusively owns entities; indices and registries only hold ids.
//! - Admission and eviction happen at phase boundaries, never mid-iteration.
//! - An entity is unregistered everywhere before it is destroyed.

pub mod camera;
pub mod config;
pub mod context;
pub mod entity;
pub mod store;
pub mod world;

pub use camera::{Camera, CameraId, CameraManager};
pub use config::{ConfigError, WorldConfig};
pub use context::TickContext;
pub use entity::{AsAny, Body, Capabilities, Entity};
pub use store::EntityStore;
pub use world::{Collisions, TickReport, World};

pub fn crate_info() -> &'static str {
    "tessera-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
