//! Shared types: entity ids, integer AABBs, process-wide id allocation.
//!
//! # Invariants
//! - No two live entities share an id.
//! - Freed ids are not reissued until the allocator counter wraps.

mod ids;
mod types;

pub use ids::IdAllocator;
pub use types::{Aabb, EntityId, Point, Size, clamp_point, within_bounds};

pub fn crate_info() -> &'static str {
    "tessera-common v0.1.0"
}
