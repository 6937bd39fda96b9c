//! Spatial indexing: a hierarchical grid answering "what overlaps what".
//!
//! # Invariants
//! - Every tracked id sits in exactly one level, in every cell of its region
//!   of interest at that level, and nowhere else.
//! - A level grid exists only while at least one entry is binned there.
//! - Pair queries are irreflexive and canonical: `(a, b)` with `a < b`.
//!
//! Shapes partly or wholly outside the world are clamped onto the edge cells,
//! which keeps pair detection exact for them at the cost of crowding the border.

mod grid;
mod index;

pub use grid::{CellCoord, CellRange, LevelGrid};
pub use index::{IndexStats, Pair, SpatialIndex, cell_size, level_for};

pub fn crate_info() -> &'static str {
    "tessera-spatial v0.1.0"
}
