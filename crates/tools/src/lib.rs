//! Developer Tooling: read-only world inspection.
//!
//! # Invariants
//! - Tools only borrow the world immutably.

mod inspector;

pub use inspector::{ObjectInfo, WorldInspector, WorldSummary};

pub fn crate_info() -> &'static str {
    "tessera-tools v0.1.0"
}
