use std::fmt;

use tessera_common::{Aabb, EntityId, Point};
use tessera_kernel::{Capabilities, World};
use tessera_spatial::IndexStats;

/// World inspector for developer tooling.
///
/// Read-only queries against the world state for debugging and profiling.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        WorldSummary {
            tick: world.tick_count(),
            stored: world.objects().len(),
            live: world.live_count(),
            pending_initialization: world.pending_initialization().len(),
            pending_creation: world.pending_creation().len(),
            pending_removal: world.pending_removal().len(),
            evaluate: world.evaluate_count(),
            update: world.update_count(),
            cameras: world.cameras().len(),
            collision: world.collision_index().stats(),
            render: world.render_index().stats(),
        }
    }

    /// Describe a single stored entity, pending or live.
    pub fn inspect_object(world: &World, id: EntityId) -> Option<ObjectInfo> {
        let entity = world.get_object(id)?;
        Some(ObjectInfo {
            id,
            capabilities: entity.capabilities(),
            live: world.is_live(id),
            dead: entity.is_dead(),
            position: entity.position(),
            collision_shape: world.collision_index().shape(id),
            collision_level: world.collision_index().level_of(id),
            render_shape: world.render_index().shape(id),
        })
    }

    /// List all stored entity ids in ascending order.
    pub fn list_objects(world: &World) -> Vec<EntityId> {
        world.objects().ids().collect()
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSummary {
    pub tick: u64,
    pub stored: usize,
    pub live: usize,
    pub pending_initialization: usize,
    pub pending_creation: usize,
    pub pending_removal: usize,
    pub evaluate: usize,
    pub update: usize,
    pub cameras: usize,
    pub collision: IndexStats,
    pub render: IndexStats,
}

fn fmt_stats(f: &mut fmt::Formatter<'_>, name: &str, stats: &IndexStats) -> fmt::Result {
    write!(
        f,
        "\n  {name} index: tracked={} levels={} placements={}",
        stats.tracked, stats.levels, stats.placements
    )
}

impl fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "World: tick={} stored={} live={} pending=(init {}, create {}, remove {}) \
             evaluate={} update={} cameras={}",
            self.tick,
            self.stored,
            self.live,
            self.pending_initialization,
            self.pending_creation,
            self.pending_removal,
            self.evaluate,
            self.update,
            self.cameras,
        )?;
        fmt_stats(f, "collision", &self.collision)?;
        fmt_stats(f, "render", &self.render)
    }
}

/// Detailed info about a single entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    pub id: EntityId,
    pub capabilities: Capabilities,
    pub live: bool,
    pub dead: bool,
    pub position: Option<Point>,
    pub collision_shape: Option<Aabb>,
    pub collision_level: Option<u32>,
    pub render_shape: Option<Aabb>,
}

impl fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match (self.live, self.dead) {
            (_, true) => "dead",
            (true, false) => "live",
            (false, false) => "pending",
        };
        write!(f, "Object [{}] {state}", self.id)?;
        if let Some(p) = self.position {
            write!(f, " pos=({}, {})", p.x, p.y)?;
        }
        if let (Some(shape), Some(level)) = (self.collision_shape, self.collision_level) {
            write!(
                f,
                " collision=({}, {})-({}, {}) level={level}",
                shape.top_left.x, shape.top_left.y, shape.bottom_right.x, shape.bottom_right.y
            )?;
        }
        if let Some(shape) = self.render_shape {
            write!(
                f,
                " render=({}, {})-({}, {})",
                shape.top_left.x, shape.top_left.y, shape.bottom_right.x, shape.bottom_right.y
            )?;
        }
        Ok(())
    }
}
