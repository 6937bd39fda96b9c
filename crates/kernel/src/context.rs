use tessera_common::{EntityId, IdAllocator, Size};

use crate::entity::Entity;

/// Handle given to entity behaviours during a phase.
///
/// Behaviours cannot reach the world while it iterates them. Instead they
/// record creations and removals here; the world applies them once the
/// current phase has finished.
pub struct TickContext {
    tick: u64,
    world_size: Size,
    spawned: Vec<(EntityId, Box<dyn Entity>)>,
    removals: Vec<EntityId>,
}

impl TickContext {
    pub(crate) fn new(tick: u64, world_size: Size) -> Self {
        Self {
            tick,
            world_size,
            spawned: Vec::new(),
            removals: Vec::new(),
        }
    }

    /// Index of the tick being run.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn world_size(&self) -> Size {
        self.world_size
    }

    /// Queue a new entity. Its id is allocated immediately; the entity joins
    /// the store when the current phase ends.
    pub fn create_object<E: Entity>(&mut self, entity: E) -> EntityId {
        let id = IdAllocator::global().generate();
        self.spawned.push((id, Box::new(entity)));
        id
    }

    /// Mark an entity for eviction at the next removal phase.
    pub fn remove_object(&mut self, id: EntityId) {
        self.removals.push(id);
    }

    pub(crate) fn into_parts(mut self) -> (Vec<(EntityId, Box<dyn Entity>)>, Vec<EntityId>) {
        (
            std::mem::take(&mut self.spawned),
            std::mem::take(&mut self.removals),
        )
    }
}

impl Drop for TickContext {
    fn drop(&mut self) {
        // Spawns that never reached a store still hold allocated ids.
        for (id, _) in self.spawned.drain(..) {
            IdAllocator::global().free(id);
        }
    }
}
