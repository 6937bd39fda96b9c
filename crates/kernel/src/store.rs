use std::collections::BTreeMap;

use tessera_common::{EntityId, IdAllocator};

use crate::entity::Entity;

/// Exclusive owner of every entity, keyed and iterated by id.
///
/// Ids are drawn from the global [`IdAllocator`] and released when the entity
/// is removed or the store is dropped.
pub struct EntityStore {
    entities: BTreeMap<EntityId, Box<dyn Entity>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }

    /// Allocate an id for `entity` and take ownership of it.
    pub fn create<E: Entity>(&mut self, entity: E) -> EntityId {
        let id = IdAllocator::global().generate();
        self.entities.insert(id, Box::new(entity));
        id
    }

    /// Store an entity whose id was allocated elsewhere.
    pub(crate) fn insert(&mut self, id: EntityId, entity: Box<dyn Entity>) {
        self.entities.insert(id, entity);
    }

    /// Destroy an entity and release its id. Unknown ids return `None`.
    pub fn remove(&mut self, id: EntityId) -> Option<Box<dyn Entity>> {
        let removed = self.entities.remove(&id);
        if removed.is_some() {
            IdAllocator::global().free(id);
        }
        removed
    }

    pub fn get(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entities.get(&id).map(Box::as_ref)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity + 'static)> {
        self.entities.get_mut(&id).map(Box::as_mut)
    }

    /// Typed view of an entity.
    pub fn get_as<T: Entity>(&self, id: EntityId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref::<T>()
    }

    pub fn get_as_mut<T: Entity>(&mut self, id: EntityId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &dyn Entity)> + '_ {
        self.entities.iter().map(|(id, e)| (*id, &**e))
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EntityStore {
    fn drop(&mut self) {
        for id in self.entities.keys() {
            IdAllocator::global().free(*id);
        }
    }
}
