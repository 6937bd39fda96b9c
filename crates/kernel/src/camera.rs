use std::collections::BTreeMap;

use tessera_common::{Aabb, EntityId, Point, Size};

/// Identifier of a camera, unique within one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CameraId(pub u32);

/// A viewport onto the world.
///
/// The visible list is refreshed by the world's camera phase and holds ids of
/// render-indexed entities overlapping the viewport, in ascending id order.
/// Draw ordering is left to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    id: CameraId,
    position: Point,
    size: Size,
    active: bool,
    visible: Vec<EntityId>,
}

impl Camera {
    fn new(id: CameraId, position: Point, size: Size) -> Self {
        Self {
            id,
            position,
            size,
            active: true,
            visible: Vec::new(),
        }
    }

    pub fn id(&self) -> CameraId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// World-space rectangle this camera sees.
    pub fn viewport(&self) -> Aabb {
        Aabb::from_position_size(self.position, self.size)
    }

    /// Inactive cameras are skipped by the camera phase and keep their last list.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn visible_objects(&self) -> &[EntityId] {
        &self.visible
    }

    pub(crate) fn set_visible_objects(&mut self, visible: Vec<EntityId>) {
        self.visible = visible;
    }
}

/// Owns the cameras of one world.
#[derive(Debug, Clone, Default)]
pub struct CameraManager {
    cameras: BTreeMap<CameraId, Camera>,
    next_id: u32,
}

impl CameraManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, position: Point, size: Size) -> CameraId {
        let id = CameraId(self.next_id);
        self.next_id += 1;
        self.cameras.insert(id, Camera::new(id, position, size));
        tracing::debug!(camera = id.0, "camera created");
        id
    }

    pub fn remove(&mut self, id: CameraId) -> Option<Camera> {
        let removed = self.cameras.remove(&id);
        if removed.is_some() {
            tracing::debug!(camera = id.0, "camera removed");
        }
        removed
    }

    pub fn get(&self, id: CameraId) -> Option<&Camera> {
        self.cameras.get(&id)
    }

    pub fn get_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.cameras.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Camera> + '_ {
        self.cameras.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Camera> + '_ {
        self.cameras.values_mut()
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
