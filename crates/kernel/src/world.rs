use std::collections::{BTreeMap, BTreeSet};

use tessera_common::{Aabb, EntityId, Point, Size, within_bounds};
use tessera_spatial::{Pair, SpatialIndex};

use crate::camera::{Camera, CameraId, CameraManager};
use crate::config::WorldConfig;
use crate::context::TickContext;
use crate::entity::{Capabilities, Entity};
use crate::store::EntityStore;

/// Overlapping collision pairs, each ordered `(lower, higher)`.
pub type Collisions = BTreeSet<Pair>;

/// Which spatial indices an updatable entity feeds, decided at admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct UpdateHandle {
    collidable: bool,
    renderable: bool,
}

/// Outcome of one full tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the tick that just ran, starting at 1.
    pub tick: u64,
    /// Pairs reported by the collision phase.
    pub collisions: Collisions,
    /// Entities that became live this tick.
    pub admitted: usize,
    /// Entities destroyed this tick.
    pub evicted: usize,
}

/// The simulation orchestrator.
///
/// Owns the entity store, a collision index, a render index, the per
/// capability registries and the cameras, and drives the fixed phase
/// sequence of [`tick`](Self::tick):
///
/// 1. [`initialize_objects`](Self::initialize_objects)
/// 2. [`evaluate_objects`](Self::evaluate_objects)
/// 3. [`check_collisions`](Self::check_collisions)
/// 4. [`update_objects`](Self::update_objects), ending with the creation-queue flush
/// 5. [`check_dead_objects`](Self::check_dead_objects)
/// 6. [`remove_objects`](Self::remove_objects)
/// 7. [`update_cameras`](Self::update_cameras)
///
/// Admission and eviction only happen at phase boundaries, so no registry or
/// index is mutated while a phase iterates it. Registries iterate in id order.
pub struct World {
    world_size: Size,
    tick: u64,
    store: EntityStore,
    collision_index: SpatialIndex,
    render_index: SpatialIndex,
    initialization: Vec<EntityId>,
    creation: Vec<EntityId>,
    live: BTreeSet<EntityId>,
    evaluate: BTreeSet<EntityId>,
    update: BTreeMap<EntityId, UpdateHandle>,
    death: BTreeSet<EntityId>,
    cameras: CameraManager,
}

impl World {
    pub fn new(world_size: Size) -> Self {
        Self {
            world_size,
            tick: 0,
            store: EntityStore::new(),
            collision_index: SpatialIndex::new(world_size),
            render_index: SpatialIndex::new(world_size),
            initialization: Vec::new(),
            creation: Vec::new(),
            live: BTreeSet::new(),
            evaluate: BTreeSet::new(),
            update: BTreeMap::new(),
            death: BTreeSet::new(),
            cameras: CameraManager::new(),
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.world_size)
    }

    pub fn world_size(&self) -> Size {
        self.world_size
    }

    /// Resize the world. Both indices re-bin whatever they already track.
    pub fn set_world_size(&mut self, size: Size) {
        self.world_size = size;
        self.collision_index.set_world_size(size);
        self.render_index.set_world_size(size);
    }

    /// Number of ticks completed.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    // --- Entities ---

    /// Take ownership of `entity` and queue it for admission.
    ///
    /// Entities needing initialization are admitted at the start of the next
    /// tick; the rest when the update phase flushes the creation queue.
    pub fn create_object<E: Entity>(&mut self, entity: E) -> EntityId {
        let id = self.store.create(entity);
        self.enqueue(id);
        id
    }

    pub fn get_object(&self, id: EntityId) -> Option<&dyn Entity> {
        self.store.get(id)
    }

    pub fn get_object_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity + 'static)> {
        self.store.get_mut(id)
    }

    pub fn get_as<T: Entity>(&self, id: EntityId) -> Option<&T> {
        self.store.get_as(id)
    }

    pub fn get_as_mut<T: Entity>(&mut self, id: EntityId) -> Option<&mut T> {
        self.store.get_as_mut(id)
    }

    /// Read-only access to the store (id-ordered iteration).
    pub fn objects(&self) -> &EntityStore {
        &self.store
    }

    /// Mark an entity for eviction at the next removal phase. Idempotent.
    pub fn remove_object(&mut self, id: EntityId) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.death.insert(id);
        true
    }

    /// True once the entity has been admitted and until it is evicted.
    pub fn is_live(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }

    pub fn pending_initialization(&self) -> &[EntityId] {
        &self.initialization
    }

    pub fn pending_creation(&self) -> &[EntityId] {
        &self.creation
    }

    pub fn pending_removal(&self) -> &BTreeSet<EntityId> {
        &self.death
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn evaluate_count(&self) -> usize {
        self.evaluate.len()
    }

    pub fn update_count(&self) -> usize {
        self.update.len()
    }

    pub fn collision_index(&self) -> &SpatialIndex {
        &self.collision_index
    }

    pub fn render_index(&self) -> &SpatialIndex {
        &self.render_index
    }

    /// Topmost render-indexed entity under `point`; the highest id wins.
    pub fn find_object_at(&self, point: Point) -> Option<EntityId> {
        self.render_index.query_point(point).last().copied()
    }

    // --- Cameras ---

    pub fn create_camera(&mut self, position: Point, size: Size) -> CameraId {
        self.cameras.create(position, size)
    }

    pub fn remove_camera(&mut self, id: CameraId) -> Option<Camera> {
        self.cameras.remove(id)
    }

    pub fn camera(&self, id: CameraId) -> Option<&Camera> {
        self.cameras.get(id)
    }

    pub fn camera_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.cameras.get_mut(id)
    }

    pub fn cameras(&self) -> &CameraManager {
        &self.cameras
    }

    // --- Tick ---

    /// Run one full tick with no collision handling.
    pub fn tick(&mut self, elapsed: u32) -> TickReport {
        self.tick_with(elapsed, |_, _| {})
    }

    /// Run one full tick. `on_collisions` runs between the collision and
    /// update phases, which is the only point where reacting to this tick's
    /// pairs sees the geometry they were computed against.
    pub fn tick_with<F>(&mut self, elapsed: u32, mut on_collisions: F) -> TickReport
    where
        F: FnMut(&mut World, &Collisions),
    {
        let tick = self.tick + 1;
        let _span = tracing::info_span!("tick", tick).entered();

        let mut admitted = self.initialize_objects();
        self.evaluate_objects(elapsed);
        let collisions = self.check_collisions();
        on_collisions(self, &collisions);
        admitted += self.update_objects();
        self.check_dead_objects();
        let evicted = self.remove_objects();
        self.update_cameras();

        self.tick = tick;
        tracing::trace!(
            admitted,
            evicted,
            collisions = collisions.len(),
            live = self.live.len(),
            "tick complete"
        );

        TickReport {
            tick,
            collisions,
            admitted,
            evicted,
        }
    }

    /// Phase 1: run one-time setup for pending entities, then admit them.
    /// Returns how many were admitted.
    pub fn initialize_objects(&mut self) -> usize {
        let _span = tracing::trace_span!("initialize_objects").entered();
        let pending = std::mem::take(&mut self.initialization);
        let mut ctx = self.context();
        let mut admitted = 0;
        for id in pending {
            if self.death.contains(&id) {
                continue;
            }
            let Some(entity) = self.store.get_mut(id) else {
                continue;
            };
            entity.initialize(&mut ctx);
            if self.admit(id) {
                admitted += 1;
            }
        }
        self.absorb(ctx);
        admitted
    }

    /// Phase 2: time-driven behaviour for every evaluate-registered entity.
    pub fn evaluate_objects(&mut self, elapsed: u32) {
        let _span = tracing::trace_span!("evaluate_objects").entered();
        let mut ctx = self.context();
        for id in &self.evaluate {
            if let Some(entity) = self.store.get_mut(*id) {
                entity.evaluate(&mut ctx, elapsed);
            }
        }
        self.absorb(ctx);
    }

    /// Phase 3: all overlapping pairs in the collision index, reflecting
    /// geometry as of the previous update phase.
    pub fn check_collisions(&self) -> Collisions {
        let _span = tracing::trace_span!("check_collisions").entered();
        self.collision_index.overlapping_pairs()
    }

    /// Phase 4: recompute geometry, push moved shapes into the indices and
    /// kill anything that left the world. Ends by admitting the creation
    /// queue. Returns how many entities that flush admitted.
    pub fn update_objects(&mut self) -> usize {
        let _span = tracing::trace_span!("update_objects").entered();
        let mut ctx = self.context();
        for (&id, handle) in &self.update {
            let Some(entity) = self.store.get_mut(id) else {
                continue;
            };
            let changed = entity.update(&mut ctx, false);
            let Some(position) = entity.position() else {
                continue;
            };
            if !within_bounds(position, self.world_size) {
                if !entity.is_dead() {
                    tracing::debug!(
                        %id,
                        x = position.x,
                        y = position.y,
                        "left world bounds, killed"
                    );
                    entity.kill();
                }
                continue;
            }
            if !changed {
                continue;
            }
            if handle.collidable {
                if let Some(size) = entity.collision_size() {
                    self.collision_index
                        .update(id, Aabb::from_position_size(position, size));
                }
            }
            if handle.renderable {
                if let Some(size) = entity.render_size() {
                    self.render_index
                        .update(id, Aabb::from_position_size(position, size));
                }
            }
        }
        self.absorb(ctx);

        let created = std::mem::take(&mut self.creation);
        created.into_iter().filter(|&id| self.admit(id)).count()
    }

    /// Phase 5: collect every entity whose dead flag is set.
    pub fn check_dead_objects(&mut self) {
        let _span = tracing::trace_span!("check_dead_objects").entered();
        for (id, entity) in self.store.iter() {
            if entity.is_dead() {
                self.death.insert(id);
            }
        }
    }

    /// Phase 6: unregister and destroy everything marked for death.
    /// Returns how many entities were destroyed.
    pub fn remove_objects(&mut self) -> usize {
        let _span = tracing::trace_span!("remove_objects").entered();
        let doomed = std::mem::take(&mut self.death);
        let mut evicted = 0;
        for id in doomed {
            self.evaluate.remove(&id);
            self.update.remove(&id);
            self.collision_index.remove(id);
            self.render_index.remove(id);
            self.live.remove(&id);
            self.initialization.retain(|pending| *pending != id);
            self.creation.retain(|pending| *pending != id);
            if self.store.remove(id).is_some() {
                tracing::debug!(%id, "evicted");
                evicted += 1;
            }
        }
        evicted
    }

    /// Phase 7: refresh each active camera's visible list from the render index.
    pub fn update_cameras(&mut self) {
        let _span = tracing::trace_span!("update_cameras").entered();
        for camera in self.cameras.iter_mut() {
            if !camera.is_active() {
                continue;
            }
            let visible = self.render_index.query_rect(camera.viewport());
            camera.set_visible_objects(visible.into_iter().collect());
        }
    }

    /// Deliver each pair to both participants' `on_collision`.
    pub fn dispatch_collisions(&mut self, collisions: &Collisions) {
        for &(a, b) in collisions {
            if let Some(entity) = self.store.get_mut(a) {
                entity.on_collision(b);
            }
            if let Some(entity) = self.store.get_mut(b) {
                entity.on_collision(a);
            }
        }
    }

    fn context(&self) -> TickContext {
        TickContext::new(self.tick + 1, self.world_size)
    }

    /// Route a stored entity to the initialization list or the creation queue.
    fn enqueue(&mut self, id: EntityId) {
        let Some(entity) = self.store.get(id) else {
            return;
        };
        if entity.capabilities().contains(Capabilities::INITIALIZE) {
            tracing::debug!(%id, "queued for initialization");
            self.initialization.push(id);
        } else {
            tracing::debug!(%id, "queued for creation");
            self.creation.push(id);
        }
    }

    /// Apply creations and removals recorded during a phase.
    fn absorb(&mut self, ctx: TickContext) {
        let (spawned, removals) = ctx.into_parts();
        for (id, entity) in spawned {
            self.store.insert(id, entity);
            self.enqueue(id);
        }
        for id in removals {
            self.remove_object(id);
        }
    }

    /// Register an entity into every registry its capabilities call for.
    /// Entities already live or marked for death are skipped.
    fn admit(&mut self, id: EntityId) -> bool {
        if self.live.contains(&id) || self.death.contains(&id) {
            return false;
        }
        let Some(entity) = self.store.get(id) else {
            return false;
        };
        let caps = entity.capabilities();
        let position = entity.position();

        let mut handle = UpdateHandle::default();
        if caps.contains(Capabilities::COLLISION_SHAPE) {
            match (position, entity.collision_size()) {
                (Some(position), Some(size)) => {
                    self.collision_index
                        .add(id, Aabb::from_position_size(position, size));
                    handle.collidable = true;
                }
                _ => tracing::warn!(%id, "collision shape declared without position and size"),
            }
        }
        if caps.contains(Capabilities::RENDER_SHAPE) {
            match (position, entity.render_size()) {
                (Some(position), Some(size)) => {
                    self.render_index
                        .add(id, Aabb::from_position_size(position, size));
                    handle.renderable = true;
                }
                _ => tracing::warn!(%id, "render shape declared without position and size"),
            }
        }
        if caps.contains(Capabilities::EVALUATE) {
            self.evaluate.insert(id);
        }
        if caps.contains(Capabilities::UPDATE) {
            self.update.insert(id, handle);
        }
        self.live.insert(id);
        tracing::debug!(%id, ?caps, "admitted");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Body;
    use glam::{IVec2, UVec2};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Configurable test entity.
    struct Probe {
        body: Body,
        caps: Capabilities,
        velocity: IVec2,
        initialized: bool,
        evaluations: u32,
        hits: Vec<EntityId>,
        spawn_on_update: Option<Box<Probe>>,
        victim: Option<EntityId>,
    }

    impl Probe {
        fn solid(x: i32, y: i32, side: u32) -> Self {
            Self {
                body: Body::new(IVec2::new(x, y), UVec2::splat(side)),
                caps: Capabilities::POSITION
                    | Capabilities::COLLISION_SHAPE
                    | Capabilities::RENDER_SHAPE
                    | Capabilities::EVALUATE
                    | Capabilities::UPDATE,
                velocity: IVec2::ZERO,
                initialized: false,
                evaluations: 0,
                hits: Vec::new(),
                spawn_on_update: None,
                victim: None,
            }
        }

        fn initialized(x: i32, y: i32, side: u32) -> Self {
            let mut probe = Self::solid(x, y, side);
            probe.caps = probe.caps | Capabilities::INITIALIZE;
            probe
        }

        fn moving(mut self, dx: i32, dy: i32) -> Self {
            self.velocity = IVec2::new(dx, dy);
            self
        }
    }

    impl Entity for Probe {
        fn capabilities(&self) -> Capabilities {
            self.caps
        }

        fn position(&self) -> Option<Point> {
            Some(self.body.position())
        }

        fn collision_size(&self) -> Option<Size> {
            Some(self.body.size())
        }

        fn render_size(&self) -> Option<Size> {
            Some(self.body.size())
        }

        fn initialize(&mut self, _ctx: &mut TickContext) {
            self.initialized = true;
        }

        fn evaluate(&mut self, ctx: &mut TickContext, _elapsed: u32) {
            self.evaluations += 1;
            self.body.move_by(self.velocity);
            if let Some(victim) = self.victim.take() {
                ctx.remove_object(victim);
            }
        }

        fn update(&mut self, ctx: &mut TickContext, force: bool) -> bool {
            if let Some(child) = self.spawn_on_update.take() {
                ctx.create_object(*child);
            }
            self.body.take_changed(force)
        }

        fn on_collision(&mut self, other: EntityId) {
            self.hits.push(other);
        }

        fn is_dead(&self) -> bool {
            self.body.is_dead()
        }

        fn kill(&mut self) {
            self.body.kill();
        }
    }

    /// Logs its label each time it is evaluated.
    struct Recorder {
        label: u32,
        log: Rc<RefCell<Vec<u32>>>,
    }

    impl Entity for Recorder {
        fn capabilities(&self) -> Capabilities {
            Capabilities::EVALUATE
        }

        fn evaluate(&mut self, _ctx: &mut TickContext, _elapsed: u32) {
            self.log.borrow_mut().push(self.label);
        }

        fn is_dead(&self) -> bool {
            false
        }

        fn kill(&mut self) {}
    }

    fn pair(a: EntityId, b: EntityId) -> Pair {
        (a.min(b), a.max(b))
    }

    fn world() -> World {
        World::new(UVec2::new(100, 100))
    }

    #[test]
    fn two_overlapping_boxes_collide() {
        let mut w = world();
        let a = w.create_object(Probe::initialized(0, 0, 10));
        let b = w.create_object(Probe::initialized(5, 5, 10));

        let report = w.tick(16);
        assert_eq!(report.tick, 1);
        assert_eq!(report.admitted, 2);
        assert_eq!(report.collisions, Collisions::from([pair(a, b)]));
        assert_eq!(w.check_collisions(), Collisions::from([pair(a, b)]));
        assert!(w.get_as::<Probe>(a).unwrap().initialized);
    }

    #[test]
    fn plain_entities_join_at_end_of_update_phase() {
        let mut w = world();
        let a = w.create_object(Probe::solid(0, 0, 10));
        let b = w.create_object(Probe::solid(5, 5, 10));
        assert_eq!(w.pending_creation(), &[a, b]);
        assert!(!w.is_live(a));

        let first = w.tick(16);
        assert!(first.collisions.is_empty());
        assert_eq!(first.admitted, 2);
        assert!(w.is_live(a) && w.is_live(b));
        // Admitted after the evaluate phase, so not evaluated yet.
        assert_eq!(w.get_as::<Probe>(a).unwrap().evaluations, 0);

        let second = w.tick(16);
        assert_eq!(second.collisions, Collisions::from([pair(a, b)]));
        assert_eq!(w.get_as::<Probe>(a).unwrap().evaluations, 1);
    }

    #[test]
    fn entity_spawned_during_update_collides_next_tick() {
        let mut w = world();
        let mut parent = Probe::initialized(0, 0, 10);
        parent.spawn_on_update = Some(Box::new(Probe::solid(5, 5, 10)));
        let a = w.create_object(parent);

        let first = w.tick(16);
        assert!(first.collisions.is_empty());
        assert_eq!(w.objects().len(), 2);
        let child = w.objects().ids().find(|id| *id != a).unwrap();
        assert!(w.is_live(child));

        let second = w.tick(16);
        assert_eq!(second.collisions, Collisions::from([pair(a, child)]));
    }

    #[test]
    fn initializing_spawn_waits_for_next_tick() {
        let mut w = world();
        let mut parent = Probe::initialized(0, 0, 10);
        parent.spawn_on_update = Some(Box::new(Probe::initialized(5, 5, 10)));
        let a = w.create_object(parent);

        let first = w.tick(16);
        assert!(first.collisions.is_empty());
        let child = w.objects().ids().find(|id| *id != a).unwrap();
        assert!(!w.is_live(child));
        assert_eq!(w.pending_initialization(), &[child]);
        assert!(!w.get_as::<Probe>(child).unwrap().initialized);

        let second = w.tick(16);
        assert!(w.is_live(child));
        assert!(w.get_as::<Probe>(child).unwrap().initialized);
        assert!(w.pending_initialization().is_empty());
        // Admitted in phase 1, so already indexed for this tick's pairs.
        assert_eq!(second.collisions, Collisions::from([pair(a, child)]));
    }

    #[test]
    fn leaving_the_world_kills_and_evicts() {
        let mut w = world();
        let id = w.create_object(Probe::initialized(90, 10, 4).moving(20, 0));

        let report = w.tick(16);
        assert_eq!(report.evicted, 1);
        assert!(w.get_object(id).is_none());
        assert!(!w.is_live(id));
        assert!(!w.collision_index().contains(id));
        assert!(!w.render_index().contains(id));
        assert_eq!(w.update_count(), 0);
        assert_eq!(w.evaluate_count(), 0);
    }

    #[test]
    fn negative_positions_are_out_of_bounds() {
        let mut w = world();
        let id = w.create_object(Probe::initialized(2, 50, 4).moving(-5, 0));
        w.tick(16);
        assert!(w.get_object(id).is_none());
    }

    #[test]
    fn moving_entity_is_reindexed() {
        let mut w = world();
        let id = w.create_object(Probe::initialized(10, 10, 4).moving(30, 30));
        w.tick(16);
        assert_eq!(
            w.collision_index().shape(id),
            Some(Aabb::from_position_size(IVec2::new(40, 40), UVec2::splat(4)))
        );
        assert!(w.collision_index().query_point(IVec2::new(12, 12)).is_empty());
    }

    #[test]
    fn idle_entities_leave_indices_untouched() {
        let mut w = world();
        w.create_object(Probe::initialized(10, 10, 4));
        w.create_object(Probe::initialized(50, 50, 8));
        w.tick(16);
        let collision = w.collision_index().clone();
        let render = w.render_index().clone();

        w.tick(16);
        assert_eq!(w.collision_index(), &collision);
        assert_eq!(w.render_index(), &render);
    }

    #[test]
    fn removal_is_deferred_and_idempotent() {
        let mut w = world();
        let id = w.create_object(Probe::initialized(10, 10, 4));
        w.tick(16);

        assert!(w.remove_object(id));
        assert!(w.remove_object(id));
        assert!(w.get_object(id).is_some());
        assert_eq!(w.pending_removal().len(), 1);

        let report = w.tick(16);
        assert_eq!(report.evicted, 1);
        assert!(!w.remove_object(id));
        assert_eq!(w.remove_objects(), 0);
    }

    #[test]
    fn double_kill_evicts_once() {
        let mut w = world();
        let id = w.create_object(Probe::initialized(10, 10, 4));
        w.tick(16);
        w.get_object_mut(id).unwrap().kill();
        w.get_object_mut(id).unwrap().kill();
        w.remove_object(id);
        w.check_dead_objects();
        w.check_dead_objects();
        assert_eq!(w.remove_objects(), 1);
        assert_eq!(w.live_count(), 0);
    }

    #[test]
    fn pending_entity_can_be_removed_before_admission() {
        let mut w = world();
        let id = w.create_object(Probe::initialized(10, 10, 4));
        w.remove_object(id);

        let report = w.tick(16);
        assert_eq!(report.admitted, 0);
        assert_eq!(report.evicted, 1);
        assert!(w.pending_initialization().is_empty());
        assert!(w.objects().is_empty());
    }

    #[test]
    fn behaviours_can_remove_other_entities() {
        let mut w = world();
        let target = w.create_object(Probe::initialized(60, 60, 4));
        let mut reaper = Probe::initialized(10, 10, 4);
        reaper.victim = Some(target);
        w.create_object(reaper);

        w.tick(16);
        assert!(w.get_object(target).is_none());
        assert_eq!(w.objects().len(), 1);
    }

    #[test]
    fn evaluation_follows_id_order() {
        let mut w = world();
        let log = Rc::new(RefCell::new(Vec::new()));
        for label in 0..5 {
            w.create_object(Recorder {
                label,
                log: Rc::clone(&log),
            });
        }
        w.tick(16);
        w.tick(16);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn collision_callback_sees_pairs_before_update() {
        let mut w = world();
        let a = w.create_object(Probe::initialized(0, 0, 10));
        let b = w.create_object(Probe::initialized(5, 5, 10));

        let mut seen = 0;
        w.tick_with(16, |world, pairs| {
            seen = pairs.len();
            world.dispatch_collisions(pairs);
        });
        assert_eq!(seen, 1);
        assert_eq!(w.get_as::<Probe>(a).unwrap().hits, vec![b]);
        assert_eq!(w.get_as::<Probe>(b).unwrap().hits, vec![a]);
    }

    #[test]
    fn cameras_see_render_shapes_in_viewport() {
        let mut w = world();
        let inside = w.create_object(Probe::initialized(10, 10, 4));
        w.create_object(Probe::initialized(80, 80, 4));
        let camera = w.create_camera(IVec2::ZERO, UVec2::new(50, 50));
        let idle = w.create_camera(IVec2::ZERO, UVec2::new(100, 100));
        w.camera_mut(idle).unwrap().set_active(false);

        w.tick(16);
        assert_eq!(w.camera(camera).unwrap().visible_objects(), &[inside]);
        assert!(w.camera(idle).unwrap().visible_objects().is_empty());

        w.camera_mut(camera).unwrap().set_position(IVec2::new(200, 200));
        w.tick(16);
        assert!(w.camera(camera).unwrap().visible_objects().is_empty());
    }

    #[test]
    fn find_object_at_prefers_highest_id() {
        let mut w = world();
        let lower = w.create_object(Probe::initialized(0, 0, 20));
        let upper = w.create_object(Probe::initialized(5, 5, 20));
        w.tick(16);
        assert_eq!(w.find_object_at(IVec2::new(10, 10)), Some(upper.max(lower)));
        assert_eq!(w.find_object_at(IVec2::new(2, 2)), Some(lower));
        assert_eq!(w.find_object_at(IVec2::new(90, 90)), None);
    }

    #[test]
    fn resizing_keeps_tracked_entities_queryable() {
        let mut w = World::new(UVec2::new(32, 32));
        let a = w.create_object(Probe::initialized(20, 20, 6));
        let b = w.create_object(Probe::initialized(24, 24, 6));
        w.tick(16);
        w.set_world_size(UVec2::new(512, 512));
        assert_eq!(w.check_collisions(), Collisions::from([pair(a, b)]));
        assert_eq!(w.collision_index().world_size(), UVec2::new(512, 512));
    }

    fn world_with<E: Entity>(entities: impl IntoIterator<Item = E>) -> (World, Vec<EntityId>) {
        let mut w = world();
        let ids = entities.into_iter().map(|e| w.create_object(e)).collect();
        (w, ids)
    }

    fn first_as<'a, T: Entity>(w: &'a World, ids: &[EntityId]) -> Option<&'a T> {
        w.get_as::<T>(*ids.first()?)
    }

    #[test]
    fn generic_entities_are_stored_and_downcast() {
        let (mut w, ids) =
            world_with([Probe::initialized(0, 0, 10), Probe::initialized(5, 5, 10)]);
        w.tick(16);
        assert!(first_as::<Probe>(&w, &ids).unwrap().initialized);
        assert!(first_as::<Recorder>(&w, &ids).is_none());
        assert_eq!(w.check_collisions(), Collisions::from([pair(ids[0], ids[1])]));
    }

    #[test]
    fn from_config_uses_world_size() {
        let config = WorldConfig {
            world_size: UVec2::new(320, 240),
            tick_millis: 10,
        };
        let w = World::from_config(&config);
        assert_eq!(w.world_size(), UVec2::new(320, 240));
        assert_eq!(w.render_index().world_size(), UVec2::new(320, 240));
    }
}
