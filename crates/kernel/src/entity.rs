use std::any::Any;
use std::ops::BitOr;

use tessera_common::{Point, Size};

use crate::context::TickContext;

/// Set of optional behaviours an entity declares.
///
/// Read once, when the entity is admitted; registry membership never changes
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Self = Self(0);
    /// Has a world position.
    pub const POSITION: Self = Self(1 << 0);
    /// Indexed for collision pairs.
    pub const COLLISION_SHAPE: Self = Self(1 << 1);
    /// Indexed for camera visibility.
    pub const RENDER_SHAPE: Self = Self(1 << 2);
    /// Receives time-driven `evaluate` calls.
    pub const EVALUATE: Self = Self(1 << 3);
    /// Receives geometry `update` calls.
    pub const UPDATE: Self = Self(1 << 4);
    /// Needs `initialize` before admission.
    pub const INITIALIZE: Self = Self(1 << 5);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Downcasting support, implemented for every `'static` type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An object living in the world.
///
/// Only `capabilities`, `is_dead` and `kill` are mandatory. The accessors
/// matching a declared capability must return `Some`; an entity declaring
/// `COLLISION_SHAPE` without a position and collision size is not indexed.
pub trait Entity: AsAny + 'static {
    fn capabilities(&self) -> Capabilities;

    fn position(&self) -> Option<Point> {
        None
    }

    /// Extent of the collision box anchored at `position`.
    fn collision_size(&self) -> Option<Size> {
        None
    }

    /// Extent of the visibility box anchored at `position`.
    fn render_size(&self) -> Option<Size> {
        None
    }

    /// One-time setup, run at the start of the tick after creation.
    fn initialize(&mut self, _ctx: &mut TickContext) {}

    /// Time-driven behaviour; `elapsed` is in milliseconds.
    fn evaluate(&mut self, _ctx: &mut TickContext, _elapsed: u32) {}

    /// Recompute geometry. Returns true if position or size changed.
    ///
    /// With `force == false` implementations should only report a change
    /// when something marked them changed since the last call.
    fn update(&mut self, _ctx: &mut TickContext, force: bool) -> bool {
        force
    }

    /// Called by [`World::dispatch_collisions`](crate::World::dispatch_collisions)
    /// once per overlapping partner.
    fn on_collision(&mut self, _other: tessera_common::EntityId) {}

    fn is_dead(&self) -> bool;

    fn kill(&mut self);
}

/// Position, size and lifecycle flags shared by most concrete entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    position: Point,
    size: Size,
    changed: bool,
    dead: bool,
}

impl Body {
    /// A fresh body starts marked changed so its first update is reported.
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            changed: true,
            dead: false,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn move_to(&mut self, position: Point) {
        if position != self.position {
            self.position = position;
            self.changed = true;
        }
    }

    pub fn move_by(&mut self, delta: Point) {
        self.move_to(self.position.saturating_add(delta));
    }

    pub fn resize(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.changed = true;
        }
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Consume the changed flag. `force` reports a change regardless.
    pub fn take_changed(&mut self, force: bool) -> bool {
        let changed = force || self.changed;
        self.changed = false;
        changed
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn kill(&mut self) {
        self.dead = true;
    }
}
