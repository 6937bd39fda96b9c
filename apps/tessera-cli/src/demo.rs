//! Moving boxes used by the `simulate` command.

use glam::{IVec2, UVec2};
use tessera_common::{EntityId, Point, Size, within_bounds};
use tessera_kernel::{Body, Capabilities, Entity, TickContext};

/// Deterministic splitmix64 stream.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform-ish value in `[low, high]`. `high < low` yields `low`.
    pub fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        let span = (i64::from(high) - i64::from(low) + 1) as u64;
        (i64::from(low) + (self.next_u64() % span) as i64) as i32
    }
}

/// A box drifting at constant velocity.
///
/// Bouncers reflect off the world edges; drifters leave the world and get
/// killed by the update phase.
#[derive(Debug, Clone)]
pub struct Mover {
    body: Body,
    velocity: IVec2,
    bounce: bool,
    hits: u32,
}

impl Mover {
    pub fn new(position: Point, size: Size, velocity: IVec2, bounce: bool) -> Self {
        Self {
            body: Body::new(position, size),
            velocity,
            bounce,
            hits: 0,
        }
    }

    /// A random mover fully inside a world of `world_size`.
    pub fn random(rng: &mut SplitMix64, world_size: Size) -> Self {
        let width = i32::try_from(world_size.x).unwrap_or(i32::MAX);
        let height = i32::try_from(world_size.y).unwrap_or(i32::MAX);
        let side = rng.range(2, 16);
        let position = IVec2::new(
            rng.range(0, (width - side).max(0)),
            rng.range(0, (height - side).max(0)),
        );
        let velocity = IVec2::new(rng.range(-3, 3), rng.range(-3, 3));
        let bounce = rng.range(0, 3) != 0;
        Self::new(position, UVec2::splat(side as u32), velocity, bounce)
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    #[cfg(test)]
    pub fn velocity(&self) -> IVec2 {
        self.velocity
    }
}

impl Entity for Mover {
    fn capabilities(&self) -> Capabilities {
        Capabilities::POSITION
            | Capabilities::COLLISION_SHAPE
            | Capabilities::RENDER_SHAPE
            | Capabilities::EVALUATE
            | Capabilities::UPDATE
            | Capabilities::INITIALIZE
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

    fn initialize(&mut self, ctx: &mut TickContext) {
        tracing::trace!(tick = ctx.tick(), bounce = self.bounce, "mover initialized");
    }

    fn evaluate(&mut self, ctx: &mut TickContext, _elapsed: u32) {
        if self.velocity == IVec2::ZERO {
            return;
        }
        let next = self.body.position().saturating_add(self.velocity);
        if self.bounce && !within_bounds(next, ctx.world_size()) {
            let world = ctx.world_size().as_ivec2();
            if next.x < 0 || next.x >= world.x {
                self.velocity.x = -self.velocity.x;
            }
            if next.y < 0 || next.y >= world.y {
                self.velocity.y = -self.velocity.y;
            }
        }
        self.body.move_by(self.velocity);
    }

    fn update(&mut self, _ctx: &mut TickContext, force: bool) -> bool {
        self.body.take_changed(force)
    }

    fn on_collision(&mut self, _other: EntityId) {
        self.hits += 1;
    }

    fn is_dead(&self) -> bool {
        self.body.is_dead()
    }

    fn kill(&mut self) {
        self.body.kill();
    }
}
