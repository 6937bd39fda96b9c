use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};

/// Integer world-space point. Positions may leave the world and go negative.
pub type Point = IVec2;

/// Integer extent of a shape, a camera viewport or the world itself.
pub type Size = UVec2;

/// Unique identifier for a live entity.
///
/// Ids come from [`IdAllocator`](crate::IdAllocator) and are unique among
/// live entities only; a freed id can be handed out again once the counter
/// wraps back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned bounding box given by its top-left and bottom-right corners.
///
/// `top_left <= bottom_right` componentwise is assumed, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Aabb {
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Box spanning `position .. position + size`.
    pub fn from_position_size(position: Point, size: Size) -> Self {
        let grow = |origin: i32, extent: u32| {
            origin.saturating_add(i32::try_from(extent).unwrap_or(i32::MAX))
        };
        Self {
            top_left: position,
            bottom_right: IVec2::new(grow(position.x, size.x), grow(position.y, size.y)),
        }
    }

    pub fn width(&self) -> u32 {
        self.bottom_right.x.abs_diff(self.top_left.x)
    }

    pub fn height(&self) -> u32 {
        self.bottom_right.y.abs_diff(self.top_left.y)
    }

    /// The larger of width and height; drives spatial level selection.
    pub fn max_side(&self) -> u32 {
        self.width().max(self.height())
    }

    /// Strict containment: a point on the boundary is outside.
    pub fn contains_strict(&self, point: Point) -> bool {
        point.x > self.top_left.x
            && point.x < self.bottom_right.x
            && point.y > self.top_left.y
            && point.y < self.bottom_right.y
    }

    /// Separating-axis overlap test. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.bottom_right.x < other.top_left.x || other.bottom_right.x < self.top_left.x {
            return false;
        }
        if self.bottom_right.y < other.top_left.y || other.bottom_right.y < self.top_left.y {
            return false;
        }
        true
    }

    /// Clamp both corners into `[0, bounds]`.
    pub fn clamp_to(&self, bounds: Size) -> Aabb {
        Aabb {
            top_left: clamp_point(self.top_left, bounds),
            bottom_right: clamp_point(self.bottom_right, bounds),
        }
    }
}

/// Clamp a point into `[0, bounds]` on both axes.
pub fn clamp_point(point: Point, bounds: Size) -> Point {
    let max = IVec2::new(
        i32::try_from(bounds.x).unwrap_or(i32::MAX),
        i32::try_from(bounds.y).unwrap_or(i32::MAX),
    );
    point.clamp(IVec2::ZERO, max)
}

/// True when `point` lies inside `[0, bounds)` on both axes.
pub fn within_bounds(point: Point, bounds: Size) -> bool {
    point.x >= 0 && point.y >= 0 && (point.x as u32) < bounds.x && (point.y as u32) < bounds.y
}
