use std::collections::{BTreeMap, BTreeSet};

use tessera_common::{Aabb, EntityId, Point, Size, clamp_point};

use crate::grid::{CellCoord, CellRange, LevelGrid};

/// Canonical overlapping pair, always ordered `(lower, higher)`.
pub type Pair = (EntityId, EntityId);

/// Per-entry bookkeeping: the indexed shape plus where it currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    shape: Aabb,
    level: u32,
    roi: CellRange,
}

/// A populated level: its grid plus the number of entries binned there.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Level {
    grid: LevelGrid,
    population: usize,
}

/// Summary counters for tooling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Entries currently tracked.
    pub tracked: usize,
    /// Level grids currently allocated.
    pub levels: usize,
    /// Id placements summed over every cell of every level.
    pub placements: usize,
}

/// Hierarchical spatial grid for broad-phase overlap queries.
///
/// Each shape is binned into the level `floor(log2(max(width, height)))`,
/// whose cells are `2^(level + 1)` wide, so a shape never spans more than two
/// cells per axis and only meets similarly sized neighbours there. Level
/// grids cover the whole world; they are allocated on first use and dropped
/// as soon as their population returns to zero.
///
/// The index caches each entry's shape. Callers push fresh geometry through
/// [`update`](Self::update); nothing here points back at the owning entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpatialIndex {
    world_size: Size,
    levels: BTreeMap<u32, Level>,
    entries: BTreeMap<EntityId, Entry>,
}

impl SpatialIndex {
    pub fn new(world_size: Size) -> Self {
        Self {
            world_size,
            ..Self::default()
        }
    }

    pub fn world_size(&self) -> Size {
        self.world_size
    }

    /// Resize the world. Entries already tracked are re-binned into grids
    /// sized for the new world.
    pub fn set_world_size(&mut self, size: Size) {
        if size == self.world_size {
            return;
        }
        self.world_size = size;
        if self.entries.is_empty() {
            self.levels.clear();
            return;
        }

        tracing::debug!(
            width = size.x,
            height = size.y,
            entries = self.entries.len(),
            "world resized, reindexing"
        );
        let entries = std::mem::take(&mut self.entries);
        self.levels.clear();
        for (id, entry) in entries {
            let rebinned = self.entry_for(entry.shape);
            self.place(id, rebinned);
        }
    }

    /// Start tracking `id` with `shape`.
    ///
    /// Adding an id that is already tracked is a no-op and keeps the
    /// previously indexed shape; use [`update`](Self::update) to move it.
    pub fn add(&mut self, id: EntityId, shape: Aabb) -> bool {
        if self.entries.contains_key(&id) {
            tracing::debug!(%id, "add ignored, already tracked");
            return false;
        }
        let entry = self.entry_for(shape);
        tracing::debug!(%id, level = entry.level, "indexed");
        self.place(id, entry);
        true
    }

    /// Stop tracking `id`. Returns the shape it was indexed with.
    pub fn remove(&mut self, id: EntityId) -> Option<Aabb> {
        let entry = self.unplace(id)?;
        tracing::debug!(%id, level = entry.level, "unindexed");
        Some(entry.shape)
    }

    /// Refresh the shape of a tracked id.
    ///
    /// Cell membership only changes when the level or region of interest
    /// does; the cached shape is always refreshed. Returns true if the entry
    /// moved between cells. Unknown ids are ignored.
    pub fn update(&mut self, id: EntityId, shape: Aabb) -> bool {
        let Some(current) = self.entries.get_mut(&id) else {
            return false;
        };
        let level = level_for(&shape);
        let roi = roi_for(level, &shape, self.world_size);
        if level == current.level && roi == current.roi {
            current.shape = shape;
            return false;
        }

        self.unplace(id);
        self.place(id, Entry { shape, level, roi });
        tracing::trace!(%id, level, "moved");
        true
    }

    /// Ids whose shape strictly contains `point`.
    pub fn query_point(&self, point: Point) -> BTreeSet<EntityId> {
        let clamped = clamp_point(point, self.world_size);
        let mut hits = BTreeSet::new();
        for (&level, slot) in &self.levels {
            let cell = cell_for(level, clamped);
            let Some(ids) = slot.grid.cell(cell) else {
                continue;
            };
            for id in ids {
                if self.entries[id].shape.contains_strict(point) {
                    hits.insert(*id);
                }
            }
        }
        hits
    }

    /// Ids whose shape overlaps `rect`, edges included.
    pub fn query_rect(&self, rect: Aabb) -> BTreeSet<EntityId> {
        let mut hits = BTreeSet::new();
        for (&level, slot) in &self.levels {
            for cell in roi_for(level, &rect, self.world_size).cells() {
                let Some(ids) = slot.grid.cell(cell) else {
                    continue;
                };
                for id in ids {
                    if rect.overlaps(&self.entries[id].shape) {
                        hits.insert(*id);
                    }
                }
            }
        }
        hits
    }

    /// Every pair of tracked entries whose shapes overlap, as `(lower, higher)`.
    pub fn overlapping_pairs(&self) -> BTreeSet<Pair> {
        let mut pairs = BTreeSet::new();
        for (&id, entry) in &self.entries {
            for other in self.query_rect(entry.shape) {
                if other == id {
                    continue;
                }
                pairs.insert((id.min(other), id.max(other)));
            }
        }
        pairs
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The shape `id` is currently indexed with.
    pub fn shape(&self, id: EntityId) -> Option<Aabb> {
        self.entries.get(&id).map(|e| e.shape)
    }

    pub fn level_of(&self, id: EntityId) -> Option<u32> {
        self.entries.get(&id).map(|e| e.level)
    }

    /// Levels that currently have an allocated grid, ascending.
    pub fn populated_levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    /// Read-only view of one level's cells.
    pub fn level_grid(&self, level: u32) -> Option<&LevelGrid> {
        self.levels.get(&level).map(|l| &l.grid)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            tracked: self.entries.len(),
            levels: self.levels.len(),
            placements: self.levels.values().map(|l| l.grid.placements()).sum(),
        }
    }

    /// Drop every entry and level grid; the world size is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.levels.clear();
    }

    fn entry_for(&self, shape: Aabb) -> Entry {
        let level = level_for(&shape);
        Entry {
            shape,
            level,
            roi: roi_for(level, &shape, self.world_size),
        }
    }

    fn place(&mut self, id: EntityId, entry: Entry) {
        let world_size = self.world_size;
        let slot = self.levels.entry(entry.level).or_insert_with(|| {
            let cell = cell_size(entry.level);
            let columns = grid_extent(world_size.x, cell);
            let rows = grid_extent(world_size.y, cell);
            tracing::debug!(level = entry.level, columns, rows, "level grid allocated");
            Level {
                grid: LevelGrid::new(columns, rows),
                population: 0,
            }
        });
        slot.grid.insert(entry.roi, id);
        slot.population += 1;
        self.entries.insert(id, entry);
    }

    fn unplace(&mut self, id: EntityId) -> Option<Entry> {
        let entry = self.entries.remove(&id)?;
        if let Some(slot) = self.levels.get_mut(&entry.level) {
            slot.grid.remove(entry.roi, id);
            slot.population = slot.population.saturating_sub(1);
            if slot.population == 0 {
                self.levels.remove(&entry.level);
                tracing::debug!(level = entry.level, "level grid released");
            }
        }
        Some(entry)
    }
}

/// Size class of a shape: `floor(log2(max side))`, with degenerate shapes at level 0.
pub fn level_for(shape: &Aabb) -> u32 {
    shape.max_side().checked_ilog2().unwrap_or(0)
}

/// Cell edge length at `level`: `2^(level + 1)`.
pub fn cell_size(level: u32) -> u64 {
    1u64 << (level + 1)
}

fn grid_extent(world: u32, cell: u64) -> u32 {
    (u64::from(world) / cell + 1) as u32
}

fn cell_for(level: u32, point: Point) -> CellCoord {
    let cell = cell_size(level);
    // `point` is already clamped into [0, world], so both axes are non-negative.
    CellCoord::new(
        (point.x.max(0) as u64 / cell) as u32,
        (point.y.max(0) as u64 / cell) as u32,
    )
}

fn roi_for(level: u32, shape: &Aabb, world_size: Size) -> CellRange {
    let clamped = shape.clamp_to(world_size);
    CellRange::new(
        cell_for(level, clamped.top_left),
        cell_for(level, clamped.bottom_right),
    )
}
