use std::collections::BTreeSet;
use tessera_common::EntityId;

/// A cell coordinate within one level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: u32,
    pub y: u32,
}

impl CellCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Inclusive rectangle of cells: the region of interest of a shape at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub min: CellCoord,
    pub max: CellCoord,
}

impl CellRange {
    pub fn new(min: CellCoord, max: CellCoord) -> Self {
        Self { min, max }
    }

    /// Row-major walk over every cell in the range.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + use<> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| CellCoord::new(x, y)))
    }

    pub fn cell_count(&self) -> usize {
        if self.max.x < self.min.x || self.max.y < self.min.y {
            return 0;
        }
        ((self.max.x - self.min.x + 1) as usize) * ((self.max.y - self.min.y + 1) as usize)
    }
}

/// Dense grid of id sets covering the whole world at one cell size.
///
/// Sized once at construction. Empty cells cost one empty `BTreeSet`, which
/// does not allocate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGrid {
    columns: u32,
    rows: u32,
    cells: Vec<BTreeSet<EntityId>>,
}

impl LevelGrid {
    /// Create a grid of `columns x rows` empty cells.
    pub fn new(columns: u32, rows: u32) -> Self {
        assert!(
            columns > 0 && rows > 0,
            "level grid dimensions must be non-zero (got {columns}x{rows})"
        );
        Self {
            columns,
            rows,
            cells: vec![BTreeSet::new(); columns as usize * rows as usize],
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Ids stored in a cell. Out-of-range coordinates read as an empty cell.
    pub fn cell(&self, coord: CellCoord) -> Option<&BTreeSet<EntityId>> {
        self.offset(coord).map(|i| &self.cells[i])
    }

    /// Insert `id` into every cell of `range`.
    pub fn insert(&mut self, range: CellRange, id: EntityId) {
        for coord in range.cells() {
            if let Some(i) = self.offset(coord) {
                self.cells[i].insert(id);
            }
        }
    }

    /// Erase `id` from every cell of `range`.
    pub fn remove(&mut self, range: CellRange, id: EntityId) {
        for coord in range.cells() {
            if let Some(i) = self.offset(coord) {
                self.cells[i].remove(&id);
            }
        }
    }

    /// Total number of id placements across all cells.
    pub fn placements(&self) -> usize {
        self.cells.iter().map(BTreeSet::len).sum()
    }

    fn offset(&self, coord: CellCoord) -> Option<usize> {
        (coord.x < self.columns && coord.y < self.rows)
            .then(|| coord.y as usize * self.columns as usize + coord.x as usize)
    }
}
