//! Occupancy module - spatial index of committed blocks
//!
//! The grid is 7x7 and each cell records which committed block (if any)
//! covers it. Uses a flat array, row-major (y * GRID_SIZE + x), so overlap
//! checks are a single lookup per candidate cell instead of a scan over every
//! placed block.
//!
//! [`OccupancyGrid::would_conflict`] is the only legality predicate in the
//! crate; every mutating editor operation goes through it.

use crate::geometry::{block_cells, Placement};
use crate::types::{in_bounds, BlockId, PlacedBlock, GRID_CELLS, GRID_SIZE};

/// Why a placement is illegal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// A cell falls outside `[0,6]x[0,6]`
    OutOfBounds { x: i32, y: i32 },
    /// A cell is already covered by another committed block
    Overlap { x: i32, y: i32, with: BlockId },
}

/// Committed-cell index for the 7x7 grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: [Option<BlockId>; GRID_CELLS],
}

impl OccupancyGrid {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    /// Build an index from a set of committed blocks
    pub fn from_blocks<'a>(blocks: impl IntoIterator<Item = &'a PlacedBlock>) -> Self {
        let mut grid = Self::new();
        for block in blocks {
            grid.insert(block);
        }
        grid
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if !in_bounds(x, y) {
            return None;
        }
        Some((y * GRID_SIZE + x) as usize)
    }

    /// Block covering (x, y), `None` if empty or out of bounds
    pub fn owner(&self, x: i32, y: i32) -> Option<BlockId> {
        Self::index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and uncovered
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(Self::index(x, y).map(|idx| self.cells[idx]), Some(None))
    }

    /// Mark the in-bounds cells of a block as covered by it
    ///
    /// Cells outside the grid are ignored; restored layouts are not validated.
    pub fn insert(&mut self, block: &PlacedBlock) {
        for (x, y) in block_cells(block) {
            if let Some(idx) = Self::index(x, y) {
                self.cells[idx] = Some(block.id);
            }
        }
    }

    /// Clear every cell covered by `id`
    pub fn remove(&mut self, id: BlockId) {
        for cell in self.cells.iter_mut().filter(|c| **c == Some(id)) {
            *cell = None;
        }
    }

    /// Number of covered cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row-major view of the index
    pub fn cells(&self) -> &[Option<BlockId>] {
        &self.cells
    }

    /// Clear the entire index
    pub fn clear(&mut self) {
        self.cells = [None; GRID_CELLS];
    }

    /// First reason a placement would be illegal, if any
    ///
    /// Boundary is always checked. Overlap with committed blocks other than
    /// `exclude` is checked only when `check_overlap` is set.
    pub fn conflict(
        &self,
        placement: &Placement,
        exclude: Option<BlockId>,
        check_overlap: bool,
    ) -> Option<Conflict> {
        for (x, y) in placement.cells() {
            let Some(idx) = Self::index(x, y) else {
                return Some(Conflict::OutOfBounds { x, y });
            };
            if !check_overlap {
                continue;
            }
            match self.cells[idx] {
                Some(with) if Some(with) != exclude => {
                    return Some(Conflict::Overlap { x, y, with });
                }
                _ => {}
            }
        }
        None
    }

    /// Whether a placement is illegal (boundary always, overlap on request)
    pub fn would_conflict(
        &self,
        placement: &Placement,
        exclude: Option<BlockId>,
        check_overlap: bool,
    ) -> bool {
        self.conflict(placement, exclude, check_overlap).is_some()
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}
