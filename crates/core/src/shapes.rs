//! Shapes module - the block catalog
//!
//! Every block kind has one footprint at rotation 0. Offsets are relative to
//! the block anchor and are all non-negative, so a fresh block at offset
//! (0, 0) always lies inside the grid.

use arrayvec::ArrayVec;

use crate::types::BlockKind;

/// Offset of a single cell relative to the block anchor
pub type CellOffset = (i32, i32);

/// Largest footprint in the catalog
pub const MAX_CELLS: usize = 5;

/// Footprint of a block kind at rotation 0
pub type Shape = &'static [CellOffset];

const DOMINO: [CellOffset; 2] = [(0, 0), (1, 0)];
const I3: [CellOffset; 3] = [(0, 0), (1, 0), (2, 0)];
const L3: [CellOffset; 3] = [(0, 0), (0, 1), (1, 1)];
const I4: [CellOffset; 4] = [(0, 0), (1, 0), (2, 0), (3, 0)];
const O4: [CellOffset; 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
const T4: [CellOffset; 4] = [(0, 0), (1, 0), (2, 0), (1, 1)];
const S4: [CellOffset; 4] = [(1, 0), (2, 0), (0, 1), (1, 1)];
const L4: [CellOffset; 4] = [(0, 0), (0, 1), (0, 2), (1, 2)];
const P5: [CellOffset; 5] = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)];
const U5: [CellOffset; 5] = [(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)];
const X5: [CellOffset; 5] = [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)];

/// Get the unrotated footprint for a block kind
pub fn get_shape(kind: BlockKind) -> Shape {
    match kind {
        BlockKind::Domino => &DOMINO,
        BlockKind::I3 => &I3,
        BlockKind::L3 => &L3,
        BlockKind::I4 => &I4,
        BlockKind::O4 => &O4,
        BlockKind::T4 => &T4,
        BlockKind::S4 => &S4,
        BlockKind::L4 => &L4,
        BlockKind::P5 => &P5,
        BlockKind::U5 => &U5,
        BlockKind::X5 => &X5,
    }
}

/// Footprint shifted so its minimum x and y are 0
///
/// Used to draw palette previews independent of where the anchor sits.
pub fn preview_cells(kind: BlockKind) -> ArrayVec<CellOffset, MAX_CELLS> {
    let shape = get_shape(kind);
    let min_x = shape.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = shape.iter().map(|&(_, y)| y).min().unwrap_or(0);
    shape.iter().map(|&(x, y)| (x - min_x, y - min_y)).collect()
}

/// Width and height of the footprint's bounding box
pub fn preview_size(kind: BlockKind) -> (i32, i32) {
    let cells = preview_cells(kind);
    let w = cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
    let h = cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
    (w, h)
}
