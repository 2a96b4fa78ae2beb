//! Geometry module - quarter-turn rotation and absolute cell placement
//!
//! All functions here are pure: the same shape, rotation and offset always
//! produce the same cells, in the same order as the shape definition.

use arrayvec::ArrayVec;

use crate::shapes::{get_shape, CellOffset, MAX_CELLS};
use crate::types::{BlockKind, PlacedBlock, Rotation};

/// Cells of one block, in shape order
pub type Cells = ArrayVec<CellOffset, MAX_CELLS>;

/// Rotate a single offset about the anchor
#[inline]
pub fn rotate_offset((x, y): CellOffset, rotation: Rotation) -> CellOffset {
    match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (-y, x),
        Rotation::Deg180 => (-x, -y),
        Rotation::Deg270 => (y, -x),
    }
}

/// Rotate every offset of a shape
///
/// `shape` must have at most [`MAX_CELLS`] cells, which holds for every
/// catalog shape and for the output of this function.
pub fn rotate(shape: &[CellOffset], rotation: Rotation) -> Cells {
    debug_assert!(shape.len() <= MAX_CELLS);
    shape
        .iter()
        .map(|&offset| rotate_offset(offset, rotation))
        .collect()
}

/// Rotated shape translated by the block offset
pub fn absolute_cells(shape: &[CellOffset], rotation: Rotation, offset_x: i32, offset_y: i32) -> Cells {
    rotate(shape, rotation)
        .into_iter()
        .map(|(dx, dy)| (offset_x.saturating_add(dx), offset_y.saturating_add(dy)))
        .collect()
}

/// A candidate position for a block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub kind: BlockKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl Placement {
    pub fn new(kind: BlockKind, rotation: Rotation, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Absolute grid cells covered by this placement
    pub fn cells(&self) -> Cells {
        absolute_cells(get_shape(self.kind), self.rotation, self.x, self.y)
    }

    /// Same placement shifted by (dx, dy); `None` on coordinate overflow
    pub fn shifted(&self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            ..*self
        })
    }
}

impl From<&PlacedBlock> for Placement {
    fn from(block: &PlacedBlock) -> Self {
        Self::new(block.kind, block.rotation, block.offset_x, block.offset_y)
    }
}

/// Absolute grid cells covered by a placed block
pub fn block_cells(block: &PlacedBlock) -> Cells {
    Placement::from(block).cells()
}
