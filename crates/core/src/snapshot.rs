use crate::geometry::Cells;
use crate::types::{BlockColor, BlockId, BlockKind, PlacedBlock, GRID_SIZE};

const SIDE: usize = GRID_SIZE as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardCell {
    pub id: BlockId,
    pub kind: BlockKind,
    pub color: BlockColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSnapshot {
    pub block: PlacedBlock,
    pub cells: Cells,
    /// Whether `place` would succeed right now.
    pub placeable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSnapshot {
    pub board: [[Option<BoardCell>; SIDE]; SIDE],
    pub live: Option<LiveSnapshot>,
    pub color: BlockColor,
    pub next_id: BlockId,
    pub block_count: usize,
}

impl LayoutSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; SIDE]; SIDE];
        self.live = None;
        self.color = BlockColor::default();
        self.next_id = BlockId(0);
        self.block_count = 0;
    }

    pub fn selecting(&self) -> bool {
        self.live.is_some()
    }
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; SIDE]; SIDE],
            live: None,
            color: BlockColor::default(),
            next_id: BlockId(0),
            block_count: 0,
        }
    }
}
