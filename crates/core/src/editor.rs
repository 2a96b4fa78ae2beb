//! Editor module - the placement controller
//!
//! Owns the committed block set, its occupancy index, and at most one live
//! (selected) block. The live block is never part of the committed set: it is
//! positioned freely and only joins the grid on [`Editor::place`].
//!
//! ```text
//!            begin_new / select / select_at
//!   Idle  ───────────────────────────────────▶  Selecting
//!     ▲                                            │  move_by / rotate / set_color
//!     └──────── place / delete / deselect ─────────┘
//! ```
//!
//! Every transition is a no-op returning `false` when its precondition does
//! not hold (wrong phase, boundary or overlap conflict, exhausted kick search).

use tracing::{debug, info};

use crate::geometry::{block_cells, Cells, Placement};
use crate::kicks::try_rotate;
use crate::occupancy::OccupancyGrid;
use crate::snapshot::{BoardCell, LayoutSnapshot, LiveSnapshot};
use crate::types::*;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Nothing selected
    Idle,
    /// A live block is being positioned
    Selecting,
}

/// Where the live block came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Begun from the palette; never committed
    Palette,
    /// Picked up from the grid; `committed` is its geometry before pickup
    Grid { committed: PlacedBlock, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    block: PlacedBlock,
    origin: Origin,
}

/// Placement controller for one editing session
#[derive(Debug, Clone)]
pub struct Editor {
    blocks: Vec<PlacedBlock>,
    grid: OccupancyGrid,
    selection: Option<Selection>,
    /// Numeric suffix handed to the next new block.
    next_id: u32,
    /// Palette color used for new blocks.
    color: BlockColor,
}

impl Editor {
    /// Create an empty editor with the default palette color
    pub fn new() -> Self {
        Self::with_color(BlockColor::default())
    }

    pub fn with_color(color: BlockColor) -> Self {
        Self {
            blocks: Vec::new(),
            grid: OccupancyGrid::new(),
            selection: None,
            next_id: 0,
            color,
        }
    }

    pub fn phase(&self) -> EditorPhase {
        if self.selection.is_some() {
            EditorPhase::Selecting
        } else {
            EditorPhase::Idle
        }
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_some()
    }

    /// Committed blocks in commit order
    pub fn blocks(&self) -> &[PlacedBlock] {
        &self.blocks
    }

    /// Committed blocks ordered by numeric id
    pub fn blocks_by_id(&self) -> Vec<PlacedBlock> {
        let mut sorted = self.blocks.clone();
        sorted.sort_by_key(|b| b.id);
        sorted
    }

    /// Look up a committed block
    pub fn block(&self, id: BlockId) -> Option<&PlacedBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// The live (selected, uncommitted) block
    pub fn live(&self) -> Option<&PlacedBlock> {
        self.selection.as_ref().map(|s| &s.block)
    }

    /// Id the next new block will receive
    pub fn next_id(&self) -> BlockId {
        BlockId(self.next_id)
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Committed block covering grid cell (x, y)
    pub fn block_at(&self, x: i32, y: i32) -> Option<&PlacedBlock> {
        self.grid.owner(x, y).and_then(|id| self.block(id))
    }

    /// Legality predicate shared by every mutating operation
    ///
    /// Boundary violations are always reported; overlap with committed blocks
    /// other than `exclude` only when `check_overlap` is set.
    pub fn would_conflict(
        &self,
        offset_x: i32,
        offset_y: i32,
        rotation: Rotation,
        kind: BlockKind,
        exclude: Option<BlockId>,
        check_overlap: bool,
    ) -> bool {
        let placement = Placement::new(kind, rotation, offset_x, offset_y);
        self.grid.would_conflict(&placement, exclude, check_overlap)
    }

    /// Whether the live block could be placed where it is now
    pub fn can_place(&self) -> bool {
        self.live().is_some_and(|b| {
            !self
                .grid
                .would_conflict(&Placement::from(b), Some(b.id), true)
        })
    }

    /// Cells covered by the live block
    pub fn live_cells(&self) -> Option<Cells> {
        self.live().map(block_cells)
    }

    /// Store new live geometry; shared by begin-new and every in-progress update
    fn commit_geometry(&mut self, origin: Origin, block: PlacedBlock) {
        debug!(
            id = %block.id,
            kind = %block.kind,
            rotation = block.rotation.degrees(),
            x = block.offset_x,
            y = block.offset_y,
            "live geometry updated"
        );
        self.selection = Some(Selection { block, origin });
    }

    /// Start a new block of `kind` at the origin with rotation 0
    ///
    /// Allowed only when idle. The initial position is checked against the
    /// boundary but not for overlap. Refused once every id up to
    /// [`BlockId::MAX`] has been handed out.
    pub fn begin_new(&mut self, kind: BlockKind) -> bool {
        if self.selection.is_some() {
            debug!(%kind, "begin_new ignored: a block is already selected");
            return false;
        }

        let id = BlockId(self.next_id);
        if id > BlockId::MAX {
            debug!(%kind, "begin_new rejected: block ids exhausted");
            return false;
        }

        let block = PlacedBlock::new(id, kind, self.color);
        if self
            .grid
            .would_conflict(&Placement::from(&block), Some(block.id), false)
        {
            debug!(%kind, "begin_new rejected: origin placement out of bounds");
            return false;
        }

        self.next_id = id.number() + 1;
        self.commit_geometry(Origin::Palette, block);
        true
    }

    /// Shift the live block by (dx, dy)
    ///
    /// Only the boundary is checked; the live block may pass over committed
    /// blocks while being moved. Overlap is enforced by [`Editor::place`].
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };

        let Some(target) = Placement::from(&sel.block).shifted(dx, dy) else {
            return false;
        };

        if let Some(conflict) = self.grid.conflict(&target, Some(sel.block.id), false) {
            debug!(id = %sel.block.id, dx, dy, ?conflict, "move rejected");
            return false;
        }

        self.commit_geometry(
            sel.origin,
            PlacedBlock {
                offset_x: target.x,
                offset_y: target.y,
                ..sel.block
            },
        );
        true
    }

    /// Rotate the live block 90° clockwise, kicking it if needed
    ///
    /// The rotation is tried in place first, then at every delta of the kick
    /// table in order, with full boundary and overlap checking. If nothing is
    /// legal the live block is left untouched.
    pub fn rotate(&mut self) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };

        let grid = &self.grid;
        let id = sel.block.id;
        let result = try_rotate(Placement::from(&sel.block), |candidate| {
            !grid.would_conflict(candidate, Some(id), true)
        });

        let Some((rotated, (dx, dy))) = result else {
            debug!(%id, "rotate rejected: no legal kick within radius");
            return false;
        };

        if (dx, dy) != (0, 0) {
            debug!(%id, dx, dy, "rotate kicked");
        }

        self.commit_geometry(
            sel.origin,
            PlacedBlock {
                rotation: rotated.rotation,
                offset_x: rotated.x,
                offset_y: rotated.y,
                ..sel.block
            },
        );
        true
    }

    /// Commit the live block to the grid
    ///
    /// Re-validates boundary and overlap; on conflict nothing changes.
    pub fn place(&mut self) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };

        let block = sel.block;
        if let Some(conflict) = self
            .grid
            .conflict(&Placement::from(&block), Some(block.id), true)
        {
            debug!(id = %block.id, ?conflict, "place rejected");
            return false;
        }

        self.grid.insert(&block);
        self.blocks.push(block);
        self.selection = None;
        info!(
            id = %block.id,
            kind = %block.kind,
            rotation = block.rotation.degrees(),
            x = block.offset_x,
            y = block.offset_y,
            "block placed"
        );
        true
    }

    /// Pick up a committed block for repositioning
    ///
    /// The block leaves the committed set (and the index) so it never collides
    /// with itself while it is moved.
    pub fn select(&mut self, id: BlockId) -> bool {
        if self.selection.is_some() {
            debug!(%id, "select ignored: a block is already selected");
            return false;
        }

        let Some(index) = self.blocks.iter().position(|b| b.id == id) else {
            debug!(%id, "select ignored: no such block");
            return false;
        };

        let committed = self.blocks.remove(index);
        self.grid.remove(id);
        self.commit_geometry(Origin::Grid { committed, index }, committed);
        true
    }

    /// Pick up whichever committed block covers grid cell (x, y)
    pub fn select_at(&mut self, x: i32, y: i32) -> bool {
        match self.grid.owner(x, y) {
            Some(id) => self.select(id),
            None => false,
        }
    }

    /// Discard the live block permanently
    pub fn delete(&mut self) -> bool {
        let Some(sel) = self.selection.take() else {
            return false;
        };
        info!(id = %sel.block.id, kind = %sel.block.kind, "block deleted");
        true
    }

    /// Remove a block by id, live or committed
    pub fn delete_block(&mut self, id: BlockId) -> bool {
        if self.live().is_some_and(|b| b.id == id) {
            return self.delete();
        }

        let Some(index) = self.blocks.iter().position(|b| b.id == id) else {
            return false;
        };

        let removed = self.blocks.remove(index);
        self.grid.remove(id);
        info!(id = %removed.id, kind = %removed.kind, "block deleted");
        true
    }

    /// Drop the selection without committing the live geometry
    ///
    /// A block picked up from the grid returns to where it was committed; a
    /// block begun from the palette disappears.
    pub fn deselect(&mut self) -> bool {
        let Some(sel) = self.selection.take() else {
            return false;
        };

        if let Origin::Grid { committed, index } = sel.origin {
            let index = index.min(self.blocks.len());
            self.grid.insert(&committed);
            self.blocks.insert(index, committed);
        }
        debug!(id = %sel.block.id, "deselected");
        true
    }

    /// Change the palette color; recolors the live block when selecting
    ///
    /// Returns `false` when neither the palette nor the live block changes.
    pub fn set_color(&mut self, color: BlockColor) -> bool {
        let live_changed = self.selection.is_some_and(|sel| sel.block.color != color);
        if self.color == color && !live_changed {
            return false;
        }

        self.color = color;
        if let Some(sel) = self.selection {
            self.commit_geometry(sel.origin, PlacedBlock { color, ..sel.block });
        }
        true
    }

    /// Advance to the next palette color
    pub fn next_color(&mut self) -> bool {
        self.set_color(self.color.next())
    }

    /// Replace every committed block with a restored layout
    ///
    /// Any selection is dropped. The id counter moves past the largest
    /// restored id so new blocks never collide with restored ones; a layout
    /// holding an id above [`BlockId::MAX`] is refused and nothing changes.
    pub fn restore(&mut self, blocks: Vec<PlacedBlock>) -> bool {
        let max_id = blocks.iter().map(|b| b.id).max().unwrap_or(BlockId(0));
        if max_id > BlockId::MAX {
            debug!(id = %max_id, "restore rejected: id out of range");
            return false;
        }

        self.selection = None;
        self.grid = OccupancyGrid::from_blocks(&blocks);
        self.blocks = blocks;
        self.next_id = max_id.number() + 1;
        info!(
            blocks = self.blocks.len(),
            next_id = self.next_id,
            "layout restored"
        );
        true
    }

    /// Blocks that make up the layout on the grid
    ///
    /// A block picked up from the grid counts at its committed geometry and
    /// list position; a block begun from the palette is not part of it.
    pub fn layout_blocks(&self) -> Vec<PlacedBlock> {
        let mut blocks = self.blocks.clone();
        if let Some(Selection {
            origin: Origin::Grid { committed, index },
            ..
        }) = self.selection
        {
            blocks.insert(index.min(blocks.len()), committed);
        }
        blocks
    }

    /// Remove every block and the selection; ids keep counting
    pub fn clear(&mut self) {
        self.selection = None;
        self.blocks.clear();
        self.grid.clear();
    }

    /// Apply an editor action
    pub fn apply_action(&mut self, action: EditorAction) -> bool {
        match action {
            EditorAction::Begin(kind) => self.begin_new(kind),
            EditorAction::MoveLeft
            | EditorAction::MoveRight
            | EditorAction::MoveUp
            | EditorAction::MoveDown => {
                let (dx, dy) = action.move_delta().unwrap_or_default();
                self.move_by(dx, dy)
            }
            EditorAction::Rotate => self.rotate(),
            EditorAction::Place => self.place(),
            EditorAction::Delete => self.delete(),
            EditorAction::Deselect => self.deselect(),
            EditorAction::NextColor => self.next_color(),
            EditorAction::SetColor(color) => self.set_color(color),
        }
    }

    pub fn snapshot_into(&self, out: &mut LayoutSnapshot) {
        out.clear();
        for block in &self.blocks {
            for (x, y) in block_cells(block) {
                if in_bounds(x, y) {
                    out.board[y as usize][x as usize] = Some(BoardCell {
                        id: block.id,
                        kind: block.kind,
                        color: block.color,
                    });
                }
            }
        }
        out.live = self.live().map(|&block| LiveSnapshot {
            block,
            cells: block_cells(&block),
            placeable: self.can_place(),
        });
        out.color = self.color;
        out.next_id = self.next_id();
        out.block_count = self.blocks.len();
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        let mut s = LayoutSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
