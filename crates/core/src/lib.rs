//! Placement engine - pure, deterministic, and testable
//!
//! This crate holds every rule of the layout editor: the shape catalog, the
//! rotation geometry, the occupancy index that decides legality, and the
//! placement controller that owns the committed blocks and the live
//! selection. It has **no** dependencies on terminals, files, or clocks.
//!
//! # Module Structure
//!
//! - [`shapes`]: block kinds and their footprints at rotation 0
//! - [`geometry`]: quarter-turn rotation and absolute cell computation
//! - [`kicks`]: the row-major kick table and rotate-with-kicks search
//! - [`occupancy`]: flat 7x7 index of committed cells; the legality predicate
//! - [`editor`]: the placement controller state machine
//! - [`snapshot`]: plain read-only copy of the editor for renderers
//!
//! # Rules
//!
//! - Boundary is checked on every operation; overlap on rotate and place
//! - Moving never checks overlap, so a block can pass over others while being
//!   positioned
//! - Rotation tries in place, then 81 kick deltas from (-4,-4) to (4,4)
//! - At most one live block; it is excluded from its own overlap checks
//!
//! # Example
//!
//! ```
//! use block_layout_core::Editor;
//! use block_layout_types::{BlockKind, EditorAction};
//!
//! let mut editor = Editor::new();
//! editor.apply_action(EditorAction::Begin(BlockKind::T4));
//! editor.apply_action(EditorAction::MoveRight);
//! editor.apply_action(EditorAction::Rotate);
//! assert!(editor.apply_action(EditorAction::Place));
//!
//! assert_eq!(editor.blocks().len(), 1);
//! assert!(editor.live().is_none());
//! ```

pub mod editor;
pub mod geometry;
pub mod kicks;
pub mod occupancy;
pub mod shapes;
pub mod snapshot;

pub use block_layout_types as types;

// Re-export commonly used types for convenience
pub use editor::{Editor, EditorPhase};
pub use geometry::{absolute_cells, block_cells, rotate, Cells, Placement};
pub use kicks::{try_rotate, KICK_OFFSETS};
pub use occupancy::{Conflict, OccupancyGrid};
pub use shapes::{get_shape, preview_cells, CellOffset, Shape, MAX_CELLS};
pub use snapshot::{BoardCell, LayoutSnapshot, LiveSnapshot};
