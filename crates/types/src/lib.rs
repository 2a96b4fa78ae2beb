//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the editor.
//! All types are plain data with serde derives, so the same values flow
//! through the placement engine, the terminal view and the layout store.
//!
//! # Grid
//!
//! The layout grid is a fixed 7x7 square:
//!
//! - **Columns**: x in `0..=6` (left to right)
//! - **Rows**: y in `0..=6` (top to bottom)
//! - A new block starts at offset (0, 0) with rotation 0
//!
//! # Persisted record format
//!
//! | Field | Type | Example |
//! |-------|------|---------|
//! | `id` | string | `"block-3"` |
//! | `blockType` | string | `"l4"` |
//! | `rotation` | integer | `90` |
//! | `offsetX` | integer | `2` |
//! | `offsetY` | integer | `0` |
//! | `color` | string | `"#2196f3"` |
//!
//! # Examples
//!
//! ```
//! use block_layout_types::{BlockColor, BlockId, BlockKind, Rotation, GRID_SIZE};
//!
//! // Parse a block kind (case-insensitive)
//! assert_eq!(BlockKind::from_str("I3"), Some(BlockKind::I3));
//!
//! // Rotations normalize modulo 360
//! assert_eq!(Rotation::from_degrees(450), Some(Rotation::Deg90));
//! assert_eq!(Rotation::Deg270.rotate_cw(), Rotation::Deg0);
//!
//! // Ids use the "block-<n>" form
//! assert_eq!(BlockId::from_str("block-12"), Some(BlockId(12)));
//!
//! // Colors carry their source hex value
//! assert_eq!(BlockColor::Blue.hex(), "#2196f3");
//!
//! assert_eq!(GRID_SIZE, 7);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid width and height in cells (7x7)
pub const GRID_SIZE: i32 = 7;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Largest |dx| and |dy| tried by the rotation kick search
pub const KICK_RADIUS: i32 = 4;

/// Prefix of every block id string
pub const BLOCK_ID_PREFIX: &str = "block-";

/// Check whether (x, y) is a cell of the 7x7 grid.
#[inline]
pub fn in_bounds(x: i32, y: i32) -> bool {
    (0..GRID_SIZE).contains(&x) && (0..GRID_SIZE).contains(&y)
}

/// The block kinds offered by the palette
///
/// Each kind maps to a fixed footprint in the shape library:
/// - **Domino**: 2 cells in a row
/// - **I3**: 3-cell straight bar
/// - **L3**: 3-cell corner
/// - **I4 / O4 / T4 / S4 / L4**: the tetromino family
/// - **P5 / U5 / X5**: pentominoes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlockKind {
    Domino,
    I3,
    L3,
    I4,
    O4,
    T4,
    S4,
    L4,
    P5,
    U5,
    X5,
}

impl BlockKind {
    /// All kinds in palette order.
    pub const ALL: [BlockKind; 11] = [
        BlockKind::Domino,
        BlockKind::I3,
        BlockKind::L3,
        BlockKind::I4,
        BlockKind::O4,
        BlockKind::T4,
        BlockKind::S4,
        BlockKind::L4,
        BlockKind::P5,
        BlockKind::U5,
        BlockKind::X5,
    ];

    /// Parse block kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_layout_types::BlockKind;
    ///
    /// assert_eq!(BlockKind::from_str("domino"), Some(BlockKind::Domino));
    /// assert_eq!(BlockKind::from_str("X5"), Some(BlockKind::X5));
    /// assert_eq!(BlockKind::from_str("z4"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Identifier used in persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Domino => "domino",
            BlockKind::I3 => "i3",
            BlockKind::L3 => "l3",
            BlockKind::I4 => "i4",
            BlockKind::O4 => "o4",
            BlockKind::T4 => "t4",
            BlockKind::S4 => "s4",
            BlockKind::L4 => "l4",
            BlockKind::P5 => "p5",
            BlockKind::U5 => "u5",
            BlockKind::X5 => "x5",
        }
    }

    /// Position in [`BlockKind::ALL`].
    pub fn palette_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| kind == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for BlockKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BlockKind::from_str(&value).ok_or_else(|| format!("unknown block type {value:?}"))
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Quarter-turn rotation states
///
/// - **Deg0**: shape as defined in the library
/// - **Deg90**: (x, y) -> (-y, x)
/// - **Deg180**: (x, y) -> (-x, -y)
/// - **Deg270**: (x, y) -> (y, -x)
///
/// Persisted as the integer number of degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Build a rotation from a degree count, normalized modulo 360
    ///
    /// Returns `None` for anything that is not a multiple of 90.
    ///
    /// # Examples
    ///
    /// ```
    /// use block_layout_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(0), Some(Rotation::Deg0));
    /// assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Deg270));
    /// assert_eq!(Rotation::from_degrees(720), Some(Rotation::Deg0));
    /// assert_eq!(Rotation::from_degrees(45), None);
    /// ```
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Next quarter turn: `(degrees + 90) mod 360`
    ///
    /// # Examples
    ///
    /// ```
    /// use block_layout_types::Rotation;
    ///
    /// assert_eq!(Rotation::Deg0.rotate_cw(), Rotation::Deg90);
    /// assert_eq!(Rotation::Deg90.rotate_cw(), Rotation::Deg180);
    /// assert_eq!(Rotation::Deg180.rotate_cw(), Rotation::Deg270);
    /// assert_eq!(Rotation::Deg270.rotate_cw(), Rotation::Deg0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = String;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
            .ok_or_else(|| format!("rotation must be a multiple of 90, got {degrees}"))
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Block colors available in the editor palette
///
/// Each color has a lighter companion used to highlight the selected block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlockColor {
    #[default]
    Red,
    Blue,
    Yellow,
    Green,
    White,
    Black,
}

impl BlockColor {
    /// All colors in palette order.
    pub const ALL: [BlockColor; 6] = [
        BlockColor::Red,
        BlockColor::Blue,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::White,
        BlockColor::Black,
    ];

    /// Hex value as stored in layouts
    pub fn hex(&self) -> &'static str {
        match self {
            BlockColor::Red => "#f44336",
            BlockColor::Blue => "#2196f3",
            BlockColor::Yellow => "#ffeb3b",
            BlockColor::Green => "#4caf50",
            BlockColor::White => "#ffffff",
            BlockColor::Black => "#000000",
        }
    }

    /// Hex value drawn for the selected block
    pub fn highlight_hex(&self) -> &'static str {
        match self {
            BlockColor::Red => "#ff7961",
            BlockColor::Blue => "#6ec6ff",
            BlockColor::Yellow => "#fff176",
            BlockColor::Green => "#80e27e",
            BlockColor::White => "#eeeeee",
            BlockColor::Black => "#666666",
        }
    }

    /// Parse a palette color from its hex value (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_layout_types::BlockColor;
    ///
    /// assert_eq!(BlockColor::from_hex("#4CAF50"), Some(BlockColor::Green));
    /// assert_eq!(BlockColor::from_hex("#123456"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|color| color.hex() == s)
    }

    /// Lowercase color name
    pub fn name(&self) -> &'static str {
        match self {
            BlockColor::Red => "red",
            BlockColor::Blue => "blue",
            BlockColor::Yellow => "yellow",
            BlockColor::Green => "green",
            BlockColor::White => "white",
            BlockColor::Black => "black",
        }
    }

    /// Parse either a color name or its hex value
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s))
            .or_else(|| Self::from_hex(s))
    }

    /// Next color in palette order, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or_default();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl TryFrom<String> for BlockColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BlockColor::from_hex(&value).ok_or_else(|| format!("unknown palette color {value:?}"))
    }
}

impl From<BlockColor> for String {
    fn from(color: BlockColor) -> Self {
        color.hex().to_string()
    }
}

/// Session-unique block identifier, rendered as `block-<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockId(pub u32);

impl BlockId {
    /// Largest id the editor hands out. `u32::MAX` stays free so the counter
    /// can always move past any valid id.
    pub const MAX: BlockId = BlockId(u32::MAX - 1);

    /// Parse an id of the form `block-<n>`
    ///
    /// # Examples
    ///
    /// ```
    /// use block_layout_types::BlockId;
    ///
    /// assert_eq!(BlockId::from_str("block-0"), Some(BlockId(0)));
    /// assert_eq!(BlockId::from_str("block-"), None);
    /// assert_eq!(BlockId::from_str("piece-4"), None);
    /// assert_eq!(BlockId::from_str("block-4294967295"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let digits = s.strip_prefix(BLOCK_ID_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(BlockId).filter(|id| *id <= BlockId::MAX)
    }

    /// Numeric suffix
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", BLOCK_ID_PREFIX, self.0)
    }
}

impl TryFrom<String> for BlockId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BlockId::from_str(&value).ok_or_else(|| format!("malformed block id {value:?}"))
    }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self {
        id.to_string()
    }
}

/// A block on the grid: its kind, orientation, offset and color
///
/// Offsets are in grid cells and locate the shape's anchor; the absolute cells
/// are the rotated shape translated by `(offset_x, offset_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBlock {
    pub id: BlockId,
    #[serde(rename = "blockType")]
    pub kind: BlockKind,
    pub rotation: Rotation,
    pub offset_x: i32,
    pub offset_y: i32,
    pub color: BlockColor,
}

impl PlacedBlock {
    /// A fresh block at the origin with rotation 0
    pub fn new(id: BlockId, kind: BlockKind, color: BlockColor) -> Self {
        Self {
            id,
            kind,
            rotation: Rotation::Deg0,
            offset_x: 0,
            offset_y: 0,
            color,
        }
    }
}

/// Editor actions that can be applied to the placement controller
///
/// These actions are produced by key mapping and consumed by
/// `Editor::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Start a new block of the given kind at the origin
    Begin(BlockKind),
    /// Move the selected block one cell left
    MoveLeft,
    /// Move the selected block one cell right
    MoveRight,
    /// Move the selected block one cell up
    MoveUp,
    /// Move the selected block one cell down
    MoveDown,
    /// Rotate the selected block 90° (with kick search)
    Rotate,
    /// Commit the selected block to the grid
    Place,
    /// Remove the selected block
    Delete,
    /// Drop the selection without committing
    Deselect,
    /// Switch to the next palette color
    NextColor,
    /// Switch to a specific palette color
    SetColor(BlockColor),
}

impl EditorAction {
    /// Cell delta for move actions
    pub fn move_delta(&self) -> Option<(i32, i32)> {
        match self {
            EditorAction::MoveLeft => Some((-1, 0)),
            EditorAction::MoveRight => Some((1, 0)),
            EditorAction::MoveUp => Some((0, -1)),
            EditorAction::MoveDown => Some((0, 1)),
            _ => None,
        }
    }
}
