//! LayoutView: maps a `core::LayoutSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! ```text
//!   ┌────────────────────────────┐  COLOR
//!   │ ·   ·   ·   ·   ·   ·   ·  │  ██ red
//!   │                            │
//!   │ ...7x7 cells, 4x2 each...  │  SELECTED
//!   └────────────────────────────┘  block-3 t4 ...
//!   PALETTE
//!   ▮▮▮▮   ▮▮▮▮▮▮ ...
//!    1      2
//!   status line
//! ```

use crate::core::shapes::{preview_cells, preview_size};
use crate::core::LayoutSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::input::palette_key;
use crate::types::{BlockColor, BlockKind, PlacedBlock, GRID_SIZE};

/// Board cell width in terminal columns.
const CELL_W: u16 = 4;
/// Board cell height in terminal rows.
const CELL_H: u16 = 2;
const SIDE: u16 = GRID_SIZE as u16;

const FRAME_W: u16 = SIDE * CELL_W + 2;
const FRAME_H: u16 = SIDE * CELL_H + 2;
const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 32;

/// Columns per palette entry; the widest preview is 3 cells of 2 columns.
const SLOT_W: u16 = 7;
const PALETTE_W: u16 = SLOT_W * BlockKind::ALL.len() as u16;
const PALETTE_PREVIEW_H: u16 = 3;

const CONTENT_W: u16 = if PALETTE_W > FRAME_W + PANEL_GAP + PANEL_W {
    PALETTE_W
} else {
    FRAME_W + PANEL_GAP + PANEL_W
};

const HINT: &str = "1-9 0 - new  arrows move  r rotate  enter place  del delete  esc deselect  \
                    c color  ctrl+s save  o open  b blocks  q quit";

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: CellStyle = CellStyle::plain(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const EMPTY: CellStyle = CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG).dim();
const BLOCKED: CellStyle = CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(200, 40, 40)).bold();

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Side panel content that replaces the session info while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay<'a> {
    #[default]
    None,
    /// Typing a name to save under
    SavePrompt { input: &'a str },
    /// Saved layout names with the highlighted row
    Saves { names: &'a [String], cursor: usize },
    /// Committed blocks with the highlighted row
    Blocks {
        blocks: &'a [PlacedBlock],
        cursor: usize,
    },
}

/// Everything the view needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewState<'a> {
    pub snapshot: &'a LayoutSnapshot,
    pub overlay: Overlay<'a>,
    /// Last status message; the key hint is shown when empty.
    pub status: &'a str,
}

/// Screen-space anchors shared by rendering and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchors {
    start_x: u16,
    start_y: u16,
}

impl Anchors {
    fn for_viewport(viewport: Viewport) -> Self {
        Self {
            start_x: viewport.width.saturating_sub(CONTENT_W) / 2,
            start_y: 1,
        }
    }

    fn board_origin(&self) -> (u16, u16) {
        (self.start_x + 1, self.start_y + 1)
    }

    fn panel_x(&self) -> u16 {
        self.start_x + FRAME_W + PANEL_GAP
    }

    fn palette_y(&self) -> u16 {
        self.start_y + FRAME_H + 1
    }
}

/// Renderer for the 7x7 layout editor.
#[derive(Debug, Default)]
pub struct LayoutView;

impl LayoutView {
    pub fn new() -> Self {
        Self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, state: &ViewState<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let anchors = Anchors::for_viewport(viewport);
        self.draw_board(fb, state.snapshot, anchors);

        match state.overlay {
            Overlay::None => self.draw_info(fb, state.snapshot, anchors),
            Overlay::SavePrompt { input } => self.draw_prompt(fb, input, anchors),
            Overlay::Saves { names, cursor } => {
                self.draw_list(fb, anchors, "SAVED LAYOUTS", names, cursor, "enter restore  d delete");
            }
            Overlay::Blocks { blocks, cursor } => {
                let rows: Vec<String> = blocks.iter().map(describe_block).collect();
                self.draw_list(fb, anchors, "PLACED BLOCKS", &rows, cursor, "enter select  d delete");
            }
        }

        self.draw_palette(fb, state.snapshot.color, anchors);
        self.draw_status(fb, state.status, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &ViewState<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    /// Grid cell under terminal position (col, row), if any.
    pub fn cell_at(&self, viewport: Viewport, col: u16, row: u16) -> Option<(i32, i32)> {
        let (ox, oy) = Anchors::for_viewport(viewport).board_origin();
        if col < ox || row < oy {
            return None;
        }
        let x = (col - ox) / CELL_W;
        let y = (row - oy) / CELL_H;
        (x < SIDE && y < SIDE).then_some((x as i32, y as i32))
    }

    /// Palette entry under terminal position (col, row), if any.
    pub fn palette_at(&self, viewport: Viewport, col: u16, row: u16) -> Option<BlockKind> {
        let anchors = Anchors::for_viewport(viewport);
        let top = anchors.palette_y() + 1;
        if col < anchors.start_x || !(top..=top + PALETTE_PREVIEW_H).contains(&row) {
            return None;
        }
        BlockKind::ALL
            .get(((col - anchors.start_x) / SLOT_W) as usize)
            .copied()
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &LayoutSnapshot, anchors: Anchors) {
        let (ox, oy) = anchors.board_origin();
        fb.fill_rect(ox, oy, SIDE * CELL_W, SIDE * CELL_H, ' ', CellStyle::plain(BOARD_BG, BOARD_BG));
        fb.draw_frame(anchors.start_x, anchors.start_y, FRAME_W, FRAME_H, BORDER);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell {
                    Some(cell) => {
                        let style = CellStyle::plain(Rgb::highlight(cell.color), Rgb::block(cell.color));
                        self.fill_cell(fb, anchors, x, y, '▒', style);
                    }
                    None => {
                        self.fill_cell(fb, anchors, x, y, ' ', CellStyle::plain(BOARD_BG, BOARD_BG));
                        fb.put_char(ox + x * CELL_W + 1, oy + y * CELL_H, '·', EMPTY);
                    }
                }
            }
        }

        if let Some(live) = &snap.live {
            let style = if live.placeable {
                let color = live.block.color;
                CellStyle::plain(Rgb::block(color), Rgb::highlight(color)).bold()
            } else {
                BLOCKED
            };
            let ch = if live.placeable { '█' } else { '×' };
            for &(x, y) in &live.cells {
                if (0..GRID_SIZE).contains(&x) && (0..GRID_SIZE).contains(&y) {
                    self.fill_cell(fb, anchors, x as u16, y as u16, ch, style);
                }
            }
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, anchors: Anchors, x: u16, y: u16, ch: char, style: CellStyle) {
        let (ox, oy) = anchors.board_origin();
        fb.fill_rect(ox + x * CELL_W, oy + y * CELL_H, CELL_W, CELL_H, ch, style);
    }

    fn draw_info(&self, fb: &mut FrameBuffer, snap: &LayoutSnapshot, anchors: Anchors) {
        let x = anchors.panel_x();
        let mut y = anchors.start_y;

        fb.put_str(x, y, "COLOR", LABEL);
        y += 1;
        fb.put_str(x, y, "██", CellStyle::plain(Rgb::block(snap.color), Rgb::new(0, 0, 0)));
        fb.put_str(x + 3, y, snap.color.name(), VALUE);
        y += 2;

        fb.put_str(x, y, "BLOCKS", LABEL);
        y += 1;
        fb.put_u32(x, y, snap.block_count as u32, VALUE);
        y += 2;

        fb.put_str(x, y, "NEXT ID", LABEL);
        y += 1;
        fb.put_str(x, y, &snap.next_id.to_string(), VALUE);
        y += 2;

        fb.put_str(x, y, "SELECTED", LABEL);
        y += 1;
        match &snap.live {
            Some(live) => {
                fb.put_str(x, y, &describe_block(&live.block), VALUE);
                y += 1;
                let (text, style) = if live.placeable {
                    ("placeable", VALUE)
                } else {
                    ("blocked", BLOCKED)
                };
                fb.put_str(x, y, text, style);
            }
            None => {
                fb.put_str(x, y, "-", VALUE);
            }
        }
    }

    fn draw_prompt(&self, fb: &mut FrameBuffer, input: &str, anchors: Anchors) {
        let x = anchors.panel_x();
        let y = anchors.start_y;
        fb.put_str(x, y, "SAVE AS", LABEL);
        let end = fb.put_str(x, y + 1, "> ", VALUE);
        let end = fb.put_str(end, y + 1, input, VALUE);
        fb.put_char(end, y + 1, '_', VALUE.bold());
        fb.put_str(x, y + 3, "enter save  esc cancel", VALUE.dim());
    }

    fn draw_list<R: AsRef<str>>(
        &self,
        fb: &mut FrameBuffer,
        anchors: Anchors,
        title: &str,
        rows: &[R],
        cursor: usize,
        footer: &str,
    ) {
        let x = anchors.panel_x();
        let mut y = anchors.start_y;
        fb.put_str(x, y, title, LABEL);
        y += 1;

        // Title, footer and a blank line around it.
        let visible = (FRAME_H - 3) as usize;
        if rows.is_empty() {
            fb.put_str(x, y, "(none)", VALUE.dim());
        } else {
            let first = cursor.saturating_sub(visible - 1).min(rows.len().saturating_sub(visible));
            for (i, row) in rows.iter().enumerate().skip(first).take(visible) {
                let style = if i == cursor { VALUE.bold() } else { VALUE };
                fb.put_str(x, y, if i == cursor { "> " } else { "  " }, style);
                fb.put_str(x + 2, y, row.as_ref(), style);
                y += 1;
            }
        }

        let footer_y = anchors.start_y + FRAME_H - 1;
        let end = fb.put_str(x, footer_y, footer, VALUE.dim());
        fb.put_str(end, footer_y, "  esc close", VALUE.dim());
    }

    fn draw_palette(&self, fb: &mut FrameBuffer, color: BlockColor, anchors: Anchors) {
        let y = anchors.palette_y();
        fb.put_str(anchors.start_x, y, "PALETTE", LABEL);

        let style = CellStyle::plain(Rgb::block(color), Rgb::new(0, 0, 0));
        for (i, kind) in BlockKind::ALL.into_iter().enumerate() {
            let slot_x = anchors.start_x + i as u16 * SLOT_W;
            for (cx, cy) in preview_cells(kind) {
                fb.put_str(slot_x + cx as u16 * 2, y + 1 + cy as u16, "██", style);
            }
            let (w, _) = preview_size(kind);
            let key_x = slot_x + (w as u16 * 2).saturating_sub(1) / 2;
            fb.put_char(key_x, y + 1 + PALETTE_PREVIEW_H, palette_key(kind), LABEL);
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, status: &str, viewport: Viewport) {
        let Some(y) = viewport.height.checked_sub(1) else {
            return;
        };
        if status.is_empty() {
            fb.put_str(0, y, HINT, VALUE.dim());
        } else {
            fb.put_str(0, y, status, VALUE);
        }
    }
}

/// One-line description used by the side panel and the block list.
pub fn describe_block(block: &PlacedBlock) -> String {
    format!(
        "{} {} {}° ({},{})",
        block.id,
        block.kind,
        block.rotation.degrees(),
        block.offset_x,
        block.offset_y
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Editor;
    use crate::types::{BlockId, Rotation};

    fn viewport() -> Viewport {
        Viewport::new(80, 24)
    }

    fn state(snapshot: &LayoutSnapshot) -> ViewState<'_> {
        ViewState {
            snapshot,
            overlay: Overlay::None,
            status: "",
        }
    }

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height()).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn renders_committed_and_live_cells() {
        let mut editor = Editor::new();
        editor.begin_new(BlockKind::Domino);
        editor.move_by(0, 6);
        editor.place();
        editor.begin_new(BlockKind::I3);
        let snap = editor.snapshot();

        let view = LayoutView::new();
        let vp = viewport();
        let fb = view.render(&state(&snap), vp);

        let anchors = Anchors::for_viewport(vp);
        let (ox, oy) = anchors.board_origin();
        // Live I3 at the origin, placeable.
        assert_eq!(fb.get(ox, oy).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(ox + 2 * CELL_W, oy).map(|c| c.ch), Some('█'));
        // Committed domino on the bottom row.
        let cell = fb.get(ox + CELL_W, oy + 6 * CELL_H).unwrap();
        assert_eq!(cell.ch, '▒');
        assert_eq!(cell.style.bg, Rgb::block(BlockColor::Red));
        // Empty cell marker.
        assert_eq!(fb.get(ox + 3 * CELL_W + 1, oy + 3 * CELL_H).map(|c| c.ch), Some('·'));

        let text = screen_text(&fb);
        assert!(text.contains("block-1 i3 0° (0,0)"));
        assert!(text.contains("placeable"));
    }

    #[test]
    fn blocked_live_block_is_marked() {
        let mut editor = Editor::new();
        editor.begin_new(BlockKind::O4);
        editor.place();
        editor.begin_new(BlockKind::Domino);
        let snap = editor.snapshot();

        let fb = LayoutView::new().render(&state(&snap), viewport());
        let (ox, oy) = Anchors::for_viewport(viewport()).board_origin();
        assert_eq!(fb.get(ox, oy).map(|c| c.ch), Some('×'));
        assert!(screen_text(&fb).contains("blocked"));
    }

    #[test]
    fn cell_hit_test_matches_rendering() {
        let view = LayoutView::new();
        let vp = viewport();
        let (ox, oy) = Anchors::for_viewport(vp).board_origin();

        assert_eq!(view.cell_at(vp, ox, oy), Some((0, 0)));
        assert_eq!(view.cell_at(vp, ox + CELL_W * 3 + 3, oy + CELL_H * 5 + 1), Some((3, 5)));
        assert_eq!(view.cell_at(vp, ox + CELL_W * 7, oy), None);
        assert_eq!(view.cell_at(vp, ox - 1, oy), None);
        assert_eq!(view.cell_at(vp, ox, oy + CELL_H * 7), None);
    }

    #[test]
    fn palette_hit_test_and_keys() {
        let view = LayoutView::new();
        let vp = viewport();
        let anchors = Anchors::for_viewport(vp);
        let row = anchors.palette_y() + 1;

        assert_eq!(view.palette_at(vp, anchors.start_x, row), Some(BlockKind::Domino));
        assert_eq!(view.palette_at(vp, anchors.start_x + SLOT_W * 10, row), Some(BlockKind::X5));
        assert_eq!(view.palette_at(vp, anchors.start_x, anchors.palette_y()), None);

        let fb = view.render(&state(&LayoutSnapshot::default()), vp);
        let keys = fb.row_text(row + PALETTE_PREVIEW_H);
        for c in ['1', '9', '0', '-'] {
            assert!(keys.contains(c));
        }
    }

    #[test]
    fn overlays_replace_info_panel() {
        let snap = LayoutSnapshot::default();
        let view = LayoutView::new();

        let fb = view.render(
            &ViewState {
                overlay: Overlay::SavePrompt { input: "castle" },
                ..state(&snap)
            },
            viewport(),
        );
        let text = screen_text(&fb);
        assert!(text.contains("SAVE AS"));
        assert!(text.contains("> castle_"));
        assert!(!text.contains("NEXT ID"));

        let names = vec!["one".to_string(), "two".to_string()];
        let fb = view.render(
            &ViewState {
                overlay: Overlay::Saves {
                    names: &names,
                    cursor: 1,
                },
                ..state(&snap)
            },
            viewport(),
        );
        let text = screen_text(&fb);
        assert!(text.contains("  one"));
        assert!(text.contains("> two"));

        let blocks = [PlacedBlock {
            rotation: Rotation::Deg90,
            offset_x: 2,
            ..PlacedBlock::new(BlockId(4), BlockKind::T4, BlockColor::Blue)
        }];
        let fb = view.render(
            &ViewState {
                overlay: Overlay::Blocks {
                    blocks: &blocks,
                    cursor: 0,
                },
                ..state(&snap)
            },
            viewport(),
        );
        assert!(screen_text(&fb).contains("> block-4 t4 90° (2,0)"));
    }

    #[test]
    fn status_line_or_hint() {
        let snap = LayoutSnapshot::default();
        let view = LayoutView::new();
        let fb = view.render(&state(&snap), viewport());
        assert!(fb.row_text(23).starts_with("1-9 0 - new"));

        let fb = view.render(
            &ViewState {
                status: "layout saved",
                ..state(&snap)
            },
            viewport(),
        );
        assert!(fb.row_text(23).starts_with("layout saved"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = Editor::new().snapshot();
        for (w, h) in [(0, 0), (1, 1), (10, 5), (40, 12)] {
            let fb = LayoutView::new().render(&state(&snap), Viewport::new(w, h));
            assert_eq!((fb.width(), fb.height()), (w, h));
        }
    }
}
