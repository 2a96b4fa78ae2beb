//! Interactive session state.
//!
//! Routes terminal key and mouse events to the placement editor and the
//! layout store, and keeps the status line shown under the grid. Every store
//! refusal or failure ends up on the status line; nothing here aborts the
//! session except the quit keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::error;

use crate::core::{Editor, LayoutSnapshot};
use crate::input::{handle_command_key, handle_key_event, should_quit, Command};
use crate::store::{KeyValueStore, LayoutStore, StoreError};
use crate::term::{FrameBuffer, LayoutView, Overlay, ViewState, Viewport};
use crate::types::{BlockId, EditorAction};

const BUSY: &str = "place or deselect the selected block first";

/// What the keyboard is currently driving
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Keys go to the placement editor
    Editing,
    /// Typing a layout name
    NamingSave { input: String },
    /// Picking a saved layout to restore or delete
    BrowsingSaves { names: Vec<String>, cursor: usize },
    /// Picking a placed block (sorted by id) to select or delete
    BrowsingBlocks { cursor: usize },
}

/// One editing session over a layout store backend
pub struct App<S> {
    editor: Editor,
    store: LayoutStore<S>,
    mode: Mode,
    status: String,
    quit: bool,
    snapshot: LayoutSnapshot,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(editor: Editor, store: LayoutStore<S>) -> Self {
        Self {
            editor,
            store,
            mode: Mode::Editing,
            status: String::new(),
            quit: false,
            snapshot: LayoutSnapshot::default(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn store(&self) -> &LayoutStore<S> {
        &self.store
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    fn report(&mut self, err: StoreError) {
        if !err.is_refusal() {
            error!(error = %err, "layout store failure");
        }
        self.set_status(err.to_string());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        match self.mode {
            Mode::Editing => self.key_editing(key),
            Mode::NamingSave { .. } => self.key_naming(key),
            Mode::BrowsingSaves { .. } => self.key_saves(key),
            Mode::BrowsingBlocks { .. } => self.key_blocks(key),
        }
    }

    /// Left click: a grid cell picks up its block, a palette entry begins one.
    pub fn handle_mouse(&mut self, event: MouseEvent, view: &LayoutView, viewport: Viewport) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) || self.mode != Mode::Editing {
            return;
        }

        if let Some((x, y)) = view.cell_at(viewport, event.column, event.row) {
            let Some(id) = self.editor.grid().owner(x, y) else {
                return;
            };
            self.select(id);
        } else if let Some(kind) = view.palette_at(viewport, event.column, event.row) {
            self.apply(EditorAction::Begin(kind));
        }
    }

    /// Render the current session into `fb`.
    pub fn render_into(&mut self, view: &LayoutView, viewport: Viewport, fb: &mut FrameBuffer) {
        self.editor.snapshot_into(&mut self.snapshot);

        let blocks;
        let overlay = match &self.mode {
            Mode::Editing => Overlay::None,
            Mode::NamingSave { input } => Overlay::SavePrompt { input },
            Mode::BrowsingSaves { names, cursor } => Overlay::Saves {
                names,
                cursor: *cursor,
            },
            Mode::BrowsingBlocks { cursor } => {
                blocks = self.editor.blocks_by_id();
                Overlay::Blocks {
                    blocks: &blocks,
                    cursor: *cursor,
                }
            }
        };

        let state = ViewState {
            snapshot: &self.snapshot,
            overlay,
            status: &self.status,
        };
        view.render_into(&state, viewport, fb);
    }

    fn key_editing(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }

        if let Some(command) = handle_command_key(key) {
            self.run_command(command);
        } else if let Some(action) = handle_key_event(key) {
            self.apply(action);
        }
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::Save => {
                self.mode = Mode::NamingSave {
                    input: String::new(),
                };
                let unplaced = self.editor.is_selecting()
                    && self.editor.layout_blocks().len() == self.editor.blocks().len();
                let note = if unplaced {
                    "save as: (the unplaced new block is not included)"
                } else {
                    "save as:"
                };
                self.set_status(note);
            }
            Command::BrowseSaves => match self.store.list() {
                Ok(names) => {
                    self.mode = Mode::BrowsingSaves { names, cursor: 0 };
                    self.status.clear();
                }
                Err(e) => self.report(e),
            },
            Command::BrowseBlocks => {
                self.mode = Mode::BrowsingBlocks { cursor: 0 };
                self.status.clear();
            }
        }
    }

    fn apply(&mut self, action: EditorAction) {
        let live = self.editor.live().copied();

        if self.editor.apply_action(action) {
            let msg = match action {
                EditorAction::Begin(kind) => format!("new {kind}: move, rotate, then place"),
                EditorAction::Place => live.map(|b| format!("placed {}", b.id)).unwrap_or_default(),
                EditorAction::Delete => live.map(|b| format!("deleted {}", b.id)).unwrap_or_default(),
                EditorAction::Deselect => "deselected".to_string(),
                EditorAction::NextColor | EditorAction::SetColor(_) => {
                    format!("color: {}", self.editor.color().name())
                }
                _ => String::new(),
            };
            self.set_status(msg);
            return;
        }

        let msg = match (action, live) {
            (EditorAction::Begin(_), _) if self.editor.is_selecting() => BUSY,
            (EditorAction::Begin(_), _) => "no block ids left",
            (EditorAction::NextColor | EditorAction::SetColor(_), _) => "color unchanged",
            (_, None) => "nothing selected",
            (EditorAction::Rotate, Some(_)) => "no room to rotate",
            (EditorAction::Place, Some(_)) => "cannot place: overlaps another block",
            (_, Some(_)) => "edge of the grid",
        };
        self.set_status(msg);
    }

    fn select(&mut self, id: BlockId) -> bool {
        if self.editor.is_selecting() {
            self.set_status(BUSY);
            return false;
        }
        let selected = self.editor.select(id);
        if selected {
            self.set_status(format!("selected {id}"));
        }
        selected
    }

    fn key_naming(&mut self, key: KeyEvent) {
        let Mode::NamingSave { input } = &mut self.mode else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Editing;
                self.set_status("save cancelled");
            }
            KeyCode::Enter => {
                let name = input.trim().to_string();
                self.mode = Mode::Editing;
                self.save(&name);
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.push(c),
            _ => {}
        }
    }

    fn save(&mut self, name: &str) {
        let blocks = self.editor.layout_blocks();
        match self.store.save(name, &blocks) {
            Ok(()) => {
                let count = blocks.len();
                self.set_status(format!("saved {name:?} ({count} blocks)"));
            }
            Err(e) => self.report(e),
        }
    }

    fn key_saves(&mut self, key: KeyEvent) {
        let Mode::BrowsingSaves { names, cursor } = &mut self.mode else {
            return;
        };

        match key.code {
            KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('O') => self.mode = Mode::Editing,
            KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if *cursor + 1 < names.len() {
                    *cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(name) = names.get(*cursor).cloned() {
                    self.mode = Mode::Editing;
                    self.restore(&name);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(name) = names.get(*cursor).cloned() {
                    let cursor = *cursor;
                    self.delete_saved(&name, cursor);
                }
            }
            _ => {}
        }
    }

    fn restore(&mut self, name: &str) {
        match self.store.restore_into(name, &mut self.editor) {
            Ok(count) => self.set_status(format!("restored {name:?} ({count} blocks)")),
            Err(e) => self.report(e),
        }
    }

    fn delete_saved(&mut self, name: &str, cursor: usize) {
        if let Err(e) = self.store.delete(name) {
            self.report(e);
            return;
        }

        match self.store.list() {
            Ok(names) => {
                let cursor = cursor.min(names.len().saturating_sub(1));
                self.mode = Mode::BrowsingSaves { names, cursor };
                self.set_status(format!("deleted layout {name:?}"));
            }
            Err(e) => {
                self.mode = Mode::Editing;
                self.report(e);
            }
        }
    }

    fn key_blocks(&mut self, key: KeyEvent) {
        let Mode::BrowsingBlocks { cursor } = &mut self.mode else {
            return;
        };
        let blocks = self.editor.blocks_by_id();

        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => self.mode = Mode::Editing,
            KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if *cursor + 1 < blocks.len() {
                    *cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(block) = blocks.get(*cursor) {
                    let id = block.id;
                    if self.select(id) {
                        self.mode = Mode::Editing;
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(block) = blocks.get(*cursor) {
                    let id = block.id;
                    *cursor = (*cursor).min(blocks.len().saturating_sub(2));
                    self.editor.delete_block(id);
                    self.set_status(format!("deleted {id}"));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::BlockKind;

    fn app() -> App<MemoryStore> {
        App::new(Editor::new(), LayoutStore::new(MemoryStore::new()))
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    fn type_str(app: &mut App<MemoryStore>, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn ctrl(app: &mut App<MemoryStore>, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    /// Place an I3 (key 2) at row `y`.
    fn place_bar(app: &mut App<MemoryStore>, y: usize) {
        press(app, KeyCode::Char('2'));
        for _ in 0..y {
            press(app, KeyCode::Down);
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn place_through_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.editor().live().map(|b| b.kind), Some(BlockKind::L3));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.editor().blocks().len(), 1);
        assert_eq!(app.status(), "placed block-0");
    }

    #[test]
    fn rejected_actions_explain_themselves() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.status(), "nothing selected");

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.status(), "edge of the grid");
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.status(), BUSY);
    }

    #[test]
    fn save_prompt_flow() {
        let mut app = app();
        place_bar(&mut app, 0);

        ctrl(&mut app, 's');
        assert!(matches!(app.mode(), Mode::NamingSave { .. }));
        type_str(&mut app, "quiet");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode(), &Mode::Editing);
        assert_eq!(app.store().list().unwrap(), vec!["quie"]);
        assert_eq!(app.status(), "saved \"quie\" (1 blocks)");
        assert!(!app.should_quit());
    }

    #[test]
    fn save_keeps_picked_up_block() {
        let mut app = app();
        place_bar(&mut app, 0);
        place_bar(&mut app, 2);

        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.editor().blocks().len(), 1);

        ctrl(&mut app, 's');
        assert_eq!(app.status(), "save as:");
        type_str(&mut app, "both");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status(), "saved \"both\" (2 blocks)");

        let saved = app.store().load("both").unwrap();
        assert_eq!(saved[0].id.number(), 0);
        assert_eq!(saved[0].offset_x, 0);
        assert_eq!(saved.len(), 2);
    }

    #[test]
    fn duplicate_and_empty_names_are_reported() {
        let mut app = app();
        place_bar(&mut app, 0);
        for _ in 0..2 {
            ctrl(&mut app, 's');
            type_str(&mut app, "a");
            press(&mut app, KeyCode::Enter);
        }
        assert!(app.status().contains("already exists"));

        ctrl(&mut app, 's');
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status(), "layout name must not be empty");
        assert_eq!(app.store().list().unwrap().len(), 1);
    }

    #[test]
    fn escape_cancels_save() {
        let mut app = app();
        ctrl(&mut app, 's');
        type_str(&mut app, "x");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.status(), "save cancelled");
        assert!(app.store().list().unwrap().is_empty());
    }

    #[test]
    fn browse_restore_and_delete_saves() {
        let mut app = app();
        place_bar(&mut app, 0);
        ctrl(&mut app, 's');
        type_str(&mut app, "one");
        press(&mut app, KeyCode::Enter);
        place_bar(&mut app, 2);
        ctrl(&mut app, 's');
        type_str(&mut app, "two");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.mode(),
            &Mode::BrowsingSaves {
                names: vec!["one".to_string()],
                cursor: 0
            }
        );

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), &Mode::Editing);
        assert_eq!(app.editor().blocks().len(), 1);
        assert_eq!(app.editor().next_id(), BlockId(1));
    }

    #[test]
    fn block_list_selects_and_deletes() {
        let mut app = app();
        place_bar(&mut app, 0);
        place_bar(&mut app, 3);

        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode(), &Mode::BrowsingBlocks { cursor: 0 });
        assert!(app.editor().block(BlockId(1)).is_none());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), &Mode::Editing);
        assert_eq!(app.editor().live().map(|b| b.id), Some(BlockId(0)));
    }

    #[test]
    fn mouse_click_selects_block() {
        let mut app = app();
        place_bar(&mut app, 4);

        let view = LayoutView::new();
        let vp = Viewport::new(80, 24);
        let (col, row) = (0..vp.width)
            .flat_map(|c| (0..vp.height).map(move |r| (c, r)))
            .find(|&(c, r)| view.cell_at(vp, c, r) == Some((1, 4)))
            .unwrap();

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(click, &view, vp);
        assert_eq!(app.editor().live().map(|b| b.id), Some(BlockId(0)));
        assert_eq!(app.status(), "selected block-0");
    }

    #[test]
    fn quit_keys_depend_on_mode() {
        let mut app = app();
        ctrl(&mut app, 's');
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = self::app();
        ctrl(&mut app, 's');
        ctrl(&mut app, 'c');
        assert!(app.should_quit());
    }

    #[test]
    fn render_shows_overlay() {
        let mut app = app();
        place_bar(&mut app, 0);
        press(&mut app, KeyCode::Char('b'));

        let view = LayoutView::new();
        let mut fb = FrameBuffer::new(0, 0);
        app.render_into(&view, Viewport::new(80, 24), &mut fb);
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("PLACED BLOCKS"));
        assert!(text.contains("> block-0 i3 0° (0,0)"));
    }
}
