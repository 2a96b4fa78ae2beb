//! Key mapping from terminal events to editor actions.

use crate::types::{BlockKind, EditorAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Session commands that sit outside the placement controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open the save-name prompt
    Save,
    /// Open the saved-layouts browser
    BrowseSaves,
    /// Open the placed-block list
    BrowseBlocks,
}

/// Palette key for each block kind, in [`BlockKind::ALL`] order.
const PALETTE_KEYS: [char; 11] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-'];

/// Block kind bound to a palette key.
pub fn palette_kind(c: char) -> Option<BlockKind> {
    PALETTE_KEYS
        .iter()
        .position(|&k| k == c)
        .map(|i| BlockKind::ALL[i])
}

/// Palette key bound to a block kind.
pub fn palette_key(kind: BlockKind) -> char {
    PALETTE_KEYS[kind.palette_index()]
}

/// Map keyboard input to editor actions.
pub fn handle_key_event(key: KeyEvent) -> Option<EditorAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(EditorAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(EditorAction::MoveRight)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(EditorAction::MoveUp)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(EditorAction::MoveDown)
        }

        // Rotation
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(EditorAction::Rotate)
        }

        // Commit / discard
        KeyCode::Enter | KeyCode::Char(' ') => Some(EditorAction::Place),
        KeyCode::Delete | KeyCode::Backspace => Some(EditorAction::Delete),
        KeyCode::Esc => Some(EditorAction::Deselect),

        // Palette
        KeyCode::Char('c') | KeyCode::Char('C') => Some(EditorAction::NextColor),
        KeyCode::Char(c) => palette_kind(c).map(EditorAction::Begin),

        _ => None,
    }
}

/// Map keyboard input to session commands.
pub fn handle_command_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Save)
        }
        _ if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char('o') | KeyCode::Char('O') => Some(Command::BrowseSaves),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Command::BrowseBlocks),
        _ => None,
    }
}

/// Check if key should quit the editor.
pub fn should_quit(key: KeyEvent) -> bool {
    (matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        && !key.modifiers.contains(KeyModifiers::CONTROL))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
