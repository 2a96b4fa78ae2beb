//! Terminal input module (editor-facing).
//!
//! Maps `crossterm` key events into [`crate::types::EditorAction`] values for
//! the placement controller, and into [`Command`]s for the surrounding session
//! (save prompt, saved-layout browser, block list).

pub mod map;

pub use block_layout_types as types;

pub use map::{handle_command_key, handle_key_event, palette_key, palette_kind, should_quit, Command};
