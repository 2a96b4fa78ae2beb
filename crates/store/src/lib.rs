//! Layout store - named, persistent layout slots
//!
//! Serializes the editor's committed blocks under user-chosen names in a
//! string-keyed backend, and restores them back into an [`Editor`].
//!
//! # Record format
//!
//! ```text
//! {
//!   "savedLayouts": {
//!     "<name>": [
//!       {"id": "block-0", "blockType": "i3", "rotation": 90,
//!        "offsetX": 2, "offsetY": 1, "color": "#f44336"}
//!     ]
//!   }
//! }
//! ```
//!
//! The outer object is the backend; the value under `savedLayouts` is itself a
//! JSON string so any `get`/`set` store can hold it.
//!
//! # Example
//!
//! ```
//! use block_layout_core::Editor;
//! use block_layout_store::{LayoutStore, MemoryStore, StoreError};
//! use block_layout_types::BlockKind;
//!
//! let mut editor = Editor::new();
//! editor.begin_new(BlockKind::I3);
//! editor.place();
//!
//! let mut store = LayoutStore::new(MemoryStore::new());
//! store.save("draft", editor.blocks()).unwrap();
//! assert!(matches!(store.save("draft", editor.blocks()), Err(StoreError::DuplicateName(_))));
//!
//! let mut other = Editor::new();
//! store.restore_into("draft", &mut other).unwrap();
//! assert_eq!(other.blocks(), editor.blocks());
//! ```
//!
//! [`Editor`]: block_layout_core::Editor

pub mod backend;
pub mod error;
pub mod layouts;

pub use block_layout_core as core;
pub use block_layout_types as types;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StoreError;
pub use layouts::{LayoutStore, LAYOUTS_KEY};
