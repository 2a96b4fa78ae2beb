//! Named layout slots
//!
//! Every saved layout lives under the single backend key [`LAYOUTS_KEY`],
//! whose value is a JSON object mapping layout name to an ordered list of
//! block records. Names keep the order in which they were first saved.
//!
//! Restoring performs no geometric validation; stored layouts were legal
//! when they were saved.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::backend::KeyValueStore;
use crate::core::Editor;
use crate::error::StoreError;
use crate::types::PlacedBlock;

/// Backend key holding every saved layout
pub const LAYOUTS_KEY: &str = "savedLayouts";

type LayoutBook = Map<String, Value>;

/// Save, restore, list and delete named layouts
#[derive(Debug, Clone)]
pub struct LayoutStore<S> {
    backend: S,
}

impl<S: KeyValueStore> LayoutStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn read_book(&self) -> Result<LayoutBook, StoreError> {
        match self.backend.get(LAYOUTS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(LayoutBook::new()),
        }
    }

    fn write_book(&mut self, book: &LayoutBook) -> Result<(), StoreError> {
        let raw = serde_json::to_string(book)?;
        self.backend.set(LAYOUTS_KEY, raw)
    }

    /// Store `blocks` under a new name
    ///
    /// Refuses an empty name and any name already in use; an existing layout
    /// is never overwritten.
    pub fn save(&mut self, name: &str, blocks: &[PlacedBlock]) -> Result<(), StoreError> {
        if name.trim().is_empty() {
            warn!("save refused: empty layout name");
            return Err(StoreError::EmptyName);
        }

        let mut book = self.read_book()?;
        if book.contains_key(name) {
            warn!(name, "save refused: name already in use");
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        book.insert(name.to_string(), serde_json::to_value(blocks)?);
        self.write_book(&book)?;
        info!(name, blocks = blocks.len(), "layout saved");
        Ok(())
    }

    /// Blocks stored under `name`, in saved order
    pub fn load(&self, name: &str) -> Result<Vec<PlacedBlock>, StoreError> {
        let mut book = self.read_book()?;
        let Some(value) = book.remove(name) else {
            warn!(name, "layout not found");
            return Err(StoreError::NotFound(name.to_string()));
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Load `name` and make it the editor's committed set
    ///
    /// On any error the editor is left untouched. Returns the block count.
    pub fn restore_into(&self, name: &str, editor: &mut Editor) -> Result<usize, StoreError> {
        let blocks = self.load(name)?;
        let count = blocks.len();
        if !editor.restore(blocks) {
            warn!(name, "restore refused: block ids out of range");
            return Err(StoreError::IdOutOfRange(name.to_string()));
        }
        info!(name, blocks = count, "layout restored from store");
        Ok(count)
    }

    /// Saved layout names in save order
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read_book()?.keys().cloned().collect())
    }

    pub fn contains(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.read_book()?.contains_key(name))
    }

    /// Remove a saved layout
    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let mut book = self.read_book()?;
        if book.shift_remove(name).is_none() {
            warn!(name, "delete refused: layout not found");
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.write_book(&book)?;
        info!(name, "layout deleted");
        Ok(())
    }
}
