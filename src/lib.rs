//! Block layout editor (workspace facade crate).
//!
//! Re-exports the member crates under `block_layout::{core,input,store,term,types}`
//! and holds the session glue shared by the binary and the integration tests.

pub mod app;
pub mod config;

pub use block_layout_core as core;
pub use block_layout_input as input;
pub use block_layout_store as store;
pub use block_layout_term as term;
pub use block_layout_types as types;

pub use app::{App, Mode};
pub use config::EditorConfig;
