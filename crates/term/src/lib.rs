//! Terminal rendering for the layout editor.
//!
//! A small rendering layer that draws into a plain framebuffer and flushes
//! only the changed cells to the terminal. No widget toolkit is involved.
//!
//! - [`fb`]: styled character framebuffer
//! - [`layout_view`]: pure snapshot-to-framebuffer view plus mouse hit testing
//! - [`renderer`]: terminal setup and diff flushing

pub mod fb;
pub mod layout_view;
pub mod renderer;

pub use block_layout_core as core;
pub use block_layout_input as input;
pub use block_layout_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use layout_view::{describe_block, LayoutView, Overlay, ViewState, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalScreen};
