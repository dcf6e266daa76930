//! Terminal rendering module
//!
//! A small game-oriented rendering layer: views draw into a plain
//! framebuffer of styled character cells, and a terminal backend flushes
//! the framebuffer to the screen. Views are pure (no I/O) and can be
//! unit-tested; only the backend touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Rgb, ScreenCell};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
