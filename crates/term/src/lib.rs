//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids widget/layout libraries and instead renders a core
//! `RenderState` into a simple framebuffer that is flushed to the terminal.
//!
//! - [`game_view`]: pure mapping from `RenderState` to a [`FrameBuffer`]
//! - [`renderer`]: crossterm output with run-length diffing between frames

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
