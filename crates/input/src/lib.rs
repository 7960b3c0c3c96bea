//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameKey`] values for
//! `GameSession::handle_input`. Key polling itself stays in the binary.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
