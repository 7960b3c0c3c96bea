//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules and state management. It has **zero
//! dependencies** on UI, timing, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is reachable from plain method calls
//! - **Portable**: Can run behind any frontend (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`piece`]: Tetromino layouts for four rotation states and the falling piece
//! - [`board`]: 10x20 grid with a hidden spawn margin, collision tests and row clearing
//! - [`rng`]: Next-piece selection that never repeats the queued kind
//! - [`scoring`]: Points per lock and per manual drop
//! - [`session`]: The session state machine that owns everything above
//! - [`snapshot`]: Read-only render state for frontends
//!
//! # Game Rules
//!
//! - **Rotation**: rotate in place; a rotation that does not fit is rejected (no wall kicks)
//! - **Gravity**: the frontend calls [`GameSession::tick`](session::GameSession::tick) on a fixed interval
//! - **Lock**: a piece locks as soon as a downward step does not fit
//! - **Game over**: the promoted piece does not fit at its spawn position
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::GameKey;
//!
//! let mut game = GameSession::new(12345);
//!
//! game.handle_input(GameKey::Right);
//! game.handle_input(GameKey::Rotate);
//! game.tick();
//!
//! let state = game.render_state();
//! assert!(!state.game_over);
//! assert!(state.current.is_some());
//! ```

pub mod board;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use piece::{get_layout, spawn_offset, Piece};
pub use rng::{next_kind, PieceRng, SimpleRng};
#[cfg(feature = "test-support")]
pub use rng::SequenceRng;
pub use scoring::{calculate_drop_score, calculate_line_score};
pub use session::{DropOutcome, GameSession, LockEvent};
pub use snapshot::{PieceView, RenderState};
