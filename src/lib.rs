//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core, input, term, types}` and
//! hosts the small frontend helpers used by the terminal binary.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod drop_timer;
pub mod event_log;

pub use config::GameConfig;
pub use drop_timer::DropTimer;
pub use event_log::{EventLog, LogRecord};
