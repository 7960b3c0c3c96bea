//! Scoring module - points per lock and per manual drop
//!
//! A lock scores from [`LINE_SCORES`] by the number of rows it cleared. The table
//! is strictly increasing, so clearing rows together always beats clearing them
//! one at a time.

use crate::types::{LINE_SCORES, SOFT_DROP_POINTS};

/// Points for clearing `lines` rows with a single lock.
///
/// More than 4 rows cannot be cleared by one piece and scores like 4.
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Points for a manual fast drop that descended `cells` rows.
pub fn calculate_drop_score(cells: u32) -> u32 {
    cells.saturating_mul(SOFT_DROP_POINTS)
}
