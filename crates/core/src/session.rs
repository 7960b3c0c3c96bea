//! Game session module - owns the board, the falling and queued pieces, and the score
//!
//! Every move and rotation is computed as a candidate piece, checked against the
//! board, and committed only if it fits. A downward move that does not fit locks
//! the piece, clears full rows, scores, and promotes the queued piece. If the
//! promoted piece does not fit at its spawn position the game is over; from then
//! on every operation except a restart is a no-op.

use crate::board::{Board, FullRows};
use crate::piece::Piece;
use crate::rng::{next_kind, PieceRng, SimpleRng};
use crate::scoring::{calculate_drop_score, calculate_line_score};
use crate::snapshot::{PieceView, RenderState};
use crate::types::{GameKey, PieceKind, RestartPolicy};

/// What a single lock did to the board and score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    /// Rows that were full at lock time, bottom to top (pre-compaction indices).
    pub cleared_rows: FullRows,
    /// The promoted piece did not fit and the game ended.
    pub topped_out: bool,
}

/// Result of a downward step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved one row down.
    Moved,
    /// The piece could not move and was locked in place.
    Locked(LockEvent),
    /// The game is over; nothing happened.
    Ignored,
}

impl DropOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, DropOutcome::Ignored)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession<R = SimpleRng> {
    board: Board,
    current: Piece,
    next: Piece,
    rng: R,
    score: u32,
    lines: u32,
    game_over: bool,
    restart_policy: RestartPolicy,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameSession<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: PieceRng> GameSession<R> {
    /// Create a new game drawing pieces from `rng`
    pub fn with_rng(mut rng: R) -> Self {
        let (current, next) = draw_pair(&mut rng);
        Self {
            board: Board::new(),
            current,
            next,
            rng,
            score: 0,
            lines: 0,
            game_over: false,
            restart_policy: RestartPolicy::default(),
            last_event: None,
        }
    }

    pub fn with_restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.restart_policy = policy;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next.kind()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn restart_policy(&self) -> RestartPolicy {
        self.restart_policy
    }

    /// Commit `candidate` as the current piece if it fits.
    fn try_commit(&mut self, candidate: Piece) -> bool {
        if self.game_over || !self.board.can_place(&candidate) {
            return false;
        }
        self.current = candidate;
        true
    }

    /// Shift one column left; rejected at the wall or against locked cells.
    pub fn move_left(&mut self) -> bool {
        self.try_commit(self.current.moved(0, -1))
    }

    /// Shift one column right; rejected at the wall or against locked cells.
    pub fn move_right(&mut self) -> bool {
        self.try_commit(self.current.moved(0, 1))
    }

    /// Advance the rotation state. Rejected outright if the rotated cells do not fit.
    pub fn rotate(&mut self) -> bool {
        self.try_commit(self.current.rotated())
    }

    /// Move one row down, locking the piece if it has landed.
    pub fn move_down(&mut self) -> DropOutcome {
        if self.game_over {
            return DropOutcome::Ignored;
        }
        if self.try_commit(self.current.moved(1, 0)) {
            return DropOutcome::Moved;
        }
        let event = self.lock_current();
        self.last_event = Some(event.clone());
        DropOutcome::Locked(event)
    }

    /// Lock the current piece, clear rows, score, and promote the queued piece.
    fn lock_current(&mut self) -> LockEvent {
        self.board.lock_piece(&self.current);

        let cleared_rows = self.board.full_rows();
        let lines_cleared = self.board.clear_full_rows();
        debug_assert_eq!(lines_cleared, cleared_rows.len());

        let points = calculate_line_score(lines_cleared);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines_cleared as u32);

        self.current = self.next;
        self.next = Piece::new(next_kind(Some(self.next.kind()), &mut self.rng));

        if !self.board.can_place(&self.current) {
            self.game_over = true;
        }

        LockEvent {
            lines_cleared: lines_cleared as u32,
            points,
            cleared_rows,
            topped_out: self.game_over,
        }
    }

    /// One timer step of gravity.
    pub fn tick(&mut self) -> DropOutcome {
        self.move_down()
    }

    /// Map a discrete key to a session operation. Returns whether anything changed.
    pub fn handle_input(&mut self, key: GameKey) -> bool {
        match key {
            GameKey::Left => self.move_left(),
            GameKey::Right => self.move_right(),
            GameKey::Rotate => self.rotate(),
            GameKey::Down => {
                let outcome = self.move_down();
                if outcome == DropOutcome::Moved {
                    self.score = self.score.saturating_add(calculate_drop_score(1));
                }
                outcome.changed()
            }
            GameKey::Restart => {
                if !self.restart_policy.allows(self.game_over) {
                    return false;
                }
                self.reset();
                true
            }
        }
    }

    /// Start over: empty board, zero score, two fresh pieces.
    pub fn reset(&mut self) {
        let (current, next) = draw_pair(&mut self.rng);
        self.board.reset();
        self.current = current;
        self.next = next;
        self.score = 0;
        self.lines = 0;
        self.game_over = false;
        self.last_event = None;
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn render_state_into(&self, out: &mut RenderState) {
        self.board.write_grid(&mut out.board);
        out.current = if self.game_over {
            None
        } else {
            Some(PieceView::from(self.current))
        };
        out.next_kind = self.next.kind();
        out.score = self.score;
        out.lines = self.lines;
        out.game_over = self.game_over;
    }

    /// Read-only snapshot for the renderer.
    pub fn render_state(&self) -> RenderState {
        let mut s = RenderState::default();
        self.render_state_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn from_parts(board: Board, current: Piece, next: Piece, rng: R) -> Self {
        Self {
            board,
            current,
            next,
            rng,
            score: 0,
            lines: 0,
            game_over: false,
            restart_policy: RestartPolicy::default(),
            last_event: None,
        }
    }
}

/// Draw a fresh (current, next) pair; `next` never repeats `current`.
fn draw_pair(rng: &mut impl PieceRng) -> (Piece, Piece) {
    let current = next_kind(None, rng);
    let next = next_kind(Some(current), rng);
    (Piece::new(current), Piece::new(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;
    use crate::types::{Color, Position, BOARD_HEIGHT, BOARD_WIDTH, LINE_SCORES};

    const GRAY: Color = Color::new(128, 128, 128);

    fn scripted(kinds: &[PieceKind]) -> GameSession<SequenceRng> {
        GameSession::with_rng(SequenceRng::for_kinds(None, kinds))
    }

    fn session_with(board: Board, current: PieceKind, next: PieceKind) -> GameSession<SimpleRng> {
        GameSession::from_parts(
            board,
            Piece::new(current),
            Piece::new(next),
            SimpleRng::new(3),
        )
    }

    #[test]
    fn test_new_session() {
        let state = GameSession::new(12345);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert!(!state.game_over);
        assert_ne!(state.current.kind(), state.next.kind());
        assert!(state.board.can_place(&state.current));
        assert_eq!(state.board.occupied_count(), 0);
    }

    #[test]
    fn test_move_left_at_wall_is_rejected() {
        let mut state = scripted(&[PieceKind::T, PieceKind::O]);
        while state.move_left() {}
        let before = state.current;
        let min_col = before.cell_positions().iter().map(|c| c.col).min();
        assert_eq!(min_col, Some(0));

        assert!(!state.move_left());
        assert_eq!(state.current, before);
    }

    #[test]
    fn test_move_right_stops_at_wall() {
        let mut state = scripted(&[PieceKind::I, PieceKind::O]);
        let mut moved = 0;
        while state.move_right() {
            moved += 1;
        }
        // I spans columns 3..=6 at spawn.
        assert_eq!(moved, 3);
        let max_col = state.current.cell_positions().iter().map(|c| c.col).max();
        assert_eq!(max_col, Some(BOARD_WIDTH as i8 - 1));
    }

    #[test]
    fn test_rotation_rejected_against_wall_without_kick() {
        let mut state = scripted(&[PieceKind::I, PieceKind::O]);
        // Vertical I in column 9: rotating back to horizontal would poke past the wall.
        assert!(state.rotate());
        while state.move_right() {}
        let before = state.current;
        assert_eq!(before.cell_positions()[0].col, BOARD_WIDTH as i8 - 1);

        assert!(!state.rotate());
        assert_eq!(state.current, before);
    }

    #[test]
    fn test_rotation_rejected_against_locked_cells() {
        let mut board = Board::new();
        // T at spawn (row 0, col 3); rotation 1 needs (2, 4).
        board.set(2, 4, Some(GRAY));
        let mut state = session_with(board, PieceKind::T, PieceKind::O);
        let before = state.current;
        assert!(!state.rotate());
        assert_eq!(state.current, before);
    }

    #[test]
    fn test_o_piece_drops_nineteen_rows_then_locks() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T, PieceKind::I]);
        assert_eq!(state.current.kind(), PieceKind::O);

        for i in 0..18 {
            assert_eq!(state.move_down(), DropOutcome::Moved, "step {}", i);
        }
        match state.move_down() {
            DropOutcome::Locked(event) => {
                assert_eq!(event.lines_cleared, 0);
                assert_eq!(event.points, 0);
                assert!(!event.topped_out);
            }
            other => panic!("expected lock, got {:?}", other),
        }

        assert_eq!(state.score, 0);
        assert_eq!(state.board.occupied_count(), 4);
        for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
            assert_eq!(state.board.get(row, col), Some(Some(PieceKind::O.color())));
        }
        assert_eq!(state.current.kind(), PieceKind::T);
        assert_eq!(state.next.kind(), PieceKind::I);
    }

    #[test]
    fn test_vertical_i_completes_row() {
        let mut board = Board::new();
        let bottom = BOARD_HEIGHT as i8 - 1;
        for col in 1..BOARD_WIDTH as i8 {
            board.set(bottom, col, Some(GRAY));
        }
        board.set(10, 7, Some(GRAY));
        let mut state = session_with(board, PieceKind::I, PieceKind::T);

        assert!(state.rotate());
        while state.move_left() {}
        assert!(state.current.cell_positions().iter().all(|c| c.col == 0));

        let event = loop {
            match state.move_down() {
                DropOutcome::Moved => continue,
                DropOutcome::Locked(event) => break event,
                DropOutcome::Ignored => panic!("game should not be over"),
            }
        };

        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.cleared_rows.as_slice(), &[bottom]);
        assert_eq!(state.score, LINE_SCORES[1]);
        assert_eq!(state.lines, 1);

        // The I occupied rows 16..=19 in column 0; three cells remain, shifted down.
        for row in 17..=19 {
            assert_eq!(state.board.get(row, 0), Some(Some(PieceKind::I.color())));
        }
        assert!(state.board.is_cell_empty(16, 0));
        for col in 1..BOARD_WIDTH as i8 {
            assert!(state.board.is_cell_empty(bottom, col));
        }
        assert!(state.board.is_cell_empty(10, 7));
        assert_eq!(state.board.get(11, 7), Some(Some(GRAY)));
    }

    #[test]
    fn test_stacking_without_clears_ends_game() {
        let mut state = GameSession::new(42);
        let mut locks = 0;
        for _ in 0..10_000 {
            if state.game_over {
                break;
            }
            if let DropOutcome::Locked(_) = state.tick() {
                locks += 1;
            }
        }
        assert!(state.game_over);
        assert_eq!(state.lines, 0);
        assert!(locks > 1);

        let frozen = state.render_state();
        assert_eq!(state.move_down(), DropOutcome::Ignored);
        assert!(!state.move_left());
        assert!(!state.move_right());
        assert!(!state.rotate());
        assert!(!state.handle_input(GameKey::Down));
        assert_eq!(state.render_state(), frozen);
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut board = Board::new();
        // Block the T spawn cell (1, 4) while leaving the falling O room to lock.
        board.set(1, 4, Some(GRAY));
        let o = Piece::at(PieceKind::O, 0, 10, 0);
        let mut state = GameSession::from_parts(board, o, Piece::new(PieceKind::T), SimpleRng::new(1));
        state.board.set(12, 0, Some(GRAY));

        match state.move_down() {
            DropOutcome::Locked(event) => assert!(event.topped_out),
            other => panic!("expected lock, got {:?}", other),
        }
        assert!(state.game_over);
        assert!(state.render_state().current.is_none());
    }

    #[test]
    fn test_soft_drop_awards_points_but_tick_does_not() {
        let mut state = scripted(&[PieceKind::T, PieceKind::L]);
        assert_eq!(state.tick(), DropOutcome::Moved);
        assert_eq!(state.score, 0);
        assert!(state.handle_input(GameKey::Down));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_restart_policy_game_over_only() {
        let mut state = GameSession::new(5).with_restart_policy(RestartPolicy::GameOverOnly);
        state.handle_input(GameKey::Down);
        assert!(!state.handle_input(GameKey::Restart));
        assert_eq!(state.score, 1);

        state.game_over = true;
        assert!(state.handle_input(GameKey::Restart));
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut state = GameSession::new(9);
        for _ in 0..200 {
            state.tick();
        }
        assert!(state.board.occupied_count() > 0);
        state.reset();
        assert_eq!(state.board.occupied_count(), 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert!(!state.game_over);
        assert!(state.take_last_event().is_none());
        assert_eq!(state.current.offset(), Piece::new(state.current.kind()).offset());
    }

    #[test]
    fn test_last_event_set_on_lock() {
        let mut state = scripted(&[PieceKind::O, PieceKind::S]);
        while state.move_down() == DropOutcome::Moved {}
        let ev = state.take_last_event().expect("lock event");
        assert_eq!(ev.lines_cleared, 0);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_render_state_mirrors_session() {
        let state = scripted(&[PieceKind::J, PieceKind::Z]);
        let snap = state.render_state();
        let current = snap.current.expect("running game shows the piece");
        assert_eq!(current.kind, PieceKind::J);
        assert_eq!(current.color, PieceKind::J.color());
        assert_eq!(current.cells, state.current.cell_positions());
        assert_eq!(snap.next_kind, PieceKind::Z);
        assert!(current.cells.contains(&Position::new(0, 3)));
        assert!(!snap.game_over);
    }
}
