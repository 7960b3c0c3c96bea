//! Session tests - movement, gravity, locking and restart through the public API

use blockfall::core::{DropOutcome, GameSession, LockEvent, PieceRng, SequenceRng};
use blockfall::types::{GameKey, PieceKind, RestartPolicy};

fn scripted(kinds: &[PieceKind]) -> GameSession<SequenceRng> {
    GameSession::with_rng(SequenceRng::for_kinds(None, kinds))
}

/// Let gravity run until the current piece locks.
fn drop_to_floor<R: PieceRng>(session: &mut GameSession<R>) -> LockEvent {
    for _ in 0..64 {
        match session.tick() {
            DropOutcome::Moved => {}
            DropOutcome::Locked(event) => return event,
            DropOutcome::Ignored => panic!("game ended before the piece locked"),
        }
    }
    panic!("piece never locked");
}

fn run_until_game_over(session: &mut GameSession) {
    for _ in 0..20_000 {
        if session.game_over() {
            return;
        }
        session.tick();
    }
    panic!("game never ended");
}

#[test]
fn test_new_session_is_playable() {
    let session = GameSession::new(12345);
    assert_eq!(session.score(), 0);
    assert_eq!(session.lines(), 0);
    assert!(!session.game_over());
    assert_ne!(session.current_piece().kind(), session.next_kind());
    assert!(session.board().can_place(session.current_piece()));
}

#[test]
fn test_left_stops_at_wall() {
    let mut session = scripted(&[PieceKind::O, PieceKind::T]);
    for _ in 0..4 {
        assert!(session.handle_input(GameKey::Left));
    }
    assert!(!session.handle_input(GameKey::Left));
    assert_eq!(session.current_piece().offset().col, 0);
}

#[test]
fn test_o_piece_falls_and_locks_on_floor() {
    let mut session = scripted(&[PieceKind::O, PieceKind::T, PieceKind::I, PieceKind::L]);
    assert_eq!(session.current_piece().kind(), PieceKind::O);
    assert_eq!(session.next_kind(), PieceKind::T);

    for _ in 0..18 {
        assert_eq!(session.tick(), DropOutcome::Moved);
    }
    let event = match session.tick() {
        DropOutcome::Locked(event) => event,
        other => panic!("expected a lock, got {:?}", other),
    };
    assert_eq!(event.lines_cleared, 0);
    assert_eq!(event.points, 0);
    assert!(!event.topped_out);

    let color = Some(PieceKind::O.color());
    for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
        assert_eq!(session.board().get(row, col), Some(color));
    }
    assert_eq!(session.board().occupied_count(), 4);

    assert_eq!(session.current_piece().kind(), PieceKind::T);
    assert_eq!(session.next_kind(), PieceKind::I);
    assert_eq!(session.score(), 0);

    assert_eq!(session.take_last_event(), Some(event));
    assert_eq!(session.take_last_event(), None);
}

#[test]
fn test_completing_a_row_scores_and_compacts() {
    let mut session = scripted(&[PieceKind::I, PieceKind::O, PieceKind::I, PieceKind::O]);

    // I -> columns 0..=3 on the floor.
    for _ in 0..3 {
        assert!(session.handle_input(GameKey::Left));
    }
    drop_to_floor(&mut session);

    // O -> columns 8..=9 on the floor.
    assert_eq!(session.current_piece().kind(), PieceKind::O);
    for _ in 0..4 {
        assert!(session.handle_input(GameKey::Right));
    }
    drop_to_floor(&mut session);

    // I -> columns 4..=7 completes row 19.
    assert_eq!(session.current_piece().kind(), PieceKind::I);
    assert!(session.handle_input(GameKey::Right));
    let event = drop_to_floor(&mut session);

    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.points, 100);
    assert_eq!(event.cleared_rows.as_slice(), &[19]);
    assert_eq!(session.score(), 100);
    assert_eq!(session.lines(), 1);

    // The top half of the O dropped into the cleared row.
    let board = session.board();
    assert_eq!(board.occupied_count(), 2);
    assert!(board.is_occupied(19, 8));
    assert!(board.is_occupied(19, 9));
    assert!(board.is_row_empty(18));
}

#[test]
fn test_manual_down_scores_but_gravity_does_not() {
    let mut session = scripted(&[PieceKind::O, PieceKind::T]);
    assert!(session.handle_input(GameKey::Down));
    assert_eq!(session.score(), 1);
    assert_eq!(session.tick(), DropOutcome::Moved);
    assert_eq!(session.score(), 1);
}

#[test]
fn test_game_over_freezes_session() {
    let mut session = GameSession::new(99);
    run_until_game_over(&mut session);

    let before = session.render_state();
    assert!(before.game_over);
    assert!(before.current.is_none());

    for key in [GameKey::Left, GameKey::Right, GameKey::Rotate, GameKey::Down] {
        assert!(!session.handle_input(key), "{:?} changed a finished game", key);
    }
    assert_eq!(session.tick(), DropOutcome::Ignored);
    assert_eq!(session.render_state(), before);
}

#[test]
fn test_restart_after_game_over() {
    let mut session = GameSession::new(5);
    run_until_game_over(&mut session);

    assert!(session.handle_input(GameKey::Restart));
    assert!(!session.game_over());
    assert_eq!(session.score(), 0);
    assert_eq!(session.lines(), 0);
    assert_eq!(session.board().occupied_count(), 0);
    assert!(session.render_state().current.is_some());
}

#[test]
fn test_restart_policy_game_over_only() {
    let mut session = GameSession::new(8).with_restart_policy(RestartPolicy::GameOverOnly);
    assert!(session.handle_input(GameKey::Down));
    assert!(!session.handle_input(GameKey::Restart));
    assert_eq!(session.score(), 1);

    run_until_game_over(&mut session);
    assert!(session.handle_input(GameKey::Restart));
    assert!(!session.game_over());
}

#[test]
fn test_render_state_tracks_session() {
    let mut session = scripted(&[PieceKind::O, PieceKind::T, PieceKind::I]);
    drop_to_floor(&mut session);

    let state = session.render_state();
    assert_eq!(state.cell(19, 4), Some(Some(PieceKind::O.color())));
    assert_eq!(state.cell(0, 0), Some(None));
    assert_eq!(state.next_kind, PieceKind::I);
    let current = state.current.expect("active piece");
    assert_eq!(current.kind, PieceKind::T);
    assert_eq!(current.cells, session.current_piece().cell_positions());
}

#[test]
fn test_next_kind_never_repeats_current() {
    let mut session = GameSession::new(2024);
    for _ in 0..200 {
        if session.game_over() {
            session.reset();
        }
        assert_ne!(session.current_piece().kind(), session.next_kind());
        drop_to_floor(&mut session);
    }
}
