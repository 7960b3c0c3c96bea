//! Blockfall terminal game (default binary).
//!
//! Crossterm for input, a framebuffer renderer for output, and a fixed-interval
//! gravity timer feeding `GameSession::tick`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{DropOutcome, GameSession};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameKey, TICK_MS};
use blockfall::{DropTimer, EventLog, GameConfig, LogRecord};

fn main() -> Result<()> {
    let config = GameConfig::from_env();

    let mut log = match config.log_path.as_deref() {
        Some(path) => EventLog::open(path).unwrap_or_else(|e| {
            eprintln!("[blockfall] event log disabled: {e:#}");
            EventLog::disabled()
        }),
        None => EventLog::disabled(),
    };
    log.record(&LogRecord::SessionStart {
        seed: config.seed,
        drop_ms: config.drop_ms,
    });

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();

    match &result {
        Ok(score) => eprintln!("[blockfall] final score {score} (seed {})", config.seed),
        Err(e) => eprintln!("[blockfall] error: {e:#}"),
    }
    result.map(|_| ())
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, log: &mut EventLog) -> Result<u32> {
    let mut session = GameSession::new(config.seed).with_restart_policy(config.restart_policy);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut state = session.render_state();

    let started = Instant::now();
    let mut drop_timer = DropTimer::new(config.drop_ms);
    drop_timer.reset(0);

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            session.render_state_into(&mut state);
            view.render_into(&state, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(session.score());
                    }
                    if let Some(game_key) = handle_key_event(key) {
                        let score_before = session.score();
                        let was_over = session.game_over();
                        if session.handle_input(game_key) {
                            dirty = true;
                            if game_key == GameKey::Restart {
                                log.record(&LogRecord::Restart { score_before });
                                drop_timer.reset(elapsed_ms(started));
                            }
                        }
                        after_step(&mut session, log, was_over);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();

            if drop_timer.poll(elapsed_ms(started)) {
                let was_over = session.game_over();
                if session.tick() != DropOutcome::Ignored {
                    dirty = true;
                }
                after_step(&mut session, log, was_over);
            }
        }
    }
}

/// Log the lock (if any) and a game-over transition after a session step.
fn after_step(session: &mut GameSession, log: &mut EventLog, was_over: bool) {
    if let Some(event) = session.take_last_event() {
        log.record(&LogRecord::lock(&event, session.score()));
    }
    if !was_over && session.game_over() {
        log.record(&LogRecord::GameOver {
            score: session.score(),
            lines: session.lines(),
        });
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
