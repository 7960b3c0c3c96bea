//! Optional JSON-lines event log.
//!
//! One JSON object per line, tagged by `type`. The first failed write drops the
//! writer; gameplay never sees log errors.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::LockEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    SessionStart {
        seed: u32,
        drop_ms: u64,
    },
    Lock {
        lines_cleared: u32,
        points: u32,
        cleared_rows: Vec<i8>,
        score: u32,
    },
    GameOver {
        score: u32,
        lines: u32,
    },
    Restart {
        score_before: u32,
    },
}

impl LogRecord {
    /// Build a `lock` record from a session lock event and the score after it.
    pub fn lock(event: &LockEvent, score: u32) -> Self {
        LogRecord::Lock {
            lines_cleared: event.lines_cleared,
            points: event.points,
            cleared_rows: event.cleared_rows.to_vec(),
            score,
        }
    }
}

pub struct EventLog<W: Write = File> {
    out: Option<W>,
    buf: Vec<u8>,
}

impl EventLog<File> {
    /// Open `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::new(file))
    }

    /// A log that discards everything.
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Append one record. Any I/O failure disables the log.
    pub fn record(&mut self, rec: &LogRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, rec).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if out.write_all(&self.buf).and_then(|_| out.flush()).is_err() {
            self.out = None;
        }
    }

    /// Recover the writer, if the log is still enabled.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}
