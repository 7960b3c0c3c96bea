/// Fixed-interval gravity timer driven by a millisecond clock.
///
/// The first call to [`DropTimer::poll`] only anchors the timer. After that it
/// fires at most once per call, once `interval_ms` has elapsed since the last
/// firing. Late polls do not build up a backlog of drops.
#[derive(Debug, Clone)]
pub struct DropTimer {
    interval_ms: u64,
    last_fire_ms: u64,
    started: bool,
}

impl DropTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            last_fire_ms: 0,
            started: false,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Returns true when a gravity step is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if !self.started {
            self.started = true;
            self.last_fire_ms = now_ms;
            return false;
        }

        if now_ms.saturating_sub(self.last_fire_ms) >= self.interval_ms {
            self.last_fire_ms = now_ms;
            return true;
        }

        false
    }

    /// Restart the interval from `now_ms` (used after a restart).
    pub fn reset(&mut self, now_ms: u64) {
        self.started = true;
        self.last_fire_ms = now_ms;
    }
}
