use log::debug;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The countdown is not running; nothing happened.
    Idle,
    Running(u32),
    /// Reported once, on the tick that reached zero.
    Expired,
}

/// Linear one-second countdown. Idle or running; no pause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            running: false,
        }
    }

    /// Starts counting from `seconds`. Returns false (and stays idle) for zero.
    pub fn start(&mut self, seconds: u32) -> bool {
        self.remaining = seconds;
        self.running = seconds > 0;
        self.running
    }

    /// Continues from the remaining time, e.g. after a resume.
    pub fn resume(&mut self) -> bool {
        self.start(self.remaining)
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            debug!("countdown reached zero");
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Turns wall-clock time into whole one-second ticks for the event loop.
#[derive(Clone, Debug, Default)]
pub struct Ticker {
    next_tick_at: Option<Instant>,
}

impl Ticker {
    pub fn start(&mut self, now: Instant) {
        self.next_tick_at = Some(now + TICK);
    }

    pub fn stop(&mut self) {
        self.next_tick_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_tick_at.is_some()
    }

    /// Number of ticks that became due since the last call.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_tick_at else {
            return 0;
        };
        let mut count = 0;
        while now >= next {
            count += 1;
            next += TICK;
        }
        self.next_tick_at = Some(next);
        count
    }

    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_tick_at
            .map(|next| next.saturating_duration_since(now))
    }
}
