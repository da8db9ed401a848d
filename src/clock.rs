//! Two independent movement cadences.
//!
//! Terminal cells are roughly twice as tall as wide, so horizontal moves tick
//! about twice as often as vertical ones to look even on screen. The clock
//! never reads the time itself; callers pass `now` in.

use std::cmp::min;
use std::time::{Duration, Instant};

use crate::snake::Direction;

/// Which cadences fired during a poll
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fired {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Fired {
    /// A forced tick drives whichever direction the snake is heading.
    pub const FORCED: Fired = Fired { horizontal: true, vertical: true };

    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }

    pub fn drives(&self, direction: Direction) -> bool {
        if direction.is_horizontal() {
            self.horizontal
        } else {
            self.vertical
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Cadence {
    period: Duration,
    due: Instant,
}

impl Cadence {
    fn new(period: Duration, now: Instant) -> Self {
        Cadence { period, due: now + period }
    }

    fn restart(&mut self, now: Instant) {
        self.due = now + self.period;
    }

    fn poll(&mut self, now: Instant) -> bool {
        if now < self.due {
            return false;
        }
        // re-arm from now so a late poll fires once
        self.restart(now);
        true
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Clock {
    horizontal: Cadence,
    vertical: Cadence,
    running: bool,
}

impl Clock {
    pub fn new(horizontal_period: Duration, vertical_period: Duration, now: Instant) -> Self {
        Clock {
            horizontal: Cadence::new(horizontal_period, now),
            vertical: Cadence::new(vertical_period, now),
            running: true,
        }
    }

    /// Restarts both cadences with zero elapsed time.
    pub fn reset(&mut self, now: Instant) {
        self.horizontal.restart(now);
        self.vertical.restart(now);
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.running {
            Some(min(self.horizontal.due, self.vertical.due))
        } else {
            None
        }
    }

    /// Time left until the next deadline, zero if it already passed.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline().map(|due| due.saturating_duration_since(now))
    }

    pub fn poll(&mut self, now: Instant) -> Fired {
        if !self.running {
            return Fired::default();
        }

        Fired {
            horizontal: self.horizontal.poll(now),
            vertical: self.vertical.poll(now),
        }
    }
}
